//! Store - `AppState` behind the effect store, with the action log

use tui_dispatch::{EffectStoreWithMiddleware, Middleware};

use crate::action::Action;
use crate::effect::Effect;
use crate::reducer::reducer;
use crate::state::AppState;

pub type Store = EffectStoreWithMiddleware<AppState, Action, Effect, ActionLog>;

pub fn new_store(state: AppState) -> Store {
    EffectStoreWithMiddleware::new(state, reducer, ActionLog::new())
}

/// Writes every dispatched action to the tracing log.
///
/// Ticks are skipped; they fire ten times a second.
#[derive(Debug, Clone, Default)]
pub struct ActionLog {
    dispatched: u64,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of actions seen so far, ticks included
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }
}

impl Middleware<Action> for ActionLog {
    fn before(&mut self, _action: &Action) {
        self.dispatched += 1;
    }

    fn after(&mut self, action: &Action, state_changed: bool) {
        if matches!(action, Action::Tick) {
            return;
        }
        tracing::debug!(
            category = action.category().unwrap_or("global"),
            changed = state_changed,
            "{}",
            action.summary()
        );
    }
}
