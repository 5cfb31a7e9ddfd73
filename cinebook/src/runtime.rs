//! Event/action/render loop
//!
//! 1. Terminal events are mapped to actions by the UI
//! 2. Actions go through the store (reducer + action log)
//! 3. Effects returned by the reducer are handed to the effect handler,
//!    which spawns keyed tasks; their results come back as actions
//! 4. The frame is redrawn whenever a dispatch reports a change

use std::io;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tui_dispatch::{
    EventKind, RawEvent, Subscriptions, TaskManager, process_raw_event, spawn_event_poller,
};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;
use crate::store::{Store, new_store};

const POLL_TIMEOUT: Duration = Duration::from_millis(10);
const LOOP_SLEEP: Duration = Duration::from_millis(16);

pub struct Runtime {
    store: Store,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    tasks: TaskManager<Action>,
    subscriptions: Subscriptions<Action>,
    should_render: bool,
}

impl Runtime {
    pub fn new(state: AppState) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            store: new_store(state),
            tasks: TaskManager::new(action_tx.clone()),
            subscriptions: Subscriptions::new(action_tx.clone()),
            action_tx,
            action_rx,
            should_render: true,
        }
    }

    /// Timers and other continuous action sources
    pub fn subscriptions(&mut self) -> &mut Subscriptions<Action> {
        &mut self.subscriptions
    }

    /// Queue an action to be dispatched once the loop starts
    pub fn enqueue(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    /// Run until `Action::Quit` is dispatched.
    pub async fn run<B, FRender, FEvent, FEffect>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &AppState),
        FEvent: FnMut(&EventKind, &AppState) -> Vec<Action>,
        FEffect: FnMut(Effect, &mut TaskManager<Action>),
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _poller = spawn_event_poller(event_tx, POLL_TIMEOUT, LOOP_SLEEP, cancel_token.clone());

        loop {
            if self.should_render {
                let state = self.store.state();
                terminal.draw(|frame| {
                    let area = frame.area();
                    render(frame, area, state);
                })?;
                self.should_render = false;
            }

            tokio::select! {
                Some(raw) = event_rx.recv() => {
                    let event = process_raw_event(raw);
                    for action in map_event(&event, self.store.state()) {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if matches!(action, Action::Quit) {
                        tracing::info!("quit requested");
                        break;
                    }

                    let result = self.store.dispatch(action);
                    for effect in result.effects {
                        handle_effect(effect, &mut self.tasks);
                    }
                    self.should_render |= result.changed;
                }

                else => break,
            }
        }

        cancel_token.cancel();
        self.subscriptions.cancel_all();
        self.tasks.cancel_all();
        tracing::info!(
            dispatched = self.store.middleware().dispatched(),
            "runtime stopped"
        );
        Ok(())
    }
}
