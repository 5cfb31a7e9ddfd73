//! Terminal front end for booking cinema tickets
//!
//! The app follows the `tui-dispatch` unidirectional data flow:
//!
//! ```text
//! key press -> Component::handle_event -> Action -> EffectStore (reducer)
//!          -> Effect -> TaskManager (API call) -> Action -> ...
//! ```
//!
//! Booking rules (seat status, selection, screening choice, submission)
//! live in `cinebook_core`; this crate holds the app state, the reducer,
//! the event loop and the ratatui components.

pub mod action;
pub mod components;
pub mod effect;
pub mod logging;
pub mod reducer;
pub mod runtime;
pub mod state;
pub mod store;
pub mod ui;

pub use action::Action;
pub use effect::Effect;
pub use reducer::reducer;
pub use runtime::Runtime;
pub use state::AppState;
pub use ui::CinebookUi;
