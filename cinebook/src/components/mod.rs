//! Screen components
//!
//! `handle_event` returns the concrete `Action` rather than the trait's
//! opaque type, so parents can forward what their children emit. The
//! `where 'p: 'p` makes the props lifetime early-bound, which the trait's
//! `impl Action` return requires for the signatures to match.
#![allow(refining_impl_trait)]

pub mod booking_panel;
pub mod help_bar;
pub mod movie_detail;
pub mod movie_list;
pub mod screening_bar;
pub mod seat_map;

pub use tui_dispatch::Component;

pub use booking_panel::{BookingPanel, BookingPanelProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use movie_detail::{MovieDetailView, MovieDetailViewProps};
pub use movie_list::{MovieList, MovieListProps};
pub use screening_bar::{ScreeningBar, ScreeningBarProps};
pub use seat_map::{BOOKED_GLYPH, SELECTED_GLYPH, SeatMap, SeatMapProps};

pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// A key press as the event poller delivers it, e.g. `press("shift+tab")`
#[cfg(test)]
pub(crate) fn press(key: &str) -> tui_dispatch::EventKind {
    tui_dispatch::EventKind::Key(tui_dispatch::testing::key(key))
}
