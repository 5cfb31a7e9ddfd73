//! Actions
//!
//! Naming convention: the prefix is the category (`Movies`, `Movie`,
//! `Screening`, `Seat`, `Booking`, ...), a `Did` infix marks the result of
//! an async task, and the verb comes last.

use chrono::NaiveDate;
use cinebook_core::{
    BookedSeats, BookingConfirmation, MovieDetails, MovieId, MovieSummary, SeatId, SeatsTicket,
    Showtime,
};

use tui_dispatch::Action as _;

use crate::state::SeatCursor;

/// Application actions
///
/// Categories are inferred from the prefix where the verb is one the derive
/// knows (`MovieOpen`, `BookingSubmit`); the rest name theirs explicitly.
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq)]
#[action(infer_categories)]
pub enum Action {
    // ===== Now playing =====
    /// Intent: load the now-playing list
    #[action(category = "movies")]
    MoviesFetch,
    #[action(category = "movies")]
    MoviesDidLoad(Vec<MovieSummary>),
    #[action(category = "movies")]
    MoviesDidError(String),
    /// Move the list highlight
    #[action(category = "movies")]
    MoviesHighlight(usize),

    // ===== Movie detail =====
    /// Intent: open the detail page (triggers async fetch)
    MovieOpen(MovieId),
    #[action(category = "movie")]
    MovieDidLoad(MovieDetails),
    #[action(category = "movie")]
    MovieDidError(String),
    /// Back to the list
    MovieClose,

    // ===== Screening =====
    #[action(category = "screening")]
    ScreeningDateHighlight(usize),
    #[action(category = "screening")]
    ScreeningDateSelect(NaiveDate),
    #[action(category = "screening")]
    ScreeningTimeHighlight(usize),
    /// Intent: choose a showtime (triggers booked-seats fetch)
    #[action(category = "screening")]
    ScreeningTimeSelect(Showtime),
    #[action(category = "seats")]
    SeatsDidLoad {
        ticket: SeatsTicket,
        seats: BookedSeats,
    },
    #[action(category = "seats")]
    SeatsDidError {
        ticket: SeatsTicket,
        error: String,
    },

    // ===== Seats =====
    #[action(category = "seats")]
    SeatHighlight(SeatCursor),
    #[action(category = "seats")]
    SeatToggle(SeatId),
    #[action(category = "seats")]
    SelectionClear,

    // ===== Booking =====
    /// Intent: submit the booking (triggers POST)
    BookingSubmit,
    #[action(category = "booking")]
    BookingDidConfirm(BookingConfirmation),
    #[action(category = "booking")]
    BookingDidFail(String),

    // ===== UI =====
    #[action(category = "ui")]
    FocusNext,
    #[action(category = "ui")]
    FocusPrev,
    #[action(category = "ui")]
    NoticeDismiss,
    #[action(category = "ui")]
    UiTerminalResize(u16, u16),

    // ===== Global =====
    /// Periodic tick for spinners
    Tick,
    Quit,
}

impl Action {
    /// Concise one-line form for logging
    pub fn summary(&self) -> String {
        match self {
            Action::MoviesDidLoad(movies) => format!("MoviesDidLoad {{ count: {} }}", movies.len()),
            Action::MovieDidLoad(movie) => {
                format!("MovieDidLoad {{ id: {}, title: {:?} }}", movie.id, movie.title)
            }
            Action::SeatsDidLoad { ticket, seats } => format!(
                "SeatsDidLoad {{ {}, generation: {}, booked: {} }}",
                ticket.key,
                ticket.generation,
                seats.len()
            ),
            Action::SeatsDidError { ticket, error } => format!(
                "SeatsDidError {{ {}, generation: {}, error: {:?} }}",
                ticket.key,
                ticket.generation,
                truncate(error, 40)
            ),
            Action::SeatToggle(seat) => format!("SeatToggle({seat})"),
            Action::MoviesDidError(e) | Action::MovieDidError(e) | Action::BookingDidFail(e) => {
                format!("{}({:?})", self.name(), truncate(e, 40))
            }
            _ => format!("{:?}", self),
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        format!("{}...", s.chars().take(max - 3).collect::<String>())
    } else {
        s.to_string()
    }
}
