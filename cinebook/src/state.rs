//! Application state - single source of truth
//!
//! Components receive `&AppState` through their props and never mutate it;
//! only the reducer does.

use chrono::NaiveDate;
use cinebook_core::{
    BookingFlow, MovieDetails, MovieId, MovieSummary, SeatGrid, SeatId, UserIdentity,
};

/// Spinner frame interval
pub const TICK_MS: u64 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    MovieList,
    MovieDetail,
}

/// Which row of the booking section receives arrow keys
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BookingFocus {
    #[default]
    Dates,
    Times,
    Seats,
}

impl BookingFocus {
    pub fn next(self) -> Self {
        match self {
            BookingFocus::Dates => BookingFocus::Times,
            BookingFocus::Times => BookingFocus::Seats,
            BookingFocus::Seats => BookingFocus::Dates,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            BookingFocus::Dates => BookingFocus::Seats,
            BookingFocus::Times => BookingFocus::Dates,
            BookingFocus::Seats => BookingFocus::Times,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// One-line message shown under the booking controls
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Highlighted seat as a zero-based (row, column) grid position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SeatCursor {
    pub row: u16,
    pub col: u16,
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub screen: Screen,

    // ===== Now playing =====
    pub movies: Vec<MovieSummary>,
    pub movies_loading: bool,
    pub movies_error: Option<String>,
    pub movie_cursor: usize,

    // ===== Movie detail =====
    /// Movie whose page is open (details may still be loading)
    pub open_movie: Option<MovieId>,
    pub detail: Option<MovieDetails>,
    pub detail_loading: bool,
    pub detail_error: Option<String>,

    // ===== Booking =====
    /// Workflow for the open movie (None until its details load)
    pub booking: Option<BookingFlow>,
    pub focus: BookingFocus,
    pub date_cursor: usize,
    pub time_cursor: usize,
    pub seat_cursor: SeatCursor,
    /// Set when the last booked-seats fetch failed and the map may be stale
    pub seats_warning: Option<String>,
    pub notice: Option<Notice>,

    // ===== Environment =====
    pub user: UserIdentity,
    pub today: NaiveDate,
    pub grid: SeatGrid,

    /// Animation frame counter (for loading spinners)
    pub tick_count: u32,
    pub terminal_size: (u16, u16),
}

impl AppState {
    pub fn new(user: UserIdentity, today: NaiveDate, grid: SeatGrid) -> Self {
        Self {
            screen: Screen::MovieList,
            movies: Vec::new(),
            movies_loading: false,
            movies_error: None,
            movie_cursor: 0,
            open_movie: None,
            detail: None,
            detail_loading: false,
            detail_error: None,
            booking: None,
            focus: BookingFocus::default(),
            date_cursor: 0,
            time_cursor: 0,
            seat_cursor: SeatCursor::default(),
            seats_warning: None,
            notice: None,
            user,
            today,
            grid,
            tick_count: 0,
            terminal_size: (80, 24),
        }
    }

    pub fn selected_movie(&self) -> Option<&MovieSummary> {
        self.movies.get(self.movie_cursor)
    }

    /// Seat under the grid cursor
    pub fn cursor_seat(&self) -> Option<SeatId> {
        self.grid.seat_at(self.seat_cursor.row, self.seat_cursor.col)
    }

    /// Anything in flight that should animate the spinner
    pub fn is_busy(&self) -> bool {
        self.movies_loading
            || self.detail_loading
            || self
                .booking
                .as_ref()
                .is_some_and(|b| b.is_submitting() || b.screening().is_loading())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            UserIdentity::anonymous(),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap_or_default(),
            SeatGrid::default(),
        )
    }
}
