//! Reducer - (state, action) -> DispatchResult<Effect>
//!
//! All state mutations happen here. Booking rules live in
//! `cinebook_core::BookingFlow`; this module only routes actions to it and
//! keeps the UI bookkeeping (cursors, focus, notices) in step.

use cinebook_core::Showtime;
use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, BookingFocus, Notice, Screen, SeatCursor};

const SEATS_STALE: &str = "Could not load booked seats; availability may be out of date";

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Now playing =====
        Action::MoviesFetch => {
            state.movies_loading = true;
            state.movies_error = None;
            DispatchResult::changed_with(Effect::FetchMovies)
        }

        Action::MoviesDidLoad(movies) => {
            state.movies = movies;
            state.movies_loading = false;
            state.movies_error = None;
            state.movie_cursor = state
                .movie_cursor
                .min(state.movies.len().saturating_sub(1));
            DispatchResult::changed()
        }

        Action::MoviesDidError(error) => {
            state.movies_loading = false;
            state.movies_error = Some(error);
            DispatchResult::changed()
        }

        Action::MoviesHighlight(index) => {
            let changed = index < state.movies.len() && index != state.movie_cursor;
            if changed {
                state.movie_cursor = index;
            }
            changed_if(changed)
        }

        // ===== Movie detail =====
        Action::MovieOpen(id) => {
            state.screen = Screen::MovieDetail;
            state.open_movie = Some(id);
            state.detail = None;
            state.detail_loading = true;
            state.detail_error = None;
            state.booking = None;
            reset_booking_ui(state);
            DispatchResult::changed_with(Effect::FetchMovie { id })
        }

        Action::MovieDidLoad(details) => {
            if state.open_movie != Some(details.id) {
                tracing::debug!(id = details.id, "ignoring details for a closed movie");
                return DispatchResult::unchanged();
            }
            state.booking = Some(cinebook_core::BookingFlow::new(
                details.id,
                state.grid,
                state.today,
            ));
            state.detail = Some(details);
            state.detail_loading = false;
            DispatchResult::changed()
        }

        Action::MovieDidError(error) => {
            if state.open_movie.is_none() {
                return DispatchResult::unchanged();
            }
            state.detail_loading = false;
            state.detail_error = Some(error);
            DispatchResult::changed()
        }

        Action::MovieClose => {
            if state.screen != Screen::MovieDetail {
                return DispatchResult::unchanged();
            }
            // A confirmation arriving for a closed page would be lost.
            if state.booking.as_ref().is_some_and(|b| b.is_submitting()) {
                return DispatchResult::unchanged();
            }
            state.screen = Screen::MovieList;
            state.open_movie = None;
            state.detail = None;
            state.detail_loading = false;
            state.detail_error = None;
            state.booking = None;
            reset_booking_ui(state);
            DispatchResult::changed()
        }

        // ===== Screening =====
        Action::ScreeningDateHighlight(index) => {
            let Some(booking) = &state.booking else {
                return DispatchResult::unchanged();
            };
            let changed = index < booking.screening().dates().len() && index != state.date_cursor;
            if changed {
                state.date_cursor = index;
            }
            changed_if(changed)
        }

        Action::ScreeningDateSelect(date) => {
            let Some(booking) = state.booking.as_mut() else {
                return DispatchResult::unchanged();
            };
            match booking.select_date(date) {
                Ok(true) => {
                    if let Some(index) = booking.screening().dates().iter().position(|d| *d == date)
                    {
                        state.date_cursor = index;
                    }
                    state.focus = BookingFocus::Times;
                    state.seat_cursor = SeatCursor::default();
                    state.seats_warning = None;
                    state.notice = None;
                    DispatchResult::changed()
                }
                Ok(false) => DispatchResult::unchanged(),
                Err(e) => {
                    state.notice = Some(Notice::warning(e.to_string()));
                    DispatchResult::changed()
                }
            }
        }

        Action::ScreeningTimeHighlight(index) => {
            let changed = index < Showtime::ALL.len() && index != state.time_cursor;
            if changed {
                state.time_cursor = index;
            }
            changed_if(changed)
        }

        Action::ScreeningTimeSelect(time) => {
            let Some(booking) = state.booking.as_mut() else {
                return DispatchResult::unchanged();
            };
            match booking.select_time(time) {
                Ok(Some(ticket)) => {
                    if let Some(index) = Showtime::ALL.iter().position(|t| *t == time) {
                        state.time_cursor = index;
                    }
                    state.focus = BookingFocus::Seats;
                    state.seats_warning = None;
                    state.notice = None;
                    DispatchResult::changed_with(Effect::FetchBookedSeats(ticket))
                }
                Ok(None) => DispatchResult::unchanged(),
                Err(e) => {
                    state.notice = Some(Notice::warning(e.to_string()));
                    DispatchResult::changed()
                }
            }
        }

        Action::SeatsDidLoad { ticket, seats } => {
            let Some(booking) = state.booking.as_mut() else {
                return DispatchResult::unchanged();
            };
            let applied = booking.apply_booked_seats(&ticket, seats);
            if applied {
                state.seats_warning = None;
            }
            changed_if(applied)
        }

        Action::SeatsDidError { ticket, error } => {
            let Some(booking) = state.booking.as_mut() else {
                return DispatchResult::unchanged();
            };
            let applied = booking.booked_seats_failed(&ticket, &error);
            if applied {
                state.seats_warning = Some(SEATS_STALE.to_string());
            }
            changed_if(applied)
        }

        // ===== Seats =====
        Action::SeatHighlight(cursor) => {
            let changed = cursor.row < state.grid.rows()
                && cursor.col < state.grid.seats_per_row()
                && cursor != state.seat_cursor;
            if changed {
                state.seat_cursor = cursor;
            }
            changed_if(changed)
        }

        Action::SeatToggle(seat) => {
            let Some(booking) = state.booking.as_mut() else {
                return DispatchResult::unchanged();
            };
            if booking.screening().time().is_none() && !booking.is_submitting() {
                state.notice = Some(Notice::warning("Please select a showtime first"));
                return DispatchResult::changed();
            }
            match booking.toggle_seat(seat) {
                Some(selection) => {
                    tracing::debug!(seat = %seat, selected = selection.len(), "selection changed");
                    state.notice = None;
                    DispatchResult::changed()
                }
                None => DispatchResult::unchanged(),
            }
        }

        Action::SelectionClear => {
            let Some(booking) = state.booking.as_mut() else {
                return DispatchResult::unchanged();
            };
            changed_if(booking.clear_selection())
        }

        // ===== Booking =====
        Action::BookingSubmit => {
            let Some(booking) = state.booking.as_mut() else {
                return DispatchResult::unchanged();
            };
            match booking.submit(&state.user) {
                Ok(request) => {
                    tracing::info!(
                        movie_id = request.movie_id,
                        seats = request.seats.len(),
                        "submitting booking"
                    );
                    state.notice = None;
                    DispatchResult::changed_with(Effect::SubmitBooking(request))
                }
                Err(e) => {
                    state.notice = Some(Notice::warning(e.to_string()));
                    DispatchResult::changed()
                }
            }
        }

        Action::BookingDidConfirm(confirmation) => {
            let Some(booking) = state.booking.as_mut() else {
                tracing::warn!(booking_id = %confirmation.booking_id, "confirmation with no open booking");
                return DispatchResult::unchanged();
            };
            booking.submission_succeeded(&confirmation);
            reset_booking_ui(state);
            state.notice = Some(Notice::info(format!(
                "Booking confirmed! Booking ID: {}",
                confirmation.booking_id
            )));
            DispatchResult::changed()
        }

        Action::BookingDidFail(error) => {
            let Some(booking) = state.booking.as_mut() else {
                return DispatchResult::unchanged();
            };
            booking.submission_failed();
            state.notice = Some(Notice::error(format!(
                "Failed to book seats: {error}. Please try again."
            )));
            DispatchResult::changed()
        }

        // ===== UI =====
        Action::FocusNext => {
            if state.booking.is_none() {
                return DispatchResult::unchanged();
            }
            state.focus = state.focus.next();
            DispatchResult::changed()
        }

        Action::FocusPrev => {
            if state.booking.is_none() {
                return DispatchResult::unchanged();
            }
            state.focus = state.focus.prev();
            DispatchResult::changed()
        }

        Action::NoticeDismiss => changed_if(state.notice.take().is_some()),

        Action::UiTerminalResize(width, height) => {
            let changed = state.terminal_size != (width, height);
            state.terminal_size = (width, height);
            changed_if(changed)
        }

        // ===== Global =====
        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            changed_if(state.is_busy())
        }

        // Handled by the runtime loop
        Action::Quit => DispatchResult::unchanged(),
    }
}

fn changed_if(changed: bool) -> DispatchResult<Effect> {
    if changed {
        DispatchResult::changed()
    } else {
        DispatchResult::unchanged()
    }
}

fn reset_booking_ui(state: &mut AppState) {
    state.focus = BookingFocus::default();
    state.date_cursor = 0;
    state.time_cursor = 0;
    state.seat_cursor = SeatCursor::default();
    state.seats_warning = None;
    state.notice = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::NoticeKind;
    use chrono::{Days, NaiveDate};
    use cinebook_core::{
        BookedSeats, BookingConfirmation, BookingPhase, MovieDetails, SeatId, SeatsTicket,
    };

    fn details(id: u64) -> MovieDetails {
        MovieDetails {
            id,
            title: "Fight Club".into(),
            overview: "Mischief.".into(),
            poster_path: None,
            release_date: "1999-10-15".into(),
            vote_average: 8.4,
            runtime: Some(139),
            original_language: "en".into(),
        }
    }

    fn seat(s: &str) -> SeatId {
        s.parse().unwrap()
    }

    fn ticket_of(result: &DispatchResult<Effect>) -> SeatsTicket {
        match result.effects.as_slice() {
            [Effect::FetchBookedSeats(ticket)] => *ticket,
            other => panic!("expected booked-seats fetch, got {other:?}"),
        }
    }

    /// Detail page open for movie 550 with its booking flow ready
    fn opened() -> AppState {
        let mut state = AppState::default();
        reducer(&mut state, Action::MovieOpen(550));
        reducer(&mut state, Action::MovieDidLoad(details(550)));
        state
    }

    fn tomorrow(state: &AppState) -> NaiveDate {
        state.today.checked_add_days(Days::new(1)).unwrap()
    }

    /// Date and time chosen, booked seats loaded
    fn screening_ready(booked: &[&str]) -> AppState {
        let mut state = opened();
        let date = tomorrow(&state);
        reducer(&mut state, Action::ScreeningDateSelect(date));
        let result = reducer(&mut state, Action::ScreeningTimeSelect(Showtime::Evening));
        let ticket = ticket_of(&result);
        reducer(
            &mut state,
            Action::SeatsDidLoad {
                ticket,
                seats: BookedSeats::from_wire(booked),
            },
        );
        state
    }

    #[test]
    fn test_movies_fetch_sets_loading() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::MoviesFetch);

        assert!(result.changed);
        assert!(state.movies_loading);
        assert_eq!(result.effects, vec![Effect::FetchMovies]);
    }

    #[test]
    fn test_movies_error_clears_loading() {
        let mut state = AppState::default();
        state.movies_loading = true;

        let result = reducer(&mut state, Action::MoviesDidError("offline".into()));

        assert!(result.changed);
        assert!(!state.movies_loading);
        assert_eq!(state.movies_error.as_deref(), Some("offline"));
    }

    #[test]
    fn test_movie_open_fetches_details() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::MovieOpen(550));

        assert_eq!(state.screen, Screen::MovieDetail);
        assert!(state.detail_loading);
        assert!(state.booking.is_none());
        assert_eq!(result.effects, vec![Effect::FetchMovie { id: 550 }]);
    }

    #[test]
    fn test_details_for_other_movie_are_ignored() {
        let mut state = AppState::default();
        reducer(&mut state, Action::MovieOpen(550));

        let result = reducer(&mut state, Action::MovieDidLoad(details(13)));

        assert!(!result.changed);
        assert!(state.detail.is_none());
        assert!(state.booking.is_none());
    }

    #[test]
    fn test_movie_loaded_starts_idle_booking() {
        let state = opened();

        let booking = state.booking.as_ref().unwrap();
        assert_eq!(booking.phase(), BookingPhase::Idle);
        assert_eq!(booking.movie_id(), 550);
        assert!(!state.detail_loading);
    }

    #[test]
    fn test_date_select_moves_focus_to_times() {
        let mut state = opened();
        let date = tomorrow(&state);

        let result = reducer(&mut state, Action::ScreeningDateSelect(date));

        assert!(result.changed);
        assert!(!result.has_effects());
        assert_eq!(state.focus, BookingFocus::Times);
        assert_eq!(state.date_cursor, 1);
    }

    #[test]
    fn test_date_outside_window_warns() {
        let mut state = opened();
        let far = state.today.checked_add_days(Days::new(30)).unwrap();

        let result = reducer(&mut state, Action::ScreeningDateSelect(far));

        assert!(result.changed);
        let notice = state.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Warning);
    }

    #[test]
    fn test_time_before_date_warns_without_fetch() {
        let mut state = opened();

        let result = reducer(&mut state, Action::ScreeningTimeSelect(Showtime::Morning));

        assert!(!result.has_effects());
        assert_eq!(state.notice.unwrap().text, "Please select a screening date");
    }

    #[test]
    fn test_time_select_fetches_booked_seats() {
        let mut state = opened();
        let date = tomorrow(&state);
        reducer(&mut state, Action::ScreeningDateSelect(date));

        let result = reducer(&mut state, Action::ScreeningTimeSelect(Showtime::Evening));

        let ticket = ticket_of(&result);
        assert_eq!(ticket.key.movie_id, 550);
        assert_eq!(ticket.key.date, date);
        assert_eq!(ticket.key.time, Showtime::Evening);
        assert_eq!(state.focus, BookingFocus::Seats);
        assert!(state.is_busy());
    }

    #[test]
    fn test_stale_seats_result_is_dropped() {
        let mut state = opened();
        let date = tomorrow(&state);
        reducer(&mut state, Action::ScreeningDateSelect(date));
        let first = ticket_of(&reducer(
            &mut state,
            Action::ScreeningTimeSelect(Showtime::Morning),
        ));
        let second = ticket_of(&reducer(
            &mut state,
            Action::ScreeningTimeSelect(Showtime::Late),
        ));

        let stale = reducer(
            &mut state,
            Action::SeatsDidLoad {
                ticket: first,
                seats: BookedSeats::from_wire(["A1"]),
            },
        );
        assert!(!stale.changed);

        let fresh = reducer(
            &mut state,
            Action::SeatsDidLoad {
                ticket: second,
                seats: BookedSeats::from_wire(["B2"]),
            },
        );
        assert!(fresh.changed);
        let booked = state.booking.as_ref().unwrap().booked();
        assert!(booked.contains(&seat("B2")));
        assert!(!booked.contains(&seat("A1")));
    }

    #[test]
    fn test_seats_error_sets_warning() {
        let mut state = opened();
        let date = tomorrow(&state);
        reducer(&mut state, Action::ScreeningDateSelect(date));
        let ticket = ticket_of(&reducer(
            &mut state,
            Action::ScreeningTimeSelect(Showtime::Midday),
        ));

        let result = reducer(
            &mut state,
            Action::SeatsDidError {
                ticket,
                error: "connection refused".into(),
            },
        );

        assert!(result.changed);
        assert_eq!(state.seats_warning.as_deref(), Some(SEATS_STALE));
        assert!(state.booking.as_ref().unwrap().booked().is_empty());
    }

    #[test]
    fn test_toggle_before_showtime_warns() {
        let mut state = opened();

        reducer(&mut state, Action::SeatToggle(seat("A1")));

        assert!(state.booking.as_ref().unwrap().selected().is_empty());
        assert_eq!(state.notice.unwrap().kind, NoticeKind::Warning);
    }

    #[test]
    fn test_toggle_booked_seat_is_noop() {
        let mut state = screening_ready(&["A1"]);

        let result = reducer(&mut state, Action::SeatToggle(seat("A1")));

        assert!(!result.changed);
        assert!(state.booking.as_ref().unwrap().selected().is_empty());
    }

    #[test]
    fn test_toggle_selects_then_deselects() {
        let mut state = screening_ready(&[]);

        reducer(&mut state, Action::SeatToggle(seat("C7")));
        reducer(&mut state, Action::SeatToggle(seat("A2")));
        assert_eq!(
            state.booking.as_ref().unwrap().selected(),
            &[seat("C7"), seat("A2")]
        );
        assert_eq!(state.booking.as_ref().unwrap().price(), 24);

        reducer(&mut state, Action::SeatToggle(seat("C7")));
        assert_eq!(state.booking.as_ref().unwrap().selected(), &[seat("A2")]);
    }

    #[test]
    fn test_clear_selection() {
        let mut state = screening_ready(&[]);
        reducer(&mut state, Action::SeatToggle(seat("B1")));

        assert!(reducer(&mut state, Action::SelectionClear).changed);
        assert!(!reducer(&mut state, Action::SelectionClear).changed);
    }

    #[test]
    fn test_submit_without_seats_warns() {
        let mut state = screening_ready(&[]);

        let result = reducer(&mut state, Action::BookingSubmit);

        assert!(!result.has_effects());
        assert_eq!(
            state.notice.unwrap().text,
            "Please select at least one seat"
        );
    }

    #[test]
    fn test_submit_emits_request() {
        let mut state = screening_ready(&["A1"]);
        reducer(&mut state, Action::SeatToggle(seat("B5")));

        let result = reducer(&mut state, Action::BookingSubmit);

        match result.effects.as_slice() {
            [Effect::SubmitBooking(request)] => {
                assert_eq!(request.movie_id, 550);
                assert_eq!(request.seats, vec![seat("B5")]);
                assert_eq!(request.screening_time, Showtime::Evening);
                assert_eq!(request.user_email, "user@example.com");
            }
            other => panic!("expected submission, got {other:?}"),
        }
        assert_eq!(
            state.booking.as_ref().unwrap().phase(),
            BookingPhase::Submitting
        );
    }

    #[test]
    fn test_second_submit_while_in_flight_is_rejected() {
        let mut state = screening_ready(&[]);
        reducer(&mut state, Action::SeatToggle(seat("B5")));
        reducer(&mut state, Action::BookingSubmit);

        let result = reducer(&mut state, Action::BookingSubmit);

        assert!(!result.has_effects());
    }

    #[test]
    fn test_cannot_leave_page_while_submitting() {
        let mut state = screening_ready(&[]);
        reducer(&mut state, Action::SeatToggle(seat("B5")));
        reducer(&mut state, Action::BookingSubmit);

        let result = reducer(&mut state, Action::MovieClose);

        assert!(!result.changed);
        assert_eq!(state.screen, Screen::MovieDetail);
    }

    #[test]
    fn test_confirmation_resets_flow() {
        let mut state = screening_ready(&[]);
        reducer(&mut state, Action::SeatToggle(seat("B5")));
        reducer(&mut state, Action::BookingSubmit);

        let result = reducer(
            &mut state,
            Action::BookingDidConfirm(BookingConfirmation {
                booking_id: "BK123".into(),
                status: Some("confirmed".into()),
            }),
        );

        assert!(result.changed);
        let booking = state.booking.as_ref().unwrap();
        assert_eq!(booking.phase(), BookingPhase::Idle);
        assert!(booking.selected().is_empty());
        assert_eq!(state.focus, BookingFocus::Dates);
        let notice = state.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Info);
        assert_eq!(notice.text, "Booking confirmed! Booking ID: BK123");
    }

    #[test]
    fn test_failure_keeps_selection_for_retry() {
        let mut state = screening_ready(&[]);
        reducer(&mut state, Action::SeatToggle(seat("B5")));
        reducer(&mut state, Action::BookingSubmit);

        reducer(
            &mut state,
            Action::BookingDidFail("Seat B5 is already booked".into()),
        );

        let booking = state.booking.as_ref().unwrap();
        assert_eq!(booking.phase(), BookingPhase::ReadyToSubmit);
        assert_eq!(booking.selected(), &[seat("B5")]);
        assert_eq!(
            state.notice.unwrap().text,
            "Failed to book seats: Seat B5 is already booked. Please try again."
        );
    }

    #[test]
    fn test_seat_highlight_stays_in_grid() {
        let mut state = opened();

        assert!(reducer(&mut state, Action::SeatHighlight(SeatCursor { row: 7, col: 11 })).changed);
        assert!(!reducer(&mut state, Action::SeatHighlight(SeatCursor { row: 8, col: 0 })).changed);
        assert_eq!(state.cursor_seat(), Some(seat("H12")));
    }

    #[test]
    fn test_close_returns_to_list() {
        let mut state = screening_ready(&[]);

        let result = reducer(&mut state, Action::MovieClose);

        assert!(result.changed);
        assert_eq!(state.screen, Screen::MovieList);
        assert!(state.booking.is_none());
        assert!(state.open_movie.is_none());
    }

    #[test]
    fn test_tick_only_rerenders_when_busy() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::Tick).changed);

        state.movies_loading = true;
        assert!(reducer(&mut state, Action::Tick).changed);
    }

    #[test]
    fn test_terminal_resize() {
        let mut state = AppState::default();

        assert!(reducer(&mut state, Action::UiTerminalResize(100, 40)).changed);
        assert!(!reducer(&mut state, Action::UiTerminalResize(100, 40)).changed);
    }
}
