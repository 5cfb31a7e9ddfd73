//! Booking submitter
//!
//! [`BookingFlow`] ties the seat grid, the screening chooser and the
//! selection controller together for one movie and drives the submission
//! lifecycle:
//!
//! ```text
//! Idle -> DateChosen -> TimeChosen <-> ReadyToSubmit <-> Submitting
//!                                                          | success -> Idle
//!                                                          | failure -> ReadyToSubmit
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::UserIdentity;
use crate::error::ValidationError;
use crate::screening::{MovieId, ScreeningChooser, ScreeningKey, SeatsTicket, Showtime};
use crate::seat::{self, BookedSeats, SeatGrid, SeatId, SeatStatus};
use crate::selection::SelectionController;

/// Price of one seat, in whole currency units
pub const TICKET_PRICE: u32 = 12;

/// Body of `POST /bookings`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BookingRequest {
    pub movie_id: MovieId,
    pub seats: Vec<SeatId>,
    pub screening_date: NaiveDate,
    pub screening_time: Showtime,
    pub user_email: String,
}

/// Successful booking response
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BookingConfirmation {
    pub booking_id: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BookingPhase {
    Idle,
    DateChosen,
    TimeChosen,
    ReadyToSubmit,
    Submitting,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingFlow {
    grid: SeatGrid,
    chooser: ScreeningChooser,
    selection: SelectionController,
    submitting: bool,
}

impl BookingFlow {
    pub fn new(movie_id: MovieId, grid: SeatGrid, today: NaiveDate) -> Self {
        Self {
            grid,
            chooser: ScreeningChooser::new(movie_id, today),
            selection: SelectionController::new(),
            submitting: false,
        }
    }

    pub fn movie_id(&self) -> MovieId {
        self.chooser.movie_id()
    }

    pub fn grid(&self) -> &SeatGrid {
        &self.grid
    }

    pub fn screening(&self) -> &ScreeningChooser {
        &self.chooser
    }

    pub fn selected(&self) -> &[SeatId] {
        self.selection.seats()
    }

    pub fn booked(&self) -> &BookedSeats {
        self.chooser.booked()
    }

    pub fn status(&self, seat: &SeatId) -> SeatStatus {
        seat::status(seat, self.selection.seats(), self.chooser.booked())
    }

    /// Total for the current selection
    pub fn price(&self) -> u32 {
        self.selection.len() as u32 * TICKET_PRICE
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn phase(&self) -> BookingPhase {
        if self.submitting {
            return BookingPhase::Submitting;
        }
        match (self.chooser.date(), self.chooser.time()) {
            (None, _) => BookingPhase::Idle,
            (Some(_), None) => BookingPhase::DateChosen,
            (Some(_), Some(_)) if self.selection.is_empty() => BookingPhase::TimeChosen,
            (Some(_), Some(_)) => BookingPhase::ReadyToSubmit,
        }
    }

    /// Choose a screening date. Clears time, booked seats and selection.
    ///
    /// Returns `Ok(false)` if nothing changed.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<bool, ValidationError> {
        if self.submitting {
            return Ok(false);
        }
        let changed = self.chooser.select_date(date)?;
        if changed {
            self.selection.clear();
        }
        Ok(changed)
    }

    /// Choose a showtime. Returns the booked-seats fetch to perform, or
    /// `Ok(None)` while a submission is in flight.
    pub fn select_time(&mut self, time: Showtime) -> Result<Option<SeatsTicket>, ValidationError> {
        if self.submitting {
            return Ok(None);
        }
        let previous = self.chooser.key();
        let ticket = self.chooser.select_time(time)?;
        if previous != Some(ticket.key) {
            self.selection.clear();
        }
        Ok(Some(ticket))
    }

    /// Apply a booked-seats result. Seats that turned out to be booked are
    /// dropped from the selection.
    pub fn apply_booked_seats(&mut self, ticket: &SeatsTicket, booked: BookedSeats) -> bool {
        if !self.chooser.apply_booked_seats(ticket, booked) {
            return false;
        }
        let dropped = self.selection.purge(self.chooser.booked());
        if dropped > 0 {
            tracing::info!(dropped, "removed seats booked by someone else from selection");
        }
        true
    }

    pub fn booked_seats_failed(&mut self, ticket: &SeatsTicket, error: &str) -> bool {
        self.chooser.booked_seats_failed(ticket, error)
    }

    /// Toggle a seat. Returns the new selection, or `None` if the seat is
    /// booked, outside the grid, no time is chosen yet, or a submission is
    /// in flight.
    pub fn toggle_seat(&mut self, seat: SeatId) -> Option<&[SeatId]> {
        if self.submitting || self.chooser.time().is_none() || !self.grid.contains(&seat) {
            return None;
        }
        self.selection.toggle(seat, self.chooser.booked())
    }

    pub fn clear_selection(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.selection.clear().is_some()
    }

    /// Validate and build the booking request, entering `Submitting`.
    pub fn submit(&mut self, user: &UserIdentity) -> Result<BookingRequest, ValidationError> {
        if self.submitting {
            return Err(ValidationError::AlreadySubmitting);
        }
        let date = self.chooser.date().ok_or(ValidationError::MissingDate)?;
        let time = self.chooser.time().ok_or(ValidationError::MissingTime)?;
        if self.selection.is_empty() {
            return Err(ValidationError::NoSeats);
        }

        self.submitting = true;
        Ok(BookingRequest {
            movie_id: self.chooser.movie_id(),
            seats: self.selection.seats().to_vec(),
            screening_date: date,
            screening_time: time,
            user_email: user.email().to_string(),
        })
    }

    /// The booking went through: back to the initial state.
    pub fn submission_succeeded(&mut self, confirmation: &BookingConfirmation) {
        tracing::info!(booking_id = %confirmation.booking_id, "booking confirmed");
        self.submitting = false;
        self.selection.clear();
        self.chooser.reset();
    }

    /// The booking failed: keep everything so the user can retry.
    pub fn submission_failed(&mut self) {
        self.submitting = false;
    }

    pub fn screening_key(&self) -> Option<ScreeningKey> {
        self.chooser.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn id(s: &str) -> SeatId {
        s.parse().unwrap()
    }

    fn flow() -> BookingFlow {
        BookingFlow::new(550, SeatGrid::default(), today())
    }

    fn ready_flow() -> (BookingFlow, SeatsTicket) {
        let mut flow = flow();
        flow.select_date(today()).unwrap();
        let ticket = flow.select_time(Showtime::Evening).unwrap().unwrap();
        flow.apply_booked_seats(&ticket, BookedSeats::from_wire(["A1", "A2"]));
        (flow, ticket)
    }

    #[test]
    fn test_phase_progression() {
        let mut flow = flow();
        assert_eq!(flow.phase(), BookingPhase::Idle);

        flow.select_date(today()).unwrap();
        assert_eq!(flow.phase(), BookingPhase::DateChosen);

        flow.select_time(Showtime::Morning).unwrap();
        assert_eq!(flow.phase(), BookingPhase::TimeChosen);

        flow.toggle_seat(id("B5"));
        assert_eq!(flow.phase(), BookingPhase::ReadyToSubmit);

        flow.toggle_seat(id("B5"));
        assert_eq!(flow.phase(), BookingPhase::TimeChosen);
    }

    #[test]
    fn test_price_follows_selection() {
        let (mut flow, _) = ready_flow();
        assert_eq!(flow.price(), 0);
        for (n, s) in ["B1", "B2", "B3", "B4"].into_iter().enumerate() {
            flow.toggle_seat(id(s));
            assert_eq!(flow.price(), TICKET_PRICE * (n as u32 + 1));
        }
    }

    #[test]
    fn test_toggle_before_time_is_ignored() {
        let mut flow = flow();
        flow.select_date(today()).unwrap();
        assert!(flow.toggle_seat(id("B5")).is_none());
        assert!(flow.selected().is_empty());
    }

    #[test]
    fn test_toggle_outside_grid_is_ignored() {
        let (mut flow, _) = ready_flow();
        assert!(flow.toggle_seat(id("Z1")).is_none());
        assert!(flow.toggle_seat(id("A13")).is_none());
    }

    #[test]
    fn test_time_change_clears_selection() {
        let (mut flow, _) = ready_flow();
        flow.toggle_seat(id("B5"));

        flow.select_time(Showtime::Late).unwrap();
        assert!(flow.selected().is_empty());
        assert!(flow.booked().is_empty());
    }

    #[test]
    fn test_time_refresh_keeps_selection() {
        let (mut flow, _) = ready_flow();
        flow.toggle_seat(id("B5"));

        flow.select_time(Showtime::Evening).unwrap();
        assert_eq!(flow.selected(), &[id("B5")]);
    }

    #[test]
    fn test_refresh_purges_newly_booked_from_selection() {
        let (mut flow, _) = ready_flow();
        flow.toggle_seat(id("B5"));
        flow.toggle_seat(id("C1"));

        let refresh = flow.select_time(Showtime::Evening).unwrap().unwrap();
        flow.apply_booked_seats(&refresh, BookedSeats::from_wire(["A1", "A2", "C1"]));

        assert_eq!(flow.selected(), &[id("B5")]);
        assert_eq!(flow.status(&id("C1")), SeatStatus::Booked);
    }

    #[test]
    fn test_submit_validation_order() {
        let user = UserIdentity::anonymous();
        let mut flow = flow();
        assert_eq!(flow.submit(&user), Err(ValidationError::MissingDate));

        flow.select_date(today()).unwrap();
        assert_eq!(flow.submit(&user), Err(ValidationError::MissingTime));

        flow.select_time(Showtime::Morning).unwrap();
        assert_eq!(flow.submit(&user), Err(ValidationError::NoSeats));
        assert!(!flow.is_submitting());
    }

    #[test]
    fn test_submit_builds_request_in_click_order() {
        let user = UserIdentity::new("ann@example.com");
        let (mut flow, _) = ready_flow();
        flow.toggle_seat(id("C1"));
        flow.toggle_seat(id("B5"));

        let request = flow.submit(&user).unwrap();
        assert_eq!(
            request,
            BookingRequest {
                movie_id: 550,
                seats: vec![id("C1"), id("B5")],
                screening_date: today(),
                screening_time: Showtime::Evening,
                user_email: "ann@example.com".into(),
            }
        );
        assert_eq!(flow.phase(), BookingPhase::Submitting);
        assert_eq!(flow.submit(&user), Err(ValidationError::AlreadySubmitting));
    }

    #[test]
    fn test_request_json_shape() {
        let user = UserIdentity::new("ann@example.com");
        let (mut flow, _) = ready_flow();
        flow.toggle_seat(id("B5"));
        let request = flow.submit(&user).unwrap();

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "movie_id": 550,
                "seats": ["B5"],
                "screening_date": "2026-10-19",
                "screening_time": "19:00",
                "user_email": "ann@example.com",
            })
        );
    }

    #[test]
    fn test_changes_ignored_while_submitting() {
        let (mut flow, _) = ready_flow();
        flow.toggle_seat(id("B5"));
        flow.submit(&UserIdentity::anonymous()).unwrap();

        let tomorrow = today().checked_add_days(Days::new(1)).unwrap();
        assert_eq!(flow.select_date(tomorrow), Ok(false));
        assert_eq!(flow.select_time(Showtime::Late), Ok(None));
        assert!(flow.toggle_seat(id("D4")).is_none());
        assert!(!flow.clear_selection());
        assert_eq!(flow.selected(), &[id("B5")]);
    }

    #[test]
    fn test_success_resets_to_idle() {
        let (mut flow, _) = ready_flow();
        flow.toggle_seat(id("B5"));
        flow.submit(&UserIdentity::anonymous()).unwrap();

        flow.submission_succeeded(&BookingConfirmation {
            booking_id: "BK123".into(),
            status: Some("confirmed".into()),
        });

        assert_eq!(flow.phase(), BookingPhase::Idle);
        assert!(flow.selected().is_empty());
        assert!(flow.screening().date().is_none());
        assert!(flow.screening().time().is_none());
        assert!(flow.booked().is_empty());
    }

    #[test]
    fn test_failure_keeps_selection() {
        let (mut flow, _) = ready_flow();
        flow.toggle_seat(id("B5"));
        flow.toggle_seat(id("C1"));
        flow.submit(&UserIdentity::anonymous()).unwrap();

        flow.submission_failed();

        assert_eq!(flow.phase(), BookingPhase::ReadyToSubmit);
        assert_eq!(flow.selected(), &[id("B5"), id("C1")]);
        assert_eq!(flow.screening().date(), Some(today()));
        assert_eq!(flow.screening().time(), Some(Showtime::Evening));
    }
}
