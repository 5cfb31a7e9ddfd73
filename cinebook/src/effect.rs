//! Effects - side effects declared by the reducer
//!
//! The reducer stays pure and returns these in a `DispatchResult`; the
//! runtime hands them to the effect handler in `main`, which spawns the API
//! calls.

use cinebook_core::{BookingRequest, MovieId, SeatsTicket};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchMovies,
    FetchMovie { id: MovieId },
    /// Booked seats for the screening named by the ticket
    FetchBookedSeats(SeatsTicket),
    SubmitBooking(BookingRequest),
}
