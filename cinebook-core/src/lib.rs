//! Seat selection and booking workflow for the cinebook TUI
//!
//! # Modules
//!
//! - [`seat`]: seat identifiers, the grid layout and derived seat status
//! - [`selection`]: the ordered set of seats the user picked
//! - [`screening`]: date/showtime choice and the booked-seat set it scopes
//! - [`booking`]: [`BookingFlow`], the submission lifecycle tying it together
//! - [`api`]: async client for the cinema REST API
//! - [`config`]: API configuration and user identity
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use cinebook_core::{BookingFlow, BookedSeats, SeatGrid, SeatStatus, Showtime, UserIdentity};
//!
//! let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
//! let mut flow = BookingFlow::new(550, SeatGrid::default(), today);
//!
//! flow.select_date(today).unwrap();
//! let ticket = flow.select_time(Showtime::Evening).unwrap().unwrap();
//! // ... fetch booked seats for `ticket.key`, then:
//! flow.apply_booked_seats(&ticket, BookedSeats::from_wire(["A1", "A2"]));
//!
//! let a1 = "A1".parse().unwrap();
//! assert!(flow.toggle_seat(a1).is_none());
//! assert_eq!(flow.status(&a1), SeatStatus::Booked);
//!
//! flow.toggle_seat("B5".parse().unwrap());
//! assert_eq!(flow.price(), 12);
//!
//! let request = flow.submit(&UserIdentity::anonymous()).unwrap();
//! assert_eq!(request.seats.len(), 1);
//! ```

pub mod api;
pub mod booking;
pub mod config;
pub mod error;
pub mod screening;
pub mod seat;
pub mod selection;

pub use api::{ApiClient, MovieDetails, MovieSummary};
pub use booking::{BookingConfirmation, BookingFlow, BookingPhase, BookingRequest, TICKET_PRICE};
pub use config::{ApiConfig, UserIdentity};
pub use error::{ConfigError, FetchError, GridError, SeatIdError, SubmissionError, ValidationError};
pub use screening::{MovieId, ScreeningChooser, ScreeningKey, SeatsTicket, Showtime, available_dates};
pub use seat::{BookedSeats, SeatGrid, SeatId, SeatStatus};
pub use selection::SelectionController;
