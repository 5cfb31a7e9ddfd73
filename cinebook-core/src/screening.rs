//! Screening chooser
//!
//! Tracks the chosen date and showtime for one movie and owns the booked-seat
//! set for that screening. Every booked-seats fetch is described by a
//! [`SeatsTicket`]; results are applied only while their ticket is still the
//! pending one, so a late answer for a superseded screening is dropped.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;
use crate::seat::BookedSeats;

/// Number of bookable days, today included
pub const BOOKING_WINDOW_DAYS: u64 = 7;

pub type MovieId = u64;

/// The five daily showtimes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Showtime {
    Morning,
    Midday,
    Afternoon,
    Evening,
    Late,
}

impl Showtime {
    pub const ALL: [Showtime; 5] = [
        Showtime::Morning,
        Showtime::Midday,
        Showtime::Afternoon,
        Showtime::Evening,
        Showtime::Late,
    ];

    /// Wire and display form, e.g. "19:00"
    pub fn as_str(&self) -> &'static str {
        match self {
            Showtime::Morning => "10:00",
            Showtime::Midday => "13:00",
            Showtime::Afternoon => "16:00",
            Showtime::Evening => "19:00",
            Showtime::Late => "22:00",
        }
    }
}

impl fmt::Display for Showtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Showtime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Showtime::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown showtime {s:?}"))
    }
}

impl Serialize for Showtime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Showtime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The bookable dates: today and the following six days
pub fn available_dates(today: NaiveDate) -> Vec<NaiveDate> {
    (0..BOOKING_WINDOW_DAYS)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .collect()
}

/// One bookable show: (movie, date, time)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScreeningKey {
    pub movie_id: MovieId,
    pub date: NaiveDate,
    pub time: Showtime,
}

impl fmt::Display for ScreeningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "movie {} on {} at {}", self.movie_id, self.date, self.time)
    }
}

/// A booked-seats fetch issued for `key`. `generation` increases with every
/// ticket, so two tickets for the same key are still distinguishable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeatsTicket {
    pub key: ScreeningKey,
    pub generation: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScreeningChooser {
    movie_id: MovieId,
    dates: Vec<NaiveDate>,
    date: Option<NaiveDate>,
    time: Option<Showtime>,
    booked: BookedSeats,
    pending: Option<SeatsTicket>,
    generation: u64,
}

impl ScreeningChooser {
    pub fn new(movie_id: MovieId, today: NaiveDate) -> Self {
        Self {
            movie_id,
            dates: available_dates(today),
            date: None,
            time: None,
            booked: BookedSeats::new(),
            pending: None,
            generation: 0,
        }
    }

    pub fn movie_id(&self) -> MovieId {
        self.movie_id
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn time(&self) -> Option<Showtime> {
        self.time
    }

    pub fn booked(&self) -> &BookedSeats {
        &self.booked
    }

    /// The fetch still awaiting a result, if any
    pub fn pending(&self) -> Option<SeatsTicket> {
        self.pending
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// The current screening, once both date and time are chosen
    pub fn key(&self) -> Option<ScreeningKey> {
        Some(ScreeningKey {
            movie_id: self.movie_id,
            date: self.date?,
            time: self.time?,
        })
    }

    /// Choose a date. Clears the time and booked set.
    ///
    /// Returns `Ok(false)` when `date` was already chosen.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<bool, ValidationError> {
        if !self.dates.contains(&date) {
            return Err(ValidationError::DateUnavailable(date));
        }
        if self.date == Some(date) {
            return Ok(false);
        }
        self.date = Some(date);
        self.time = None;
        self.booked = BookedSeats::new();
        self.pending = None;
        Ok(true)
    }

    /// Choose a showtime and issue the booked-seats fetch for it.
    ///
    /// Choosing a different time empties the booked set until the fetch
    /// resolves. Re-choosing the current time only refreshes it.
    pub fn select_time(&mut self, time: Showtime) -> Result<SeatsTicket, ValidationError> {
        let date = self.date.ok_or(ValidationError::MissingDate)?;
        if self.time != Some(time) {
            self.time = Some(time);
            self.booked = BookedSeats::new();
        }
        self.generation += 1;
        let ticket = SeatsTicket {
            key: ScreeningKey {
                movie_id: self.movie_id,
                date,
                time,
            },
            generation: self.generation,
        };
        self.pending = Some(ticket);
        Ok(ticket)
    }

    fn is_current(&self, ticket: &SeatsTicket) -> bool {
        self.pending.as_ref() == Some(ticket)
    }

    /// Apply a fetch result. Returns `false` (and leaves state alone) when
    /// the ticket has been superseded.
    pub fn apply_booked_seats(&mut self, ticket: &SeatsTicket, booked: BookedSeats) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                screening = %ticket.key,
                generation = ticket.generation,
                "discarding stale booked seats"
            );
            return false;
        }
        self.booked = booked;
        self.pending = None;
        true
    }

    /// Record a failed fetch: the screening falls back to "nothing booked".
    pub fn booked_seats_failed(&mut self, ticket: &SeatsTicket, error: &str) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        tracing::warn!(
            screening = %ticket.key,
            error,
            "booked seats unavailable, showing all seats as free"
        );
        self.booked = BookedSeats::new();
        self.pending = None;
        true
    }

    /// Back to no date, no time
    pub fn reset(&mut self) {
        self.date = None;
        self.time = None;
        self.booked = BookedSeats::new();
        self.pending = None;
    }
}
