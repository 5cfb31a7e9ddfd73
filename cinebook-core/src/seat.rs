//! Seat grid model
//!
//! Seats are named by a row letter and a 1-based column ("C7"). Status is
//! never stored: it is derived from the selected and booked sets every time
//! it is asked for.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{GridError, SeatIdError};

/// Highest row count that still has a letter
pub const MAX_ROWS: u16 = 26;

/// A seat identifier such as "A1" or "H12"
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeatId {
    row: u8,
    col: u16,
}

impl SeatId {
    /// Build from a zero-based row index and a 1-based column number.
    pub fn new(row: u8, col: u16) -> Result<Self, SeatIdError> {
        if u16::from(row) >= MAX_ROWS || col == 0 {
            return Err(SeatIdError(format!("row {row}, column {col}")));
        }
        Ok(Self { row, col })
    }

    /// Zero-based row index
    pub fn row(&self) -> u8 {
        self.row
    }

    /// 1-based column number
    pub fn col(&self) -> u16 {
        self.col
    }

    pub fn row_letter(&self) -> char {
        char::from(b'A' + self.row)
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_letter(), self.col)
    }
}

impl FromStr for SeatId {
    type Err = SeatIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SeatIdError(s.to_string());
        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(invalid)?;
        if !letter.is_ascii_uppercase() {
            return Err(invalid());
        }
        let digits = chars.as_str();
        // Canonical form only: "A01" would not survive a round trip.
        if digits.is_empty()
            || digits.starts_with('0')
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let col: u16 = digits.parse().map_err(|_| invalid())?;
        Self::new(letter as u8 - b'A', col).map_err(|_| invalid())
    }
}

impl Serialize for SeatId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SeatId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Derived per-seat status
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeatStatus {
    Available,
    Selected,
    Booked,
}

/// Seats already reserved for one screening. Only ever replaced wholesale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookedSeats(BTreeSet<SeatId>);

impl BookedSeats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the API's string list. Entries that are not seat
    /// identifiers are skipped with a warning.
    pub fn from_wire<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let seats = raw
            .into_iter()
            .filter_map(|s| match s.as_ref().parse::<SeatId>() {
                Ok(id) => Some(id),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring booked seat");
                    None
                }
            })
            .collect();
        Self(seats)
    }

    pub fn contains(&self, seat: &SeatId) -> bool {
        self.0.contains(seat)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeatId> {
        self.0.iter()
    }
}

impl FromIterator<SeatId> for BookedSeats {
    fn from_iter<T: IntoIterator<Item = SeatId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Status of `seat` given the current selection and booked set.
///
/// Booked wins over selected.
pub fn status(seat: &SeatId, selected: &[SeatId], booked: &BookedSeats) -> SeatStatus {
    if booked.contains(seat) {
        SeatStatus::Booked
    } else if selected.contains(seat) {
        SeatStatus::Selected
    } else {
        SeatStatus::Available
    }
}

/// Rectangular auditorium layout
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeatGrid {
    rows: u16,
    seats_per_row: u16,
}

impl Default for SeatGrid {
    /// 8 rows of 12 seats
    fn default() -> Self {
        Self {
            rows: 8,
            seats_per_row: 12,
        }
    }
}

impl SeatGrid {
    pub fn new(rows: u16, seats_per_row: u16) -> Result<Self, GridError> {
        if rows == 0 || seats_per_row == 0 {
            return Err(GridError::Empty);
        }
        if rows > MAX_ROWS {
            return Err(GridError::TooManyRows(rows));
        }
        Ok(Self {
            rows,
            seats_per_row,
        })
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn seats_per_row(&self) -> u16 {
        self.seats_per_row
    }

    pub fn len(&self) -> usize {
        usize::from(self.rows) * usize::from(self.seats_per_row)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Seat at a zero-based (row, column) position, if inside the grid
    pub fn seat_at(&self, row: u16, col: u16) -> Option<SeatId> {
        if row >= self.rows || col >= self.seats_per_row {
            return None;
        }
        SeatId::new(row as u8, col + 1).ok()
    }

    pub fn contains(&self, seat: &SeatId) -> bool {
        u16::from(seat.row) < self.rows && seat.col <= self.seats_per_row
    }

    /// One row of seats, leftmost first
    pub fn row(&self, row: u16) -> impl Iterator<Item = SeatId> + '_ {
        (0..self.seats_per_row).filter_map(move |col| self.seat_at(row, col))
    }

    /// All seats in row-major order: row A first, leftmost column first
    pub fn seats(&self) -> impl Iterator<Item = SeatId> + '_ {
        (0..self.rows).flat_map(move |row| self.row(row))
    }
}
