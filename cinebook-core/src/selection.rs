//! Selection controller
//!
//! Owns the ordered list of seats the user has picked. The booked set is a
//! read-only input; a booked seat can never enter the selection.

use crate::seat::{BookedSeats, SeatId};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionController {
    seats: Vec<SeatId>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected seats in the order they were picked
    pub fn seats(&self) -> &[SeatId] {
        &self.seats
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn contains(&self, seat: &SeatId) -> bool {
        self.seats.contains(seat)
    }

    /// Flip `seat` in or out of the selection.
    ///
    /// Returns the updated selection, or `None` when the seat is booked and
    /// nothing changed.
    pub fn toggle(&mut self, seat: SeatId, booked: &BookedSeats) -> Option<&[SeatId]> {
        if booked.contains(&seat) {
            tracing::debug!(%seat, "ignoring toggle on booked seat");
            return None;
        }
        match self.seats.iter().position(|s| *s == seat) {
            Some(idx) => {
                self.seats.remove(idx);
            }
            None => self.seats.push(seat),
        }
        Some(&self.seats)
    }

    /// Empty the selection. Returns `None` if it was already empty.
    pub fn clear(&mut self) -> Option<&[SeatId]> {
        if self.seats.is_empty() {
            return None;
        }
        self.seats.clear();
        Some(&self.seats)
    }

    /// Drop seats that have since become booked. Returns how many were dropped.
    pub fn purge(&mut self, booked: &BookedSeats) -> usize {
        let before = self.seats.len();
        self.seats.retain(|s| !booked.contains(s));
        before - self.seats.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> SeatId {
        s.parse().unwrap()
    }

    fn booked(ids: &[&str]) -> BookedSeats {
        ids.iter().map(|s| id(s)).collect()
    }

    #[test]
    fn test_toggle_adds_in_click_order() {
        let mut selection = SelectionController::new();
        let none = BookedSeats::new();

        selection.toggle(id("C1"), &none);
        let reported = selection.toggle(id("A3"), &none).map(<[SeatId]>::to_vec);

        assert_eq!(reported, Some(vec![id("C1"), id("A3")]));
        assert_eq!(selection.seats(), &[id("C1"), id("A3")]);
    }

    #[test]
    fn test_toggle_booked_is_noop() {
        let mut selection = SelectionController::new();
        let booked = booked(&["A1", "A2"]);
        selection.toggle(id("B5"), &booked);
        let before = selection.clone();

        assert!(selection.toggle(id("A1"), &booked).is_none());
        assert_eq!(selection, before);
    }

    #[test]
    fn test_double_toggle_restores_order() {
        let mut selection = SelectionController::new();
        let none = BookedSeats::new();
        for s in ["B5", "C1", "D4"] {
            selection.toggle(id(s), &none);
        }
        let original = selection.seats().to_vec();

        selection.toggle(id("E9"), &none);
        selection.toggle(id("E9"), &none);
        assert_eq!(selection.seats(), original.as_slice());
    }

    #[test]
    fn test_toggle_removes_from_middle() {
        let mut selection = SelectionController::new();
        let none = BookedSeats::new();
        for s in ["B5", "C1", "D4"] {
            selection.toggle(id(s), &none);
        }

        selection.toggle(id("C1"), &none);
        assert_eq!(selection.seats(), &[id("B5"), id("D4")]);
    }

    #[test]
    fn test_clear_reports_only_when_changed() {
        let mut selection = SelectionController::new();
        assert!(selection.clear().is_none());

        selection.toggle(id("B5"), &BookedSeats::new());
        assert_eq!(selection.clear().map(<[SeatId]>::len), Some(0));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_purge_drops_newly_booked() {
        let mut selection = SelectionController::new();
        let none = BookedSeats::new();
        for s in ["B5", "C1", "D4"] {
            selection.toggle(id(s), &none);
        }

        let dropped = selection.purge(&booked(&["C1", "H8"]));
        assert_eq!(dropped, 1);
        assert_eq!(selection.seats(), &[id("B5"), id("D4")]);
    }
}
