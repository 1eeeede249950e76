//! Time slot and subject models.
//!
//! Slots are the rows of the weekly grid and subjects its columns. Both
//! are registered once when the timetable is built and never change.

use serde::{Deserialize, Serialize};

/// A lesson period, e.g. `08:00-08:45`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Unique slot identifier.
    pub id: String,
    /// Row heading.
    pub label: String,
    /// Sort key. Rows are drawn in ascending order.
    pub order: i32,
}

/// A subject, e.g. `Mathematics`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject identifier.
    pub id: String,
    /// Column heading.
    pub label: String,
}

impl TimeSlot {
    /// Creates a slot whose label equals its id.
    pub fn new(id: impl Into<String>, order: i32) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            order,
        }
    }

    /// Sets the row heading.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl Subject {
    /// Creates a subject whose label equals its id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
        }
    }

    /// Sets the column heading.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_builder() {
        let s = TimeSlot::new("P1", 1).with_label("08:00-08:45");
        assert_eq!(s.id, "P1");
        assert_eq!(s.label, "08:00-08:45");
        assert_eq!(s.order, 1);

        let plain = TimeSlot::new("09:00-09:45", 2);
        assert_eq!(plain.label, "09:00-09:45");
    }

    #[test]
    fn test_subject_builder() {
        let s = Subject::new("PE").with_label("Physical Education");
        assert_eq!(s.id, "PE");
        assert_eq!(s.label, "Physical Education");
        assert_eq!(Subject::new("English").label, "English");
    }
}
