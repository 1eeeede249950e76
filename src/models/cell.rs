//! Cell content and read views.
//!
//! A cell is one `TimeSlot` x `Subject` position of the grid. Its content
//! is an [`Assignment`]: an optional teacher plus the children enrolled in
//! that session. Cells with nothing assigned are not stored at all.

use super::{Person, Role, Subject, TimeSlot};

/// Position of a cell, as indices into the slot and subject registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct CellKey {
    pub(crate) slot: usize,
    pub(crate) subject: usize,
}

impl CellKey {
    pub(crate) fn new(slot: usize, subject: usize) -> Self {
        Self { slot, subject }
    }
}

/// Occupants of a single cell, as indices into the person registry.
///
/// Children keep their enrollment order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Assignment {
    pub(crate) teacher: Option<usize>,
    pub(crate) children: Vec<usize>,
}

impl Assignment {
    /// Whether nothing is assigned.
    pub(crate) fn is_empty(&self) -> bool {
        self.teacher.is_none() && self.children.is_empty()
    }

    /// Enrolls a child. Returns `false` if already enrolled.
    pub(crate) fn add_child(&mut self, person: usize) -> bool {
        if self.children.contains(&person) {
            return false;
        }
        self.children.push(person);
        true
    }

    /// Withdraws a child. Returns `false` if not enrolled.
    pub(crate) fn remove_child(&mut self, person: usize) -> bool {
        match self.children.iter().position(|&c| c == person) {
            Some(pos) => {
                self.children.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Teacher first, then children.
    pub(crate) fn occupants(&self) -> impl Iterator<Item = usize> + '_ {
        self.teacher.iter().copied().chain(self.children.iter().copied())
    }
}

/// Read-only view of one cell, resolved against the registries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView<'a> {
    /// Row of the cell.
    pub slot: &'a TimeSlot,
    /// Column of the cell.
    pub subject: &'a Subject,
    /// Teacher running the session, if any.
    pub teacher: Option<&'a Person>,
    /// Enrolled children, in enrollment order.
    pub children: Vec<&'a Person>,
}

impl<'a> CellView<'a> {
    /// Whether the cell holds nobody.
    pub fn is_empty(&self) -> bool {
        self.teacher.is_none() && self.children.is_empty()
    }

    /// Teacher id, if any.
    pub fn teacher_id(&self) -> Option<&'a str> {
        self.teacher.map(|p| p.id.as_str())
    }

    /// Child ids in enrollment order.
    pub fn child_ids(&self) -> Vec<&'a str> {
        self.children.iter().map(|p| p.id.as_str()).collect()
    }

    /// Whether the given person occupies this cell.
    pub fn contains(&self, person_id: &str) -> bool {
        self.teacher_id() == Some(person_id) || self.children.iter().any(|p| p.id == person_id)
    }
}

/// One grid row: a slot and its cells in subject (column) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow<'a> {
    /// Row heading.
    pub slot: &'a TimeSlot,
    /// One view per subject.
    pub cells: Vec<CellView<'a>>,
}

/// A cell occupied by a given person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonBooking<'a> {
    /// Slot of the booking.
    pub slot: &'a TimeSlot,
    /// Subject of the booking.
    pub subject: &'a Subject,
    /// Side of the cell the person occupies.
    pub role: Role,
}
