//! Thread-safe timetable handle.
//!
//! Wraps a [`Timetable`] in an `Arc<RwLock<_>>`. Each mutation holds the
//! write lock across its checks and its update, so two threads can never
//! both pass the double-booking check for the same person and slot.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::conflicts::ConflictReport;
use crate::error::AssignResult;
use crate::models::Timetable;
use crate::record::TimetableRecord;

/// Cloneable, lock-guarded timetable.
#[derive(Debug, Clone)]
pub struct SharedTimetable {
    inner: Arc<RwLock<Timetable>>,
}

impl SharedTimetable {
    /// Wraps a timetable.
    pub fn new(timetable: Timetable) -> Self {
        Self {
            inner: Arc::new(RwLock::new(timetable)),
        }
    }

    /// See [`Timetable::assign_teacher`].
    pub fn assign_teacher(
        &self,
        slot_id: &str,
        subject_id: &str,
        person_id: &str,
    ) -> AssignResult<()> {
        self.inner.write().assign_teacher(slot_id, subject_id, person_id)
    }

    /// See [`Timetable::assign_child`].
    pub fn assign_child(
        &self,
        slot_id: &str,
        subject_id: &str,
        person_id: &str,
    ) -> AssignResult<()> {
        self.inner.write().assign_child(slot_id, subject_id, person_id)
    }

    /// See [`Timetable::unassign_teacher`].
    pub fn unassign_teacher(&self, slot_id: &str, subject_id: &str) -> AssignResult<()> {
        self.inner.write().unassign_teacher(slot_id, subject_id)
    }

    /// See [`Timetable::unassign_child`].
    pub fn unassign_child(
        &self,
        slot_id: &str,
        subject_id: &str,
        person_id: &str,
    ) -> AssignResult<()> {
        self.inner.write().unassign_child(slot_id, subject_id, person_id)
    }

    /// See [`Timetable::place`].
    pub fn place(&self, slot_id: &str, subject_id: &str, person_id: &str) -> AssignResult<()> {
        self.inner.write().place(slot_id, subject_id, person_id)
    }

    /// See [`Timetable::clear_cell`].
    pub fn clear_cell(&self, slot_id: &str, subject_id: &str) -> AssignResult<()> {
        self.inner.write().clear_cell(slot_id, subject_id)
    }

    /// Runs a read-only closure under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&Timetable) -> R) -> R {
        f(&*self.inner.read())
    }

    /// Runs a closure under the write lock, for compound updates that must
    /// be atomic as a whole.
    pub fn write<R>(&self, f: impl FnOnce(&mut Timetable) -> R) -> R {
        f(&mut *self.inner.write())
    }

    /// Current contents in record form.
    pub fn snapshot(&self) -> TimetableRecord {
        self.inner.read().to_record()
    }

    /// Collected conflict reports.
    pub fn conflicts(&self) -> Vec<ConflictReport> {
        self.inner.read().list_conflicts().collect()
    }
}

impl From<Timetable> for SharedTimetable {
    fn from(timetable: Timetable) -> Self {
        Self::new(timetable)
    }
}
