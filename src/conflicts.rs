//! Double-booking detection.
//!
//! Walks the grid one slot row at a time and reports every person found
//! in more than one subject of the same slot. The walk reads cells
//! directly rather than the booking index, so it also catches data that
//! bypassed the mutation checks.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::models::{CellKey, Role, Timetable};

/// A person occupying several subjects within one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    /// Double-booked person.
    pub person_id: String,
    /// Their role.
    pub role: Role,
    /// Slot in which the overlap happens.
    pub slot_id: String,
    /// Every subject they occupy in that slot, in column order.
    pub subject_ids: Vec<String>,
}

/// Lazy iterator over conflicts, in slot order and then by person id.
///
/// A clone continues from the current position; call `list_conflicts` again
/// for a fresh scan.
#[derive(Debug, Clone)]
pub struct Conflicts<'a> {
    timetable: &'a Timetable,
    next_slot: usize,
    pending: VecDeque<ConflictReport>,
}

impl<'a> Conflicts<'a> {
    pub(crate) fn new(timetable: &'a Timetable) -> Self {
        Self {
            timetable,
            next_slot: 0,
            pending: VecDeque::new(),
        }
    }

    fn scan_slot(&self, slot: usize) -> VecDeque<ConflictReport> {
        let tt = self.timetable;
        let mut seen: BTreeMap<&str, (Role, Vec<String>)> = BTreeMap::new();

        for (subject_idx, subject) in tt.subjects().iter().enumerate() {
            let Some(assignment) = tt.assignment_at(CellKey::new(slot, subject_idx)) else {
                continue;
            };
            for person in assignment.occupants() {
                let person = tt.person_at(person);
                let entry = seen
                    .entry(person.id.as_str())
                    .or_insert_with(|| (person.role, Vec::new()));
                entry.1.push(subject.id.clone());
            }
        }

        let slot_id = &tt.slot_at(slot).id;
        seen.into_iter()
            .filter(|(_, (_, subjects))| subjects.len() > 1)
            .map(|(person_id, (role, subject_ids))| ConflictReport {
                person_id: person_id.to_string(),
                role,
                slot_id: slot_id.clone(),
                subject_ids,
            })
            .collect()
    }
}

impl Iterator for Conflicts<'_> {
    type Item = ConflictReport;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(report) = self.pending.pop_front() {
                return Some(report);
            }
            if self.next_slot >= self.timetable.slots().len() {
                return None;
            }
            self.pending = self.scan_slot(self.next_slot);
            self.next_slot += 1;
        }
    }
}

impl std::iter::FusedIterator for Conflicts<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Person, Subject, TimeSlot};
    use crate::record::{CellRecord, TimetableRecord};

    fn conflicting_record() -> TimetableRecord {
        TimetableRecord {
            slots: vec![TimeSlot::new("S1", 1), TimeSlot::new("S2", 2)],
            subjects: vec![
                Subject::new("English"),
                Subject::new("Mathematics"),
                Subject::new("Language"),
            ],
            people: vec![
                Person::teacher("T1"),
                Person::child("C1"),
                Person::child("C2"),
            ],
            cells: vec![
                CellRecord::new("S1", "English").with_teacher("T1").with_children(["C2"]),
                CellRecord::new("S1", "Language").with_teacher("T1"),
                CellRecord::new("S2", "English").with_children(["C1"]),
                CellRecord::new("S2", "Mathematics").with_children(["C1", "C2"]),
                CellRecord::new("S2", "Language").with_children(["C1"]),
            ],
        }
    }

    #[test]
    fn test_reports_in_slot_then_person_order() {
        let tt = Timetable::from_record_lenient(conflicting_record()).unwrap();
        let reports: Vec<_> = tt.list_conflicts().collect();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].person_id, "T1");
        assert_eq!(reports[0].role, Role::Teacher);
        assert_eq!(reports[0].slot_id, "S1");
        assert_eq!(reports[0].subject_ids, vec!["English", "Language"]);

        assert_eq!(reports[1].person_id, "C1");
        assert_eq!(reports[1].role, Role::Child);
        assert_eq!(reports[1].slot_id, "S2");
        assert_eq!(
            reports[1].subject_ids,
            vec!["English", "Mathematics", "Language"]
        );
    }

    #[test]
    fn test_restartable() {
        let tt = Timetable::from_record_lenient(conflicting_record()).unwrap();
        let mut conflicts = tt.list_conflicts();
        let first = conflicts.next();
        let rest: Vec<_> = conflicts.clone().collect();

        assert_eq!(rest.len(), 1);
        assert_eq!(conflicts.count(), 1);
        assert_eq!(tt.list_conflicts().next(), first);
    }

    #[test]
    fn test_fused_after_exhaustion() {
        let tt = Timetable::from_record_lenient(conflicting_record()).unwrap();
        let mut conflicts = tt.list_conflicts();
        conflicts.by_ref().for_each(drop);
        assert!(conflicts.next().is_none());
        assert!(conflicts.next().is_none());
    }

    #[test]
    fn test_resolving_clears_report() {
        let mut tt = Timetable::from_record_lenient(conflicting_record()).unwrap();
        tt.unassign_teacher("S1", "Language").unwrap();
        tt.unassign_child("S2", "English", "C1").unwrap();
        tt.clear_cell("S2", "Language").unwrap();

        assert_eq!(tt.list_conflicts().count(), 0);
    }
}
