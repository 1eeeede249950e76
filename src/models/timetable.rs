//! Timetable aggregate.
//!
//! Owns the slot, subject and person registries and the sparse mapping from
//! cells to their [`Assignment`]. All mutation goes through the methods
//! here, which check every invariant before the first write:
//!
//! - the cell's slot and subject are registered,
//! - the person is registered and has the role the cell side requires,
//! - nobody occupies two subjects within the same slot.
//!
//! A per-(slot, person) booking index keeps the double-booking check O(1).

use std::collections::HashMap;

use tracing::{debug, trace};

use super::cell::{Assignment, CellKey};
use super::{CellView, GridRow, Person, PersonBooking, Role, Subject, TimeSlot};
use crate::conflicts::Conflicts;
use crate::error::{AssignError, AssignResult};
use crate::validation::{validate_registries, ValidationError};

/// Key of the booking index: (slot index, person index).
type BookingKey = (usize, usize);

/// A weekly class timetable.
#[derive(Debug, Clone)]
pub struct Timetable {
    /// Sorted by `order`, ties in registration order.
    slots: Vec<TimeSlot>,
    subjects: Vec<Subject>,
    people: Vec<Person>,
    slot_index: HashMap<String, usize>,
    subject_index: HashMap<String, usize>,
    person_index: HashMap<String, usize>,
    cells: HashMap<CellKey, Assignment>,
    /// Subjects each person occupies per slot. More than one entry only
    /// after a lenient import of conflicting data.
    bookings: HashMap<BookingKey, Vec<usize>>,
}

impl Timetable {
    /// Creates an empty timetable over fixed registries.
    ///
    /// # Errors
    /// Every duplicate or empty id found in the registries.
    pub fn new(
        mut slots: Vec<TimeSlot>,
        subjects: Vec<Subject>,
        people: Vec<Person>,
    ) -> Result<Self, Vec<ValidationError>> {
        validate_registries(&slots, &subjects, &people)?;

        slots.sort_by_key(|s| s.order);
        let slot_index = index_by(&slots, |s| &s.id);
        let subject_index = index_by(&subjects, |s| &s.id);
        let person_index = index_by(&people, |p| &p.id);

        Ok(Self {
            slots,
            subjects,
            people,
            slot_index,
            subject_index,
            person_index,
            cells: HashMap::new(),
            bookings: HashMap::new(),
        })
    }

    // ---- Mutations ----

    /// Puts a teacher in charge of a cell.
    ///
    /// Replaces any teacher already there. Re-assigning the same teacher
    /// is a no-op.
    ///
    /// # Errors
    /// `UnknownCell`, `UnknownPerson`, `WrongRole` (not a teacher) or
    /// `DoubleBooked` (teaching another subject in this slot), checked in
    /// that order. On error the timetable is unchanged.
    pub fn assign_teacher(
        &mut self,
        slot_id: &str,
        subject_id: &str,
        person_id: &str,
    ) -> AssignResult<()> {
        let result = self.try_assign_teacher(slot_id, subject_id, person_id);
        log_outcome("assign_teacher", slot_id, subject_id, Some(person_id), &result);
        result
    }

    /// Enrolls a child in a cell. Enrolling twice is a no-op.
    ///
    /// # Errors
    /// `UnknownCell`, `UnknownPerson`, `WrongRole` (not a child) or
    /// `DoubleBooked` (enrolled in another subject in this slot). On error
    /// the timetable is unchanged.
    pub fn assign_child(
        &mut self,
        slot_id: &str,
        subject_id: &str,
        person_id: &str,
    ) -> AssignResult<()> {
        let result = self.try_assign_child(slot_id, subject_id, person_id);
        log_outcome("assign_child", slot_id, subject_id, Some(person_id), &result);
        result
    }

    /// Removes the teacher of a cell, if any.
    ///
    /// # Errors
    /// `UnknownCell` only.
    pub fn unassign_teacher(&mut self, slot_id: &str, subject_id: &str) -> AssignResult<()> {
        let result = self.locate(slot_id, subject_id).map(|key| {
            let removed = self.cells.get_mut(&key).and_then(|a| a.teacher.take());
            if let Some(person) = removed {
                self.unbook(key, person);
                self.drop_if_empty(key);
            }
        });
        log_outcome("unassign_teacher", slot_id, subject_id, None, &result);
        result
    }

    /// Withdraws a child from a cell. A child that is not enrolled there,
    /// or not registered at all, is a no-op.
    ///
    /// # Errors
    /// `UnknownCell` only.
    pub fn unassign_child(
        &mut self,
        slot_id: &str,
        subject_id: &str,
        person_id: &str,
    ) -> AssignResult<()> {
        let result = self.locate(slot_id, subject_id).map(|key| {
            let Some(&person) = self.person_index.get(person_id) else {
                return;
            };
            let removed = self
                .cells
                .get_mut(&key)
                .is_some_and(|a| a.remove_child(person));
            if removed {
                self.unbook(key, person);
                self.drop_if_empty(key);
            }
        });
        log_outcome("unassign_child", slot_id, subject_id, Some(person_id), &result);
        result
    }

    /// Drops a person onto a cell: teachers take the teacher side, children
    /// are enrolled.
    ///
    /// # Errors
    /// As [`assign_teacher`](Self::assign_teacher) or
    /// [`assign_child`](Self::assign_child), minus `WrongRole`.
    pub fn place(&mut self, slot_id: &str, subject_id: &str, person_id: &str) -> AssignResult<()> {
        let role = self.locate(slot_id, subject_id).and_then(|_| {
            self.person(person_id)
                .map(|p| p.role)
                .ok_or_else(|| AssignError::UnknownPerson(person_id.to_string()))
        });
        match role {
            Ok(Role::Teacher) => self.assign_teacher(slot_id, subject_id, person_id),
            Ok(Role::Child) => self.assign_child(slot_id, subject_id, person_id),
            Err(error) => {
                let result = Err(error);
                log_outcome("place", slot_id, subject_id, Some(person_id), &result);
                result
            }
        }
    }

    /// Empties a cell.
    ///
    /// # Errors
    /// `UnknownCell` only.
    pub fn clear_cell(&mut self, slot_id: &str, subject_id: &str) -> AssignResult<()> {
        let result = self.locate(slot_id, subject_id).map(|key| {
            if let Some(assignment) = self.cells.remove(&key) {
                for person in assignment.occupants() {
                    self.unbook(key, person);
                }
            }
        });
        log_outcome("clear_cell", slot_id, subject_id, None, &result);
        result
    }

    // ---- Queries ----

    /// Resolves the content of a cell. Unassigned cells yield an empty view.
    ///
    /// # Errors
    /// `UnknownCell` if slot or subject is not registered.
    pub fn cell(&self, slot_id: &str, subject_id: &str) -> AssignResult<CellView<'_>> {
        let key = self.locate(slot_id, subject_id)?;
        Ok(self.view(key))
    }

    /// Scans every cell for people occupying two subjects in one slot.
    ///
    /// Cannot find anything in a timetable only mutated through this type;
    /// it exists for data imported with
    /// [`from_record_lenient`](Self::from_record_lenient). Each call starts
    /// a fresh scan.
    pub fn list_conflicts(&self) -> Conflicts<'_> {
        Conflicts::new(self)
    }

    /// Whole grid in render order: slots by `order`, subjects by
    /// registration.
    pub fn grid(&self) -> Vec<GridRow<'_>> {
        (0..self.slots.len())
            .map(|slot| GridRow {
                slot: &self.slots[slot],
                cells: (0..self.subjects.len())
                    .map(|subject| self.view(CellKey::new(slot, subject)))
                    .collect(),
            })
            .collect()
    }

    /// Every cell the given person occupies, in grid order.
    ///
    /// # Errors
    /// `UnknownPerson` if the id is not registered.
    pub fn schedule_for(&self, person_id: &str) -> AssignResult<Vec<PersonBooking<'_>>> {
        let &person = self
            .person_index
            .get(person_id)
            .ok_or_else(|| AssignError::UnknownPerson(person_id.to_string()))?;
        let role = self.people[person].role;

        let mut out = Vec::new();
        for slot in 0..self.slots.len() {
            if let Some(subjects) = self.bookings.get(&(slot, person)) {
                let mut subjects = subjects.clone();
                subjects.sort_unstable();
                out.extend(subjects.into_iter().map(|subject| PersonBooking {
                    slot: &self.slots[slot],
                    subject: &self.subjects[subject],
                    role,
                }));
            }
        }
        Ok(out)
    }

    /// Slots in row order.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Subjects in column order.
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// People in registration order.
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// Registered teachers.
    pub fn teachers(&self) -> impl Iterator<Item = &Person> {
        self.people.iter().filter(|p| p.is_teacher())
    }

    /// Registered children.
    pub fn children(&self) -> impl Iterator<Item = &Person> {
        self.people.iter().filter(|p| p.is_child())
    }

    /// Looks up a slot by id.
    pub fn slot(&self, id: &str) -> Option<&TimeSlot> {
        self.slot_index.get(id).map(|&i| &self.slots[i])
    }

    /// Looks up a subject by id.
    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subject_index.get(id).map(|&i| &self.subjects[i])
    }

    /// Looks up a person by id.
    pub fn person(&self, id: &str) -> Option<&Person> {
        self.person_index.get(id).map(|&i| &self.people[i])
    }

    /// Number of non-empty cells.
    pub fn assignment_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell holds anybody.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    // ---- Crate-internal access ----

    pub(crate) fn slot_at(&self, slot: usize) -> &TimeSlot {
        &self.slots[slot]
    }

    pub(crate) fn person_at(&self, person: usize) -> &Person {
        &self.people[person]
    }

    pub(crate) fn assignment_at(&self, key: CellKey) -> Option<&Assignment> {
        self.cells.get(&key)
    }

    /// Writes a cell without the double-booking check. Used when restoring
    /// records; references must already be validated.
    pub(crate) fn restore_cell(
        &mut self,
        slot_id: &str,
        subject_id: &str,
        teacher_id: Option<&str>,
        child_ids: &[String],
    ) -> AssignResult<()> {
        let key = self.locate(slot_id, subject_id)?;
        let teacher = teacher_id
            .map(|id| self.resolve_person(id, Role::Teacher))
            .transpose()?;
        let children = child_ids
            .iter()
            .map(|id| self.resolve_person(id, Role::Child))
            .collect::<AssignResult<Vec<_>>>()?;

        if let Some(person) = teacher {
            let previous = self.cells.entry(key).or_default().teacher.replace(person);
            if let Some(previous) = previous.filter(|&p| p != person) {
                self.unbook(key, previous);
            }
            self.book(key, person);
        }
        for person in children {
            if self.cells.entry(key).or_default().add_child(person) {
                self.book(key, person);
            }
        }
        Ok(())
    }

    // ---- Internals ----

    fn try_assign_teacher(
        &mut self,
        slot_id: &str,
        subject_id: &str,
        person_id: &str,
    ) -> AssignResult<()> {
        let key = self.locate(slot_id, subject_id)?;
        let person = self.resolve_person(person_id, Role::Teacher)?;
        self.ensure_free(key, person)?;

        let previous = self.cells.entry(key).or_default().teacher.replace(person);
        if let Some(previous) = previous.filter(|&p| p != person) {
            self.unbook(key, previous);
        }
        self.book(key, person);
        Ok(())
    }

    fn try_assign_child(
        &mut self,
        slot_id: &str,
        subject_id: &str,
        person_id: &str,
    ) -> AssignResult<()> {
        let key = self.locate(slot_id, subject_id)?;
        let person = self.resolve_person(person_id, Role::Child)?;
        self.ensure_free(key, person)?;

        if self.cells.entry(key).or_default().add_child(person) {
            self.book(key, person);
        }
        Ok(())
    }

    fn locate(&self, slot_id: &str, subject_id: &str) -> AssignResult<CellKey> {
        match (
            self.slot_index.get(slot_id),
            self.subject_index.get(subject_id),
        ) {
            (Some(&slot), Some(&subject)) => Ok(CellKey::new(slot, subject)),
            _ => Err(AssignError::unknown_cell(slot_id, subject_id)),
        }
    }

    fn resolve_person(&self, person_id: &str, expected: Role) -> AssignResult<usize> {
        let &index = self
            .person_index
            .get(person_id)
            .ok_or_else(|| AssignError::UnknownPerson(person_id.to_string()))?;
        let actual = self.people[index].role;
        if actual != expected {
            return Err(AssignError::WrongRole {
                person_id: person_id.to_string(),
                expected,
                actual,
            });
        }
        Ok(index)
    }

    /// Fails if the person occupies another subject in the key's slot.
    fn ensure_free(&self, key: CellKey, person: usize) -> AssignResult<()> {
        let held = self
            .bookings
            .get(&(key.slot, person))
            .and_then(|subjects| subjects.iter().find(|&&s| s != key.subject));
        match held {
            Some(&subject) => Err(AssignError::DoubleBooked {
                person_id: self.people[person].id.clone(),
                slot_id: self.slots[key.slot].id.clone(),
                subject_id: self.subjects[subject].id.clone(),
            }),
            None => Ok(()),
        }
    }

    fn book(&mut self, key: CellKey, person: usize) {
        let subjects = self.bookings.entry((key.slot, person)).or_default();
        if !subjects.contains(&key.subject) {
            subjects.push(key.subject);
        }
    }

    fn unbook(&mut self, key: CellKey, person: usize) {
        if let Some(subjects) = self.bookings.get_mut(&(key.slot, person)) {
            subjects.retain(|&s| s != key.subject);
            if subjects.is_empty() {
                self.bookings.remove(&(key.slot, person));
            }
        }
    }

    fn drop_if_empty(&mut self, key: CellKey) {
        if self.cells.get(&key).is_some_and(Assignment::is_empty) {
            self.cells.remove(&key);
        }
    }

    fn view(&self, key: CellKey) -> CellView<'_> {
        let assignment = self.cells.get(&key);
        CellView {
            slot: &self.slots[key.slot],
            subject: &self.subjects[key.subject],
            teacher: assignment
                .and_then(|a| a.teacher)
                .map(|p| &self.people[p]),
            children: assignment
                .map(|a| a.children.iter().map(|&p| &self.people[p]).collect())
                .unwrap_or_default(),
        }
    }
}

fn index_by<T>(items: &[T], id: impl Fn(&T) -> &String) -> HashMap<String, usize> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| (id(item).clone(), i))
        .collect()
}

fn log_outcome(
    op: &'static str,
    slot: &str,
    subject: &str,
    person: Option<&str>,
    result: &AssignResult<()>,
) {
    match result {
        Ok(()) => debug!(op, slot, subject, person, "timetable updated"),
        Err(error) => trace!(op, slot, subject, person, %error, "timetable change rejected"),
    }
}
