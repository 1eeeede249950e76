//! Input validation for timetables.
//!
//! Checks structural integrity of registries and of imported cell records
//! before a timetable is built from them. Detects:
//! - Duplicate and empty IDs
//! - Cells referencing unregistered slots, subjects or people
//! - People placed on the wrong side of a cell
//! - The same cell listed twice
//! - People occupying two subjects in one slot

use crate::models::{Person, Role, Subject, TimeSlot};
use crate::record::CellRecord;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of one registry share the same ID.
    DuplicateId,
    /// An entity has an empty ID.
    EmptyId,
    /// A cell references a slot, subject or person that doesn't exist.
    UnknownReference,
    /// A teacher listed as a child, or the reverse.
    RoleMismatch,
    /// Two records describe the same cell.
    DuplicateCell,
    /// A person occupies more than one subject in a slot.
    DoubleBooking,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the registries a timetable is built over.
///
/// Checks, per registry (slots, subjects, people):
/// 1. No empty IDs
/// 2. No duplicate IDs
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_registries(
    slots: &[TimeSlot],
    subjects: &[Subject],
    people: &[Person],
) -> ValidationResult {
    let mut errors = Vec::new();

    check_ids("slot", slots.iter().map(|s| s.id.as_str()), &mut errors);
    check_ids("subject", subjects.iter().map(|s| s.id.as_str()), &mut errors);
    check_ids("person", people.iter().map(|p| p.id.as_str()), &mut errors);

    into_result(errors)
}

/// Validates cell records against the registries they will be restored
/// into.
///
/// Checks:
/// 1. Slot and subject of every record exist
/// 2. Teacher and children exist
/// 3. The teacher is a `Teacher`, the children are `Child`ren
/// 4. No cell is described by two records
///
/// Double-booking is not checked here; see [`detect_double_bookings`].
pub fn validate_cells(
    slots: &[TimeSlot],
    subjects: &[Subject],
    people: &[Person],
    cells: &[CellRecord],
) -> ValidationResult {
    let mut errors = Vec::new();

    let slot_ids: HashSet<&str> = slots.iter().map(|s| s.id.as_str()).collect();
    let subject_ids: HashSet<&str> = subjects.iter().map(|s| s.id.as_str()).collect();
    let roles: HashMap<&str, Role> = people.iter().map(|p| (p.id.as_str(), p.role)).collect();

    let mut seen_cells = HashSet::new();
    for cell in cells {
        let at = format!("({}, {})", cell.slot_id, cell.subject_id);

        if !slot_ids.contains(cell.slot_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownReference,
                format!("Cell {at} references unknown slot '{}'", cell.slot_id),
            ));
        }
        if !subject_ids.contains(cell.subject_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownReference,
                format!("Cell {at} references unknown subject '{}'", cell.subject_id),
            ));
        }
        if !seen_cells.insert((cell.slot_id.as_str(), cell.subject_id.as_str())) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCell,
                format!("Cell {at} is listed more than once"),
            ));
        }

        let occupants = cell
            .teacher_id
            .iter()
            .map(|id| (id, Role::Teacher))
            .chain(cell.child_ids.iter().map(|id| (id, Role::Child)));
        for (person_id, expected) in occupants {
            match roles.get(person_id.as_str()) {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownReference,
                    format!("Cell {at} references unknown person '{person_id}'"),
                )),
                Some(&actual) if actual != expected => errors.push(ValidationError::new(
                    ValidationErrorKind::RoleMismatch,
                    format!("Cell {at} lists {actual} '{person_id}' as a {expected}"),
                )),
                Some(_) => {}
            }
        }
    }

    into_result(errors)
}

/// Detects people occupying more than one subject in the same slot.
///
/// Reports one error per (person, slot) pair, in record order.
pub fn detect_double_bookings(cells: &[CellRecord]) -> ValidationResult {
    let mut booked: HashMap<(&str, &str), Vec<&str>> = HashMap::new();
    let mut order = Vec::new();

    for cell in cells {
        let occupants = cell.teacher_id.iter().chain(cell.child_ids.iter());
        for person_id in occupants {
            let key = (cell.slot_id.as_str(), person_id.as_str());
            let subjects = booked.entry(key).or_insert_with(|| {
                order.push(key);
                Vec::new()
            });
            if !subjects.contains(&cell.subject_id.as_str()) {
                subjects.push(cell.subject_id.as_str());
            }
        }
    }

    let errors = order
        .into_iter()
        .filter_map(|key @ (slot, person)| {
            let subjects = &booked[&key];
            (subjects.len() > 1).then(|| {
                ValidationError::new(
                    ValidationErrorKind::DoubleBooking,
                    format!(
                        "'{person}' is booked for {} subjects at '{slot}': {}",
                        subjects.len(),
                        subjects.join(", ")
                    ),
                )
            })
        })
        .collect();

    into_result(errors)
}

fn check_ids<'a>(
    registry: &str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                format!("Empty {registry} ID"),
            ));
        } else if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {registry} ID: {id}"),
            ));
        }
    }
}

fn into_result(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
