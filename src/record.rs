//! Serializable record form of a timetable.
//!
//! A [`TimetableRecord`] lists the three registries plus a sparse list of
//! non-empty cells. It is what a storage layer writes and reads; a record
//! without `cells` is a registry configuration that seeds an empty
//! timetable.
//!
//! ```
//! use class_timetable::record::TimetableRecord;
//!
//! let json = r#"{
//!     "slots": [{ "id": "08:00-08:45", "label": "08:00-08:45", "order": 1 }],
//!     "subjects": [{ "id": "English", "label": "English" }],
//!     "people": [{ "id": "T1", "name": "Orit Sharon", "role": "Teacher" }]
//! }"#;
//!
//! let mut tt = TimetableRecord::from_json(json).unwrap().into_timetable().unwrap();
//! tt.assign_teacher("08:00-08:45", "English", "T1").unwrap();
//! assert_eq!(tt.to_record().cells.len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Person, Subject, TimeSlot, Timetable};
use crate::validation::{
    detect_double_bookings, validate_cells, validate_registries, ValidationError,
    ValidationErrorKind,
};

/// Full timetable contents in storable form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableRecord {
    /// Slot registry.
    pub slots: Vec<TimeSlot>,
    /// Subject registry.
    pub subjects: Vec<Subject>,
    /// Person registry.
    pub people: Vec<Person>,
    /// Non-empty cells.
    #[serde(default)]
    pub cells: Vec<CellRecord>,
}

/// Contents of one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    pub slot_id: String,
    pub subject_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub child_ids: Vec<String>,
}

/// Why a record could not be decoded or restored.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("malformed timetable document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid timetable record ({} problem(s)): {}", .0.len(), join_messages(.0))]
    Invalid(Vec<ValidationError>),
}

impl From<Vec<ValidationError>> for RecordError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Invalid(errors)
    }
}

impl CellRecord {
    /// Creates an empty cell record.
    pub fn new(slot_id: impl Into<String>, subject_id: impl Into<String>) -> Self {
        Self {
            slot_id: slot_id.into(),
            subject_id: subject_id.into(),
            teacher_id: None,
            child_ids: Vec::new(),
        }
    }

    /// Sets the teacher.
    pub fn with_teacher(mut self, teacher_id: impl Into<String>) -> Self {
        self.teacher_id = Some(teacher_id.into());
        self
    }

    /// Appends children.
    pub fn with_children<I, S>(mut self, child_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.child_ids.extend(child_ids.into_iter().map(Into::into));
        self
    }

    /// Whether the record names nobody.
    pub fn is_empty(&self) -> bool {
        self.teacher_id.is_none() && self.child_ids.is_empty()
    }
}

impl TimetableRecord {
    /// Decodes a record from JSON.
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encodes the record as compact JSON.
    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encodes the record as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restores a timetable, rejecting double-bookings.
    ///
    /// Shorthand for [`Timetable::from_record`].
    pub fn into_timetable(self) -> Result<Timetable, RecordError> {
        Timetable::from_record(self)
    }
}

impl Timetable {
    /// Captures registries and non-empty cells in grid order.
    pub fn to_record(&self) -> TimetableRecord {
        let cells = self
            .grid()
            .into_iter()
            .flat_map(|row| row.cells)
            .filter(|cell| !cell.is_empty())
            .map(|cell| CellRecord {
                slot_id: cell.slot.id.clone(),
                subject_id: cell.subject.id.clone(),
                teacher_id: cell.teacher_id().map(str::to_string),
                child_ids: cell.child_ids().into_iter().map(str::to_string).collect(),
            })
            .collect();

        TimetableRecord {
            slots: self.slots().to_vec(),
            subjects: self.subjects().to_vec(),
            people: self.people().to_vec(),
            cells,
        }
    }

    /// Restores a timetable from a record.
    ///
    /// # Errors
    /// `RecordError::Invalid` with every registry, reference and
    /// double-booking problem found.
    pub fn from_record(record: TimetableRecord) -> Result<Self, RecordError> {
        restore(record, true)
    }

    /// Restores a timetable from a record, keeping double-bookings.
    ///
    /// Registry and reference problems are still rejected. Use
    /// [`list_conflicts`](Self::list_conflicts) to find what was kept.
    pub fn from_record_lenient(record: TimetableRecord) -> Result<Self, RecordError> {
        restore(record, false)
    }
}

fn restore(record: TimetableRecord, strict: bool) -> Result<Timetable, RecordError> {
    let TimetableRecord {
        slots,
        subjects,
        people,
        cells,
    } = record;

    let mut errors = Vec::new();
    let checks = [
        validate_registries(&slots, &subjects, &people),
        validate_cells(&slots, &subjects, &people, &cells),
        if strict {
            detect_double_bookings(&cells)
        } else {
            Ok(())
        },
    ];
    for check in checks {
        if let Err(found) = check {
            errors.extend(found);
        }
    }
    if !errors.is_empty() {
        return Err(RecordError::Invalid(errors));
    }

    let mut timetable = Timetable::new(slots, subjects, people)?;
    for cell in cells.iter().filter(|c| !c.is_empty()) {
        timetable
            .restore_cell(
                &cell.slot_id,
                &cell.subject_id,
                cell.teacher_id.as_deref(),
                &cell.child_ids,
            )
            .map_err(|e| {
                RecordError::Invalid(vec![ValidationError {
                    kind: ValidationErrorKind::UnknownReference,
                    message: e.to_string(),
                }])
            })?;
    }
    Ok(timetable)
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_record() -> TimetableRecord {
        TimetableRecord {
            slots: vec![
                TimeSlot::new("08:00-08:45", 1),
                TimeSlot::new("09:00-09:45", 2),
            ],
            subjects: vec![Subject::new("English"), Subject::new("Mathematics")],
            people: vec![
                Person::teacher("T1").with_name("Orit Sharon"),
                Person::teacher("T2").with_name("Rachel Levy"),
                Person::child("C1").with_name("Avi Levy"),
                Person::child("C2").with_name("Menashe Noy"),
            ],
            cells: vec![],
        }
    }

    fn populated() -> Timetable {
        let mut tt = Timetable::from_record(sample_record()).unwrap();
        tt.assign_teacher("08:00-08:45", "English", "T1").unwrap();
        tt.assign_child("08:00-08:45", "English", "C2").unwrap();
        tt.assign_child("08:00-08:45", "English", "C1").unwrap();
        tt.assign_child("09:00-09:45", "Mathematics", "C1").unwrap();
        tt.assign_teacher("09:00-09:45", "English", "T2").unwrap();
        tt
    }

    #[test]
    fn test_to_record_is_sparse_and_grid_ordered() {
        let record = populated().to_record();
        let keys: Vec<_> = record
            .cells
            .iter()
            .map(|c| (c.slot_id.as_str(), c.subject_id.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("08:00-08:45", "English"),
                ("09:00-09:45", "English"),
                ("09:00-09:45", "Mathematics"),
            ]
        );
        assert_eq!(record.cells[0].child_ids, vec!["C2", "C1"]);
        assert_eq!(record.cells[2].teacher_id, None);
    }

    #[test]
    fn test_record_round_trip_preserves_cells() {
        let original = populated();
        let json = original.to_record().to_json().unwrap();
        let restored = TimetableRecord::from_json(&json)
            .unwrap()
            .into_timetable()
            .unwrap();

        for slot in original.slots() {
            for subject in original.subjects() {
                assert_eq!(
                    original.cell(&slot.id, &subject.id).unwrap(),
                    restored.cell(&slot.id, &subject.id).unwrap()
                );
            }
        }
        assert_eq!(restored.to_record(), original.to_record());
    }

    #[test]
    fn test_restored_timetable_enforces_bookings() {
        let mut restored = Timetable::from_record(populated().to_record()).unwrap();
        assert!(restored
            .assign_teacher("08:00-08:45", "Mathematics", "T1")
            .is_err());
        assert!(restored
            .assign_child("09:00-09:45", "English", "C1")
            .is_err());
    }

    #[test]
    fn test_registry_only_json() {
        let json = r#"{
            "slots": [{ "id": "P1", "label": "08:00-08:45", "order": 1 }],
            "subjects": [{ "id": "ENG", "label": "English" }],
            "people": [{ "id": "C1", "name": "Avi Levy", "role": "Child" }]
        }"#;
        let tt = TimetableRecord::from_json(json)
            .unwrap()
            .into_timetable()
            .unwrap();
        assert!(tt.is_empty());
        assert_eq!(tt.slot("P1").map(|s| s.label.as_str()), Some("08:00-08:45"));
    }

    #[test]
    fn test_cell_json_shape() {
        let cell = CellRecord::new("S1", "English").with_children(["C1"]);
        let value = serde_json::to_value(&cell).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "slot_id": "S1",
                "subject_id": "English",
                "child_ids": ["C1"]
            })
        );
    }

    #[test]
    fn test_malformed_json() {
        let err = TimetableRecord::from_json("{ not json").unwrap_err();
        assert!(matches!(err, RecordError::Json(_)));
        assert!(err.to_string().starts_with("malformed timetable document"));
    }

    #[test]
    fn test_strict_rejects_double_booking() {
        let mut record = sample_record();
        record.cells = vec![
            CellRecord::new("08:00-08:45", "English").with_teacher("T1"),
            CellRecord::new("08:00-08:45", "Mathematics").with_teacher("T1"),
        ];

        let err = Timetable::from_record(record.clone()).unwrap_err();
        let RecordError::Invalid(errors) = err else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DoubleBooking);

        let lenient = Timetable::from_record_lenient(record).unwrap();
        assert_eq!(lenient.list_conflicts().count(), 1);
    }

    #[test]
    fn test_lenient_still_rejects_bad_references() {
        let mut record = sample_record();
        record.cells = vec![CellRecord::new("08:00-08:45", "Art").with_children(["T1"])];

        let err = Timetable::from_record_lenient(record).unwrap_err();
        let RecordError::Invalid(errors) = err else {
            panic!("expected validation errors");
        };
        let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ValidationErrorKind::UnknownReference,
                ValidationErrorKind::RoleMismatch
            ]
        );
    }

    #[test]
    fn test_all_problems_reported_together() {
        let mut record = sample_record();
        record.people.push(Person::child("C1"));
        record.cells = vec![CellRecord::new("10:00", "English").with_teacher("T1")];

        let err = Timetable::from_record(record).unwrap_err();
        let RecordError::Invalid(errors) = &err else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.len(), 2);
        assert!(err.to_string().contains("Duplicate person ID: C1"));
    }

    #[test]
    fn test_empty_cell_records_are_skipped() {
        let mut record = sample_record();
        record.cells = vec![CellRecord::new("08:00-08:45", "English")];

        let tt = Timetable::from_record(record).unwrap();
        assert!(tt.is_empty());
        assert!(tt.to_record().cells.is_empty());
    }
}
