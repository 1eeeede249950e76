//! Weekly class timetable model.
//!
//! Backs a drag-and-drop timetable grid (time slots x subjects) with a
//! validated data model: people are dropped onto cells, and every drop is
//! checked before it is applied.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Person`, `Role`, `TimeSlot`, `Subject`,
//!   `Timetable`, and the read views `CellView`, `GridRow`, `PersonBooking`
//! - **`error`**: `AssignError`, returned by every rejected drop
//! - **`validation`**: Registry and record integrity checks (duplicate IDs,
//!   dangling references, role mismatches, double-bookings)
//! - **`conflicts`**: Lazy double-booking scan over a timetable
//! - **`record`**: Storable form, JSON encoding, reconstruction
//! - **`summary`**: Fill rate and per-person load
//! - **`presets`**: Ready-made school week registries
//! - **`shared`**: Lock-guarded handle for multi-threaded hosts
//!
//! # Rules
//!
//! A cell holds at most one teacher and any number of children. Nobody may
//! occupy two subjects in the same slot. Cells with nobody in them are not
//! stored.
//!
//! ```
//! use class_timetable::{AssignError, Person, Subject, TimeSlot, Timetable};
//!
//! let mut tt = Timetable::new(
//!     vec![TimeSlot::new("08:00-08:45", 1), TimeSlot::new("09:00-09:45", 2)],
//!     vec![Subject::new("English"), Subject::new("Mathematics")],
//!     vec![Person::teacher("T1")],
//! )
//! .unwrap();
//!
//! tt.assign_teacher("08:00-08:45", "English", "T1").unwrap();
//! let err = tt.assign_teacher("08:00-08:45", "Mathematics", "T1").unwrap_err();
//! assert!(matches!(err, AssignError::DoubleBooked { .. }));
//! assert!(tt.cell("08:00-08:45", "Mathematics").unwrap().teacher.is_none());
//! ```

pub mod conflicts;
pub mod error;
pub mod models;
pub mod presets;
pub mod record;
pub mod shared;
pub mod summary;
pub mod validation;

pub use conflicts::{ConflictReport, Conflicts};
pub use error::{AssignError, AssignResult};
pub use models::{CellView, GridRow, Person, PersonBooking, Role, Subject, TimeSlot, Timetable};
pub use record::{CellRecord, RecordError, TimetableRecord};
pub use shared::SharedTimetable;
pub use summary::TimetableSummary;
pub use validation::{ValidationError, ValidationErrorKind, ValidationResult};
