//! Timetable domain models.
//!
//! Provides the registry entities of a weekly class timetable and the
//! aggregate that owns them.
//!
//! # Grid Mapping
//!
//! | Model | Grid |
//! |-------|------|
//! | TimeSlot | Row |
//! | Subject | Column |
//! | Person (Teacher) | Cell owner, at most one |
//! | Person (Child) | Cell enrollee, any number |
//! | Timetable | The whole grid |

mod cell;
mod person;
mod slot;
mod timetable;

pub(crate) use cell::CellKey;
pub use cell::{CellView, GridRow, PersonBooking};
pub use person::{Person, Role};
pub use slot::{Subject, TimeSlot};
pub use timetable::Timetable;
