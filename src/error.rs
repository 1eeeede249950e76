//! Assignment errors.
//!
//! Every variant is a recoverable validation failure. A caller such as a
//! drop handler rejects the gesture and shows the message.

use thiserror::Error;

use crate::models::Role;

/// Why a cell read or mutation was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignError {
    /// Slot or subject is not registered.
    #[error("no cell at slot '{slot_id}', subject '{subject_id}'")]
    UnknownCell { slot_id: String, subject_id: String },

    /// Person is not registered.
    #[error("unknown person '{0}'")]
    UnknownPerson(String),

    /// Person has the other role.
    #[error("'{person_id}' is a {actual}, expected a {expected}")]
    WrongRole {
        person_id: String,
        expected: Role,
        actual: Role,
    },

    /// Person already occupies another subject in the same slot.
    #[error("'{person_id}' is already booked for '{subject_id}' at '{slot_id}'")]
    DoubleBooked {
        person_id: String,
        slot_id: String,
        subject_id: String,
    },
}

pub type AssignResult<T> = Result<T, AssignError>;

impl AssignError {
    pub(crate) fn unknown_cell(slot_id: &str, subject_id: &str) -> Self {
        Self::UnknownCell {
            slot_id: slot_id.to_string(),
            subject_id: subject_id.to_string(),
        }
    }
}
