//! Person model.
//!
//! People are the entities dropped onto timetable cells: teachers, who run
//! a subject session, and children, who are enrolled in one. A person's
//! role is fixed at registration and decides which side of a cell they may
//! occupy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Unique person identifier.
    pub id: String,
    /// Display name. Not assumed unique.
    pub name: String,
    /// Role in the timetable.
    pub role: Role,
}

/// Person role.
///
/// A cell holds at most one teacher and any number of children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Runs a subject session.
    Teacher,
    /// Enrolled in a subject session.
    Child,
}

impl Person {
    /// Creates a new person with an empty display name.
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            role,
        }
    }

    /// Creates a teacher.
    pub fn teacher(id: impl Into<String>) -> Self {
        Self::new(id, Role::Teacher)
    }

    /// Creates a child.
    pub fn child(id: impl Into<String>) -> Self {
        Self::new(id, Role::Child)
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether this person is a teacher.
    #[inline]
    pub fn is_teacher(&self) -> bool {
        self.role == Role::Teacher
    }

    /// Whether this person is a child.
    #[inline]
    pub fn is_child(&self) -> bool {
        self.role == Role::Child
    }

    /// Name to show in a grid cell: the display name, or the id when unnamed.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Teacher => f.write_str("teacher"),
            Role::Child => f.write_str("child"),
        }
    }
}
