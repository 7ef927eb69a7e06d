//! Contestant data structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a contestant (used in matchups and lookups).
pub type ContestantId = Uuid;

/// Display name of the placeholder contestant that absorbs an odd field.
pub const PLACEHOLDER_NAME: &str = "Bye";

/// A contestant in the tournament. The id never changes; the name may be edited.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Contestant {
    pub id: ContestantId,
    pub name: String,
}

impl Contestant {
    /// Create a new contestant with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    /// The non-scoring stand-in paired with whoever would otherwise sit out.
    /// One is created per tournament and passed explicitly to the engines.
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_NAME)
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}
