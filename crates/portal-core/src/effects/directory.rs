//! Organizational directory contract

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for directory lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// The directory could not be reached or failed
    #[error("directory unavailable: {message}")]
    Unavailable {
        /// Description of the failure
        message: String,
    },
}

impl DirectoryError {
    /// Create an unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Organizational group as reported by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Group {
    id: String,
    /// Display label
    #[serde(default)]
    pub label: Option<String>,
}

impl Group {
    /// Create a group. The id is kept verbatim; consumers trim it.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
        }
    }

    /// Group identifier, e.g. `/platform/users`.
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Group enumeration contract.
pub trait DirectoryLookup: Send + Sync {
    /// Every group in the directory.
    fn all_groups(&self) -> Result<Vec<Group>, DirectoryError>;

    /// Groups `identity` belongs to, with any membership type.
    fn groups_of(&self, identity: &str) -> Result<Vec<Group>, DirectoryError>;

    /// Groups where `identity` holds a membership of `membership_type`.
    fn groups_by_membership(
        &self,
        identity: &str,
        membership_type: &str,
    ) -> Result<Vec<Group>, DirectoryError>;
}
