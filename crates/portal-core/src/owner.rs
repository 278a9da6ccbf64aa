//! Ownership scopes
//!
//! Every portal descriptor, page and navigation tree belongs to exactly one
//! scope, addressed by an `(OwnerType, owner id)` pair.

use crate::errors::PortalError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The ownership dimension a configuration object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerType {
    /// Site-wide scope, owned by a portal
    Portal,
    /// Scope owned by an organizational group
    Group,
    /// Personal scope of a single identity
    User,
}

impl OwnerType {
    /// All owner types, in resolution order.
    pub const ALL: [OwnerType; 3] = [OwnerType::Portal, OwnerType::User, OwnerType::Group];

    /// Stable wire name of the owner type.
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerType::Portal => "portal",
            OwnerType::Group => "group",
            OwnerType::User => "user",
        }
    }
}

impl fmt::Display for OwnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OwnerType {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "portal" => Ok(OwnerType::Portal),
            "group" => Ok(OwnerType::Group),
            "user" => Ok(OwnerType::User),
            other => Err(PortalError::invalid(format!("unknown owner type '{other}'"))),
        }
    }
}

/// Scope key of a configuration object.
///
/// The owner id is trimmed on construction so that directory identifiers with
/// stray whitespace address the same scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwnerKey {
    /// Scope dimension
    pub owner_type: OwnerType,
    /// Scope identifier (portal name, group id or identity)
    pub owner_id: String,
}

impl OwnerKey {
    /// Create a scope key, trimming the owner id.
    pub fn new(owner_type: OwnerType, owner_id: impl AsRef<str>) -> Self {
        Self {
            owner_type,
            owner_id: owner_id.as_ref().trim().to_string(),
        }
    }

    /// Key of a portal-wide scope.
    pub fn portal(name: impl AsRef<str>) -> Self {
        Self::new(OwnerType::Portal, name)
    }

    /// Key of a group scope.
    pub fn group(group_id: impl AsRef<str>) -> Self {
        Self::new(OwnerType::Group, group_id)
    }

    /// Key of a personal scope.
    pub fn user(identity: impl AsRef<str>) -> Self {
        Self::new(OwnerType::User, identity)
    }
}

impl fmt::Display for OwnerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.owner_type, self.owner_id)
    }
}
