//! Portal descriptors

use crate::owner::{OwnerKey, OwnerType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Portal-level configuration, identified by `(owner_type, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalDescriptor {
    /// Scope the descriptor belongs to; site portals use `OwnerType::Portal`
    pub owner_type: OwnerType,
    /// Portal name, unique within its owner type
    pub name: String,
    /// Human readable label
    #[serde(default)]
    pub label: Option<String>,
    /// Default locale of the portal
    #[serde(default)]
    pub locale: Option<String>,
    /// Permission expressions granting view access
    #[serde(default)]
    pub access_permissions: Vec<String>,
    /// Permission expression granting edit access
    #[serde(default)]
    pub edit_permission: Option<String>,
    /// Free-form portal properties
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl PortalDescriptor {
    /// Create a site portal descriptor with no permissions attached.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_owner_type(OwnerType::Portal, name)
    }

    /// Create a descriptor owned by the given scope dimension.
    pub fn with_owner_type(owner_type: OwnerType, name: impl Into<String>) -> Self {
        Self {
            owner_type,
            name: name.into(),
            label: None,
            locale: None,
            access_permissions: Vec::new(),
            edit_permission: None,
            properties: BTreeMap::new(),
        }
    }

    /// Set the view permission expressions.
    pub fn with_access_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.access_permissions = permissions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the edit permission expression.
    pub fn with_edit_permission(mut self, permission: impl Into<String>) -> Self {
        self.edit_permission = Some(permission.into());
        self
    }

    /// Scope key of this descriptor.
    pub fn key(&self) -> OwnerKey {
        OwnerKey::new(self.owner_type, &self.name)
    }
}
