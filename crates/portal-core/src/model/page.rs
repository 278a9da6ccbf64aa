//! Pages and page references

use crate::errors::PortalError;
use crate::model::node::ConfigNode;
use crate::owner::OwnerType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page reference of the form `ownerType::ownerId::name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PageId {
    /// Scope dimension of the page
    pub owner_type: OwnerType,
    /// Scope identifier of the page
    pub owner_id: String,
    /// Page name within the scope
    pub name: String,
}

impl PageId {
    /// Create a page reference.
    pub fn new(owner_type: OwnerType, owner_id: impl AsRef<str>, name: impl Into<String>) -> Self {
        Self {
            owner_type,
            owner_id: owner_id.as_ref().trim().to_string(),
            name: name.into(),
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.owner_type, self.owner_id, self.name)
    }
}

impl FromStr for PageId {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, "::");
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner_type), Some(owner_id), Some(name)) if !name.is_empty() => {
                Ok(Self::new(owner_type.parse()?, owner_id, name))
            }
            _ => Err(PortalError::invalid(format!("malformed page reference '{s}'"))),
        }
    }
}

/// A page: a container with its own ownership identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Scope dimension of the page
    pub owner_type: OwnerType,
    /// Scope identifier of the page
    pub owner_id: String,
    /// Page name within the scope
    pub name: String,
    /// Display title
    #[serde(default)]
    pub title: Option<String>,
    /// Permission expressions granting view access
    #[serde(default)]
    pub access_permissions: Vec<String>,
    /// Permission expression granting edit access
    #[serde(default)]
    pub edit_permission: Option<String>,
    /// Layout children in display order
    #[serde(default)]
    pub children: Vec<ConfigNode>,
}

impl Page {
    /// Create an empty page.
    pub fn new(owner_type: OwnerType, owner_id: impl AsRef<str>, name: impl Into<String>) -> Self {
        Self {
            owner_type,
            owner_id: owner_id.as_ref().trim().to_string(),
            name: name.into(),
            title: None,
            access_permissions: Vec::new(),
            edit_permission: None,
            children: Vec::new(),
        }
    }

    /// Append a layout child.
    pub fn with_child(mut self, child: ConfigNode) -> Self {
        self.children.push(child);
        self
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

    /// Reference of this page.
    pub fn page_id(&self) -> PageId {
        PageId::new(self.owner_type, &self.owner_id, self.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_parse_and_display() {
        let id: PageId = "group::/platform/users::dashboard".parse().unwrap();
        assert_eq!(id.owner_type, OwnerType::Group);
        assert_eq!(id.owner_id, "/platform/users");
        assert_eq!(id.name, "dashboard");
        assert_eq!(id.to_string(), "group::/platform/users::dashboard");
    }

    #[test]
    fn test_page_id_rejects_malformed_references() {
        assert!("portal::classic".parse::<PageId>().is_err());
        assert!("portal::classic::".parse::<PageId>().is_err());
        assert!("site::classic::home".parse::<PageId>().is_err());
    }

    #[test]
    fn test_page_id_matches_page() {
        let page = Page::new(OwnerType::Portal, "classic", "homepage");
        assert_eq!(page.page_id().to_string(), "portal::classic::homepage");
    }
}
