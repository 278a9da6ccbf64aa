//! Navigation trees
//!
//! A navigation tree is the menu of one scope. Trees of several scopes are
//! merged per identity by the navigation resolver.

use crate::owner::{OwnerKey, OwnerType};
use serde::{Deserialize, Serialize};

/// Navigation of a single ownership scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTree {
    /// Scope dimension of the tree
    pub owner_type: OwnerType,
    /// Scope identifier, always trimmed
    pub owner_id: String,
    /// Sort key within a resolution; lower sorts first
    #[serde(default)]
    pub priority: i32,
    /// Top-level nodes in display order
    #[serde(default)]
    pub nodes: Vec<NavNode>,
    /// Whether the resolving identity may edit this tree.
    ///
    /// Derived per resolution and never persisted.
    #[serde(skip)]
    modifiable: bool,
}

impl NavigationTree {
    /// Create an empty tree for the given scope.
    pub fn new(owner_type: OwnerType, owner_id: impl AsRef<str>, priority: i32) -> Self {
        Self {
            owner_type,
            owner_id: owner_id.as_ref().trim().to_string(),
            priority,
            nodes: Vec::new(),
            modifiable: false,
        }
    }

    /// Append a top-level node.
    pub fn with_node(mut self, node: NavNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Scope key of this tree.
    pub fn key(&self) -> OwnerKey {
        OwnerKey::new(self.owner_type, &self.owner_id)
    }

    /// Whether the resolving identity may edit this tree.
    pub fn is_modifiable(&self) -> bool {
        self.modifiable
    }

    /// Record the edit decision for the current resolution.
    pub fn set_modifiable(&mut self, modifiable: bool) {
        self.modifiable = modifiable;
    }
}

/// Named entry of a navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavNode {
    /// Node name, used in URLs
    pub name: String,
    /// Display label
    pub label: String,
    /// Page reference (`ownerType::ownerId::name`) rendered by this node
    #[serde(default)]
    pub page_reference: Option<String>,
    /// Nested nodes
    #[serde(default)]
    pub children: Vec<NavNode>,
}

impl NavNode {
    /// Create a node without a page.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            page_reference: None,
            children: Vec::new(),
        }
    }

    /// Point this node at a page.
    pub fn with_page_reference(mut self, page_reference: impl Into<String>) -> Self {
        self.page_reference = Some(page_reference.into());
        self
    }

    /// Append a child node.
    pub fn with_child(mut self, child: NavNode) -> Self {
        self.children.push(child);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiable_is_not_serialized() {
        let mut tree = NavigationTree::new(OwnerType::User, "mary", 10);
        tree.set_modifiable(true);

        let json = serde_json::to_string(&tree).unwrap();
        assert!(!json.contains("modifiable"));

        let restored: NavigationTree = serde_json::from_str(&json).unwrap();
        assert!(!restored.is_modifiable());
    }

    #[test]
    fn test_owner_id_is_trimmed() {
        let tree = NavigationTree::new(OwnerType::Portal, " classic ", 1).with_node(
            NavNode::new("home", "Home").with_child(NavNode::new("news", "News")),
        );

        assert_eq!(tree.owner_id, "classic");
        assert_eq!(tree.key().to_string(), "portal::classic");
        assert_eq!(tree.nodes[0].children[0].label, "News");
    }
}
