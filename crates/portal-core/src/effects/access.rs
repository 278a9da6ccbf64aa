//! Access decision contract
//!
//! How permission expressions are encoded and evaluated is entirely up to the
//! implementation. The service only asks yes/no questions about a concrete
//! object and an optional identity (`None` for anonymous access).

use crate::model::navigation::NavigationTree;
use crate::model::page::Page;
use crate::model::portal::PortalDescriptor;
use crate::settings::PortalSettings;

/// Object an access decision is requested for.
#[derive(Debug, Clone, Copy)]
pub enum AccessTarget<'a> {
    /// A portal descriptor
    Portal(&'a PortalDescriptor),
    /// A page
    Page(&'a Page),
    /// A navigation tree
    Navigation(&'a NavigationTree),
}

/// Permission decisions and the distinguished identifiers of the deployment.
pub trait AccessDecider: Send + Sync {
    /// Whether `identity` may view `target`.
    fn has_view_permission(&self, identity: Option<&str>, target: AccessTarget<'_>) -> bool;

    /// Whether `identity` may edit `target`.
    fn has_edit_permission(&self, identity: Option<&str>, target: AccessTarget<'_>) -> bool;

    /// Principal with unrestricted visibility across all groups.
    fn super_identity(&self) -> String;

    /// Group every visitor implicitly belongs to.
    fn guest_group_id(&self) -> String;

    /// Membership type that allows creating navigation in a group.
    fn makable_membership_type(&self) -> String;
}

/// Distinguished identifiers, fixed when the service is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AclIdentities {
    /// Principal with unrestricted group visibility
    pub super_identity: String,
    /// Guest group id, trimmed
    pub guest_group_id: String,
    /// Membership type granting navigation creation
    pub makable_membership_type: String,
}

impl AclIdentities {
    /// Snapshot the identifiers exposed by `decider`.
    pub fn from_decider(decider: &dyn AccessDecider) -> Self {
        Self {
            super_identity: decider.super_identity(),
            guest_group_id: decider.guest_group_id().trim().to_string(),
            makable_membership_type: decider.makable_membership_type(),
        }
    }

    /// Take the identifiers from validated deployment settings.
    pub fn from_settings(settings: &PortalSettings) -> Self {
        Self {
            super_identity: settings.super_identity.trim().to_string(),
            guest_group_id: settings.guest_group.trim().to_string(),
            makable_membership_type: settings.makable_membership_type.trim().to_string(),
        }
    }

    /// Whether `identity` is the super-identity.
    pub fn is_super_identity(&self, identity: &str) -> bool {
        self.super_identity == identity
    }

    /// Whether the (already trimmed) group id is the guest group.
    pub fn is_guest_group(&self, group_id: &str) -> bool {
        self.guest_group_id == group_id
    }
}
