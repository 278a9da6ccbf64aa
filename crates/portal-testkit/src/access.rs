//! Rule-based access decider for tests
//!
//! Decisions are looked up per `(permission, principal, resource)`: an
//! explicit rule for the principal wins over a rule for `ANYONE`, which wins
//! over the default. The super-identity is granted everything.

use portal_core::{
    AccessDecider, AccessTarget, OwnerKey, OwnerType, PageId, PortalSettings,
};
use std::collections::HashMap;

/// Principal matching every identity, including anonymous access.
pub const ANYONE: &str = "*";

/// Principal rules apply to when no identity is given.
pub const ANONYMOUS: &str = "";

/// Kind of access being decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Read access
    View,
    /// Write access
    Edit,
}

/// Object a rule applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Portal descriptor by scope key
    Portal(OwnerKey),
    /// Page by reference
    Page(PageId),
    /// Navigation tree by scope key
    Navigation(OwnerKey),
}

impl Resource {
    /// Site portal `name`.
    pub fn portal(name: &str) -> Self {
        Resource::Portal(OwnerKey::portal(name))
    }

    /// Navigation tree of a scope.
    pub fn navigation(owner_type: OwnerType, owner_id: &str) -> Self {
        Resource::Navigation(OwnerKey::new(owner_type, owner_id))
    }

    /// Page by reference.
    pub fn page(id: PageId) -> Self {
        Resource::Page(id)
    }

    fn of(target: AccessTarget<'_>) -> Self {
        match target {
            AccessTarget::Portal(portal) => Resource::Portal(portal.key()),
            AccessTarget::Page(page) => Resource::Page(page.page_id()),
            AccessTarget::Navigation(navigation) => Resource::Navigation(navigation.key()),
        }
    }
}

/// Access decider driven by explicit rules.
#[derive(Debug, Clone)]
pub struct AccessRules {
    default_view: bool,
    default_edit: bool,
    rules: HashMap<(Permission, String, Resource), bool>,
    super_identity: String,
    guest_group: String,
    makable_membership_type: String,
}

impl AccessRules {
    fn with_defaults(default_view: bool, default_edit: bool) -> Self {
        let settings = PortalSettings::default();
        Self {
            default_view,
            default_edit,
            rules: HashMap::new(),
            super_identity: settings.super_identity,
            guest_group: settings.guest_group,
            makable_membership_type: settings.makable_membership_type,
        }
    }

    /// Grant everything unless a rule says otherwise.
    pub fn allow_all() -> Self {
        Self::with_defaults(true, true)
    }

    /// Deny everything unless a rule says otherwise.
    pub fn deny_all() -> Self {
        Self::with_defaults(false, false)
    }

    /// Grant view, deny edit, unless a rule says otherwise.
    pub fn view_only() -> Self {
        Self::with_defaults(true, false)
    }

    /// Take the distinguished identifiers from `settings`.
    pub fn with_settings(mut self, settings: &PortalSettings) -> Self {
        self.super_identity = settings.super_identity.clone();
        self.guest_group = settings.guest_group.clone();
        self.makable_membership_type = settings.makable_membership_type.clone();
        self
    }

    /// Override the super-identity.
    pub fn with_super_identity(mut self, identity: impl Into<String>) -> Self {
        self.super_identity = identity.into();
        self
    }

    /// Grant `permission` on `resource` to `principal`.
    pub fn allow(self, permission: Permission, principal: &str, resource: Resource) -> Self {
        self.rule(permission, principal, resource, true)
    }

    /// Deny `permission` on `resource` to `principal`.
    pub fn deny(self, permission: Permission, principal: &str, resource: Resource) -> Self {
        self.rule(permission, principal, resource, false)
    }

    fn rule(mut self, permission: Permission, principal: &str, resource: Resource, granted: bool) -> Self {
        self.rules
            .insert((permission, principal.to_string(), resource), granted);
        self
    }

    fn decide(&self, permission: Permission, identity: Option<&str>, target: AccessTarget<'_>) -> bool {
        if identity == Some(self.super_identity.as_str()) {
            return true;
        }
        let resource = Resource::of(target);
        let principal = identity.unwrap_or(ANONYMOUS);
        let lookup = |who: &str| {
            self.rules
                .get(&(permission, who.to_string(), resource.clone()))
                .copied()
        };
        lookup(principal)
            .or_else(|| lookup(ANYONE))
            .unwrap_or(match permission {
                Permission::View => self.default_view,
                Permission::Edit => self.default_edit,
            })
    }
}

impl AccessDecider for AccessRules {
    fn has_view_permission(&self, identity: Option<&str>, target: AccessTarget<'_>) -> bool {
        self.decide(Permission::View, identity, target)
    }

    fn has_edit_permission(&self, identity: Option<&str>, target: AccessTarget<'_>) -> bool {
        self.decide(Permission::Edit, identity, target)
    }

    fn super_identity(&self) -> String {
        self.super_identity.clone()
    }

    fn guest_group_id(&self) -> String {
        self.guest_group.clone()
    }

    fn makable_membership_type(&self) -> String {
        self.makable_membership_type.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::{NavigationTree, PortalDescriptor};

    #[test]
    fn test_rule_precedence() {
        let portal = PortalDescriptor::new("classic");
        let rules = AccessRules::allow_all()
            .deny(Permission::View, ANYONE, Resource::portal("classic"))
            .allow(Permission::View, "mary", Resource::portal("classic"));

        assert!(rules.has_view_permission(Some("mary"), AccessTarget::Portal(&portal)));
        assert!(!rules.has_view_permission(Some("john"), AccessTarget::Portal(&portal)));
        assert!(!rules.has_view_permission(None, AccessTarget::Portal(&portal)));
        assert!(rules.has_view_permission(Some("root"), AccessTarget::Portal(&portal)));
    }

    #[test]
    fn test_defaults() {
        let tree = NavigationTree::new(OwnerType::Group, "/platform/users", 5);
        let rules = AccessRules::view_only();
        assert!(rules.has_view_permission(Some("mary"), AccessTarget::Navigation(&tree)));
        assert!(!rules.has_edit_permission(Some("mary"), AccessTarget::Navigation(&tree)));
    }
}
