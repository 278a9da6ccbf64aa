//! Multi-scope navigation resolution
//!
//! For a portal and an optional identity, collects the navigation trees the
//! identity is entitled to see:
//!
//! 1. the portal scope, editable when the identity may edit the portal;
//! 2. with an identity, its personal scope, always editable;
//! 3. with an identity, one scope per group (all groups for the
//!    super-identity), never the guest group, each editable per the access
//!    decider.
//!
//! The result is stably sorted by ascending priority, so ties keep the
//! portal, personal, group discovery order. Anonymous requests only get the
//! portal scope; guest-group navigation is not aggregated for them.

use portal_core::{
    AccessDecider, AccessTarget, AclIdentities, ConfigStore, DirectoryLookup, NavigationTree,
    OwnerType, PortalDescriptor, PortalResult,
};
use std::collections::HashSet;
use std::sync::Arc;

/// Resolves the effective navigation of an identity for a portal.
#[derive(Clone)]
pub struct NavigationResolver {
    store: Arc<dyn ConfigStore>,
    access: Arc<dyn AccessDecider>,
    directory: Arc<dyn DirectoryLookup>,
    identities: AclIdentities,
}

impl std::fmt::Debug for NavigationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationResolver")
            .field("identities", &self.identities)
            .finish_non_exhaustive()
    }
}

impl NavigationResolver {
    /// Create a resolver; the distinguished identifiers are read from
    /// `access` once, here, unless replaced with `with_identities`.
    pub fn new(
        store: Arc<dyn ConfigStore>,
        access: Arc<dyn AccessDecider>,
        directory: Arc<dyn DirectoryLookup>,
    ) -> Self {
        let identities = AclIdentities::from_decider(access.as_ref());
        Self {
            store,
            access,
            directory,
            identities,
        }
    }

    /// Use `identities` instead of the identifiers reported by the decider.
    pub fn with_identities(mut self, identities: AclIdentities) -> Self {
        self.identities = identities;
        self
    }

    /// Distinguished identifiers in effect.
    pub fn identities(&self) -> &AclIdentities {
        &self.identities
    }

    /// Ordered navigation for `identity` on `portal_name`, or `None` when the
    /// portal does not exist or may not be viewed.
    pub fn resolve(
        &self,
        portal_name: &str,
        identity: Option<&str>,
    ) -> PortalResult<Option<Vec<NavigationTree>>> {
        match self.viewable_portal(portal_name, identity)? {
            Some(portal) => self.navigations_for(&portal, identity).map(Some),
            None => Ok(None),
        }
    }

    /// Load the portal descriptor if it exists and `identity` may view it.
    pub fn viewable_portal(
        &self,
        portal_name: &str,
        identity: Option<&str>,
    ) -> PortalResult<Option<PortalDescriptor>> {
        let Some(portal) = self.store.get_portal_by_name(portal_name)? else {
            tracing::debug!(portal = portal_name, "portal not found");
            return Ok(None);
        };
        if !self
            .access
            .has_view_permission(identity, AccessTarget::Portal(&portal))
        {
            tracing::debug!(portal = portal_name, identity = ?identity, "portal view denied");
            return Ok(None);
        }
        Ok(Some(portal))
    }

    /// Ordered navigation for `identity` on an already authorized portal.
    pub fn navigations_for(
        &self,
        portal: &PortalDescriptor,
        identity: Option<&str>,
    ) -> PortalResult<Vec<NavigationTree>> {
        let mut navigations = Vec::new();

        if let Some(mut navigation) = self.store.get_navigation(OwnerType::Portal, &portal.name)? {
            let modifiable = self
                .access
                .has_edit_permission(identity, AccessTarget::Portal(portal));
            navigation.set_modifiable(modifiable);
            navigations.push(navigation);
        }

        if let Some(identity) = identity {
            self.collect_identity_scopes(identity, &mut navigations)?;
        }

        navigations.sort_by_key(|navigation| navigation.priority);

        tracing::debug!(
            portal = %portal.name,
            identity = ?identity,
            scopes = navigations.len(),
            "navigation resolved"
        );
        Ok(navigations)
    }

    fn collect_identity_scopes(
        &self,
        identity: &str,
        navigations: &mut Vec<NavigationTree>,
    ) -> PortalResult<()> {
        let identity = identity.trim();
        if let Some(mut personal) = self.store.get_navigation(OwnerType::User, identity)? {
            personal.set_modifiable(true);
            navigations.push(personal);
        }

        let groups = if self.identities.is_super_identity(identity) {
            self.directory.all_groups()?
        } else {
            self.directory.groups_of(identity)?
        };

        let mut seen = HashSet::with_capacity(groups.len());
        for group in &groups {
            let group_id = group.id().trim();
            if self.identities.is_guest_group(group_id) || !seen.insert(group_id) {
                continue;
            }
            let Some(mut navigation) = self.store.get_navigation(OwnerType::Group, group_id)? else {
                continue;
            };
            let modifiable = self
                .access
                .has_edit_permission(Some(identity), AccessTarget::Navigation(&navigation));
            navigation.set_modifiable(modifiable);
            navigations.push(navigation);
        }
        Ok(())
    }
}
