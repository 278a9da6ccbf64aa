//! Shared portal fixtures
//!
//! `ClassicPortalFixture` seeds the deployment most tests reason about:
//!
//! | scope                   | priority | editable by `mary` |
//! |-------------------------|----------|--------------------|
//! | portal `classic`        | 1        | no                 |
//! | group `/platform/users` | 5        | no                 |
//! | user `mary`             | 10       | always             |
//! | group `/platform/guests`| 0        | yes, never served  |
//!
//! `mary` is a plain member of both groups and a manager of
//! `/platform/administrators`, which has no navigation.

use crate::access::{AccessRules, Permission, Resource, ANYONE};
use crate::directory::MemoryDirectory;
use crate::events::RecordingEventSink;
use crate::store::MemoryConfigStore;
use portal_core::{
    Application, Container, NavNode, NavigationTree, OwnerType, Page, PortalDescriptor,
    PortalSettings,
};
use std::sync::Arc;

/// Site portal name.
pub const PORTAL: &str = "classic";
/// Identity with personal and group navigation.
pub const MARY: &str = "mary";
/// Group with navigation `mary` may view but not edit.
pub const USERS_GROUP: &str = "/platform/users";
/// Group `mary` manages.
pub const ADMINISTRATORS_GROUP: &str = "/platform/administrators";
/// Plain membership type.
pub const MEMBER: &str = "member";

/// Collaborators seeded with the classic deployment.
#[derive(Debug, Clone)]
pub struct ClassicPortalFixture {
    /// Settings the collaborators were built from
    pub settings: PortalSettings,
    /// Configuration store
    pub store: Arc<MemoryConfigStore>,
    /// Access rules
    pub access: Arc<AccessRules>,
    /// Directory
    pub directory: Arc<MemoryDirectory>,
    /// Event sink
    pub events: Arc<RecordingEventSink>,
}

impl Default for ClassicPortalFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassicPortalFixture {
    /// Seed the classic deployment with default settings.
    pub fn new() -> Self {
        Self::with_settings(PortalSettings::default())
    }

    /// Seed the classic deployment, taking the distinguished identifiers
    /// from `settings`.
    pub fn with_settings(settings: PortalSettings) -> Self {
        let guest_group = settings.guest_group.clone();
        let store = MemoryConfigStore::new();

        store.insert_portal(
            PortalDescriptor::new(PORTAL)
                .with_access_permissions(["Everyone"])
                .with_edit_permission(format!(
                    "{}:{}",
                    settings.makable_membership_type, ADMINISTRATORS_GROUP
                )),
        );
        store.insert_page(
            Page::new(OwnerType::Portal, PORTAL, "homepage").with_child(
                Container::new()
                    .with_child(Application::transient("web/HomePagePortlet"))
                    .into(),
            ),
        );
        store.insert_navigation(
            NavigationTree::new(OwnerType::Portal, PORTAL, 1).with_node(
                NavNode::new("home", "Home").with_page_reference("portal::classic::homepage"),
            ),
        );
        store.insert_navigation(
            NavigationTree::new(OwnerType::User, MARY, 10)
                .with_node(NavNode::new("notes", "Notes")),
        );
        store.insert_navigation(
            NavigationTree::new(OwnerType::Group, USERS_GROUP, 5)
                .with_node(NavNode::new("directory", "Directory")),
        );
        store.insert_navigation(
            NavigationTree::new(OwnerType::Group, &guest_group, 0)
                .with_node(NavNode::new("welcome", "Welcome")),
        );

        let access = AccessRules::allow_all()
            .with_settings(&settings)
            .deny(Permission::Edit, ANYONE, Resource::portal(PORTAL))
            .deny(
                Permission::Edit,
                ANYONE,
                Resource::navigation(OwnerType::Group, USERS_GROUP),
            );

        let directory = MemoryDirectory::new()
            .with_membership(MARY, MEMBER, USERS_GROUP)
            .with_membership(MARY, MEMBER, &guest_group)
            .with_membership(MARY, settings.makable_membership_type.clone(), ADMINISTRATORS_GROUP);

        Self {
            settings,
            store: Arc::new(store),
            access: Arc::new(access),
            directory: Arc::new(directory),
            events: Arc::new(RecordingEventSink::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::{AccessDecider, AccessTarget};

    #[test]
    fn test_fixture_scopes() {
        let fixture = ClassicPortalFixture::new();
        assert!(fixture.store.portal(OwnerType::Portal, PORTAL).is_some());
        assert!(fixture.store.navigation(OwnerType::User, MARY).is_some());
        assert!(fixture
            .store
            .navigation(OwnerType::Group, "/platform/guests")
            .is_some());

        let users = fixture
            .store
            .navigation(OwnerType::Group, USERS_GROUP)
            .unwrap();
        assert!(!fixture
            .access
            .has_edit_permission(Some(MARY), AccessTarget::Navigation(&users)));
        assert!(fixture
            .access
            .has_view_permission(Some(MARY), AccessTarget::Navigation(&users)));
    }
}
