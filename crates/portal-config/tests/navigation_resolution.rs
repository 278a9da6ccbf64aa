//! Integration Tests for Navigation Resolution
//!
//! Tests the multi-scope resolver against the in-memory collaborators:
//! - Scope aggregation for identities, the super-identity and anonymous access
//! - Guest group exclusion and group de-duplication
//! - Priority ordering with stable ties
//! - Collaborator failures

use assert_matches::assert_matches;
use portal_config::NavigationResolver;
use portal_core::{NavigationTree, OwnerType, PortalDescriptor, PortalError};
use portal_testkit::fixtures::{ClassicPortalFixture, MARY, PORTAL, USERS_GROUP};
use portal_testkit::strategies::{arb_group_ids, arb_priority};
use portal_testkit::{
    AccessRules, MemoryConfigStore, MemoryDirectory, Permission, Resource, ANONYMOUS,
};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

// ============================================================================
// Test Helpers
// ============================================================================

const GUEST_GROUP: &str = "/platform/guests";

fn fixture_resolver(fixture: &ClassicPortalFixture) -> NavigationResolver {
    NavigationResolver::new(
        fixture.store.clone(),
        fixture.access.clone(),
        fixture.directory.clone(),
    )
}

fn resolver(
    store: &Arc<MemoryConfigStore>,
    rules: AccessRules,
    directory: MemoryDirectory,
) -> NavigationResolver {
    NavigationResolver::new(store.clone(), Arc::new(rules), Arc::new(directory))
}

/// Summarize resolved trees as `(owner_type, owner_id, priority, modifiable)`
fn scopes(navigations: &[NavigationTree]) -> Vec<(OwnerType, String, i32, bool)> {
    navigations
        .iter()
        .map(|n| (n.owner_type, n.owner_id.clone(), n.priority, n.is_modifiable()))
        .collect()
}

fn scope(
    owner_type: OwnerType,
    owner_id: &str,
    priority: i32,
    modifiable: bool,
) -> (OwnerType, String, i32, bool) {
    (owner_type, owner_id.to_string(), priority, modifiable)
}

// ============================================================================
// Scope Aggregation
// ============================================================================

#[test]
fn test_identity_sees_portal_group_and_personal_scopes() {
    portal_testkit::init_test_tracing();
    let fixture = ClassicPortalFixture::new();
    let resolver = fixture_resolver(&fixture);

    let navigations = resolver.resolve(PORTAL, Some(MARY)).unwrap().unwrap();

    assert_eq!(
        scopes(&navigations),
        vec![
            scope(OwnerType::Portal, PORTAL, 1, false),
            scope(OwnerType::Group, USERS_GROUP, 5, false),
            scope(OwnerType::User, MARY, 10, true),
        ]
    );
}

#[test]
fn test_anonymous_access_sees_only_the_portal_scope() {
    let fixture = ClassicPortalFixture::new();
    let resolver = fixture_resolver(&fixture);

    let navigations = resolver.resolve(PORTAL, None).unwrap().unwrap();

    assert_eq!(
        scopes(&navigations),
        vec![scope(OwnerType::Portal, PORTAL, 1, false)]
    );
}

#[test]
fn test_super_identity_sees_every_group_but_the_guests() {
    let fixture = ClassicPortalFixture::new();
    let resolver = fixture_resolver(&fixture);

    let navigations = resolver.resolve(PORTAL, Some("root")).unwrap().unwrap();

    assert_eq!(
        scopes(&navigations),
        vec![
            scope(OwnerType::Portal, PORTAL, 1, true),
            scope(OwnerType::Group, USERS_GROUP, 5, true),
        ]
    );
}

#[test]
fn test_guest_membership_never_contributes_navigation() {
    let fixture = ClassicPortalFixture::new();
    let resolver = fixture_resolver(&fixture);

    let navigations = resolver.resolve(PORTAL, Some(MARY)).unwrap().unwrap();

    assert!(navigations.iter().all(|n| n.owner_id != GUEST_GROUP));
}

#[test]
fn test_personal_scope_is_modifiable_even_when_edit_is_denied() {
    let store = Arc::new(MemoryConfigStore::new());
    store.insert_portal(PortalDescriptor::new(PORTAL));
    store.insert_navigation(NavigationTree::new(OwnerType::User, MARY, 3));
    let resolver = resolver(&store, AccessRules::view_only(), MemoryDirectory::new());

    let navigations = resolver.resolve(PORTAL, Some(MARY)).unwrap().unwrap();

    assert_eq!(scopes(&navigations), vec![scope(OwnerType::User, MARY, 3, true)]);
}

// ============================================================================
// Portal Gate
// ============================================================================

#[test]
fn test_missing_or_hidden_portal_resolves_to_none() {
    let fixture = ClassicPortalFixture::new();
    let rules = AccessRules::allow_all().deny(Permission::View, "john", Resource::portal(PORTAL));
    let resolver = resolver(&fixture.store, rules, MemoryDirectory::new());

    assert_eq!(resolver.resolve("intranet", Some(MARY)).unwrap(), None);
    assert_eq!(resolver.resolve(PORTAL, Some("john")).unwrap(), None);
    assert!(resolver.resolve(PORTAL, Some(MARY)).unwrap().is_some());
}

#[test]
fn test_anonymous_access_is_gated_by_view_permission() {
    let fixture = ClassicPortalFixture::new();
    let rules = AccessRules::allow_all().deny(Permission::View, ANONYMOUS, Resource::portal(PORTAL));
    let gated = resolver(&fixture.store, rules, MemoryDirectory::new());

    assert_eq!(gated.resolve("intranet", None).unwrap(), None);
    assert_eq!(gated.resolve(PORTAL, None).unwrap(), None);
    assert!(gated.resolve(PORTAL, Some(MARY)).unwrap().is_some());

    let closed = resolver(&fixture.store, AccessRules::deny_all(), MemoryDirectory::new());
    assert_eq!(closed.resolve(PORTAL, None).unwrap(), None);
}

#[test]
fn test_portal_without_navigation_still_resolves() {
    let store = Arc::new(MemoryConfigStore::new());
    store.insert_portal(PortalDescriptor::new(PORTAL));
    let resolver = resolver(&store, AccessRules::allow_all(), MemoryDirectory::new());

    assert_eq!(resolver.resolve(PORTAL, Some(MARY)).unwrap(), Some(Vec::new()));
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_priority_ties_keep_discovery_order() {
    let store = Arc::new(MemoryConfigStore::new());
    store.insert_portal(PortalDescriptor::new(PORTAL));
    store.insert_navigation(NavigationTree::new(OwnerType::Group, "/platform/b", 5));
    store.insert_navigation(NavigationTree::new(OwnerType::Group, "/platform/a", 5));
    store.insert_navigation(NavigationTree::new(OwnerType::User, MARY, 5));
    store.insert_navigation(NavigationTree::new(OwnerType::Portal, PORTAL, 5));

    let directory = MemoryDirectory::new()
        .with_membership(MARY, "member", "/platform/b")
        .with_membership(MARY, "member", "/platform/a");
    let resolver = resolver(&store, AccessRules::allow_all(), directory);

    let navigations = resolver.resolve(PORTAL, Some(MARY)).unwrap().unwrap();
    let owners: Vec<&str> = navigations.iter().map(|n| n.owner_id.as_str()).collect();

    assert_eq!(owners, vec![PORTAL, MARY, "/platform/b", "/platform/a"]);
}

// ============================================================================
// Collaborator Failures
// ============================================================================

#[test]
fn test_directory_failure_propagates_for_identities_only() {
    let fixture = ClassicPortalFixture::new();
    let directory = MemoryDirectory::new().unavailable("directory offline");
    let resolver = resolver(&fixture.store, AccessRules::allow_all(), directory);

    assert_matches!(
        resolver.resolve(PORTAL, Some(MARY)),
        Err(PortalError::Directory(_))
    );
    assert!(resolver.resolve(PORTAL, None).unwrap().is_some());
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_resolution_is_unique_ordered_and_guest_free(
        group_ids in arb_group_ids(6),
        group_priorities in prop::collection::vec(arb_priority(), 6),
        portal_priority in arb_priority(),
        personal_priority in proptest::option::of(arb_priority()),
        guest_member in any::<bool>(),
    ) {
        let store = Arc::new(MemoryConfigStore::new());
        store.insert_portal(PortalDescriptor::new(PORTAL));
        store.insert_navigation(NavigationTree::new(OwnerType::Portal, PORTAL, portal_priority));
        store.insert_navigation(NavigationTree::new(OwnerType::Group, GUEST_GROUP, 0));
        if let Some(priority) = personal_priority {
            store.insert_navigation(NavigationTree::new(OwnerType::User, MARY, priority));
        }

        let mut directory = MemoryDirectory::new();
        for (group_id, priority) in group_ids.iter().zip(&group_priorities) {
            store.insert_navigation(NavigationTree::new(OwnerType::Group, group_id, *priority));
            directory = directory.with_membership(MARY, "member", group_id.as_str());
        }
        if guest_member {
            directory = directory.with_membership(MARY, "member", GUEST_GROUP);
        }

        let resolver = resolver(&store, AccessRules::allow_all(), directory);
        let navigations = resolver.resolve(PORTAL, Some(MARY)).unwrap().unwrap();

        let distinct_groups: HashSet<&str> = group_ids.iter().map(|id| id.trim()).collect();
        let expected = 1 + usize::from(personal_priority.is_some()) + distinct_groups.len();
        prop_assert_eq!(navigations.len(), expected);

        let keys: HashSet<_> = navigations.iter().map(|n| n.key()).collect();
        prop_assert_eq!(keys.len(), navigations.len());

        prop_assert!(navigations.iter().all(|n| n.owner_id != GUEST_GROUP));
        prop_assert!(navigations.windows(2).all(|w| w[0].priority <= w[1].priority));
    }
}
