//! Property test strategies for portal types
//!
//! Identifiers are drawn from small alphabets so that generated values
//! collide often: duplicate group memberships and repeated owners are the
//! cases worth exercising.

use proptest::prelude::*;

// Re-export proptest for convenience
pub use proptest;

use portal_core::{
    Application, ApplicationState, ConfigNode, Container, OwnerType, Page, TransientState,
};

/// Strategy for owner types.
pub fn arb_owner_type() -> impl Strategy<Value = OwnerType> {
    prop::sample::select(OwnerType::ALL.to_vec())
}

/// Strategy for identities such as `mary`.
pub fn arb_identity() -> impl Strategy<Value = String> {
    "[a-e]{1,4}"
}

/// Strategy for owner ids valid for any owner type.
pub fn arb_owner_id() -> impl Strategy<Value = String> {
    prop_oneof![arb_identity(), arb_group_id()]
}

/// Strategy for group ids under `/platform`, sometimes padded with
/// whitespace the way directory backends report them.
///
/// # Example
///
/// ```rust
/// use portal_testkit::strategies::arb_group_id;
/// use proptest::prelude::*;
///
/// proptest! {
///     #[test]
///     fn test_group_property(group_id in arb_group_id()) {
///         assert!(group_id.trim().starts_with("/platform/"));
///     }
/// }
/// ```
pub fn arb_group_id() -> impl Strategy<Value = String> {
    ("[a-d]{1,2}", prop::sample::select(vec!["", " ", "  "])).prop_map(|(name, pad)| {
        format!("{pad}/platform/{name}{pad}")
    })
}

/// Strategy for group id lists, duplicates included.
pub fn arb_group_ids(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_group_id(), 0..=max)
}

/// Strategy for navigation priorities.
pub fn arb_priority() -> impl Strategy<Value = i32> {
    -3i32..12
}

/// Strategy for transient states, pinned or not.
pub fn arb_transient_state() -> impl Strategy<Value = TransientState> {
    (
        "[a-z]{1,6}/[A-Z][a-z]{1,6}Portlet",
        proptest::option::of(arb_owner_type()),
        proptest::option::of(arb_owner_id()),
    )
        .prop_map(|(content_id, owner_type, owner_id)| TransientState {
            content_id,
            owner_type,
            owner_id,
        })
}

/// Strategy for application leaves of every state kind.
pub fn arb_application() -> impl Strategy<Value = Application> {
    prop_oneof![
        3 => arb_transient_state().prop_map(ApplicationState::Transient),
        1 => "[0-9a-f]{8}".prop_map(|storage_id| ApplicationState::Persistent { storage_id }),
        1 => "[0-9a-f]{8}".prop_map(|storage_id| ApplicationState::Cloned { storage_id }),
    ]
    .prop_map(Application::new)
}

/// Strategy for page layouts: containers and nested pages over
/// application leaves.
pub fn arb_config_node() -> impl Strategy<Value = ConfigNode> {
    let leaf = arb_application().prop_map(ConfigNode::from);
    leaf.prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(|children| {
                ConfigNode::Container(Container {
                    children,
                    ..Container::default()
                })
            }),
            (
                arb_owner_type(),
                arb_owner_id(),
                "[a-z]{1,6}",
                prop::collection::vec(inner, 0..4),
            )
                .prop_map(|(owner_type, owner_id, name, children)| {
                    let mut page = Page::new(owner_type, owner_id, name);
                    page.children = children;
                    ConfigNode::Page(page)
                }),
        ]
    })
}
