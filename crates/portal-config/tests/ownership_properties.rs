//! Property Tests for Ownership Rewriting
//!
//! Checks the rewrite over generated page layouts:
//! - Every reachable page takes the target owner
//! - Transient states keep the first owner they were given
//! - Persistent and cloned states are left alone
//! - Rewriting twice to the same target changes nothing

use portal_config::{rewrite_ownership, OwnershipRewriter};
use portal_core::{ApplicationState, ConfigNode, OwnerType, Page, TransientState};
use portal_testkit::strategies::{arb_config_node, arb_owner_id, arb_owner_type};
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

/// Pre-order walk collecting pages and application states
fn collect<'a>(
    node: &'a ConfigNode,
    pages: &mut Vec<&'a Page>,
    states: &mut Vec<&'a ApplicationState>,
) {
    match node {
        ConfigNode::Page(page) => pages.push(page),
        ConfigNode::Application(application) => states.push(&application.state),
        ConfigNode::Container(_) => {}
    }
    for child in node.children() {
        collect(child, pages, states);
    }
}

fn walk(node: &ConfigNode) -> (Vec<&Page>, Vec<&ApplicationState>) {
    let mut pages = Vec::new();
    let mut states = Vec::new();
    collect(node, &mut pages, &mut states);
    (pages, states)
}

fn owned_by(state: &TransientState, owner_type: OwnerType, owner_id: &str) -> bool {
    state.owner_type == Some(owner_type) && state.owner_id.as_deref() == Some(owner_id)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_rewrite_assigns_pages_and_unpinned_states(
        node in arb_config_node(),
        owner_type in arb_owner_type(),
        owner_id in arb_owner_id(),
    ) {
        let mut rewritten = node.clone();
        rewrite_ownership(&mut rewritten, owner_type, &owner_id);
        let target_id = owner_id.trim();

        let (_, before) = walk(&node);
        let (pages, after) = walk(&rewritten);
        prop_assert_eq!(before.len(), after.len());

        for page in pages {
            prop_assert_eq!(page.owner_type, owner_type);
            prop_assert_eq!(page.owner_id.as_str(), target_id);
        }

        for (old, new) in before.into_iter().zip(after) {
            match (old, new) {
                (ApplicationState::Transient(old), ApplicationState::Transient(new)) => {
                    if old.is_pinned() {
                        prop_assert_eq!(old, new);
                    } else {
                        prop_assert!(owned_by(new, owner_type, target_id));
                        prop_assert_eq!(&old.content_id, &new.content_id);
                    }
                }
                (old, new) => prop_assert_eq!(old, new),
            }
        }
    }

    #[test]
    fn prop_first_transient_owner_wins(
        node in arb_config_node(),
        first in (arb_owner_type(), arb_owner_id()),
        second in (arb_owner_type(), arb_owner_id()),
    ) {
        let mut once = node.clone();
        rewrite_ownership(&mut once, first.0, &first.1);
        let mut twice = once.clone();
        rewrite_ownership(&mut twice, second.0, &second.1);

        let (_, once_states) = walk(&once);
        let (pages, twice_states) = walk(&twice);

        // Transient states are pinned after the first pass.
        prop_assert_eq!(once_states, twice_states);
        for page in pages {
            prop_assert_eq!(page.owner_type, second.0);
            prop_assert_eq!(page.owner_id.as_str(), second.1.trim());
        }
    }

    #[test]
    fn prop_rewrite_is_idempotent(
        node in arb_config_node(),
        owner_type in arb_owner_type(),
        owner_id in arb_owner_id(),
    ) {
        let rewriter = OwnershipRewriter::new(owner_type, &owner_id);
        let mut once = node;
        rewriter.rewrite(&mut once);
        let mut twice = once.clone();
        rewriter.rewrite(&mut twice);

        prop_assert_eq!(once, twice);
    }
}
