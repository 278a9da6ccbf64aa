//! Ownership rewrite over page layouts
//!
//! Pages reached by the walk always take the new owner. Transient application
//! states take it only while both of their owner fields are unset, so the
//! first assignment wins. The walk is pre-order and mutates in place.
//!
//! The layout is a tree by construction; a cycle would make the walk diverge.

use portal_core::{Application, ApplicationState, ConfigNode, OwnerType, Page};

/// Rewrites ownership of a layout graph to one target scope.
#[derive(Debug, Clone, Copy)]
pub struct OwnershipRewriter<'a> {
    owner_type: OwnerType,
    owner_id: &'a str,
}

impl<'a> OwnershipRewriter<'a> {
    /// Target `(owner_type, owner_id)`; the id is trimmed.
    pub fn new(owner_type: OwnerType, owner_id: &'a str) -> Self {
        Self {
            owner_type,
            owner_id: owner_id.trim(),
        }
    }

    /// Rewrite `node` and everything below it.
    pub fn rewrite(&self, node: &mut ConfigNode) {
        match node {
            ConfigNode::Container(container) => self.rewrite_children(&mut container.children),
            ConfigNode::Page(page) => self.rewrite_page(page),
            ConfigNode::Application(application) => self.rewrite_application(application),
        }
    }

    /// Rewrite a page root: the page itself, then its layout.
    pub fn rewrite_page(&self, page: &mut Page) {
        page.owner_type = self.owner_type;
        page.owner_id = self.owner_id.to_string();
        self.rewrite_children(&mut page.children);
    }

    fn rewrite_children(&self, children: &mut [ConfigNode]) {
        for child in children {
            self.rewrite(child);
        }
    }

    fn rewrite_application(&self, application: &mut Application) {
        match &mut application.state {
            ApplicationState::Transient(state) => {
                if !state.is_pinned() {
                    state.owner_type = Some(self.owner_type);
                    state.owner_id = Some(self.owner_id.to_string());
                }
            }
            ApplicationState::Persistent { .. } | ApplicationState::Cloned { .. } => {}
        }
    }
}

/// Rewrite ownership of `node` and its subtree to `(owner_type, owner_id)`.
pub fn rewrite_ownership(node: &mut ConfigNode, owner_type: OwnerType, owner_id: &str) {
    OwnershipRewriter::new(owner_type, owner_id).rewrite(node);
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::{Container, TransientState};

    fn transient_owner(node: &ConfigNode) -> (Option<OwnerType>, Option<String>) {
        match node {
            ConfigNode::Application(Application {
                state: ApplicationState::Transient(state),
                ..
            }) => (state.owner_type, state.owner_id.clone()),
            other => panic!("expected transient application, got {other:?}"),
        }
    }

    #[test]
    fn test_rewrite_reaches_nested_pages_and_applications() {
        let mut node = ConfigNode::from(
            Container::new()
                .with_child(Application::transient("web/Banner"))
                .with_child(
                    Page::new(OwnerType::Portal, "classic", "nested")
                        .with_child(Container::new().with_child(Application::transient("web/Footer")).into()),
                ),
        );

        rewrite_ownership(&mut node, OwnerType::User, "mary");

        let children = node.children();
        assert_eq!(
            transient_owner(&children[0]),
            (Some(OwnerType::User), Some("mary".into()))
        );
        let ConfigNode::Page(page) = &children[1] else {
            panic!("expected page");
        };
        assert_eq!(page.owner_type, OwnerType::User);
        assert_eq!(page.owner_id, "mary");
        assert_eq!(
            transient_owner(&page.children[0].children()[0]),
            (Some(OwnerType::User), Some("mary".into()))
        );
    }

    #[test]
    fn test_pinned_transient_state_is_untouched() {
        let pinned = TransientState {
            content_id: "web/Login".into(),
            owner_type: None,
            owner_id: Some("john".into()),
        };
        let mut node = ConfigNode::from(Application::new(ApplicationState::Transient(pinned)));

        rewrite_ownership(&mut node, OwnerType::Group, "/platform/users");

        assert_eq!(transient_owner(&node), (None, Some("john".into())));
    }

    #[test]
    fn test_opaque_states_are_untouched() {
        let mut node = ConfigNode::from(Application::new(ApplicationState::Persistent {
            storage_id: "42".into(),
        }));
        let before = node.clone();

        rewrite_ownership(&mut node, OwnerType::User, "mary");

        assert_eq!(node, before);
    }
}
