//! Configuration node graph
//!
//! A page layout is a tree of nodes: plain containers, nested pages and
//! application leaves. The set of node kinds is closed so that every walker
//! over the graph handles each kind explicitly.

use crate::model::page::Page;
use crate::owner::OwnerType;
use serde::{Deserialize, Serialize};

/// One node of a page layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigNode {
    /// Layout container holding an ordered list of children
    Container(Container),
    /// Embedded page with its own ownership
    Page(Page),
    /// Application instance
    Application(Application),
}

impl ConfigNode {
    /// Ordered children of a container or page; applications have none.
    pub fn children(&self) -> &[ConfigNode] {
        match self {
            ConfigNode::Container(container) => &container.children,
            ConfigNode::Page(page) => &page.children,
            ConfigNode::Application(_) => &[],
        }
    }
}

impl From<Container> for ConfigNode {
    fn from(container: Container) -> Self {
        ConfigNode::Container(container)
    }
}

impl From<Page> for ConfigNode {
    fn from(page: Page) -> Self {
        ConfigNode::Page(page)
    }
}

impl From<Application> for ConfigNode {
    fn from(application: Application) -> Self {
        ConfigNode::Application(application)
    }
}

/// Layout container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    /// Storage identifier, when persisted
    #[serde(default)]
    pub id: Option<String>,
    /// Container name
    #[serde(default)]
    pub name: Option<String>,
    /// Children in display order
    #[serde(default)]
    pub children: Vec<ConfigNode>,
}

impl Container {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child.
    pub fn with_child(mut self, child: impl Into<ConfigNode>) -> Self {
        self.children.push(child.into());
        self
    }
}

/// Application instance embedded in a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Storage identifier, when persisted
    #[serde(default)]
    pub id: Option<String>,
    /// Display title
    #[serde(default)]
    pub title: Option<String>,
    /// Instance state
    pub state: ApplicationState,
}

impl Application {
    /// Create an application with the given state.
    pub fn new(state: ApplicationState) -> Self {
        Self {
            id: None,
            title: None,
            state,
        }
    }

    /// Create an application with a fresh, unowned transient state.
    pub fn transient(content_id: impl Into<String>) -> Self {
        Self::new(ApplicationState::Transient(TransientState::new(content_id)))
    }
}

/// State of an application instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ApplicationState {
    /// Not yet persisted; carries the ownership it will be stored under
    Transient(TransientState),
    /// Stored state, opaque here
    Persistent {
        /// Storage identifier of the state
        storage_id: String,
    },
    /// State shared by reference with another instance, opaque here
    Cloned {
        /// Storage identifier of the source state
        storage_id: String,
    },
}

/// State of an application instance that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransientState {
    /// Application content identifier (e.g. `web/HomePagePortlet`)
    pub content_id: String,
    /// Owner type the state will be persisted under
    #[serde(default)]
    pub owner_type: Option<OwnerType>,
    /// Owner id the state will be persisted under
    #[serde(default)]
    pub owner_id: Option<String>,
}

impl TransientState {
    /// Create an unowned transient state.
    pub fn new(content_id: impl Into<String>) -> Self {
        Self {
            content_id: content_id.into(),
            owner_type: None,
            owner_id: None,
        }
    }

    /// Create a transient state already pinned to an owner.
    pub fn owned(
        content_id: impl Into<String>,
        owner_type: OwnerType,
        owner_id: impl Into<String>,
    ) -> Self {
        Self {
            content_id: content_id.into(),
            owner_type: Some(owner_type),
            owner_id: Some(owner_id.into()),
        }
    }

    /// Whether either owner field has been set.
    pub fn is_pinned(&self) -> bool {
        self.owner_type.is_some() || self.owner_id.is_some()
    }
}
