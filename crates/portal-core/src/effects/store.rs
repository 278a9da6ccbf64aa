//! Storage contract
//!
//! `ConfigStore` persists portal descriptors, pages and navigation trees and
//! runs queries over them. Retries, transactions and paging strategy belong
//! to the implementation.

use crate::model::navigation::NavigationTree;
use crate::model::page::{Page, PageId};
use crate::model::portal::PortalDescriptor;
use crate::owner::OwnerType;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

/// Error type for storage operations
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum StoreError {
    /// The object to update, remove or clone does not exist
    #[error("{what} not found")]
    NotFound {
        /// Description of the missing object
        what: String,
    },

    /// An object with the same identity already exists
    #[error("{what} already exists")]
    AlreadyExists {
        /// Description of the conflicting object
        what: String,
    },

    /// Failure of the storage backend
    #[error("backend failure: {message}")]
    Backend {
        /// Description of the failure
        message: String,
    },
}

impl StoreError {
    /// Create a not found error
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Create an already exists error
    pub fn already_exists(what: impl Into<String>) -> Self {
        Self::AlreadyExists { what: what.into() }
    }

    /// Create a backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Change recorded while saving a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum ModelChange {
    /// Node created by the save
    Create {
        /// Identifier of the node
        id: String,
    },
    /// Node updated in place
    Update {
        /// Identifier of the node
        id: String,
    },
    /// Node removed by the save
    Destroy {
        /// Identifier of the node
        id: String,
    },
}

/// Selection criteria for `find_*` queries; `None` matches anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Restrict to one scope dimension
    pub owner_type: Option<OwnerType>,
    /// Restrict to one scope identifier
    pub owner_id: Option<String>,
    /// Restrict to one object name
    pub name: Option<String>,
}

impl Query {
    /// Match every object of the given owner type.
    pub fn by_owner_type(owner_type: OwnerType) -> Self {
        Self {
            owner_type: Some(owner_type),
            ..Self::default()
        }
    }

    /// Whether an object with the given identity matches.
    pub fn matches(&self, owner_type: OwnerType, owner_id: &str, name: Option<&str>) -> bool {
        self.owner_type.map_or(true, |t| t == owner_type)
            && self.owner_id.as_deref().map_or(true, |id| id == owner_id)
            && self
                .name
                .as_deref()
                .map_or(true, |wanted| name.map_or(false, |n| n == wanted))
    }
}

/// Ordering used when listing navigation trees.
pub type NavigationComparator = dyn Fn(&NavigationTree, &NavigationTree) -> Ordering + Send + Sync;

/// Persistence and query contract for configuration objects.
pub trait ConfigStore: Send + Sync {
    /// Load a portal descriptor.
    fn get_portal(&self, owner_type: OwnerType, name: &str) -> StoreResult<Option<PortalDescriptor>>;

    /// Load a site portal descriptor by name.
    fn get_portal_by_name(&self, name: &str) -> StoreResult<Option<PortalDescriptor>> {
        self.get_portal(OwnerType::Portal, name)
    }

    /// Persist a new portal descriptor.
    fn create_portal(&self, portal: &PortalDescriptor) -> StoreResult<()>;

    /// Overwrite an existing portal descriptor.
    fn save_portal(&self, portal: &PortalDescriptor) -> StoreResult<()>;

    /// Remove a portal descriptor together with the pages and navigation it owns.
    fn remove_portal(&self, portal: &PortalDescriptor) -> StoreResult<()>;

    /// Load a page.
    fn get_page(&self, id: &PageId) -> StoreResult<Option<Page>>;

    /// Persist a new page.
    fn create_page(&self, page: &Page) -> StoreResult<()>;

    /// Overwrite an existing page, reporting what changed.
    fn save_page(&self, page: &Page) -> StoreResult<Vec<ModelChange>>;

    /// Remove a page.
    fn remove_page(&self, page: &Page) -> StoreResult<()>;

    /// Copy page `id` under a new owner and name, persist and return the copy.
    fn clone_page(
        &self,
        id: &PageId,
        owner_type: OwnerType,
        owner_id: &str,
        new_name: &str,
    ) -> StoreResult<Page>;

    /// Load the navigation tree of a scope.
    fn get_navigation(&self, owner_type: OwnerType, owner_id: &str) -> StoreResult<Option<NavigationTree>>;

    /// Persist a new navigation tree.
    fn create_navigation(&self, navigation: &NavigationTree) -> StoreResult<()>;

    /// Overwrite an existing navigation tree.
    fn save_navigation(&self, navigation: &NavigationTree) -> StoreResult<()>;

    /// Remove a navigation tree.
    fn remove_navigation(&self, navigation: &NavigationTree) -> StoreResult<()>;

    /// Find portal descriptors matching `query`.
    fn find_portals(&self, query: &Query) -> StoreResult<Vec<PortalDescriptor>>;

    /// Find navigation trees matching `query`, optionally ordered.
    fn find_navigations(
        &self,
        query: &Query,
        order: Option<&NavigationComparator>,
    ) -> StoreResult<Vec<NavigationTree>>;

    /// Open a unit of work. Stores without demarcation ignore this.
    fn begin(&self) {}

    /// Close the current unit of work, committing or rolling back.
    fn end(&self, _commit: bool) {}
}
