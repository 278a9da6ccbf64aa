//! In-memory configuration store
//!
//! Objects live in ordered maps behind a `parking_lot` lock. Removing a
//! portal cascades to the pages and navigation of its scope. Writes can be
//! made to fail to exercise error propagation, and unit-of-work demarcation
//! is recorded so tests can assert commit or rollback.

use parking_lot::RwLock;
use portal_core::{
    ConfigStore, ModelChange, NavigationComparator, NavigationTree, OwnerKey, OwnerType, Page,
    PageId, PortalDescriptor, Query, StoreError, StoreResult,
};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct StoreState {
    portals: BTreeMap<OwnerKey, PortalDescriptor>,
    pages: BTreeMap<PageId, Page>,
    navigations: BTreeMap<OwnerKey, NavigationTree>,
    failing_writes: Option<String>,
    demarcation: Vec<Demarcation>,
}

/// Unit-of-work boundary observed by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demarcation {
    /// `begin` was called
    Begin,
    /// `end(true)` was called
    Commit,
    /// `end(false)` was called
    Rollback,
}

/// Configuration store backed by process memory.
#[derive(Debug)]
pub struct MemoryConfigStore {
    state: RwLock<StoreState>,
}

impl Default for MemoryConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Seed a portal descriptor, replacing any existing one.
    pub fn insert_portal(&self, portal: PortalDescriptor) {
        self.state.write().portals.insert(portal.key(), portal);
    }

    /// Seed a page, replacing any existing one.
    pub fn insert_page(&self, page: Page) {
        self.state.write().pages.insert(page.page_id(), page);
    }

    /// Seed a navigation tree, replacing any existing one.
    pub fn insert_navigation(&self, navigation: NavigationTree) {
        self.state.write().navigations.insert(navigation.key(), navigation);
    }

    /// Stored portal descriptor, if any.
    pub fn portal(&self, owner_type: OwnerType, name: &str) -> Option<PortalDescriptor> {
        self.state
            .read()
            .portals
            .get(&OwnerKey::new(owner_type, name))
            .cloned()
    }

    /// Stored page, if any.
    pub fn page(&self, id: &PageId) -> Option<Page> {
        self.state.read().pages.get(id).cloned()
    }

    /// Stored navigation tree, if any.
    pub fn navigation(&self, owner_type: OwnerType, owner_id: &str) -> Option<NavigationTree> {
        self.state
            .read()
            .navigations
            .get(&OwnerKey::new(owner_type, owner_id))
            .cloned()
    }

    /// Number of stored pages.
    pub fn page_count(&self) -> usize {
        self.state.read().pages.len()
    }

    /// Make every subsequent write fail with a backend error.
    pub fn fail_writes(&self, message: impl Into<String>) {
        self.state.write().failing_writes = Some(message.into());
    }

    /// Let writes succeed again.
    pub fn heal(&self) {
        self.state.write().failing_writes = None;
    }

    /// Unit-of-work boundaries observed so far.
    pub fn demarcation(&self) -> Vec<Demarcation> {
        self.state.read().demarcation.clone()
    }

    fn check_writable(state: &StoreState) -> StoreResult<()> {
        match &state.failing_writes {
            Some(message) => {
                tracing::debug!(reason = %message, "rejecting write");
                Err(StoreError::backend(message.clone()))
            }
            None => Ok(()),
        }
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get_portal(&self, owner_type: OwnerType, name: &str) -> StoreResult<Option<PortalDescriptor>> {
        Ok(self.portal(owner_type, name))
    }

    fn create_portal(&self, portal: &PortalDescriptor) -> StoreResult<()> {
        let mut state = self.state.write();
        Self::check_writable(&state)?;
        let key = portal.key();
        if state.portals.contains_key(&key) {
            return Err(StoreError::already_exists(format!("portal {key}")));
        }
        state.portals.insert(key, portal.clone());
        Ok(())
    }

    fn save_portal(&self, portal: &PortalDescriptor) -> StoreResult<()> {
        let mut state = self.state.write();
        Self::check_writable(&state)?;
        match state.portals.get_mut(&portal.key()) {
            Some(existing) => {
                *existing = portal.clone();
                Ok(())
            }
            None => Err(StoreError::not_found(format!("portal {}", portal.key()))),
        }
    }

    fn remove_portal(&self, portal: &PortalDescriptor) -> StoreResult<()> {
        let mut state = self.state.write();
        Self::check_writable(&state)?;
        let key = portal.key();
        if state.portals.remove(&key).is_none() {
            return Err(StoreError::not_found(format!("portal {key}")));
        }
        state.pages.retain(|id, _| OwnerKey::new(id.owner_type, &id.owner_id) != key);
        state.navigations.remove(&key);
        Ok(())
    }

    fn get_page(&self, id: &PageId) -> StoreResult<Option<Page>> {
        Ok(self.page(id))
    }

    fn create_page(&self, page: &Page) -> StoreResult<()> {
        let mut state = self.state.write();
        Self::check_writable(&state)?;
        let id = page.page_id();
        if state.pages.contains_key(&id) {
            return Err(StoreError::already_exists(format!("page {id}")));
        }
        state.pages.insert(id, page.clone());
        Ok(())
    }

    fn save_page(&self, page: &Page) -> StoreResult<Vec<ModelChange>> {
        let mut state = self.state.write();
        Self::check_writable(&state)?;
        let id = page.page_id();
        let Some(existing) = state.pages.get_mut(&id) else {
            return Err(StoreError::not_found(format!("page {id}")));
        };
        let changes = if *existing == *page {
            Vec::new()
        } else {
            vec![ModelChange::Update { id: id.to_string() }]
        };
        *existing = page.clone();
        Ok(changes)
    }

    fn remove_page(&self, page: &Page) -> StoreResult<()> {
        let mut state = self.state.write();
        Self::check_writable(&state)?;
        let id = page.page_id();
        match state.pages.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::not_found(format!("page {id}"))),
        }
    }

    fn clone_page(
        &self,
        id: &PageId,
        owner_type: OwnerType,
        owner_id: &str,
        new_name: &str,
    ) -> StoreResult<Page> {
        let mut state = self.state.write();
        Self::check_writable(&state)?;
        let Some(source) = state.pages.get(id) else {
            return Err(StoreError::not_found(format!("page {id}")));
        };
        let mut clone = source.clone();
        clone.owner_type = owner_type;
        clone.owner_id = owner_id.trim().to_string();
        clone.name = new_name.to_string();

        let clone_id = clone.page_id();
        if state.pages.contains_key(&clone_id) {
            return Err(StoreError::already_exists(format!("page {clone_id}")));
        }
        state.pages.insert(clone_id, clone.clone());
        Ok(clone)
    }

    fn get_navigation(&self, owner_type: OwnerType, owner_id: &str) -> StoreResult<Option<NavigationTree>> {
        Ok(self.navigation(owner_type, owner_id))
    }

    fn create_navigation(&self, navigation: &NavigationTree) -> StoreResult<()> {
        let mut state = self.state.write();
        Self::check_writable(&state)?;
        let key = navigation.key();
        if state.navigations.contains_key(&key) {
            return Err(StoreError::already_exists(format!("navigation {key}")));
        }
        state.navigations.insert(key, navigation.clone());
        Ok(())
    }

    fn save_navigation(&self, navigation: &NavigationTree) -> StoreResult<()> {
        let mut state = self.state.write();
        Self::check_writable(&state)?;
        match state.navigations.get_mut(&navigation.key()) {
            Some(existing) => {
                *existing = navigation.clone();
                Ok(())
            }
            None => Err(StoreError::not_found(format!("navigation {}", navigation.key()))),
        }
    }

    fn remove_navigation(&self, navigation: &NavigationTree) -> StoreResult<()> {
        let mut state = self.state.write();
        Self::check_writable(&state)?;
        let key = navigation.key();
        match state.navigations.remove(&key) {
            Some(_) => Ok(()),
            None => Err(StoreError::not_found(format!("navigation {key}"))),
        }
    }

    fn find_portals(&self, query: &Query) -> StoreResult<Vec<PortalDescriptor>> {
        let state = self.state.read();
        Ok(state
            .portals
            .values()
            .filter(|p| query.matches(p.owner_type, &p.name, Some(&p.name)))
            .cloned()
            .collect())
    }

    fn find_navigations(
        &self,
        query: &Query,
        order: Option<&NavigationComparator>,
    ) -> StoreResult<Vec<NavigationTree>> {
        let state = self.state.read();
        let mut navigations: Vec<NavigationTree> = state
            .navigations
            .values()
            .filter(|n| query.matches(n.owner_type, &n.owner_id, None))
            .cloned()
            .collect();
        if let Some(order) = order {
            navigations.sort_by(|a, b| order(a, b));
        }
        Ok(navigations)
    }

    fn begin(&self) {
        self.state.write().demarcation.push(Demarcation::Begin);
    }

    fn end(&self, commit: bool) {
        let boundary = if commit {
            Demarcation::Commit
        } else {
            Demarcation::Rollback
        };
        self.state.write().demarcation.push(boundary);
    }
}
