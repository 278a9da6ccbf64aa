//! User portal configuration service
//!
//! `UserPortalConfigService` is the public surface over the configuration
//! collaborators. It gates the sensitive read paths with the access decider,
//! delegates the aggregate read to `NavigationResolver` and template
//! instantiation to `TemplateBootstrap` and `OwnershipRewriter`.
//!
//! # Persist, then notify
//!
//! Every page and navigation mutation first persists through the store. Only
//! when the persist succeeded is the matching lifecycle event published, and
//! a failing sink is logged and ignored: the persisted change stays. Storage
//! failures propagate unchanged and publish nothing.
//!
//! Mutations assume the caller already checked edit permission.

use crate::bootstrap::TemplateBootstrap;
use crate::ownership::OwnershipRewriter;
use crate::resolver::NavigationResolver;
use portal_core::{
    AccessDecider, AccessTarget, AclIdentities, ConfigStore, DirectoryLookup, EventKind, EventPayload, EventSink,
    ModelChange, NavNode, NavigationComparator, NavigationTree, NoopEventSink, OwnerType, Page,
    PageId, PortalDescriptor, PortalEvent, PortalResult, PortalSettings, Query, TemplateProvider,
};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Portal descriptor plus the navigation an identity may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPortalConfig {
    /// The portal
    pub portal: PortalDescriptor,
    /// Navigation ordered by ascending priority
    pub navigations: Vec<NavigationTree>,
}

/// Public facade for portal, page and navigation configuration.
pub struct UserPortalConfigService {
    store: Arc<dyn ConfigStore>,
    access: Arc<dyn AccessDecider>,
    directory: Arc<dyn DirectoryLookup>,
    events: Arc<dyn EventSink>,
    bootstrap: TemplateBootstrap,
    resolver: NavigationResolver,
    source: String,
    default_portal: String,
}

impl fmt::Debug for UserPortalConfigService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPortalConfigService")
            .field("source", &self.source)
            .field("bootstrap", &self.bootstrap)
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

impl UserPortalConfigService {
    /// Start assembling a service over the required collaborators.
    pub fn builder(
        store: Arc<dyn ConfigStore>,
        access: Arc<dyn AccessDecider>,
        directory: Arc<dyn DirectoryLookup>,
    ) -> UserPortalConfigServiceBuilder {
        UserPortalConfigServiceBuilder {
            store,
            access,
            directory,
            events: Arc::new(NoopEventSink),
            providers: Vec::new(),
            settings: None,
        }
    }

    /// The resolver backing `get_user_portal_config`.
    pub fn resolver(&self) -> &NavigationResolver {
        &self.resolver
    }

    /// Import initial data from the template providers.
    ///
    /// Runs inside one store unit of work. A failure is logged and rolled
    /// back; it never prevents startup.
    pub fn start(&self) {
        if self.bootstrap.is_empty() {
            return;
        }
        self.store.begin();
        match self.bootstrap.import_initial() {
            Ok(()) => {
                self.store.end(true);
                tracing::info!(providers = self.bootstrap.len(), "initial portal data imported");
            }
            Err(err) => {
                tracing::error!(error = %err, "could not import initial portal data");
                self.store.end(false);
            }
        }
    }

    /// Portal served when a request names none.
    pub fn default_portal(&self) -> String {
        self.bootstrap
            .default_portal_name()
            .unwrap_or_else(|| self.default_portal.clone())
    }

    /// Portal descriptor and resolved navigation for `identity`, or `None`
    /// when the portal is missing or may not be viewed.
    pub fn get_user_portal_config(
        &self,
        portal_name: &str,
        identity: Option<&str>,
    ) -> PortalResult<Option<UserPortalConfig>> {
        let Some(portal) = self.resolver.viewable_portal(portal_name, identity)? else {
            return Ok(None);
        };
        let navigations = self.resolver.navigations_for(&portal, identity)?;
        Ok(Some(UserPortalConfig {
            portal,
            navigations,
        }))
    }

    /// Group ids `identity` may create navigation in: every group for the
    /// super-identity, otherwise the groups where it holds the makable
    /// membership type.
    pub fn get_makable_navigations(&self, identity: &str) -> PortalResult<Vec<String>> {
        let identity = identity.trim();
        let identities = self.resolver.identities();
        let groups = if identities.is_super_identity(identity) {
            self.directory.all_groups()?
        } else {
            self.directory
                .groups_by_membership(identity, &identities.makable_membership_type)?
        };
        Ok(groups
            .iter()
            .map(|group| group.id().trim().to_string())
            .collect())
    }

    /// Create the descriptor, pages, navigation and preferences of a new
    /// portal `name` from `template`.
    pub fn create_user_portal_config(
        &self,
        owner_type: OwnerType,
        name: &str,
        template: &str,
    ) -> PortalResult<()> {
        self.bootstrap.materialize(owner_type, name, template)?;
        tracing::info!(owner_type = %owner_type, name, template, "portal created from template");
        Ok(())
    }

    /// Remove a portal descriptor and what it owns; a missing descriptor is
    /// not an error.
    pub fn remove_user_portal_config(&self, owner_type: OwnerType, owner_id: &str) -> PortalResult<()> {
        match self.store.get_portal(owner_type, owner_id)? {
            Some(portal) => {
                self.store.remove_portal(&portal)?;
                tracing::info!(owner_type = %owner_type, owner_id, "portal removed");
            }
            None => tracing::debug!(owner_type = %owner_type, owner_id, "no portal to remove"),
        }
        Ok(())
    }

    /// Remove the site portal `name`.
    pub fn remove_portal_by_name(&self, name: &str) -> PortalResult<()> {
        self.remove_user_portal_config(OwnerType::Portal, name)
    }

    /// Save an existing portal descriptor.
    pub fn update_portal(&self, portal: &PortalDescriptor) -> PortalResult<()> {
        self.store.save_portal(portal)?;
        Ok(())
    }

    /// Load a page by reference; `None` when no such page is stored.
    ///
    /// A reference that is not `type::id::name` with a known owner type is
    /// rejected with `PortalError::Invalid` rather than reported missing.
    pub fn get_page(&self, page_id: &str) -> PortalResult<Option<Page>> {
        let id: PageId = page_id.parse()?;
        Ok(self.store.get_page(&id)?)
    }

    /// Load a page by reference if `identity` may view it.
    pub fn get_page_for(&self, page_id: &str, identity: Option<&str>) -> PortalResult<Option<Page>> {
        Ok(self
            .get_page(page_id)?
            .filter(|page| self.access.has_view_permission(identity, AccessTarget::Page(page))))
    }

    /// Persist a new page, then publish `page.create`.
    pub fn create_page(&self, page: &Page) -> PortalResult<()> {
        self.store.create_page(page)?;
        self.notify(EventKind::PageCreate, EventPayload::Page(page));
        Ok(())
    }

    /// Save a page, then publish `page.update`. Returns the store's change list.
    pub fn update_page(&self, page: &Page) -> PortalResult<Vec<ModelChange>> {
        let changes = self.store.save_page(page)?;
        self.notify(EventKind::PageUpdate, EventPayload::Page(page));
        Ok(changes)
    }

    /// Remove a page, then publish `page.remove`.
    pub fn remove_page(&self, page: &Page) -> PortalResult<()> {
        self.store.remove_page(page)?;
        self.notify(EventKind::PageRemove, EventPayload::Page(page));
        Ok(())
    }

    /// Load the navigation tree of a scope, without resolving `modifiable`.
    pub fn get_navigation(
        &self,
        owner_type: OwnerType,
        owner_id: &str,
    ) -> PortalResult<Option<NavigationTree>> {
        Ok(self.store.get_navigation(owner_type, owner_id.trim())?)
    }

    /// Persist a new navigation tree, then publish `navigation.create`.
    pub fn create_navigation(&self, navigation: &NavigationTree) -> PortalResult<()> {
        self.store.create_navigation(navigation)?;
        self.notify(EventKind::NavigationCreate, EventPayload::Navigation(navigation));
        Ok(())
    }

    /// Save a navigation tree, then publish `navigation.update`.
    pub fn update_navigation(&self, navigation: &NavigationTree) -> PortalResult<()> {
        self.store.save_navigation(navigation)?;
        self.notify(EventKind::NavigationUpdate, EventPayload::Navigation(navigation));
        Ok(())
    }

    /// Remove a navigation tree, then publish `navigation.remove`.
    pub fn remove_navigation(&self, navigation: &NavigationTree) -> PortalResult<()> {
        self.store.remove_navigation(navigation)?;
        self.notify(EventKind::NavigationRemove, EventPayload::Navigation(navigation));
        Ok(())
    }

    /// Clone page `page_id` as `page_name` under a new owner.
    pub fn renew_page(
        &self,
        page_id: &str,
        page_name: &str,
        owner_type: OwnerType,
        owner_id: &str,
    ) -> PortalResult<Page> {
        let id: PageId = page_id.parse()?;
        Ok(self
            .store
            .clone_page(&id, owner_type, owner_id.trim(), page_name)?)
    }

    /// Clone page `page_id` under a new owner and return a navigation node
    /// pointing at the clone. A blank label defaults to the node name.
    pub fn create_node_from_page_template(
        &self,
        node_name: &str,
        node_label: Option<&str>,
        page_id: &str,
        owner_type: OwnerType,
        owner_id: &str,
    ) -> PortalResult<NavNode> {
        let page = self.renew_page(page_id, node_name, owner_type, owner_id)?;
        let label = match node_label {
            Some(label) if !label.trim().is_empty() => label,
            _ => node_name,
        };
        Ok(NavNode::new(node_name, label).with_page_reference(page.page_id().to_string()))
    }

    /// Build a page from `template_key` owned by `(owner_type, owner_id)`.
    /// The page is returned unpersisted.
    pub fn create_page_template(
        &self,
        template_key: &str,
        owner_type: OwnerType,
        owner_id: &str,
    ) -> PortalResult<Page> {
        let mut page = self
            .bootstrap
            .page_from_template(owner_type, owner_id, template_key)?;
        OwnershipRewriter::new(owner_type, owner_id).rewrite_page(&mut page);
        Ok(page)
    }

    /// Group navigation trees `identity` may edit, ordered by owner id.
    pub fn load_editable_navigations(&self, identity: Option<&str>) -> PortalResult<Vec<NavigationTree>> {
        let by_owner_id: &NavigationComparator = &|a, b| a.owner_id.cmp(&b.owner_id);
        let navigations = self
            .store
            .find_navigations(&Query::by_owner_type(OwnerType::Group), Some(by_owner_id))?;
        Ok(navigations
            .into_iter()
            .filter(|navigation| {
                self.access
                    .has_edit_permission(identity, AccessTarget::Navigation(navigation))
            })
            .collect())
    }

    /// Distinct group ids owning a navigation tree.
    pub fn find_group_having_navigation(&self) -> PortalResult<BTreeSet<String>> {
        let navigations = self
            .store
            .find_navigations(&Query::by_owner_type(OwnerType::Group), None)?;
        Ok(navigations
            .into_iter()
            .map(|navigation| navigation.owner_id)
            .collect())
    }

    /// Names of the site portals `identity` may view.
    pub fn get_all_portal_names(&self, identity: Option<&str>) -> PortalResult<Vec<String>> {
        let portals = self
            .store
            .find_portals(&Query::by_owner_type(OwnerType::Portal))?;
        Ok(portals
            .into_iter()
            .filter(|portal| self.access.has_view_permission(identity, AccessTarget::Portal(portal)))
            .map(|portal| portal.name)
            .collect())
    }

    fn notify(&self, kind: EventKind, payload: EventPayload<'_>) {
        let event = PortalEvent {
            kind,
            source: &self.source,
            payload,
        };
        if let Err(err) = self.events.publish(&event) {
            tracing::warn!(event = %kind, error = %err, "event delivery failed, change kept");
        }
    }
}

/// Assembles a `UserPortalConfigService`.
pub struct UserPortalConfigServiceBuilder {
    store: Arc<dyn ConfigStore>,
    access: Arc<dyn AccessDecider>,
    directory: Arc<dyn DirectoryLookup>,
    events: Arc<dyn EventSink>,
    providers: Vec<Arc<dyn TemplateProvider>>,
    settings: Option<PortalSettings>,
}

impl UserPortalConfigServiceBuilder {
    /// Publish lifecycle events to `events` instead of dropping them.
    pub fn event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Register a template provider after those already registered.
    pub fn template_provider(mut self, provider: Arc<dyn TemplateProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Take the event source, default portal and distinguished identifiers
    /// from `settings`. Without settings the identifiers reported by the
    /// access decider are used.
    pub fn settings(mut self, settings: &PortalSettings) -> Self {
        self.settings = Some(settings.clone());
        self
    }

    /// Validate the settings and build the service.
    pub fn build(self) -> PortalResult<UserPortalConfigService> {
        let mut resolver =
            NavigationResolver::new(self.store.clone(), self.access.clone(), self.directory.clone());
        let settings = match self.settings {
            Some(settings) => {
                settings.validate()?;
                let identities = AclIdentities::from_settings(&settings);
                if identities != *resolver.identities() {
                    tracing::warn!(
                        configured = ?identities,
                        decider = ?resolver.identities(),
                        "access decider disagrees with settings, using settings"
                    );
                }
                resolver = resolver.with_identities(identities);
                settings
            }
            None => PortalSettings::default(),
        };
        Ok(UserPortalConfigService {
            store: self.store,
            access: self.access,
            directory: self.directory,
            events: self.events,
            bootstrap: TemplateBootstrap::from_providers(self.providers),
            resolver,
            source: settings.service_name,
            default_portal: settings.default_portal,
        })
    }
}
