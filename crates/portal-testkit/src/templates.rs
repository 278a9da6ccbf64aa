//! Static template provider
//!
//! Portal templates materialize a descriptor, a home page holding one
//! unowned transient application, and a navigation tree pointing at it.
//! Page templates are returned as registered, still owned by the template
//! scope.

use crate::store::MemoryConfigStore;
use portal_core::{
    Application, ConfigStore, Container, NavNode, NavigationTree, OwnerType, Page,
    PortalDescriptor, TemplateError, TemplateProvider,
};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Page name created by every portal template.
pub const HOME_PAGE: &str = "homepage";

/// Template provider with templates declared up front.
#[derive(Debug, Clone)]
pub struct StaticTemplateProvider {
    store: Arc<MemoryConfigStore>,
    owner_types: Vec<OwnerType>,
    portal_templates: Vec<String>,
    page_templates: BTreeMap<String, Page>,
    default_portal: Option<String>,
    initial_portals: Vec<(OwnerType, String, String)>,
    import_failure: Option<String>,
}

impl StaticTemplateProvider {
    /// Provider writing into `store`, handling no owner type yet.
    pub fn new(store: Arc<MemoryConfigStore>) -> Self {
        Self {
            store,
            owner_types: Vec::new(),
            portal_templates: Vec::new(),
            page_templates: BTreeMap::new(),
            default_portal: None,
            initial_portals: Vec::new(),
            import_failure: None,
        }
    }

    /// Materialize portals of `owner_type`.
    pub fn handling(mut self, owner_type: OwnerType) -> Self {
        self.owner_types.push(owner_type);
        self
    }

    /// Declare a portal template.
    pub fn with_portal_template(mut self, template_key: impl Into<String>) -> Self {
        self.portal_templates.push(template_key.into());
        self
    }

    /// Declare a page template.
    pub fn with_page_template(mut self, template_key: impl Into<String>, page: Page) -> Self {
        self.page_templates.insert(template_key.into(), page);
        self
    }

    /// Declare the default portal.
    pub fn with_default_portal(mut self, name: impl Into<String>) -> Self {
        self.default_portal = Some(name.into());
        self
    }

    /// Materialize `name` from `template_key` during the initial import.
    pub fn with_initial_portal(
        mut self,
        owner_type: OwnerType,
        name: impl Into<String>,
        template_key: impl Into<String>,
    ) -> Self {
        self.initial_portals
            .push((owner_type, name.into(), template_key.into()));
        self
    }

    /// Make the initial import fail with `message`.
    pub fn failing_import(mut self, message: impl Into<String>) -> Self {
        self.import_failure = Some(message.into());
        self
    }
}

impl TemplateProvider for StaticTemplateProvider {
    fn handles(&self, owner_type: OwnerType) -> bool {
        self.owner_types.contains(&owner_type)
    }

    fn materialize(
        &self,
        owner_type: OwnerType,
        name: &str,
        template_key: &str,
    ) -> Result<(), TemplateError> {
        if !self.portal_templates.iter().any(|t| t == template_key) {
            return Err(TemplateError::UnknownTemplate {
                owner_type,
                template_key: template_key.to_string(),
            });
        }

        let mut portal = PortalDescriptor::with_owner_type(owner_type, name)
            .with_access_permissions(["Everyone"])
            .with_edit_permission("manager:/platform/administrators");
        portal
            .properties
            .insert("template".to_string(), template_key.to_string());
        self.store.create_portal(&portal)?;

        let home = Page::new(owner_type, name, HOME_PAGE).with_child(
            Container::new()
                .with_child(Application::transient("web/HomePagePortlet"))
                .into(),
        );
        self.store.create_page(&home)?;

        let navigation = NavigationTree::new(owner_type, name, 1).with_node(
            NavNode::new("home", "Home").with_page_reference(home.page_id().to_string()),
        );
        self.store.create_navigation(&navigation)?;
        Ok(())
    }

    fn page_from_template(
        &self,
        _owner_type: OwnerType,
        _owner_id: &str,
        template_key: &str,
    ) -> Result<Option<Page>, TemplateError> {
        Ok(self.page_templates.get(template_key).cloned())
    }

    fn default_portal_name(&self) -> Option<String> {
        self.default_portal.clone()
    }

    fn import_initial(&self) -> Result<(), TemplateError> {
        if let Some(message) = &self.import_failure {
            return Err(TemplateError::import(message.clone()));
        }
        for (owner_type, name, template_key) in &self.initial_portals {
            if self.store.portal(*owner_type, name).is_none() {
                self.materialize(*owner_type, name, template_key)?;
            }
        }
        Ok(())
    }
}
