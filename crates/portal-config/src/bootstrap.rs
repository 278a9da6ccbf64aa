//! Template bootstrap composition
//!
//! The bootstrap is assembled once, before the service is built, from an
//! ordered list of providers. Earlier providers take precedence; later ones
//! only supplement what earlier ones do not know (owner types, templates,
//! default portal). The composed value is immutable afterwards.

use portal_core::{OwnerType, Page, TemplateError, TemplateProvider};
use std::fmt;
use std::sync::Arc;

/// Ordered composition of template providers.
#[derive(Clone, Default)]
pub struct TemplateBootstrap {
    providers: Vec<Arc<dyn TemplateProvider>>,
}

impl fmt::Debug for TemplateBootstrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateBootstrap")
            .field("providers", &self.providers.len())
            .finish()
    }
}

impl TemplateBootstrap {
    /// Compose providers in registration order.
    pub fn from_providers<I>(providers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn TemplateProvider>>,
    {
        Self {
            providers: providers.into_iter().collect(),
        }
    }

    /// Whether no provider is registered.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Materialize `name` from `template_key` with the first provider that
    /// handles `owner_type` and knows the template.
    pub fn materialize(
        &self,
        owner_type: OwnerType,
        name: &str,
        template_key: &str,
    ) -> Result<(), TemplateError> {
        let mut handled = false;
        for provider in self.providers.iter().filter(|p| p.handles(owner_type)) {
            handled = true;
            match provider.materialize(owner_type, name, template_key) {
                Err(TemplateError::UnknownTemplate { .. }) => continue,
                result => return result,
            }
        }
        if handled {
            Err(TemplateError::UnknownTemplate {
                owner_type,
                template_key: template_key.to_string(),
            })
        } else {
            Err(TemplateError::NoProvider { owner_type })
        }
    }

    /// Build an unpersisted page from the first provider knowing
    /// `template_key`.
    pub fn page_from_template(
        &self,
        owner_type: OwnerType,
        owner_id: &str,
        template_key: &str,
    ) -> Result<Page, TemplateError> {
        if self.providers.is_empty() {
            return Err(TemplateError::NoProvider { owner_type });
        }
        for provider in &self.providers {
            if let Some(page) = provider.page_from_template(owner_type, owner_id, template_key)? {
                return Ok(page);
            }
        }
        Err(TemplateError::UnknownTemplate {
            owner_type,
            template_key: template_key.to_string(),
        })
    }

    /// Default portal of the first provider declaring one.
    pub fn default_portal_name(&self) -> Option<String> {
        self.providers.iter().find_map(|p| p.default_portal_name())
    }

    /// Run every provider's initial import in order, stopping at the first
    /// failure.
    pub fn import_initial(&self) -> Result<(), TemplateError> {
        for provider in &self.providers {
            provider.import_initial()?;
        }
        Ok(())
    }
}
