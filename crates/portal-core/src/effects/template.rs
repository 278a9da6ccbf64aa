//! Template provider contract
//!
//! A provider knows a set of templates for some owner types and can
//! materialize them into its backing store. What a template contains is the
//! provider's business.

use crate::effects::store::StoreError;
use crate::model::page::Page;
use crate::owner::OwnerType;
use thiserror::Error;

/// Error type for template operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// No provider handles the owner type
    #[error("no template provider for owner type {owner_type}")]
    NoProvider {
        /// Owner type requested
        owner_type: OwnerType,
    },

    /// The template is not known for the owner type
    #[error("unknown template '{template_key}' for owner type {owner_type}")]
    UnknownTemplate {
        /// Owner type requested
        owner_type: OwnerType,
        /// Missing template
        template_key: String,
    },

    /// The provider failed to write into its store
    #[error("template store failure: {0}")]
    Store(#[from] StoreError),

    /// Initial import failed
    #[error("template import failed: {message}")]
    Import {
        /// Description of the failure
        message: String,
    },
}

impl TemplateError {
    /// Create an import error
    pub fn import(message: impl Into<String>) -> Self {
        Self::Import {
            message: message.into(),
        }
    }
}

/// Source of named templates for one or more owner types.
pub trait TemplateProvider: Send + Sync {
    /// Whether this provider materializes portals of `owner_type`.
    fn handles(&self, owner_type: OwnerType) -> bool;

    /// Create descriptor, pages, navigation and preferences for `name` from
    /// `template_key`.
    fn materialize(
        &self,
        owner_type: OwnerType,
        name: &str,
        template_key: &str,
    ) -> Result<(), TemplateError>;

    /// Build a page from a page template, or `None` when this provider does not
    /// know `template_key`. The page is not persisted.
    fn page_from_template(
        &self,
        owner_type: OwnerType,
        owner_id: &str,
        template_key: &str,
    ) -> Result<Option<Page>, TemplateError>;

    /// Portal shown when a request names none.
    fn default_portal_name(&self) -> Option<String> {
        None
    }

    /// Import the provider's initial data at startup.
    fn import_initial(&self) -> Result<(), TemplateError> {
        Ok(())
    }
}
