//! Unified error type for portal configuration operations
//!
//! Collaborator failures carry their own error types (see `effects`) and are
//! folded into `PortalError` at the service boundary.

use crate::effects::directory::DirectoryError;
use crate::effects::store::StoreError;
use crate::effects::template::TemplateError;
use crate::owner::OwnerType;
use thiserror::Error;

/// Errors surfaced by the portal configuration service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortalError {
    /// Invalid input or configuration
    #[error("invalid: {message}")]
    Invalid {
        /// Description of the invalid input
        message: String,
    },

    /// The storage collaborator failed; never retried here
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// The directory collaborator failed
    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// No template bootstrap handles the requested owner type
    #[error("no template bootstrap registered for owner type {owner_type}")]
    MisconfiguredTemplate {
        /// Owner type nobody can materialize
        owner_type: OwnerType,
    },

    /// No registered provider knows the template
    #[error("unknown template '{template_key}' for owner type {owner_type}")]
    UnknownTemplate {
        /// Owner type requested
        owner_type: OwnerType,
        /// Template that could not be found
        template_key: String,
    },

    /// Internal failure of a collaborator or the service
    #[error("internal error: {message}")]
    Internal {
        /// Description of the failure
        message: String,
    },
}

impl PortalError {
    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<TemplateError> for PortalError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::NoProvider { owner_type } => Self::MisconfiguredTemplate { owner_type },
            TemplateError::UnknownTemplate {
                owner_type,
                template_key,
            } => Self::UnknownTemplate {
                owner_type,
                template_key,
            },
            TemplateError::Store(err) => Self::Storage(err),
            TemplateError::Import { message } => Self::internal(message),
        }
    }
}

/// Standard result type for portal configuration operations
pub type PortalResult<T> = std::result::Result<T, PortalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PortalError::invalid("bad owner");
        assert_eq!(err.to_string(), "invalid: bad owner");

        let err = PortalError::from(StoreError::backend("disk full"));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_template_error_conversion() {
        let err = PortalError::from(TemplateError::NoProvider {
            owner_type: OwnerType::Group,
        });
        assert_eq!(
            err,
            PortalError::MisconfiguredTemplate {
                owner_type: OwnerType::Group
            }
        );

        let err = PortalError::from(TemplateError::Store(StoreError::backend("io")));
        assert!(matches!(err, PortalError::Storage(_)));
    }
}
