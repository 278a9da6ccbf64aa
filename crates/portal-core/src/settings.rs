//! Deployment settings
//!
//! Settings are read from a TOML file, overridden by `PORTAL_*` environment
//! variables and validated once at assembly time. They are never mutated
//! after the service is built.

use crate::errors::{PortalError, PortalResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of environment variables that override file settings.
pub const ENV_PREFIX: &str = "PORTAL_";

/// Settings of a portal configuration deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalSettings {
    /// Identifier the service uses as event source
    pub service_name: String,
    /// Principal with unrestricted group visibility
    pub super_identity: String,
    /// Group every visitor implicitly belongs to
    pub guest_group: String,
    /// Membership type allowing navigation creation in a group
    pub makable_membership_type: String,
    /// Portal served when a request names none
    pub default_portal: String,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            service_name: "portal-config".to_string(),
            super_identity: "root".to_string(),
            guest_group: "/platform/guests".to_string(),
            makable_membership_type: "manager".to_string(),
            default_portal: "classic".to_string(),
        }
    }
}

impl PortalSettings {
    /// Parse settings from TOML text; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> PortalResult<Self> {
        toml::from_str(content)
            .map_err(|e| PortalError::invalid(format!("Invalid settings TOML: {e}")))
    }

    /// Load settings from a TOML file.
    pub fn load_from_file(path: &Path) -> PortalResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PortalError::invalid(format!("Failed to read settings {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply `PORTAL_*` overrides from the process environment.
    pub fn merge_with_env(&mut self) -> PortalResult<()> {
        self.merge_with_vars(std::env::vars())
    }

    /// Apply `PORTAL_*` overrides from an explicit variable list.
    pub fn merge_with_vars<I, K, V>(&mut self, vars: I) -> PortalResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in vars {
            let Some(field) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let value = value.into();
            match field {
                "SERVICE_NAME" => self.service_name = value,
                "SUPER_IDENTITY" => self.super_identity = value,
                "GUEST_GROUP" => self.guest_group = value,
                "MAKABLE_MEMBERSHIP_TYPE" => self.makable_membership_type = value,
                "DEFAULT_PORTAL" => self.default_portal = value,
                _ => tracing::debug!(variable = %key.as_ref(), "ignoring unknown portal setting"),
            }
        }
        Ok(())
    }

    /// Validate the settings.
    pub fn validate(&self) -> PortalResult<()> {
        let required = [
            ("service_name", &self.service_name),
            ("super_identity", &self.super_identity),
            ("guest_group", &self.guest_group),
            ("makable_membership_type", &self.makable_membership_type),
            ("default_portal", &self.default_portal),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(PortalError::invalid(format!("{name} must not be empty")));
            }
        }
        if !self.guest_group.trim().starts_with('/') {
            return Err(PortalError::invalid(format!(
                "guest_group must be an absolute group id, got '{}'",
                self.guest_group
            )));
        }
        Ok(())
    }
}
