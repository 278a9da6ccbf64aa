//! Portal Config - User Portal Configuration Service
//!
//! This crate provides the service layer on top of `portal-core`:
//!
//! - `resolver` - `NavigationResolver`: merges portal, personal and group
//!   navigation for an identity and annotates each tree with the identity's
//!   edit permission
//! - `ownership` - `OwnershipRewriter`: recursive ownership rewrite over a
//!   page layout graph
//! - `bootstrap` - `TemplateBootstrap`: template providers composed once at
//!   assembly time
//! - `service` - `UserPortalConfigService`: the public facade for page and
//!   navigation CRUD, template instantiation and the aggregate read path
//!
//! # Example
//!
//! ```ignore
//! use portal_config::UserPortalConfigService;
//!
//! let service = UserPortalConfigService::builder(store, access, directory)
//!     .event_sink(events)
//!     .template_provider(provider)
//!     .settings(&settings)
//!     .build()?;
//!
//! service.start();
//! if let Some(config) = service.get_user_portal_config("classic", Some("mary"))? {
//!     for navigation in &config.navigations {
//!         println!("{} editable={}", navigation.key(), navigation.is_modifiable());
//!     }
//! }
//! ```

#![forbid(unsafe_code)]

pub mod bootstrap;
pub mod ownership;
pub mod resolver;
pub mod service;

pub use bootstrap::TemplateBootstrap;
pub use ownership::{rewrite_ownership, OwnershipRewriter};
pub use resolver::NavigationResolver;
pub use service::{UserPortalConfig, UserPortalConfigService, UserPortalConfigServiceBuilder};
