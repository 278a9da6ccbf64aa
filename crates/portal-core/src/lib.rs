//! Portal Core - Configuration Model and Collaborator Contracts
//!
//! This crate holds everything the portal configuration service shares with
//! its collaborators:
//!
//! - `model/` - Portal descriptors, navigation trees, pages and the
//!   configuration node graph
//! - `effects/` - Contracts for storage, access decisions, directory lookups,
//!   event delivery and template providers
//! - `settings` - Deployment settings loaded from TOML and the environment
//! - `errors` - The unified `PortalError` surfaced by the service
//!
//! # Architecture
//!
//! This is the foundation layer. It carries no policy: how permissions are
//! evaluated, where data is persisted and what templates contain all live
//! behind the traits in `effects`. The resolution and rewrite algorithms
//! live in `portal-config`.

#![forbid(unsafe_code)]

pub mod effects;
pub mod errors;
pub mod model;
pub mod owner;
pub mod settings;

pub use effects::access::{AccessDecider, AccessTarget, AclIdentities};
pub use effects::directory::{DirectoryError, DirectoryLookup, Group};
pub use effects::events::{EventError, EventKind, EventPayload, EventSink, NoopEventSink, PortalEvent};
pub use effects::store::{
    ConfigStore, ModelChange, NavigationComparator, Query, StoreError, StoreResult,
};
pub use effects::template::{TemplateError, TemplateProvider};
pub use errors::{PortalError, PortalResult};
pub use model::navigation::{NavNode, NavigationTree};
pub use model::node::{Application, ApplicationState, ConfigNode, Container, TransientState};
pub use model::page::{Page, PageId};
pub use model::portal::PortalDescriptor;
pub use owner::{OwnerKey, OwnerType};
pub use settings::PortalSettings;
