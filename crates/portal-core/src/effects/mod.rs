//! Collaborator contracts
//!
//! The portal configuration service owns no storage, no permission policy and
//! no directory. Each of those is reached through a trait in this module:
//!
//! - `store` - `ConfigStore`: CRUD, clone and paged queries
//! - `access` - `AccessDecider`: view/edit decisions and distinguished ids
//! - `directory` - `DirectoryLookup`: group enumeration
//! - `events` - `EventSink`: best-effort lifecycle notifications
//! - `template` - `TemplateProvider`: materialization from named templates
//!
//! All contracts are synchronous and `Send + Sync`; one service instance may
//! serve concurrent requests.

pub mod access;
pub mod directory;
pub mod events;
pub mod store;
pub mod template;
