//! Portal Testing Infrastructure
//!
//! In-memory implementations of every collaborator contract in
//! `portal-core`, plus fixtures and proptest strategies shared by the
//! workspace tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use portal_testkit::*;
//!
//! #[test]
//! fn my_test() {
//!     init_test_tracing();
//!     let fixture = ClassicPortalFixture::new();
//!     // build the service over fixture.store, fixture.access, ...
//! }
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod access;
pub mod directory;
pub mod events;
pub mod fixtures;
pub mod store;
pub mod strategies;
pub mod templates;

pub use access::{AccessRules, Permission, Resource, ANONYMOUS, ANYONE};
pub use directory::MemoryDirectory;
pub use events::{RecordedEvent, RecordingEventSink};
pub use fixtures::ClassicPortalFixture;
pub use store::{Demarcation, MemoryConfigStore};
pub use templates::StaticTemplateProvider;

/// Install a fmt subscriber honoring `RUST_LOG`, once per test binary.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
