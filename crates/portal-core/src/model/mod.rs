//! Configuration object model
//!
//! Plain data: descriptors, pages, navigation trees and the node graph that
//! makes up a page layout. Behavior over these types lives in `portal-config`.

pub mod navigation;
pub mod node;
pub mod page;
pub mod portal;
