//! HTTP server
//!
//! `ServerBuilder` wires configuration, persistence and authentication into
//! an [`AppState`], registers one descriptor per resource and exposes them
//! through REST.

pub mod builder;
pub mod entity_registry;
pub mod exposure;
pub mod handlers;
pub mod state;

pub use builder::{ServerBuilder, default_registry};
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use exposure::RestExposure;
pub use state::AppState;
