//! Storage implementations
//!
//! Only the in-memory backend ships; anything implementing the traits in
//! [`crate::core::service`] can replace it.

pub mod in_memory;

pub use in_memory::InMemoryStore;
