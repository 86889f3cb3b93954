//! API exposure
//!
//! REST is the only transport; the exposure consumes the entity registry
//! and produces a router.

pub mod rest;

pub use rest::RestExposure;
