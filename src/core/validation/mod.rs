//! Request body filtering and validation
//!
//! Bodies go through three steps before a handler sees them:
//! per-field filters on the raw JSON (trim, lowercase), deserialization
//! into the typed request, then `validator` rules on the typed value.

pub mod extractor;
pub mod filters;
pub mod validators;

pub use extractor::{RequestBody, ValidJson};
pub use filters::FieldFilter;
