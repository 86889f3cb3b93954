//! Struct-level validators used with `#[validate(schema(...))]`

use std::borrow::Cow;
use validator::ValidationError;

/// Reject partial updates that carry no field at all
///
/// `fields` names the accepted fields for the error message.
pub fn at_least_one(present: &[bool], fields: &str) -> Result<(), ValidationError> {
    if present.iter().any(|p| *p) {
        return Ok(());
    }
    let mut err = ValidationError::new("at_least_one_field");
    err.message = Some(Cow::Owned(format!(
        "At least one field ({}) must be provided for update",
        fields
    )));
    Err(err)
}

/// Deserialize a field that distinguishes "absent" from "explicit null"
///
/// Use with `#[serde(default, deserialize_with = "...")]` on an
/// `Option<Option<T>>`: absent is `None`, `null` is `Some(None)`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}
