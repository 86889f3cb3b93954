//! Reusable field filters
//!
//! These filters transform raw JSON field values before deserialization

use anyhow::Result;
use serde_json::Value;

/// A filter applied to one field of a JSON object
pub type FieldFilter = fn(&str, Value) -> Result<Value>;

/// Filter: trim whitespace from string
pub fn trim(_: &str, value: Value) -> Result<Value> {
    if let Some(s) = value.as_str() {
        Ok(Value::String(s.trim().to_string()))
    } else {
        Ok(value)
    }
}

/// Filter: convert string to lowercase
pub fn lowercase(_: &str, value: Value) -> Result<Value> {
    if let Some(s) = value.as_str() {
        Ok(Value::String(s.to_lowercase()))
    } else {
        Ok(value)
    }
}

/// Apply filters to the matching fields of a JSON object
///
/// Fields absent from the payload are skipped; non-object payloads pass
/// through untouched and fail later at deserialization.
pub fn apply_filters(mut payload: Value, filters: &[(&str, FieldFilter)]) -> Result<Value> {
    if let Some(object) = payload.as_object_mut() {
        for (field, filter) in filters {
            if let Some(value) = object.remove(*field) {
                object.insert(field.to_string(), filter(field, value)?);
            }
        }
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // === trim ===

    #[test]
    fn test_trim_removes_whitespace() {
        let result = trim("name", json!("  hello  ")).expect("should not fail");
        assert_eq!(result, json!("hello"));
    }

    #[test]
    fn test_trim_non_string_passthrough() {
        let result = trim("age", json!(42)).expect("should not fail");
        assert_eq!(result, json!(42));
    }

    #[test]
    fn test_trim_null_passthrough() {
        let result = trim("description", json!(null)).expect("should not fail");
        assert_eq!(result, json!(null));
    }

    // === lowercase ===

    #[test]
    fn test_lowercase_converts_string() {
        let result = lowercase("email", json!("Hello@WORLD.com")).expect("should not fail");
        assert_eq!(result, json!("hello@world.com"));
    }

    // === apply_filters ===

    #[test]
    fn test_filters_chain_in_order() {
        let payload = json!({ "email": "  Ada@Example.COM ", "name": " Ada " });
        let filters: [(&str, FieldFilter); 3] =
            [("email", trim), ("email", lowercase), ("name", trim)];

        let result = apply_filters(payload, &filters).unwrap();
        assert_eq!(result, json!({ "email": "ada@example.com", "name": "Ada" }));
    }

    #[test]
    fn test_missing_fields_are_not_created() {
        let result = apply_filters(json!({}), &[("name", trim as FieldFilter)]).unwrap();
        assert_eq!(result, json!({}));
    }

    #[test]
    fn test_non_object_passthrough() {
        let result = apply_filters(json!([1, 2]), &[("name", trim as FieldFilter)]).unwrap();
        assert_eq!(result, json!([1, 2]));
    }
}
