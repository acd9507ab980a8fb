//! Shallow merge and body shape checks.

use serde_json::Value;

use crate::error::CoreError;
use crate::types::Record;

/// Require a request body to be a JSON object.
pub fn require_object(body: Value) -> Result<Record, CoreError> {
    match body {
        Value::Object(map) => Ok(map),
        other => Err(CoreError::Validation(format!(
            "expected a JSON object, got {}",
            kind(&other)
        ))),
    }
}

/// Copy every top-level key of `patch` onto `target`.
///
/// Existing keys are overwritten, new keys are appended, nothing is removed.
/// A `null` patch leaves the target untouched.
pub fn shallow_merge(target: &mut Record, patch: Value) -> Result<(), CoreError> {
    match patch {
        Value::Null => Ok(()),
        Value::Object(fields) => {
            for (key, value) in fields {
                target.insert(key, value);
            }
            Ok(())
        }
        other => Err(CoreError::Validation(format!(
            "merge patch must be a JSON object, got {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn obj(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn merge_overwrites_and_adds_without_removing() {
        let mut colors = obj(json!({"a": 1, "b": 2}));
        shallow_merge(&mut colors, json!({"b": 3, "c": 4})).unwrap();
        assert_eq!(Value::Object(colors), json!({"a": 1, "b": 3, "c": 4}));
    }

    #[test]
    fn merge_is_shallow() {
        let mut target = obj(json!({"nested": {"x": 1, "y": 2}}));
        shallow_merge(&mut target, json!({"nested": {"x": 9}})).unwrap();
        assert_eq!(target["nested"], json!({"x": 9}));
    }

    #[test]
    fn merge_keeps_key_order() {
        let mut target = obj(json!({"z": 1, "a": 2}));
        shallow_merge(&mut target, json!({"m": 3, "z": 4})).unwrap();
        let keys: Vec<_> = target.keys().cloned().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn null_patch_is_noop() {
        let mut target = obj(json!({"a": 1}));
        shallow_merge(&mut target, Value::Null).unwrap();
        assert_eq!(Value::Object(target), json!({"a": 1}));
    }

    #[test]
    fn scalar_patch_is_rejected() {
        let mut target = obj(json!({}));
        assert_matches!(
            shallow_merge(&mut target, json!("red")),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn require_object_rejects_arrays() {
        assert_matches!(require_object(json!([1])), Err(CoreError::Validation(msg)) if msg.contains("array"));
        assert!(require_object(json!({"url": "x.png"})).is_ok());
    }
}
