//! Identifier generation for new records.

use serde_json::Value;

/// Identifier for a new nested record (image, template, customized template).
///
/// UUID v7: time ordered like the millisecond ids clients are used to, but
/// two records created in the same millisecond still get distinct ids.
pub fn new_record_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// Identifier for a record inserted through the generic collection routes.
///
/// Collections whose existing ids are all integers keep counting
/// (`max + 1`); anything else gets a fresh UUID string.
pub fn next_collection_id(records: &[Value]) -> Value {
    let mut max: Option<i64> = None;
    for record in records {
        match record.get("id").and_then(Value::as_i64) {
            Some(id) => max = Some(max.map_or(id, |m| m.max(id))),
            None => return Value::String(new_record_id()),
        }
    }
    Value::from(max.map_or(1, |m| m + 1))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;

    use super::*;

    #[test]
    fn nested_ids_are_unique_within_one_instant() {
        let ids: HashSet<String> = (0..1000).map(|_| new_record_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn integer_collections_increment() {
        let records = vec![json!({"id": 3}), json!({"id": 10}), json!({"id": 4})];
        assert_eq!(next_collection_id(&records), json!(11));
    }

    #[test]
    fn empty_collection_starts_at_one() {
        assert_eq!(next_collection_id(&[]), json!(1));
    }

    #[test]
    fn string_ids_switch_to_uuid() {
        let records = vec![json!({"id": 1}), json!({"id": "abc"})];
        let id = next_collection_id(&records);
        assert!(id.is_string());
        assert!(uuid::Uuid::parse_str(id.as_str().unwrap()).is_ok());
    }
}
