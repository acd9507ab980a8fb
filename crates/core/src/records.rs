//! Identifier lookup within record arrays.

use serde_json::Value;

use crate::error::CoreError;
use crate::types::Record;

/// Whether `record.id` equals `id`.
///
/// Path segments are always strings, so a numeric `id` matches its decimal
/// form (`7` matches `"7"`).
pub fn id_matches(record: &Value, id: &str) -> bool {
    match record.get("id") {
        Some(Value::String(s)) => s == id,
        Some(Value::Number(n)) => n.to_string() == id,
        _ => false,
    }
}

/// Index of the first record whose id equals `id`.
pub fn position_by_id(records: &[Value], id: &str) -> Option<usize> {
    records.iter().position(|r| id_matches(r, id))
}

/// Borrow the object stored under `collection` as an array of records.
pub fn array<'a>(root: &'a Record, collection: &str) -> Result<&'a Vec<Value>, CoreError> {
    match root.get(collection) {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(CoreError::CollectionNotFound(collection.to_string())),
    }
}

/// Mutable counterpart of [`array`].
pub fn array_mut<'a>(
    root: &'a mut Record,
    collection: &str,
) -> Result<&'a mut Vec<Value>, CoreError> {
    match root.get_mut(collection) {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(CoreError::CollectionNotFound(collection.to_string())),
    }
}

/// Find a project by id in the `projects` collection.
///
/// A missing collection is reported as a missing project.
pub fn project_mut<'a>(root: &'a mut Record, project_id: &str) -> Result<&'a mut Record, CoreError> {
    let projects = match root.get_mut(crate::types::PROJECTS) {
        Some(Value::Array(items)) => items,
        _ => return Err(CoreError::ProjectNotFound),
    };
    projects
        .iter_mut()
        .find(|p| id_matches(p, project_id))
        .and_then(Value::as_object_mut)
        .ok_or(CoreError::ProjectNotFound)
}

/// Read-only counterpart of [`project_mut`].
pub fn project<'a>(root: &'a Record, project_id: &str) -> Result<&'a Record, CoreError> {
    root.get(crate::types::PROJECTS)
        .and_then(Value::as_array)
        .and_then(|items| items.iter().find(|p| id_matches(p, project_id)))
        .and_then(Value::as_object)
        .ok_or(CoreError::ProjectNotFound)
}
