//! Generic CRUD over every top-level key of the document.
//!
//! Array-valued keys behave as collections of records addressed by `id`.
//! Object-valued keys behave as singular resources that are read, replaced
//! or merged as a whole.

use brandkit_core::error::CoreError;
use brandkit_core::ids;
use brandkit_core::listing::{self, ListPage, ListQuery};
use brandkit_core::merge;
use brandkit_core::records;
use brandkit_core::types::Record;
use serde_json::Value;

use crate::store::{JsonStore, StoreError};

/// What `GET /{name}` resolves to.
#[derive(Debug)]
pub enum Listing {
    /// An array collection after filtering, sorting and slicing.
    Collection(ListPage),
    /// A singular object resource.
    Singular(Value),
}

/// Provides CRUD operations for any top-level collection.
pub struct CollectionRepo;

impl CollectionRepo {
    /// The entire document.
    pub async fn database(store: &JsonStore) -> Value {
        store.snapshot().await
    }

    /// List an array collection, or return a singular resource as-is.
    pub async fn list(
        store: &JsonStore,
        name: &str,
        query: &ListQuery,
    ) -> Result<Listing, StoreError> {
        let result = store
            .read(|root| match root.get(name) {
                Some(Value::Array(items)) => Ok(Listing::Collection(listing::apply(items, query))),
                Some(Value::Object(obj)) => Ok(Listing::Singular(Value::Object(obj.clone()))),
                _ => Err(CoreError::CollectionNotFound(name.to_string())),
            })
            .await?;
        Ok(result)
    }

    /// Find a record by id.
    pub async fn find_by_id(store: &JsonStore, name: &str, id: &str) -> Result<Value, StoreError> {
        let record = store
            .read(|root| {
                let items = records::array(root, name)?;
                items
                    .iter()
                    .find(|r| records::id_matches(r, id))
                    .cloned()
                    .ok_or_else(|| record_not_found(name, id))
            })
            .await?;
        Ok(record)
    }

    /// Insert a record, or replace a singular resource.
    ///
    /// A missing key is created as an array. Records without an `id` get one
    /// from [`ids::next_collection_id`]; a duplicate `id` is a conflict.
    pub async fn create(store: &JsonStore, name: &str, body: Value) -> Result<Value, StoreError> {
        let fields = merge::require_object(body)?;
        store
            .update(|root| {
                let slot = root
                    .entry(name)
                    .or_insert_with(|| Value::Array(Vec::new()));
                match slot {
                    Value::Array(items) => {
                        let id = match fields.get("id") {
                            None | Some(Value::Null) => ids::next_collection_id(items),
                            Some(id) => id.clone(),
                        };
                        let id_text = id_text(&id)?;
                        if records::position_by_id(items, &id_text).is_some() {
                            return Err(CoreError::Conflict(format!(
                                "{name} already contains a record with id {id_text}"
                            )));
                        }
                        let record = Value::Object(with_id(id, fields));
                        items.push(record.clone());
                        Ok(record)
                    }
                    Value::Object(obj) => {
                        *obj = fields;
                        Ok(Value::Object(obj.clone()))
                    }
                    _ => Err(not_a_collection(name)),
                }
            })
            .await
    }

    /// Replace a record, keeping its id.
    pub async fn replace(
        store: &JsonStore,
        name: &str,
        id: &str,
        body: Value,
    ) -> Result<Value, StoreError> {
        let fields = merge::require_object(body)?;
        store
            .update(|root| {
                let record = record_mut(root, name, id)?;
                let original_id = record.get("id").cloned().unwrap_or(Value::Null);
                *record = with_id(original_id, fields);
                Ok(Value::Object(record.clone()))
            })
            .await
    }

    /// Shallow-merge into a record, keeping its id.
    pub async fn patch(
        store: &JsonStore,
        name: &str,
        id: &str,
        body: Value,
    ) -> Result<Value, StoreError> {
        store
            .update(|root| {
                let record = record_mut(root, name, id)?;
                let original_id = record.get("id").cloned().unwrap_or(Value::Null);
                merge::shallow_merge(record, body)?;
                record.insert("id".to_string(), original_id);
                Ok(Value::Object(record.clone()))
            })
            .await
    }

    /// Remove a record.
    pub async fn delete(store: &JsonStore, name: &str, id: &str) -> Result<(), StoreError> {
        store
            .update(|root| {
                let items = records::array_mut(root, name)?;
                let index =
                    records::position_by_id(items, id).ok_or_else(|| record_not_found(name, id))?;
                items.remove(index);
                Ok(())
            })
            .await
    }

    /// Replace a singular resource.
    pub async fn replace_singular(
        store: &JsonStore,
        name: &str,
        body: Value,
    ) -> Result<Value, StoreError> {
        let fields = merge::require_object(body)?;
        store
            .update(|root| {
                let obj = singular_mut(root, name)?;
                *obj = fields;
                Ok(Value::Object(obj.clone()))
            })
            .await
    }

    /// Shallow-merge into a singular resource.
    pub async fn patch_singular(
        store: &JsonStore,
        name: &str,
        body: Value,
    ) -> Result<Value, StoreError> {
        store
            .update(|root| {
                let obj = singular_mut(root, name)?;
                merge::shallow_merge(obj, body)?;
                Ok(Value::Object(obj.clone()))
            })
            .await
    }
}

fn record_mut<'a>(root: &'a mut Record, name: &str, id: &str) -> Result<&'a mut Record, CoreError> {
    records::array_mut(root, name)?
        .iter_mut()
        .find(|r| records::id_matches(r, id))
        .and_then(Value::as_object_mut)
        .ok_or_else(|| record_not_found(name, id))
}

fn singular_mut<'a>(root: &'a mut Record, name: &str) -> Result<&'a mut Record, CoreError> {
    match root.get_mut(name) {
        Some(Value::Object(obj)) => Ok(obj),
        Some(_) => Err(not_a_collection(name)),
        None => Err(CoreError::CollectionNotFound(name.to_string())),
    }
}

/// Build a record with `id` as its first key.
fn with_id(id: Value, mut fields: Record) -> Record {
    fields.shift_remove("id");
    let mut record = Record::new();
    record.insert("id".to_string(), id);
    record.extend(fields);
    record
}

fn id_text(id: &Value) -> Result<String, CoreError> {
    match id {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(CoreError::Validation(format!(
            "id must be a string or number, got {other}"
        ))),
    }
}

fn record_not_found(name: &str, id: &str) -> CoreError {
    CoreError::RecordNotFound {
        collection: name.to_string(),
        id: id.to_string(),
    }
}

fn not_a_collection(name: &str) -> CoreError {
    CoreError::Validation(format!(
        "'{name}' does not support this operation for its current shape"
    ))
}
