//! Images, templates and customized templates embedded in a project.

use brandkit_core::error::CoreError;
use brandkit_core::ids;
use brandkit_core::merge;
use brandkit_core::nested::NestedCollection;
use brandkit_core::records;
use brandkit_core::types::Record;
use serde_json::Value;

use crate::store::{JsonStore, StoreError};

/// CRUD over one of a project's nested arrays, selected by [`NestedCollection`].
pub struct NestedRepo;

impl NestedRepo {
    /// All records in the nested array; empty when the array is absent.
    pub async fn list(
        store: &JsonStore,
        kind: NestedCollection,
        project_id: &str,
    ) -> Result<Vec<Value>, StoreError> {
        let items = store
            .read(|root| {
                let project = records::project(root, project_id)?;
                Ok::<_, CoreError>(kind.items(project)?.cloned().unwrap_or_default())
            })
            .await?;
        Ok(items)
    }

    /// A single nested record by id.
    pub async fn find_by_id(
        store: &JsonStore,
        kind: NestedCollection,
        project_id: &str,
        record_id: &str,
    ) -> Result<Value, StoreError> {
        let item = store
            .read(|root| {
                let project = records::project(root, project_id)?;
                kind.find(project, record_id).cloned()
            })
            .await?;
        Ok(item)
    }

    /// Append `{ id: <generated>, ...body }` and return it.
    ///
    /// An `id` in the body overrides the generated one.
    pub async fn create(
        store: &JsonStore,
        kind: NestedCollection,
        project_id: &str,
        body: Value,
    ) -> Result<Value, StoreError> {
        let fields = merge::require_object(body)?;
        let mut record = Record::new();
        record.insert("id".to_string(), Value::String(ids::new_record_id()));
        record.extend(fields);
        let record = Value::Object(record);

        store
            .update(|root| {
                let project = records::project_mut(root, project_id)?;
                kind.items_mut(project)?.push(record.clone());
                Ok(record)
            })
            .await
    }

    /// Shallow-merge `patch` into the matching record and return it.
    pub async fn update(
        store: &JsonStore,
        kind: NestedCollection,
        project_id: &str,
        record_id: &str,
        patch: Value,
    ) -> Result<Value, StoreError> {
        store
            .update(|root| {
                let project = records::project_mut(root, project_id)?;
                let record = kind
                    .items_mut(project)?
                    .iter_mut()
                    .find(|item| records::id_matches(item, record_id))
                    .and_then(Value::as_object_mut)
                    .ok_or_else(|| kind.not_found())?;
                merge::shallow_merge(record, patch)?;
                Ok(Value::Object(record.clone()))
            })
            .await
    }

    /// Remove the matching record.
    pub async fn delete(
        store: &JsonStore,
        kind: NestedCollection,
        project_id: &str,
        record_id: &str,
    ) -> Result<(), StoreError> {
        store
            .update(|root| {
                let project = records::project_mut(root, project_id)?;
                let items = kind.items_mut(project)?;
                let index =
                    records::position_by_id(items, record_id).ok_or_else(|| kind.not_found())?;
                items.remove(index);
                Ok(())
            })
            .await
    }
}
