//! Collections embedded inside a project record.
//!
//! Images, templates and customized templates share one implementation;
//! they differ only by the key they are stored under and the entity name
//! used in not-found messages.

use serde_json::Value;

use crate::error::CoreError;
use crate::records;
use crate::types::Record;

/// One of the arrays nested under a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NestedCollection {
    Images,
    Templates,
    CustomizedTemplates,
}

impl NestedCollection {
    pub const ALL: [NestedCollection; 3] = [
        NestedCollection::Images,
        NestedCollection::Templates,
        NestedCollection::CustomizedTemplates,
    ];

    /// Key of the array inside the project record. Also the URL segment.
    pub fn key(self) -> &'static str {
        match self {
            NestedCollection::Images => "images",
            NestedCollection::Templates => "templates",
            NestedCollection::CustomizedTemplates => "customized-templates",
        }
    }

    /// Entity name used in error messages.
    pub fn entity(self) -> &'static str {
        match self {
            NestedCollection::Images => "Image",
            NestedCollection::Templates => "Template",
            NestedCollection::CustomizedTemplates => "Customized Template",
        }
    }

    pub fn not_found(self) -> CoreError {
        CoreError::SubResourceNotFound {
            entity: self.entity(),
        }
    }

    /// Borrow the nested array, if present.
    pub fn items(self, project: &Record) -> Result<Option<&Vec<Value>>, CoreError> {
        match project.get(self.key()) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(_) => Err(self.malformed()),
        }
    }

    /// Borrow the nested array mutably, creating an empty one when absent.
    pub fn items_mut(self, project: &mut Record) -> Result<&mut Vec<Value>, CoreError> {
        let slot = project
            .entry(self.key())
            .or_insert_with(|| Value::Array(Vec::new()));
        if slot.is_null() {
            *slot = Value::Array(Vec::new());
        }
        match slot {
            Value::Array(items) => Ok(items),
            _ => Err(self.malformed()),
        }
    }

    /// Find a record in the nested array by id, or the entity's not-found error.
    pub fn find<'a>(self, project: &'a Record, id: &str) -> Result<&'a Value, CoreError> {
        self.items(project)?
            .and_then(|items| items.iter().find(|item| records::id_matches(item, id)))
            .ok_or_else(|| self.not_found())
    }

    fn malformed(self) -> CoreError {
        CoreError::Internal(format!("project field '{}' is not an array", self.key()))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn project(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn customized_templates_key_is_hyphenated() {
        assert_eq!(NestedCollection::CustomizedTemplates.key(), "customized-templates");
        assert_eq!(
            NestedCollection::CustomizedTemplates.entity(),
            "Customized Template"
        );
    }

    #[test]
    fn missing_array_reads_as_none() {
        let p = project(json!({"id": "p1"}));
        assert!(NestedCollection::Images.items(&p).unwrap().is_none());
    }

    #[test]
    fn items_mut_creates_missing_array() {
        let mut p = project(json!({"id": "p1"}));
        NestedCollection::Templates
            .items_mut(&mut p)
            .unwrap()
            .push(json!({"id": "t1"}));
        assert_eq!(p["templates"], json!([{"id": "t1"}]));
    }

    #[test]
    fn non_array_field_is_internal_error() {
        let mut p = project(json!({"id": "p1", "images": "oops"}));
        assert_matches!(
            NestedCollection::Images.items_mut(&mut p),
            Err(CoreError::Internal(_))
        );
    }

    #[test]
    fn find_reports_entity_name() {
        let p = project(json!({"id": "p1", "images": [{"id": "a"}]}));
        assert!(NestedCollection::Images.find(&p, "a").is_ok());
        let err = NestedCollection::Images.find(&p, "b").unwrap_err();
        assert_eq!(err.to_string(), "Image not found");
    }
}
