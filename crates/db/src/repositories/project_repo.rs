//! Logo and branding fields of a project.

use brandkit_core::error::CoreError;
use brandkit_core::merge;
use brandkit_core::records;
use brandkit_core::types::Record;
use serde_json::Value;

use crate::store::{JsonStore, StoreError};

const BRANDING: &str = "branding";
const COLORS: &str = "colors";
const FONTS: &str = "fonts";
const LOGO: &str = "logo";

const COLORS_ENTITY: &str = "Branding colors";
const FONTS_ENTITY: &str = "Branding fonts";

/// Operations on a project's own fields (as opposed to its nested arrays).
pub struct ProjectRepo;

impl ProjectRepo {
    /// Set `logo` on the project and return the updated project.
    ///
    /// `None` removes the key entirely.
    pub async fn set_logo(
        store: &JsonStore,
        project_id: &str,
        logo: Option<Value>,
    ) -> Result<Value, StoreError> {
        store
            .update(|root| {
                let project = records::project_mut(root, project_id)?;
                match logo {
                    Some(logo) => {
                        project.insert(LOGO.to_string(), logo);
                    }
                    None => {
                        project.shift_remove(LOGO);
                    }
                }
                Ok(Value::Object(project.clone()))
            })
            .await
    }

    /// Current `branding.colors`.
    pub async fn branding_colors(store: &JsonStore, project_id: &str) -> Result<Value, StoreError> {
        Self::branding_field(store, project_id, COLORS, COLORS_ENTITY).await
    }

    /// Current `branding.fonts`.
    pub async fn branding_fonts(store: &JsonStore, project_id: &str) -> Result<Value, StoreError> {
        Self::branding_field(store, project_id, FONTS, FONTS_ENTITY).await
    }

    /// Shallow-merge `patch` into `branding.colors` and return the result.
    ///
    /// The colors object must already exist; it is never created here.
    pub async fn merge_branding_colors(
        store: &JsonStore,
        project_id: &str,
        patch: Value,
    ) -> Result<Value, StoreError> {
        store
            .update(|root| {
                let project = records::project_mut(root, project_id)?;
                let colors = project
                    .get_mut(BRANDING)
                    .and_then(|b| b.get_mut(COLORS))
                    .filter(|c| !c.is_null())
                    .ok_or(CoreError::SubResourceNotFound {
                        entity: COLORS_ENTITY,
                    })?
                    .as_object_mut()
                    .ok_or_else(|| {
                        CoreError::Internal("branding.colors is not an object".to_string())
                    })?;
                merge::shallow_merge(colors, patch)?;
                Ok(Value::Object(colors.clone()))
            })
            .await
    }

    /// Replace `branding.fonts` wholesale, creating `branding` if needed.
    pub async fn replace_branding_fonts(
        store: &JsonStore,
        project_id: &str,
        fonts: Value,
    ) -> Result<Value, StoreError> {
        let fonts = Value::Object(merge::require_object(fonts)?);
        store
            .update(|root| {
                let project = records::project_mut(root, project_id)?;
                let branding = branding_mut(project)?;
                branding.insert(FONTS.to_string(), fonts.clone());
                Ok(fonts)
            })
            .await
    }

    async fn branding_field(
        store: &JsonStore,
        project_id: &str,
        field: &str,
        entity: &'static str,
    ) -> Result<Value, StoreError> {
        let value = store
            .read(|root| {
                let project = records::project(root, project_id)?;
                project
                    .get(BRANDING)
                    .and_then(|b| b.get(field))
                    .filter(|v| !v.is_null())
                    .cloned()
                    .ok_or(CoreError::SubResourceNotFound { entity })
            })
            .await?;
        Ok(value)
    }
}

fn branding_mut(project: &mut Record) -> Result<&mut Record, CoreError> {
    let slot = project
        .entry(BRANDING)
        .or_insert_with(|| Value::Object(Record::new()));
    if slot.is_null() {
        *slot = Value::Object(Record::new());
    }
    slot.as_object_mut()
        .ok_or_else(|| CoreError::Internal("project branding is not an object".to_string()))
}
