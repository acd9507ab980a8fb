#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Project not found")]
    ProjectNotFound,

    /// A nested record or branding fragment is missing on an existing project.
    #[error("{entity} not found")]
    SubResourceNotFound { entity: &'static str },

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("{collection} with id {id} not found")]
    RecordNotFound { collection: String, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// True for every variant that should surface as HTTP 404.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::ProjectNotFound
                | CoreError::SubResourceNotFound { .. }
                | CoreError::CollectionNotFound(_)
                | CoreError::RecordNotFound { .. }
        )
    }
}
