/// Record identifiers as they appear in request paths.
pub type RecordId = String;

/// A single JSON record (an object with arbitrary fields).
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Top-level key of the projects collection.
pub const PROJECTS: &str = "projects";
