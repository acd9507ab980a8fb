//! Repositories over the document store.
//!
//! Each repository is a zero-sized struct with async associated functions
//! taking the store as first argument. Mutations run inside
//! [`JsonStore::update`](crate::JsonStore::update) and are persisted before
//! they return.

pub mod collection_repo;
pub mod nested_repo;
pub mod project_repo;

pub use collection_repo::{CollectionRepo, Listing};
pub use nested_repo::NestedRepo;
pub use project_repo::ProjectRepo;
