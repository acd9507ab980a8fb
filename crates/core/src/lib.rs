//! Domain logic for the brandkit mock API.
//!
//! Everything here is pure: no file or network I/O. The store and HTTP
//! layers build on these helpers.

pub mod error;
pub mod ids;
pub mod listing;
pub mod merge;
pub mod nested;
pub mod records;
pub mod types;
