//! Remote directory storage.

pub mod github;

pub use github::{serialize_directory, DirectoryStore};
