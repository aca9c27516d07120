//! Collaborator traits defined in `medialib-core` and implemented by other crates.

pub mod storage;

pub use storage::{DeleteOutcome, Dimensions, ObjectStorage, StoredObject};
