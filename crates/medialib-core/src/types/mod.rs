//! Core type definitions used across the medialib workspace.

pub mod id;

pub use id::*;
