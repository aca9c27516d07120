//! # medialib-storage
//!
//! Object storage providers for the media library. Blobs are written once,
//! addressed by URL afterwards, and deleted by URL. The local provider also
//! renders resized display variants.

pub mod factory;
pub mod keys;
pub mod limits;
pub mod providers;
pub mod variant;

pub use factory::build_storage;
pub use limits::UploadLimits;
pub use providers::local::LocalObjectStorage;
pub use providers::memory::MemoryObjectStorage;
#[cfg(feature = "s3")]
pub use providers::s3::S3ObjectStorage;
pub use variant::VariantResizer;
