//! The virtual asset store.
//!
//! [`AssetStore`] owns every operation on the folder/file tree. Its
//! methods are split by concern across the submodules: folder and file
//! CRUD in `store`, the trash lifecycle in `trash`, credit resolution in
//! `credit`, path lookups in `path`, tree views in `tree`, resized display
//! URLs in `display`, and live snapshots in `subscription`.

pub mod credit;
pub mod display;
pub mod path;
pub mod store;
pub mod subscription;
pub mod trash;
pub mod tree;

pub use credit::CreditCache;
pub use store::AssetStore;
pub use subscription::{AssetStream, FolderStream};
pub use trash::PurgeReport;
