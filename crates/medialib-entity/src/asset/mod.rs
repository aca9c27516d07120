//! Virtual asset domain entities.

pub mod kind;
pub mod model;
pub mod parent;
pub mod tree;

pub use kind::AssetKind;
pub use model::{AssetPatch, CreateAsset, VirtualAsset, listing_order, sort_for_listing};
pub use parent::ParentRef;
pub use tree::AssetNode;
