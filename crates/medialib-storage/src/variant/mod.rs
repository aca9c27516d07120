//! Resized display variants.

pub mod resizer;

pub use resizer::VariantResizer;
