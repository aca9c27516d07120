//! URL-keyed attribution.

pub mod model;

pub use model::{CreditRecord, CreditTarget};
