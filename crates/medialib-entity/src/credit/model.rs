//! Credit lookup entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use medialib_core::types::AssetId;

/// The global attribution for one blob URL.
///
/// Every asset referencing `url` reads its credit from this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CreditRecord {
    /// The blob URL this credit belongs to.
    pub url: String,
    /// Attribution text.
    pub credit: String,
    /// When the credit was last written.
    pub updated_at: DateTime<Utc>,
}

/// What a credit update is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditTarget {
    /// A file asset; its URL is used as the key.
    Asset(AssetId),
    /// A blob URL directly.
    Url(String),
}

impl CreditTarget {
    /// Interpret user input: a UUID is an asset id, anything else a URL.
    pub fn parse(input: &str) -> Self {
        match input.trim().parse::<AssetId>() {
            Ok(id) => Self::Asset(id),
            Err(_) => Self::Url(input.trim().to_string()),
        }
    }
}

impl From<AssetId> for CreditTarget {
    fn from(value: AssetId) -> Self {
        Self::Asset(value)
    }
}
