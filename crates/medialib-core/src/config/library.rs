//! Asset store behaviour configuration.

use serde::{Deserialize, Serialize};

/// Settings for the virtual asset store and the content editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Maximum number of URLs kept in the effective-credit cache.
    #[serde(default = "default_credit_cache_capacity")]
    pub credit_cache_capacity: u64,
    /// Seconds before a cached credit is re-read from the lookup.
    #[serde(default = "default_credit_cache_ttl")]
    pub credit_cache_ttl_seconds: u64,
    /// Buffer size of the asset change feed.
    #[serde(default = "default_change_feed_capacity")]
    pub change_feed_capacity: usize,
    /// Folder path that receives uploads with no explicit destination.
    #[serde(default = "default_upload_folder")]
    pub default_upload_folder: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            credit_cache_capacity: default_credit_cache_capacity(),
            credit_cache_ttl_seconds: default_credit_cache_ttl(),
            change_feed_capacity: default_change_feed_capacity(),
            default_upload_folder: default_upload_folder(),
        }
    }
}

fn default_credit_cache_capacity() -> u64 {
    10_000
}

fn default_credit_cache_ttl() -> u64 {
    60
}

fn default_change_feed_capacity() -> usize {
    256
}

fn default_upload_folder() -> String {
    "materials".to_string()
}
