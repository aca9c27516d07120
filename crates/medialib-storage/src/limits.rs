//! Upload size and content-type limits.

use medialib_core::config::storage::StorageConfig;
use medialib_core::error::AppError;
use medialib_core::result::AppResult;

/// Limits every provider applies before accepting bytes.
#[derive(Debug, Clone)]
pub struct UploadLimits {
    /// Largest accepted payload in bytes.
    pub max_size_bytes: u64,
    /// Accepted MIME types. Empty accepts everything.
    pub allowed_content_types: Vec<String>,
}

impl UploadLimits {
    /// No limits at all.
    pub fn unlimited() -> Self {
        Self {
            max_size_bytes: u64::MAX,
            allowed_content_types: Vec::new(),
        }
    }

    /// Reject payloads that are empty, too large, or of a disallowed type.
    pub fn check(&self, size_bytes: u64, content_type: Option<&str>) -> AppResult<()> {
        if size_bytes == 0 {
            return Err(AppError::upload("Refusing to store an empty upload"));
        }
        if size_bytes > self.max_size_bytes {
            return Err(AppError::upload(format!(
                "Upload of {size_bytes} bytes exceeds the {} byte limit",
                self.max_size_bytes
            )));
        }
        if self.allowed_content_types.is_empty() {
            return Ok(());
        }
        let accepted = content_type.is_some_and(|ct| {
            self.allowed_content_types
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ct))
        });
        if accepted {
            Ok(())
        } else {
            Err(AppError::upload(format!(
                "Content type {} is not accepted",
                content_type.unwrap_or("(none)")
            )))
        }
    }
}

impl From<&StorageConfig> for UploadLimits {
    fn from(config: &StorageConfig) -> Self {
        Self {
            max_size_bytes: config.max_upload_size_bytes,
            allowed_content_types: config.allowed_content_types.clone(),
        }
    }
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self::from(&StorageConfig::default())
    }
}
