//! Build the configured object storage provider.

use std::sync::Arc;

use tracing::info;

use medialib_core::config::storage::{StorageConfig, StorageProviderKind};
use medialib_core::result::AppResult;
use medialib_core::traits::storage::ObjectStorage;

use crate::limits::UploadLimits;
use crate::providers::local::LocalObjectStorage;
use crate::providers::memory::MemoryObjectStorage;
use crate::variant::VariantResizer;

/// Instantiate the provider named by `config.provider`.
pub async fn build_storage(config: &StorageConfig) -> AppResult<Arc<dyn ObjectStorage>> {
    let limits = UploadLimits::from(config);
    let storage: Arc<dyn ObjectStorage> = match config.provider {
        StorageProviderKind::Local => Arc::new(
            LocalObjectStorage::new(
                &config.local.root_path,
                &config.public_base_url,
                limits,
                VariantResizer::new(&config.variant_dir),
            )
            .await?,
        ),
        StorageProviderKind::Memory => {
            Arc::new(MemoryObjectStorage::new(&config.public_base_url, limits))
        }
        StorageProviderKind::S3 => build_s3(config, limits)?,
    };
    info!(provider = storage.provider_type(), "Object storage ready");
    Ok(storage)
}

#[cfg(feature = "s3")]
fn build_s3(config: &StorageConfig, limits: UploadLimits) -> AppResult<Arc<dyn ObjectStorage>> {
    let storage =
        crate::providers::s3::S3ObjectStorage::new(&config.s3, &config.public_base_url, limits)?;
    Ok(Arc::new(storage))
}

#[cfg(not(feature = "s3"))]
fn build_s3(_config: &StorageConfig, _limits: UploadLimits) -> AppResult<Arc<dyn ObjectStorage>> {
    Err(medialib_core::AppError::configuration(
        "S3 storage requires building with the `s3` feature",
    ))
}
