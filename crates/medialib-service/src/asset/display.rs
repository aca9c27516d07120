//! Resized display URLs.

use tracing::warn;

use medialib_core::error::AppError;
use medialib_core::result::AppResult;
use medialib_core::traits::storage::Dimensions;
use medialib_entity::credit::CreditTarget;

use crate::asset::store::AssetStore;
use crate::context::RequestContext;

impl AssetStore {
    /// URL of a variant no larger than `dimensions` for a file or blob URL.
    ///
    /// Falls back to the original URL when the provider cannot resize.
    pub async fn display_url(
        &self,
        ctx: &RequestContext,
        target: CreditTarget,
        dimensions: Dimensions,
    ) -> AppResult<String> {
        let url = match target {
            CreditTarget::Asset(id) => {
                let asset = self.get(ctx, id).await?;
                let is_file = asset.is_file();
                asset
                    .url
                    .filter(|_| is_file)
                    .ok_or_else(|| AppError::validation(format!("Asset {id} is not a file")))?
            }
            CreditTarget::Url(url) => url,
        };

        match self.storage.resize(&url, dimensions).await {
            Ok(resized) => Ok(resized),
            Err(e) => {
                warn!(url = %url, error = %e, "Resize failed, serving original");
                Ok(url)
            }
        }
    }
}
