//! Image variant rendering.

use std::io::Cursor;

use bytes::Bytes;
use image::{DynamicImage, ImageFormat};

use medialib_core::error::{AppError, ErrorKind};
use medialib_core::result::AppResult;
use medialib_core::traits::storage::Dimensions;

/// Renders bounded JPEG variants of stored images.
#[derive(Debug, Clone)]
pub struct VariantResizer {
    /// Key prefix under which variants are written.
    variant_dir: String,
}

impl VariantResizer {
    /// Create a resizer writing under `variant_dir`.
    pub fn new(variant_dir: &str) -> Self {
        Self {
            variant_dir: variant_dir.trim_matches('/').to_string(),
        }
    }

    /// Check if a source key looks like a raster format the resizer handles.
    pub fn is_supported(key: &str) -> bool {
        let ext = key.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
        matches!(
            ext.as_str(),
            "jpg" | "jpeg" | "png" | "gif" | "webp" | "bmp"
        )
    }

    /// Whether a key already points inside the variant directory.
    pub fn is_variant_key(&self, key: &str) -> bool {
        key.starts_with(&format!("{}/", self.variant_dir))
    }

    /// Key prefix under which variants are written.
    pub fn variant_dir(&self) -> &str {
        &self.variant_dir
    }

    /// Path of a variant relative to its size directory.
    pub fn variant_file(&self, source_key: &str) -> String {
        let stem = source_key
            .rsplit_once('.')
            .map_or(source_key, |(stem, _)| stem);
        format!("{stem}.jpg")
    }

    /// Storage key of the variant for `source_key` at `dimensions`.
    pub fn variant_key(&self, source_key: &str, dimensions: Dimensions) -> String {
        format!(
            "{}/{}x{}/{}",
            self.variant_dir,
            dimensions.width,
            dimensions.height,
            self.variant_file(source_key)
        )
    }

    /// Render a variant on the blocking pool.
    pub async fn render(&self, source: Bytes, dimensions: Dimensions) -> AppResult<Bytes> {
        tokio::task::spawn_blocking(move || Self::resize_image(&source, dimensions))
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Variant task panicked", e))?
    }

    /// Fit an image inside `dimensions`, preserving aspect ratio, and encode as JPEG.
    fn resize_image(data: &[u8], dimensions: Dimensions) -> AppResult<Bytes> {
        if data.is_empty() {
            return Err(AppError::validation("Empty image data"));
        }
        if dimensions.width == 0 || dimensions.height == 0 {
            return Err(AppError::validation("Variant dimensions must be positive"));
        }

        let image = image::load_from_memory(data).map_err(|e| {
            AppError::with_source(ErrorKind::Validation, "Failed to decode image", e)
        })?;
        let resized = image.thumbnail(dimensions.width, dimensions.height);
        let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());

        let mut buffer = Vec::new();
        rgb.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Jpeg)
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to encode variant", e))?;
        Ok(Bytes::from(buffer))
    }
}

#[cfg(test)]
pub(crate) fn sample_png(width: u32, height: u32) -> Bytes {
    let image = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        width,
        height,
        image::Rgb([200, 30, 30]),
    ));
    let mut buffer = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    Bytes::from(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_key() {
        let resizer = VariantResizer::new("_variants/");
        assert_eq!(
            resizer.variant_key("root/abc-photo.png", Dimensions::new(320, 200)),
            "_variants/320x200/root/abc-photo.jpg"
        );
        assert!(resizer.is_variant_key("_variants/320x200/root/abc-photo.jpg"));
        assert!(!resizer.is_variant_key("root/abc-photo.png"));
    }

    #[test]
    fn test_supported_formats() {
        assert!(VariantResizer::is_supported("a/b.PNG"));
        assert!(!VariantResizer::is_supported("a/b.svg"));
        assert!(!VariantResizer::is_supported("noext"));
    }

    #[tokio::test]
    async fn test_render_fits_bounding_box() {
        let resizer = VariantResizer::new("_variants");
        let out = resizer
            .render(sample_png(400, 200), Dimensions::square(100))
            .await
            .unwrap();
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!(decoded.width(), 100);
        assert_eq!(decoded.height(), 50);
    }

    #[tokio::test]
    async fn test_render_rejects_garbage() {
        let resizer = VariantResizer::new("_variants");
        let err = resizer
            .render(Bytes::from_static(b"not an image"), Dimensions::square(10))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }
}
