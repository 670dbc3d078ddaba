// imgtool/src/processors/compressor.rs
use crate::core::{ImgToolError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use oxipng::{optimize_from_memory, Options};
use std::io::Cursor;
use std::path::Path;

/// Encodes finished images in memory and writes them out in one step, so a failed encode
/// never leaves a partial file behind.
///
/// PNG output is always re-compressed losslessly with oxipng.
pub struct Compressor {
    quality: u8,
}

impl Compressor {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    /// Saves `image` to `path`, picking the encoder from the destination extension.
    pub fn save(&self, image: &DynamicImage, path: &Path) -> Result<u64> {
        let format = self.detect_format(path);
        log::debug!(
            "Saving image to {} as {:?} (quality {})",
            path.display(),
            format,
            self.quality
        );

        let data = self
            .compress_to_bytes(image, format)
            .map_err(|e| ImgToolError::write(path, e))?;
        std::fs::write(path, &data).map_err(|e| ImgToolError::write(path, e))?;

        log::debug!("Saved image: {} ({} bytes)", path.display(), data.len());
        Ok(data.len() as u64)
    }

    /// Copies the source bytes verbatim; used when the transform is a no-op.
    ///
    /// When `path` already is `source` the bytes are in place and nothing is written.
    pub fn copy_original(&self, source: &Path, path: &Path) -> Result<u64> {
        if is_same_file(source, path) {
            log::debug!("{} is its own destination, leaving it untouched", source.display());
            return std::fs::metadata(source)
                .map(|metadata| metadata.len())
                .map_err(|e| ImgToolError::write(path, e));
        }
        std::fs::copy(source, path).map_err(|e| ImgToolError::write(path, e))
    }

    pub fn compress_to_bytes(
        &self,
        image: &DynamicImage,
        format: ImageFormat,
    ) -> std::result::Result<Vec<u8>, String> {
        let mut buffer = Cursor::new(Vec::new());

        match format {
            ImageFormat::Jpeg => {
                // JPEG has no alpha channel.
                let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
                rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, self.quality))
                    .map_err(|e| e.to_string())?;
            }
            ImageFormat::Png => {
                image
                    .write_to(&mut buffer, ImageFormat::Png)
                    .map_err(|e| e.to_string())?;
                return Ok(self.optimize_png_bytes(buffer.into_inner()));
            }
            _ => {
                image.write_to(&mut buffer, format).map_err(|e| e.to_string())?;
            }
        }

        Ok(buffer.into_inner())
    }

    fn optimize_png_bytes(&self, data: Vec<u8>) -> Vec<u8> {
        match optimize_from_memory(&data, &Options::default()) {
            Ok(optimized) if optimized.len() < data.len() => optimized,
            Ok(_) => data,
            Err(e) => {
                log::warn!("PNG optimization failed, keeping unoptimized output: {}", e);
                data
            }
        }
    }

    fn detect_format(&self, path: &Path) -> ImageFormat {
        ImageFormat::from_path(path).unwrap_or(ImageFormat::Png)
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new(90)
    }
}
