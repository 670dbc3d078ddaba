// imgtool/src/processors/loader.rs
use crate::core::{ImgToolError, Result, MAX_TARGET_SIZE};
use crate::utils::image_format_to_string;
use image::{DynamicImage, GenericImageView, ImageReader, Limits};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Loader {
    max_dimensions: Option<(u32, u32)>,
}

/// Header-level facts about an image file, read without decoding pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageProbe {
    pub width: u32,
    pub height: u32,
    pub format: String,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            max_dimensions: Some((MAX_TARGET_SIZE, MAX_TARGET_SIZE)),
        }
    }

    pub fn load(&self, path: &Path) -> Result<DynamicImage> {
        log::debug!("Loading image from: {}", path.display());

        let metadata = path.metadata().map_err(|e| ImgToolError::decode(path, e))?;
        if metadata.len() == 0 {
            return Err(ImgToolError::decode(path, "file is empty"));
        }

        let mut reader = ImageReader::open(path)
            .map_err(|e| ImgToolError::decode(path, e))?
            .with_guessed_format()
            .map_err(|e| ImgToolError::decode(path, e))?;
        reader.limits(self.limits());

        // Oversized headers are refused here, before any pixel buffer is allocated.
        let image = reader.decode().map_err(|e| ImgToolError::decode(path, e))?;
        let (width, height) = image.dimensions();

        log::debug!(
            "Loaded image: {}x{} pixels, color: {:?}",
            width,
            height,
            image.color()
        );

        Ok(image)
    }

    fn limits(&self) -> Limits {
        let mut limits = Limits::default();
        if let Some((max_w, max_h)) = self.max_dimensions {
            limits.max_image_width = Some(max_w);
            limits.max_image_height = Some(max_h);
        }
        limits
    }

    /// Reads only the header: dimensions and detected format.
    pub fn probe(&self, path: &Path) -> Result<ImageProbe> {
        let reader = ImageReader::open(path)?
            .with_guessed_format()
            .map_err(|e| ImgToolError::decode(path, e))?;

        let format = reader
            .format()
            .map(image_format_to_string)
            .unwrap_or_else(|| "Unknown".to_string());

        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| ImgToolError::decode(path, e))?;

        Ok(ImageProbe {
            width,
            height,
            format,
        })
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn probe_reads_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        RgbImage::from_pixel(30, 12, Rgb([1, 2, 3])).save(&path).unwrap();

        let probe = Loader::new().probe(&path).unwrap();
        assert_eq!((probe.width, probe.height), (30, 12));
        assert_eq!(probe.format, "PNG");
    }

    #[test]
    fn corrupt_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let err = Loader::new().load(&path).unwrap_err();
        assert!(matches!(err, ImgToolError::DecodeError { .. }));
    }

    #[test]
    fn oversized_image_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.png");
        RgbImage::new(16, 4).save(&path).unwrap();

        let loader = Loader {
            max_dimensions: Some((8, 8)),
        };
        assert!(matches!(
            loader.load(&path),
            Err(ImgToolError::DecodeError { .. })
        ));
        assert!(Loader::new().load(&path).is_ok());
    }

    #[test]
    fn empty_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        std::fs::write(&path, b"").unwrap();

        assert!(matches!(
            Loader::new().load(&path),
            Err(ImgToolError::DecodeError { .. })
        ));
    }
}
