// imgtool/src/core/processor.rs
use super::{Result, TransformConfig};
use crate::processors::{ColorKeyer, Resizer};
use image::DynamicImage;

/// Applies one invocation's transform to decoded images: resize first, then color keying.
pub struct ImageTransformer {
    resizer: Option<Resizer>,
    keyer: Option<ColorKeyer>,
}

impl ImageTransformer {
    pub fn new(config: &TransformConfig) -> Result<Self> {
        config.validate()?;

        let resizer = config
            .target_size
            .map(|size| Resizer::new(size, config.keep_aspect));
        let keyer = if config.colors_to_remove.is_empty() {
            None
        } else {
            Some(ColorKeyer::new(
                config.colors_to_remove.clone(),
                config.tolerance,
            ))
        };

        Ok(Self { resizer, keyer })
    }

    pub fn transform(&self, image: DynamicImage) -> DynamicImage {
        let image = match &self.resizer {
            Some(resizer) => resizer.resize(&image),
            None => image,
        };

        match &self.keyer {
            Some(keyer) => keyer.apply(image),
            None => image,
        }
    }
}

/// One-off form of [`ImageTransformer::transform`].
pub fn transform(image: DynamicImage, config: &TransformConfig) -> Result<DynamicImage> {
    Ok(ImageTransformer::new(config)?.transform(image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HexColor;
    use image::{GenericImageView, Rgba, RgbaImage};

    #[test]
    fn resize_runs_before_keying() {
        let mut source = RgbaImage::from_pixel(40, 20, Rgba([255, 255, 255, 255]));
        source.put_pixel(0, 0, Rgba([10, 10, 10, 255]));

        let config = TransformConfig {
            target_size: Some(10),
            keep_aspect: true,
            colors_to_remove: vec![HexColor::new(255, 255, 255)],
            tolerance: 0,
            ..Default::default()
        };
        let out = transform(DynamicImage::ImageRgba8(source), &config).unwrap();

        assert_eq!(out.dimensions(), (10, 10));
        // Padding rows stay transparent, the white body is keyed out too.
        assert_eq!(out.get_pixel(5, 0)[3], 0);
        assert_eq!(out.get_pixel(5, 5)[3], 0);
    }

    #[test]
    fn invalid_config_is_a_transform_error() {
        let config = TransformConfig {
            target_size: Some(0),
            ..Default::default()
        };
        assert!(ImageTransformer::new(&config).is_err());
    }
}
