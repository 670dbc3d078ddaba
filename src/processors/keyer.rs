// imgtool/src/processors/keyer.rs
use crate::core::HexColor;
use image::DynamicImage;

/// Turns pixels close to any of the listed colors fully transparent.
///
/// Matched pixels keep their RGB values; only alpha is cleared.
#[derive(Debug, Clone)]
pub struct ColorKeyer {
    colors: Vec<HexColor>,
    tolerance: u8,
}

impl ColorKeyer {
    pub fn new(colors: Vec<HexColor>, tolerance: u8) -> Self {
        Self { colors, tolerance }
    }

    pub fn is_match(&self, rgb: [u8; 3]) -> bool {
        self.colors.iter().any(|color| color.matches(rgb, self.tolerance))
    }

    pub fn apply(&self, image: DynamicImage) -> DynamicImage {
        let mut rgba = image.into_rgba8();
        let mut keyed = 0usize;

        for pixel in rgba.pixels_mut() {
            if self.is_match([pixel[0], pixel[1], pixel[2]]) {
                pixel[3] = 0;
                keyed += 1;
            }
        }

        log::debug!(
            "Keyed {} of {} pixels (tolerance {})",
            keyed,
            rgba.width() as usize * rgba.height() as usize,
            self.tolerance
        );

        DynamicImage::ImageRgba8(rgba)
    }
}
