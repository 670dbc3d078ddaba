// imgtool/src/processors/resizer.rs
use image::{imageops, imageops::FilterType, DynamicImage, GenericImageView, RgbaImage};

/// Scales images onto a square `size x size` grid.
///
/// With `keep_aspect` the longer side maps to `size` and the result is centered on a fully
/// transparent square canvas; without it both axes are stretched independently.
#[derive(Debug, Clone, Copy)]
pub struct Resizer {
    size: u32,
    keep_aspect: bool,
    filter: FilterType,
}

impl Resizer {
    pub fn new(size: u32, keep_aspect: bool) -> Self {
        Self {
            size,
            keep_aspect,
            filter: FilterType::Lanczos3,
        }
    }

    pub fn resize(&self, image: &DynamicImage) -> DynamicImage {
        if self.keep_aspect {
            self.fit_and_pad(image)
        } else {
            self.stretch(image)
        }
    }

    fn stretch(&self, image: &DynamicImage) -> DynamicImage {
        if image.dimensions() == (self.size, self.size) {
            log::debug!("Image already {}x{}, skipping resize", self.size, self.size);
            return image.clone();
        }

        log::debug!(
            "Stretching image from {}x{} to {}x{}",
            image.width(),
            image.height(),
            self.size,
            self.size
        );
        image.resize_exact(self.size, self.size, self.filter)
    }

    fn fit_and_pad(&self, image: &DynamicImage) -> DynamicImage {
        let (width, height) = self.fitted_dimensions(image.width(), image.height());

        log::debug!(
            "Fitting image from {}x{} to {}x{} on a {}x{} canvas",
            image.width(),
            image.height(),
            width,
            height,
            self.size,
            self.size
        );

        let scaled = if (width, height) == image.dimensions() {
            image.to_rgba8()
        } else {
            image.resize_exact(width, height, self.filter).into_rgba8()
        };

        let mut canvas = RgbaImage::new(self.size, self.size);
        let x = (self.size - width) / 2;
        let y = (self.size - height) / 2;
        imageops::replace(&mut canvas, &scaled, i64::from(x), i64::from(y));

        DynamicImage::ImageRgba8(canvas)
    }

    /// Longer side becomes `size`, the shorter one keeps the ratio (rounded, at least 1).
    pub fn fitted_dimensions(&self, orig_w: u32, orig_h: u32) -> (u32, u32) {
        if orig_w == 0 || orig_h == 0 {
            return (self.size, self.size);
        }

        let scale_side = |side: u32, longer: u32| {
            let scaled = (f64::from(side) * f64::from(self.size) / f64::from(longer)).round() as u32;
            scaled.clamp(1, self.size)
        };

        if orig_w >= orig_h {
            (self.size, scale_side(orig_h, orig_w))
        } else {
            (scale_side(orig_w, orig_h), self.size)
        }
    }
}
