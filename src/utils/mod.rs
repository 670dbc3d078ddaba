// imgtool/src/utils/mod.rs
mod interrupt;
mod pattern;

pub use interrupt::{ArmedGuard, Interrupt, SignalAction};
pub use pattern::{expand, expand_all};

use std::path::{Path, PathBuf};

pub const SUPPORTED_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp"];

/// `output_dir / (stem + suffix + ext)`, where `ext` is `png` when `force_png` is set or the
/// source has no extension, and the source extension otherwise.
pub fn destination_path(source: &Path, output_dir: &Path, suffix: &str, force_png: bool) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    let extension = match source.extension() {
        Some(ext) if !force_png => ext.to_string_lossy().into_owned(),
        _ => "png".to_string(),
    };

    output_dir.join(format!("{}{}.{}", stem, suffix, extension))
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = ((bytes_f64.log10() / base.log10()).floor() as usize).min(UNITS.len() - 1);
    let size = bytes_f64 / base.powi(exponent as i32);

    format!("{:.1} {}", size, UNITS[exponent])
}

pub fn is_supported_format(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn image_format_to_string(format: image::ImageFormat) -> String {
    match format {
        image::ImageFormat::Jpeg => "JPEG",
        image::ImageFormat::Png => "PNG",
        image::ImageFormat::Gif => "GIF",
        image::ImageFormat::WebP => "WebP",
        image::ImageFormat::Tiff => "TIFF",
        image::ImageFormat::Bmp => "BMP",
        image::ImageFormat::Ico => "ICO",
        _ => "Unknown",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_keeps_extension_unless_forced() {
        let out = Path::new("out");
        assert_eq!(
            destination_path(Path::new("in/photo.jpg"), out, "_48", false),
            PathBuf::from("out/photo_48.jpg")
        );
        assert_eq!(
            destination_path(Path::new("in/photo.jpg"), out, "", true),
            PathBuf::from("out/photo.png")
        );
        assert_eq!(
            destination_path(Path::new("in/README"), out, "", false),
            PathBuf::from("out/README.png")
        );
    }

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512.0 B");
        assert_eq!(format_file_size(2048), "2.0 KB");
    }

    #[test]
    fn supported_extensions_are_case_insensitive() {
        assert!(is_supported_format(Path::new("a.PNG")));
        assert!(!is_supported_format(Path::new("notes.txt")));
    }
}
