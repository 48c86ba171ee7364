//! Saving rasterized figures.

use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

use crate::error::{RenderError, RenderResult};

/// Wraps raw RGBA pixel data (4 bytes per pixel, top-left origin).
pub fn image_from_raw(data: Vec<u8>, width: u32, height: u32) -> RenderResult<RgbaImage> {
    ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(width, height, data)
        .ok_or(RenderError::InvalidImageData)
}

/// Saves an image to a file.
///
/// The format follows the extension: `.png`, or `.jpg`/`.jpeg` (alpha is
/// dropped).
pub fn save_image(path: impl AsRef<Path>, img: &RgbaImage) -> RenderResult<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "png" => {
            img.save_with_format(path, image::ImageFormat::Png)?;
        }
        "jpg" | "jpeg" => {
            let rgb_img = image::DynamicImage::ImageRgba8(img.clone()).to_rgb8();
            rgb_img.save_with_format(path, image::ImageFormat::Jpeg)?;
        }
        _ => {
            return Err(RenderError::UnsupportedFormat(extension));
        }
    }

    log::info!("saved {}x{} image to {}", img.width(), img.height(), path.display());
    Ok(())
}

/// Encodes an image as PNG in memory.
pub fn save_to_buffer(img: &RgbaImage) -> RenderResult<Vec<u8>> {
    let mut buffer = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_buffer_signature() {
        let img = RgbaImage::from_pixel(4, 3, Rgba([10, 20, 30, 255]));
        let bytes = save_to_buffer(&img).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(*decoded.get_pixel(2, 1), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_unsupported_extension() {
        let img = RgbaImage::new(1, 1);
        let err = save_image("figure.tiff", &img).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat(ext) if ext == "tiff"));
    }

    #[test]
    fn test_raw_size_mismatch() {
        assert!(matches!(
            image_from_raw(vec![0; 7], 2, 1),
            Err(RenderError::InvalidImageData)
        ));
        assert!(image_from_raw(vec![0; 8], 2, 1).is_ok());
    }
}
