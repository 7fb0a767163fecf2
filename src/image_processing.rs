use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageReader};
use std::path::Path;

use crate::constants::THUMBNAIL_JPEG_QUALITY;
use crate::exif_parser::{apply_orientation, read_orientation};

/// Creates a JPEG thumbnail whose longest side is at most `size` pixels.
/// The aspect ratio is preserved and EXIF orientation is applied.
pub fn create_thumbnail_in_memory(source_path: &Path, size: u32) -> Result<Vec<u8>> {
    let img = ImageReader::open(source_path)
        .with_context(|| format!("Failed to open image: {:?}", source_path))?
        .with_guessed_format()?
        .decode()
        .with_context(|| format!("Failed to decode image: {:?}", source_path))?;

    let img = apply_orientation(img, read_orientation(source_path));
    encode_scaled(img, size)
}

fn encode_scaled(img: DynamicImage, size: u32) -> Result<Vec<u8>> {
    // Triangle filter is fast and sufficient for thumbnails
    let scaled = img.resize(size, size, image::imageops::FilterType::Triangle);
    let rgb_image = DynamicImage::ImageRgb8(scaled.to_rgb8());

    let mut jpeg_data = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg_data, THUMBNAIL_JPEG_QUALITY);
    rgb_image
        .write_with_encoder(encoder)
        .context("Failed to encode thumbnail as JPEG")?;

    Ok(jpeg_data)
}
