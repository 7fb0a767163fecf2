use exif::{In, Tag};
use image::DynamicImage;
use std::path::Path;

use super::reader::read_exif;

/// EXIF orientation of the photo, `1` when absent or unreadable.
pub fn read_orientation(source_path: &Path) -> u32 {
    read_exif(source_path)
        .ok()
        .flatten()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|f| f.value.get_uint(0))
        })
        .unwrap_or(1)
}

/// Rotates/flips a decoded image so it displays upright.
pub fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate270().fliph(),
        6 => img.rotate90(),
        7 => img.rotate90().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}
