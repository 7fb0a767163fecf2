//! Fixture builders shared by unit tests and by the `tests/` suite, which
//! includes this file through `#[path]`. The parent module must bring
//! `exif_parser` into scope.
#![allow(dead_code)]

use exif::{Field, In, Tag, Value};
use image::codecs::jpeg::JpegEncoder;
use std::io::{Cursor, Read};
use std::path::Path;

use super::exif_parser::{Axis, DmsTriple};

fn ascii(tag: Tag, text: &str) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![text.as_bytes().to_vec()]),
    }
}

fn dms(tag: Tag, dms: DmsTriple) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Rational(dms.0.iter().map(|&r| r.into()).collect()),
    }
}

/// TIFF-encoded EXIF block with an optional GPS position.
pub fn exif_block(position: Option<(f64, f64)>) -> Vec<u8> {
    let mut fields = vec![ascii(Tag::Make, "TestCam")];
    if let Some((lat, lon)) = position {
        let (lat_dms, lat_ref) = DmsTriple::from_decimal(lat, Axis::Latitude);
        let (lon_dms, lon_ref) = DmsTriple::from_decimal(lon, Axis::Longitude);
        fields.push(ascii(Tag::GPSLatitudeRef, lat_ref.as_ref_str()));
        fields.push(dms(Tag::GPSLatitude, lat_dms));
        fields.push(ascii(Tag::GPSLongitudeRef, lon_ref.as_ref_str()));
        fields.push(dms(Tag::GPSLongitude, lon_dms));
    }

    let mut writer = exif::experimental::Writer::new();
    for field in &fields {
        writer.push_field(field);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, false).unwrap();
    buf.into_inner()
}

/// Small JPEG, optionally carrying an APP1 EXIF segment right after SOI.
pub fn jpeg_bytes(exif: Option<&[u8]>) -> Vec<u8> {
    let img = image::RgbImage::from_fn(32, 24, |x, y| image::Rgb([x as u8 * 8, y as u8 * 10, 90]));
    let mut plain = Vec::new();
    JpegEncoder::new_with_quality(&mut plain, 90)
        .encode_image(&img)
        .unwrap();

    let Some(tiff) = exif else {
        return plain;
    };

    let segment_len = u16::try_from(2 + 6 + tiff.len()).unwrap();
    let mut out = Vec::with_capacity(plain.len() + tiff.len() + 10);
    out.extend_from_slice(&plain[..2]); // SOI
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(tiff);
    out.extend_from_slice(&plain[2..]);
    out
}

/// JPEG bytes carrying the position in EXIF, or no EXIF at all for `None`.
pub fn photo_bytes(position: Option<(f64, f64)>) -> Vec<u8> {
    let exif = position.map(|p| exif_block(Some(p)));
    jpeg_bytes(exif.as_deref())
}

pub fn write_photo(path: &Path, position: Option<(f64, f64)>) {
    std::fs::write(path, photo_bytes(position)).unwrap();
}

/// Reads one part (e.g. `xl/sharedStrings.xml`) out of an XLSX archive.
pub fn xlsx_part(xlsx: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(xlsx)).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut xml = String::new();
    part.read_to_string(&mut xml).unwrap();
    xml
}

/// Position of `needle` in `haystack`, panicking with context when absent.
pub fn position_of(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not found in {haystack}"))
}
