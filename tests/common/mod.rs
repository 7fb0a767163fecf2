use photo_geo_report::exif_parser;

#[path = "../../src/test_support.rs"]
mod fixtures;

pub use fixtures::{photo_bytes, position_of, xlsx_part};

pub const BOUNDARY: &str = "----photo-geo-report-test-boundary";

/// Encodes a `multipart/form-data` body the way a browser submits the upload form.
pub fn multipart_body(api_key: Option<&str>, files: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, data) in files {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"photos\"; filename=\"{name}\"\r\n")
                .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    if let Some(key) = api_key {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(b"Content-Disposition: form-data; name=\"api_key\"\r\n\r\n");
        body.extend_from_slice(key.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
