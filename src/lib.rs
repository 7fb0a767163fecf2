//! Upload photos, read their EXIF GPS position, reverse-geocode it and hand
//! back an XLSX report with thumbnails.

pub mod constants;
pub mod error;
pub mod exif_parser;
pub mod geocoding;
pub mod image_processing;
pub mod processing;
pub mod record;
pub mod report;
pub mod server;
pub mod settings;

#[cfg(test)]
mod test_support;

pub use error::MetadataError;
pub use exif_parser::Coordinates;
pub use record::{BatchSummary, PhotoRecord, RecordStatus};
pub use settings::Settings;
