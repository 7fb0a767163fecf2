use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::MetadataError;
use crate::exif_parser::{locate, read_exif, Coordinates};
use crate::geocoding::ReverseGeocoder;
use crate::record::{summarize, PhotoRecord};

/// An uploaded file saved to the request's temp directory.
#[derive(Debug, Clone)]
pub struct StagedPhoto {
    pub path: PathBuf,
    pub filename: String,
}

fn extract_coordinates(photo: &StagedPhoto) -> Result<Option<Coordinates>, MetadataError> {
    match read_exif(&photo.path)? {
        Some(exif) => locate(&exif),
        None => Ok(None),
    }
}

/// Builds the record for one photo. Metadata errors are captured in the
/// record instead of being returned.
pub async fn process_photo(
    photo: &StagedPhoto,
    geocoder: Option<&dyn ReverseGeocoder>,
) -> PhotoRecord {
    let coords = match extract_coordinates(photo) {
        Ok(Some(coords)) => coords,
        Ok(None) => {
            debug!(file = %photo.filename, "No GPS data");
            return PhotoRecord::without_gps(photo.path.clone(), photo.filename.clone());
        }
        Err(e) => {
            warn!(file = %photo.filename, error = %e, "Skipping location for photo");
            return PhotoRecord::failed(photo.path.clone(), photo.filename.clone(), e.to_string());
        }
    };

    let address = match geocoder {
        Some(geocoder) => geocoder.reverse_geocode(coords).await.into_address(),
        None => None,
    };

    debug!(
        file = %photo.filename,
        lat = coords.latitude,
        lon = coords.longitude,
        has_address = address.is_some(),
        "Photo located"
    );
    PhotoRecord::located(photo.path.clone(), photo.filename.clone(), coords, address)
}

/// Processes photos one after another, keeping input order.
pub async fn process_batch(
    photos: &[StagedPhoto],
    geocoder: Option<&dyn ReverseGeocoder>,
) -> Vec<PhotoRecord> {
    let mut records = Vec::with_capacity(photos.len());
    for photo in photos {
        records.push(process_photo(photo, geocoder).await);
    }

    let summary = summarize(&records);
    info!(
        total = summary.total,
        located = summary.located,
        geocoded = summary.geocoded,
        no_gps = summary.no_gps,
        failed = summary.failed,
        geocoder = geocoder.map(|g| g.name()).unwrap_or("none"),
        "Batch processed"
    );
    records
}
