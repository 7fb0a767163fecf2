use exif::{Exif, Reader};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

use crate::error::MetadataError;

/// Reads the EXIF block embedded in an image container.
///
/// `Ok(None)` means the file is a supported image that simply carries no EXIF.
pub fn read_exif(path: &Path) -> Result<Option<Exif>, MetadataError> {
    let file = File::open(path)?;
    let mut buf_reader = BufReader::new(file);
    let mut exif_reader = Reader::new();
    exif_reader.continue_on_error(true); // Tolerate non-standard EXIF structures

    match exif_reader.read_from_container(&mut buf_reader) {
        Ok(exif) => Ok(Some(exif)),
        Err(exif::Error::PartialResult(partial)) => {
            let (exif, errors) = partial.into_inner();
            debug!(
                path = %path.display(),
                errors = errors.len(),
                "EXIF parsed with recoverable errors"
            );
            Ok(Some(exif))
        }
        Err(exif::Error::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
