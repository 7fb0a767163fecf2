use thiserror::Error;

/// Failures while turning embedded image metadata into coordinates.
///
/// Each of these is isolated to the photo it came from; a batch never aborts
/// because one file carries broken metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),
    #[error("malformed GPS block: {0}")]
    MalformedMetadata(String),
    #[error("unreadable image metadata: {0}")]
    Unreadable(#[from] exif::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
