use exif::{Context, Exif, In, Tag, Value};

use super::coords::{convert, Coordinates, DmsTriple, Hemisphere, Rational};
use crate::error::MetadataError;

/// The GPS IFD fields needed to place a photo, decoded once and validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsBlock {
    pub latitude_ref: Hemisphere,
    pub latitude: DmsTriple,
    pub longitude_ref: Hemisphere,
    pub longitude: DmsTriple,
}

impl GpsBlock {
    /// Returns `Ok(None)` when the image has no GPS IFD at all. A GPS IFD that
    /// is present but lacks one of the four position tags is malformed.
    pub fn from_exif(exif: &Exif) -> Result<Option<Self>, MetadataError> {
        if !has_gps_section(exif) {
            return Ok(None);
        }

        Ok(Some(Self {
            latitude_ref: hemisphere_field(exif, Tag::GPSLatitudeRef)?,
            latitude: dms_field(exif, Tag::GPSLatitude)?,
            longitude_ref: hemisphere_field(exif, Tag::GPSLongitudeRef)?,
            longitude: dms_field(exif, Tag::GPSLongitude)?,
        }))
    }

    pub fn coordinates(&self) -> Result<Coordinates, MetadataError> {
        Ok(Coordinates {
            latitude: convert(&self.latitude, self.latitude_ref)?,
            longitude: convert(&self.longitude, self.longitude_ref)?,
        })
    }
}

/// Finds the GPS position of a photo, if it has one.
pub fn locate(exif: &Exif) -> Result<Option<Coordinates>, MetadataError> {
    match GpsBlock::from_exif(exif)? {
        Some(block) => block.coordinates().map(Some),
        None => Ok(None),
    }
}

fn has_gps_section(exif: &Exif) -> bool {
    exif.fields().any(|f| f.tag.context() == Context::Gps)
}

fn hemisphere_field(exif: &Exif, tag: Tag) -> Result<Hemisphere, MetadataError> {
    let field = exif
        .get_field(tag, In::PRIMARY)
        .ok_or_else(|| MetadataError::MalformedMetadata(format!("{tag} is missing")))?;

    let raw = match &field.value {
        Value::Ascii(strings) => strings.first().map(Vec::as_slice).unwrap_or_default(),
        other => {
            return Err(MetadataError::MalformedMetadata(format!(
                "{tag} should be ASCII, found {other:?}"
            )))
        }
    };

    Hemisphere::from_ref_bytes(raw).ok_or_else(|| {
        MetadataError::MalformedMetadata(format!(
            "{tag} has unknown reference {:?}",
            String::from_utf8_lossy(raw)
        ))
    })
}

fn dms_field(exif: &Exif, tag: Tag) -> Result<DmsTriple, MetadataError> {
    let field = exif
        .get_field(tag, In::PRIMARY)
        .ok_or_else(|| MetadataError::MalformedMetadata(format!("{tag} is missing")))?;

    match &field.value {
        Value::Rational(v) if v.len() == 3 => Ok(DmsTriple::new(
            Rational::from(v[0]),
            Rational::from(v[1]),
            Rational::from(v[2]),
        )),
        Value::Rational(v) => Err(MetadataError::MalformedMetadata(format!(
            "{tag} has {} components, expected 3",
            v.len()
        ))),
        other => Err(MetadataError::MalformedMetadata(format!(
            "{tag} should be RATIONAL, found {other:?}"
        ))),
    }
}
