use serde::Serialize;

use crate::error::MetadataError;

/// Exact fraction as stored in an EXIF RATIONAL value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub num: u32,
    pub denom: u32,
}

impl Rational {
    pub fn new(num: u32, denom: u32) -> Self {
        Self { num, denom }
    }

    pub fn to_f64(self) -> Result<f64, MetadataError> {
        if self.denom == 0 {
            return Err(MetadataError::InvalidMetadata(format!(
                "rational {}/0 has a zero denominator",
                self.num
            )));
        }
        Ok(f64::from(self.num) / f64::from(self.denom))
    }
}

impl From<exif::Rational> for Rational {
    fn from(r: exif::Rational) -> Self {
        Self::new(r.num, r.denom)
    }
}

impl From<Rational> for exif::Rational {
    fn from(r: Rational) -> Self {
        exif::Rational { num: r.num, denom: r.denom }
    }
}

/// Which coordinate a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Decodes the ASCII reference stored in GPSLatitudeRef / GPSLongitudeRef.
    pub fn from_ref_bytes(raw: &[u8]) -> Option<Self> {
        let text = std::str::from_utf8(raw).ok()?;
        let trimmed = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());
        match trimmed {
            "N" | "n" => Some(Self::North),
            "S" | "s" => Some(Self::South),
            "E" | "e" => Some(Self::East),
            "W" | "w" => Some(Self::West),
            _ => None,
        }
    }

    pub fn is_negative(self) -> bool {
        matches!(self, Self::South | Self::West)
    }

    pub fn as_ref_str(self) -> &'static str {
        match self {
            Self::North => "N",
            Self::South => "S",
            Self::East => "E",
            Self::West => "W",
        }
    }

    fn for_value(value: f64, axis: Axis) -> Self {
        match (axis, value.is_sign_negative()) {
            (Axis::Latitude, false) => Self::North,
            (Axis::Latitude, true) => Self::South,
            (Axis::Longitude, false) => Self::East,
            (Axis::Longitude, true) => Self::West,
        }
    }
}

/// Degrees, minutes, seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DmsTriple(pub [Rational; 3]);

impl DmsTriple {
    pub fn new(degrees: Rational, minutes: Rational, seconds: Rational) -> Self {
        Self([degrees, minutes, seconds])
    }

    /// Splits a signed decimal degree value into whole degrees, whole minutes
    /// and seconds with four decimal places.
    pub fn from_decimal(value: f64, axis: Axis) -> (Self, Hemisphere) {
        let hemisphere = Hemisphere::for_value(value, axis);
        let magnitude = value.abs();

        let degrees = magnitude.trunc();
        let minutes_total = (magnitude - degrees) * 60.0;
        let minutes = minutes_total.trunc();
        let seconds = (minutes_total - minutes) * 60.0;

        let dms = Self::new(
            Rational::new(degrees as u32, 1),
            Rational::new(minutes as u32, 1),
            Rational::new((seconds * 10_000.0).round() as u32, 10_000),
        );
        (dms, hemisphere)
    }

    pub fn degrees(&self) -> Rational {
        self.0[0]
    }

    pub fn minutes(&self) -> Rational {
        self.0[1]
    }

    pub fn seconds(&self) -> Rational {
        self.0[2]
    }
}

/// Signed decimal degrees for one photo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Converts a DMS triple and its hemisphere reference into signed decimal degrees.
///
/// The three components are summed as plain floats; no rounding is applied.
pub fn convert(dms: &DmsTriple, hemisphere: Hemisphere) -> Result<f64, MetadataError> {
    let degrees = dms.degrees().to_f64()?;
    let minutes = dms.minutes().to_f64()? / 60.0;
    let seconds = dms.seconds().to_f64()? / 3600.0;

    let decimal = degrees + minutes + seconds;
    if hemisphere.is_negative() {
        Ok(-decimal)
    } else {
        Ok(decimal)
    }
}
