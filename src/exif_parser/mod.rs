pub mod coords;
pub mod gps;
pub mod orientation;
pub mod reader;

pub use coords::{convert, Axis, Coordinates, DmsTriple, Hemisphere, Rational};
pub use gps::{locate, GpsBlock};
pub use orientation::{apply_orientation, read_orientation};
pub use reader::read_exif;
