// Server defaults
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 256 * 1024 * 1024;
pub const CONFIG_FILE_NAME: &str = "photo_geo_report.ini";
pub const API_KEY_ENV: &str = "GEOCODE_API_KEY";

// Geocoding
pub const DEFAULT_GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

// Report
pub const REPORT_FILE_NAME: &str = "gps_data.xlsx";
pub const REPORT_SHEET_NAME: &str = "GPS Data";
pub const REPORT_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const REPORT_HEADERS: [&str; 5] = ["File", "Filename", "Latitude", "Longitude", "Address"];
pub const HEADER_FILL_RGB: u32 = 0xD7E4BC;

// Thumbnails embedded in the report
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 96;
pub const THUMBNAIL_JPEG_QUALITY: u8 = 85;
