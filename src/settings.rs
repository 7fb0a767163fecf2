use anyhow::{Context, Result};
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

use crate::constants::*;

/// Runtime configuration, passed explicitly into the server state.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: IpAddr,
    pub port: u16,
    /// Parent directory for per-request staging directories.
    pub upload_dir: PathBuf,
    /// Used when an upload does not carry its own key.
    pub api_key: Option<String>,
    pub geocode_endpoint: String,
    pub max_upload_bytes: usize,
    pub thumbnail_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.parse().unwrap_or(IpAddr::from([127, 0, 0, 1])),
            port: DEFAULT_PORT,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            api_key: None,
            geocode_endpoint: DEFAULT_GEOCODE_ENDPOINT.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
        }
    }
}

impl Settings {
    /// Loads settings from `path` (or the default config file) and applies
    /// the `GEOCODE_API_KEY` environment variable on top. A missing file
    /// yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);
        let mut settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file {:?}", config_path))?;
            Self::parse(&content)
        } else {
            if path.is_some() {
                anyhow::bail!("Config file not found: {:?}", config_path);
            }
            Settings::default()
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            settings.set_api_key(&key);
        }
        Ok(settings)
    }

    /// Parses `key = value` lines. Unknown keys are ignored and bad values
    /// keep their defaults.
    pub fn parse(content: &str) -> Self {
        let mut config_map = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.starts_with('#') || line.is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                config_map.insert(key.trim(), value.trim().trim_matches('"'));
            }
        }

        let mut settings = Settings::default();
        if let Some(host) = parse_value(&config_map, "host") {
            settings.host = host;
        }
        if let Some(port) = parse_value(&config_map, "port") {
            settings.port = port;
        }
        if let Some(dir) = config_map.get("upload_dir") {
            settings.upload_dir = PathBuf::from(dir);
        }
        if let Some(key) = config_map.get("api_key") {
            settings.set_api_key(key);
        }
        if let Some(endpoint) = config_map.get("geocode_endpoint") {
            settings.geocode_endpoint = endpoint.to_string();
        }
        if let Some(limit) = parse_value(&config_map, "max_upload_bytes") {
            settings.max_upload_bytes = limit;
        }
        if let Some(size) = parse_value::<u32>(&config_map, "thumbnail_size") {
            if size > 0 {
                settings.thumbnail_size = size;
            } else {
                warn!("thumbnail_size must be positive, keeping default");
            }
        }
        settings
    }

    pub fn set_api_key(&mut self, key: &str) {
        let key = key.trim();
        self.api_key = (!key.is_empty()).then(|| key.to_string());
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// `photo_geo_report.ini` next to the executable (or the project root
    /// when running from `target/`).
    pub fn config_path() -> PathBuf {
        let mut path = std::env::current_exe()
            .unwrap_or_default()
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        if path.ends_with("target/debug") || path.ends_with("target/release") {
            path.pop();
            path.pop();
        }
        path.push(CONFIG_FILE_NAME);
        path
    }
}

fn parse_value<T: FromStr>(map: &HashMap<&str, &str>, key: &str) -> Option<T> {
    let raw = map.get(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = raw, "Ignoring invalid config value");
            None
        }
    }
}
