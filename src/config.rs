//! TOML-based map configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::overlay::{DEFAULT_OVERLAY_COLOR, DEFAULT_SIMPLIFY_TOLERANCE, OverlayOptions};
use crate::records::CleanOptions;
use crate::records::schema::DEFAULT_TECHNOLOGY;

/// Top-level map configuration parsed from TOML.
///
/// Every field has a default, so an empty file is a valid configuration.
/// Load with [`MapConfig::from_toml_file`] or start from
/// [`MapConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapConfig {
    /// Planning database extract.
    #[serde(default)]
    pub source: SourceConfig,
    /// Directory of constraint layers.
    #[serde(default)]
    pub overlays: OverlaysConfig,
    /// Initial view and title.
    #[serde(default)]
    pub map: ViewConfig,
    /// Output files.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Planning database extract.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// CSV file path.
    pub path: PathBuf,
    /// WHATWG encoding label of the CSV bytes.
    pub encoding: String,
    /// Value of the technology column to keep.
    pub technology: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("repd.csv"),
            encoding: "windows-1252".to_string(),
            technology: DEFAULT_TECHNOLOGY.to_string(),
        }
    }
}

/// Directory of constraint layers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlaysConfig {
    /// Scanned non-recursively; missing means no overlays.
    pub dir: PathBuf,
    /// Color for layers whose file name matches no keyword.
    pub default_color: String,
    /// Simplification tolerance in degrees.
    pub simplify_tolerance: f64,
}

impl Default for OverlaysConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("overlays"),
            default_color: DEFAULT_OVERLAY_COLOR.to_string(),
            simplify_tolerance: DEFAULT_SIMPLIFY_TOLERANCE,
        }
    }
}

/// Initial view and title.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    pub title: String,
    /// Initial centre latitude (degrees).
    pub center_lat: f64,
    /// Initial centre longitude (degrees).
    pub center_lon: f64,
    /// Initial zoom level (0–19).
    pub zoom: u8,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            title: "Onshore Wind Planning Applications".to_string(),
            center_lat: 54.5,
            center_lon: -3.5,
            zoom: 6,
        }
    }
}

/// Output files.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Generated HTML page.
    pub html: PathBuf,
    /// Optional CSV of the cleaned records.
    pub records_csv: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            html: PathBuf::from("onshore_wind_map.html"),
            records_csv: None,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, thiserror::Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"map.zoom"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl MapConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    pub fn clean_options(&self) -> CleanOptions {
        CleanOptions {
            technology: self.source.technology.clone(),
        }
    }

    pub fn overlay_options(&self) -> OverlayOptions {
        OverlayOptions {
            default_color: self.overlays.default_color.clone(),
            simplify_tolerance: self.overlays.simplify_tolerance,
        }
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let src = &self.source;
        if src.path.as_os_str().is_empty() {
            errors.push(ConfigError {
                field: "source.path".into(),
                message: "must not be empty".into(),
            });
        }
        if encoding_rs::Encoding::for_label(src.encoding.as_bytes()).is_none() {
            errors.push(ConfigError {
                field: "source.encoding".into(),
                message: format!("unknown encoding label \"{}\"", src.encoding),
            });
        }
        if src.technology.trim().is_empty() {
            errors.push(ConfigError {
                field: "source.technology".into(),
                message: "must not be empty".into(),
            });
        }

        let ov = &self.overlays;
        if !is_hex_color(&ov.default_color) {
            errors.push(ConfigError {
                field: "overlays.default_color".into(),
                message: format!("must be a #rrggbb color, got \"{}\"", ov.default_color),
            });
        }
        if !ov.simplify_tolerance.is_finite() || ov.simplify_tolerance < 0.0 {
            errors.push(ConfigError {
                field: "overlays.simplify_tolerance".into(),
                message: "must be a finite value >= 0".into(),
            });
        }

        let view = &self.map;
        if !(-90.0..=90.0).contains(&view.center_lat) {
            errors.push(ConfigError {
                field: "map.center_lat".into(),
                message: "must be in [-90, 90]".into(),
            });
        }
        if !(-180.0..=180.0).contains(&view.center_lon) {
            errors.push(ConfigError {
                field: "map.center_lon".into(),
                message: "must be in [-180, 180]".into(),
            });
        }
        if view.zoom > 19 {
            errors.push(ConfigError {
                field: "map.zoom".into(),
                message: "must be <= 19".into(),
            });
        }

        if self.output.html.as_os_str().is_empty() {
            errors.push(ConfigError {
                field: "output.html".into(),
                message: "must not be empty".into(),
            });
        }

        errors
    }
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}
