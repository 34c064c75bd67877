//! Optional overlay layers (designated sites, heritage areas, ...) read from a
//! directory of shapefiles, GeoJSON files and zip archives.
//!
//! Loading is best effort: a file that cannot be read is logged, recorded in
//! [`OverlayScan::failures`] and skipped.

pub mod formats;

use std::path::{Path, PathBuf};

use geo::{Coord, Geometry, GeometryCollection, MapCoords, Simplify};
use serde_json::json;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::error::Result;
use crate::projection::osgb36_grid_to_wgs84;
use formats::{LayerData, SourceCrs};

/// Simplification tolerance in degrees.
pub const DEFAULT_SIMPLIFY_TOLERANCE: f64 = 0.001;
pub const DEFAULT_OVERLAY_COLOR: &str = "#555555";

pub const ECOLOGICAL_COLOR: &str = "#228B22";
pub const SCIENTIFIC_COLOR: &str = "#1E90FF";
pub const ARCHAEOLOGICAL_COLOR: &str = "#8B4513";

/// Filename keywords, checked in order, and the color they select.
pub const KEYWORD_COLORS: &[(&[&str], &str)] = &[
    (
        &["sac", "spa", "ramsar", "nature", "nnr", "habitat", "woodland"],
        ECOLOGICAL_COLOR,
    ),
    (&["sssi", "scientific"], SCIENTIFIC_COLOR),
    (
        &["monument", "scheduled", "archaeolog", "heritage"],
        ARCHAEOLOGICAL_COLOR,
    ),
];

const EXTENSIONS: &[&str] = &["shp", "geojson", "json", "zip"];

#[derive(Debug, Clone)]
pub struct OverlayOptions {
    /// Color for files matching no keyword.
    pub default_color: String,
    pub simplify_tolerance: f64,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            default_color: DEFAULT_OVERLAY_COLOR.to_string(),
            simplify_tolerance: DEFAULT_SIMPLIFY_TOLERANCE,
        }
    }
}

/// A loaded, WGS84, simplified overlay.
#[derive(Debug, Clone)]
pub struct OverlayLayer {
    pub name: String,
    pub color: String,
    pub source: PathBuf,
    pub geometry: GeometryCollection<f64>,
}

impl OverlayLayer {
    /// The layer as a GeoJSON feature collection, one feature per geometry.
    pub fn to_geojson(&self) -> geojson::FeatureCollection {
        let features = self
            .geometry
            .iter()
            .map(|g| {
                let mut feature = geojson::Feature::from(geojson::Geometry::new(
                    geojson::Value::from(g),
                ));
                feature.set_property("layer", json!(self.name));
                feature
            })
            .collect();
        geojson::FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OverlayFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of scanning an overlay directory.
#[derive(Debug, Clone, Default)]
pub struct OverlayScan {
    pub layers: Vec<OverlayLayer>,
    pub failures: Vec<OverlayFailure>,
}

/// Color for an overlay file, by case-insensitive keyword match on its name.
pub fn layer_color(file_name: &str, default: &str) -> String {
    let lower = file_name.to_lowercase();
    KEYWORD_COLORS
        .iter()
        .find(|(words, _)| words.iter().any(|w| lower.contains(w)))
        .map_or(default, |&(_, color)| color)
        .to_string()
}

/// Display name: the file stem with `_` and `-` turned into spaces.
pub fn layer_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().replace(['_', '-'], " "))
        .unwrap_or_default()
}

fn has_overlay_extension(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|e| EXTENSIONS.contains(&e.as_str()))
}

/// Scans `dir` (not recursively) and loads every overlay file, in file-name
/// order.
///
/// A missing directory gives an empty scan. Per-file errors are collected,
/// never returned.
pub fn load_overlays(dir: &Path, options: &OverlayOptions) -> OverlayScan {
    let mut scan = OverlayScan::default();
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "overlay directory not found; no overlays loaded");
        return scan;
    }

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
                warn!(path = %path.display(), error = %e, "skipping unreadable overlay entry");
                scan.failures.push(OverlayFailure {
                    path,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || !has_overlay_extension(path) {
            continue;
        }

        match load_layer(path, options) {
            Ok(layer) => {
                info!(
                    layer = %layer.name,
                    geometries = layer.geometry.len(),
                    color = %layer.color,
                    "loaded overlay"
                );
                scan.layers.push(layer);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping overlay");
                scan.failures.push(OverlayFailure {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        }
    }
    scan
}

/// Loads one overlay file, reprojecting and simplifying it.
///
/// # Errors
///
/// Returns the underlying read or parse error for the file.
pub fn load_layer(path: &Path, options: &OverlayOptions) -> Result<OverlayLayer> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let data = match ext.as_str() {
        "zip" => formats::read_zip_file(path)?,
        "shp" => formats::read_shapefile_file(path)?,
        _ => formats::read_geojson_file(path)?,
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(OverlayLayer {
        name: layer_name(path),
        color: layer_color(&file_name, &options.default_color),
        source: path.to_path_buf(),
        geometry: prepare(data, options.simplify_tolerance),
    })
}

/// Reprojects National Grid layers to WGS84 and simplifies every geometry.
fn prepare(data: LayerData, tolerance: f64) -> GeometryCollection<f64> {
    let grid = match data.crs {
        SourceCrs::BritishNationalGrid => true,
        SourceCrs::Wgs84 => false,
        SourceCrs::Unknown => !within_degree_range(&data.geometries),
    };
    data.geometries
        .into_iter()
        .map(|g| {
            let g = if grid { to_wgs84(&g) } else { g };
            simplify(g, tolerance)
        })
        .collect()
}

/// True when every coordinate could be a longitude/latitude pair.
fn within_degree_range(geometries: &[Geometry<f64>]) -> bool {
    use geo::CoordsIter;
    geometries.iter().all(|g| {
        g.coords_iter()
            .all(|c| c.x.abs() <= 180.0 && c.y.abs() <= 90.0)
    })
}

fn to_wgs84(geometry: &Geometry<f64>) -> Geometry<f64> {
    geometry.map_coords(|Coord { x, y }| {
        let (lon, lat) = osgb36_grid_to_wgs84(x, y);
        Coord { x: lon, y: lat }
    })
}

fn simplify(geometry: Geometry<f64>, tolerance: f64) -> Geometry<f64> {
    if tolerance <= 0.0 {
        return geometry;
    }
    match geometry {
        Geometry::LineString(g) => Geometry::LineString(g.simplify(&tolerance)),
        Geometry::MultiLineString(g) => Geometry::MultiLineString(g.simplify(&tolerance)),
        Geometry::Polygon(g) => Geometry::Polygon(g.simplify(&tolerance)),
        Geometry::MultiPolygon(g) => Geometry::MultiPolygon(g.simplify(&tolerance)),
        other => other,
    }
}
