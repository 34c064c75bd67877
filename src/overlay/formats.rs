//! Readers for the overlay file formats: shapefiles, GeoJSON, and zip
//! archives holding either.

use std::fs::{self, File};
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use geo::{Coord, Geometry, LineString, MultiLineString, MultiPolygon, Polygon};
use geojson::GeoJson;
use shapefile::{PolygonRing, Shape, ShapeReader};
use tracing::debug;
use zip::ZipArchive;

use crate::error::{MapError, Result};

/// Coordinate reference system a layer was stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceCrs {
    Wgs84,
    BritishNationalGrid,
    /// No usable CRS metadata; decided from the coordinate range.
    Unknown,
}

/// Geometries read from one overlay source.
#[derive(Debug, Clone)]
pub struct LayerData {
    pub geometries: Vec<Geometry<f64>>,
    pub crs: SourceCrs,
}

/// Classifies `.prj` well-known text by its top-level node.
///
/// Geographic WGS 84 (or ETRS89, which matches it at map scale) and the
/// National Grid are accepted. Text with no recognisable node is `Unknown`.
///
/// # Errors
///
/// Returns [`MapError::UnsupportedCrs`] for any other projected or
/// geographic system, e.g. UTM or Web Mercator.
pub fn crs_from_prj(wkt: &str) -> Result<SourceCrs> {
    let upper = wkt.trim_start().to_ascii_uppercase();
    let name = wkt.split('"').nth(1).unwrap_or_default().to_string();
    if upper.starts_with("PROJCS") || upper.starts_with("PROJCRS") {
        if upper.contains("BRITISH_NATIONAL_GRID")
            || upper.contains("BRITISH NATIONAL GRID")
            || upper.contains("27700")
        {
            return Ok(SourceCrs::BritishNationalGrid);
        }
        return Err(MapError::UnsupportedCrs(name));
    }
    if upper.starts_with("GEOGCS") || upper.starts_with("GEOGCRS") {
        let wgs84 = ["WGS_1984", "WGS 84", "WGS84", "ETRS_1989", "ETRS89", "4326"];
        if wgs84.iter().any(|w| upper.contains(w)) {
            return Ok(SourceCrs::Wgs84);
        }
        return Err(MapError::UnsupportedCrs(name));
    }
    Ok(SourceCrs::Unknown)
}

/// Classifies a GeoJSON `crs` name such as `urn:ogc:def:crs:EPSG::27700`.
///
/// # Errors
///
/// Returns [`MapError::UnsupportedCrs`] for an EPSG code other than 4326 or
/// 27700.
pub fn crs_from_name(name: &str) -> Result<SourceCrs> {
    let upper = name.to_ascii_uppercase();
    if upper.contains("CRS84") {
        return Ok(SourceCrs::Wgs84);
    }
    if !upper.contains("EPSG") {
        return Ok(SourceCrs::Unknown);
    }
    let code = upper
        .rsplit(|c: char| !c.is_ascii_digit())
        .next()
        .and_then(|digits| digits.parse::<u32>().ok());
    match code {
        Some(4326) => Ok(SourceCrs::Wgs84),
        Some(27700) => Ok(SourceCrs::BritishNationalGrid),
        _ => Err(MapError::UnsupportedCrs(name.to_string())),
    }
}

pub fn read_shapefile_file(path: &Path) -> Result<LayerData> {
    let reader = BufReader::new(File::open(path)?);
    let geometries = read_shapes(reader)?;
    let crs = match fs::read_to_string(path.with_extension("prj")) {
        Ok(wkt) => crs_from_prj(&wkt)?,
        Err(_) => SourceCrs::Unknown,
    };
    Ok(LayerData { geometries, crs })
}

pub fn read_geojson_file(path: &Path) -> Result<LayerData> {
    let text = fs::read_to_string(path)?;
    parse_geojson(&text)
}

/// Reads the first `.shp` layer in the archive (with its `.prj`), or the
/// first `.geojson` if there is no shapefile.
pub fn read_zip_file(path: &Path) -> Result<LayerData> {
    read_zip(File::open(path)?)
}

pub fn read_zip<R: Read + Seek>(source: R) -> Result<LayerData> {
    let mut archive = ZipArchive::new(source)?;
    let names: Vec<String> = archive
        .file_names()
        .filter(|n| !n.starts_with("__MACOSX/") && !n.ends_with('/'))
        .map(str::to_string)
        .collect();

    let with_ext = |ext: &str| {
        names
            .iter()
            .find(|n| n.to_ascii_lowercase().ends_with(ext))
            .cloned()
    };

    if let Some(shp) = with_ext(".shp") {
        debug!(entry = %shp, "reading shapefile from archive");
        let bytes = entry_bytes(&mut archive, &shp)?;
        let geometries = read_shapes(Cursor::new(bytes))?;

        let stem = &shp[..shp.len() - 4];
        let prj = names
            .iter()
            .find(|n| {
                n.len() == shp.len() && n.starts_with(stem) && n.to_ascii_lowercase().ends_with(".prj")
            })
            .cloned();
        let crs = match prj {
            Some(prj) => {
                crs_from_prj(&String::from_utf8_lossy(&entry_bytes(&mut archive, &prj)?))?
            }
            None => SourceCrs::Unknown,
        };
        return Ok(LayerData { geometries, crs });
    }

    if let Some(json) = with_ext(".geojson") {
        debug!(entry = %json, "reading GeoJSON from archive");
        let bytes = entry_bytes(&mut archive, &json)?;
        return parse_geojson(&String::from_utf8_lossy(&bytes));
    }

    Err(MapError::EmptyArchive)
}

fn entry_bytes<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Vec<u8>> {
    let mut entry = archive.by_name(name)?;
    let mut buf = Vec::new();
    entry.read_to_end(&mut buf)?;
    Ok(buf)
}

/// Parses GeoJSON text; a legacy `crs` member naming EPSG:27700 marks the
/// layer as National Grid.
///
/// # Errors
///
/// Fails on malformed GeoJSON or a `crs` member naming another system.
pub fn parse_geojson(text: &str) -> Result<LayerData> {
    let gj: GeoJson = text.parse()?;
    let crs_member = match &gj {
        GeoJson::FeatureCollection(fc) => fc.foreign_members.as_ref().and_then(|m| m.get("crs")),
        GeoJson::Feature(f) => f.foreign_members.as_ref().and_then(|m| m.get("crs")),
        GeoJson::Geometry(g) => g.foreign_members.as_ref().and_then(|m| m.get("crs")),
    };
    let crs = match crs_member {
        Some(value) => {
            let name = value
                .pointer("/properties/name")
                .and_then(serde_json::Value::as_str)
                .map_or_else(|| value.to_string(), str::to_string);
            crs_from_name(&name)?
        }
        None => SourceCrs::Unknown,
    };
    let collection = geo::GeometryCollection::<f64>::try_from(&gj)?;
    Ok(LayerData {
        geometries: collection.0,
        crs,
    })
}

trait PlanarXy {
    fn xy(&self) -> Coord<f64>;
}

impl PlanarXy for shapefile::Point {
    fn xy(&self) -> Coord<f64> {
        Coord { x: self.x, y: self.y }
    }
}

impl PlanarXy for shapefile::PointM {
    fn xy(&self) -> Coord<f64> {
        Coord { x: self.x, y: self.y }
    }
}

impl PlanarXy for shapefile::PointZ {
    fn xy(&self) -> Coord<f64> {
        Coord { x: self.x, y: self.y }
    }
}

fn line<P: PlanarXy>(points: &[P]) -> LineString<f64> {
    points.iter().map(PlanarXy::xy).collect()
}

fn polyline<P: PlanarXy>(parts: &[Vec<P>]) -> Geometry<f64> {
    Geometry::MultiLineString(MultiLineString(parts.iter().map(|p| line(p)).collect()))
}

/// Outer rings start a polygon; inner rings attach to the latest one.
fn polygon<P: PlanarXy>(rings: &[PolygonRing<P>]) -> Geometry<f64> {
    let mut polygons: Vec<(LineString<f64>, Vec<LineString<f64>>)> = Vec::new();
    for ring in rings {
        let coords = line(ring.points());
        if let PolygonRing::Inner(_) = ring {
            if let Some((_, holes)) = polygons.last_mut() {
                holes.push(coords);
                continue;
            }
        }
        polygons.push((coords, Vec::new()));
    }
    Geometry::MultiPolygon(MultiPolygon(
        polygons
            .into_iter()
            .map(|(exterior, holes)| Polygon::new(exterior, holes))
            .collect(),
    ))
}

fn read_shapes<R: Read + Seek>(source: R) -> Result<Vec<Geometry<f64>>> {
    let shapes = ShapeReader::new(source)?.read()?;
    let mut geometries = Vec::with_capacity(shapes.len());
    let mut skipped = 0_usize;
    for shape in shapes {
        let geometry = match shape {
            Shape::Polygon(p) => polygon(p.rings()),
            Shape::PolygonM(p) => polygon(p.rings()),
            Shape::PolygonZ(p) => polygon(p.rings()),
            Shape::Polyline(p) => polyline(p.parts()),
            Shape::PolylineM(p) => polyline(p.parts()),
            Shape::PolylineZ(p) => polyline(p.parts()),
            _ => {
                skipped += 1;
                continue;
            }
        };
        geometries.push(geometry);
    }
    if skipped > 0 {
        debug!(skipped, "ignored non-area, non-line shapes");
    }
    Ok(geometries)
}
