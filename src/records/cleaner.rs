//! Turns the raw extract into the cleaned, geolocated [`SiteTable`].
//!
//! Row-level problems never fail the run: rows with unusable coordinates are
//! logged, counted in the [`CleaningReport`] and left out.

use std::fmt;

use geo::Point;
use tracing::{debug, info, warn};

use super::schema::{
    DEFAULT_TECHNOLOGY, DROPPED_COLUMNS, REF_ID_COLUMN, SITE_NAME_COLUMN, TECHNOLOGY_COLUMN,
    X_COLUMN, Y_COLUMN,
};
use super::{FieldValue, NOT_AVAILABLE, RawTable, SiteRecord, SiteTable};
use crate::error::Result;
use crate::projection::osgb36_grid_to_wgs84;

/// Parameters of the cleaning pass.
#[derive(Debug, Clone)]
pub struct CleanOptions {
    /// Value of `Technology Type` to keep.
    pub technology: String,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            technology: DEFAULT_TECHNOLOGY.to_string(),
        }
    }
}

/// Row counts from one cleaning pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleaningReport {
    /// Data rows in the source.
    pub rows_read: usize,
    /// Rows whose technology matched the filter.
    pub rows_matched: usize,
    /// Rows dropped because a coordinate was empty or not a number.
    pub dropped_non_numeric: usize,
    /// Rows dropped because the projected point was out of range or not finite.
    pub dropped_invalid_geometry: usize,
    /// Rows in the cleaned table.
    pub retained: usize,
}

impl fmt::Display for CleaningReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Cleaning Report ---")?;
        writeln!(f, "Rows read:                 {}", self.rows_read)?;
        writeln!(f, "Matching technology:       {}", self.rows_matched)?;
        writeln!(f, "Dropped (bad coordinates): {}", self.dropped_non_numeric)?;
        writeln!(
            f,
            "Dropped (invalid geometry): {}",
            self.dropped_invalid_geometry
        )?;
        write!(f, "Retained:                  {}", self.retained)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Text,
}

/// Infers a column type the way a dataframe reader would: all non-empty
/// cells numeric makes a float column, and whole numbers with no gaps make
/// an integer column.
fn infer_kind<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut all_int = true;
    let mut any_empty = false;
    for cell in cells {
        let cell = cell.trim();
        if cell.is_empty() {
            any_empty = true;
            continue;
        }
        if cell.parse::<i64>().is_ok() {
            continue;
        }
        all_int = false;
        if cell.parse::<f64>().is_err() {
            return ColumnKind::Text;
        }
    }
    if all_int && !any_empty {
        ColumnKind::Integer
    } else {
        ColumnKind::Float
    }
}

fn typed_value(cell: &str, kind: ColumnKind) -> FieldValue {
    let trimmed = cell.trim();
    match kind {
        ColumnKind::Integer => trimmed
            .parse::<i64>()
            .map_or(FieldValue::Missing, FieldValue::Integer),
        ColumnKind::Float => trimmed
            .parse::<f64>()
            .map_or(FieldValue::Missing, FieldValue::Number),
        ColumnKind::Text if cell.is_empty() => FieldValue::Missing,
        ColumnKind::Text => FieldValue::Text(escape_backslashes(cell)),
    }
}

/// Doubles every backslash so text survives being spliced into a
/// JavaScript string literal.
pub fn escape_backslashes(s: &str) -> String {
    s.replace('\\', "\\\\")
}

/// Cell `i` of `row`, or empty when the row is short.
fn field(row: &[String], i: usize) -> &str {
    row.get(i).map_or("", String::as_str)
}

fn cell(row: &[String], idx: Option<usize>) -> &str {
    idx.map_or("", |i| field(row, i))
}

/// Parses a coordinate cell; empty, unparsable and NaN cells fail.
fn coerce_coordinate(cell: &str) -> Option<f64> {
    let v = cell.trim().parse::<f64>().ok()?;
    if v.is_nan() { None } else { Some(v) }
}

/// A projected point is usable when both ordinates are finite and in range.
pub fn is_valid_position(lon: f64, lat: f64) -> bool {
    lon.is_finite()
        && lat.is_finite()
        && (-180.0..=180.0).contains(&lon)
        && (-90.0..=90.0).contains(&lat)
}

/// Formats a position as `"lat, lon"` with five decimals.
pub fn format_coordinates(lon: f64, lat: f64) -> String {
    format!("{lat:.5}, {lon:.5}")
}

/// Runs the full cleaning pass over `raw`.
///
/// Short rows read as empty cells. Steps, in order: technology filter,
/// column drop, whole-file type inference with
/// backslash escaping, coordinate coercion, projection from British National
/// Grid to WGS84, `"N/A"` fill of text gaps, position validation, and the
/// derived coordinate and search-text fields. Output order follows source
/// order, so cleaning the same input twice gives identical tables.
///
/// # Errors
///
/// Returns [`MapError::MissingColumn`](crate::error::MapError::MissingColumn)
/// if the technology or coordinate columns are absent. Bad rows never error.
pub fn clean(raw: &RawTable, options: &CleanOptions) -> Result<(SiteTable, CleaningReport)> {
    let tech_idx = raw.require_column(TECHNOLOGY_COLUMN)?;
    let x_idx = raw.require_column(X_COLUMN)?;
    let y_idx = raw.require_column(Y_COLUMN)?;
    let ref_idx = raw.column_index(REF_ID_COLUMN);
    let name_idx = raw.column_index(SITE_NAME_COLUMN);

    let mut report = CleaningReport {
        rows_read: raw.rows.len(),
        ..CleaningReport::default()
    };

    let target = options.technology.trim();
    let matched: Vec<&Vec<String>> = raw
        .rows
        .iter()
        .filter(|row| field(row, tech_idx).trim() == target)
        .collect();
    report.rows_matched = matched.len();

    let kept: Vec<usize> = (0..raw.headers.len())
        .filter(|&i| !DROPPED_COLUMNS.contains(&raw.headers[i].as_str()))
        .collect();
    let columns: Vec<String> = kept.iter().map(|&i| raw.headers[i].clone()).collect();
    // Types come from the whole file, before the technology filter.
    let kinds: Vec<ColumnKind> = kept
        .iter()
        .map(|&i| infer_kind(raw.rows.iter().map(|row| field(row, i))))
        .collect();
    debug!(
        kept = columns.len(),
        dropped = raw.headers.len() - columns.len(),
        "selected columns"
    );

    let mut records = Vec::with_capacity(matched.len());
    for row in matched {
        let (x_cell, y_cell) = (field(row, x_idx), field(row, y_idx));
        let (Some(x), Some(y)) = (coerce_coordinate(x_cell), coerce_coordinate(y_cell)) else {
            warn!(
                ref_id = cell(row, ref_idx),
                site = cell(row, name_idx),
                x = x_cell,
                y = y_cell,
                "dropping row with non-numeric coordinates"
            );
            report.dropped_non_numeric += 1;
            continue;
        };

        let (lon, lat) = osgb36_grid_to_wgs84(x, y);

        let values: Vec<FieldValue> = kept
            .iter()
            .zip(&kinds)
            .map(|(&i, &kind)| match typed_value(field(row, i), kind) {
                FieldValue::Missing if kind == ColumnKind::Text => {
                    FieldValue::Text(NOT_AVAILABLE.to_string())
                }
                value => value,
            })
            .collect();

        if !is_valid_position(lon, lat) {
            warn!(
                ref_id = cell(row, ref_idx),
                site = cell(row, name_idx),
                lon,
                lat,
                "dropping row with invalid geometry"
            );
            report.dropped_invalid_geometry += 1;
            continue;
        }

        let geometry = Point::new(lon, lat);
        let coordinates = format_coordinates(lon, lat);
        let mut record = SiteRecord {
            values,
            geometry,
            coordinates,
            search_text: String::new(),
        };
        record.search_text = search_text(&record);
        records.push(record);
    }

    report.retained = records.len();
    info!(
        read = report.rows_read,
        matched = report.rows_matched,
        non_numeric = report.dropped_non_numeric,
        invalid_geometry = report.dropped_invalid_geometry,
        retained = report.retained,
        "cleaned planning records"
    );

    Ok((SiteTable { columns, records }, report))
}

/// String form of every field in column order, geometry and coordinates
/// included, joined with single spaces.
fn search_text(record: &SiteRecord) -> String {
    let mut parts: Vec<String> = record.values.iter().map(ToString::to_string).collect();
    parts.push(record.geometry_wkt());
    parts.push(record.coordinates.clone());
    parts.join(" ")
}
