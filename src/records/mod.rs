//! Planning-application records: raw table loading, cleaning, and the cleaned
//! site table consumed by the styling and rendering stages.

pub mod cleaner;
pub mod loader;
pub mod schema;

use std::fmt;

use geo::Point;

pub use cleaner::{CleanOptions, CleaningReport, clean};
pub use loader::{RawTable, decode_source, load_raw_table, read_table};

/// Sentinel written into text fields that have no value.
pub const NOT_AVAILABLE: &str = "N/A";

/// One cell of a cleaned record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Free text; backslashes already escaped by the cleaner.
    Text(String),
    /// Value from a column whose every cell is a whole number.
    Integer(i64),
    /// Value from a numeric column.
    Number(f64),
    /// Empty cell in a numeric column.
    Missing,
}

impl FieldValue {
    /// Numeric view of the cell, parsing text when needed.
    ///
    /// Returns `None` for missing cells, unparsable text and NaN.
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            Self::Integer(i) => *i as f64,
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Missing => return None,
        };
        if v.is_nan() { None } else { Some(v) }
    }

    /// Whether the cell displays as the `"N/A"` sentinel.
    pub fn is_not_available(&self) -> bool {
        match self {
            Self::Text(s) => s == NOT_AVAILABLE,
            Self::Missing => true,
            Self::Number(n) => n.is_nan(),
            Self::Integer(_) => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Number(n) if n.is_nan() => f.write_str(NOT_AVAILABLE),
            Self::Number(n) => f.write_str(&format_float(*n)),
            Self::Missing => f.write_str(NOT_AVAILABLE),
        }
    }
}

/// Formats floats the way a dataframe prints them: whole numbers keep a
/// trailing `.0`.
pub fn format_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

/// A cleaned, geolocated planning application.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteRecord {
    /// Retained source fields, in [`SiteTable::columns`] order.
    pub values: Vec<FieldValue>,
    /// WGS84 position; `x` is longitude, `y` latitude.
    pub geometry: Point<f64>,
    /// `"lat, lon"` at five decimals.
    pub coordinates: String,
    /// Every field's string form joined with spaces, for the search box.
    pub search_text: String,
}

impl SiteRecord {
    pub fn longitude(&self) -> f64 {
        self.geometry.x()
    }

    pub fn latitude(&self) -> f64 {
        self.geometry.y()
    }

    /// Well-known-text form of the point.
    pub fn geometry_wkt(&self) -> String {
        format!("POINT ({} {})", self.geometry.x(), self.geometry.y())
    }
}

/// The cleaned record set.
///
/// Fields are addressed by position. The retained source columns occupy
/// `0..columns.len()`; three derived columns follow: the geometry, the
/// display coordinates and the search text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteTable {
    pub columns: Vec<String>,
    pub records: Vec<SiteRecord>,
}

impl SiteTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn geometry_index(&self) -> usize {
        self.columns.len()
    }

    pub fn coordinates_index(&self) -> usize {
        self.columns.len() + 1
    }

    pub fn search_text_index(&self) -> usize {
        self.columns.len() + 2
    }

    /// Total number of addressable fields, derived ones included.
    pub fn field_count(&self) -> usize {
        self.columns.len() + 3
    }

    /// Label of the field at `index`, derived columns included.
    pub fn label(&self, index: usize) -> Option<&str> {
        if let Some(name) = self.columns.get(index) {
            return Some(name);
        }
        match index - self.columns.len() {
            0 => Some(schema::GEOMETRY_LABEL),
            1 => Some(schema::COORDINATES_LABEL),
            2 => Some(schema::SEARCH_TEXT_LABEL),
            _ => None,
        }
    }

    /// String form of field `index` of `record`.
    pub fn field_text(&self, record: &SiteRecord, index: usize) -> Option<String> {
        if let Some(value) = record.values.get(index) {
            return Some(value.to_string());
        }
        match index.checked_sub(self.columns.len())? {
            0 => Some(record.geometry_wkt()),
            1 => Some(record.coordinates.clone()),
            2 => Some(record.search_text.clone()),
            _ => None,
        }
    }

    /// Value of the named column for `record`.
    pub fn value<'a>(&self, record: &'a SiteRecord, column: &str) -> Option<&'a FieldValue> {
        self.column_index(column).and_then(|i| record.values.get(i))
    }

    /// Distinct string values of `column`, in first-seen order.
    pub fn distinct(&self, column: &str) -> Vec<String> {
        let Some(idx) = self.column_index(column) else {
            return Vec::new();
        };
        let mut seen: Vec<String> = Vec::new();
        for record in &self.records {
            if let Some(value) = record.values.get(idx) {
                let s = value.to_string();
                if !seen.contains(&s) {
                    seen.push(s);
                }
            }
        }
        seen
    }
}
