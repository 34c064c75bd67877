//! Marker radius from turbine height.

use crate::records::FieldValue;

/// Radius used when the height is missing or not a number.
pub const DEFAULT_RADIUS: u32 = 2;

/// Upper-exclusive height thresholds (metres) and the radius below each.
/// Heights at or above the last threshold get [`MAX_RADIUS`].
pub const HEIGHT_BUCKETS: &[(f64, u32)] = &[(50.0, 6), (100.0, 8), (150.0, 10)];

pub const MAX_RADIUS: u32 = 12;

/// Maps a turbine height to a marker radius.
///
/// Never fails: anything that does not read as a number falls back to
/// [`DEFAULT_RADIUS`].
///
/// # Examples
///
/// ```
/// use wind_planning_map::records::FieldValue;
/// use wind_planning_map::style::size::marker_radius;
///
/// assert_eq!(marker_radius(&FieldValue::Number(49.0)), 6);
/// assert_eq!(marker_radius(&FieldValue::Text("N/A".into())), 2);
/// ```
pub fn marker_radius(height: &FieldValue) -> u32 {
    height.as_f64().map_or(DEFAULT_RADIUS, radius_for_height)
}

/// Bucketed radius for a numeric height. NaN gets the default.
pub fn radius_for_height(h: f64) -> u32 {
    if h.is_nan() {
        return DEFAULT_RADIUS;
    }
    HEIGHT_BUCKETS
        .iter()
        .find(|(limit, _)| h < *limit)
        .map_or(MAX_RADIUS, |&(_, radius)| radius)
}

/// Legend rows: a label for each height band and its radius.
pub fn legend_entries() -> Vec<(String, u32)> {
    let mut rows = Vec::with_capacity(HEIGHT_BUCKETS.len() + 2);
    let mut lower: Option<f64> = None;
    for &(limit, radius) in HEIGHT_BUCKETS {
        let label = match lower {
            None => format!("< {limit} m"),
            Some(lo) => format!("{lo}\u{2013}{limit} m"),
        };
        rows.push((label, radius));
        lower = Some(limit);
    }
    if let Some(lo) = lower {
        rows.push((format!("\u{2265} {lo} m"), MAX_RADIUS));
    }
    rows.push(("height unknown".to_string(), DEFAULT_RADIUS));
    rows
}
