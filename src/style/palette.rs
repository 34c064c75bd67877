//! Marker color from development status.

use crate::error::{MapError, Result};
use crate::records::SiteTable;
use crate::records::schema::STATUS_COLUMN;

/// Color for statuses with no table entry.
pub const DEFAULT_COLOR: &str = "#000000";

/// Known statuses and their colors, grouped by planning phase:
/// application, appeal, consented/built, and ended.
pub const STATUS_COLORS: &[(&str, &str)] = &[
    ("Application Submitted", "#1f77b4"),
    ("Revised", "#17becf"),
    ("Application Withdrawn", "#9467bd"),
    ("Application Refused", "#d62728"),
    ("Appeal Lodged", "#ff7f0e"),
    ("Appeal Withdrawn", "#c5b0d5"),
    ("Appeal Refused", "#8c1c13"),
    ("Appeal Granted", "#bcbd22"),
    ("Awaiting Construction", "#98df8a"),
    ("Under Construction", "#2ca02c"),
    ("Operational", "#006400"),
    ("Planning Permission Expired", "#7f7f7f"),
    ("Abandoned", "#8c564b"),
    ("Decommissioned", "#e377c2"),
];

/// The status colors relevant to one record set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusPalette {
    entries: Vec<(&'static str, &'static str)>,
}

impl StatusPalette {
    /// `(status, color)` pairs in table order.
    pub fn entries(&self) -> &[(&'static str, &'static str)] {
        &self.entries
    }

    pub fn color(&self, status: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(s, _)| *s == status)
            .map(|&(_, c)| c)
    }

    /// Color for `status`, or [`DEFAULT_COLOR`] if it is not in the palette.
    pub fn color_or_default(&self, status: &str) -> &'static str {
        self.color(status).unwrap_or(DEFAULT_COLOR)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the palette of statuses present in `sites`.
///
/// Only [`STATUS_COLUMN`] has a color table; the attribute name is checked
/// so a caller cannot silently color by the wrong field.
///
/// # Errors
///
/// Returns [`MapError::UnsupportedAttribute`] for any other attribute.
pub fn status_palette(attribute: &str, sites: &SiteTable) -> Result<StatusPalette> {
    if attribute != STATUS_COLUMN {
        return Err(MapError::UnsupportedAttribute {
            expected: STATUS_COLUMN,
            got: attribute.to_string(),
        });
    }
    let present = sites.distinct(attribute);
    let entries = STATUS_COLORS
        .iter()
        .filter(|(status, _)| present.iter().any(|p| p == *status))
        .copied()
        .collect();
    Ok(StatusPalette { entries })
}
