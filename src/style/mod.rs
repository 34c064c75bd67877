//! Visual attributes of site markers: size, color, popup text.

pub mod palette;
pub mod popup;
pub mod size;

pub use palette::{DEFAULT_COLOR, STATUS_COLORS, StatusPalette, status_palette};
pub use popup::popup_lines;
pub use size::marker_radius;

use crate::records::schema::{HEIGHT_COLUMN, STATUS_COLUMN};
use crate::records::{FieldValue, SiteRecord, SiteTable};

/// How one record is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerStyle {
    pub radius: u32,
    pub color: &'static str,
}

impl MarkerStyle {
    /// Radius from the turbine height and color from the development status.
    /// A record without either column gets the fallbacks.
    pub fn for_record(sites: &SiteTable, record: &SiteRecord, palette: &StatusPalette) -> Self {
        let radius = marker_radius(
            sites
                .value(record, HEIGHT_COLUMN)
                .unwrap_or(&FieldValue::Missing),
        );
        let color = sites
            .value(record, STATUS_COLUMN)
            .map_or(DEFAULT_COLOR, |status| {
                palette.color_or_default(&status.to_string())
            });
        Self { radius, color }
    }
}
