//! Legend panel: status colors present in the data, then marker sizes.

use std::fmt::Write;

use super::escape::html;
use crate::style::StatusPalette;
use crate::style::palette::DEFAULT_COLOR;
use crate::style::size::legend_entries;

/// Builds the legend `<div>`.
///
/// Only statuses in `palette` are listed; an "Other" swatch in the fallback
/// color follows them.
pub fn legend_html(palette: &StatusPalette) -> String {
    let mut out = String::from("  <div class=\"map-legend\">\n    <h4>Development status</h4>\n");
    for (status, color) in palette.entries() {
        let _ = writeln!(
            out,
            "    <div><span class=\"swatch\" style=\"background:{color}\"></span>{}</div>",
            html(status)
        );
    }
    let _ = writeln!(
        out,
        "    <div><span class=\"swatch\" style=\"background:{DEFAULT_COLOR}\"></span>Other</div>"
    );

    out.push_str("    <h4>Turbine height</h4>\n");
    for (label, radius) in legend_entries() {
        let d = radius * 2;
        let _ = writeln!(
            out,
            "    <div><span class=\"size\" style=\"width:{d}px;height:{d}px\"></span>{}</div>",
            html(&label)
        );
    }
    out.push_str("  </div>");
    out
}
