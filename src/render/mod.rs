//! Writes the cleaned sites and overlays as a self-contained Leaflet page.

pub mod escape;
pub mod legend;
pub mod template;

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{MapError, Result};
use crate::overlay::OverlayLayer;
use crate::records::schema::SITE_NAME_COLUMN;
use crate::records::{SiteRecord, SiteTable};
use crate::style::{MarkerStyle, StatusPalette, popup_lines};
use escape::{html, js_record_string, script_json};

/// Name of the site marker layer in the layer control.
pub const MARKER_LAYER_NAME: &str = "Onshore wind sites";

/// Everything the page needs.
#[derive(Debug, Clone, Copy)]
pub struct MapDocument<'a> {
    pub title: &'a str,
    /// Initial view centre as `(lat, lon)`.
    pub center: (f64, f64),
    pub zoom: u8,
    pub sites: &'a SiteTable,
    pub palette: &'a StatusPalette,
    pub overlays: &'a [OverlayLayer],
}

/// Renders the full HTML document.
pub fn render_map(doc: &MapDocument<'_>) -> String {
    let sites = site_entries(doc);
    let overlays = overlay_entries(doc.overlays);
    let legend = legend::legend_html(doc.palette);
    let title = html(doc.title);
    let (lat, lon) = (doc.center.0.to_string(), doc.center.1.to_string());
    let zoom = doc.zoom.to_string();
    let marker_layer = serde_json::Value::from(MARKER_LAYER_NAME).to_string();

    fill(
        template::PAGE,
        &[
            ("__TITLE__", title.as_str()),
            ("__LEAFLET_CSS__", template::LEAFLET_CSS),
            ("__LEAFLET_JS__", template::LEAFLET_JS),
            ("__SEARCH_CSS__", template::SEARCH_CSS),
            ("__SEARCH_JS__", template::SEARCH_JS),
            ("__OSM_TILES__", template::OSM_TILES),
            ("__OSM_ATTRIBUTION__", template::OSM_ATTRIBUTION),
            ("__IMAGERY_TILES__", template::IMAGERY_TILES),
            ("__IMAGERY_ATTRIBUTION__", template::IMAGERY_ATTRIBUTION),
            ("__CENTER_LAT__", lat.as_str()),
            ("__CENTER_LON__", lon.as_str()),
            ("__ZOOM__", zoom.as_str()),
            ("__LEGEND__", legend.as_str()),
            ("__MARKER_LAYER_NAME__", marker_layer.as_str()),
            ("__SITES__", sites.as_str()),
            ("__OVERLAYS__", overlays.as_str()),
        ],
    )
}

/// Substitutes `__NAME__` placeholders in one left-to-right pass, so text
/// inside a substituted value is never rescanned.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find("__") {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match values.iter().find(|(key, _)| rest.starts_with(*key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &rest[key.len()..];
            }
            None => {
                out.push_str("__");
                rest = &rest[2..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Renders the document and writes it to `path`.
///
/// # Errors
///
/// Returns [`MapError::Write`] if the file cannot be written.
pub fn write_map(doc: &MapDocument<'_>, path: &Path) -> Result<()> {
    let page = render_map(doc);
    fs::write(path, page.as_bytes()).map_err(|source| MapError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        markers = doc.sites.len(),
        overlays = doc.overlays.len(),
        "wrote map"
    );
    Ok(())
}

/// Popup lines escaped for HTML and joined with line breaks.
fn popup_html(sites: &SiteTable, record: &SiteRecord) -> String {
    popup_lines(sites, record)
        .iter()
        .map(|line| html(line))
        .collect::<Vec<_>>()
        .join("<br>")
}

fn site_entries(doc: &MapDocument<'_>) -> String {
    let mut out = String::new();
    for record in &doc.sites.records {
        let style = MarkerStyle::for_record(doc.sites, record, doc.palette);
        let name = doc
            .sites
            .value(record, SITE_NAME_COLUMN)
            .map(ToString::to_string)
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "      {{ lat: {}, lon: {}, radius: {}, color: \"{}\", name: {}, popup: {}, search: {} }},",
            record.latitude(),
            record.longitude(),
            style.radius,
            style.color,
            js_record_string(&html(&name)),
            js_record_string(&popup_html(doc.sites, record)),
            js_record_string(&record.search_text),
        );
    }
    out
}

/// Serializes one overlay's data; a failure drops the layer with a warning.
fn layer_json<T: serde::Serialize>(layer: &str, value: &T) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(data) => Some(data),
        Err(e) => {
            warn!(layer, error = %e, "dropping overlay that failed to serialize");
            None
        }
    }
}

fn overlay_entries(overlays: &[OverlayLayer]) -> String {
    let mut out = String::new();
    for layer in overlays {
        let Some(data) = layer_json(&layer.name, &layer.to_geojson()) else {
            continue;
        };
        let _ = writeln!(
            out,
            "      {{ name: {}, color: {}, data: {} }},",
            script_json(&serde_json::Value::from(layer.name.as_str()).to_string()),
            serde_json::Value::from(layer.color.as_str()),
            script_json(&data),
        );
    }
    out
}
