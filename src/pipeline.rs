//! End-to-end run: load, clean, style, overlay, render.

use tracing::info;

use crate::config::MapConfig;
use crate::error::Result;
use crate::io::export::export_csv;
use crate::overlay::{OverlayScan, load_overlays};
use crate::records::schema::STATUS_COLUMN;
use crate::records::{CleaningReport, SiteTable, clean, load_raw_table};
use crate::render::{MapDocument, render_map, write_map};
use crate::reporting::RunReport;
use crate::style::{StatusPalette, status_palette};

/// Everything needed to draw the map, before any output is written.
#[derive(Debug, Clone)]
pub struct MapData {
    pub sites: SiteTable,
    pub cleaning: CleaningReport,
    pub palette: StatusPalette,
    pub overlays: OverlayScan,
}

impl MapData {
    /// Page description for this data under `config`'s view settings.
    pub fn document<'a>(&'a self, config: &'a MapConfig) -> MapDocument<'a> {
        MapDocument {
            title: &config.map.title,
            center: (config.map.center_lat, config.map.center_lon),
            zoom: config.map.zoom,
            sites: &self.sites,
            palette: &self.palette,
            overlays: &self.overlays.layers,
        }
    }

    /// The rendered page as a string.
    pub fn render(&self, config: &MapConfig) -> String {
        render_map(&self.document(config))
    }
}

/// Loads and prepares all map inputs named by `config`.
///
/// # Errors
///
/// Fails if the source CSV cannot be read or decoded or lacks a required
/// column. Overlay problems never fail the run.
pub fn prepare(config: &MapConfig) -> Result<MapData> {
    let raw = load_raw_table(&config.source.path, &config.source.encoding)?;
    let (sites, cleaning) = clean(&raw, &config.clean_options())?;
    let palette = status_palette(STATUS_COLUMN, &sites)?;
    info!(statuses = palette.len(), "built status palette");
    let overlays = load_overlays(&config.overlays.dir, &config.overlay_options());
    Ok(MapData {
        sites,
        cleaning,
        palette,
        overlays,
    })
}

/// Runs the whole pipeline and writes the configured outputs.
///
/// # Errors
///
/// Propagates [`prepare`] failures and output write errors.
pub fn run(config: &MapConfig) -> Result<RunReport> {
    let data = prepare(config)?;
    write_map(&data.document(config), &config.output.html)?;
    if let Some(path) = &config.output.records_csv {
        export_csv(&data.sites, path)?;
    }
    Ok(RunReport::new(&data, config))
}
