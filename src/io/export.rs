//! CSV export of the cleaned site table.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use tracing::info;

use crate::error::{MapError, Result};
use crate::records::SiteTable;
use crate::records::schema::COORDINATES_LABEL;

/// Columns appended after the retained source columns.
const DERIVED_HEADER: [&str; 3] = ["Latitude", "Longitude", COORDINATES_LABEL];

/// Exports the cleaned records to a CSV file at the given path.
///
/// Writes the retained source columns followed by latitude, longitude and
/// the display coordinates. Produces deterministic output for identical
/// inputs.
///
/// # Arguments
///
/// * `sites` - Cleaned site table
/// * `path` - Output file path
///
/// # Errors
///
/// Returns [`MapError::Write`] if file creation fails, or a CSV error if
/// writing fails.
pub fn export_csv(sites: &SiteTable, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| MapError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let buf = io::BufWriter::new(file);
    write_csv(sites, buf)?;
    info!(path = %path.display(), rows = sites.len(), "exported cleaned records");
    Ok(())
}

/// Writes the cleaned records as CSV to any writer.
///
/// # Arguments
///
/// * `sites` - Cleaned site table
/// * `writer` - Destination implementing `Write`
///
/// # Errors
///
/// Returns a CSV error if writing fails.
pub fn write_csv(sites: &SiteTable, writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(
        sites
            .columns
            .iter()
            .map(String::as_str)
            .chain(DERIVED_HEADER),
    )?;

    for r in &sites.records {
        let mut row: Vec<String> = r.values.iter().map(ToString::to_string).collect();
        row.push(format!("{:.6}", r.latitude()));
        row.push(format!("{:.6}", r.longitude()));
        row.push(r.coordinates.clone());
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}
