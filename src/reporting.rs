//! Summary printed at the end of a run.

use std::fmt;
use std::path::PathBuf;

use crate::config::MapConfig;
use crate::pipeline::MapData;
use crate::records::CleaningReport;

/// Outcome of one pipeline run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub cleaning: CleaningReport,
    pub markers: usize,
    /// Statuses shown in the legend.
    pub statuses: usize,
    pub overlays_loaded: usize,
    /// Files skipped, with the reason.
    pub overlays_failed: Vec<(PathBuf, String)>,
    pub html: PathBuf,
    pub records_csv: Option<PathBuf>,
}

impl RunReport {
    pub fn new(data: &MapData, config: &MapConfig) -> Self {
        Self {
            cleaning: data.cleaning.clone(),
            markers: data.sites.len(),
            statuses: data.palette.len(),
            overlays_loaded: data.overlays.layers.len(),
            overlays_failed: data
                .overlays
                .failures
                .iter()
                .map(|f| (f.path.clone(), f.reason.clone()))
                .collect(),
            html: config.output.html.clone(),
            records_csv: config.output.records_csv.clone(),
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.cleaning)?;
        writeln!(f)?;
        writeln!(f, "--- Map Report ---")?;
        writeln!(f, "Markers:          {}", self.markers)?;
        writeln!(f, "Legend statuses:  {}", self.statuses)?;
        writeln!(f, "Overlays loaded:  {}", self.overlays_loaded)?;
        writeln!(f, "Overlays skipped: {}", self.overlays_failed.len())?;
        for (path, reason) in &self.overlays_failed {
            writeln!(f, "  {}: {reason}", path.display())?;
        }
        if let Some(csv) = &self.records_csv {
            writeln!(f, "Records CSV:      {}", csv.display())?;
        }
        write!(f, "Map:              {}", self.html.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_lists_skipped_overlays() {
        let report = RunReport {
            cleaning: CleaningReport {
                rows_read: 10,
                rows_matched: 6,
                dropped_non_numeric: 1,
                dropped_invalid_geometry: 0,
                retained: 5,
            },
            markers: 5,
            statuses: 3,
            overlays_loaded: 2,
            overlays_failed: vec![(PathBuf::from("broken.zip"), "bad archive".into())],
            html: PathBuf::from("map.html"),
            records_csv: None,
        };
        let text = report.to_string();
        assert!(text.contains("--- Cleaning Report ---"));
        assert!(text.contains("Markers:          5"));
        assert!(text.contains("broken.zip: bad archive"));
        assert!(!text.contains("Records CSV"));
        assert!(text.ends_with("map.html"));
    }
}
