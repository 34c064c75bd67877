//! Error type shared by the loading, styling, overlay and rendering stages.

use std::io;
use std::path::PathBuf;

/// Errors surfaced to callers of the library.
///
/// Row-level data problems never appear here: the cleaner drops and counts
/// them instead. These variants cover structural failures and misuse.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("cannot read \"{path}\": {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write \"{path}\": {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown text encoding label \"{0}\"")]
    UnknownEncoding(String),

    #[error("source table has no \"{0}\" column")]
    MissingColumn(String),

    /// The color rule was asked to classify an attribute it has no table for.
    #[error("colors are only defined for \"{expected}\", got \"{got}\"")]
    UnsupportedAttribute { expected: &'static str, got: String },

    #[error("zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("shapefile: {0}")]
    Shapefile(#[from] shapefile::Error),

    #[error("GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("archive contains no .shp or .geojson layer")]
    EmptyArchive,

    /// A layer declares a reference system other than WGS 84 or the National Grid.
    #[error("unsupported coordinate reference system \"{0}\" (expected WGS 84 or British National Grid)")]
    UnsupportedCrs(String),
}

/// Convenience alias used across the crate.
pub type Result<T, E = MapError> = std::result::Result<T, E>;
