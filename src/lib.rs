//! Interactive map of UK onshore wind planning applications.

pub mod cli;
pub mod config;
pub mod error;
pub mod io;
/// Overlay layer discovery, reading and reprojection.
pub mod overlay;
pub mod pipeline;
pub mod projection;
/// Source table loading and cleaning.
pub mod records;
pub mod render;
pub mod reporting;
pub mod style;

pub use error::{MapError, Result};
