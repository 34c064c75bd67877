//! File outputs besides the map page.

pub mod export;
