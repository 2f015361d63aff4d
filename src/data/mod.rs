//! Data layer: everything between the stats page and the widgets.
//!
//! ```text
//! loader -> StatsTable -> filter -> { export, correlate }
//! ```
//!
//! Each user interaction re-runs the relevant tail of this pipeline; nothing
//! is cached across seasons.

pub mod correlate;
pub mod export;
pub mod filter;
pub mod html;
pub mod loader;
pub mod model;
