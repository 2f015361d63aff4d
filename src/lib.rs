//! NBA per-game player stats explorer: fetch one season's table from
//! basketball-reference.com, filter it by team and position, export the
//! result as CSV, and chart a correlation heatmap over the numeric columns.

pub mod app;
pub mod color;
pub mod data;
pub mod state;
pub mod ui;
