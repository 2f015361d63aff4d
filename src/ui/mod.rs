//! Widget layer: render functions over [`AppState`](crate::state::AppState),
//! one module per panel.

pub mod heatmap;
pub mod panels;
pub mod table;
