use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::{Cell, PLAYER_COLUMN};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – filtered stats table
// ---------------------------------------------------------------------------

const ROW_HEIGHT: f32 = 18.0;

/// Render the filtered season table. Rows are virtualized, so a full league
/// season stays cheap to scroll.
pub fn stats_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Pick a season to load player stats");
        });
        return;
    };

    ui.heading("Player Stats of Selected Teams");
    ui.label(format!(
        "{} rows and {} columns",
        state.visible_rows.len(),
        dataset.n_columns()
    ));
    ui.add_space(4.0);

    let mut builder = TableBuilder::new(ui).striped(true).resizable(true);
    for column in &dataset.columns {
        let width = if column == PLAYER_COLUMN { 160.0 } else { 48.0 };
        builder = builder.column(Column::initial(width).at_least(32.0));
    }

    builder
        .header(20.0, |mut header| {
            for column in &dataset.columns {
                header.col(|ui| {
                    ui.strong(column);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.visible_rows.len(), |mut row| {
                let cells = &dataset.rows[state.visible_rows[row.index()]];
                for cell in cells {
                    row.col(|ui| {
                        match cell {
                            // Monospace keeps the stat columns aligned.
                            Cell::Number(_) => ui.monospace(cell.to_string()),
                            _ => ui.label(cell.to_string()),
                        };
                    });
                }
            });
        });
}
