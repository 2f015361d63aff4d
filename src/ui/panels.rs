use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::export;
use crate::data::loader::{MAX_YEAR, MIN_YEAR};
use crate::state::{AppState, FilterAxis};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong("Courtside");
        ui.separator();
        ui.hyperlink_to(
            "basketball-reference.com",
            "https://www.basketball-reference.com/",
        );

        ui.separator();

        ui.add_enabled_ui(state.dataset.is_some(), |ui: &mut Ui| {
            ui.menu_button("Export", |ui: &mut Ui| {
                if ui.button("Save CSV…").clicked() {
                    save_csv_dialog(state);
                    ui.close_menu();
                }
                if ui.button("Copy download link").clicked() {
                    copy_download_link(ui, state);
                    ui.close_menu();
                }
            });
        });

        ui.separator();

        if ui
            .selectable_label(state.show_heatmap, "Correlation heatmap")
            .clicked()
        {
            state.show_heatmap = !state.show_heatmap;
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – season and filter widgets
// ---------------------------------------------------------------------------

/// Render the season selector and the two category pickers.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.strong("Season");
    let selected_year = state.year;
    egui::ComboBox::from_id_salt("season_year")
        .selected_text(format!("{selected_year}"))
        .show_ui(ui, |ui: &mut Ui| {
            // Newest season first.
            for year in (MIN_YEAR..=MAX_YEAR).rev() {
                if ui
                    .selectable_label(year == selected_year, format!("{year}"))
                    .clicked()
                {
                    state.request_year(year);
                }
            }
        });

    ui.separator();
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No season loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            axis_picker(ui, state, FilterAxis::Team, "Team");
            axis_picker(ui, state, FilterAxis::Position, "Pos");
        });
}

/// One collapsible picker: All/None buttons plus a checkbox per value.
fn axis_picker(ui: &mut Ui, state: &mut AppState, axis: FilterAxis, label: &str) {
    // Clone the option list so we can mutate state inside the loop.
    let values: Vec<String> = state.axis_values(axis).to_vec();
    let n_selected = state.axis_selected(axis).len();
    let header_text = format!("{label}  ({n_selected}/{})", values.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(label)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(axis);
                }
                if ui.small_button("None").clicked() {
                    state.select_none(axis);
                }
            });

            for value in &values {
                let mut checked = state.axis_selected(axis).contains(value);
                if ui.checkbox(&mut checked, value).changed() {
                    state.toggle_value(axis, value);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Export actions
// ---------------------------------------------------------------------------

fn save_csv_dialog(state: &mut AppState) {
    let Some(table) = state.visible_table() else {
        return;
    };

    let Some(path) = rfd::FileDialog::new()
        .set_title("Save filtered stats")
        .set_file_name(export::FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return;
    };

    let written = export::to_csv_string(&table)
        .and_then(|text| std::fs::write(&path, text).map_err(Into::into));
    match written {
        Ok(()) => {
            log::info!("Saved {} rows to {}", table.n_rows(), path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Failed to save CSV: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

/// Put the base64 data URI on the clipboard; pasting it into a browser
/// address bar downloads the CSV.
fn copy_download_link(ui: &Ui, state: &mut AppState) {
    let Some(table) = state.visible_table() else {
        return;
    };

    match export::to_data_uri(&table) {
        Ok(uri) => {
            log::info!("Copied download link for {} rows", table.n_rows());
            ui.ctx().copy_text(uri);
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Failed to build download link: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
