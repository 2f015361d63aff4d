use eframe::egui;

use crate::data::loader;
use crate::state::AppState;
use crate::ui::{heatmap, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CourtsideApp {
    pub state: AppState,
}

impl Default for CourtsideApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl CourtsideApp {
    /// Serve a queued season request. Blocks the UI thread for the duration
    /// of the fetch; one interaction, one pipeline run.
    fn service_pending_load(&mut self) {
        let Some(year) = self.state.pending_load.take() else {
            return;
        };

        log::info!("Loading season {year} from {}", loader::stats_url(year));
        match loader::load_year(year) {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows with columns {:?}",
                    table.n_rows(),
                    table.columns
                );
                self.state.set_dataset(table);
            }
            Err(e) => {
                log::error!("Failed to load season {year}: {e}");
                self.state.clear_dataset();
                self.state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

impl eframe::App for CourtsideApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.service_pending_load();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: season + filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: correlation heatmap (toggled) ----
        if self.state.show_heatmap {
            egui::TopBottomPanel::bottom("heatmap_panel")
                .default_height(360.0)
                .resizable(true)
                .show(ctx, |ui| {
                    heatmap::heatmap_panel(ui, &mut self.state);
                });
        }

        // ---- Central panel: stats table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::stats_table(ui, &self.state);
        });
    }
}
