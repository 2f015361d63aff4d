use eframe::egui::{self, Color32, ColorImage, RichText, TextureHandle, TextureOptions, Ui, Vec2};
use egui_plot::{Plot, PlotImage, PlotPoint, Text};

use crate::color::{contrast_text, diverging_color};
use crate::data::correlate::CorrelationMatrix;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Bottom panel – correlation heatmap
// ---------------------------------------------------------------------------

/// Render the heatmap over the currently visible rows. Correlation and the
/// cell texture are cached in state; a selection or season change drops
/// both.
pub fn heatmap_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(format!(
            "NBA Player Stats Correlation Matrix ({})",
            state.year
        ));
        ui.separator();
        ui.checkbox(&mut state.show_annotations, "Show annotations");
    });
    ui.label("Identity columns are excluded; non-numeric values count as missing.");

    state.ensure_correlation();
    if state.heatmap_texture.is_none() {
        if let Some(matrix) = &state.correlation {
            state.heatmap_texture = Some(build_texture(ui.ctx(), matrix));
        }
    }

    if let Some(message) = &state.correlation_error {
        ui.colored_label(Color32::RED, message);
        return;
    }
    let (Some(matrix), Some(texture)) = (&state.correlation, &state.heatmap_texture) else {
        ui.label("No season loaded.");
        return;
    };

    draw_plot(ui, matrix, texture, state.show_annotations);
}

/// One pixel per cell; only the strict lower triangle is coloured, the rest
/// stays transparent so the diagonal can carry the column labels.
fn build_texture(ctx: &egui::Context, matrix: &CorrelationMatrix) -> TextureHandle {
    let n = matrix.size();
    let mut pixels = vec![Color32::TRANSPARENT; n * n];
    for row in 1..n {
        for col in 0..row {
            pixels[row * n + col] = diverging_color(matrix.value(row, col));
        }
    }
    let image = ColorImage {
        size: [n, n],
        pixels,
    };
    ctx.load_texture("correlation_cells", image, TextureOptions::NEAREST)
}

fn draw_plot(ui: &mut Ui, matrix: &CorrelationMatrix, texture: &TextureHandle, annotate: bool) {
    let n = matrix.size();
    let side = n as f64;

    // Owned copies for the hover formatter, which outlives this borrow.
    let hover_labels = matrix.labels.clone();
    let hover_values = matrix.values.clone();

    Plot::new("correlation_heatmap")
        .data_aspect(1.0)
        .show_axes([false, false])
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .label_formatter(move |_name, point| {
            let col = point.x.floor();
            let row = (side - point.y).floor();
            if col >= 0.0 && row >= 0.0 && col < side && row < side {
                let (i, j) = (row as usize, col as usize);
                if j < i {
                    return format!(
                        "{} × {}\nr = {:.2}",
                        hover_labels[i], hover_labels[j], hover_values[i][j]
                    );
                }
            }
            String::new()
        })
        .show(ui, |plot_ui| {
            // Matrix row 0 sits at the top, like the table header order.
            plot_ui.image(PlotImage::new(
                texture.id(),
                PlotPoint::new(side / 2.0, side / 2.0),
                Vec2::new(side as f32, side as f32),
            ));

            for (i, label) in matrix.labels.iter().enumerate() {
                // The masked diagonal cell carries the column name.
                let pos = PlotPoint::new(i as f64 + 0.5, side - i as f64 - 0.5);
                plot_ui.text(Text::new(pos, RichText::new(label).strong()));
            }

            if annotate {
                for i in 1..n {
                    for j in 0..i {
                        let value = matrix.value(i, j);
                        let pos = PlotPoint::new(j as f64 + 0.5, side - i as f64 - 0.5);
                        let text = RichText::new(format!("{value:.2}"))
                            .small()
                            .color(contrast_text(diverging_color(value)));
                        plot_ui.text(Text::new(pos, text));
                    }
                }
            }
        });
}
