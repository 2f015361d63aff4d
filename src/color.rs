use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Diverging colour map for correlation coefficients
// ---------------------------------------------------------------------------

// Endpoints close to the classic cool/warm ramp.
const COOL: (f32, f32, f32) = (0.23, 0.30, 0.75);
const WARM: (f32, f32, f32) = (0.71, 0.02, 0.15);

/// Maps a coefficient in [-1, 1] onto a blue-white-red ramp, white at zero.
/// Mixing happens in linear light; out-of-range input is clamped.
pub fn diverging_color(t: f64) -> Color32 {
    let t = t.clamp(-1.0, 1.0) as f32;
    let white = LinSrgb::new(1.0, 1.0, 1.0);
    let mixed = if t < 0.0 {
        let cool: LinSrgb = Srgb::new(COOL.0, COOL.1, COOL.2).into_linear();
        white.mix(cool, -t)
    } else {
        let warm: LinSrgb = Srgb::new(WARM.0, WARM.1, WARM.2).into_linear();
        white.mix(warm, t)
    };
    let rgb: Srgb = Srgb::from_linear(mixed);
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Black or white, whichever reads better over the given cell colour.
pub fn contrast_text(background: Color32) -> Color32 {
    // Perceived luminance, ITU-R BT.601 weights.
    let luma = 0.299 * f32::from(background.r())
        + 0.587 * f32::from(background.g())
        + 0.114 * f32::from(background.b());
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}
