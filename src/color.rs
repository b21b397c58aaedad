use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Continuous colour scale: worth → Color32
// ---------------------------------------------------------------------------

/// Pale green end of the scale (lowest value).
const LOW: (f32, f32, f32) = (130.0, 0.70, 0.82);
/// Deep teal end of the scale (highest value).
const HIGH: (f32, f32, f32) = (195.0, 0.60, 0.37);

/// Maps numeric values onto a teal-green gradient spanning their range.
#[derive(Debug, Clone, Copy)]
pub struct ColorScale {
    min: f64,
    max: f64,
}

impl ColorScale {
    /// Build a scale covering the finite values given. An empty input
    /// gives a degenerate scale that paints everything with the high end.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        ColorScale { min, max }
    }

    /// Position of `value` on the scale in `[0, 1]`.
    fn position(&self, value: f64) -> f32 {
        let range = self.max - self.min;
        if !range.is_finite() || range.abs() < f64::EPSILON {
            return 1.0;
        }
        ((value - self.min) / range).clamp(0.0, 1.0) as f32
    }

    /// Look up the colour for a given value.
    pub fn color_for(&self, value: f64) -> Color32 {
        let t = self.position(value);
        let lerp = |a: f32, b: f32| a + (b - a) * t;
        let hsl: Hsl = Hsl::new(lerp(LOW.0, HIGH.0), lerp(LOW.1, HIGH.1), lerp(LOW.2, HIGH.2));
        let rgb: Srgb = hsl.into_color();
        Color32::from_rgb(
            (rgb.red * 255.0) as u8,
            (rgb.green * 255.0) as u8,
            (rgb.blue * 255.0) as u8,
        )
    }
}
