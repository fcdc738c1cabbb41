use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Categorical palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
/// Used for sunburst sectors.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Continuous scale: numeric value → diverging red/blue colour
// ---------------------------------------------------------------------------

/// Maps a numeric domain onto a diverging red → white → blue gradient,
/// used to colour bars and map points by price.
#[derive(Debug, Clone, Copy)]
pub struct PriceScale {
    min: f64,
    max: f64,
}

impl PriceScale {
    /// Build a scale spanning the given values.  `None` when no finite
    /// value is present (empty subset), in which case callers fall back to
    /// a flat colour.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            if v.is_finite() {
                min = min.min(v);
                max = max.max(v);
            }
        }
        if min > max {
            return None;
        }
        Some(PriceScale { min, max })
    }

    /// Position of `value` within the domain, clamped to `[0, 1]`.
    pub fn t(&self, value: f64) -> f32 {
        let range = self.max - self.min;
        if range.abs() < f64::EPSILON {
            return 0.5;
        }
        (((value - self.min) / range) as f32).clamp(0.0, 1.0)
    }

    pub fn color_for(&self, value: f64) -> Color32 {
        diverging(self.t(value))
    }
}

/// Diverging gradient: red at 0, near-white at 0.5, blue at 1.
pub fn diverging(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let red: LinSrgb = Srgb::new(0.70f32, 0.09, 0.17).into_linear();
    let white: LinSrgb = Srgb::new(0.97f32, 0.97, 0.97).into_linear();
    let blue: LinSrgb = Srgb::new(0.13f32, 0.40, 0.67).into_linear();

    let mixed = if t < 0.5 {
        red.mix(white, t * 2.0)
    } else {
        white.mix(blue, (t - 0.5) * 2.0)
    };
    let srgb: Srgb = Srgb::from_linear(mixed);
    Color32::from_rgb(
        (srgb.red * 255.0) as u8,
        (srgb.green * 255.0) as u8,
        (srgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_length() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(7).len(), 7);
    }

    #[test]
    fn scale_clamps_and_normalizes() {
        let scale = PriceScale::from_values([10.0, 20.0, 30.0]).unwrap();
        assert_eq!(scale.t(10.0), 0.0);
        assert_eq!(scale.t(30.0), 1.0);
        assert_eq!(scale.t(-5.0), 0.0);
        assert_eq!(scale.t(99.0), 1.0);
    }

    #[test]
    fn degenerate_domain_maps_to_midpoint() {
        let scale = PriceScale::from_values([42.0, 42.0]).unwrap();
        assert_eq!(scale.t(42.0), 0.5);
    }

    #[test]
    fn empty_domain_yields_no_scale() {
        assert!(PriceScale::from_values([]).is_none());
        assert!(PriceScale::from_values([f64::NAN]).is_none());
    }
}
