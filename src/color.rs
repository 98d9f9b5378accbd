use eframe::egui::Color32;
use palette::{IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Gradient palettes for the bar charts
// ---------------------------------------------------------------------------

/// Sequential colour ramps, one per chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientPalette {
    /// Diverging blue → light grey → red.
    CoolWarm,
    /// Dark blue-black → teal → mint.
    Mako,
}

impl GradientPalette {
    fn stops(self) -> &'static [(u8, u8, u8)] {
        match self {
            GradientPalette::CoolWarm => &[(59, 76, 192), (221, 221, 221), (180, 4, 38)],
            GradientPalette::Mako => &[(11, 4, 5), (53, 123, 162), (222, 245, 229)],
        }
    }

    /// `n` colours sampled evenly along the ramp (bar centres, so the ends
    /// of the ramp are never hit exactly).
    pub fn colors(self, n: usize) -> Vec<Color32> {
        (0..n)
            .map(|i| self.sample((i as f32 + 0.5) / n as f32))
            .collect()
    }

    /// Colour at position `t` in `[0, 1]`, interpolated in linear RGB.
    pub fn sample(self, t: f32) -> Color32 {
        let stops = self.stops();
        let t = t.clamp(0.0, 1.0);
        let segments = (stops.len() - 1) as f32;
        let pos = t * segments;
        let idx = (pos.floor() as usize).min(stops.len() - 2);
        let local = pos - idx as f32;

        let a = linear(stops[idx]);
        let b = linear(stops[idx + 1]);
        let rgb: Srgb = a.mix(b, local).into_color();
        Color32::from_rgb(
            (rgb.red * 255.0).round() as u8,
            (rgb.green * 255.0).round() as u8,
            (rgb.blue * 255.0).round() as u8,
        )
    }
}

fn linear((r, g, b): (u8, u8, u8)) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_color()
}

/// Colour of the selected-genre marker.
pub const MARKER_COLOR: Color32 = Color32::BLACK;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_length() {
        assert!(GradientPalette::CoolWarm.colors(0).is_empty());
        assert_eq!(GradientPalette::Mako.colors(13).len(), 13);
    }

    #[test]
    fn test_ramp_endpoints() {
        assert_eq!(GradientPalette::CoolWarm.sample(0.0), Color32::from_rgb(59, 76, 192));
        assert_eq!(GradientPalette::CoolWarm.sample(1.0), Color32::from_rgb(180, 4, 38));
        assert_eq!(GradientPalette::Mako.sample(0.5), Color32::from_rgb(53, 123, 162));
    }

    #[test]
    fn test_coolwarm_runs_from_blue_to_red() {
        let colors = GradientPalette::CoolWarm.colors(5);
        let first = colors[0];
        let last = colors[4];
        assert!(first.b() > first.r());
        assert!(last.r() > last.b());
    }

    #[test]
    fn test_mako_gets_lighter() {
        let colors = GradientPalette::Mako.colors(4);
        let luma = |c: &Color32| c.r() as u32 + c.g() as u32 + c.b() as u32;
        assert!(colors.windows(2).all(|w| luma(&w[0]) < luma(&w[1])));
    }
}
