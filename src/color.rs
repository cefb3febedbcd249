use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
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
// Region → Color32
// ---------------------------------------------------------------------------

/// One distinct colour per region; used for the radio labels and the chart line.
#[derive(Debug, Clone)]
pub struct RegionColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl RegionColors {
    pub fn new(regions: &[String]) -> Self {
        let mapping = regions
            .iter()
            .cloned()
            .zip(generate_palette(regions.len()))
            .collect();

        RegionColors {
            mapping,
            default_color: Color32::LIGHT_BLUE,
        }
    }

    pub fn color_for(&self, region: &str) -> Color32 {
        self.mapping
            .get(region)
            .copied()
            .unwrap_or(self.default_color)
    }
}
