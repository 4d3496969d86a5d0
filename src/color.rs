use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Rgb – toolkit-independent colour carried in chart descriptions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Indigo used for single-series charts.
pub const PRIMARY: Rgb = Rgb(0x4F, 0x46, 0xE5);
/// Sky blue, the second class colour.
pub const SECONDARY: Rgb = Rgb(0x0E, 0xA5, 0xE9);
/// Cells with an undefined value.
pub const UNDEFINED: Rgb = Rgb(0x9C, 0xA3, 0xAF);

/// Colour sequence for the class-imbalance bars.
pub const CLASS_SEQUENCE: [Rgb; 2] = [PRIMARY, SECONDARY];

impl Rgb {
    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgb(self.0, self.1, self.2)
    }

    fn to_linear(self) -> LinSrgb {
        Srgb::new(self.0, self.1, self.2)
            .into_format::<f32>()
            .into_linear()
    }

    fn from_linear(color: LinSrgb) -> Self {
        let srgb: Srgb<f32> = Srgb::from_linear(color);
        let srgb: Srgb<u8> = srgb.into_format();
        Rgb(srgb.red, srgb.green, srgb.blue)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Category mapping: label → colour
// ---------------------------------------------------------------------------

/// Maps the distinct labels of a categorical column to distinct colours.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Rgb>,
    default_color: Rgb,
}

impl CategoryColors {
    /// Colours are assigned in the order the labels are given.
    pub fn new<S: AsRef<str>>(labels: &[S]) -> Self {
        let palette = generate_palette(labels.len());
        let mapping = labels
            .iter()
            .zip(palette)
            .map(|(label, c)| (label.as_ref().to_string(), c))
            .collect();

        CategoryColors {
            mapping,
            default_color: UNDEFINED,
        }
    }

    pub fn color_for(&self, label: &str) -> Rgb {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Sequential scale
// ---------------------------------------------------------------------------

/// Continuous colour scale for heat-maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScale {
    Viridis,
}

const VIRIDIS: [Rgb; 10] = [
    Rgb(0x44, 0x01, 0x54),
    Rgb(0x48, 0x28, 0x78),
    Rgb(0x3E, 0x49, 0x89),
    Rgb(0x31, 0x68, 0x8E),
    Rgb(0x26, 0x82, 0x8E),
    Rgb(0x1F, 0x9E, 0x89),
    Rgb(0x35, 0xB7, 0x79),
    Rgb(0x6E, 0xCE, 0x58),
    Rgb(0xB5, 0xDE, 0x2B),
    Rgb(0xFD, 0xE7, 0x25),
];

impl ColorScale {
    fn stops(self) -> &'static [Rgb] {
        match self {
            ColorScale::Viridis => &VIRIDIS,
        }
    }

    /// Colour for `value` within `[min, max]`, interpolated in linear RGB.
    pub fn sample(self, value: f64, min: f64, max: f64) -> Rgb {
        if !value.is_finite() {
            return UNDEFINED;
        }
        let t = if max > min {
            ((value - min) / (max - min)).clamp(0.0, 1.0)
        } else {
            0.5
        };
        let stops = self.stops();
        let scaled = t * (stops.len() - 1) as f64;
        let i = (scaled.floor() as usize).min(stops.len() - 2);
        let frac = (scaled - i as f64) as f32;
        if frac <= 0.0 {
            return stops[i];
        }
        if frac >= 1.0 {
            return stops[i + 1];
        }
        let mixed = stops[i].to_linear().mix(stops[i + 1].to_linear(), frac);
        Rgb::from_linear(mixed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_uppercase_with_hash() {
        assert_eq!(PRIMARY.hex(), "#4F46E5");
        assert_eq!(serde_json::to_string(&SECONDARY).unwrap(), "\"#0EA5E9\"");
    }

    #[test]
    fn palette_has_distinct_colours() {
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        for i in 0..4 {
            for j in (i + 1)..4 {
                assert_ne!(colors[i], colors[j]);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn category_colors_fall_back_for_unknown_labels() {
        let colors = CategoryColors::new(&["No", "Si"]);
        assert_ne!(colors.color_for("No"), colors.color_for("Si"));
        assert_eq!(colors.color_for("Ex"), UNDEFINED);
    }

    #[test]
    fn viridis_hits_its_end_stops() {
        let scale = ColorScale::Viridis;
        assert_eq!(scale.sample(-1.0, -1.0, 1.0), VIRIDIS[0]);
        assert_eq!(scale.sample(1.0, -1.0, 1.0), VIRIDIS[9]);
        assert_eq!(scale.sample(f64::NAN, -1.0, 1.0), UNDEFINED);
    }
}
