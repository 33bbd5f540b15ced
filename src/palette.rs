//! Token Palette
//!
//! Assigns each distinct token text a visually distinct color. Hues are
//! stepped by the golden ratio conjugate in HSV space, which spreads
//! consecutive colors evenly around the color wheel. Colors are cached for
//! the lifetime of the palette so a repeated token always renders the same.

use crate::model::Rgb;
use std::collections::HashMap;

/// Golden ratio conjugate, `1 / phi`
pub const GOLDEN_RATIO_CONJUGATE: f64 = 0.618033988749895;

/// Default HSV saturation for generated colors
pub const DEFAULT_SATURATION: f64 = 0.60;

/// Default HSV value (brightness) for generated colors
pub const DEFAULT_VALUE: f64 = 0.75;

/// Convert an HSV color to RGB.
///
/// All components are in `[0, 1]`; `h` wraps around.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);

    let i = (h * 6.0).floor();
    let f = h * 6.0 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match (i as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb::new(to_channel(r), to_channel(g), to_channel(b))
}

fn to_channel(x: f64) -> u8 {
    (x * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Infinite sequence of hues spaced by the golden ratio conjugate
#[derive(Debug, Clone)]
pub struct GoldenRatioHues {
    hue: f64,
}

impl GoldenRatioHues {
    /// Start from `seed`; the first hue produced is `seed + 1/phi`
    pub fn new(seed: f64) -> Self {
        Self {
            hue: seed.rem_euclid(1.0),
        }
    }
}

impl Iterator for GoldenRatioHues {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.hue = (self.hue + GOLDEN_RATIO_CONJUGATE) % 1.0;
        Some(self.hue)
    }
}

/// Session-local mapping from token text to color
#[derive(Debug, Clone)]
pub struct TokenPalette {
    colors: HashMap<String, Rgb>,
    hues: GoldenRatioHues,
    saturation: f64,
    value: f64,
}

impl TokenPalette {
    /// Create a palette seeded from the clock
    pub fn new() -> Self {
        Self::with_seed(clock_seed())
    }

    /// Create a palette with a fixed starting hue (reproducible colors)
    pub fn with_seed(seed: f64) -> Self {
        Self {
            colors: HashMap::new(),
            hues: GoldenRatioHues::new(seed),
            saturation: DEFAULT_SATURATION,
            value: DEFAULT_VALUE,
        }
    }

    /// Override saturation and value of generated colors
    pub fn saturation_value(mut self, saturation: f64, value: f64) -> Self {
        self.saturation = saturation;
        self.value = value;
        self
    }

    /// Color for a token text, assigning a new one on first sight
    pub fn color_for(&mut self, text: &str) -> Rgb {
        if let Some(color) = self.colors.get(text) {
            return *color;
        }

        let hue = self.hues.next().unwrap_or_default();
        let color = hsv_to_rgb(hue, self.saturation, self.value);
        tracing::trace!(text = %text, color = %color, "assigned token color");
        self.colors.insert(text.to_string(), color);
        color
    }

    /// Color already assigned to a text, without assigning
    pub fn get(&self, text: &str) -> Option<Rgb> {
        self.colors.get(text).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Forget all assignments
    pub fn clear(&mut self) {
        self.colors.clear();
    }
}

impl Default for TokenPalette {
    fn default() -> Self {
        Self::new()
    }
}

/// Pseudo-random seed in `[0, 1)` from the sub-second clock
fn clock_seed() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    nanos as f64 / 1_000_000_000.0
}
