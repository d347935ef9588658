use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::{PaintError, PaintResult};
use crate::random::RandomSource;

/// Swatches offered in the tools panel.
pub const SWATCHES: [&str; 12] = [
    "#000000", "#FF0000", "#00FF00", "#0000FF",
    "#FFFF00", "#FF00FF", "#00FFFF", "#FFA500",
    "#800080", "#008000", "#FFC0CB", "#A52A2A",
];

/// Pastel palette the rainbow brush drifts through.
pub const RAINBOW_PALETTE: [&str; 7] = [
    "#FFB3BA", "#FFDFBA", "#FFFFBA", "#BAFFC9",
    "#BAE1FF", "#D5BAFF", "#FFBAF2",
];

/// Keyword accepted wherever a brush color is parsed.
pub const RAINBOW_KEYWORD: &str = "rainbow";

/// Parse `#RRGGBB` into an opaque color.
pub fn parse_hex(hex: &str) -> PaintResult<Color32> {
    let digits = hex
        .strip_prefix('#')
        .filter(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
        .ok_or_else(|| PaintError::InvalidColor(hex.to_string()))?;

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| PaintError::InvalidColor(hex.to_string()))
    };
    Ok(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Format the RGB channels as `#RRGGBB`.
pub fn to_hex(color: Color32) -> String {
    format!("#{:02X}{:02X}{:02X}", color.r(), color.g(), color.b())
}

pub fn parse_palette(name: &'static str, entries: &[String]) -> PaintResult<Vec<Color32>> {
    if entries.is_empty() {
        return Err(PaintError::EmptyPalette(name));
    }
    entries.iter().map(|hex| parse_hex(hex)).collect()
}

/// Linear mix of two colors, `round(a + (b - a) * factor)` per channel.
pub fn mix_colors(a: Color32, b: Color32, factor: f32) -> Color32 {
    let mix = |from: u8, to: u8| {
        let from = from as f32;
        (from + (to as f32 - from) * factor).round().clamp(0.0, 255.0) as u8
    };
    Color32::from_rgb(mix(a.r(), b.r()), mix(a.g(), b.g()), mix(a.b(), b.b()))
}

/// Scale every channel by `factor`, saturating at 255.
pub fn scale_brightness(color: Color32, factor: f32) -> Color32 {
    let scale = |c: u8| (c as f32 * factor).round().clamp(0.0, 255.0) as u8;
    Color32::from_rgb(scale(color.r()), scale(color.g()), scale(color.b()))
}

/// The color a brush paints with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrushColor {
    Solid(Color32),
    Rainbow,
}

impl BrushColor {
    /// Accepts `#RRGGBB` or the `rainbow` keyword.
    pub fn parse(value: &str) -> PaintResult<Self> {
        if value.eq_ignore_ascii_case(RAINBOW_KEYWORD) {
            Ok(Self::Rainbow)
        } else {
            parse_hex(value).map(Self::Solid)
        }
    }

    pub fn is_rainbow(&self) -> bool {
        matches!(self, Self::Rainbow)
    }
}

impl Default for BrushColor {
    fn default() -> Self {
        Self::Solid(Color32::BLACK)
    }
}

impl std::fmt::Display for BrushColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Solid(color) => f.write_str(&to_hex(*color)),
            Self::Rainbow => f.write_str(RAINBOW_KEYWORD),
        }
    }
}

/// How aggressively the rainbow brush varies its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RainbowMode {
    /// Up to 30% towards the next entry, drifting on 5% of segments.
    Subtle,
    /// Up to 70% towards the next entry with brightness jitter, drifting on 30% of segments.
    #[default]
    Vivid,
}

impl RainbowMode {
    pub fn max_mix(self) -> f32 {
        match self {
            Self::Subtle => 0.3,
            Self::Vivid => 0.7,
        }
    }

    pub fn advance_probability(self) -> f32 {
        match self {
            Self::Subtle => 0.05,
            Self::Vivid => 0.3,
        }
    }

    /// Brightness multiplier range, if any.
    pub fn brightness_jitter(self) -> Option<(f32, f32)> {
        match self {
            Self::Subtle => None,
            Self::Vivid => Some((0.8, 1.2)),
        }
    }
}

/// Position of the rainbow brush within its palette.
#[derive(Debug, Clone)]
pub struct RainbowCursor {
    palette: Vec<Color32>,
    index: usize,
}

impl RainbowCursor {
    pub fn new(palette: Vec<Color32>) -> PaintResult<Self> {
        if palette.is_empty() {
            return Err(PaintError::EmptyPalette("rainbow"));
        }
        Ok(Self { palette, index: 0 })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn palette(&self) -> &[Color32] {
        &self.palette
    }

    /// The two palette entries the next resolved color is mixed from.
    pub fn current_pair(&self) -> (Color32, Color32) {
        let len = self.palette.len();
        (self.palette[self.index % len], self.palette[(self.index + 1) % len])
    }

    /// Mix the current and next entries with a random factor, then jitter
    /// brightness if the mode asks for it.
    pub fn resolve(&self, mode: RainbowMode, random: &mut dyn RandomSource) -> Color32 {
        let (current, next) = self.current_pair();
        let mixed = mix_colors(current, next, random.next_f32() * mode.max_mix());
        match mode.brightness_jitter() {
            Some((low, high)) => scale_brightness(mixed, low + random.next_f32() * (high - low)),
            None => mixed,
        }
    }

    /// Step to the next entry with the mode's probability. Returns whether it moved.
    pub fn maybe_advance(&mut self, mode: RainbowMode, random: &mut dyn RandomSource) -> bool {
        if random.next_f32() < mode.advance_probability() {
            self.index = (self.index + 1) % self.palette.len();
            true
        } else {
            false
        }
    }
}

impl Default for RainbowCursor {
    fn default() -> Self {
        let palette = RAINBOW_PALETTE
            .iter()
            .filter_map(|hex| parse_hex(hex).ok())
            .collect();
        Self { palette, index: 0 }
    }
}
