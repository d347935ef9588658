use serde::{Deserialize, Serialize};

use crate::color::{BrushColor, RainbowMode};
use crate::error::{PaintError, PaintResult};

/// Brush widths offered in the tools panel, in pixels.
pub const BRUSH_SIZES: [u32; 7] = [1, 3, 5, 8, 12, 16, 20];

/// One of [`BRUSH_SIZES`], stored as its index so it can never be anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BrushSize(usize);

impl BrushSize {
    pub fn from_px(px: u32) -> PaintResult<Self> {
        BRUSH_SIZES
            .iter()
            .position(|&size| size == px)
            .map(Self)
            .ok_or(PaintError::UnsupportedBrushSize(px))
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..BRUSH_SIZES.len()).map(Self)
    }

    pub fn px(self) -> u32 {
        BRUSH_SIZES[self.0]
    }

    pub fn as_f32(self) -> f32 {
        self.px() as f32
    }

    /// Next larger size, or the largest size unchanged.
    pub fn larger(self) -> Self {
        Self((self.0 + 1).min(BRUSH_SIZES.len() - 1))
    }

    /// Next smaller size, or the smallest size unchanged.
    pub fn smaller(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl Default for BrushSize {
    fn default() -> Self {
        Self(2) // 5px
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Brush,
    Eraser,
}

impl Tool {
    pub fn label(self) -> &'static str {
        match self {
            Self::Brush => "🖌 Brush",
            Self::Eraser => "⌫ Eraser",
        }
    }
}

/// How the brush tool lays down paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushStyle {
    /// Opaque round-capped line.
    #[default]
    Solid,
    /// Radial gradient dabs.
    Soft,
}

/// Layering profile of the soft brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoftBrush {
    /// Five stacked translucent layers.
    #[default]
    Airbrush,
    /// A single dab, solid to half its radius.
    Simple,
}

/// One concentric layer of a soft dab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DabLayer {
    /// Fraction of the brush size used as this layer's radius.
    pub radius_fraction: f32,
    /// Peak opacity of the layer.
    pub opacity: f32,
}

impl SoftBrush {
    pub fn layer_count(self) -> usize {
        match self {
            Self::Airbrush => 5,
            Self::Simple => 1,
        }
    }

    /// Layers innermost first; layer `i` has radius `size * (i + 1) / n`.
    pub fn layers(self) -> Vec<DabLayer> {
        let n = self.layer_count();
        (0..n)
            .map(|i| DabLayer {
                radius_fraction: (i + 1) as f32 / n as f32,
                opacity: match self {
                    Self::Airbrush => 0.4 - 0.08 * i as f32,
                    Self::Simple => 1.0,
                },
            })
            .collect()
    }

    /// Gradient stops as `(offset, alpha)` from center to edge.
    pub fn gradient_stops(self) -> &'static [(f32, f32)] {
        match self {
            Self::Airbrush => &[(0.0, 1.0), (0.2, 0.8), (0.5, 0.5), (0.8, 0.2), (1.0, 0.0)],
            Self::Simple => &[(0.0, 1.0), (0.5, 1.0), (0.8, 0.3), (1.0, 0.0)],
        }
    }
}

/// Whether paint follows a held button or the bare pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    #[default]
    Drag,
    Hover,
}

/// Everything the stroke renderer needs to know about the active brush.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BrushSettings {
    pub color: BrushColor,
    pub size: BrushSize,
    pub tool: Tool,
    pub style: BrushStyle,
    pub soft_brush: SoftBrush,
    pub rainbow_mode: RainbowMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_lookup() {
        assert_eq!(BrushSize::from_px(12).unwrap().px(), 12);
        assert!(matches!(BrushSize::from_px(7), Err(PaintError::UnsupportedBrushSize(7))));
        assert_eq!(BrushSize::default().px(), 5);
        assert_eq!(BrushSize::all().count(), BRUSH_SIZES.len());
    }

    #[test]
    fn test_size_stepping_clamps() {
        let smallest = BrushSize::from_px(1).unwrap();
        let largest = BrushSize::from_px(20).unwrap();
        assert_eq!(smallest.smaller(), smallest);
        assert_eq!(largest.larger(), largest);
        assert_eq!(smallest.larger().px(), 3);
        assert_eq!(largest.smaller().px(), 16);
    }

    #[test]
    fn test_airbrush_layers() {
        let layers = SoftBrush::Airbrush.layers();
        assert_eq!(layers.len(), 5);
        assert!((layers[0].radius_fraction - 0.2).abs() < 1e-6);
        assert!((layers[4].radius_fraction - 1.0).abs() < 1e-6);
        assert!((layers[0].opacity - 0.4).abs() < 1e-6);
        assert!((layers[4].opacity - 0.08).abs() < 1e-6);
    }

    #[test]
    fn test_simple_brush_is_one_full_layer() {
        let layers = SoftBrush::Simple.layers();
        assert_eq!(layers, vec![DabLayer { radius_fraction: 1.0, opacity: 1.0 }]);
        assert_eq!(SoftBrush::Simple.gradient_stops().last(), Some(&(1.0, 0.0)));
    }
}
