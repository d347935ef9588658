use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::brush::{BrushSettings, BrushSize, BrushStyle, DrawMode, SoftBrush, Tool};
use crate::color::{self, BrushColor, RainbowMode, RAINBOW_PALETTE, SWATCHES};
use crate::error::{PaintError, PaintResult};
use crate::history::DEFAULT_HISTORY_LIMIT;

/// Environment variable holding an inline JSON config.
pub const CONFIG_ENV_VAR: &str = "SKETCH_CONFIG";

/// Startup settings. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to the defaults below
pub struct PaintConfig {
    /// `#RRGGBB` or `rainbow`
    pub color: String,
    pub size: u32,
    pub tool: Tool,
    pub style: BrushStyle,
    pub soft_brush: SoftBrush,
    pub rainbow_mode: RainbowMode,
    pub draw_mode: DrawMode,
    pub history_limit: usize,
    pub rainbow_palette: Vec<String>,
    pub swatches: Vec<String>,
    pub canvas_size: [usize; 2],
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            color: "#000000".to_owned(),
            size: 5,
            tool: Tool::Brush,
            style: BrushStyle::Solid,
            soft_brush: SoftBrush::Airbrush,
            rainbow_mode: RainbowMode::Vivid,
            draw_mode: DrawMode::Drag,
            history_limit: DEFAULT_HISTORY_LIMIT,
            rainbow_palette: RAINBOW_PALETTE.iter().map(|s| s.to_string()).collect(),
            swatches: SWATCHES.iter().map(|s| s.to_string()).collect(),
            canvas_size: [800, 600],
        }
    }
}

impl PaintConfig {
    pub fn from_json(json: &str) -> PaintResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read [`CONFIG_ENV_VAR`], or defaults when it is unset.
    pub fn from_env() -> PaintResult<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(json) => Self::from_json(&json),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> PaintResult<()> {
        if self.history_limit == 0 {
            return Err(PaintError::InvalidHistoryLimit);
        }
        self.brush_settings()?;
        self.rainbow_palette()?;
        self.swatch_colors()?;
        Ok(())
    }

    pub fn brush_settings(&self) -> PaintResult<BrushSettings> {
        Ok(BrushSettings {
            color: BrushColor::parse(&self.color)?,
            size: BrushSize::from_px(self.size)?,
            tool: self.tool,
            style: self.style,
            soft_brush: self.soft_brush,
            rainbow_mode: self.rainbow_mode,
        })
    }

    pub fn rainbow_palette(&self) -> PaintResult<Vec<Color32>> {
        color::parse_palette("rainbow", &self.rainbow_palette)
    }

    pub fn swatch_colors(&self) -> PaintResult<Vec<Color32>> {
        color::parse_palette("swatch", &self.swatches)
    }
}
