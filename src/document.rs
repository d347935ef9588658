use egui::Pos2;
use log::{debug, info};

use crate::brush::{BrushSettings, BrushSize, BrushStyle, DrawMode, Tool};
use crate::color::{BrushColor, RainbowCursor};
use crate::config::PaintConfig;
use crate::error::PaintResult;
use crate::history::SnapshotHistory;
use crate::random::{RandomSource, XorShift32};
use crate::stroke::StrokeRenderer;
use crate::surface::Surface;

/// The drawing and everything that edits it.
///
/// Owns the surface, its undo history and the brush; all pointer input is
/// expected in surface-local coordinates.
#[derive(Debug)]
pub struct Document {
    surface: Surface,
    history: SnapshotHistory,
    settings: BrushSettings,
    renderer: StrokeRenderer,
    draw_mode: DrawMode,
    drawing_enabled: bool,
    /// Hover mode snapshots once per session rather than per movement.
    hover_captured: bool,
    /// Bumped whenever pixels change.
    revision: u64,
}

impl Default for Document {
    fn default() -> Self {
        let [width, height] = PaintConfig::default().canvas_size;
        Self::with_parts(
            Surface::new(width, height),
            SnapshotHistory::default(),
            BrushSettings::default(),
            StrokeRenderer::default(),
            DrawMode::default(),
        )
    }
}

impl Document {
    pub fn new(config: &PaintConfig) -> PaintResult<Self> {
        Self::with_random(config, Box::new(XorShift32::from_time()))
    }

    /// Like [`Document::new`] but with a caller-supplied random source for the rainbow brush.
    pub fn with_random(config: &PaintConfig, random: Box<dyn RandomSource>) -> PaintResult<Self> {
        config.validate()?;
        let [width, height] = config.canvas_size;
        Ok(Self::with_parts(
            Surface::new(width, height),
            SnapshotHistory::new(config.history_limit),
            config.brush_settings()?,
            StrokeRenderer::new(RainbowCursor::new(config.rainbow_palette()?)?, random),
            config.draw_mode,
        ))
    }

    fn with_parts(
        surface: Surface,
        mut history: SnapshotHistory,
        settings: BrushSettings,
        renderer: StrokeRenderer,
        draw_mode: DrawMode,
    ) -> Self {
        history.capture(&surface);
        Self {
            surface,
            history,
            settings,
            renderer,
            draw_mode,
            drawing_enabled: true,
            hover_captured: false,
            revision: 0,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn settings(&self) -> &BrushSettings {
        &self.settings
    }

    pub fn renderer(&self) -> &StrokeRenderer {
        &self.renderer
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    pub fn drawing_enabled(&self) -> bool {
        self.drawing_enabled
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_stroking(&self) -> bool {
        self.renderer.is_stroking()
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Primary button pressed over the canvas.
    pub fn pointer_down(&mut self, pos: Pos2) {
        if !self.drawing_enabled || self.draw_mode != DrawMode::Drag {
            return;
        }
        self.renderer.begin_stroke(pos, &self.surface, &mut self.history);
    }

    /// Pointer moved over the canvas.
    pub fn pointer_move(&mut self, pos: Pos2) {
        if !self.drawing_enabled {
            return;
        }
        match self.draw_mode {
            DrawMode::Drag => {
                if self.renderer.is_stroking() {
                    self.renderer.extend_stroke(pos, &self.settings, &mut self.surface);
                    self.touch();
                }
            }
            DrawMode::Hover => {
                if !self.hover_captured {
                    self.history.capture(&self.surface);
                    self.hover_captured = true;
                }
                self.renderer.stamp(pos, &self.settings, &mut self.surface);
                self.touch();
            }
        }
    }

    pub fn pointer_up(&mut self) {
        self.renderer.end_stroke();
    }

    /// Leaving the canvas abandons the stroke in progress.
    pub fn pointer_leave(&mut self) {
        self.renderer.end_stroke();
    }

    /// Returns whether anything was restored.
    pub fn undo(&mut self) -> bool {
        self.renderer.end_stroke();
        let restored = self.history.undo(&mut self.surface);
        if restored {
            self.touch();
        }
        restored
    }

    /// Snapshot, then wipe the canvas.
    pub fn clear(&mut self) {
        self.renderer.end_stroke();
        self.history.capture(&self.surface);
        self.surface.clear();
        self.touch();
        info!("canvas cleared");
    }

    /// Disabling drawing clears the canvas (undoably); enabling it does not.
    pub fn set_drawing_enabled(&mut self, enabled: bool) {
        if self.drawing_enabled == enabled {
            return;
        }
        self.drawing_enabled = enabled;
        if !enabled {
            self.clear();
        }
        info!("drawing {}", if enabled { "enabled" } else { "disabled" });
    }

    /// Resizing to a new size discards the drawing and the undo history.
    /// Returns whether the size changed.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        if self.surface.size() == [width, height] {
            return false;
        }
        self.renderer.end_stroke();
        self.surface.resize(width, height);
        self.history.reset(&self.surface);
        self.hover_captured = false;
        self.touch();
        info!("canvas resized to {width}x{height}, history reset");
        true
    }

    pub fn select_color(&mut self, color: BrushColor) {
        debug!("color -> {color}");
        self.settings.color = color;
    }

    pub fn select_size(&mut self, size: BrushSize) {
        debug!("size -> {}px", size.px());
        self.settings.size = size;
    }

    pub fn increase_size(&mut self) {
        self.select_size(self.settings.size.larger());
    }

    pub fn decrease_size(&mut self) {
        self.select_size(self.settings.size.smaller());
    }

    pub fn select_tool(&mut self, tool: Tool) {
        debug!("tool -> {tool:?}");
        self.settings.tool = tool;
    }

    pub fn select_style(&mut self, style: BrushStyle) {
        debug!("style -> {style:?}");
        self.settings.style = style;
    }

    pub fn select_draw_mode(&mut self, mode: DrawMode) {
        debug!("draw mode -> {mode:?}");
        self.renderer.end_stroke();
        self.draw_mode = mode;
        self.hover_captured = false;
    }
}
