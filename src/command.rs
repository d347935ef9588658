use log::info;

use crate::brush::{BrushSize, BrushStyle, DrawMode, Tool};
use crate::color::BrushColor;
use crate::document::Document;

/// User actions coming from the panels and keyboard shortcuts.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SelectColor(BrushColor),
    SelectSize(BrushSize),
    IncreaseSize,
    DecreaseSize,
    SelectTool(Tool),
    SelectStyle(BrushStyle),
    SelectDrawMode(DrawMode),
    Undo,
    Clear,
    /// Disabling also clears the canvas.
    SetDrawingEnabled(bool),
}

impl Command {
    pub fn execute(&self, document: &mut Document) {
        info!("executing {:?}", self);
        match self {
            Command::SelectColor(color) => document.select_color(*color),
            Command::SelectSize(size) => document.select_size(*size),
            Command::IncreaseSize => document.increase_size(),
            Command::DecreaseSize => document.decrease_size(),
            Command::SelectTool(tool) => document.select_tool(*tool),
            Command::SelectStyle(style) => document.select_style(*style),
            Command::SelectDrawMode(mode) => document.select_draw_mode(*mode),
            Command::Undo => {
                if !document.undo() {
                    info!("nothing to undo");
                }
            }
            Command::Clear => document.clear(),
            Command::SetDrawingEnabled(enabled) => document.set_drawing_enabled(*enabled),
        }
    }

    /// Whether the UI should ask before running this.
    pub fn needs_confirmation(&self) -> bool {
        matches!(self, Command::SetDrawingEnabled(false))
    }
}
