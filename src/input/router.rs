use egui::{Pos2, Rect};

use crate::document::Document;

use super::{InputEvent, PanelKind};

/// Screen position to surface-local position.
pub fn to_canvas_coords(screen: Pos2, canvas_rect: Rect) -> Pos2 {
    (screen - canvas_rect.min).to_pos2()
}

/// Routes input events to the document
pub fn route_event(event: &InputEvent, document: &mut Document, canvas_rect: Rect) {
    match event {
        InputEvent::PointerDown { location } => {
            if location.panel == PanelKind::Canvas {
                document.pointer_down(to_canvas_coords(location.position, canvas_rect));
            }
        }
        InputEvent::PointerMove { location } => {
            if location.panel == PanelKind::Canvas {
                document.pointer_move(to_canvas_coords(location.position, canvas_rect));
            }
        }
        InputEvent::PointerUp { .. } => document.pointer_up(),
        InputEvent::PointerLeave { .. } => document.pointer_leave(),
    }
}
