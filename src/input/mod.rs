use egui::{Context, Key, Pos2, Rect};

use crate::command::Command;

mod router;
pub use router::{route_event, to_canvas_coords};

/// Which part of the window an input event occurred in
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelKind {
    /// The drawing canvas
    Canvas,
    /// Anywhere else (tools panel, window chrome)
    Outside,
}

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position in screen coordinates
    pub position: Pos2,
    /// The panel in which the event occurred
    pub panel: PanelKind,
}

/// Pointer events the canvas cares about
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button was pressed
    PointerDown { location: InputLocation },
    /// Primary button was released
    PointerUp { location: InputLocation },
    /// Pointer moved
    PointerMove { location: InputLocation },
    /// Pointer left the canvas or the window
    PointerLeave { last_known_location: InputLocation },
}

/// Converts raw egui input into [`InputEvent`]s
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Option<Rect>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the on-screen canvas rectangle
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = Some(rect);
    }

    fn determine_panel(&self, pos: Pos2) -> PanelKind {
        match self.canvas_rect {
            Some(rect) if rect.contains(pos) => PanelKind::Canvas,
            _ => PanelKind::Outside,
        }
    }

    fn make_location(&self, pos: Pos2) -> InputLocation {
        InputLocation {
            position: pos,
            panel: self.determine_panel(pos),
        }
    }

    /// Feed one frame of pointer state, in the order moves, presses, releases.
    pub fn process_pointer(
        &mut self,
        hover_pos: Option<Pos2>,
        primary_pressed: bool,
        primary_released: bool,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let previous = self.last_pointer_pos.map(|pos| self.make_location(pos));

        match hover_pos {
            Some(pos) => {
                let location = self.make_location(pos);
                if let Some(previous) = previous {
                    if previous.panel == PanelKind::Canvas && location.panel != PanelKind::Canvas {
                        events.push(InputEvent::PointerLeave { last_known_location: previous });
                    }
                }
                if Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove { location });
                }
                self.last_pointer_pos = Some(pos);
            }
            None => {
                if let Some(previous) = previous {
                    events.push(InputEvent::PointerLeave { last_known_location: previous });
                }
                self.last_pointer_pos = None;
            }
        }

        let press_pos = hover_pos.or(self.last_pointer_pos);
        if let Some(pos) = press_pos {
            if primary_pressed {
                events.push(InputEvent::PointerDown { location: self.make_location(pos) });
            }
            if primary_released {
                events.push(InputEvent::PointerUp { location: self.make_location(pos) });
            }
        }

        events
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let (hover_pos, pressed, released) = ctx.input(|input| {
            (
                input.pointer.hover_pos(),
                input.pointer.primary_pressed(),
                input.pointer.primary_released(),
            )
        });
        self.process_pointer(hover_pos, pressed, released)
    }
}

/// Keyboard shortcuts: Ctrl/Cmd+Z undoes, `[` and `]` step the brush size.
pub fn shortcut_commands(ctx: &Context) -> Vec<Command> {
    ctx.input(|input| {
        let mut commands = Vec::new();
        if input.modifiers.command && input.key_pressed(Key::Z) {
            commands.push(Command::Undo);
        }
        if input.key_pressed(Key::OpenBracket) {
            commands.push(Command::DecreaseSize);
        }
        if input.key_pressed(Key::CloseBracket) {
            commands.push(Command::IncreaseSize);
        }
        commands
    })
}
