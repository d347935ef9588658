use egui::Color32;

use crate::command::Command;
use crate::config::PaintConfig;
use crate::document::Document;
use crate::input::{self, InputHandler};
use crate::panels;
use crate::renderer::Renderer;

pub struct PaintApp {
    document: Document,
    renderer: Renderer,
    input_handler: InputHandler,
    swatches: Vec<Color32>,
    /// Command waiting for the user to confirm it in the modal.
    pending_confirmation: Option<Command>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: &PaintConfig) -> Self {
        let (document, swatches) = match (Document::new(config), config.swatch_colors()) {
            (Ok(document), Ok(swatches)) => (document, swatches),
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("invalid configuration ({e}), using defaults");
                let fallback = PaintConfig::default();
                (
                    Document::default(),
                    fallback.swatch_colors().unwrap_or_default(),
                )
            }
        };

        Self {
            document,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            swatches,
            pending_confirmation: None,
        }
    }

    /// Run a command, or park it behind the confirmation modal if it needs one.
    pub fn execute_command(&mut self, command: Command) {
        if command.needs_confirmation() {
            self.pending_confirmation = Some(command);
        } else {
            command.execute(&mut self.document);
        }
    }

    fn confirmation_modal(&mut self, ctx: &egui::Context) {
        let Some(command) = self.pending_confirmation.clone() else {
            return;
        };

        let mut decided = None;
        egui::Window::new("Disable drawing?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("Drawing will be turned off and the canvas cleared.");
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        decided = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        decided = Some(false);
                    }
                });
            });

        match decided {
            Some(true) => {
                command.execute(&mut self.document);
                self.pending_confirmation = None;
            }
            Some(false) => self.pending_confirmation = None,
            None => {}
        }
    }
}

impl eframe::App for PaintApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let modal_open = self.pending_confirmation.is_some();

        let mut commands = panels::tools_panel(ctx, &self.document, &self.swatches);
        commands.extend(input::shortcut_commands(ctx));
        if !modal_open {
            for command in commands {
                self.execute_command(command);
            }
        }

        panels::central_panel(
            ctx,
            &mut self.document,
            &mut self.renderer,
            &mut self.input_handler,
            !modal_open,
        );

        self.confirmation_modal(ctx);
    }
}
