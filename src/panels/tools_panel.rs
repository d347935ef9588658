use egui::{Color32, Ui};

use crate::brush::{BrushSize, BrushStyle, DrawMode, SoftBrush, Tool};
use crate::color::{self, BrushColor};
use crate::command::Command;
use crate::document::Document;

const SWATCH_SIZE: f32 = 22.0;

/// Side panel with color, size and tool pickers. Returns the commands the
/// user triggered this frame.
pub fn tools_panel(ctx: &egui::Context, document: &Document, swatches: &[Color32]) -> Vec<Command> {
    let mut commands = Vec::new();

    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");
            tool_section(ui, document, &mut commands);
            ui.separator();
            color_section(ui, document, swatches, &mut commands);
            ui.separator();
            size_section(ui, document, &mut commands);
            ui.separator();
            action_section(ui, document, &mut commands);
        });

    commands
}

fn tool_section(ui: &mut Ui, document: &Document, commands: &mut Vec<Command>) {
    let settings = document.settings();
    ui.horizontal(|ui| {
        for tool in [Tool::Brush, Tool::Eraser] {
            if ui.selectable_label(settings.tool == tool, tool.label()).clicked() {
                commands.push(Command::SelectTool(tool));
            }
        }
    });

    ui.horizontal(|ui| {
        ui.label("Style:");
        if ui.selectable_label(settings.style == BrushStyle::Solid, "Solid").clicked() {
            commands.push(Command::SelectStyle(BrushStyle::Solid));
        }
        let soft_label = match settings.soft_brush {
            SoftBrush::Airbrush => "Airbrush",
            SoftBrush::Simple => "Soft",
        };
        if ui.selectable_label(settings.style == BrushStyle::Soft, soft_label).clicked() {
            commands.push(Command::SelectStyle(BrushStyle::Soft));
        }
    });

    ui.horizontal(|ui| {
        ui.label("Mode:");
        let mode = document.draw_mode();
        if ui.selectable_label(mode == DrawMode::Drag, "Click").clicked() {
            commands.push(Command::SelectDrawMode(DrawMode::Drag));
        }
        if ui.selectable_label(mode == DrawMode::Hover, "Hover").clicked() {
            commands.push(Command::SelectDrawMode(DrawMode::Hover));
        }
    });
}

fn color_section(ui: &mut Ui, document: &Document, swatches: &[Color32], commands: &mut Vec<Command>) {
    let current = document.settings().color;
    ui.label("Color");
    ui.horizontal_wrapped(|ui| {
        for &swatch in swatches {
            let selected = current == BrushColor::Solid(swatch);
            let button = egui::Button::new("")
                .fill(swatch)
                .min_size(egui::vec2(SWATCH_SIZE, SWATCH_SIZE))
                .selected(selected);
            if ui.add(button).on_hover_text(color::to_hex(swatch)).clicked() {
                commands.push(Command::SelectColor(BrushColor::Solid(swatch)));
            }
        }
        if ui.selectable_label(current.is_rainbow(), "🌈").on_hover_text("Rainbow").clicked() {
            commands.push(Command::SelectColor(BrushColor::Rainbow));
        }
    });
}

fn size_section(ui: &mut Ui, document: &Document, commands: &mut Vec<Command>) {
    let current = document.settings().size;
    ui.label("Size");
    ui.horizontal_wrapped(|ui| {
        for size in BrushSize::all() {
            if ui.selectable_label(size == current, size.px().to_string()).clicked() {
                commands.push(Command::SelectSize(size));
            }
        }
    });
}

fn action_section(ui: &mut Ui, document: &Document, commands: &mut Vec<Command>) {
    ui.horizontal(|ui| {
        if ui.add_enabled(document.history().can_undo(), egui::Button::new("Undo")).clicked() {
            commands.push(Command::Undo);
        }
        if ui.button("Clear").clicked() {
            commands.push(Command::Clear);
        }
    });

    let enabled = document.drawing_enabled();
    let label = if enabled { "Disable drawing" } else { "Enable drawing" };
    if ui.button(label).clicked() {
        commands.push(Command::SetDrawingEnabled(!enabled));
    }

    let history = document.history();
    ui.label(format!(
        "History: {} / {}",
        history.index().map_or(0, |i| i + 1),
        history.limit()
    ));
}
