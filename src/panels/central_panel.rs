use crate::document::Document;
use crate::input::{self, InputHandler};
use crate::renderer::Renderer;

/// Canvas filling the remaining space. The surface follows the panel size,
/// which wipes the drawing whenever the panel changes size.
pub fn central_panel(
    ctx: &egui::Context,
    document: &mut Document,
    renderer: &mut Renderer,
    input_handler: &mut InputHandler,
    accept_input: bool,
) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let available_size = ui.available_size();
            let (response, painter) = ui.allocate_painter(available_size, egui::Sense::hover());
            let rect = response.rect;

            document.resize(rect.width().floor().max(1.0) as usize, rect.height().floor().max(1.0) as usize);
            input_handler.set_canvas_rect(rect);

            let events = input_handler.process_input(ctx);
            if accept_input {
                for event in &events {
                    input::route_event(event, document, rect);
                }
            }

            renderer.render(ctx, &painter, rect, document);
        });
}
