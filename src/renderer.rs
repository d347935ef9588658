use eframe::egui::{self, Color32, TextureHandle, TextureOptions};

use crate::document::Document;

const TEXTURE_NAME: &str = "sketch_canvas";

/// Keeps the document's surface mirrored in a GPU texture.
#[derive(Default)]
pub struct Renderer {
    texture: Option<TextureHandle>,
    /// Document revision the texture was last uploaded from.
    uploaded_revision: Option<u64>,
    uploaded_size: [usize; 2],
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("has_texture", &self.texture.is_some())
            .field("uploaded_revision", &self.uploaded_revision)
            .field("uploaded_size", &self.uploaded_size)
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the next [`Renderer::render`] will re-upload pixels.
    pub fn needs_upload(&self, document: &Document) -> bool {
        self.texture.is_none()
            || self.uploaded_revision != Some(document.revision())
            || self.uploaded_size != document.surface().size()
    }

    fn sync_texture(&mut self, ctx: &egui::Context, document: &Document) {
        if !self.needs_upload(document) {
            return;
        }
        let image = document.surface().to_color_image();
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => self.texture = Some(ctx.load_texture(TEXTURE_NAME, image, TextureOptions::NEAREST)),
        }
        self.uploaded_revision = Some(document.revision());
        self.uploaded_size = document.surface().size();
        log::trace!("uploaded canvas texture at revision {}", document.revision());
    }

    /// Paint the canvas background and the surface into `rect`.
    pub fn render(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: egui::Rect, document: &Document) {
        painter.rect_filled(rect, 0.0, Color32::WHITE);
        self.sync_texture(ctx, document);

        if let Some(texture) = &self.texture {
            let [width, height] = document.surface().size();
            let image_rect = egui::Rect::from_min_size(rect.min, egui::vec2(width as f32, height as f32));
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture.id(), image_rect, uv, Color32::WHITE);
        }
    }
}
