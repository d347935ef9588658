#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod brush;
pub mod color;
pub mod command;
pub mod config;
pub mod document;
pub mod error;
pub mod history;
pub mod input;
pub mod panels;
pub mod random;
pub mod renderer;
pub mod stroke;
pub mod surface;
mod util;

pub use app::PaintApp;
pub use brush::{BrushSettings, BrushSize, BrushStyle, DrawMode, SoftBrush, Tool};
pub use color::{BrushColor, RainbowMode};
pub use command::Command;
pub use config::PaintConfig;
pub use document::Document;
pub use error::{PaintError, PaintResult};
pub use history::{Snapshot, SnapshotHistory};
pub use input::{InputEvent, InputLocation};
pub use renderer::Renderer;
pub use stroke::StrokeRenderer;
pub use surface::Surface;
