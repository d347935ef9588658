use egui::{Color32, Pos2};
use log::debug;

use crate::brush::{BrushSettings, BrushStyle, Tool};
use crate::color::{BrushColor, RainbowCursor};
use crate::history::SnapshotHistory;
use crate::random::{RandomSource, XorShift32};
use crate::surface::{Paint, Surface};

/// Compositing mode of the segment being drawn. Source-over segments lay
/// down the resolved brush color, destination-out segments remove alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    #[default]
    SourceOver,
    DestinationOut,
}

impl CompositeMode {
    pub fn for_tool(tool: Tool) -> Self {
        match tool {
            Tool::Brush => Self::SourceOver,
            Tool::Eraser => Self::DestinationOut,
        }
    }
}

/// Turns pointer positions into pixels.
pub struct StrokeRenderer {
    last_point: Option<Pos2>,
    /// Set by `begin_stroke`, cleared once the first segment is drawn.
    at_stroke_start: bool,
    composite: CompositeMode,
    rainbow: RainbowCursor,
    random: Box<dyn RandomSource>,
}

impl std::fmt::Debug for StrokeRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrokeRenderer")
            .field("last_point", &self.last_point)
            .field("composite", &self.composite)
            .field("rainbow", &self.rainbow)
            .finish_non_exhaustive()
    }
}

impl Default for StrokeRenderer {
    fn default() -> Self {
        Self::new(RainbowCursor::default(), Box::new(XorShift32::from_time()))
    }
}

impl StrokeRenderer {
    pub fn new(rainbow: RainbowCursor, random: Box<dyn RandomSource>) -> Self {
        Self {
            last_point: None,
            at_stroke_start: false,
            composite: CompositeMode::SourceOver,
            rainbow,
            random,
        }
    }

    pub fn last_point(&self) -> Option<Pos2> {
        self.last_point
    }

    pub fn is_stroking(&self) -> bool {
        self.last_point.is_some()
    }

    pub fn composite_mode(&self) -> CompositeMode {
        self.composite
    }

    pub fn rainbow(&self) -> &RainbowCursor {
        &self.rainbow
    }

    /// Snapshot the surface, then anchor the stroke at `point`.
    pub fn begin_stroke(&mut self, point: Pos2, surface: &Surface, history: &mut SnapshotHistory) {
        history.capture(surface);
        self.last_point = Some(point);
        self.at_stroke_start = true;
        debug!("stroke: begin at ({:.1}, {:.1})", point.x, point.y);
    }

    /// Draw from the last point to `point` with the active tool.
    ///
    /// The eraser clears a line twice the brush size wide, the solid brush
    /// draws one brush size wide. Soft dabs land on each new point, plus the
    /// press point on the first segment of a stroke.
    pub fn extend_stroke(&mut self, point: Pos2, settings: &BrushSettings, surface: &mut Surface) {
        let from = self.last_point.unwrap_or(point);
        let first_segment = std::mem::take(&mut self.at_stroke_start);
        let size = settings.size.as_f32();

        self.composite = CompositeMode::for_tool(settings.tool);
        match self.composite {
            CompositeMode::DestinationOut => {
                surface.stroke_segment(from, point, size * 2.0, Paint::Erase);
            }
            CompositeMode::SourceOver => {
                let color = self.resolve_color(settings);
                match settings.style {
                    BrushStyle::Solid => surface.stroke_segment(from, point, size, Paint::Over(color)),
                    BrushStyle::Soft => {
                        if first_segment && from != point {
                            soft_dab(surface, from, size, color, settings);
                        }
                        soft_dab(surface, point, size, color, settings);
                    }
                }
                self.advance_rainbow(settings);
            }
        }

        self.last_point = Some(point);
    }

    /// Drop per-stroke state; the composite mode returns to source-over.
    pub fn end_stroke(&mut self) {
        if self.last_point.take().is_some() {
            debug!("stroke: end");
        }
        self.at_stroke_start = false;
        self.composite = CompositeMode::SourceOver;
    }

    /// Paint a single mark at `point` without a stroke: the eraser clears a
    /// disc of radius size/2, the brush lays a soft dab of radius size.
    pub fn stamp(&mut self, point: Pos2, settings: &BrushSettings, surface: &mut Surface) {
        let size = settings.size.as_f32();
        self.composite = CompositeMode::for_tool(settings.tool);
        match self.composite {
            CompositeMode::DestinationOut => {
                surface.fill_disc(point, size / 2.0, Paint::Erase);
            }
            CompositeMode::SourceOver => {
                let color = self.resolve_color(settings);
                soft_dab(surface, point, size, color, settings);
                self.advance_rainbow(settings);
            }
        }
    }

    /// The concrete color the next segment will use.
    pub fn resolve_color(&mut self, settings: &BrushSettings) -> Color32 {
        match settings.color {
            BrushColor::Solid(color) => color,
            BrushColor::Rainbow => self.rainbow.resolve(settings.rainbow_mode, self.random.as_mut()),
        }
    }

    fn advance_rainbow(&mut self, settings: &BrushSettings) {
        if settings.color.is_rainbow()
            && self.rainbow.maybe_advance(settings.rainbow_mode, self.random.as_mut())
        {
            debug!("stroke: rainbow drifted to palette entry {}", self.rainbow.index());
        }
    }
}

fn soft_dab(surface: &mut Surface, center: Pos2, size: f32, color: Color32, settings: &BrushSettings) {
    let stops = settings.soft_brush.gradient_stops();
    for layer in settings.soft_brush.layers() {
        surface.radial_dab(center, size * layer.radius_fraction, color, stops, layer.opacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::{BrushSize, SoftBrush};
    use crate::color::RainbowMode;
    use crate::random::ScriptedRandom;

    fn renderer(values: Vec<f32>) -> StrokeRenderer {
        StrokeRenderer::new(RainbowCursor::default(), Box::new(ScriptedRandom::new(values)))
    }

    fn settings(tool: Tool) -> BrushSettings {
        BrushSettings {
            color: BrushColor::Solid(Color32::RED),
            size: BrushSize::from_px(5).unwrap(),
            tool,
            ..Default::default()
        }
    }

    #[test]
    fn test_begin_stroke_captures_snapshot() {
        let mut renderer = renderer(vec![0.5]);
        let surface = Surface::new(10, 10);
        let mut history = SnapshotHistory::default();
        renderer.begin_stroke(Pos2::new(1.0, 1.0), &surface, &mut history);
        assert_eq!(history.len(), 1);
        assert_eq!(renderer.last_point(), Some(Pos2::new(1.0, 1.0)));
    }

    #[test]
    fn test_stroke_starting_at_origin_draws_from_origin() {
        let mut renderer = renderer(vec![0.5]);
        let mut surface = Surface::new(30, 30);
        let mut history = SnapshotHistory::default();
        renderer.begin_stroke(Pos2::ZERO, &surface, &mut history);
        renderer.extend_stroke(Pos2::new(20.0, 20.0), &settings(Tool::Brush), &mut surface);
        // the diagonal between the two points is painted, not just the end
        assert_eq!(surface.pixel(10, 10).unwrap()[3], 255);
        assert_eq!(surface.pixel(1, 1).unwrap()[3], 255);
    }

    #[test]
    fn test_extend_without_previous_point_draws_dot() {
        let mut renderer = renderer(vec![0.5]);
        let mut surface = Surface::new(20, 20);
        renderer.extend_stroke(Pos2::new(10.5, 10.5), &settings(Tool::Brush), &mut surface);
        assert_eq!(surface.pixel(10, 10), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_eraser_switches_composite_and_end_resets() {
        let mut renderer = renderer(vec![0.5]);
        let mut surface = Surface::new(20, 20);
        renderer.extend_stroke(Pos2::new(5.0, 5.0), &settings(Tool::Eraser), &mut surface);
        assert_eq!(renderer.composite_mode(), CompositeMode::DestinationOut);
        renderer.end_stroke();
        assert_eq!(renderer.composite_mode(), CompositeMode::SourceOver);
        assert!(!renderer.is_stroking());
    }

    #[test]
    fn test_composite_mode_follows_tool_within_stroke() {
        let mut renderer = renderer(vec![0.5]);
        let mut surface = Surface::new(30, 30);
        let mut history = SnapshotHistory::default();
        renderer.begin_stroke(Pos2::new(5.5, 15.5), &surface, &mut history);
        renderer.extend_stroke(Pos2::new(25.5, 15.5), &settings(Tool::Brush), &mut surface);
        assert_eq!(renderer.composite_mode(), CompositeMode::SourceOver);
        assert_eq!(surface.pixel(15, 15), Some([255, 0, 0, 255]));

        // switching tools mid-stroke erases back along the same line
        renderer.extend_stroke(Pos2::new(5.5, 15.5), &settings(Tool::Eraser), &mut surface);
        assert_eq!(renderer.composite_mode(), CompositeMode::DestinationOut);
        assert_eq!(surface.pixel(15, 15), Some([0, 0, 0, 0]));

        renderer.extend_stroke(Pos2::new(5.5, 25.5), &settings(Tool::Brush), &mut surface);
        assert_eq!(renderer.composite_mode(), CompositeMode::SourceOver);
        assert_eq!(surface.pixel(5, 20), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_soft_stroke_dabs_press_point_once() {
        let mut renderer = renderer(vec![0.5]);
        let mut surface = Surface::new(40, 40);
        let mut history = SnapshotHistory::default();
        let mut soft = settings(Tool::Brush);
        soft.style = BrushStyle::Soft;
        soft.soft_brush = SoftBrush::Simple;

        renderer.begin_stroke(Pos2::new(5.5, 20.5), &surface, &mut history);
        renderer.extend_stroke(Pos2::new(20.5, 20.5), &soft, &mut surface);
        assert_eq!(surface.pixel(5, 20), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(20, 20), Some([255, 0, 0, 255]));
        // dabs are not interpolated between points
        assert_eq!(surface.pixel(13, 20), Some([0, 0, 0, 0]));

        surface.clear();
        renderer.extend_stroke(Pos2::new(34.5, 20.5), &soft, &mut surface);
        assert_eq!(surface.pixel(20, 20), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(34, 20), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_soft_brush_center_denser_than_rim() {
        let mut renderer = renderer(vec![0.5]);
        let mut surface = Surface::new(41, 41);
        let mut soft = settings(Tool::Brush);
        soft.style = BrushStyle::Soft;
        soft.size = BrushSize::from_px(20).unwrap();
        renderer.extend_stroke(Pos2::new(20.5, 20.5), &soft, &mut surface);

        let center = surface.pixel(20, 20).unwrap()[3];
        let rim = surface.pixel(36, 20).unwrap()[3];
        assert!(center > rim, "center {center} rim {rim}");
        assert!(center < 255);
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_stamp_eraser_clears_half_size_disc() {
        let mut renderer = renderer(vec![0.5]);
        let mut surface = Surface::new(20, 20);
        surface.fill_disc(Pos2::new(10.0, 10.0), 10.0, Paint::Over(Color32::BLUE));
        let mut eraser = settings(Tool::Eraser);
        eraser.size = BrushSize::from_px(8).unwrap();
        renderer.stamp(Pos2::new(10.0, 10.0), &eraser, &mut surface);
        assert_eq!(surface.pixel(10, 10), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(16, 10).unwrap()[3], 255);
    }

    #[test]
    fn test_rainbow_follows_random_sequence() {
        // subtle mode draws one mix factor per resolve and one value per advance check
        let mut renderer = renderer(vec![0.0, 0.5, 0.9, 0.01, 0.0]);
        let mut surface = Surface::new(10, 10);
        let mut rainbow = settings(Tool::Brush);
        rainbow.color = BrushColor::Rainbow;
        rainbow.rainbow_mode = RainbowMode::Subtle;

        let first = renderer.rainbow().current_pair().0;
        assert_eq!(renderer.resolve_color(&rainbow), first);
        renderer.extend_stroke(Pos2::new(2.0, 2.0), &rainbow, &mut surface);
        assert_eq!(renderer.rainbow().index(), 0);
        renderer.extend_stroke(Pos2::new(3.0, 3.0), &rainbow, &mut surface);
        assert_eq!(renderer.rainbow().index(), 1);
    }
}
