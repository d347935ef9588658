use eframe_sketch::brush::{BrushSettings, BrushSize, BrushStyle, SoftBrush, Tool};
use eframe_sketch::color::{self, BrushColor, RainbowCursor, RainbowMode};
use eframe_sketch::history::SnapshotHistory;
use eframe_sketch::random::{ScriptedRandom, XorShift32};
use eframe_sketch::stroke::StrokeRenderer;
use eframe_sketch::surface::{Paint, Surface};
use eframe_sketch::{Document, PaintConfig};
use egui::{Color32, Pos2};

const PATH: [(f32, f32); 5] = [(8.0, 8.0), (20.0, 12.0), (34.0, 30.0), (40.0, 44.0), (12.0, 40.0)];

fn renderer_with_seed(seed: u32) -> StrokeRenderer {
    StrokeRenderer::new(RainbowCursor::default(), Box::new(XorShift32::new(seed)))
}

fn draw_path(renderer: &mut StrokeRenderer, settings: &BrushSettings, surface: &mut Surface) {
    let mut history = SnapshotHistory::default();
    let (x, y) = PATH[0];
    renderer.begin_stroke(Pos2::new(x, y), surface, &mut history);
    for &(x, y) in &PATH[1..] {
        renderer.extend_stroke(Pos2::new(x, y), settings, surface);
    }
    renderer.end_stroke();
}

fn painted_background() -> Surface {
    let mut surface = Surface::new(48, 48);
    surface.fill_disc(Pos2::new(16.0, 16.0), 14.0, Paint::Over(Color32::from_rgb(10, 120, 200)));
    surface.fill_disc(Pos2::new(32.0, 32.0), 14.0, Paint::Over(Color32::from_rgba_unmultiplied(200, 40, 40, 128)));
    surface
}

fn pixels(surface: &Surface) -> impl Iterator<Item = (usize, usize, [u8; 4])> + '_ {
    (0..surface.height())
        .flat_map(move |y| (0..surface.width()).map(move |x| (x, y)))
        .filter_map(move |(x, y)| surface.pixel(x, y).map(|p| (x, y, p)))
}

#[test]
fn test_eraser_never_adds_color() {
    let mut surface = painted_background();
    let before = surface.clone();
    let settings = BrushSettings {
        tool: Tool::Eraser,
        size: BrushSize::from_px(8).unwrap(),
        ..Default::default()
    };
    draw_path(&mut renderer_with_seed(7), &settings, &mut surface);

    assert_ne!(surface, before);
    for (x, y, after) in pixels(&surface) {
        let old = before.pixel(x, y).unwrap();
        assert!(after[3] <= old[3], "alpha grew at ({x}, {y})");
        assert!(after == [0, 0, 0, 0] || after[..3] == old[..3], "color changed at ({x}, {y})");
    }
}

#[test]
fn test_brush_leaves_pixels_off_the_path_alone() {
    for style in [BrushStyle::Solid, BrushStyle::Soft] {
        let mut surface = painted_background();
        let before = surface.clone();
        let size = BrushSize::from_px(5).unwrap();
        let settings = BrushSettings {
            color: BrushColor::Solid(Color32::from_rgb(0, 200, 0)),
            size,
            style,
            ..Default::default()
        };
        draw_path(&mut renderer_with_seed(11), &settings, &mut surface);

        // solid lines reach size/2 from the path, soft dabs reach size from each point
        let reach = size.as_f32() + 1.5;
        for (x, y, after) in pixels(&surface) {
            let old = before.pixel(x, y).unwrap();
            assert!(after[3] >= old[3], "{style:?} reduced alpha at ({x}, {y})");
            let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
            let near_path = PATH.windows(2).any(|w| {
                let (a, b) = (Pos2::new(w[0].0, w[0].1), Pos2::new(w[1].0, w[1].1));
                distance_to_segment(center, a, b) <= reach
            });
            if !near_path {
                assert_eq!(after, old, "{style:?} touched ({x}, {y})");
            }
        }
    }
}

const BACKGROUND: [u8; 4] = [0, 0, 255, 255];

/// One size-8 horizontal segment along y = 20.5 over an opaque blue surface.
fn horizontal_segment(tool: Tool) -> Surface {
    let mut surface = Surface::new(40, 40);
    surface.fill_disc(Pos2::new(20.0, 20.0), 40.0, Paint::Over(Color32::from_rgb(0, 0, 255)));
    assert_eq!(surface.pixel(20, 0), Some(BACKGROUND));

    let settings = BrushSettings {
        color: BrushColor::Solid(Color32::from_rgb(255, 0, 0)),
        size: BrushSize::from_px(8).unwrap(),
        tool,
        ..Default::default()
    };
    let mut renderer = renderer_with_seed(5);
    let mut history = SnapshotHistory::default();
    renderer.begin_stroke(Pos2::new(4.5, 20.5), &surface, &mut history);
    renderer.extend_stroke(Pos2::new(35.5, 20.5), &settings, &mut surface);
    renderer.end_stroke();
    surface
}

// pixel row 20 ± d has its center exactly d away from the segment
fn cross_section(surface: &Surface, d: usize) -> [[u8; 4]; 2] {
    [surface.pixel(20, 20 - d).unwrap(), surface.pixel(20, 20 + d).unwrap()]
}

#[test]
fn test_eraser_clears_twice_the_brush_size() {
    let surface = horizontal_segment(Tool::Eraser);
    for d in 0..=7 {
        assert_eq!(cross_section(&surface, d), [[0, 0, 0, 0]; 2], "distance {d}");
    }
    for d in 9..=12 {
        assert_eq!(cross_section(&surface, d), [BACKGROUND; 2], "distance {d}");
    }
}

#[test]
fn test_solid_brush_is_one_brush_size_wide() {
    let surface = horizontal_segment(Tool::Brush);
    for d in 0..=3 {
        assert_eq!(cross_section(&surface, d), [[255, 0, 0, 255]; 2], "distance {d}");
    }
    for d in 5..=8 {
        assert_eq!(cross_section(&surface, d), [BACKGROUND; 2], "distance {d}");
    }
}

fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let t = ((p - a).dot(ab) / ab.length_sq()).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

#[test]
fn test_rainbow_colors_stay_between_palette_neighbours() {
    let palette = RainbowCursor::default();
    let mut cursor = palette.clone();
    let mut random = XorShift32::new(42);

    for _ in 0..500 {
        let (a, b) = cursor.current_pair();
        let c = cursor.resolve(RainbowMode::Subtle, &mut random);
        for (value, x, y) in [(c.r(), a.r(), b.r()), (c.g(), a.g(), b.g()), (c.b(), a.b(), b.b())] {
            assert!(value >= x.min(y) && value <= x.max(y), "{} not between {} and {}", value, x, y);
        }
        cursor.maybe_advance(RainbowMode::Subtle, &mut random);
    }
}

#[test]
fn test_rainbow_progression_is_deterministic_with_scripted_random() {
    let config = PaintConfig {
        canvas_size: [64, 64],
        color: "rainbow".to_owned(),
        rainbow_mode: RainbowMode::Subtle,
        rainbow_palette: vec!["#FF0000".into(), "#00FF00".into(), "#0000FF".into()],
        ..Default::default()
    };
    // each segment: one mix factor, then one advance roll
    let random = ScriptedRandom::new(vec![0.0, 0.01, 0.0, 0.9, 0.0, 0.01]);
    let mut document = Document::with_random(&config, Box::new(random)).unwrap();

    document.pointer_down(Pos2::new(4.5, 4.5));
    document.pointer_move(Pos2::new(4.5, 4.5));
    assert_eq!(document.renderer().rainbow().index(), 1);
    assert_eq!(document.surface().pixel(4, 4), Some([255, 0, 0, 255]));

    document.pointer_move(Pos2::new(30.5, 4.5));
    assert_eq!(document.renderer().rainbow().index(), 1);
    assert_eq!(document.surface().pixel(30, 4), Some([0, 255, 0, 255]));

    document.pointer_move(Pos2::new(30.5, 30.5));
    assert_eq!(document.renderer().rainbow().index(), 2);
    assert_eq!(document.surface().pixel(30, 30), Some([0, 255, 0, 255]));
}

#[test]
fn test_mix_colors_scenario() {
    let red = color::parse_hex("#FF0000").unwrap();
    let green = color::parse_hex("#00FF00").unwrap();
    assert_eq!(color::to_hex(color::mix_colors(red, green, 0.5)), "#808000");
}

#[test]
fn test_simple_soft_brush_is_solid_at_center() {
    let mut surface = Surface::new(32, 32);
    let settings = BrushSettings {
        color: BrushColor::Solid(Color32::from_rgb(255, 192, 203)),
        size: BrushSize::from_px(12).unwrap(),
        style: BrushStyle::Soft,
        soft_brush: SoftBrush::Simple,
        ..Default::default()
    };
    let mut renderer = renderer_with_seed(3);
    renderer.extend_stroke(Pos2::new(16.5, 16.5), &settings, &mut surface);

    assert_eq!(surface.pixel(16, 16), Some([255, 192, 203, 255]));
    assert_eq!(surface.pixel(19, 16), Some([255, 192, 203, 255]));
    let outer = surface.pixel(27, 16).unwrap()[3];
    assert!(outer > 0 && outer < 255);
    assert_eq!(surface.pixel(29, 16), Some([0, 0, 0, 0]));
}
