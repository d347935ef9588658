use egui::{Color32, ColorImage, Pos2};

/// How a shape is composited onto the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// Source-over with the given color.
    Over(Color32),
    /// Destination-out: reduces alpha under the shape, never adds color.
    Erase,
}

/// RGBA raster with straight (non-premultiplied) alpha, row major.
///
/// A fresh surface is fully transparent.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Surface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> [usize; 2] {
        [self.width, self.height]
    }

    /// Raw RGBA bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]])
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&b| b == 0)
    }

    /// Set every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Reallocate at the new size. Existing content is discarded.
    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    /// Replace the whole buffer, adopting the given dimensions.
    pub(crate) fn load(&mut self, width: usize, height: usize, pixels: &[u8]) {
        debug_assert_eq!(pixels.len(), width * height * 4);
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.extend_from_slice(pixels);
    }

    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied([self.width, self.height], &self.pixels)
    }

    /// Anti-aliased line with round caps. A zero-length segment is a dot.
    pub fn stroke_segment(&mut self, from: Pos2, to: Pos2, width: f32, paint: Paint) {
        let radius = width * 0.5;
        if radius <= 0.0 {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.bounds(from.min(to), from.max(to), radius + 1.0) else {
            return;
        };

        for y in y0..y1 {
            for x in x0..x1 {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                let distance = distance_to_segment(center, from, to);
                let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.composite(x, y, paint, coverage);
                }
            }
        }
    }

    pub fn fill_disc(&mut self, center: Pos2, radius: f32, paint: Paint) {
        self.stroke_segment(center, center, radius * 2.0, paint);
    }

    /// Radial gradient disc. `stops` are `(offset, alpha)` pairs from center
    /// (0.0) to edge (1.0); the resulting alpha is scaled by `opacity`.
    pub fn radial_dab(&mut self, center: Pos2, radius: f32, color: Color32, stops: &[(f32, f32)], opacity: f32) {
        if radius <= 0.0 || opacity <= 0.0 {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.bounds(center, center, radius) else {
            return;
        };

        for y in y0..y1 {
            for x in x0..x1 {
                let pixel_center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                let t = pixel_center.distance(center) / radius;
                if t > 1.0 {
                    continue;
                }
                let alpha = gradient_alpha(stops, t) * opacity;
                if alpha > 0.0 {
                    self.composite(x, y, Paint::Over(color), alpha);
                }
            }
        }
    }

    /// Pixel rectangle `[x0, x1) × [y0, y1)` covering `min..max` grown by `pad`.
    fn bounds(&self, min: Pos2, max: Pos2, pad: f32) -> Option<(usize, usize, usize, usize)> {
        let x0 = (min.x - pad).floor().max(0.0) as usize;
        let y0 = (min.y - pad).floor().max(0.0) as usize;
        let x1 = ((max.x + pad).ceil().max(0.0) as usize).min(self.width);
        let y1 = ((max.y + pad).ceil().max(0.0) as usize).min(self.height);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }

    fn composite(&mut self, x: usize, y: usize, paint: Paint, coverage: f32) {
        let i = (y * self.width + x) * 4;
        let dst = &mut self.pixels[i..i + 4];
        let dst_alpha = dst[3] as f32 / 255.0;

        match paint {
            Paint::Over(color) => {
                let src_alpha = coverage * color.a() as f32 / 255.0;
                let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
                if out_alpha <= 0.0 {
                    return;
                }
                let [r, g, b, _] = color.to_srgba_unmultiplied();
                for (channel, src) in dst.iter_mut().take(3).zip([r, g, b]) {
                    let blended = (src as f32 * src_alpha
                        + *channel as f32 * dst_alpha * (1.0 - src_alpha))
                        / out_alpha;
                    *channel = blended.round().clamp(0.0, 255.0) as u8;
                }
                dst[3] = (out_alpha * 255.0).round().max(dst[3] as f32).min(255.0) as u8;
            }
            Paint::Erase => {
                let out_alpha = ((dst_alpha * (1.0 - coverage)) * 255.0).round() as u8;
                if out_alpha == 0 {
                    dst.fill(0);
                } else {
                    dst[3] = out_alpha.min(dst[3]);
                }
            }
        }
    }
}

fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let length_sq = ab.length_sq();
    if length_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Piecewise linear interpolation over sorted `(offset, alpha)` stops.
fn gradient_alpha(stops: &[(f32, f32)], t: f32) -> f32 {
    let Some(&(first_offset, first_alpha)) = stops.first() else {
        return 0.0;
    };
    if t <= first_offset {
        return first_alpha;
    }
    for pair in stops.windows(2) {
        let (start, start_alpha) = pair[0];
        let (end, end_alpha) = pair[1];
        if t <= end {
            let span = end - start;
            if span <= 0.0 {
                return end_alpha;
            }
            return start_alpha + (end_alpha - start_alpha) * (t - start) / span;
        }
    }
    stops.last().map(|&(_, alpha)| alpha).unwrap_or(0.0)
}
