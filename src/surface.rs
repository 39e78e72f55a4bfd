use egui::{Color32, ColorImage, Pos2, Rect, Vec2};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

/// How the ends of a stroked line are drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

impl From<LineCap> for tiny_skia::LineCap {
    fn from(cap: LineCap) -> Self {
        match cap {
            LineCap::Butt => Self::Butt,
            LineCap::Round => Self::Round,
        }
    }
}

/// How adjoining lines within one path meet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
}

impl From<LineJoin> for tiny_skia::LineJoin {
    fn from(join: LineJoin) -> Self {
        match join {
            LineJoin::Miter => Self::Miter,
            LineJoin::Round => Self::Round,
        }
    }
}

/// An immediate-mode 2D drawing target.
///
/// Every call draws right away; there is no retained scene.
pub trait Surface {
    /// Visible size of the surface, in surface units
    fn client_size(&self) -> Vec2;

    /// Screen-space rectangle the surface occupies
    fn bounding_rect(&self) -> Rect;

    /// Resize the backing raster to `size` surface units, discarding its contents
    fn resize(&mut self, size: [usize; 2]);

    fn set_line_style(&mut self, join: LineJoin, cap: LineCap);

    fn set_stroke_style(&mut self, color: Color32, width: f32);

    /// Path from `from` to `to` and stroke it with the current style
    fn stroke_line(&mut self, from: Pos2, to: Pos2);

    /// Erase the full raster
    fn clear(&mut self);
}

/// Anti-aliased CPU raster backed by a [`tiny_skia::Pixmap`].
///
/// Surface units are egui points; the pixmap holds `scale` pixels per point.
/// The app uploads [`RasterSurface::to_color_image`] as a texture whenever
/// [`RasterSurface::version`] changes.
pub struct RasterSurface {
    pixmap: Option<Pixmap>,
    screen_rect: Rect,
    scale: f32,
    background: Color32,
    stroke: tiny_skia::Stroke,
    paint: Paint<'static>,
    version: u64,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("size", &self.size())
            .field("screen_rect", &self.screen_rect)
            .field("scale", &self.scale)
            .field("version", &self.version)
            .finish()
    }
}

impl RasterSurface {
    /// Creates a surface covering `screen_rect`. The raster itself stays
    /// empty until [`Surface::resize`] is called.
    pub fn new(screen_rect: Rect, background: Color32) -> Self {
        Self::with_scale(screen_rect, background, 1.0)
    }

    /// Like [`RasterSurface::new`], with `scale` raster pixels per surface unit
    pub fn with_scale(screen_rect: Rect, background: Color32, scale: f32) -> Self {
        let mut paint = Paint::default();
        paint.anti_alias = true;
        Self {
            pixmap: None,
            screen_rect,
            scale: if scale.is_finite() && scale > 0.0 { scale } else { 1.0 },
            background,
            stroke: tiny_skia::Stroke::default(),
            paint,
            version: 0,
        }
    }

    /// Raster size in pixels
    pub fn size(&self) -> [usize; 2] {
        self.pixmap
            .as_ref()
            .map_or([0, 0], |pixmap| [pixmap.width() as usize, pixmap.height() as usize])
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Copy of the raster in the form egui uploads as a texture
    pub fn to_color_image(&self) -> ColorImage {
        match &self.pixmap {
            Some(pixmap) => ColorImage::from_rgba_premultiplied(self.size(), pixmap.data()),
            None => ColorImage::new([0, 0], self.background),
        }
    }

    /// Color of the raster pixel at `x`, `y`
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color32> {
        let pixel = self.pixmap.as_ref()?.pixel(x as u32, y as u32)?.demultiply();
        Some(Color32::from_rgba_unmultiplied(
            pixel.red(),
            pixel.green(),
            pixel.blue(),
            pixel.alpha(),
        ))
    }

    fn transform(&self) -> Transform {
        Transform::from_scale(self.scale, self.scale)
    }
}

impl Surface for RasterSurface {
    fn client_size(&self) -> Vec2 {
        self.screen_rect.size()
    }

    fn bounding_rect(&self) -> Rect {
        self.screen_rect
    }

    fn resize(&mut self, size: [usize; 2]) {
        let width = (size[0] as f32 * self.scale).round() as u32;
        let height = (size[1] as f32 * self.scale).round() as u32;
        // Pixmap::new refuses a zero-sized raster.
        self.pixmap = Pixmap::new(width, height);
        self.clear();
    }

    fn set_line_style(&mut self, join: LineJoin, cap: LineCap) {
        self.stroke.line_join = join.into();
        self.stroke.line_cap = cap.into();
    }

    fn set_stroke_style(&mut self, color: Color32, width: f32) {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        self.paint.set_color_rgba8(r, g, b, a);
        self.stroke.width = width;
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2) {
        let transform = self.transform();
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };

        if from == to {
            // A zero-length butt-capped line paints nothing; a round one is a dot.
            if self.stroke.line_cap != tiny_skia::LineCap::Round {
                return;
            }
            let Some(dot) = PathBuilder::from_circle(from.x, from.y, self.stroke.width / 2.0)
            else {
                return;
            };
            pixmap.fill_path(&dot, &self.paint, FillRule::Winding, transform, None);
        } else {
            let mut pb = PathBuilder::new();
            pb.move_to(from.x, from.y);
            pb.line_to(to.x, to.y);
            let Some(path) = pb.finish() else {
                return;
            };
            pixmap.stroke_path(&path, &self.paint, &self.stroke, transform, None);
        }
        self.version += 1;
    }

    fn clear(&mut self) {
        if let Some(pixmap) = self.pixmap.as_mut() {
            let [r, g, b, a] = self.background.to_srgba_unmultiplied();
            pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
        }
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(size: usize) -> RasterSurface {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::splat(size as f32));
        let mut surface = RasterSurface::new(rect, Color32::WHITE);
        surface.resize([size, size]);
        surface
    }

    #[test]
    fn test_round_cap_dot() {
        let mut surface = surface(20);
        surface.set_line_style(LineJoin::Round, LineCap::Round);
        surface.set_stroke_style(Color32::RED, 6.0);
        surface.stroke_line(Pos2::new(10.0, 10.0), Pos2::new(10.0, 10.0));

        assert_eq!(surface.pixel(10, 10), Some(Color32::RED));
        assert_eq!(surface.pixel(0, 0), Some(Color32::WHITE));
    }

    #[test]
    fn test_butt_cap_dot_paints_nothing() {
        let mut surface = surface(20);
        surface.set_stroke_style(Color32::RED, 6.0);
        let version = surface.version();
        surface.stroke_line(Pos2::new(10.0, 10.0), Pos2::new(10.0, 10.0));

        assert_eq!(surface.pixel(10, 10), Some(Color32::WHITE));
        assert_eq!(surface.version(), version);
    }

    #[test]
    fn test_line_and_clear() {
        let mut surface = surface(20);
        surface.set_line_style(LineJoin::Round, LineCap::Round);
        surface.set_stroke_style(Color32::BLUE, 4.0);
        surface.stroke_line(Pos2::new(2.0, 5.0), Pos2::new(18.0, 5.0));

        assert_eq!(surface.pixel(10, 4), Some(Color32::BLUE));
        assert_eq!(surface.pixel(10, 15), Some(Color32::WHITE));

        surface.clear();
        assert_eq!(surface.pixel(10, 4), Some(Color32::WHITE));
    }

    #[test]
    fn test_lines_are_clipped_to_raster() {
        let mut surface = surface(8);
        surface.set_line_style(LineJoin::Round, LineCap::Round);
        surface.set_stroke_style(Color32::BLACK, 4.0);
        surface.stroke_line(Pos2::new(-20.0, -20.0), Pos2::new(40.0, 40.0));

        assert_eq!(surface.pixel(4, 4), Some(Color32::BLACK));
        assert_eq!(surface.pixel(8, 8), None);
    }

    #[test]
    fn test_scale_multiplies_raster_pixels() {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(10.0, 5.0));
        let mut surface = RasterSurface::with_scale(rect, Color32::WHITE, 2.0);
        surface.resize([10, 5]);
        assert_eq!(surface.size(), [20, 10]);

        surface.set_line_style(LineJoin::Round, LineCap::Round);
        surface.set_stroke_style(Color32::BLACK, 2.0);
        surface.stroke_line(Pos2::new(5.0, 2.5), Pos2::new(5.0, 2.5));
        // The dot at (5, 2.5) points lands at (10, 5) pixels.
        assert_eq!(surface.pixel(10, 5), Some(Color32::BLACK));
        assert_eq!(surface.pixel(2, 5), Some(Color32::WHITE));
    }

    #[test]
    fn test_color_image_matches_raster() {
        let surface = surface(4);
        let image = surface.to_color_image();
        assert_eq!(image.size, [4, 4]);
        assert!(image.pixels.iter().all(|pixel| *pixel == Color32::WHITE));
    }

    #[test]
    fn test_zero_sized_raster_is_inert() {
        let mut surface = surface(0);
        surface.stroke_line(Pos2::ZERO, Pos2::new(1.0, 1.0));
        assert_eq!(surface.size(), [0, 0]);
        assert_eq!(surface.pixel(0, 0), None);
    }
}
