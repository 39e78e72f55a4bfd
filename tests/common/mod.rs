#![allow(dead_code)]

use std::collections::HashMap;

use egui::{Color32, Pos2, Rect, Vec2};
use sketchpad::{LineCap, LineJoin, PaintSession, PointerEvent, Surface};

/// Every call a session made on its surface
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Resize([usize; 2]),
    LineStyle(LineJoin, LineCap),
    StrokeStyle(Color32, f32),
    Line(Pos2, Pos2),
    Clear,
}

/// Surface double that records calls instead of rasterizing
pub struct RecordingSurface {
    pub rect: Rect,
    pub ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            ops: Vec::new(),
        }
    }

    pub fn at_origin(width: f32, height: f32) -> Self {
        Self::new(Rect::from_min_size(Pos2::ZERO, Vec2::new(width, height)))
    }

    /// Lines drawn since the most recent clear
    pub fn visible_lines(&self) -> Vec<(Pos2, Pos2)> {
        let last_clear = self
            .ops
            .iter()
            .rposition(|op| *op == SurfaceOp::Clear)
            .map_or(0, |i| i + 1);
        self.ops[last_clear..]
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Line(from, to) => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn client_size(&self) -> Vec2 {
        self.rect.size()
    }

    fn bounding_rect(&self) -> Rect {
        self.rect
    }

    fn resize(&mut self, size: [usize; 2]) {
        self.ops.push(SurfaceOp::Resize(size));
    }

    fn set_line_style(&mut self, join: LineJoin, cap: LineCap) {
        self.ops.push(SurfaceOp::LineStyle(join, cap));
    }

    fn set_stroke_style(&mut self, color: Color32, width: f32) {
        self.ops.push(SurfaceOp::StrokeStyle(color, width));
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2) {
        self.ops.push(SurfaceOp::Line(from, to));
    }

    fn clear(&mut self) {
        self.ops.push(SurfaceOp::Clear);
    }
}

/// In-memory stand-in for eframe's key-value storage
#[derive(Default)]
pub struct MemoryStorage {
    pub values: HashMap<String, String>,
    pub flushes: usize,
}

impl eframe::Storage for MemoryStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.values.insert(key.to_owned(), value);
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}

pub fn mouse(x: f32, y: f32) -> PointerEvent {
    PointerEvent::mouse(Pos2::new(x, y))
}

pub fn session() -> PaintSession<RecordingSurface> {
    let mut session = PaintSession::default();
    assert!(session.initialize(Some(RecordingSurface::at_origin(200.0, 100.0))));
    session
}

/// Draw one stroke through `points`: start on the first, move through the rest
pub fn draw_stroke(session: &mut PaintSession<RecordingSurface>, points: &[(f32, f32)]) {
    let ((x, y), rest) = points.split_first().unwrap();
    session.start(&mouse(*x, *y)).unwrap();
    for (x, y) in rest {
        session.draw(&mouse(*x, *y), false).unwrap();
    }
    session.stop();
}
