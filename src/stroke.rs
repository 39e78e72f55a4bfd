use egui::{Color32, Pos2};

use crate::color::{ParseColorError, format_color, parse_color};

/// Flattened on-disk form of a segment: `[x0, y0, x1, y1, color, width]`
pub type SegmentRecord = (f32, f32, f32, f32, String, f32);

/// One straight line piece of a stroke, immutable once recorded
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Pos2,
    pub end: Pos2,
    pub color: Color32,
    pub width: f32,
}

impl Segment {
    pub fn new(start: Pos2, end: Pos2, color: Color32, width: f32) -> Self {
        Self {
            start,
            end,
            color,
            width,
        }
    }

    /// A zero-length segment anchored at the first contact point
    pub fn dot(pos: Pos2, color: Color32, width: f32) -> Self {
        Self::new(pos, pos, color, width)
    }

    pub fn is_dot(&self) -> bool {
        self.start == self.end
    }

    pub fn to_record(&self) -> SegmentRecord {
        (
            self.start.x,
            self.start.y,
            self.end.x,
            self.end.y,
            format_color(self.color),
            self.width,
        )
    }

    pub fn from_record(record: &SegmentRecord) -> Result<Self, ParseColorError> {
        let (x0, y0, x1, y1, color, width) = record;
        Ok(Self::new(
            Pos2::new(*x0, *y0),
            Pos2::new(*x1, *y1),
            parse_color(color)?,
            *width,
        ))
    }
}

/// The segments produced between one pointer-down and the matching pointer-up
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stroke {
    segments: Vec<Segment>,
}

impl Stroke {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    // Only the session appends; finalized strokes are never edited.
    pub(crate) fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }
}

impl From<Vec<Segment>> for Stroke {
    fn from(segments: Vec<Segment>) -> Self {
        Self::new(segments)
    }
}

impl<'a> IntoIterator for &'a Stroke {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
