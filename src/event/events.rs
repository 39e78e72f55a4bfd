use crate::color::ToolColor;

/// Observable changes to a paint session, emitted after the change happened
#[derive(Debug, Clone, PartialEq)]
pub enum PaintEvent {
    ColorChanged(ToolColor),
    SizeChanged(f32),
    DrawingChanged(bool),
    HistoryChanged {
        undo_len: usize,
        redo_len: usize,
    },
    /// The drawing was written to storage
    Saved {
        segments: usize,
    },
    /// A saved drawing replaced the current one
    Loaded {
        segments: usize,
    },
    Reset,
}
