use crate::stroke::Stroke;

/// Finalized strokes plus the strokes undo has set aside for redo.
///
/// A stroke lives in exactly one of the two stacks at any time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokeHistory {
    /// Strokes that make up the drawing, oldest first
    strokes: Vec<Stroke>,
    /// Strokes removed by undo, most recently undone last
    redo: Vec<Stroke>,
}

impl StrokeHistory {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finalized stroke. A new stroke drops everything undo has
    /// set aside.
    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
        self.redo.clear();
    }

    /// Move the newest stroke onto the redo stack. Returns false if there
    /// was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.strokes.pop() {
            Some(stroke) => {
                self.redo.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Move the most recently undone stroke back into the drawing
    pub fn redo(&mut self) -> bool {
        match self.redo.pop() {
            Some(stroke) => {
                self.strokes.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Drop everything undo has set aside; called when a new stroke begins
    pub fn invalidate_redo(&mut self) {
        self.redo.clear();
    }

    /// Replace the whole drawing with a single stroke
    pub fn replace_with(&mut self, stroke: Stroke) {
        self.clear();
        self.strokes.push(stroke);
    }

    /// Clear the stroke history
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.redo.clear();
    }

    /// Returns true if there are strokes that can be undone
    pub fn can_undo(&self) -> bool {
        !self.strokes.is_empty()
    }

    /// Returns true if there are strokes that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn redo_stack(&self) -> &[Stroke] {
        &self.redo
    }
}
