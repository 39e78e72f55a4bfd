use egui::{Pos2, Vec2};
use log::{debug, info, warn};

use crate::color::{RainbowCycle, ToolColor};
use crate::config::PaintConfig;
use crate::error::{PaintError, PaintResult};
use crate::event::{EventBus, EventHandler, PaintEvent};
use crate::history::StrokeHistory;
use crate::input::PointerEvent;
use crate::persistence::{self, LoadOutcome};
use crate::stroke::{Segment, Stroke};
use crate::surface::{LineCap, LineJoin, Surface};

/// Drives a drawing surface from pointer input and keeps the undoable
/// stroke history that the raster is rebuilt from.
///
/// The history is the source of truth; the surface is only a cache of it.
pub struct PaintSession<S: Surface> {
    surface: Option<S>,
    /// Offset subtracted from client coordinates, captured at initialization
    origin: Vec2,

    color: ToolColor,
    size: f32,
    rainbow: RainbowCycle,
    is_drawing: bool,
    last_point: Pos2,

    history: StrokeHistory,
    session: Stroke,

    storage_key: String,
    events: EventBus,
}

impl<S: Surface> std::fmt::Debug for PaintSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintSession")
            .field("initialized", &self.surface.is_some())
            .field("color", &self.color)
            .field("size", &self.size)
            .field("is_drawing", &self.is_drawing)
            .field("strokes", &self.history.strokes().len())
            .field("redo", &self.history.redo_stack().len())
            .finish()
    }
}

impl<S: Surface> Default for PaintSession<S> {
    fn default() -> Self {
        Self::new(&PaintConfig::default())
    }
}

impl<S: Surface> PaintSession<S> {
    pub fn new(config: &PaintConfig) -> Self {
        Self {
            surface: None,
            origin: Vec2::ZERO,
            color: config.color,
            size: config.size,
            rainbow: RainbowCycle::default(),
            is_drawing: false,
            last_point: Pos2::ZERO,
            history: StrokeHistory::new(),
            session: Stroke::default(),
            storage_key: config.storage_key.clone(),
            events: EventBus::new(),
        }
    }

    /// Bind the session to a surface. Only the first non-empty call has an
    /// effect; returns whether the surface was bound.
    pub fn initialize(&mut self, surface: Option<S>) -> bool {
        let Some(mut surface) = surface else {
            return false;
        };
        if self.surface.is_some() {
            warn!("Paint session already initialized, ignoring new surface");
            return false;
        }

        let size = surface.client_size();
        surface.resize([size.x.max(0.0) as usize, size.y.max(0.0) as usize]);
        self.origin = surface.bounding_rect().min.to_vec2();
        surface.set_line_style(LineJoin::Round, LineCap::Round);

        info!(
            "Paint session initialized: {}x{} at {:?}",
            size.x, size.y, self.origin
        );
        self.surface = Some(surface);
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    pub fn color(&self) -> ToolColor {
        self.color
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    /// Finalized strokes, oldest first
    pub fn history(&self) -> &[Stroke] {
        self.history.strokes()
    }

    /// The stroke currently being drawn
    pub fn session(&self) -> &Stroke {
        &self.session
    }

    pub fn redo_buffer(&self) -> &[Stroke] {
        self.history.redo_stack()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Hue the next rainbow segment will use
    pub fn hue(&self) -> u16 {
        self.rainbow.hue()
    }

    pub fn set_color(&mut self, color: ToolColor) {
        self.color = color;
        self.events.emit(PaintEvent::ColorChanged(color));
    }

    pub fn set_size(&mut self, size: f32) {
        self.size = size;
        self.events.emit(PaintEvent::SizeChanged(size));
    }

    /// Pointer down: begins a new stroke with a dot at the contact point
    pub fn start(&mut self, event: &PointerEvent) -> PaintResult<()> {
        self.require_surface("start a stroke")?;

        self.set_drawing(true);
        if self.history.can_redo() {
            self.history.invalidate_redo();
            self.emit_history();
        }
        self.draw(event, true)
    }

    /// Append one segment to the in-progress stroke and render it.
    /// Does nothing while no stroke is active.
    pub fn draw(&mut self, event: &PointerEvent, first_contact: bool) -> PaintResult<()> {
        if !self.is_drawing {
            return Ok(());
        }
        self.require_surface("draw")?;

        let point = event.position() - self.origin;
        let color = match self.color {
            ToolColor::Solid(color) => color,
            ToolColor::Rainbow => self.rainbow.next_color(),
        };
        let start = if first_contact { point } else { self.last_point };
        let segment = Segment::new(start, point, color, self.size);

        self.stroke(&segment)?;
        self.session.push(segment);
        self.last_point = point;
        Ok(())
    }

    /// Render a single segment immediately
    pub fn stroke(&mut self, segment: &Segment) -> PaintResult<()> {
        let surface = self.surface_mut("stroke a segment")?;
        paint_segment(surface, segment);
        Ok(())
    }

    /// Pointer up: moves the in-progress stroke into the history
    pub fn stop(&mut self) {
        if !self.is_drawing {
            return;
        }
        self.set_drawing(false);

        let stroke = std::mem::take(&mut self.session);
        debug!("Stroke finished with {} segments", stroke.len());
        self.history.push(stroke);
        self.emit_history();
    }

    /// Clear the raster and repaint `strokes`, or the history when `None`
    pub fn redraw(&mut self, strokes: Option<&[Stroke]>) -> PaintResult<()> {
        let surface = self
            .surface
            .as_mut()
            .ok_or(PaintError::SurfaceNotInitialized { operation: "redraw" })?;
        let strokes = strokes.unwrap_or(self.history.strokes());

        surface.clear();
        for segment in strokes.iter().flat_map(Stroke::iter) {
            paint_segment(surface, segment);
        }
        Ok(())
    }

    /// Remove the newest stroke. Returns false when the history is empty.
    pub fn undo(&mut self) -> PaintResult<bool> {
        self.require_surface("undo")?;
        if !self.history.undo() {
            debug!("Nothing to undo");
            return Ok(false);
        }
        self.emit_history();
        self.redraw(None)?;
        Ok(true)
    }

    /// Restore the most recently undone stroke, if any
    pub fn redo(&mut self) -> PaintResult<bool> {
        self.require_surface("redo")?;
        if !self.history.redo() {
            return Ok(false);
        }
        self.emit_history();
        self.redraw(None)?;
        Ok(true)
    }

    /// Erase the raster only; the history is untouched
    pub fn clear(&mut self) -> PaintResult<()> {
        self.surface_mut("clear")?.clear();
        Ok(())
    }

    /// Drop the history, the in-progress stroke and the redo buffer, then
    /// erase the raster
    pub fn reset(&mut self) -> PaintResult<()> {
        self.require_surface("reset")?;
        self.history.clear();
        self.session = Stroke::default();
        self.events.emit(PaintEvent::Reset);
        self.emit_history();
        self.clear()
    }

    /// Persist the history under the configured key. Stroke boundaries are
    /// not kept: a reload yields a single stroke.
    pub fn save(&self, storage: &mut dyn eframe::Storage) -> PaintResult<usize> {
        let segments =
            persistence::write_drawing(storage, &self.storage_key, self.history.strokes())?;
        info!("Saved drawing: {segments} segments under '{}'", self.storage_key);
        self.events.emit(PaintEvent::Saved { segments });
        Ok(segments)
    }

    /// Restore a saved drawing as one undoable stroke.
    ///
    /// A payload that fails to decode leaves the session untouched and is
    /// reported as [`LoadOutcome::Rejected`].
    pub fn load(&mut self, storage: &dyn eframe::Storage) -> PaintResult<LoadOutcome> {
        self.require_surface("load")?;

        let stroke = match persistence::read_drawing(storage, &self.storage_key) {
            Ok(Some(stroke)) => stroke,
            Ok(None) => return Ok(LoadOutcome::Missing),
            Err(err) => {
                warn!("Ignoring saved drawing under '{}': {err}", self.storage_key);
                return Ok(LoadOutcome::Rejected(err));
            }
        };

        let segments = stroke.len();
        self.reset()?;
        self.history.replace_with(stroke);
        self.emit_history();
        self.redraw(None)?;

        info!("Loaded drawing: {segments} segments");
        self.events.emit(PaintEvent::Loaded { segments });
        Ok(LoadOutcome::Loaded(segments))
    }

    fn set_drawing(&mut self, is_drawing: bool) {
        self.is_drawing = is_drawing;
        self.events.emit(PaintEvent::DrawingChanged(is_drawing));
    }

    fn emit_history(&self) {
        self.events.emit(PaintEvent::HistoryChanged {
            undo_len: self.history.strokes().len(),
            redo_len: self.history.redo_stack().len(),
        });
    }

    fn require_surface(&self, operation: &'static str) -> PaintResult<()> {
        if self.surface.is_some() {
            Ok(())
        } else {
            Err(PaintError::SurfaceNotInitialized { operation })
        }
    }

    fn surface_mut(&mut self, operation: &'static str) -> PaintResult<&mut S> {
        self.surface
            .as_mut()
            .ok_or(PaintError::SurfaceNotInitialized { operation })
    }
}

fn paint_segment<S: Surface>(surface: &mut S, segment: &Segment) {
    surface.set_stroke_style(segment.color, segment.width);
    surface.stroke_line(segment.start, segment.end);
}
