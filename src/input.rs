use egui::{Context, Pos2, Rect, TouchPhase};

/// A pointer or touch sample in window ("client") coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    /// Mouse position in client coordinates
    pub client: Pos2,
    /// Active touch points, in the order the platform reported them
    pub touches: Vec<Pos2>,
}

impl PointerEvent {
    pub fn mouse(client: Pos2) -> Self {
        Self {
            client,
            touches: Vec::new(),
        }
    }

    pub fn touch(touches: Vec<Pos2>) -> Self {
        Self {
            client: touches.first().copied().unwrap_or(Pos2::ZERO),
            touches,
        }
    }

    /// The first touch wins over the mouse position
    pub fn position(&self) -> Pos2 {
        self.touches.first().copied().unwrap_or(self.client)
    }
}

/// Input the session cares about, already reduced from raw egui input
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed (or finger down) inside the canvas
    PointerDown(PointerEvent),
    /// Pointer moved while the primary button is held
    PointerMove(PointerEvent),
    /// Primary button released anywhere
    PointerUp,
}

/// Handles converting raw egui input into our domain-specific InputEvents
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
        }
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let touches: Vec<Pos2> = input
                .raw
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Touch {
                        phase: TouchPhase::Start | TouchPhase::Move,
                        pos,
                        ..
                    } => Some(*pos),
                    _ => None,
                })
                .collect();

            let make_event = |client: Pos2| PointerEvent {
                client,
                touches: touches.clone(),
            };

            let pos = input.pointer.interact_pos();

            if input.pointer.primary_pressed() {
                if let Some(pos) = pos.filter(|pos| self.canvas_rect.contains(*pos)) {
                    events.push(InputEvent::PointerDown(make_event(pos)));
                    self.last_pointer_pos = Some(pos);
                }
            } else if input.pointer.primary_down() {
                if let Some(pos) = pos {
                    if Some(pos) != self.last_pointer_pos {
                        events.push(InputEvent::PointerMove(make_event(pos)));
                        self.last_pointer_pos = Some(pos);
                    }
                }
            }

            if input.pointer.primary_released() {
                events.push(InputEvent::PointerUp);
                self.last_pointer_pos = None;
            }
        });

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_touch_wins() {
        let event = PointerEvent {
            client: Pos2::new(1.0, 1.0),
            touches: vec![Pos2::new(5.0, 6.0), Pos2::new(7.0, 8.0)],
        };
        assert_eq!(event.position(), Pos2::new(5.0, 6.0));
    }

    #[test]
    fn test_mouse_position_without_touches() {
        let event = PointerEvent::mouse(Pos2::new(10.0, 20.0));
        assert_eq!(event.position(), Pos2::new(10.0, 20.0));
    }

    #[test]
    fn test_touch_constructor_mirrors_first_touch() {
        let event = PointerEvent::touch(vec![Pos2::new(2.0, 3.0)]);
        assert_eq!(event.client, Pos2::new(2.0, 3.0));
    }
}
