mod bus;
mod events;

pub use bus::EventBus;
pub use events::PaintEvent;

/// Receives change notifications from a paint session
pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &PaintEvent);
}

impl<F> EventHandler for F
where
    F: FnMut(&PaintEvent) + Send,
{
    fn handle_event(&mut self, event: &PaintEvent) {
        self(event)
    }
}
