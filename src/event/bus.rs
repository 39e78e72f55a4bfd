use parking_lot::Mutex;

use crate::event::{EventHandler, PaintEvent};

/// A simple event bus for broadcasting paint events to registered handlers
pub struct EventBus {
    handlers: Mutex<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.lock().len()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Mutex::new(Vec::new()),
        }
    }

    /// Subscribe a handler to receive events
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.lock().push(handler);
    }

    /// Emit an event to all registered handlers.
    ///
    /// The lock is released while handlers run, so a handler may subscribe
    /// further handlers; those receive events from the next emit on.
    pub fn emit(&self, event: PaintEvent) {
        let mut handlers = std::mem::take(&mut *self.handlers.lock());
        for handler in handlers.iter_mut() {
            handler.handle_event(&event);
        }

        let mut registered = self.handlers.lock();
        let added = std::mem::replace(&mut *registered, handlers);
        registered.extend(added);
    }
}
