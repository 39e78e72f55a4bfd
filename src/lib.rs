#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod color;
pub mod config;
pub mod error;
pub mod event;
pub mod history;
pub mod input;
pub mod panels;
pub mod persistence;
pub mod session;
pub mod stroke;
pub mod surface;

pub use app::PaintApp;
pub use color::ToolColor;
pub use config::PaintConfig;
pub use error::{PaintError, PaintResult};
pub use event::{EventBus, EventHandler, PaintEvent};
pub use history::StrokeHistory;
pub use input::{InputEvent, PointerEvent};
pub use persistence::{LoadOutcome, PersistenceError};
pub use session::PaintSession;
pub use stroke::{Segment, Stroke};
pub use surface::{LineCap, LineJoin, RasterSurface, Surface};
