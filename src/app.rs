use egui::{Color32, Key, Modifiers, Rect, TextureHandle, TextureOptions};

use crate::color::ToolColor;
use crate::config::PaintConfig;
use crate::error::PaintResult;
use crate::input::{InputEvent, InputHandler};
use crate::panels::{central_panel, tools_panel};
use crate::persistence::LoadOutcome;
use crate::session::PaintSession;
use crate::surface::{RasterSurface, Surface};

const CANVAS_BACKGROUND: Color32 = Color32::WHITE;

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct PaintApp {
    config: PaintConfig,
    // The drawing itself is only stored through the explicit save button
    #[serde(skip)]
    session: PaintSession<RasterSurface>,
    #[serde(skip)]
    input: Option<InputHandler>,
    #[serde(skip)]
    texture: Option<TextureHandle>,
    #[serde(skip)]
    texture_version: Option<u64>,
    /// Color restored when leaving rainbow mode
    #[serde(skip)]
    last_solid: Color32,
    #[serde(skip)]
    pending_load: bool,
    #[serde(skip)]
    status: Option<String>,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::with_config(PaintConfig::default())
    }
}

impl std::fmt::Debug for PaintApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintApp")
            .field("config", &self.config)
            .field("session", &self.session)
            .field("status", &self.status)
            .finish()
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Load previous app state (if any).
        let config: PaintConfig = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        Self::with_config(config)
    }

    pub fn with_config(config: PaintConfig) -> Self {
        let last_solid = match config.color {
            ToolColor::Solid(color) => color,
            ToolColor::Rainbow => Color32::BLACK,
        };
        Self {
            session: PaintSession::new(&config),
            pending_load: config.load_on_startup,
            config,
            input: None,
            texture: None,
            texture_version: None,
            last_solid,
            status: None,
        }
    }

    pub fn config(&self) -> &PaintConfig {
        &self.config
    }

    pub fn session(&self) -> &PaintSession<RasterSurface> {
        &self.session
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn last_solid(&self) -> Color32 {
        self.last_solid
    }

    pub fn set_color(&mut self, color: ToolColor) {
        if let ToolColor::Solid(solid) = color {
            self.last_solid = solid;
        }
        self.session.set_color(color);
    }

    pub fn set_size(&mut self, size: f32) {
        self.session.set_size(size);
    }

    pub fn undo(&mut self) {
        let result = self.session.undo();
        self.report(result);
    }

    pub fn redo(&mut self) {
        let result = self.session.redo();
        self.report(result);
    }

    pub fn reset(&mut self) {
        let result = self.session.reset();
        self.report(result);
    }

    pub fn save_drawing(&mut self, storage: &mut dyn eframe::Storage) {
        match self.session.save(storage) {
            Ok(segments) => self.status = Some(format!("Saved {segments} segments")),
            Err(err) => self.report::<()>(Err(err)),
        }
    }

    pub fn load_drawing(&mut self, storage: &dyn eframe::Storage) {
        match self.session.load(storage) {
            Ok(LoadOutcome::Loaded(segments)) => {
                self.status = Some(format!("Loaded {segments} segments"));
            }
            Ok(LoadOutcome::Missing) => self.status = Some("No saved drawing".to_owned()),
            // A broken payload is ignored; the drawing stays as it was.
            Ok(LoadOutcome::Rejected(_)) => {}
            Err(err) => self.report::<()>(Err(err)),
        }
    }

    /// Bind the raster to the canvas area the first time it is laid out.
    /// The raster gets one pixel per physical screen pixel.
    pub(crate) fn ensure_canvas(&mut self, rect: Rect, ctx: &egui::Context, frame: &eframe::Frame) {
        if self.session.is_initialized() {
            return;
        }
        self.session.initialize(Some(RasterSurface::with_scale(
            rect,
            CANVAS_BACKGROUND,
            ctx.pixels_per_point(),
        )));
        self.input = Some(InputHandler::new(rect));

        if std::mem::take(&mut self.pending_load) {
            if let Some(storage) = frame.storage() {
                self.load_drawing(storage);
            }
        }
    }

    /// Route this frame's pointer input into the session
    pub(crate) fn handle_input(&mut self, ctx: &egui::Context) {
        let events = match self.input.as_mut() {
            Some(input) => input.process_input(ctx),
            None => return,
        };
        for event in events {
            match event {
                InputEvent::PointerDown(event) => {
                    let result = self.session.start(&event);
                    self.report(result);
                }
                InputEvent::PointerMove(event) => {
                    let result = self.session.draw(&event, false);
                    self.report(result);
                }
                InputEvent::PointerUp => self.session.stop(),
            }
        }
    }

    pub(crate) fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let redo = ctx.input_mut(|i| {
            i.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z)
                || i.consume_key(Modifiers::COMMAND, Key::Y)
        });
        if redo {
            self.redo();
        } else if ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::Z)) {
            self.undo();
        }
    }

    /// Upload the raster if it changed since the last frame
    pub(crate) fn canvas_texture(&mut self, ctx: &egui::Context) -> Option<&TextureHandle> {
        let surface = self.session.surface()?;
        let [w, h] = surface.size();
        if w == 0 || h == 0 {
            return None;
        }

        if self.texture_version != Some(surface.version()) {
            let image = surface.to_color_image();
            match self.texture.as_mut() {
                Some(texture) => texture.set(image, TextureOptions::LINEAR),
                None => {
                    self.texture = Some(ctx.load_texture("canvas", image, TextureOptions::LINEAR));
                }
            }
            self.texture_version = Some(surface.version());
        }
        self.texture.as_ref()
    }

    pub(crate) fn canvas_rect(&self) -> Option<Rect> {
        self.session.surface().map(|surface| surface.bounding_rect())
    }

    fn report<T>(&mut self, result: PaintResult<T>) {
        if let Err(err) = result {
            log::error!("{err}");
            self.status = Some(err.to_string());
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.config.color = self.session.color();
        self.config.size = self.session.size();
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        tools_panel(self, ctx, frame);
        central_panel(self, ctx, frame);
    }
}
