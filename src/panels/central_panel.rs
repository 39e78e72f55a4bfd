use egui::{Color32, Rect, Sense, pos2};

use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context, frame: &eframe::Frame) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let available_size = ui.available_size();
            let (canvas_rect, _response) = ui.allocate_exact_size(available_size, Sense::drag());

            // The raster keeps the rect from its first layout.
            app.ensure_canvas(canvas_rect, ctx, frame);
            app.handle_input(ctx);

            let rect = app.canvas_rect().unwrap_or(canvas_rect);
            if let Some(texture) = app.canvas_texture(ctx) {
                ui.painter().image(
                    texture.id(),
                    rect,
                    Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                    Color32::WHITE,
                );
            }

            if app.session().is_drawing() {
                ctx.request_repaint();
            }
        });
}
