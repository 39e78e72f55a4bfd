use crate::PaintApp;
use crate::color::ToolColor;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context, frame: &mut eframe::Frame) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");
            ui.separator();

            // Color picker
            let mut rainbow = app.session().color() == ToolColor::Rainbow;
            if ui.checkbox(&mut rainbow, "🌈 Rainbow").changed() {
                let color = if rainbow {
                    ToolColor::Rainbow
                } else {
                    ToolColor::Solid(app.last_solid())
                };
                log::info!("Tool color changed from UI: {color:?}");
                app.set_color(color);
            }
            ui.add_enabled_ui(!rainbow, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Color:");
                    let mut color = app.last_solid();
                    if egui::color_picker::color_edit_button_srgba(
                        ui,
                        &mut color,
                        egui::color_picker::Alpha::Opaque,
                    )
                    .changed()
                    {
                        app.set_color(ToolColor::Solid(color));
                    }
                });
            });

            // Line width slider
            ui.horizontal(|ui| {
                ui.label("Size:");
                let mut size = app.session().size();
                if ui
                    .add(egui::Slider::new(&mut size, app.config().size_range()))
                    .changed()
                {
                    app.set_size(size);
                }
            });

            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                let can_undo = app.session().can_undo();
                let can_redo = app.session().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
                if ui.button("Clear").clicked() {
                    app.reset();
                }
            });

            ui.horizontal(|ui| {
                ui.label(format!("Strokes: {}", app.session().history().len()));
                ui.label(format!("Redo: {}", app.session().redo_buffer().len()));
            });

            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    match frame.storage_mut() {
                        Some(storage) => app.save_drawing(storage),
                        None => log::warn!("No storage available, drawing not saved"),
                    }
                }
                if ui.button("Load").clicked() {
                    match frame.storage() {
                        Some(storage) => app.load_drawing(storage),
                        None => log::warn!("No storage available, nothing to load"),
                    }
                }
            });

            if let Some(status) = app.status() {
                ui.label(status);
            }
        });
}
