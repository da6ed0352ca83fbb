use crate::export;
use crate::history::History;
use crate::model::{Point, Rgb, Tool};
use crate::session::{
    BrushSelection, InputState, PointerEvent, PointerKind, PointerPhase, PointerSource,
};
use crate::settings::{Settings, MAX_WIDTH, MIN_WIDTH};
use crate::surface::Surface;
use eframe::egui;
use std::path::PathBuf;

/// Maps one raw egui event onto the pointer protocol, converting the logical
/// position into device pixels. Events that cannot start, move or end a
/// stroke map to `None`.
fn pointer_event_from(event: &egui::Event, pixels_per_point: f32) -> Option<PointerEvent> {
    let scale = |pos: egui::Pos2| Point::new(pos.x * pixels_per_point, pos.y * pixels_per_point);
    match event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            ..
        } => {
            let phase = if *pressed {
                PointerPhase::Down(scale(*pos))
            } else {
                PointerPhase::Up
            };
            Some(PointerEvent {
                source: PointerSource::new(PointerKind::Mouse, 0),
                phase,
            })
        }
        egui::Event::PointerMoved(pos) => Some(PointerEvent {
            source: PointerSource::new(PointerKind::Mouse, 0),
            phase: PointerPhase::Moved(scale(*pos)),
        }),
        egui::Event::PointerGone => Some(PointerEvent {
            source: PointerSource::new(PointerKind::Mouse, 0),
            phase: PointerPhase::Leave,
        }),
        egui::Event::Touch { id, phase, pos, .. } => {
            let phase = match phase {
                egui::TouchPhase::Start => PointerPhase::Down(scale(*pos)),
                egui::TouchPhase::Move => PointerPhase::Moved(scale(*pos)),
                egui::TouchPhase::End => PointerPhase::Up,
                egui::TouchPhase::Cancel => PointerPhase::Leave,
            };
            Some(PointerEvent {
                source: PointerSource::new(PointerKind::Touch, id.0),
                phase,
            })
        }
        _ => None,
    }
}

/// The logical position of an event that would start a stroke. Used to keep
/// presses on the toolbar from reaching the canvas.
fn press_pos(event: &egui::Event) -> Option<egui::Pos2> {
    match event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed: true,
            ..
        } => Some(*pos),
        egui::Event::Touch {
            phase: egui::TouchPhase::Start,
            pos,
            ..
        } => Some(*pos),
        _ => None,
    }
}

/// Drawing window state: the pixel surface, the stroke history and the live
/// toolbar selection. The surface is mirrored into an egui texture whenever
/// its pixels change.
pub struct InkboardApp {
    settings: Settings,
    settings_path: PathBuf,
    surface: Surface,
    history: History,
    input: InputState,
    texture: Option<egui::TextureHandle>,
    texture_dirty: bool,
    toolbar_rect: Option<egui::Rect>,
    settings_dirty: bool,
    status: Option<String>,
}

impl InkboardApp {
    pub fn new(settings: Settings, settings_path: PathBuf) -> Self {
        Self {
            settings,
            settings_path,
            surface: Surface::new(0, 0, 1.0),
            history: History::default(),
            input: InputState::new(),
            texture: None,
            texture_dirty: true,
            toolbar_rect: None,
            settings_dirty: false,
            status: None,
        }
    }

    fn brush(&self) -> BrushSelection {
        BrushSelection {
            tool: self.settings.tool,
            color: self.settings.color,
            width: self.settings.width,
            opacity: self.settings.opacity_for(self.settings.tool),
        }
    }

    fn command_undo(&mut self) {
        if self.input.is_drawing() || !self.history.undo() {
            return;
        }
        self.surface.replay(&self.history);
        self.texture_dirty = true;
    }

    fn command_redo(&mut self) {
        if self.input.is_drawing() || !self.history.redo() {
            return;
        }
        self.surface.replay(&self.history);
        self.texture_dirty = true;
    }

    fn command_clear(&mut self) {
        if self.input.is_drawing() || self.history.is_empty() {
            return;
        }
        self.history.clear();
        self.surface.replay(&self.history);
        self.texture_dirty = true;
    }

    fn command_export(&mut self) {
        match export::export_snapshot(&self.surface) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "snapshot exported");
                self.status = Some(format!("Saved {}", path.display()));
            }
            Err(err) => {
                tracing::error!("snapshot export failed: {err:#}");
                self.status = Some(format!("Save failed: {err:#}"));
            }
        }
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        let undo =
            ctx.input(|i| i.key_pressed(egui::Key::Z) && i.modifiers.ctrl && !i.modifiers.shift);
        let redo = ctx.input(|i| {
            (i.key_pressed(egui::Key::Y) && i.modifiers.ctrl)
                || (i.key_pressed(egui::Key::Z) && i.modifiers.ctrl && i.modifiers.shift)
        });
        let export = ctx.input(|i| i.key_pressed(egui::Key::S) && i.modifiers.ctrl);
        if undo {
            self.command_undo();
        }
        if redo {
            self.command_redo();
        }
        if export {
            self.command_export();
        }
    }

    fn pump_pointer_events(&mut self, ctx: &egui::Context, pixels_per_point: f32) {
        let brush = self.brush();
        let events = ctx.input(|i| i.events.clone());
        for event in &events {
            if let Some(pos) = press_pos(event) {
                // The toolbar rect is one frame old, which is close enough
                // to keep its clicks off the canvas.
                if self.toolbar_rect.map_or(false, |rect| rect.contains(pos)) {
                    continue;
                }
            }
            let Some(pointer) = pointer_event_from(event, pixels_per_point) else {
                continue;
            };
            let outcome =
                self.input
                    .handle_event(pointer, brush, &mut self.surface, &mut self.history);
            if outcome.repainted() {
                self.texture_dirty = true;
            }
        }
    }

    fn upload_texture(&mut self, ctx: &egui::Context) {
        if !self.texture_dirty || self.surface.width() == 0 || self.surface.height() == 0 {
            return;
        }
        let size = [self.surface.width() as usize, self.surface.height() as usize];
        let image = egui::ColorImage::from_rgba_unmultiplied(size, self.surface.pixels());
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture("canvas", image, egui::TextureOptions::NEAREST))
            }
        }
        self.texture_dirty = false;
    }

    fn paint_canvas(&self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                if let Some(texture) = &self.texture {
                    ui.painter().image(
                        texture.id(),
                        ui.ctx().screen_rect(),
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }
            });
    }

    fn toolbar(&mut self, ctx: &egui::Context) {
        let window = egui::Window::new("Tools")
            .default_pos(egui::pos2(16.0, 16.0))
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.selectable_value(&mut self.settings.tool, Tool::Pen, "Pen");
                    ui.selectable_value(&mut self.settings.tool, Tool::Highlighter, "Highlighter");
                    ui.selectable_value(&mut self.settings.tool, Tool::Eraser, "Eraser");
                });
                ui.separator();
                ui.horizontal_wrapped(|ui| {
                    let palette = self.settings.palette.clone();
                    for (idx, color) in palette.iter().enumerate() {
                        let fill = egui::Color32::from_rgb(color.r, color.g, color.b);
                        let mut button = egui::Button::new(format!("{}", idx + 1))
                            .fill(fill)
                            .stroke(egui::Stroke::new(1.0, egui::Color32::BLACK));
                        if self.settings.color == *color {
                            button = button.stroke(egui::Stroke::new(2.0, egui::Color32::WHITE));
                        }
                        if ui.add(button).clicked() {
                            self.settings.color = *color;
                        }
                    }
                    let mut rgb = self.settings.color.to_array();
                    if ui.color_edit_button_srgb(&mut rgb).changed() {
                        self.settings.color = Rgb::from_array(rgb);
                    }
                });
                ui.add(
                    egui::Slider::new(&mut self.settings.width, MIN_WIDTH..=MAX_WIDTH)
                        .text("Width"),
                );
                ui.add(
                    egui::Slider::new(&mut self.settings.pen_opacity, 0..=100).text("Pen opacity"),
                );
                ui.add(
                    egui::Slider::new(&mut self.settings.highlighter_opacity, 0..=100)
                        .text("Highlighter opacity"),
                );
                ui.separator();
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(self.history.can_undo(), egui::Button::new("Undo"))
                        .clicked()
                    {
                        self.command_undo();
                    }
                    if ui
                        .add_enabled(self.history.can_redo(), egui::Button::new("Redo"))
                        .clicked()
                    {
                        self.command_redo();
                    }
                    if ui.button("Clear").clicked() {
                        self.command_clear();
                    }
                    if ui.button("Save PNG").clicked() {
                        self.command_export();
                    }
                });
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.label(status);
                }
            });
        if let Some(window) = window {
            self.toolbar_rect = Some(window.response.rect);
        }
    }

    fn flush_settings(&mut self, ctx: &egui::Context) {
        if self.settings_dirty && !ctx.input(|i| i.pointer.any_down()) {
            if let Err(err) = self.settings.save(&self.settings_path) {
                tracing::warn!("failed to save settings: {err:#}");
            }
            self.settings_dirty = false;
        }
    }
}

impl eframe::App for InkboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let screen = ctx.screen_rect();
        let pixels_per_point = ctx.pixels_per_point();
        if self
            .surface
            .resize(screen.width(), screen.height(), pixels_per_point)
        {
            self.surface.replay(&self.history);
            if let Some(session) = self.input.session() {
                session.repaint(&mut self.surface);
            }
            self.texture_dirty = true;
        }

        self.handle_keyboard(ctx);
        self.pump_pointer_events(ctx, pixels_per_point);
        self.upload_texture(ctx);
        self.paint_canvas(ctx);

        let before = self.settings.clone();
        self.toolbar(ctx);
        if self.settings != before {
            self.settings_dirty = true;
        }
        self.flush_settings(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        let _ = self.settings.save(&self.settings_path);
    }
}
