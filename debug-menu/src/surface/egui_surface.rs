//! [`MenuSurface`] on top of egui

use std::ops::RangeInclusive;

use glam::Vec2;

use super::{AddContents, MenuSurface};
use crate::geometry::Rect;
use crate::menu::WindowId;
use crate::menu::layout::BUTTON_SIZE;

const TOGGLE_ON: egui::Color32 = egui::Color32::from_rgb(60, 140, 70);
const TOGGLE_OFF: egui::Color32 = egui::Color32::from_rgb(90, 90, 90);

/// Draws menu content into an egui [`egui::Ui`]
pub struct EguiSurface<'a> {
    ui: &'a mut egui::Ui,
}

impl<'a> EguiSurface<'a> {
    pub fn new(ui: &'a mut egui::Ui) -> Self {
        Self { ui }
    }
}

fn pos(v: Vec2) -> egui::Pos2 {
    egui::pos2(v.x, v.y)
}

impl MenuSurface for EguiSurface<'_> {
    fn label(&mut self, text: &str) {
        self.ui.label(text);
    }

    fn fixed_label(&mut self, text: &str, width: f32) {
        self.ui
            .add_sized([width.max(0.0), BUTTON_SIZE], egui::Label::new(text).truncate());
    }

    fn button_enabled(&mut self, text: &str, enabled: bool) -> bool {
        self.ui.add_enabled(enabled, egui::Button::new(text)).clicked()
    }

    fn toggle_button(&mut self, text: &str, on: bool) -> bool {
        let fill = if on { TOGGLE_ON } else { TOGGLE_OFF };
        self.ui.add(egui::Button::new(text).fill(fill)).clicked()
    }

    fn button_width(&mut self, text: &str) -> f32 {
        let font = egui::TextStyle::Button.resolve(self.ui.style());
        let text_width = self.ui.fonts_mut(|f| {
            f.layout_no_wrap(text.to_string(), font, egui::Color32::PLACEHOLDER)
                .size()
                .x
        });
        text_width + self.ui.spacing().button_padding.x * 2.0
    }

    fn horizontal(&mut self, add: AddContents<'_>) {
        self.ui.horizontal(|ui| add(&mut EguiSurface::new(ui)));
    }

    fn space(&mut self, amount: f32) {
        self.ui.add_space(amount);
    }

    fn slider_f32(&mut self, value: &mut f32, range: RangeInclusive<f32>) -> bool {
        self.ui.add(egui::Slider::new(value, range)).changed()
    }

    fn slider_i32(&mut self, value: &mut i32, range: RangeInclusive<i32>) -> bool {
        self.ui.add(egui::Slider::new(value, range)).changed()
    }

    fn text_field(&mut self, text: &mut String) -> bool {
        self.ui.add(egui::TextEdit::singleline(text)).changed()
    }

    fn scroll_area(&mut self, id: &str, offset: Vec2, add: AddContents<'_>) -> Vec2 {
        let output = egui::ScrollArea::vertical()
            .id_salt(id)
            .auto_shrink([false, false])
            .vertical_scroll_offset(offset.y)
            .show(self.ui, |ui| add(&mut EguiSurface::new(ui)));
        Vec2::new(output.state.offset.x, output.state.offset.y)
    }

    fn panel(&mut self, id: &str, rect: Rect, add: AddContents<'_>) {
        let ctx = self.ui.ctx().clone();
        egui::Area::new(egui::Id::new(id))
            .fixed_pos(pos(rect.min))
            .order(egui::Order::Middle)
            .show(&ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_max_width(rect.width());
                    add(&mut EguiSurface::new(ui));
                });
            });
    }

    fn window(&mut self, id: WindowId, _title: &str, rect: Rect, add: AddContents<'_>) {
        let ctx = self.ui.ctx().clone();
        egui::Area::new(egui::Id::new(("debug_menu_window", id.0)))
            .fixed_pos(pos(rect.min))
            .order(egui::Order::Foreground)
            .show(&ctx, |ui| {
                egui::Frame::window(ui.style()).show(ui, |ui| {
                    let size = egui::vec2(rect.width(), rect.height());
                    ui.set_min_size(size);
                    ui.set_max_size(size);
                    add(&mut EguiSurface::new(ui));

                    // Resize grip in the bottom-right corner
                    let grip = egui::Rect::from_min_size(
                        pos(rect.max - Vec2::splat(BUTTON_SIZE)),
                        egui::vec2(BUTTON_SIZE, BUTTON_SIZE),
                    );
                    let stroke = ui.visuals().widgets.noninteractive.fg_stroke;
                    ui.painter().line_segment([grip.right_top(), grip.left_bottom()], stroke);
                });
            });
    }
}
