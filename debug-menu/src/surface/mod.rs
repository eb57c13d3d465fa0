//! Drawing surface the menu and its windows render through
//!
//! The controller only needs a small immediate-mode vocabulary: labels,
//! buttons, a few value editors, a scroll viewport, and positioned panels.
//! [`EguiSurface`] implements it on top of an `egui::Ui`.

mod egui_surface;
pub mod widgets;

use std::ops::RangeInclusive;

use glam::Vec2;

use crate::geometry::Rect;
use crate::menu::WindowId;

pub use egui_surface::EguiSurface;

/// Nested content callback
pub type AddContents<'a> = &'a mut dyn FnMut(&mut dyn MenuSurface);

/// Immediate-mode drawing primitives, in menu units
pub trait MenuSurface {
    fn label(&mut self, text: &str);

    /// Label occupying exactly `width`, truncated if longer
    fn fixed_label(&mut self, text: &str, width: f32);

    fn button(&mut self, text: &str) -> bool {
        self.button_enabled(text, true)
    }

    /// Button that can be greyed out; a disabled button never reports a click
    fn button_enabled(&mut self, text: &str, enabled: bool) -> bool;

    /// Button tinted by its on/off state
    fn toggle_button(&mut self, text: &str, on: bool) -> bool;

    /// Width a button showing `text` would take
    fn button_width(&mut self, text: &str) -> f32;

    fn horizontal(&mut self, add: AddContents<'_>);

    fn space(&mut self, amount: f32);

    /// Returns true when the value changed
    fn slider_f32(&mut self, value: &mut f32, range: RangeInclusive<f32>) -> bool;

    fn slider_i32(&mut self, value: &mut i32, range: RangeInclusive<i32>) -> bool;

    fn text_field(&mut self, text: &mut String) -> bool;

    /// Vertical scroll viewport starting at `offset`; returns the offset after this frame
    fn scroll_area(&mut self, id: &str, offset: Vec2, add: AddContents<'_>) -> Vec2;

    /// Borderless panel at an absolute rect (the menu body)
    fn panel(&mut self, id: &str, rect: Rect, add: AddContents<'_>);

    /// Framed window at an absolute rect
    fn window(&mut self, id: WindowId, title: &str, rect: Rect, add: AddContents<'_>);
}
