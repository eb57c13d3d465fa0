//! Test double for [`MenuSurface`]

use std::ops::RangeInclusive;

use glam::Vec2;

use crate::geometry::Rect;
use crate::menu::WindowId;
use crate::surface::{AddContents, MenuSurface};

/// Approximate glyph width used for button measurement
const CHAR_WIDTH: f32 = 8.0;

/// Records what was drawn and answers scripted clicks.
///
/// A scripted click fires once, on the first enabled button (or toggle)
/// whose text matches.
#[derive(Debug, Default)]
pub struct ScriptedSurface {
    pub labels: Vec<String>,
    /// Button text and whether it was enabled
    pub buttons: Vec<(String, bool)>,
    /// Toggle text and its on/off state
    pub toggles: Vec<(String, bool)>,
    pub panels: Vec<Rect>,
    pub windows: Vec<(WindowId, String, Rect)>,
    pub scroll_areas: usize,
    /// Number of horizontal rows opened
    pub rows: usize,
    clicks: Vec<String>,
    typed: Option<String>,
}

impl ScriptedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Click the button labelled `text` once
    pub fn click(mut self, text: &str) -> Self {
        self.clicks.push(text.to_string());
        self
    }

    /// Replace the contents of the next text field
    pub fn typing(mut self, text: &str) -> Self {
        self.typed = Some(text.to_string());
        self
    }

    pub fn button_enabled_state(&self, text: &str) -> Option<bool> {
        self.buttons
            .iter()
            .find(|(t, _)| t == text)
            .map(|(_, enabled)| *enabled)
    }

    fn take_click(&mut self, text: &str) -> bool {
        match self.clicks.iter().position(|c| c == text) {
            Some(index) => {
                self.clicks.remove(index);
                true
            }
            None => false,
        }
    }
}

impl MenuSurface for ScriptedSurface {
    fn label(&mut self, text: &str) {
        self.labels.push(text.to_string());
    }

    fn fixed_label(&mut self, text: &str, _width: f32) {
        self.labels.push(text.to_string());
    }

    fn button_enabled(&mut self, text: &str, enabled: bool) -> bool {
        self.buttons.push((text.to_string(), enabled));
        enabled && self.take_click(text)
    }

    fn toggle_button(&mut self, text: &str, on: bool) -> bool {
        self.toggles.push((text.to_string(), on));
        self.take_click(text)
    }

    fn button_width(&mut self, text: &str) -> f32 {
        text.chars().count() as f32 * CHAR_WIDTH + CHAR_WIDTH
    }

    fn horizontal(&mut self, add: AddContents<'_>) {
        self.rows += 1;
        add(self);
    }

    fn space(&mut self, _amount: f32) {}

    fn slider_f32(&mut self, _value: &mut f32, _range: RangeInclusive<f32>) -> bool {
        false
    }

    fn slider_i32(&mut self, _value: &mut i32, _range: RangeInclusive<i32>) -> bool {
        false
    }

    fn text_field(&mut self, text: &mut String) -> bool {
        match self.typed.take() {
            Some(typed) => {
                *text = typed;
                true
            }
            None => false,
        }
    }

    fn scroll_area(&mut self, _id: &str, offset: Vec2, add: AddContents<'_>) -> Vec2 {
        self.scroll_areas += 1;
        add(self);
        offset
    }

    fn panel(&mut self, _id: &str, rect: Rect, add: AddContents<'_>) {
        self.panels.push(rect);
        add(self);
    }

    fn window(&mut self, id: WindowId, title: &str, rect: Rect, add: AddContents<'_>) {
        self.windows.push((id, title.to_string(), rect));
        add(self);
    }
}
