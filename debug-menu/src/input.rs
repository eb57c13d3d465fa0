//! Per-frame input snapshot consumed by the menu
//!
//! The frontend fills a [`FrameInput`] once per frame from whatever
//! windowing layer it sits on; the menu core never queries input itself.

use glam::Vec2;
use smallvec::SmallVec;

use crate::geometry::Rect;

/// Modifier keys held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    /// Command key on macOS
    pub command: bool,
}

impl Modifiers {
    pub fn control_or_command(&self) -> bool {
        self.ctrl || self.command
    }
}

impl From<egui::Modifiers> for Modifiers {
    fn from(m: egui::Modifiers) -> Self {
        Self {
            shift: m.shift,
            alt: m.alt,
            ctrl: m.ctrl,
            command: m.mac_cmd,
        }
    }
}

/// Primary pointer (mouse or first touch) event in menu units
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up(Vec2),
}

impl PointerEvent {
    pub fn pos(&self) -> Vec2 {
        match *self {
            PointerEvent::Down(p) | PointerEvent::Move(p) | PointerEvent::Up(p) => p,
        }
    }
}

/// Screen geometry reported by the platform, in physical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenInfo {
    pub size: Vec2,
    /// Area not covered by notches or system bars; `None` means the full screen
    pub safe_area: Option<Rect>,
    /// Display DPI, if the platform knows it
    pub dpi: Option<f32>,
}

impl ScreenInfo {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            safe_area: None,
            dpi: None,
        }
    }

    pub fn with_safe_area(mut self, safe_area: Rect) -> Self {
        self.safe_area = Some(safe_area);
        self
    }

    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = Some(dpi);
        self
    }
}

impl Default for ScreenInfo {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Everything the menu needs to know about this frame's input
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub modifiers: Modifiers,
    /// Keys that went down this frame (repeats excluded)
    pub pressed_keys: SmallVec<[egui::Key; 4]>,
    /// Secondary mouse button was released this frame
    pub secondary_released: bool,
    /// Touches currently in contact with the screen
    pub touch_count: usize,
    /// Primary pointer events in arrival order, in menu units
    pub pointer: SmallVec<[PointerEvent; 4]>,
}

impl FrameInput {
    pub fn key_pressed(&self, key: egui::Key) -> bool {
        self.pressed_keys.contains(&key)
    }
}
