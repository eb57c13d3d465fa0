//! Visibility gesture detection
//!
//! Decides, once per frame, whether the menu visibility should flip.
//! Two strategies exist: an edge-triggered keyboard chord for desktop and
//! editor builds, and a timed multi-touch hold for handheld devices.

use crate::config::{DebugMenuConfig, GestureStrategy, MenuOpenChord, TouchGestureConfig};
use crate::input::FrameInput;

/// Build target family, chosen once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetPlatform {
    /// Development build inside a tool; GUI scale comes from preferences
    Editor,
    /// Standalone desktop build
    Desktop,
    /// Phone or tablet
    Handheld,
}

impl TargetPlatform {
    /// Platform family of the current compilation target
    pub fn current() -> Self {
        if cfg!(any(target_os = "android", target_os = "ios")) {
            TargetPlatform::Handheld
        } else {
            TargetPlatform::Desktop
        }
    }

    pub fn is_handheld(self) -> bool {
        self == TargetPlatform::Handheld
    }
}

/// Strategy deciding when the menu visibility toggles
pub trait VisibilityHandler {
    /// Called once per update. Returning true flips the menu visibility.
    fn check_visible(&mut self, visible: bool, input: &FrameInput, delta_time: f32) -> bool;
}

/// Pick the handler for a platform according to the configured strategy
pub fn handler_for(platform: TargetPlatform, config: &DebugMenuConfig) -> Box<dyn VisibilityHandler> {
    let strategy = match config.gesture {
        GestureStrategy::Auto if platform.is_handheld() => GestureStrategy::TouchHold,
        GestureStrategy::Auto => GestureStrategy::KeyChord,
        other => other,
    };

    match strategy {
        GestureStrategy::TouchHold => Box::new(TouchHoldHandler::new(config.touch.clone())),
        _ => Box::new(KeyChordHandler::new(&config.menu_open)),
    }
}

/// Modifier + key chord, optionally also right-click
#[derive(Debug, Clone)]
pub struct KeyChordHandler {
    shift: bool,
    alt: bool,
    control_or_command: bool,
    /// `None` when the configured key name is unknown; the chord then never fires
    key: Option<egui::Key>,
    right_click: bool,
}

impl KeyChordHandler {
    pub fn new(chord: &MenuOpenChord) -> Self {
        let key = egui::Key::from_name(&chord.key);
        if key.is_none() {
            tracing::warn!("unknown debug menu key '{}', keyboard toggle disabled", chord.key);
        }
        Self {
            shift: chord.shift,
            alt: chord.alt,
            control_or_command: chord.control_or_command,
            key,
            right_click: chord.right_click,
        }
    }

    fn chord_pressed(&self, input: &FrameInput) -> bool {
        let Some(key) = self.key else {
            return false;
        };
        let m = input.modifiers;
        if self.shift && !m.shift {
            return false;
        }
        if self.alt && !m.alt {
            return false;
        }
        if self.control_or_command && !m.control_or_command() {
            return false;
        }
        input.key_pressed(key)
    }
}

impl VisibilityHandler for KeyChordHandler {
    fn check_visible(&mut self, _visible: bool, input: &FrameInput, _delta_time: f32) -> bool {
        self.chord_pressed(input) || (self.right_click && input.secondary_released)
    }
}

/// Hold N fingers for a while; more fingers hold for less time
#[derive(Debug, Clone)]
pub struct TouchHoldHandler {
    thresholds: TouchGestureConfig,
    touch_time: f32,
}

impl TouchHoldHandler {
    pub fn new(thresholds: TouchGestureConfig) -> Self {
        Self {
            thresholds,
            touch_time: 0.0,
        }
    }

    /// Seconds accumulated towards the toggle
    pub fn touch_time(&self) -> f32 {
        self.touch_time
    }
}

impl VisibilityHandler for TouchHoldHandler {
    fn check_visible(&mut self, _visible: bool, input: &FrameInput, delta_time: f32) -> bool {
        let t = &self.thresholds;
        let mut delta = delta_time;

        if input.touch_count < t.toggle_touch_count {
            delta = 0.0;
            self.touch_time = 0.0;
        } else if input.touch_count >= t.fast_touch_count {
            delta *= t.toggle_touch_time / t.fast_touch_time;
        }

        self.touch_time += delta;
        self.touch_time - delta < t.toggle_touch_time && self.touch_time >= t.toggle_touch_time
    }
}
