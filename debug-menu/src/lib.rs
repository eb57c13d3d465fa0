//! Nethercore Debug Menu - In-game debug overlay
//!
//! Games register slash-separated paths at runtime; each path becomes a
//! button in a hierarchical menu. Leaves run callbacks or open draggable,
//! resizable debug windows. The menu is shown and hidden with a keyboard
//! chord on desktop or a multi-finger hold on handheld devices.
//!
//! # Architecture
//!
//! - [`DebugMenu`] - Controller: item tree, navigation cursor, windows
//! - [`ItemTree`] - Path-addressed arena of menu items
//! - [`WindowList`] - Debug windows with move/resize/scroll interaction
//! - [`VisibilityHandler`] - Per-frame gesture deciding when to toggle
//! - [`MenuSurface`] - Drawing primitives, implemented for egui by [`EguiSurface`]
//! - [`EguiFrontend`] - Feeds egui input into the menu and draws it

pub mod config;
pub mod frontend;
pub mod geometry;
pub mod gesture;
pub mod input;
pub mod menu;
pub mod prefs;
pub mod surface;
#[cfg(test)]
pub mod test_utils;

pub use config::{ConfigError, DebugMenuConfig, GestureStrategy, MenuOpenChord, TouchGestureConfig};
pub use frontend::EguiFrontend;
pub use geometry::Rect;
pub use gesture::{KeyChordHandler, TargetPlatform, TouchHoldHandler, VisibilityHandler, handler_for};
pub use input::{FrameInput, Modifiers, PointerEvent, ScreenInfo};
pub use menu::{
    DebugMenu, ItemContext, ItemHandle, ItemHandler, ItemId, ItemTree, ViewMode, Window, WindowGeometry,
    WindowId, WindowList, WindowSpec,
};
pub use prefs::{EditorGuiScale, FilePrefs, MemoryPrefs, PrefsError, PrefsStore};
pub use surface::{EguiSurface, MenuSurface};
