//! Debug menu controller
//!
//! [`DebugMenu`] owns the item tree, the navigation cursor and every debug
//! window. Each frame the host calls [`DebugMenu::update`] with the frame's
//! input, then [`DebugMenu::draw`] with a drawing surface.
//!
//! ```rust,ignore
//! let mut menu = DebugMenu::new(DebugMenuConfig::load(), TargetPlatform::current());
//! menu.init(ScreenInfo::new(1280.0, 720.0));
//!
//! menu.add_item("Cheats/Refill Health", |_| player.heal());
//! menu.register_window("Stats/Frame", WindowSpec::new(|s, _| s.label("60 fps")));
//! ```

pub mod item;
pub mod layout;
pub mod window;

mod tests;

pub use item::{FindResult, ItemContext, ItemHandler, ItemId, ItemTree, OpenOutcome};
pub use window::{DrawHandler, Interaction, Window, WindowGeometry, WindowId, WindowList, WindowSpec};

use crate::config::DebugMenuConfig;
use crate::geometry::Rect;
use crate::gesture::{TargetPlatform, VisibilityHandler, handler_for};
use crate::input::{FrameInput, PointerEvent, ScreenInfo};
use crate::prefs::{EditorGuiScale, MemoryPrefs, PrefsStore};
use crate::surface::MenuSurface;
use layout::{ROW_SPACING, pack_rows};

pub const BACK_LABEL: &str = "◀";
pub const COLLAPSE_LABEL: &str = "−";
pub const EXPAND_LABEL: &str = "+";
pub const CLOSE_LABEL: &str = "✖";
pub const BACKGROUND_ON_LABEL: &str = "Touch enabled";
pub const BACKGROUND_OFF_LABEL: &str = "Touch disabled";

/// Header width kept free of the path label for the buttons on its right
const HEADER_BUTTONS_WIDTH: f32 = 230.0;

/// Always-visible custom content under the item grid
pub type DefaultView = Box<dyn FnMut(&mut dyn MenuSurface)>;

/// Receives whether input should reach the game behind the menu
pub type BackgroundCallback = Box<dyn FnMut(bool)>;

/// What the menu panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Header, item grid and default view
    #[default]
    Full,
    /// Header only; windows stay visible
    ContentsOnly,
}

/// Registered path, returned so the caller can remove it later
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemHandle {
    path: String,
}

impl ItemHandle {
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Remove the registered path from `menu`
    pub fn dispose(self, menu: &mut DebugMenu) {
        menu.remove_item(&self.path);
    }
}

/// Header or grid click, applied once the panel is drawn
enum MenuAction {
    Back,
    ToggleBackground,
    ToggleViewMode,
    Close,
    Open(ItemId),
}

/// In-game debug menu
pub struct DebugMenu {
    config: DebugMenuConfig,
    platform: TargetPlatform,
    items: ItemTree,
    cursor: ItemId,
    windows: WindowList,
    visible: bool,
    view_mode: ViewMode,
    background_active: bool,
    on_background_change: Option<BackgroundCallback>,
    default_view: Option<DefaultView>,
    handler: Box<dyn VisibilityHandler>,
    /// Only present on editor builds
    editor_scale: Option<EditorGuiScale>,
    screen: ScreenInfo,
    screen_rect: Rect,
    draw_scale: f32,
    active: bool,
}

impl DebugMenu {
    /// Create an inactive menu; call [`DebugMenu::init`] before use
    pub fn new(config: DebugMenuConfig, platform: TargetPlatform) -> Self {
        let handler = handler_for(platform, &config);
        let editor_scale = (platform == TargetPlatform::Editor)
            .then(|| EditorGuiScale::new(Box::new(MemoryPrefs::new())));
        let windows = WindowList::new(Rect::default(), config.min_window_size());
        Self {
            config,
            platform,
            items: ItemTree::new(),
            cursor: ItemId::ROOT,
            windows,
            visible: false,
            view_mode: ViewMode::Full,
            background_active: false,
            on_background_change: None,
            default_view: None,
            handler,
            editor_scale,
            screen: ScreenInfo::default(),
            screen_rect: Rect::default(),
            draw_scale: 1.0,
            active: false,
        }
    }

    /// Back the editor GUI scale with a persistent store. Ignored off the editor.
    pub fn set_prefs(&mut self, store: Box<dyn PrefsStore>) {
        if self.platform == TargetPlatform::Editor {
            self.editor_scale = Some(EditorGuiScale::new(store));
            self.recompute_screen();
        }
    }

    /// Activate the menu for a screen. Does nothing when disabled in config.
    pub fn init(&mut self, screen: ScreenInfo) {
        if !self.config.enabled {
            tracing::info!("debug menu disabled by config");
            return;
        }
        self.active = true;
        self.screen = screen;
        self.reset();
        tracing::info!(
            "debug menu initialized ({:?}, draw scale {:.2})",
            self.platform,
            self.draw_scale
        );
    }

    /// Dispose every item and drop all windows
    pub fn shutdown(&mut self) {
        if !self.active {
            return;
        }
        let removed = self.items.clear(&mut self.windows);
        self.windows.close_all();
        self.windows.update();
        self.windows.clear_default_rect();
        self.cursor = ItemId::ROOT;
        self.visible = false;
        self.active = false;
        tracing::info!("debug menu shut down ({} items disposed)", removed.len());
    }

    /// Initialized and enabled
    pub fn is_active(&self) -> bool {
        self.active && self.config.enabled
    }

    pub fn config(&self) -> &DebugMenuConfig {
        &self.config
    }

    pub fn platform(&self) -> TargetPlatform {
        self.platform
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn cursor(&self) -> ItemId {
        self.cursor
    }

    pub fn cursor_path(&self) -> String {
        self.items.full_path(self.cursor)
    }

    pub fn items(&self) -> &ItemTree {
        &self.items
    }

    pub fn windows(&self) -> &WindowList {
        &self.windows
    }

    /// Drawable area in menu units
    pub fn screen_rect(&self) -> Rect {
        self.screen_rect
    }

    /// Pixels per menu unit
    pub fn draw_scale(&self) -> f32 {
        self.draw_scale
    }

    pub fn is_background_active(&self) -> bool {
        self.background_active
    }

    fn recompute_screen(&mut self) {
        let editor_scale = self.editor_scale.as_mut().map(EditorGuiScale::get);
        self.draw_scale = layout::draw_scale(&self.config, &self.screen, editor_scale);
        self.screen_rect = layout::screen_rect(&self.screen, self.draw_scale, self.platform);
        self.windows.set_screen_rect(self.screen_rect);
    }

    /// Recompute the screen area after a resolution or safe-area change
    pub fn reset_resolution(&mut self, screen: ScreenInfo) {
        if !self.is_active() {
            return;
        }
        self.screen = screen;
        self.recompute_screen();
    }

    /// Editor GUI scale, or `None` outside the editor
    pub fn editor_gui_scale(&mut self) -> Option<f32> {
        self.editor_scale.as_mut().map(EditorGuiScale::get)
    }

    pub fn set_editor_gui_scale(&mut self, scale: f32) {
        if let Some(editor_scale) = self.editor_scale.as_mut() {
            editor_scale.set(scale);
            self.recompute_screen();
        }
    }

    /// Register `path` with optional callbacks.
    ///
    /// Missing segments are created; an existing path gains the callbacks.
    pub fn register_item(
        &mut self,
        path: &str,
        on_execute: Option<ItemHandler>,
        on_dispose: Option<ItemHandler>,
    ) -> Option<ItemHandle> {
        if !self.is_active() {
            return None;
        }
        self.items.register(path, on_execute, on_dispose)?;
        Some(ItemHandle {
            path: path.to_string(),
        })
    }

    /// Register an action item
    pub fn add_item(
        &mut self,
        path: &str,
        on_execute: impl FnMut(&mut ItemContext<'_>) + 'static,
    ) -> Option<ItemHandle> {
        self.register_item(path, Some(Box::new(on_execute)), None)
    }

    /// Register an item that opens a window titled after the last path segment
    pub fn register_window(&mut self, path: &str, spec: WindowSpec) -> Option<ItemHandle> {
        if !self.is_active() {
            return None;
        }
        let Some(title) = path.rsplit('/').find(|s| !s.is_empty()) else {
            tracing::warn!("debug menu window path '{}' is empty, ignored", path);
            return None;
        };

        let id = self.windows.create(title, spec);
        let handle = self.register_item(
            path,
            Some(Box::new(move |ctx: &mut ItemContext<'_>| {
                ctx.windows.open(id, Some(ctx.path))
            })),
            Some(Box::new(move |ctx: &mut ItemContext<'_>| ctx.windows.detach(id))),
        );
        if handle.is_none() {
            self.windows.detach(id);
        }
        handle
    }

    /// Remove `path`, its subtree, and ancestors left empty
    pub fn remove_item(&mut self, path: &str) {
        if !self.is_active() {
            return;
        }
        let removed = self.items.remove(path, &mut self.windows);
        if removed.contains(&self.cursor) {
            self.cursor = ItemId::ROOT;
        }
    }

    fn open_id(&mut self, id: ItemId) {
        match self.items.open(id, &mut self.windows) {
            OpenOutcome::Navigated(id) => self.cursor = id,
            OpenOutcome::Executed(count) => {
                tracing::debug!("debug menu item executed: {} ({} callbacks)", self.items.full_path(id), count);
            }
            OpenOutcome::Missing => {}
        }
    }

    /// Open `path` as if its button were pressed
    pub fn open_item(&mut self, path: &str) {
        if !self.is_active() {
            return;
        }
        let result = self.items.find(path);
        if result.found {
            self.open_id(result.node);
        }
    }

    /// Close windows titled after the last segment of `path`
    pub fn close_window(&mut self, path: &str) {
        if !self.is_active() {
            return;
        }
        self.windows.close_by_path(path);
    }

    /// Move the cursor up one level
    pub fn go_back(&mut self) {
        if !self.is_active() {
            return;
        }
        if let Some(parent) = self.items.parent(self.cursor) {
            self.cursor = parent;
        }
    }

    /// Show or hide the menu.
    ///
    /// The background callback receives `!visible` unless background
    /// input was explicitly enabled from the header.
    pub fn set_visible(&mut self, visible: bool) {
        if !self.is_active() {
            return;
        }
        self.visible = visible;
        if !visible {
            self.windows.cancel_interactions();
        }
        if !self.background_active
            && let Some(callback) = self.on_background_change.as_mut()
        {
            callback(!visible);
        }
    }

    fn set_active_background(&mut self, enable: bool) {
        self.background_active = enable;
        if let Some(callback) = self.on_background_change.as_mut() {
            callback(enable);
        }
    }

    pub fn set_handler(&mut self, handler: Box<dyn VisibilityHandler>) {
        if !self.is_active() {
            return;
        }
        self.handler = handler;
    }

    /// Go back to the platform's default gesture
    pub fn set_default_handler(&mut self) {
        self.set_handler(handler_for(self.platform, &self.config));
    }

    pub fn toggle_view_mode(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::Full => ViewMode::ContentsOnly,
            ViewMode::ContentsOnly => ViewMode::Full,
        };
    }

    /// Hide the menu and return to the root in full view
    pub fn reset(&mut self) {
        if !self.is_active() {
            return;
        }
        self.recompute_screen();
        self.set_visible(false);
        self.view_mode = ViewMode::Full;
        self.cursor = ItemId::ROOT;
    }

    pub fn set_default_view(&mut self, view: impl FnMut(&mut dyn MenuSurface) + 'static) {
        if !self.is_active() {
            return;
        }
        self.default_view = Some(Box::new(view));
    }

    /// Enable the header's background input toggle
    pub fn set_background_toggle(&mut self, callback: impl FnMut(bool) + 'static) {
        if !self.is_active() {
            return;
        }
        self.on_background_change = Some(Box::new(callback));
    }

    /// Show the menu, and if it was hidden or window `name` is closed,
    /// close every window and call `on_closed`
    pub fn judge_open_window(&mut self, name: &str, on_closed: impl FnOnce()) {
        if !self.is_active() {
            return;
        }
        let mut is_closed = !self.visible;
        if is_closed {
            self.set_visible(true);
        }
        if let Some(window) = self.windows.iter().find(|w| w.title() == name) {
            is_closed |= !window.is_open();
        }
        if is_closed {
            self.windows.close_all();
            on_closed();
        }
    }

    /// Per-frame logic. Returns true if visibility toggled this frame.
    pub fn update(&mut self, input: &FrameInput, delta_time: f32) -> bool {
        if !self.is_active() {
            return false;
        }
        let toggled = self.handler.check_visible(self.visible, input, delta_time);
        if toggled {
            self.set_visible(!self.visible);
        }
        self.windows.update();
        toggled
    }

    /// Draw the menu and its windows.
    ///
    /// `pointer` holds this frame's pointer events in menu units. Returns
    /// true if a window consumed any of them.
    pub fn draw(&mut self, surface: &mut dyn MenuSurface, pointer: &[PointerEvent]) -> bool {
        if !self.is_active() || !self.visible {
            return false;
        }

        let rect = self.screen_rect;
        let items = &self.items;
        let cursor = self.cursor;
        let path = items.full_path(cursor);
        let has_background_toggle = self.on_background_change.is_some();
        let background_active = self.background_active;
        let view_mode = self.view_mode;
        let default_view = &mut self.default_view;
        let mut action = None;

        surface.panel("debug_menu", rect, &mut |s| {
            s.horizontal(&mut |s| {
                if s.button_enabled(BACK_LABEL, cursor != ItemId::ROOT) {
                    action = Some(MenuAction::Back);
                }
                s.fixed_label(&path, (rect.width() - HEADER_BUTTONS_WIDTH).max(0.0));
                if has_background_toggle {
                    let label = if background_active {
                        BACKGROUND_ON_LABEL
                    } else {
                        BACKGROUND_OFF_LABEL
                    };
                    if s.toggle_button(label, background_active) {
                        action = Some(MenuAction::ToggleBackground);
                    }
                }
                let mode_label = match view_mode {
                    ViewMode::Full => COLLAPSE_LABEL,
                    ViewMode::ContentsOnly => EXPAND_LABEL,
                };
                if s.button(mode_label) {
                    action = Some(MenuAction::ToggleViewMode);
                }
                if s.button(CLOSE_LABEL) {
                    action = Some(MenuAction::Close);
                }
            });

            if view_mode != ViewMode::Full {
                return;
            }

            let children = items.children(cursor);
            let names: Vec<&str> = children
                .iter()
                .map(|c| items.name(*c).unwrap_or_default())
                .collect();
            let widths: Vec<f32> = names.iter().map(|name| s.button_width(name)).collect();
            for row in pack_rows(&widths, rect.width()) {
                s.horizontal(&mut |s| {
                    for i in row.clone() {
                        if s.button(names[i]) {
                            action = Some(MenuAction::Open(children[i]));
                        }
                    }
                });
                s.space(ROW_SPACING);
            }

            if let Some(view) = default_view.as_mut() {
                view(s);
            }
        });

        match action {
            Some(MenuAction::Back) => self.go_back(),
            Some(MenuAction::ToggleBackground) => self.set_active_background(!self.background_active),
            Some(MenuAction::ToggleViewMode) => self.toggle_view_mode(),
            Some(MenuAction::Close) => self.reset(),
            Some(MenuAction::Open(id)) => self.open_id(id),
            None => {}
        }

        self.windows.draw(surface, pointer)
    }
}
