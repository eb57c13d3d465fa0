//! Draggable, resizable, scrollable debug windows

use std::sync::atomic::{AtomicU32, Ordering};

use glam::Vec2;

use super::layout::{BUTTON_SIZE, default_window_rect, window_bounds};
use crate::geometry::Rect;
use crate::input::PointerEvent;
use crate::surface::MenuSurface;

/// Draw callback for a window section; receives the content rectangle
pub type DrawHandler = Box<dyn FnMut(&mut dyn MenuSurface, Rect)>;

/// Text of the close button in each window's title row
pub const WINDOW_CLOSE_LABEL: &str = "✕";

static NEXT_WINDOW_ID: AtomicU32 = AtomicU32::new(0);

/// Process-wide unique window identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u32);

impl WindowId {
    fn next() -> Self {
        WindowId(NEXT_WINDOW_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// What a pointer drag currently does to the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    /// Dragging the bottom-right corner
    Resizing,
    /// Dragging the content to scroll it
    Scrolling,
    /// Dragging the title strip
    Moving,
}

/// Initial window placement
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WindowGeometry {
    /// The default rectangle derived from the screen area
    #[default]
    Default,
    /// The default rectangle with its size multiplied per axis
    Scaled(Vec2),
    /// An absolute rectangle in menu units
    Rect(Rect),
}

/// Everything needed to create a window
pub struct WindowSpec {
    pub(crate) body: DrawHandler,
    pub(crate) header: Option<DrawHandler>,
    pub(crate) footer: Option<DrawHandler>,
    pub(crate) geometry: WindowGeometry,
    pub(crate) scroll_enabled: bool,
}

impl WindowSpec {
    /// Window drawing `body` at the default size, with scrolling enabled
    pub fn new(body: impl FnMut(&mut dyn MenuSurface, Rect) + 'static) -> Self {
        Self {
            body: Box::new(body),
            header: None,
            footer: None,
            geometry: WindowGeometry::Default,
            scroll_enabled: true,
        }
    }

    /// Section drawn above the (scrolling) body
    pub fn header(mut self, header: impl FnMut(&mut dyn MenuSurface, Rect) + 'static) -> Self {
        self.header = Some(Box::new(header));
        self
    }

    /// Section drawn below the (scrolling) body
    pub fn footer(mut self, footer: impl FnMut(&mut dyn MenuSurface, Rect) + 'static) -> Self {
        self.footer = Some(Box::new(footer));
        self
    }

    pub fn rect(mut self, rect: Rect) -> Self {
        self.geometry = WindowGeometry::Rect(rect);
        self
    }

    /// Size relative to the default rectangle
    pub fn scale(mut self, scale: Vec2) -> Self {
        self.geometry = WindowGeometry::Scaled(scale);
        self
    }

    pub fn scroll(mut self, enabled: bool) -> Self {
        self.scroll_enabled = enabled;
        self
    }
}

/// A debug window bound to a menu item
pub struct Window {
    id: WindowId,
    title: String,
    rect: Rect,
    open: bool,
    header: Option<DrawHandler>,
    body: DrawHandler,
    footer: Option<DrawHandler>,
    scroll_enabled: bool,
    scroll: Vec2,
    /// Scroll accumulated by drags, applied on the next update tick
    pending_scroll: Vec2,
    interaction: Interaction,
    last_pointer: Vec2,
    /// Item path that last opened this window
    opened_from: Option<String>,
    /// The owning item was removed; collect once closed
    detached: bool,
}

impl Window {
    fn new(title: &str, rect: Rect, spec: WindowSpec) -> Self {
        Self {
            id: WindowId::next(),
            title: title.to_string(),
            rect,
            open: false,
            header: spec.header,
            body: spec.body,
            footer: spec.footer,
            scroll_enabled: spec.scroll_enabled,
            scroll: Vec2::ZERO,
            pending_scroll: Vec2::ZERO,
            interaction: Interaction::Idle,
            last_pointer: Vec2::ZERO,
            opened_from: None,
            detached: false,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    pub fn scroll_enabled(&self) -> bool {
        self.scroll_enabled
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn opened_from(&self) -> Option<&str> {
        self.opened_from.as_deref()
    }

    /// Open and pull the window back inside `bounds`
    pub fn open(&mut self, path: Option<&str>, bounds: &Rect) {
        self.open = true;
        self.rect = self.rect.fit_within(bounds);
        if let Some(path) = path {
            self.opened_from = Some(path.to_string());
        }
    }

    pub fn close(&mut self) {
        self.open = false;
        self.interaction = Interaction::Idle;
        self.scroll = Vec2::ZERO;
        self.pending_scroll = Vec2::ZERO;
    }

    /// Per-tick update: apply scroll gathered by drags since the last tick
    pub fn update(&mut self) {
        if self.open {
            self.scroll = (self.scroll + self.pending_scroll).max(Vec2::ZERO);
            self.pending_scroll = Vec2::ZERO;
        }
    }

    /// Grow or shrink by `delta`, never below `min_size`
    pub fn resize(&mut self, delta: Vec2, min_size: Vec2) {
        let size = (self.rect.size() + delta).max(min_size);
        self.rect = self.rect.with_size(size);
    }

    fn corner_rect(&self) -> Rect {
        Rect::from_min_size(self.rect.max - Vec2::splat(BUTTON_SIZE), Vec2::splat(BUTTON_SIZE))
    }

    fn title_rect(&self) -> Rect {
        Rect::from_min_size(self.rect.min, Vec2::new(self.rect.width(), BUTTON_SIZE))
    }

    /// Feed one pointer event. Returns true if the window consumed it.
    pub fn handle_pointer(&mut self, event: PointerEvent, min_size: Vec2) -> bool {
        match event {
            PointerEvent::Down(pos) => {
                if !self.open || !self.rect.contains(pos) {
                    return false;
                }
                self.interaction = if self.corner_rect().contains(pos) {
                    Interaction::Resizing
                } else if self.title_rect().contains(pos) {
                    Interaction::Moving
                } else if self.scroll_enabled {
                    Interaction::Scrolling
                } else {
                    Interaction::Idle
                };
                self.last_pointer = pos;
                true
            }
            PointerEvent::Move(pos) => {
                let delta = pos - self.last_pointer;
                match self.interaction {
                    Interaction::Idle => return false,
                    Interaction::Resizing => self.resize(delta, min_size),
                    Interaction::Scrolling => self.pending_scroll.y -= delta.y,
                    Interaction::Moving => self.rect = self.rect.translate(delta),
                }
                self.last_pointer = pos;
                true
            }
            PointerEvent::Up(_) => {
                let was_active = self.interaction != Interaction::Idle;
                self.interaction = Interaction::Idle;
                was_active
            }
        }
    }

    /// Draw the window frame and its sections. Returns true if the close button was hit.
    fn draw(&mut self, surface: &mut dyn MenuSurface) -> bool {
        let content_rect = Rect::from_min_size(Vec2::ZERO, self.rect.size());
        let mut close_clicked = false;
        let mut scroll = self.scroll;

        let header = &mut self.header;
        let body = &mut self.body;
        let footer = &mut self.footer;
        let scroll_enabled = self.scroll_enabled;
        let id = self.id;
        let title = self.title.as_str();

        surface.window(id, title, self.rect, &mut |s| {
            s.horizontal(&mut |s| {
                s.fixed_label(title, content_rect.width() - BUTTON_SIZE * 2.0);
                if s.button(WINDOW_CLOSE_LABEL) {
                    close_clicked = true;
                }
            });

            if let Some(header) = header.as_mut() {
                header(s, content_rect);
            }

            if scroll_enabled {
                scroll = s.scroll_area(&format!("debug_window_scroll_{}", id.0), scroll, &mut |s| {
                    body(s, content_rect);
                });
            } else {
                body(s, content_rect);
            }

            if let Some(footer) = footer.as_mut() {
                footer(s, content_rect);
            }
        });

        self.scroll = scroll;
        close_clicked
    }
}

/// All windows registered with the menu, in draw order (last is topmost)
pub struct WindowList {
    windows: Vec<Window>,
    screen_rect: Rect,
    default_rect: Option<Rect>,
    min_size: Vec2,
}

impl WindowList {
    pub fn new(screen_rect: Rect, min_size: Vec2) -> Self {
        Self {
            windows: Vec::new(),
            screen_rect,
            default_rect: None,
            min_size,
        }
    }

    /// Update the screen area windows are kept inside.
    ///
    /// The default rectangle stays as first computed for the session.
    pub fn set_screen_rect(&mut self, screen_rect: Rect) {
        self.screen_rect = screen_rect;
    }

    /// Default window rectangle, computed once and cached
    pub fn default_rect(&mut self) -> Rect {
        *self
            .default_rect
            .get_or_insert_with(|| default_window_rect(&self.screen_rect))
    }

    /// Create a closed window and return its id
    pub fn create(&mut self, title: &str, spec: WindowSpec) -> WindowId {
        let rect = match spec.geometry {
            WindowGeometry::Rect(rect) => rect,
            WindowGeometry::Default => self.default_rect(),
            WindowGeometry::Scaled(scale) => {
                let default = self.default_rect();
                default.with_size(default.size() * scale)
            }
        };
        let window = Window::new(title, rect, spec);
        let id = window.id;
        self.windows.push(window);
        id
    }

    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Window> {
        self.windows.iter()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn open(&mut self, id: WindowId, path: Option<&str>) {
        let bounds = window_bounds(&self.screen_rect);
        if let Some(window) = self.get_mut(id) {
            window.open(path, &bounds);
            tracing::debug!("debug window '{}' opened", window.title);
        }
    }

    pub fn close(&mut self, id: WindowId) {
        if let Some(window) = self.get_mut(id) {
            window.close();
        }
    }

    /// Close and mark for collection; called when the owning item goes away
    pub fn detach(&mut self, id: WindowId) {
        if let Some(window) = self.get_mut(id) {
            window.close();
            window.detached = true;
        }
    }

    /// Drop any latched move/resize/scroll; the pointer-up will not arrive
    pub fn cancel_interactions(&mut self) {
        for window in &mut self.windows {
            window.interaction = Interaction::Idle;
        }
    }

    /// Forget the cached default rectangle so the next session recomputes it
    pub fn clear_default_rect(&mut self) {
        self.default_rect = None;
    }

    pub fn close_all(&mut self) {
        for window in &mut self.windows {
            window.close();
        }
    }

    /// Close open windows titled after the last segment of `path`.
    ///
    /// A window that remembers the path it was opened from is only closed
    /// when that path matches.
    pub fn close_by_path(&mut self, path: &str) {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let Some(title) = segments.last().copied() else {
            return;
        };
        let path = segments.join("/");
        for window in &mut self.windows {
            if !window.open || window.title != title {
                continue;
            }
            if window.opened_from.as_deref().is_some_and(|from| from != path) {
                continue;
            }
            window.close();
        }
    }

    /// Is the window with this title open?
    pub fn is_title_open(&self, title: &str) -> bool {
        self.windows.iter().any(|w| w.title == title && w.open)
    }

    /// Apply deferred scroll and drop detached windows that are closed
    pub fn update(&mut self) {
        for window in &mut self.windows {
            window.update();
        }
        self.windows.retain(|w| !(w.detached && !w.open));
    }

    /// Route pointer events to the open windows, topmost first.
    ///
    /// A window that claims a pointer-down is raised to the top. Returns
    /// true if any event was consumed.
    pub fn handle_pointer(&mut self, events: &[PointerEvent]) -> bool {
        let mut consumed = false;
        for &event in events {
            let hit = self
                .windows
                .iter_mut()
                .rev()
                .position(|w| w.handle_pointer(event, self.min_size));

            if let Some(rev_index) = hit {
                consumed = true;
                if matches!(event, PointerEvent::Down(_)) {
                    let index = self.windows.len() - 1 - rev_index;
                    let window = self.windows.remove(index);
                    self.windows.push(window);
                }
            }
        }
        consumed
    }

    /// Draw every open window, then let them handle this frame's pointer events
    pub fn draw(&mut self, surface: &mut dyn MenuSurface, events: &[PointerEvent]) -> bool {
        for window in self.windows.iter_mut().filter(|w| w.open) {
            if window.draw(surface) {
                window.close();
            }
        }
        self.handle_pointer(events)
    }
}
