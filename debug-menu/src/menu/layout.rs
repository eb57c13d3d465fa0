//! Screen area, draw scale and button-grid layout

use std::ops::Range;

use glam::Vec2;

use crate::config::DebugMenuConfig;
use crate::geometry::Rect;
use crate::gesture::TargetPlatform;
use crate::input::ScreenInfo;

/// Size of header buttons and window corner handles
pub const BUTTON_SIZE: f32 = 24.0;

/// Horizontal room reserved per grid button on top of its measured width
pub const BUTTON_SPACING: f32 = 18.0;

/// Vertical gap between grid rows
pub const ROW_SPACING: f32 = 5.0;

/// Gap kept between windows and the screen edges
pub const WINDOW_MARGIN: f32 = 5.0;

/// Height of the menu header, which windows stay below
pub const HEADER_HEIGHT: f32 = BUTTON_SIZE * 2.0;

/// Status bar height avoided on handheld devices, in pixels
pub const STATUS_BAR_HEIGHT: f32 = 40.0;

/// Lower bound for the effective base DPI
pub const MIN_BASE_DPI: f32 = 30.0;

/// Scale used when neither DPI nor screen height are usable
pub const FALLBACK_DRAW_SCALE: f32 = 2.0;

/// Pixels per menu unit.
///
/// `editor_scale` is the persisted editor GUI scale and only applies to
/// editor builds.
pub fn draw_scale(config: &DebugMenuConfig, screen: &ScreenInfo, editor_scale: Option<f32>) -> f32 {
    if let Some(dpi) = screen.dpi.filter(|dpi| *dpi > 0.0) {
        let base_dpi = config.base_dpi / editor_scale.unwrap_or(1.0);
        return dpi / base_dpi.max(MIN_BASE_DPI);
    }

    if let Some(scale) = editor_scale {
        return scale;
    }

    if config.base_screen_height > 0 && screen.size.y > 0.0 {
        screen.size.y / config.base_screen_height as f32
    } else {
        FALLBACK_DRAW_SCALE
    }
}

/// Drawable screen area in menu units
pub fn screen_rect(screen: &ScreenInfo, draw_scale: f32, platform: TargetPlatform) -> Rect {
    let full = Rect::from_min_size(Vec2::ZERO, screen.size);
    let mut area = screen
        .safe_area
        .filter(|area| !area.is_degenerate())
        .unwrap_or(full);

    if platform.is_handheld() && area.min.y < STATUS_BAR_HEIGHT {
        area.min.y = STATUS_BAR_HEIGHT;
    }

    area.unscale(draw_scale)
}

/// Default window rectangle: the screen area below the header, inset by the margin
pub fn default_window_rect(screen_rect: &Rect) -> Rect {
    screen_rect.inset(WINDOW_MARGIN, HEADER_HEIGHT, WINDOW_MARGIN, WINDOW_MARGIN)
}

/// Area windows are kept inside when opened
pub fn window_bounds(screen_rect: &Rect) -> Rect {
    default_window_rect(screen_rect)
}

/// Greedy row wrapping for the item button grid.
///
/// Buttons are placed left to right; a new row starts when the running
/// width (each button plus [`BUTTON_SPACING`]) would exceed `available`.
/// A button wider than the whole row still gets a row of its own.
pub fn pack_rows(widths: &[f32], available: f32) -> Vec<Range<usize>> {
    let mut rows = Vec::new();
    let mut start = 0;
    let mut row_width = 0.0;

    for (i, width) in widths.iter().enumerate() {
        row_width += width + BUTTON_SPACING;
        if row_width > available && i > start {
            rows.push(start..i);
            start = i;
            row_width = width + BUTTON_SPACING;
        }
    }

    if start < widths.len() {
        rows.push(start..widths.len());
    }
    rows
}
