//! Screen-space rectangles in menu units

use glam::Vec2;

/// Axis-aligned rectangle, `min` inclusive and `max` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle from position and size components
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::from_min_size(Vec2::new(x, y), Vec2::new(width, height))
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// True if the rectangle has no area
    pub fn is_degenerate(&self) -> bool {
        self.width() <= f32::EPSILON || self.height() <= f32::EPSILON
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }

    /// Same size, moved by `delta`
    pub fn translate(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Same position, new size
    pub fn with_size(&self, size: Vec2) -> Self {
        Self::from_min_size(self.min, size)
    }

    /// Shrink each edge inwards by the given amounts
    pub fn inset(&self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            min: self.min + Vec2::new(left, top),
            max: self.max - Vec2::new(right, bottom),
        }
    }

    /// Divide both corners by a uniform scale
    pub fn unscale(&self, scale: f32) -> Self {
        Self {
            min: self.min / scale,
            max: self.max / scale,
        }
    }

    /// Fit this rectangle inside `bounds`.
    ///
    /// The size is kept when it fits and shrunk to the bounds otherwise;
    /// the position is then shifted so that no edge leaves the bounds.
    pub fn fit_within(&self, bounds: &Rect) -> Self {
        let size = self.size().min(bounds.size()).max(Vec2::ZERO);
        let max_min = (bounds.max - size).max(bounds.min);
        let min = self.min.clamp(bounds.min, max_min);
        Self::from_min_size(min, size)
    }
}

impl From<Rect> for egui::Rect {
    fn from(rect: Rect) -> Self {
        egui::Rect::from_min_max(
            egui::pos2(rect.min.x, rect.min.y),
            egui::pos2(rect.max.x, rect.max.y),
        )
    }
}

impl From<egui::Rect> for Rect {
    fn from(rect: egui::Rect) -> Self {
        Self {
            min: Vec2::new(rect.min.x, rect.min.y),
            max: Vec2::new(rect.max.x, rect.max.y),
        }
    }
}
