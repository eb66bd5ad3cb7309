use egui::{Pos2, Rect};

/// Integer 2D vector; y grows downwards
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IVec2 {
    pub x: i32,
    pub y: i32,
}

impl IVec2 {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned Bounding Box with integer coordinates.
///
/// `left`/`top` are inclusive, `right()`/`bottom()` are exclusive, so a box of width 10 at
/// left 0 has its right edge at 10.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AaBB {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl AaBB {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub fn center(&self) -> Pos2 {
        Pos2::new(
            self.left as f32 + self.width as f32 / 2.0,
            self.top as f32 + self.height as f32 / 2.0,
        )
    }

    pub fn translate(&self, value: IVec2) -> Self {
        AaBB {
            left: self.left + value.x,
            top: self.top + value.y,
            ..*self
        }
    }

    /// True if both boxes share interior area; touching edges do not count.
    pub fn overlaps(&self, other: &AaBB) -> bool {
        if self.width <= 0 || self.height <= 0 || other.width <= 0 || other.height <= 0 {
            return false;
        }
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    pub fn to_rect(&self) -> Rect {
        Rect::from_min_max(
            Pos2::new(self.left as f32, self.top as f32),
            Pos2::new(self.right() as f32, self.bottom() as f32),
        )
    }
}
