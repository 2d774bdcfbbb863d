//! Rectangles used for frames, work areas and zone indicators.
#![allow(clippy::module_name_repetitions)]
use serde::{Deserialize, Serialize};

/// A rectangle. x,y from top left.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, Copy, Hash)]
pub struct Xyhw {
    x: i32,
    y: i32,
    h: i32,
    w: i32,
}

/// Modifiable struct that can be used to generate an Xyhw struct.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, Copy)]
pub struct XyhwBuilder {
    pub x: i32,
    pub y: i32,
    pub h: i32,
    pub w: i32,
}

impl From<XyhwBuilder> for Xyhw {
    fn from(xywh: XyhwBuilder) -> Self {
        Self {
            x: xywh.x,
            y: xywh.y,
            w: xywh.w.max(0),
            h: xywh.h.max(0),
        }
    }
}

impl Xyhw {
    #[must_use]
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        XyhwBuilder { x, y, h, w }.into()
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }
    #[must_use]
    pub const fn h(&self) -> i32 {
        self.h
    }
    #[must_use]
    pub const fn w(&self) -> i32 {
        self.w
    }

    /// The first x coordinate past the right edge.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    /// The first y coordinate past the bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn set_x(&mut self, value: i32) {
        self.x = value;
    }
    pub fn set_y(&mut self, value: i32) {
        self.y = value;
    }
    pub fn set_h(&mut self, value: i32) {
        self.h = value.max(0);
    }
    pub fn set_w(&mut self, value: i32) {
        self.w = value.max(0);
    }

    #[must_use]
    pub const fn same_size(&self, other: &Self) -> bool {
        self.w == other.w && self.h == other.h
    }

    #[must_use]
    pub const fn translate(mut self, dx: i32, dy: i32) -> Self {
        self.x += dx;
        self.y += dy;
        self
    }

    #[must_use]
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        (self.x <= x && x < self.right()) && (self.y <= y && y < self.bottom())
    }

    /// Shrink horizontally by `left` and `right`, vertically by `top` and `bottom`.
    #[must_use]
    pub fn inset(&self, top: i32, right: i32, bottom: i32, left: i32) -> Self {
        XyhwBuilder {
            x: self.x + left,
            y: self.y + top,
            w: self.w - left - right,
            h: self.h - top - bottom,
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_sizes_are_clamped_to_zero() {
        let rect = Xyhw::new(10, 10, -5, -1);
        assert_eq!(rect.w(), 0);
        assert_eq!(rect.h(), 0);
    }

    #[test]
    fn contains_point_excludes_the_far_edges() {
        let rect = Xyhw::new(0, 0, 300, 200);
        assert!(rect.contains_point(0, 0));
        assert!(rect.contains_point(299, 199));
        assert!(!rect.contains_point(300, 100));
        assert!(!rect.contains_point(100, 200));
    }

    #[test]
    fn inset_should_trim_every_side() {
        let rect = Xyhw::new(0, 0, 1000, 800).inset(30, 10, 20, 10);
        assert_eq!(rect, Xyhw::new(10, 30, 980, 750));
    }

    #[test]
    fn translate_keeps_the_size() {
        let rect = Xyhw::new(5, 5, 10, 10).translate(-5, 20);
        assert_eq!(rect, Xyhw::new(0, 25, 10, 10));
        assert!(rect.same_size(&Xyhw::new(100, 100, 10, 10)));
    }
}
