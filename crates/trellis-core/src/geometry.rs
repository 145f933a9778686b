//! Pixel-space geometry and the widget-local to device transform.
//!
//! All layout happens in integer pixels with Y growing downward. Boxes are
//! stored as edges rather than origin + size so that intersections can go
//! "inverted" without overflow; an inverted box is simply empty.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub const ZERO: PixelSize = PixelSize {
        width: 0,
        height: 0,
    };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum.
    pub fn max(self, other: PixelSize) -> PixelSize {
        PixelSize {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Component-wise minimum.
    pub fn min(self, other: PixelSize) -> PixelSize {
        PixelSize {
            width: self.width.min(other.width),
            height: self.height.min(other.height),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Axis-aligned pixel box.
///
/// `right >= left` and `bottom >= top` are expected but not enforced: an
/// inverted box is legal and behaves as a zero-area box everywhere.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelBBox {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl PixelBBox {
    pub const EMPTY: PixelBBox = PixelBBox {
        left: 0,
        right: 0,
        top: 0,
        bottom: 0,
    };

    pub const fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Box of `size` with its top-left corner at `origin`.
    pub fn at(origin: PixelPoint, size: PixelSize) -> Self {
        Self {
            left: origin.x,
            right: origin.x.saturating_add(to_i32(size.width)),
            top: origin.y,
            bottom: origin.y.saturating_add(to_i32(size.height)),
        }
    }

    /// Box of `size` anchored at (0, 0).
    pub fn from_size(size: PixelSize) -> Self {
        Self::at(PixelPoint::default(), size)
    }

    pub fn width(&self) -> u32 {
        (i64::from(self.right) - i64::from(self.left)).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (i64::from(self.bottom) - i64::from(self.top)).max(0) as u32
    }

    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width(), self.height())
    }

    pub fn origin(&self) -> PixelPoint {
        PixelPoint::new(self.left, self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, p: PixelPoint) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }

    /// Overlap of two boxes. Disjoint boxes produce an inverted (empty) box.
    pub fn intersect(&self, other: &PixelBBox) -> PixelBBox {
        PixelBBox {
            left: self.left.max(other.left),
            right: self.right.min(other.right),
            top: self.top.max(other.top),
            bottom: self.bottom.min(other.bottom),
        }
    }

    /// Smallest box covering both. Empty boxes do not contribute.
    pub fn union(&self, other: &PixelBBox) -> PixelBBox {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        PixelBBox {
            left: self.left.min(other.left),
            right: self.right.max(other.right),
            top: self.top.min(other.top),
            bottom: self.bottom.max(other.bottom),
        }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> PixelBBox {
        PixelBBox {
            left: self.left.saturating_add(dx),
            right: self.right.saturating_add(dx),
            top: self.top.saturating_add(dy),
            bottom: self.bottom.saturating_add(dy),
        }
    }

    /// A box of `size` centered inside `self`.
    ///
    /// Padding is split with truncating division, so an odd difference puts
    /// the extra pixel on the right/bottom side.
    pub fn centered(&self, size: PixelSize) -> PixelBBox {
        let pad_x = (i64::from(self.width()) - i64::from(size.width)) / 2;
        let pad_y = (i64::from(self.height()) - i64::from(size.height)) / 2;
        let origin = PixelPoint::new(
            self.left.saturating_add(clamp_i32(pad_x)),
            self.top.saturating_add(clamp_i32(pad_y)),
        );
        PixelBBox::at(origin, size)
    }

    pub fn center(&self) -> Vec2 {
        Vec2 {
            x: (self.left as f32 + self.right as f32) * 0.5,
            y: (self.top as f32 + self.bottom as f32) * 0.5,
        }
    }
}

pub(crate) fn to_i32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

fn clamp_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// 2D affine transform without rotation or shear.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub scale_x: f32,
    pub scale_y: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }

    pub fn apply_to_point(&self, p: Vec2) -> Vec2 {
        Vec2 {
            x: p.x * self.scale_x + self.translate_x,
            y: p.y * self.scale_y + self.translate_y,
        }
    }

    /// `self` applied after `inner`.
    pub fn combine(&self, inner: &Transform) -> Transform {
        Transform {
            scale_x: self.scale_x * inner.scale_x,
            scale_y: self.scale_y * inner.scale_y,
            translate_x: self.scale_x * inner.translate_x + self.translate_x,
            translate_y: self.scale_y * inner.translate_y + self.translate_y,
        }
    }
}

/// Maps a widget's local square `[-1, 1]²` onto normalized device space.
///
/// Scale is `bounds / window` per axis, the translation moves the widget
/// center relative to the window center, and Y is flipped because device
/// space grows upward. A zero-sized window is treated as one pixel wide.
pub fn widget_to_clip_transform(bounds: PixelBBox, window: PixelBBox) -> Transform {
    let window_w = window.width().max(1) as f32;
    let window_h = window.height().max(1) as f32;
    let bc = bounds.center();
    let wc = window.center();
    Transform {
        scale_x: bounds.width() as f32 / window_w,
        scale_y: bounds.height() as f32 / window_h,
        translate_x: (bc.x - wc.x) / (window_w * 0.5),
        translate_y: -(bc.y - wc.y) / (window_h * 0.5),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(l: i32, r: i32, t: i32, b: i32) -> PixelBBox {
        PixelBBox::new(l, r, t, b)
    }

    #[test]
    fn inverted_box_is_empty() {
        let b = bbox(10, 5, 0, 10);
        assert!(b.is_empty());
        assert_eq!(b.width(), 0);
        assert!(!b.contains(PixelPoint::new(7, 5)));
    }

    #[test]
    fn disjoint_intersection_is_empty() {
        let a = bbox(0, 10, 0, 10);
        let b = bbox(20, 30, 0, 10);
        assert!(a.intersect(&b).is_empty());
        assert_eq!(a.intersect(&bbox(5, 15, 5, 15)), bbox(5, 10, 5, 10));
    }

    #[test]
    fn union_skips_empty() {
        let a = bbox(0, 10, 0, 10);
        assert_eq!(a.union(&PixelBBox::EMPTY), a);
        assert_eq!(a.union(&bbox(5, 20, -5, 3)), bbox(0, 20, -5, 10));
    }

    #[test]
    fn contains_is_half_open() {
        let a = bbox(0, 10, 0, 10);
        assert!(a.contains(PixelPoint::new(0, 0)));
        assert!(a.contains(PixelPoint::new(9, 9)));
        assert!(!a.contains(PixelPoint::new(10, 5)));
        assert!(!a.contains(PixelPoint::new(5, 10)));
    }

    #[test]
    fn centering_truncates_odd_padding() {
        let outer = bbox(0, 11, 0, 10);
        let inner = outer.centered(PixelSize::new(4, 4));
        // 7 pixels of slack: 3 on the left, 4 on the right.
        assert_eq!(inner, bbox(3, 7, 3, 7));
    }

    #[test]
    fn centering_larger_child_overhangs() {
        let outer = bbox(0, 10, 0, 10);
        let inner = outer.centered(PixelSize::new(13, 10));
        assert_eq!(inner, bbox(-1, 12, 0, 10));
    }

    #[test]
    fn full_window_transform_is_identity() {
        let w = bbox(0, 800, 0, 600);
        let t = widget_to_clip_transform(w, w);
        assert_eq!(t, Transform::identity());
    }

    #[test]
    fn top_left_quadrant_transform() {
        let window = bbox(0, 100, 0, 100);
        let t = widget_to_clip_transform(bbox(0, 50, 0, 50), window);
        assert_eq!(t.scale_x, 0.5);
        assert_eq!(t.scale_y, 0.5);
        assert_eq!(t.translate_x, -0.5);
        assert_eq!(t.translate_y, 0.5);
        // local top-left corner lands on the device top-left corner
        let p = t.apply_to_point(Vec2::new(-1.0, 1.0));
        assert_eq!(p, Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn combine_applies_inner_first() {
        let inner = Transform {
            scale_x: 2.0,
            scale_y: 2.0,
            translate_x: 1.0,
            translate_y: 0.0,
        };
        let outer = Transform {
            scale_x: 0.5,
            scale_y: 1.0,
            translate_x: 0.0,
            translate_y: 3.0,
        };
        let p = Vec2::new(1.0, 1.0);
        assert_eq!(
            outer.combine(&inner).apply_to_point(p),
            outer.apply_to_point(inner.apply_to_point(p))
        );
    }
}
