//! Core geometry types: Point, Size, Region.
//!
//! All coordinates are absolute screen pixels as `f32`, matching what the host
//! canvas consumes. A [`Region`] is the resolved box of an element.

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A position in screen pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size in pixels (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Convert to a [`Region`] positioned at the origin.
    #[inline]
    pub const fn to_region(self) -> Region {
        Region { left: 0.0, top: 0.0, width: self.width, height: self.height }
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A rectangular box defined by its top-left corner and size.
///
/// Layout produces one absolute `Region` per element; the same region is handed
/// to the canvas for the element's paint primitives and used for hit-testing.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Region {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    /// An empty region at the origin.
    pub const EMPTY: Region = Region { left: 0.0, top: 0.0, width: 0.0, height: 0.0 };

    /// Create a new region.
    #[inline]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// The right edge (exclusive): `left + width`.
    #[inline]
    pub fn right(self) -> f32 {
        self.left + self.width
    }

    /// The bottom edge (exclusive): `top + height`.
    #[inline]
    pub fn bottom(self) -> f32 {
        self.top + self.height
    }

    /// The top-left corner.
    #[inline]
    pub const fn origin(self) -> Point {
        Point { x: self.left, y: self.top }
    }

    /// Whether the point lies inside this region. Left/top edges are inclusive,
    /// right/bottom edges exclusive.
    #[inline]
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right() && point.y >= self.top && point.y < self.bottom()
    }

    /// Shift the region by `offset`.
    #[inline]
    pub fn translate(self, offset: Point) -> Region {
        Region { left: self.left + offset.x, top: self.top + offset.y, ..self }
    }
}
