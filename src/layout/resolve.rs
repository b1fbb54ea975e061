//! Scalar → absolute box resolution.
//!
//! Pure functions: given an element's style and its parent's absolute box,
//! compute the element's absolute box. Each axis is resolved independently.

use crate::css::scalar::{Scalar, Unit};
use crate::css::styles::Style;
use crate::geometry::Region;

/// Resolve a `left`/`top` scalar against the parent extent.
///
/// - `Pixel` -> value as-is
/// - `Percent` -> fraction of the parent extent
/// - `Far` -> the parent extent (pulled back inside by the clamp)
/// - `Center` -> 0 (resolved once the size is known)
pub fn resolve_position(scalar: &Scalar, parent: f32) -> f32 {
    match scalar.unit {
        Unit::Pixel => scalar.value,
        Unit::Percent => scalar.value * parent,
        Unit::Far => parent,
        Unit::Center => 0.0,
    }
}

/// Resolve a `width`/`height` scalar against the parent extent.
///
/// Alignment units are not valid sizes and fill the parent.
pub fn resolve_extent(scalar: &Scalar, parent: f32) -> f32 {
    let size = match scalar.unit {
        Unit::Pixel => scalar.value,
        Unit::Percent => scalar.value * parent,
        Unit::Far | Unit::Center => parent,
    };
    size.max(0.0)
}

/// Keep `position + size` within `parent`.
///
/// A far-aligned box is shifted inward; any other box is shrunk. The result
/// always satisfies `position + size <= parent` and `size >= 0`.
pub fn clamp_axis(position: f32, size: f32, parent: f32, far: bool) -> (f32, f32) {
    let parent = parent.max(0.0);
    let (mut position, mut size) = (position, size.max(0.0));

    if position + size > parent {
        if far {
            size = size.min(parent);
            position = parent - size;
        } else {
            size = parent - position;
        }
    }
    if size < 0.0 {
        size = 0.0;
        position = position.min(parent);
    }
    (position, size)
}

/// Resolve one axis to a parent-relative `(position, size)` pair.
pub fn resolve_axis(position: &Scalar, extent: &Scalar, parent: f32) -> (f32, f32) {
    let size = resolve_extent(extent, parent);
    match position.unit {
        Unit::Center => {
            let size = size.min(parent.max(0.0));
            clamp_axis((parent - size) / 2.0, size, parent, false)
        }
        Unit::Far => clamp_axis(resolve_position(position, parent), size, parent, true),
        Unit::Pixel | Unit::Percent => {
            clamp_axis(resolve_position(position, parent), size, parent, false)
        }
    }
}

/// Resolve a style's geometry into an absolute box inside `parent`.
pub fn resolve_region(style: &Style, parent: Region) -> Region {
    let (left, width) = resolve_axis(style.left.get(), style.width.get(), parent.width);
    let (top, height) = resolve_axis(style.top.get(), style.height.get(), parent.height);
    Region::new(left, top, width, height).translate(parent.origin())
}
