//! Unit-tagged geometry values: Scalar, Unit (px, %, far-edge, center).

use std::fmt;

/// How a geometry value is interpreted against the parent box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Absolute pixels.
    Pixel,
    /// Fraction of the parent dimension, stored as `percent / 100`.
    Percent,
    /// Flush against the parent's far edge (right or bottom).
    Far,
    /// Centered within the parent.
    Center,
}

/// The axis a scalar is laid out on. Needed to name alignment keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A numeric value with its unit, e.g. `12px`, `50%`, `right`, `center`.
///
/// Alignment units carry a value of `0.0` so that every scalar is a complete
/// `(value, unit)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scalar {
    pub value: f32,
    pub unit: Unit,
}

impl Scalar {
    /// Create a scalar in pixels.
    pub const fn px(value: f32) -> Self {
        Self {
            value,
            unit: Unit::Pixel,
        }
    }

    /// Create a scalar from a percentage (`50.0` means half the parent).
    pub fn percent(percent: f32) -> Self {
        Self {
            value: percent / 100.0,
            unit: Unit::Percent,
        }
    }

    /// Create a scalar from a fraction of the parent (`0.5` means half).
    pub const fn fraction(value: f32) -> Self {
        Self {
            value,
            unit: Unit::Percent,
        }
    }

    /// A scalar aligned to the parent's far edge.
    pub const fn far() -> Self {
        Self {
            value: 0.0,
            unit: Unit::Far,
        }
    }

    /// A scalar centered in the parent.
    pub const fn center() -> Self {
        Self {
            value: 0.0,
            unit: Unit::Center,
        }
    }

    /// Returns `true` for the two alignment units.
    pub fn is_alignment(&self) -> bool {
        matches!(self.unit, Unit::Far | Unit::Center)
    }

    /// Render in stylesheet syntax for the given axis.
    ///
    /// Alignment units need the axis to pick `right`/`bottom` and
    /// `center`/`middle`; numeric units ignore it.
    pub fn to_css(&self, axis: Axis) -> String {
        match (self.unit, axis) {
            (Unit::Far, Axis::Horizontal) => "right".to_owned(),
            (Unit::Far, Axis::Vertical) => "bottom".to_owned(),
            (Unit::Center, Axis::Horizontal) => "center".to_owned(),
            (Unit::Center, Axis::Vertical) => "middle".to_owned(),
            _ => self.to_string(),
        }
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Scalar::px(0.0)
    }
}

/// Write a float without a trailing `.0` for whole numbers.
fn write_number(f: &mut fmt::Formatter<'_>, value: f32) -> fmt::Result {
    if value.fract() == 0.0 {
        write!(f, "{}", value as i64)
    } else {
        write!(f, "{}", value)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::Pixel => {
                write_number(f, self.value)?;
                write!(f, "px")
            }
            Unit::Percent => {
                write_number(f, self.value * 100.0)?;
                write!(f, "%")
            }
            Unit::Far => write!(f, "far"),
            Unit::Center => write!(f, "center"),
        }
    }
}
