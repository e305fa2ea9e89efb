//! Fixed-point angles and trigonometry.
//!
//! A full revolution is [`FULL_TURN`] units (`0x10000`). Sine and cosine are
//! returned as integers scaled by [`TRIG_MAX_RATIO`], so rotating a point is
//! pure integer math:
//!
//! ```text
//! x' = (x * cos - y * sin) / TRIG_MAX_RATIO
//! y' = (y * cos + x * sin) / TRIG_MAX_RATIO
//! ```
//!
//! Screen Y grows downward, so positive angles turn clockwise on screen.
//!
//! Values are computed with `libm` on each call, rounded to the nearest
//! fixed-point step. A frame needs a few dozen of them.

use core::f64::consts::TAU;

use embedded_graphics::geometry::Point;

/// Resolution of the angular unit circle (one full revolution).
pub const FULL_TURN: i32 = 0x1_0000;

/// Scale of [`fixed_sin`]/[`fixed_cos`] results (represents 1.0).
pub const TRIG_MAX_RATIO: i32 = 0xFFFF;

/// An angle in `[0, FULL_TURN)`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Angle(i32);

impl Angle {
    /// Zero rotation.
    pub const ZERO: Self = Self(0);

    /// Reduce any raw value into `[0, FULL_TURN)`.
    #[inline]
    pub const fn new(raw: i32) -> Self { Self(raw.rem_euclid(FULL_TURN)) }

    /// The reduced raw value.
    #[inline]
    pub const fn raw(self) -> i32 { self.0 }

    /// Angle as a fraction of a turn in radians.
    #[inline]
    fn radians(self) -> f64 { f64::from(self.0) * TAU / f64::from(FULL_TURN) }
}

/// Sine of `angle`, scaled to `[-TRIG_MAX_RATIO, TRIG_MAX_RATIO]`.
pub fn fixed_sin(angle: Angle) -> i32 { scale(libm::sin(angle.radians())) }

/// Cosine of `angle`, scaled to `[-TRIG_MAX_RATIO, TRIG_MAX_RATIO]`.
pub fn fixed_cos(angle: Angle) -> i32 { scale(libm::cos(angle.radians())) }

fn scale(ratio: f64) -> i32 { libm::round(ratio * f64::from(TRIG_MAX_RATIO)) as i32 }

/// Rotate `point` about the origin by `angle`.
///
/// Products fit comfortably in `i32` for on-screen coordinates; the division
/// truncates toward zero.
pub fn rotate_point(
    point: Point,
    angle: Angle,
) -> Point {
    let cos = fixed_cos(angle);
    let sin = fixed_sin(angle);
    Point::new(
        (point.x * cos - point.y * sin) / TRIG_MAX_RATIO,
        (point.y * cos + point.x * sin) / TRIG_MAX_RATIO,
    )
}

/// Point at `radius` from `center` in direction `angle` (0 = 3 o'clock).
pub fn polar_point(
    center: Point,
    radius: i32,
    angle: Angle,
) -> Point {
    Point::new(
        center.x + radius * fixed_cos(angle) / TRIG_MAX_RATIO,
        center.y + radius * fixed_sin(angle) / TRIG_MAX_RATIO,
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
