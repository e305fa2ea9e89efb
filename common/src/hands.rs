//! Hand outlines and the per-frame rotate-and-translate transform.
//!
//! Each hand is a closed polygon relative to the pivot, pointing down
//! (+Y) at rotation 0. Shapes are `'static` and never change; a [`HandPath`]
//! pairs a shape with the current pivot and produces screen-space points for
//! any angle without mutating itself, so rendering stays read-only.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Triangle};
use heapless::Vec;

use crate::trig::{Angle, rotate_point};

/// Largest number of points in any hand outline.
pub const MAX_HAND_POINTS: usize = 4;

// =============================================================================
// Hand Shapes
// =============================================================================

/// Second hand: a single stroke with a short tail.
pub const SECOND_HAND_POINTS: [Point; 2] = [Point::new(0, -14), Point::new(0, 62)];

/// Minute hand: a long 6 px wide bar.
pub const MINUTE_HAND_POINTS: [Point; 4] =
    [Point::new(-3, -12), Point::new(-3, 62), Point::new(3, 62), Point::new(3, -12)];

/// Hour hand: a shorter 6 px wide bar.
pub const HOUR_HAND_POINTS: [Point; 4] =
    [Point::new(-3, -10), Point::new(-3, 45), Point::new(3, 45), Point::new(3, -10)];

/// Which hand a shape belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HandKind {
    Second,
    Minute,
    Hour,
}

impl HandKind {
    /// Outline points of this hand, relative to the pivot.
    pub const fn points(self) -> &'static [Point] {
        match self {
            Self::Second => &SECOND_HAND_POINTS,
            Self::Minute => &MINUTE_HAND_POINTS,
            Self::Hour => &HOUR_HAND_POINTS,
        }
    }
}

// =============================================================================
// Hand Path
// =============================================================================

/// A hand outline anchored at a pivot.
#[derive(Clone, Copy, Debug)]
pub struct HandPath {
    kind: HandKind,
    pivot: Point,
}

impl HandPath {
    /// Anchor the outline of `kind` at `pivot`.
    pub const fn new(
        kind: HandKind,
        pivot: Point,
    ) -> Self {
        Self { kind, pivot }
    }

    #[inline]
    pub const fn kind(&self) -> HandKind { self.kind }

    #[inline]
    pub const fn pivot(&self) -> Point { self.pivot }

    /// Move the path to a new pivot.
    pub fn move_to(
        &mut self,
        pivot: Point,
    ) {
        self.pivot = pivot;
    }

    /// Outline points rotated by `angle` and translated to the pivot.
    pub fn points_at(
        &self,
        angle: Angle,
    ) -> Vec<Point, MAX_HAND_POINTS> {
        self.kind
            .points()
            .iter()
            .map(|&point| rotate_point(point, angle) + self.pivot)
            .collect()
    }

    /// Fill the polygon at `angle`.
    ///
    /// Hand outlines are convex, so a triangle fan from the first point
    /// covers the interior. Degenerate (two-point) paths draw their segment.
    pub fn draw_filled<D>(
        &self,
        target: &mut D,
        angle: Angle,
        color: D::Color,
    ) where
        D: DrawTarget,
    {
        let points = self.points_at(angle);
        let style = PrimitiveStyle::with_fill(color);
        match points.as_slice() {
            [first, rest @ ..] if rest.len() >= 2 => {
                for pair in rest.windows(2) {
                    Triangle::new(*first, pair[0], pair[1]).into_styled(style).draw(target).ok();
                }
            }
            _ => self.draw_outline(target, angle, color),
        }
    }

    /// Stroke the closed outline at `angle` with a 1 px line.
    ///
    /// Each edge is drawn once; a two-point path is a single segment rather
    /// than the same segment twice.
    pub fn draw_outline<D>(
        &self,
        target: &mut D,
        angle: Angle,
        color: D::Color,
    ) where
        D: DrawTarget,
    {
        let points = self.points_at(angle);
        let style = PrimitiveStyle::with_stroke(color, 1);
        match points.as_slice() {
            [] => {}
            [only] => {
                Pixel(*only, color).draw(target).ok();
            }
            [start, end] => {
                Line::new(*start, *end).into_styled(style).draw(target).ok();
            }
            all => {
                for (i, start) in all.iter().enumerate() {
                    let end = all[(i + 1) % all.len()];
                    Line::new(*start, end).into_styled(style).draw(target).ok();
                }
            }
        }
    }
}

// =============================================================================
// Hand Set
// =============================================================================

/// The three hand paths sharing one pivot: the display's center.
///
/// Created once at startup; [`HandSet::set_bounds`] re-anchors the paths if
/// the display bounds ever change.
#[derive(Clone, Copy, Debug)]
pub struct HandSet {
    pub second: HandPath,
    pub minute: HandPath,
    pub hour: HandPath,
}

impl HandSet {
    /// Anchor all hands at the center of `bounds`.
    pub fn new(bounds: Size) -> Self {
        let pivot = pivot_for(bounds);
        Self {
            second: HandPath::new(HandKind::Second, pivot),
            minute: HandPath::new(HandKind::Minute, pivot),
            hour: HandPath::new(HandKind::Hour, pivot),
        }
    }

    /// Shared pivot of all hands.
    #[inline]
    pub const fn pivot(&self) -> Point { self.hour.pivot() }

    /// Re-anchor all hands for new display bounds.
    pub fn set_bounds(
        &mut self,
        bounds: Size,
    ) {
        let pivot = pivot_for(bounds);
        self.second.move_to(pivot);
        self.minute.move_to(pivot);
        self.hour.move_to(pivot);
    }
}

/// Geometric center of a display of size `bounds`.
pub const fn pivot_for(bounds: Size) -> Point { Point::new(bounds.width as i32 / 2, bounds.height as i32 / 2) }

// =============================================================================
// Unit Tests
// =============================================================================
