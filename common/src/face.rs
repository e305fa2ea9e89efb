//! Analog face rendering.
//!
//! Draws one complete frame of the face into a [`Framebuffer`]. Order is
//! fixed and matters:
//!
//! 1. Hour-marker dots (true trigonometric angles, no dial offset)
//! 2. Hour hand: fill, then outline
//! 3. Minute hand: fill, then outline
//! 4. Second hand: outline through the inverting composite (optional)
//! 5. Pivot: outer foreground circle, inner background circle
//!
//! The second hand must follow the filled hands so its inversion shows
//! against both the white hands and the black background, and the pivot
//! goes last so nothing covers it.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle};

use crate::angles::ClockAngles;
use crate::colors::{BACKGROUND, FOREGROUND, HAND_STROKE, SECOND_HAND_STROKE};
use crate::config::{
    MARKER_CIRCLE_RADIUS,
    MARKER_COUNT,
    MARKER_DOT_RADIUS,
    PIVOT_INNER_RADIUS,
    PIVOT_OUTER_RADIUS,
};
use crate::framebuffer::Framebuffer;
use crate::hands::{HandPath, HandSet};
use crate::trig::{Angle, FULL_TURN, polar_point};

/// Draws the face from read-only hand geometry and angles.
pub struct FaceRenderer<'a> {
    hands: &'a HandSet,
    show_second_hand: bool,
}

impl<'a> FaceRenderer<'a> {
    pub const fn new(
        hands: &'a HandSet,
        show_second_hand: bool,
    ) -> Self {
        Self { hands, show_second_hand }
    }

    /// Render a full frame. The framebuffer is cleared first.
    pub fn draw(
        &self,
        fb: &mut Framebuffer,
        angles: &ClockAngles,
    ) {
        fb.clear(BACKGROUND).ok();

        let pivot = self.hands.pivot();
        draw_hour_markers(fb, pivot);

        draw_solid_hand(fb, &self.hands.hour, angles.hour);
        draw_solid_hand(fb, &self.hands.minute, angles.minute);

        if self.show_second_hand {
            draw_inverted_hand(fb, &self.hands.second, angles.second);
        }

        draw_pivot(fb, pivot);
    }
}

/// Twelve evenly spaced filled dots around the pivot.
pub fn draw_hour_markers<D>(
    display: &mut D,
    pivot: Point,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = PrimitiveStyle::with_fill(FOREGROUND);
    for i in 0..MARKER_COUNT {
        let angle = Angle::new(i * FULL_TURN / MARKER_COUNT);
        let center = polar_point(pivot, MARKER_CIRCLE_RADIUS, angle);
        Circle::with_center(center, 2 * MARKER_DOT_RADIUS + 1)
            .into_styled(style)
            .draw(display)
            .ok();
    }
}

/// White fill with a black outline.
fn draw_solid_hand<D>(
    display: &mut D,
    path: &HandPath,
    angle: Angle,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    path.draw_filled(display, angle, FOREGROUND);
    path.draw_outline(display, angle, HAND_STROKE);
}

/// Stroke the outline so every touched pixel inverts what is already there.
fn draw_inverted_hand(
    fb: &mut Framebuffer,
    path: &HandPath,
    angle: Angle,
) {
    let mut mask = Framebuffer::new();
    path.draw_outline(&mut mask, angle, SECOND_HAND_STROKE);
    fb.invert_masked(&mask);
}

/// Two-tier pivot cap drawn over the hands.
pub fn draw_pivot<D>(
    display: &mut D,
    pivot: Point,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    Circle::with_center(pivot, 2 * PIVOT_OUTER_RADIUS + 1)
        .into_styled(PrimitiveStyle::with_fill(FOREGROUND))
        .draw(display)
        .ok();
    Circle::with_center(pivot, 2 * PIVOT_INNER_RADIUS + 1)
        .into_styled(PrimitiveStyle::with_fill(BACKGROUND))
        .draw(display)
        .ok();
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angles::WallTime;
    use crate::config::SCREEN_SIZE;

    fn render(
        time: WallTime,
        show_second_hand: bool,
    ) -> Framebuffer {
        let hands = HandSet::new(SCREEN_SIZE);
        let mut fb = Framebuffer::new();
        FaceRenderer::new(&hands, show_second_hand).draw(&mut fb, &ClockAngles::from_time(time));
        fb
    }

    fn lit(
        fb: &Framebuffer,
        x: i32,
        y: i32,
    ) -> bool {
        fb.pixel(Point::new(x, y)) == Some(BinaryColor::On)
    }

    #[test]
    fn test_marker_dots() {
        let fb = render(WallTime::new(0, 0, 0), true);
        assert!(lit(&fb, 141, 84)); // 3 o'clock marker
        assert!(lit(&fb, 72, 153)); // 6 o'clock marker
        assert!(lit(&fb, 3, 84)); // 9 o'clock marker
        assert!(lit(&fb, 72, 15)); // 12 o'clock marker
        assert!(!lit(&fb, 141, 90));
    }

    #[test]
    fn test_pivot_has_dark_center() {
        let fb = render(WallTime::new(0, 0, 0), true);
        assert!(!lit(&fb, 72, 84));
        assert!(lit(&fb, 76, 84));
        assert!(lit(&fb, 68, 84));
    }

    #[test]
    fn test_minute_hand_points_up_at_top_of_hour() {
        let fb = render(WallTime::new(6, 0, 30), false);
        // Minute hand interior above the pivot, hour hand points down
        assert!(lit(&fb, 72, 50));
        assert!(lit(&fb, 72, 120));
        assert!(!lit(&fb, 100, 84));
    }

    #[test]
    fn test_second_hand_inverts_filled_hand() {
        let without = render(WallTime::new(0, 0, 0), false);
        let with = render(WallTime::new(0, 0, 0), true);

        // Over the white minute hand the second hand stroke goes dark
        assert!(lit(&without, 72, 50));
        assert!(!lit(&with, 72, 50));
    }

    #[test]
    fn test_second_hand_lights_background() {
        let without = render(WallTime::new(0, 0, 0), false);
        let with = render(WallTime::new(0, 0, 0), true);

        // Tail below the pivot and the other hands: background becomes lit
        assert!(!lit(&without, 72, 97));
        assert!(lit(&with, 72, 97));
    }

    #[test]
    fn test_second_hand_disabled_leaves_face_unchanged() {
        let without = render(WallTime::new(0, 0, 15), false);
        let with = render(WallTime::new(0, 0, 15), true);
        assert!(without != with);
        let again = render(WallTime::new(0, 0, 15), false);
        assert!(without == again);
    }

    #[test]
    fn test_pivot_drawn_over_second_hand() {
        let fb = render(WallTime::new(0, 0, 0), true);
        // Second hand passes through the pivot but the cap stays intact
        assert!(!lit(&fb, 72, 84));
        assert!(lit(&fb, 72, 80));
    }
}
