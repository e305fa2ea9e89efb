//! Rectangle property animation.
//!
//! The overlay state machine only asks for slides; hosts own the clock and
//! run each slide through a [`RectAnimation`], moving the layer frame every
//! frame until the animation completes.
//!
//! # Easing
//!
//! Slides use a cosine ease-in-out so icons accelerate off the edge and
//! settle gently:
//!
//! ```text
//! t      = clamp((elapsed - delay) / duration, 0, 1)
//! eased  = 0.5 - 0.5 * cos(pi * t)
//! frame  = from + (to - from) * eased
//! ```
//!
//! Only the top-left corner and size are interpolated; both end frames are
//! returned exactly (no rounding drift at the ends).

use core::f32::consts::PI;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use micromath::F32Ext;

/// Interpolates a rectangle from `from` to `to` over `duration_ms` after
/// waiting `delay_ms`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RectAnimation {
    pub from: Rectangle,
    pub to: Rectangle,
    pub duration_ms: u32,
    pub delay_ms: u32,
}

impl RectAnimation {
    pub const fn new(
        from: Rectangle,
        to: Rectangle,
        duration_ms: u32,
        delay_ms: u32,
    ) -> Self {
        Self {
            from,
            to,
            duration_ms,
            delay_ms,
        }
    }

    /// Whether the animation has reached `to` at `elapsed_ms`.
    #[inline]
    pub const fn is_complete(
        &self,
        elapsed_ms: u32,
    ) -> bool {
        elapsed_ms >= self.delay_ms.saturating_add(self.duration_ms)
    }

    /// Linear progress in `0.0..=1.0`, before easing.
    pub fn progress(
        &self,
        elapsed_ms: u32,
    ) -> f32 {
        if elapsed_ms <= self.delay_ms {
            return 0.0;
        }
        if self.is_complete(elapsed_ms) {
            return 1.0;
        }
        (elapsed_ms - self.delay_ms) as f32 / self.duration_ms as f32
    }

    /// Frame at `elapsed_ms` since the animation was scheduled.
    pub fn frame_at(
        &self,
        elapsed_ms: u32,
    ) -> Rectangle {
        if self.is_complete(elapsed_ms) {
            return self.to;
        }
        let t = ease_in_out(self.progress(elapsed_ms));
        if t <= 0.0 {
            return self.from;
        }

        let top_left = Point::new(
            lerp_i32(self.from.top_left.x, self.to.top_left.x, t),
            lerp_i32(self.from.top_left.y, self.to.top_left.y, t),
        );
        let size = Size::new(
            lerp_i32(self.from.size.width as i32, self.to.size.width as i32, t) as u32,
            lerp_i32(self.from.size.height as i32, self.to.size.height as i32, t) as u32,
        );
        Rectangle::new(top_left, size)
    }
}

/// Cosine ease-in-out on `0.0..=1.0`.
#[inline]
pub fn ease_in_out(t: f32) -> f32 { 0.5 - 0.5 * (PI * t.clamp(0.0, 1.0)).cos() }

#[inline]
fn lerp_i32(
    from: i32,
    to: i32,
    t: f32,
) -> i32 {
    from + ((to - from) as f32 * t).round() as i32
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn slide_down() -> RectAnimation {
        RectAnimation::new(
            Rectangle::new(Point::new(5, -13), Size::new(13, 13)),
            Rectangle::new(Point::new(5, 5), Size::new(13, 13)),
            500,
            0,
        )
    }

    #[test]
    fn test_endpoints_are_exact() {
        let anim = slide_down();
        assert_eq!(anim.frame_at(0), anim.from);
        assert_eq!(anim.frame_at(500), anim.to);
        assert_eq!(anim.frame_at(10_000), anim.to);
    }

    #[test]
    fn test_midpoint_is_halfway() {
        let anim = slide_down();
        let mid = anim.frame_at(250);
        assert_eq!(mid.top_left, Point::new(5, -4));
        assert_eq!(mid.size, Size::new(13, 13));
    }

    #[test]
    fn test_motion_is_monotonic() {
        let anim = slide_down();
        let mut previous = anim.from.top_left.y;
        for ms in (0..=500).step_by(25) {
            let y = anim.frame_at(ms).top_left.y;
            assert!(y >= previous, "y went back at {ms} ms");
            previous = y;
        }
    }

    #[test]
    fn test_ease_starts_slow() {
        let anim = slide_down();
        // First 10% covers much less than 10% of the distance
        let early = anim.frame_at(50).top_left.y - anim.from.top_left.y;
        assert!(early < 2);
    }

    #[test]
    fn test_delay_holds_start_frame() {
        let anim = RectAnimation { delay_ms: 100, ..slide_down() };
        assert_eq!(anim.frame_at(100), anim.from);
        assert!(!anim.is_complete(599));
        assert!(anim.is_complete(600));
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let anim = RectAnimation { duration_ms: 0, ..slide_down() };
        assert!(anim.is_complete(0));
        assert_eq!(anim.frame_at(0), anim.to);
    }

    #[test]
    fn test_ease_curve_bounds() {
        assert!(ease_in_out(0.0).abs() < 1e-2);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-2);
        assert!((ease_in_out(1.0) - 1.0).abs() < 1e-2);
        assert!((ease_in_out(2.0) - 1.0).abs() < 1e-2);
    }
}
