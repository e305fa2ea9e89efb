//! Slide-in/slide-out motion of the status icon overlay.
//!
//! # State Machine
//!
//! ```text
//!            gesture                 both slides stopped
//! Hidden ─────────────▶ Showing ─────────────────────────▶ Shown
//!   ▲                                                        │ hide timer armed
//!   │ both slides stopped                                    ▼
//! Hiding ◀──────────────────────────────────────── HidingScheduled
//!                        hide timer fired
//! ```
//!
//! Gestures are only accepted in `Hidden`; anywhere else they are dropped and
//! the hide timer is never restarted. Entering `Shown` emits the single
//! [`OverlayCommand::ArmHideTimer`] of the cycle; the host confirms with
//! [`OverlayMotionController::on_hide_timer_armed`], which is only accepted
//! in `Shown`, so at most one hide timer exists per cycle.
//!
//! # Slide Ownership
//!
//! The controller never moves layers itself. A transition hands the host two
//! [`Slide`]s (one per layer, identical timing). The host owns each slide
//! while it runs and gives it back by value through
//! [`OverlayMotionController::on_slide_stopped`], finished or interrupted.
//! `Slide` is not `Clone`, so a slide can only be stopped once.

use embedded_graphics::primitives::Rectangle;

use crate::animations::RectAnimation;
use crate::config::{HIDE_DELAY_MS, SLIDE_DELAY_MS, SLIDE_DURATION_MS};
use crate::layers::LayerId;

/// Overlay states.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverlayState {
    /// Icons parked off screen. The only state that accepts a gesture.
    #[default]
    Hidden,
    /// Slides towards the resting frames are running.
    Showing,
    /// Icons at rest, hide timer requested but not yet armed by the host.
    Shown,
    /// Icons at rest, one-shot hide timer armed.
    HidingScheduled,
    /// Slides back off screen are running.
    Hiding,
}

impl OverlayState {
    /// Short label for logs and the simulator debug page.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Showing => "showing",
            Self::Shown => "shown",
            Self::HidingScheduled => "hide scheduled",
            Self::Hiding => "hiding",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlideDirection {
    /// Off screen to resting frame.
    In,
    /// Resting frame to off screen.
    Out,
}

/// One running layer animation, owned by whoever runs it.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Slide {
    layer: LayerId,
    direction: SlideDirection,
    animation: RectAnimation,
    cycle: u32,
}

impl Slide {
    fn new(
        layer: LayerId,
        direction: SlideDirection,
        cycle: u32,
    ) -> Self {
        let (from, to) = match direction {
            SlideDirection::In => (layer.offscreen_frame(), layer.resting_frame()),
            SlideDirection::Out => (layer.resting_frame(), layer.offscreen_frame()),
        };
        Self {
            layer,
            direction,
            animation: RectAnimation::new(from, to, SLIDE_DURATION_MS, SLIDE_DELAY_MS),
            cycle,
        }
    }

    #[inline]
    pub const fn layer(&self) -> LayerId { self.layer }

    #[inline]
    pub const fn direction(&self) -> SlideDirection { self.direction }

    #[inline]
    pub const fn animation(&self) -> &RectAnimation { &self.animation }

    /// Frame the layer should have `elapsed_ms` after the slide started.
    #[inline]
    pub fn frame_at(
        &self,
        elapsed_ms: u32,
    ) -> Rectangle {
        self.animation.frame_at(elapsed_ms)
    }

    /// Frame the layer ends up in once the slide stops.
    #[inline]
    pub const fn target(&self) -> Rectangle { self.animation.to }

    #[inline]
    pub const fn is_complete(
        &self,
        elapsed_ms: u32,
    ) -> bool {
        self.animation.is_complete(elapsed_ms)
    }
}

/// Work the host has to schedule after a transition.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverlayCommand {
    /// Run both slides with their own timing; stop each one exactly once.
    StartSlides([Slide; 2]),
    /// Fire the hide timer once after `after_ms`.
    ArmHideTimer { after_ms: u32 },
}

/// Explicit five-state overlay controller.
///
/// One instance drives both layers in lockstep.
#[derive(Debug, Default)]
pub struct OverlayMotionController {
    state: OverlayState,
    /// Slides of the current transition that have not stopped yet.
    pending: u8,
    /// Incremented per transition; slides from older transitions are ignored.
    cycle: u32,
}

impl OverlayMotionController {
    pub const fn new() -> Self {
        Self {
            state: OverlayState::Hidden,
            pending: 0,
            cycle: 0,
        }
    }

    #[inline]
    pub const fn state(&self) -> OverlayState { self.state }

    /// Handle a tap gesture. Only acts in `Hidden`.
    pub fn on_gesture(&mut self) -> Option<OverlayCommand> {
        match self.state {
            OverlayState::Hidden => Some(self.begin(OverlayState::Showing, SlideDirection::In)),
            OverlayState::Showing | OverlayState::Shown | OverlayState::HidingScheduled | OverlayState::Hiding => None,
        }
    }

    /// Handle the one-shot hide timer. Only acts in `HidingScheduled`.
    pub fn on_hide_timer_fired(&mut self) -> Option<OverlayCommand> {
        match self.state {
            OverlayState::HidingScheduled => Some(self.begin(OverlayState::Hiding, SlideDirection::Out)),
            OverlayState::Hidden | OverlayState::Showing | OverlayState::Shown | OverlayState::Hiding => None,
        }
    }

    /// Take back a stopped slide, finished or interrupted.
    ///
    /// The slide is consumed here. When the second slide of a transition
    /// stops, the machine advances; reaching `Shown` requests the hide timer.
    pub fn on_slide_stopped(
        &mut self,
        slide: Slide,
        _finished: bool,
    ) -> Option<OverlayCommand> {
        let expected = match self.state {
            OverlayState::Showing => SlideDirection::In,
            OverlayState::Hiding => SlideDirection::Out,
            OverlayState::Hidden | OverlayState::Shown | OverlayState::HidingScheduled => return None,
        };
        if slide.cycle != self.cycle || slide.direction != expected || self.pending == 0 {
            return None;
        }

        self.pending -= 1;
        if self.pending > 0 {
            return None;
        }

        match self.state {
            OverlayState::Showing => {
                self.state = OverlayState::Shown;
                Some(OverlayCommand::ArmHideTimer { after_ms: HIDE_DELAY_MS })
            }
            _ => {
                self.state = OverlayState::Hidden;
                None
            }
        }
    }

    /// The host armed the hide timer. Only acts in `Shown`.
    ///
    /// Returns whether the state changed.
    pub fn on_hide_timer_armed(&mut self) -> bool {
        match self.state {
            OverlayState::Shown => {
                self.state = OverlayState::HidingScheduled;
                true
            }
            OverlayState::Hidden | OverlayState::Showing | OverlayState::HidingScheduled | OverlayState::Hiding => false,
        }
    }

    fn begin(
        &mut self,
        next: OverlayState,
        direction: SlideDirection,
    ) -> OverlayCommand {
        self.cycle = self.cycle.wrapping_add(1);
        self.pending = LayerId::ALL.len() as u8;
        self.state = next;
        let cycle = self.cycle;
        OverlayCommand::StartSlides(LayerId::ALL.map(|layer| Slide::new(layer, direction, cycle)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
