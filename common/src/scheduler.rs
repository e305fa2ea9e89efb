//! Host-side runner for overlay commands.
//!
//! Both hosts need the same two services behind the [`Watchface`]: an
//! animation service that moves layers along running slides, and a one-shot
//! hide timer. [`OverlayScheduler`] provides both on top of any monotonic
//! millisecond clock (`std::time::Instant` in the simulator,
//! `embassy_time::Instant` on the firmware).
//!
//! Call [`OverlayScheduler::dispatch`] for every event and
//! [`OverlayScheduler::poll`] once per frame.

use heapless::Vec;

use crate::events::WatchEvent;
use crate::overlay::{OverlayCommand, Slide};
use crate::watchface::Watchface;

/// A slide plus the time it was started.
#[derive(Debug)]
struct RunningSlide {
    slide: Slide,
    started_ms: u64,
}

impl RunningSlide {
    fn elapsed_ms(
        &self,
        now_ms: u64,
    ) -> u32 {
        now_ms.saturating_sub(self.started_ms).min(u64::from(u32::MAX)) as u32
    }
}

/// Runs slides and the hide timer for one [`Watchface`].
#[derive(Debug, Default)]
pub struct OverlayScheduler {
    running: Vec<RunningSlide, 2>,
    hide_at_ms: Option<u64>,
}

impl OverlayScheduler {
    pub const fn new() -> Self {
        Self {
            running: Vec::new(),
            hide_at_ms: None,
        }
    }

    /// Pass `event` to the watchface and carry out whatever it asks for.
    pub fn dispatch(
        &mut self,
        face: &mut Watchface,
        event: WatchEvent,
        now_ms: u64,
    ) {
        let mut next = face.handle(event);
        while let Some(command) = next.take() {
            next = self.apply(face, command, now_ms);
        }
    }

    /// Advance running slides and fire the hide timer when due.
    pub fn poll(
        &mut self,
        face: &mut Watchface,
        now_ms: u64,
    ) {
        if let Some(deadline) = self.hide_at_ms
            && now_ms >= deadline
        {
            self.hide_at_ms = None;
            self.dispatch(face, WatchEvent::HideTimerFired, now_ms);
        }

        for running in &self.running {
            face.set_layer_frame(running.slide.layer(), running.slide.frame_at(running.elapsed_ms(now_ms)));
        }

        while let Some(index) = self.running.iter().position(|r| r.slide.is_complete(r.elapsed_ms(now_ms))) {
            let finished = self.running.swap_remove(index);
            self.dispatch(
                face,
                WatchEvent::SlideStopped {
                    slide: finished.slide,
                    finished: true,
                },
                now_ms,
            );
        }
    }

    /// Whether any slide is running or the hide timer is armed.
    #[inline]
    pub fn is_busy(&self) -> bool { !self.running.is_empty() || self.hide_at_ms.is_some() }

    #[inline]
    pub fn running_slides(&self) -> usize { self.running.len() }

    #[inline]
    pub const fn hide_deadline_ms(&self) -> Option<u64> { self.hide_at_ms }

    fn apply(
        &mut self,
        face: &mut Watchface,
        command: OverlayCommand,
        now_ms: u64,
    ) -> Option<OverlayCommand> {
        match command {
            OverlayCommand::StartSlides(slides) => {
                // Anything still running is interrupted and handed back first
                let mut follow_up = None;
                while let Some(stale) = self.running.pop() {
                    follow_up = face.handle(WatchEvent::SlideStopped {
                        slide: stale.slide,
                        finished: false,
                    });
                }
                for slide in slides {
                    self.running.push(RunningSlide { slide, started_ms: now_ms }).ok();
                }
                follow_up
            }
            OverlayCommand::ArmHideTimer { after_ms } => {
                self.hide_at_ms = Some(now_ms + u64::from(after_ms));
                face.handle(WatchEvent::HideTimerArmed)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
