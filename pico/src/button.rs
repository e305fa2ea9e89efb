//! Button debounce handling.
//!
//! Provides time-based edge detection with debouncing to prevent
//! multiple triggers from contact bounce on physical buttons.

use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant};

/// Debounce duration in milliseconds.
pub const DEBOUNCE_MS: u64 = 50;

/// An active-low button with its debounce state.
pub struct Button<'d> {
    input: Input<'d>,
    was_pressed: bool,
    last_change: Option<Instant>,
}

impl<'d> Button<'d> {
    /// Wrap an input configured with a pull-up (not pressed).
    pub const fn new(input: Input<'d>) -> Self {
        Self {
            input,
            was_pressed: false,
            last_change: None,
        }
    }

    /// Returns true only on the falling edge (button just pressed).
    pub fn just_pressed(&mut self) -> bool {
        let is_low = self.input.is_low();
        if is_low == self.was_pressed {
            return false;
        }

        // Only accept a change once the contacts had time to settle
        if let Some(last) = self.last_change
            && last.elapsed() < Duration::from_millis(DEBOUNCE_MS)
        {
            return false;
        }

        self.was_pressed = is_low;
        self.last_change = Some(Instant::now());
        is_low
    }
}
