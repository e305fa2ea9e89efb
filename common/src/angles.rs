//! Wall-clock time to hand-rotation angles.
//!
//! Each hand advances in dial units of `FULL_TURN / 60` (one minute-mark).
//! A flat [`ANGLE_OFFSET`] of 90 dial units is added to the dial position
//! *before* scaling, which is 1.5 turns: the hand outlines point down at
//! rotation 0, and the extra half turn puts position 0 at 12 o'clock.
//!
//! Because `FULL_TURN` is not a multiple of 60, the per-unit step is
//! truncated (`1092`) and the arithmetic is kept exactly as
//! `unit * (position + 90) mod FULL_TURN` rather than a separate rotation.

use crate::trig::{Angle, FULL_TURN};

/// Angle of one dial unit (one minute-mark).
pub const ANGLE_PER_DIAL_UNIT: i32 = FULL_TURN / 60;

/// Dial units added to every hand position before scaling.
pub const ANGLE_OFFSET: i32 = 90;

/// Seconds in a day, used to wrap [`WallTime::from_seconds_of_day`].
pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

// =============================================================================
// Wall Time
// =============================================================================

/// Local wall-clock time as delivered by the tick source.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallTime {
    /// Hour, 0-23 (12-hour values work too, only `hour % 12` is used).
    pub hour: u8,
    /// Minute, 0-59.
    pub minute: u8,
    /// Second, 0-59.
    pub second: u8,
}

impl WallTime {
    /// Create a wall time from its fields.
    pub const fn new(
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Self {
        Self { hour, minute, second }
    }

    /// Build a wall time from seconds since midnight (wraps at 24 h).
    pub const fn from_seconds_of_day(seconds: u32) -> Self {
        let seconds = seconds % SECONDS_PER_DAY;
        Self {
            hour: (seconds / 3600) as u8,
            minute: (seconds / 60 % 60) as u8,
            second: (seconds % 60) as u8,
        }
    }

    /// Seconds since midnight.
    pub const fn seconds_of_day(self) -> u32 {
        self.hour as u32 * 3600 + self.minute as u32 * 60 + self.second as u32
    }
}

// =============================================================================
// Clock Angles
// =============================================================================

/// Rotation of each hand. Always recomputed as a whole from a [`WallTime`].
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockAngles {
    pub second: Angle,
    pub minute: Angle,
    pub hour: Angle,
}

impl ClockAngles {
    /// Compute all three hand angles for `time`.
    ///
    /// Pure: the caller is responsible for marking the face dirty.
    pub const fn from_time(time: WallTime) -> Self {
        let hour_position = (time.hour % 12) as i32 * 5 + time.minute as i32 / 12;
        Self {
            second: dial_angle(time.second as i32),
            minute: dial_angle(time.minute as i32),
            hour: dial_angle(hour_position),
        }
    }
}

/// Angle for a dial position (0-59), offset and reduced.
const fn dial_angle(position: i32) -> Angle { Angle::new(ANGLE_PER_DIAL_UNIT * (position + ANGLE_OFFSET)) }

// =============================================================================
// Unit Tests
// =============================================================================
