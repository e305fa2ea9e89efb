//! Firmware-only configuration.

use embedded_graphics::prelude::*;
use watchface_common::WallTime;
use watchface_common::config::SCREEN_SIZE;

/// Panel size in landscape orientation.
pub const PANEL_WIDTH: u32 = 320;
pub const PANEL_HEIGHT: u32 = 240;

/// Top-left corner of the watchface on the panel (centered).
pub const FACE_ORIGIN: Point = Point::new(
    ((PANEL_WIDTH - SCREEN_SIZE.width) / 2) as i32,
    ((PANEL_HEIGHT - SCREEN_SIZE.height) / 2) as i32,
);

/// Wall time at power-on. There is no RTC, the clock runs from here.
pub const BOOT_TIME: WallTime = WallTime::new(10, 8, 0);

/// Frame period (~30 FPS).
pub const FRAME_MS: u64 = 33;

/// Battery change per press of Y, in percent.
pub const BATTERY_STEP: u8 = 10;
