//! Keyboard-driven stand-ins for the watch services.
//!
//! The real watch gets connectivity and battery updates from the system. In
//! the simulator they are plain values changed by key presses, and each change
//! produces the same [`WatchEvent`] the system service would deliver.

use chrono::{Local, Timelike};
use watchface_common::WatchEvent;
use watchface_common::angles::WallTime;
use watchface_common::icons::BatterySnapshot;
use watchface_common::watchface::InitialSnapshot;

/// Current values of the simulated connection and battery services.
#[derive(Clone, Copy, Debug)]
pub struct SimServices {
    connected: bool,
    battery: BatterySnapshot,
}

impl SimServices {
    pub const fn new() -> Self {
        Self {
            connected: true,
            battery: BatterySnapshot::new(80, false),
        }
    }

    pub const fn connected(&self) -> bool { self.connected }

    pub const fn battery(&self) -> BatterySnapshot { self.battery }

    /// Values the watchface peeks at startup.
    pub fn snapshot(&self) -> InitialSnapshot {
        InitialSnapshot {
            time: WallClock::now(),
            connected: self.connected,
            battery: self.battery,
        }
    }

    pub fn toggle_bluetooth(&mut self) -> WatchEvent {
        self.connected = !self.connected;
        WatchEvent::Connection(self.connected)
    }

    pub fn toggle_charging(&mut self) -> WatchEvent {
        self.battery.charging = !self.battery.charging;
        WatchEvent::Battery(self.battery)
    }

    /// Change the charge level by `delta` percent, clamped to 0-100.
    pub fn adjust_battery(
        &mut self,
        delta: i16,
    ) -> WatchEvent {
        self.battery.charge_percent = (i16::from(self.battery.charge_percent) + delta).clamp(0, 100) as u8;
        WatchEvent::Battery(self.battery)
    }
}

/// Local wall clock that reports each new second once.
#[derive(Debug, Default)]
pub struct WallClock {
    last: Option<WallTime>,
}

impl WallClock {
    pub const fn new() -> Self { Self { last: None } }

    /// Current local time.
    pub fn now() -> WallTime {
        let now = Local::now();
        WallTime::new(now.hour() as u8, now.minute() as u8, now.second() as u8)
    }

    /// The current time if the second changed since the last call.
    pub fn poll(&mut self) -> Option<WallTime> {
        let now = Self::now();
        if self.last == Some(now) {
            return None;
        }
        self.last = Some(now);
        Some(now)
    }
}
