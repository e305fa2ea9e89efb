//! Charging blink for the battery icon.
//!
//! While charging, the battery layer follows a square wave keyed to the
//! wall-clock second: visible on even seconds, hidden on odd ones. When not
//! charging the rule has no effect and only the feature flag applies.

use crate::icons::BatteryIcon;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BlinkController {
    /// Battery icon feature flag. A disabled icon is hidden unconditionally.
    enabled: bool,
}

impl BlinkController {
    pub const fn new(enabled: bool) -> Self { Self { enabled } }

    /// Whether the blink rule currently drives the battery layer.
    #[inline]
    pub const fn is_blinking(
        &self,
        battery: BatteryIcon,
    ) -> bool {
        self.enabled && battery.charging
    }

    /// Hidden flag for the battery layer at wall-clock `second`.
    #[inline]
    pub const fn battery_layer_hidden(
        &self,
        battery: BatteryIcon,
        second: u8,
    ) -> bool {
        if !self.enabled {
            return true;
        }
        battery.charging && second % 2 == 1
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
