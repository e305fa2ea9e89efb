//! Callback events delivered by the host and the services behind them.
//!
//! Hosts translate their own inputs (SDL keys, GPIO buttons, the RTC tick)
//! into [`WatchEvent`]s and pass them to
//! [`Watchface::handle`](crate::watchface::Watchface::handle) one at a time,
//! each running to completion before the next.
//!
//! Service-backed events (tick, connection, battery, tap) are only accepted
//! while their [`ServiceKind`] is subscribed. The hide timer and stopped
//! slides are answers to commands the watchface issued itself and are always
//! accepted.

use crate::angles::WallTime;
use crate::icons::BatterySnapshot;
use crate::overlay::Slide;

/// Event sources the watchface subscribes to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceKind {
    /// 1 Hz wall-clock tick.
    Tick,
    /// Bluetooth connectivity changes.
    Connection,
    /// Battery level and charging changes.
    Battery,
    /// Accelerometer tap gesture.
    Tap,
}

impl ServiceKind {
    pub const ALL: [Self; 4] = [Self::Tick, Self::Connection, Self::Battery, Self::Tap];

    #[inline]
    const fn bit(self) -> u8 { 1 << self as u8 }
}

/// Set of subscribed services.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Subscriptions {
    bits: u8,
}

impl Subscriptions {
    pub const fn new() -> Self { Self { bits: 0 } }

    pub fn subscribe(
        &mut self,
        service: ServiceKind,
    ) {
        self.bits |= service.bit();
    }

    pub fn unsubscribe(
        &mut self,
        service: ServiceKind,
    ) {
        self.bits &= !service.bit();
    }

    #[inline]
    pub const fn is_subscribed(
        &self,
        service: ServiceKind,
    ) -> bool {
        self.bits & service.bit() != 0
    }

    pub fn unsubscribe_all(&mut self) { self.bits = 0; }

    #[inline]
    pub const fn is_empty(&self) -> bool { self.bits == 0 }
}

/// One host callback.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchEvent {
    /// Second tick with the current local time.
    Tick(WallTime),
    /// Connectivity snapshot.
    Connection(bool),
    /// Battery snapshot.
    Battery(BatterySnapshot),
    /// Tap gesture. Axis and direction are not reported.
    Tap,
    /// The one-shot hide timer fired.
    HideTimerFired,
    /// The host armed the hide timer requested by the overlay.
    HideTimerArmed,
    /// A slide stopped and is handed back.
    SlideStopped { slide: Slide, finished: bool },
}

impl WatchEvent {
    /// Service that produces this event, if any.
    pub const fn source(&self) -> Option<ServiceKind> {
        match self {
            Self::Tick(_) => Some(ServiceKind::Tick),
            Self::Connection(_) => Some(ServiceKind::Connection),
            Self::Battery(_) => Some(ServiceKind::Battery),
            Self::Tap => Some(ServiceKind::Tap),
            Self::HideTimerFired | Self::HideTimerArmed | Self::SlideStopped { .. } => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let mut subs = Subscriptions::new();
        assert!(subs.is_empty());

        subs.subscribe(ServiceKind::Tick);
        subs.subscribe(ServiceKind::Tap);
        assert!(subs.is_subscribed(ServiceKind::Tick));
        assert!(subs.is_subscribed(ServiceKind::Tap));
        assert!(!subs.is_subscribed(ServiceKind::Battery));

        subs.unsubscribe(ServiceKind::Tick);
        assert!(!subs.is_subscribed(ServiceKind::Tick));
        assert!(subs.is_subscribed(ServiceKind::Tap));

        subs.unsubscribe_all();
        assert!(subs.is_empty());
    }

    #[test]
    fn test_event_sources() {
        assert_eq!(WatchEvent::Tick(WallTime::new(1, 2, 3)).source(), Some(ServiceKind::Tick));
        assert_eq!(WatchEvent::Connection(true).source(), Some(ServiceKind::Connection));
        assert_eq!(WatchEvent::Battery(BatterySnapshot::new(50, false)).source(), Some(ServiceKind::Battery));
        assert_eq!(WatchEvent::Tap.source(), Some(ServiceKind::Tap));
        assert_eq!(WatchEvent::HideTimerFired.source(), None);
        assert_eq!(WatchEvent::HideTimerArmed.source(), None);
    }
}
