//! The watchface application object.
//!
//! [`Watchface`] owns every piece of mutable state: hand geometry, the
//! current [`WatchfaceState`] snapshot, service subscriptions, redraw
//! tracking and the event log. Hosts feed it [`WatchEvent`]s one at a time
//! and carry out the [`OverlayCommand`]s it returns (run slides, arm the
//! hide timer).
//!
//! Writes only happen in [`Watchface::handle`] and
//! [`Watchface::set_layer_frame`]; [`Watchface::render`] takes `&self` and
//! reads a consistent snapshot.
//!
//! # Startup
//!
//! [`Watchface::new`] subscribes to all services and then runs the regular
//! tick, connection and battery handlers with an [`InitialSnapshot`], so the
//! first frame already shows the right time and icon variants.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::String;

use crate::angles::{ClockAngles, WallTime};
use crate::blink::BlinkController;
use crate::config::FeatureFlags;
use crate::events::{ServiceKind, Subscriptions, WatchEvent};
use crate::face::FaceRenderer;
use crate::framebuffer::Framebuffer;
use crate::hands::HandSet;
use crate::icons::{AssetStore, BatteryIcon, BatterySnapshot, BluetoothIcon};
use crate::layers::{IconLayer, LayerId};
use crate::log::{EventLog, LOG_LINE_LENGTH};
use crate::overlay::{OverlayCommand, OverlayMotionController, Slide};
use crate::render::RenderState;

/// Service values read once at startup, before the first callback.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitialSnapshot {
    pub time: WallTime,
    pub connected: bool,
    pub battery: BatterySnapshot,
}

// =============================================================================
// Watchface State
// =============================================================================

/// Everything the renderer reads.
#[derive(Debug)]
pub struct WatchfaceState {
    /// Time of the last tick.
    pub time: WallTime,
    pub angles: ClockAngles,
    pub bluetooth: BluetoothIcon,
    pub battery: BatteryIcon,
    pub overlay: OverlayMotionController,
    pub bluetooth_layer: IconLayer,
    pub battery_layer: IconLayer,
}

impl WatchfaceState {
    fn new() -> Self {
        let bluetooth = BluetoothIcon::default();
        let battery = BatteryIcon::default();
        Self {
            time: WallTime::default(),
            angles: ClockAngles::default(),
            bluetooth,
            battery,
            overlay: OverlayMotionController::new(),
            bluetooth_layer: IconLayer::offscreen(LayerId::Bluetooth, bluetooth.image()),
            battery_layer: IconLayer::offscreen(LayerId::Battery, battery.image()),
        }
    }

    pub const fn layer(
        &self,
        id: LayerId,
    ) -> &IconLayer {
        match id {
            LayerId::Bluetooth => &self.bluetooth_layer,
            LayerId::Battery => &self.battery_layer,
        }
    }

    const fn layer_mut(
        &mut self,
        id: LayerId,
    ) -> &mut IconLayer {
        match id {
            LayerId::Bluetooth => &mut self.bluetooth_layer,
            LayerId::Battery => &mut self.battery_layer,
        }
    }
}

// =============================================================================
// Watchface
// =============================================================================

pub struct Watchface {
    flags: FeatureFlags,
    hands: HandSet,
    blink: BlinkController,
    state: WatchfaceState,
    subscriptions: Subscriptions,
    render_state: RenderState,
    log: EventLog,
}

impl Watchface {
    /// Create the watchface for a display of size `bounds`.
    pub fn new(
        flags: FeatureFlags,
        bounds: Size,
        initial: InitialSnapshot,
    ) -> Self {
        let mut face = Self {
            flags,
            hands: HandSet::new(bounds),
            blink: BlinkController::new(flags.show_battery_icon),
            state: WatchfaceState::new(),
            subscriptions: Subscriptions::new(),
            render_state: RenderState::new(),
            log: EventLog::new(),
        };

        for service in ServiceKind::ALL {
            face.subscriptions.subscribe(service);
        }

        face.on_tick(initial.time);
        face.on_connection(initial.connected);
        face.on_battery(initial.battery);
        face.log.push(initial.time, "started");
        face
    }

    /// Handle one host callback.
    ///
    /// Events from unsubscribed services and every event after
    /// [`Watchface::shutdown`] are dropped.
    pub fn handle(
        &mut self,
        event: WatchEvent,
    ) -> Option<OverlayCommand> {
        if !self.is_running() {
            return None;
        }
        if let Some(source) = event.source()
            && !self.subscriptions.is_subscribed(source)
        {
            return None;
        }

        match event {
            WatchEvent::Tick(time) => {
                self.on_tick(time);
                None
            }
            WatchEvent::Connection(connected) => {
                self.on_connection(connected);
                None
            }
            WatchEvent::Battery(snapshot) => {
                self.on_battery(snapshot);
                None
            }
            WatchEvent::Tap => self.on_tap(),
            WatchEvent::HideTimerFired => self.on_hide_timer_fired(),
            WatchEvent::HideTimerArmed => {
                self.on_hide_timer_armed();
                None
            }
            WatchEvent::SlideStopped { slide, finished } => self.on_slide_stopped(slide, finished),
        }
    }

    /// Move a layer while a slide runs. Marks the layers dirty on change.
    pub fn set_layer_frame(
        &mut self,
        id: LayerId,
        frame: Rectangle,
    ) {
        let layer = self.state.layer_mut(id);
        if layer.frame != frame {
            layer.frame = frame;
            self.render_state.mark_layers_dirty();
        }
    }

    /// Re-anchor the hands for new display bounds.
    pub fn set_bounds(
        &mut self,
        bounds: Size,
    ) {
        self.hands.set_bounds(bounds);
        self.render_state.mark_face_dirty();
    }

    /// Compose the face and the icon layers into `fb`.
    pub fn render<A: AssetStore>(
        &self,
        fb: &mut Framebuffer,
        assets: &A,
    ) {
        FaceRenderer::new(&self.hands, self.flags.show_second_hand).draw(fb, &self.state.angles);
        self.state.bluetooth_layer.draw(assets, fb);
        self.state.battery_layer.draw(assets, fb);
    }

    /// Unsubscribe from every service. The watchface ignores all events after this.
    pub fn shutdown(&mut self) {
        self.subscriptions.unsubscribe_all();
        self.log.push(self.state.time, "shutdown");
    }

    #[inline]
    pub const fn is_running(&self) -> bool { !self.subscriptions.is_empty() }

    #[inline]
    pub const fn state(&self) -> &WatchfaceState { &self.state }

    #[inline]
    pub const fn flags(&self) -> FeatureFlags { self.flags }

    #[inline]
    pub const fn hands(&self) -> &HandSet { &self.hands }

    #[inline]
    pub const fn subscriptions(&self) -> Subscriptions { self.subscriptions }

    #[inline]
    pub const fn log(&self) -> &EventLog { &self.log }

    #[inline]
    pub const fn needs_redraw(&self) -> bool { self.render_state.needs_redraw() }

    #[inline]
    pub const fn mark_display_cleared(&mut self) { self.render_state.mark_display_cleared(); }

    /// Call after the host has presented a frame.
    #[inline]
    pub const fn end_frame(&mut self) { self.render_state.end_frame(); }

    // -------------------------------------------------------------------------
    // Handlers
    // -------------------------------------------------------------------------

    fn on_tick(
        &mut self,
        time: WallTime,
    ) {
        self.state.time = time;
        self.state.angles = ClockAngles::from_time(time);
        self.render_state.mark_face_dirty();
        self.update_battery_visibility();
    }

    fn on_connection(
        &mut self,
        connected: bool,
    ) {
        let icon = BluetoothIcon::new(connected);
        let hidden = !self.flags.show_bluetooth_icon;
        let changed = icon != self.state.bluetooth;

        self.state.bluetooth = icon;
        let layer = &mut self.state.bluetooth_layer;
        if layer.image != icon.image() || layer.hidden != hidden {
            layer.image = icon.image();
            layer.hidden = hidden;
            self.render_state.mark_layers_dirty();
        }

        if changed {
            self.log.push(self.state.time, if connected { "bt connected" } else { "bt disconnected" });
        }
    }

    fn on_battery(
        &mut self,
        snapshot: BatterySnapshot,
    ) {
        let icon = BatteryIcon::from_snapshot(snapshot);
        let changed = icon != self.state.battery;

        self.state.battery = icon;
        if self.state.battery_layer.image != icon.image() {
            self.state.battery_layer.image = icon.image();
            self.render_state.mark_layers_dirty();
        }
        self.update_battery_visibility();

        if changed {
            let mut msg: String<LOG_LINE_LENGTH> = String::new();
            msg.push_str("batt ").ok();
            push_u8(&mut msg, snapshot.charge_percent);
            msg.push('%').ok();
            if snapshot.charging {
                msg.push_str(" charging").ok();
            }
            self.log.push(self.state.time, &msg);
        }
    }

    fn on_tap(&mut self) -> Option<OverlayCommand> {
        let command = self.state.overlay.on_gesture();
        if command.is_some() {
            self.log.push(self.state.time, "tap: showing");
        } else {
            let mut msg: String<LOG_LINE_LENGTH> = String::new();
            msg.push_str("tap ignored: ").ok();
            msg.push_str(self.state.overlay.state().label()).ok();
            self.log.push(self.state.time, &msg);
        }
        command
    }

    fn on_hide_timer_fired(&mut self) -> Option<OverlayCommand> {
        let command = self.state.overlay.on_hide_timer_fired();
        if command.is_some() {
            self.log.push(self.state.time, "hiding");
        }
        command
    }

    fn on_hide_timer_armed(&mut self) {
        if self.state.overlay.on_hide_timer_armed() {
            self.log.push(self.state.time, self.state.overlay.state().label());
        }
    }

    fn on_slide_stopped(
        &mut self,
        slide: Slide,
        finished: bool,
    ) -> Option<OverlayCommand> {
        // An interrupted slide still leaves its layer at the target frame
        self.set_layer_frame(slide.layer(), slide.target());
        if !finished {
            self.log.push(self.state.time, "slide interrupted");
        }

        let before = self.state.overlay.state();
        let command = self.state.overlay.on_slide_stopped(slide, finished);
        let after = self.state.overlay.state();
        if after != before {
            self.log.push(self.state.time, after.label());
        }
        command
    }

    fn update_battery_visibility(&mut self) {
        let hidden = self.blink.battery_layer_hidden(self.state.battery, self.state.time.second);
        if self.state.battery_layer.hidden != hidden {
            self.state.battery_layer.hidden = hidden;
            self.render_state.mark_layers_dirty();
        }
    }
}

/// Append a value in decimal (no format! macro).
fn push_u8<const N: usize>(
    s: &mut String<N>,
    val: u8,
) {
    if val >= 100 {
        s.push((b'0' + val / 100) as char).ok();
    }
    if val >= 10 {
        s.push((b'0' + val / 10 % 10) as char).ok();
    }
    s.push((b'0' + val % 10) as char).ok();
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SCREEN_SIZE;
    use crate::icons::VectorIcons;
    use crate::overlay::OverlayState;
    use crate::trig::rotate_point;

    fn snapshot(
        connected: bool,
        percent: u8,
        charging: bool,
    ) -> InitialSnapshot {
        InitialSnapshot {
            time: WallTime::new(10, 8, 0),
            connected,
            battery: BatterySnapshot::new(percent, charging),
        }
    }

    fn watchface(flags: FeatureFlags) -> Watchface { Watchface::new(flags, SCREEN_SIZE, snapshot(true, 45, false)) }

    /// Plays both slides the way a host would, then hands them back.
    fn run_slides(
        face: &mut Watchface,
        command: Option<OverlayCommand>,
    ) -> Option<OverlayCommand> {
        let slides = match command {
            Some(OverlayCommand::StartSlides(slides)) => slides,
            other => panic!("expected slides, got {other:?}"),
        };
        for elapsed in (0..=500).step_by(100) {
            for slide in &slides {
                face.set_layer_frame(slide.layer(), slide.frame_at(elapsed));
            }
        }
        let mut result = None;
        for slide in slides {
            result = face.handle(WatchEvent::SlideStopped { slide, finished: true });
        }
        result
    }

    // -------------------------------------------------------------------------
    // Clock Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_three_oclock() {
        let mut face = watchface(FeatureFlags::ALL);
        face.handle(WatchEvent::Tick(WallTime::new(3, 0, 0)));
        let angles = face.state().angles;

        // Hand shapes point down at rotation 0; follow a point on the hand
        let tip = Point::new(0, 60);
        let hour = rotate_point(tip, angles.hour);
        assert!(hour.x > 55 && hour.y.abs() < 3, "hour hand at {hour:?}");

        for angle in [angles.minute, angles.second] {
            let p = rotate_point(tip, angle);
            assert!(p.y < -55 && p.x.abs() < 3, "minute/second hand at {p:?}");
        }
    }

    #[test]
    fn test_startup_peek_runs_handlers() {
        let face = Watchface::new(FeatureFlags::ALL, SCREEN_SIZE, snapshot(true, 100, false));
        assert_eq!(face.state().time, WallTime::new(10, 8, 0));
        assert_eq!(face.state().angles, ClockAngles::from_time(WallTime::new(10, 8, 0)));
        assert_eq!(face.state().bluetooth.variant(), 1);
        assert_eq!(face.state().battery.bucket, 10);
        assert_eq!(face.state().overlay.state(), OverlayState::Hidden);
        assert!(face.needs_redraw());
        assert!(face.is_running());
    }

    #[test]
    fn test_tick_marks_face_dirty() {
        let mut face = watchface(FeatureFlags::ALL);
        face.end_frame();
        assert!(!face.needs_redraw());

        face.handle(WatchEvent::Tick(WallTime::new(10, 8, 1)));
        assert!(face.needs_redraw());
        face.end_frame();
        assert!(!face.needs_redraw());
    }

    // -------------------------------------------------------------------------
    // Status Icon Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_bluetooth_toggle_keeps_visibility() {
        let mut face = Watchface::new(FeatureFlags::ALL, SCREEN_SIZE, snapshot(false, 45, false));
        let mut variants = Vec::new();
        variants.push(face.state().bluetooth.variant());
        assert!(!face.state().bluetooth_layer.hidden);

        for connected in [true, false] {
            face.handle(WatchEvent::Connection(connected));
            variants.push(face.state().bluetooth.variant());
            assert!(!face.state().bluetooth_layer.hidden);
            assert_eq!(face.state().bluetooth_layer.image, face.state().bluetooth.image());
        }
        assert_eq!(variants, [0, 1, 0]);
    }

    #[test]
    fn test_battery_snapshot_updates_image() {
        let mut face = watchface(FeatureFlags::ALL);
        face.handle(WatchEvent::Battery(BatterySnapshot::new(95, false)));
        assert_eq!(face.state().battery.bucket, 9);
        assert_eq!(face.state().battery_layer.image, face.state().battery.image());
        assert_eq!(face.log().iter().last(), Some("10:08:00 batt 95%"));
    }

    #[test]
    fn test_charging_blink_follows_second() {
        let mut face = watchface(FeatureFlags::ALL);
        face.handle(WatchEvent::Battery(BatterySnapshot::new(45, true)));
        for second in 0..6 {
            face.handle(WatchEvent::Tick(WallTime::new(10, 8, second)));
            assert_eq!(face.state().battery_layer.hidden, second % 2 == 1, "second {second}");
        }

        // Unplugged on an odd second: visible again right away
        face.handle(WatchEvent::Battery(BatterySnapshot::new(45, false)));
        assert!(!face.state().battery_layer.hidden);
        face.handle(WatchEvent::Tick(WallTime::new(10, 8, 7)));
        assert!(!face.state().battery_layer.hidden);
    }

    #[test]
    fn test_disabled_flags_hide_layers() {
        let flags = FeatureFlags {
            show_second_hand: false,
            show_bluetooth_icon: false,
            show_battery_icon: false,
        };
        let mut face = Watchface::new(flags, SCREEN_SIZE, snapshot(true, 45, true));
        face.handle(WatchEvent::Tick(WallTime::new(10, 8, 2)));
        face.handle(WatchEvent::Connection(false));
        assert!(face.state().bluetooth_layer.hidden);
        assert!(face.state().battery_layer.hidden);

        // Shown overlay still draws nothing in the icon frames
        let command = face.handle(WatchEvent::Tap);
        run_slides(&mut face, command);
        let mut fb = Framebuffer::new();
        face.render(&mut fb, &VectorIcons);
        let mut face_only = Framebuffer::new();
        FaceRenderer::new(face.hands(), false).draw(&mut face_only, &face.state().angles);
        assert!(fb == face_only);
    }

    // -------------------------------------------------------------------------
    // Overlay Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_gesture_full_cycle() {
        let mut face = watchface(FeatureFlags::ALL);
        for id in LayerId::ALL {
            assert_eq!(face.state().layer(id).frame, id.offscreen_frame());
        }

        let command = face.handle(WatchEvent::Tap);
        assert_eq!(face.state().overlay.state(), OverlayState::Showing);

        match run_slides(&mut face, command) {
            Some(OverlayCommand::ArmHideTimer { after_ms }) => assert_eq!(after_ms, 3000),
            other => panic!("expected hide timer, got {other:?}"),
        }
        assert_eq!(face.state().overlay.state(), OverlayState::Shown);
        for id in LayerId::ALL {
            assert_eq!(face.state().layer(id).frame, id.resting_frame());
        }

        assert!(face.handle(WatchEvent::HideTimerArmed).is_none());
        assert_eq!(face.state().overlay.state(), OverlayState::HidingScheduled);
        assert_eq!(face.log().iter().last(), Some("10:08:00 hide scheduled"));

        let command = face.handle(WatchEvent::HideTimerFired);
        assert_eq!(face.state().overlay.state(), OverlayState::Hiding);
        assert!(run_slides(&mut face, command).is_none());

        assert_eq!(face.state().overlay.state(), OverlayState::Hidden);
        for id in LayerId::ALL {
            assert_eq!(face.state().layer(id).frame, id.offscreen_frame());
        }
    }

    #[test]
    fn test_double_tap_single_hide_timer() {
        let mut face = watchface(FeatureFlags::ALL);
        let command = face.handle(WatchEvent::Tap);
        assert!(face.handle(WatchEvent::Tap).is_none());

        let mut timers = 0;
        if let Some(OverlayCommand::ArmHideTimer { .. }) = run_slides(&mut face, command) {
            timers += 1;
        }
        assert!(face.handle(WatchEvent::Tap).is_none());
        assert_eq!(timers, 1);
        assert_eq!(face.log().iter().filter(|line| line.contains("tap ignored")).count(), 2);
    }

    #[test]
    fn test_interrupted_slide_lands_on_target() {
        let mut face = watchface(FeatureFlags::ALL);
        let Some(OverlayCommand::StartSlides(slides)) = face.handle(WatchEvent::Tap) else {
            panic!("expected slides");
        };
        for slide in &slides {
            face.set_layer_frame(slide.layer(), slide.frame_at(100));
        }
        let mut last = None;
        for slide in slides {
            last = face.handle(WatchEvent::SlideStopped { slide, finished: false });
        }
        assert!(matches!(last, Some(OverlayCommand::ArmHideTimer { .. })));
        assert_eq!(face.state().bluetooth_layer.frame, LayerId::Bluetooth.resting_frame());
    }

    #[test]
    fn test_shown_icons_are_drawn() {
        let mut face = watchface(FeatureFlags::ALL);
        let mut before = Framebuffer::new();
        face.render(&mut before, &VectorIcons);

        let command = face.handle(WatchEvent::Tap);
        run_slides(&mut face, command);
        let mut after = Framebuffer::new();
        face.render(&mut after, &VectorIcons);

        assert!(after.lit_count() > before.lit_count());
    }

    // -------------------------------------------------------------------------
    // Lifecycle Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_shutdown_drops_events() {
        let mut face = watchface(FeatureFlags::ALL);
        face.shutdown();
        assert!(!face.is_running());
        assert!(face.subscriptions().is_empty());

        face.handle(WatchEvent::Tick(WallTime::new(1, 2, 3)));
        assert_eq!(face.state().time, WallTime::new(10, 8, 0));
        assert!(face.handle(WatchEvent::Tap).is_none());
        assert_eq!(face.state().overlay.state(), OverlayState::Hidden);
    }

    #[test]
    fn test_set_bounds_moves_pivot() {
        let mut face = watchface(FeatureFlags::ALL);
        face.end_frame();
        face.set_bounds(Size::new(100, 100));
        assert_eq!(face.hands().pivot(), Point::new(50, 50));
        assert!(face.needs_redraw());
    }

    #[test]
    fn test_push_u8() {
        let mut s: String<8> = String::new();
        push_u8(&mut s, 0);
        s.push(' ').ok();
        push_u8(&mut s, 45);
        s.push(' ').ok();
        push_u8(&mut s, 100);
        assert_eq!(s.as_str(), "0 45 100");
    }
}
