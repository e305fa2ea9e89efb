//! Status icon state and artwork.
//!
//! - [`BluetoothIcon`]: connected flag, two bitmap variants
//! - [`BatteryIcon`]: charge bucket (0-10) plus charging flag, eleven variants
//! - [`AssetStore`]: draws a bitmap resource by numeric identifier
//! - [`VectorIcons`]: built-in artwork used by the simulator and firmware
//!
//! # Battery Buckets
//!
//! ```text
//! bucket = min(percent / 10, 10)
//! ```
//!
//! so 0-9 % is bucket 0, 95 % is bucket 9 and only a full 100 % is bucket 10.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

use crate::colors::FOREGROUND;

// =============================================================================
// Resource Identifiers
// =============================================================================

/// Numeric identifier of a bitmap in the asset store.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResourceId(pub u16);

pub const RESOURCE_ID_BLUETOOTH_OFF: ResourceId = ResourceId(1);
pub const RESOURCE_ID_BLUETOOTH_ON: ResourceId = ResourceId(2);

/// First battery resource; buckets 0-10 follow consecutively.
pub const RESOURCE_ID_BATTERY_0: ResourceId = ResourceId(10);

/// Number of battery bitmap variants (0 %, 10 %, ..., 100 %).
pub const BATTERY_BUCKETS: usize = 11;

/// Bluetooth bitmaps indexed by `connected as usize`.
pub const BLUETOOTH_IMAGES: [ResourceId; 2] = [RESOURCE_ID_BLUETOOTH_OFF, RESOURCE_ID_BLUETOOTH_ON];

/// Battery bitmaps indexed by bucket.
pub const BATTERY_IMAGES: [ResourceId; BATTERY_BUCKETS] = {
    let mut images = [RESOURCE_ID_BATTERY_0; BATTERY_BUCKETS];
    let mut i = 0;
    while i < BATTERY_BUCKETS {
        images[i] = ResourceId(RESOURCE_ID_BATTERY_0.0 + i as u16);
        i += 1;
    }
    images
};

// =============================================================================
// Icon State
// =============================================================================

/// Bluetooth connectivity as shown by the icon.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BluetoothIcon {
    pub connected: bool,
}

impl BluetoothIcon {
    pub const fn new(connected: bool) -> Self { Self { connected } }

    /// Bitmap variant index: 0 disconnected, 1 connected.
    #[inline]
    pub const fn variant(self) -> usize { self.connected as usize }

    #[inline]
    pub const fn image(self) -> ResourceId { BLUETOOTH_IMAGES[self.variant()] }
}

/// Battery snapshot delivered by the battery service.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatterySnapshot {
    /// Charge level, 0-100.
    pub charge_percent: u8,
    pub charging: bool,
}

impl BatterySnapshot {
    pub const fn new(
        charge_percent: u8,
        charging: bool,
    ) -> Self {
        Self { charge_percent, charging }
    }
}

/// Battery state as shown by the icon.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryIcon {
    /// Charge bucket, 0-10.
    pub bucket: u8,
    pub charging: bool,
}

impl BatteryIcon {
    /// Derive the icon state from a service snapshot.
    pub const fn from_snapshot(snapshot: BatterySnapshot) -> Self {
        Self {
            bucket: battery_bucket(snapshot.charge_percent),
            charging: snapshot.charging,
        }
    }

    #[inline]
    pub const fn image(self) -> ResourceId { BATTERY_IMAGES[self.bucket as usize] }
}

/// Charge bucket for a percentage, clamped to 0-10.
#[inline]
pub const fn battery_bucket(percent: u8) -> u8 {
    let bucket = percent / 10;
    if bucket > 10 { 10 } else { bucket }
}

// =============================================================================
// Asset Store
// =============================================================================

/// Source of icon bitmaps, looked up by numeric identifier.
///
/// Resources are assumed to always exist; implementations draw nothing for
/// an identifier they do not know.
pub trait AssetStore {
    /// Draw resource `id` with its top-left corner at `frame.top_left`.
    fn draw_bitmap<D>(
        &self,
        id: ResourceId,
        frame: Rectangle,
        target: &mut D,
    ) where
        D: DrawTarget<Color = BinaryColor>;
}

/// Built-in line-art icons sized for the 13 × 13 icon frames.
#[derive(Clone, Copy, Default, Debug)]
pub struct VectorIcons;

impl VectorIcons {
    fn draw_bluetooth<D>(
        origin: Point,
        connected: bool,
        target: &mut D,
    ) where
        D: DrawTarget<Color = BinaryColor>,
    {
        let stroke = PrimitiveStyle::with_stroke(FOREGROUND, 1);
        let p = |x: i32, y: i32| origin + Point::new(x, y);

        // Rune: vertical spine with two arrow heads on the right
        let rune = [
            (p(6, 1), p(6, 11)),
            (p(6, 1), p(9, 4)),
            (p(9, 4), p(3, 9)),
            (p(6, 11), p(9, 8)),
            (p(9, 8), p(3, 3)),
        ];
        for (start, end) in rune {
            Line::new(start, end).into_styled(stroke).draw(target).ok();
        }

        if !connected {
            // Strike through when disconnected
            Line::new(p(1, 11), p(11, 1)).into_styled(stroke).draw(target).ok();
        }
    }

    fn draw_battery<D>(
        origin: Point,
        bucket: u8,
        target: &mut D,
    ) where
        D: DrawTarget<Color = BinaryColor>,
    {
        let stroke = PrimitiveStyle::with_stroke(FOREGROUND, 1);
        let fill = PrimitiveStyle::with_fill(FOREGROUND);

        // Body 11 x 7 with a 1 px nub on the right
        Rectangle::new(origin + Point::new(0, 3), Size::new(11, 7)).into_styled(stroke).draw(target).ok();
        Rectangle::new(origin + Point::new(11, 5), Size::new(1, 3)).into_styled(fill).draw(target).ok();

        // Inner level: up to 9 px wide for a full battery
        let level = (u32::from(bucket.min(10)) * 9 + 5) / 10;
        if level > 0 {
            Rectangle::new(origin + Point::new(1, 4), Size::new(level, 5)).into_styled(fill).draw(target).ok();
        }
    }
}

impl AssetStore for VectorIcons {
    fn draw_bitmap<D>(
        &self,
        id: ResourceId,
        frame: Rectangle,
        target: &mut D,
    ) where
        D: DrawTarget<Color = BinaryColor>,
    {
        let origin = frame.top_left;
        match id {
            RESOURCE_ID_BLUETOOTH_OFF => Self::draw_bluetooth(origin, false, target),
            RESOURCE_ID_BLUETOOTH_ON => Self::draw_bluetooth(origin, true, target),
            ResourceId(raw) if (RESOURCE_ID_BATTERY_0.0..RESOURCE_ID_BATTERY_0.0 + BATTERY_BUCKETS as u16).contains(&raw) => {
                Self::draw_battery(origin, (raw - RESOURCE_ID_BATTERY_0.0) as u8, target);
            }
            _ => {}
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::Framebuffer;

    #[test]
    fn test_battery_bucket_examples() {
        assert_eq!(battery_bucket(0), 0);
        assert_eq!(battery_bucket(9), 0);
        assert_eq!(battery_bucket(10), 1);
        assert_eq!(battery_bucket(45), 4);
        assert_eq!(battery_bucket(95), 9);
        assert_eq!(battery_bucket(100), 10);
    }

    #[test]
    fn test_battery_bucket_clamped_and_monotonic() {
        let mut previous = 0;
        for percent in 0..=u8::MAX {
            let bucket = battery_bucket(percent);
            assert!(bucket <= 10);
            assert!(bucket >= previous);
            previous = bucket;
        }
    }

    #[test]
    fn test_bluetooth_variants() {
        assert_eq!(BluetoothIcon::new(false).variant(), 0);
        assert_eq!(BluetoothIcon::new(true).variant(), 1);
        assert_eq!(BluetoothIcon::new(true).image(), RESOURCE_ID_BLUETOOTH_ON);
    }

    #[test]
    fn test_battery_images_are_consecutive() {
        assert_eq!(BATTERY_IMAGES[0], ResourceId(10));
        assert_eq!(BATTERY_IMAGES[10], ResourceId(20));
        let icon = BatteryIcon::from_snapshot(BatterySnapshot::new(45, true));
        assert_eq!(icon.bucket, 4);
        assert!(icon.charging);
        assert_eq!(icon.image(), ResourceId(14));
    }

    #[test]
    fn test_vector_icons_stay_inside_frame() {
        let frame = Rectangle::new(Point::new(20, 20), Size::new(13, 13));
        for id in BLUETOOTH_IMAGES.iter().chain(BATTERY_IMAGES.iter()) {
            let mut fb = Framebuffer::new();
            VectorIcons.draw_bitmap(*id, frame, &mut fb);
            assert!(fb.lit_count() > 0, "{id:?} drew nothing");

            let mut outside = fb.clone();
            Rectangle::new(frame.top_left, frame.size)
                .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
                .draw(&mut outside)
                .ok();
            assert_eq!(outside.lit_count(), 0, "{id:?} drew outside its frame");
        }
    }

    #[test]
    fn test_battery_artwork_grows_with_bucket() {
        let frame = Rectangle::new(Point::zero(), Size::new(13, 13));
        let mut empty = Framebuffer::new();
        let mut full = Framebuffer::new();
        VectorIcons.draw_bitmap(BATTERY_IMAGES[0], frame, &mut empty);
        VectorIcons.draw_bitmap(BATTERY_IMAGES[10], frame, &mut full);
        assert!(full.lit_count() > empty.lit_count());
    }

    #[test]
    fn test_unknown_resource_draws_nothing() {
        let mut fb = Framebuffer::new();
        VectorIcons.draw_bitmap(ResourceId(999), Rectangle::new(Point::zero(), Size::new(13, 13)), &mut fb);
        assert_eq!(fb.lit_count(), 0);
    }
}
