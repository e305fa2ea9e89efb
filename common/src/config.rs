//! Watchface configuration constants.
//!
//! Layout values are `const` so rendering code never recomputes them per frame.
//! The three feature flags are fixed at build time through Cargo features
//! (`second-hand`, `bluetooth-icon`, `battery-icon`) and surfaced as
//! [`FeatureFlags::BUILD`].

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels.
pub const SCREEN_WIDTH: u32 = 144;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 168;

/// Full display size.
pub const SCREEN_SIZE: Size = Size::new(SCREEN_WIDTH, SCREEN_HEIGHT);

// =============================================================================
// Face Layout
// =============================================================================

/// Distance from the pivot to each hour-marker dot.
pub const MARKER_CIRCLE_RADIUS: i32 = 69;

/// Radius of a single hour-marker dot.
pub const MARKER_DOT_RADIUS: u32 = 2;

/// Number of hour-marker dots around the face.
pub const MARKER_COUNT: i32 = 12;

/// Outer pivot circle radius (foreground).
pub const PIVOT_OUTER_RADIUS: u32 = 5;

/// Inner pivot circle radius (background), drawn on top of the outer one.
pub const PIVOT_INNER_RADIUS: u32 = 2;

// =============================================================================
// Status Icon Layout
// =============================================================================

/// Icon bitmaps are square.
pub const ICON_SIZE: u32 = 13;

/// Margin between the icons and the screen edges.
pub const ICON_MARGIN: i32 = 5;

/// Resting frame of the bluetooth icon (top-left corner).
pub const BLUETOOTH_FRAME: Rectangle = Rectangle::new(Point::new(ICON_MARGIN, ICON_MARGIN), Size::new(ICON_SIZE, ICON_SIZE));

/// Resting frame of the battery icon (top-right corner).
pub const BATTERY_FRAME: Rectangle = Rectangle::new(
    Point::new(SCREEN_WIDTH as i32 - ICON_MARGIN - ICON_SIZE as i32, ICON_MARGIN),
    Size::new(ICON_SIZE, ICON_SIZE),
);

// =============================================================================
// Overlay Timing (milliseconds)
// =============================================================================

/// Duration of one slide animation, in or out.
pub const SLIDE_DURATION_MS: u32 = 500;

/// Delay before a slide animation starts.
pub const SLIDE_DELAY_MS: u32 = 0;

/// Time the icons stay on screen before sliding back out.
pub const HIDE_DELAY_MS: u32 = 3000;

// =============================================================================
// Feature Flags
// =============================================================================

/// Build-time switches that suppress drawing or visibility unconditionally.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FeatureFlags {
    /// Draw the inverted second hand.
    pub show_second_hand: bool,
    /// Show the bluetooth icon layer.
    pub show_bluetooth_icon: bool,
    /// Show the battery icon layer.
    pub show_battery_icon: bool,
}

impl FeatureFlags {
    /// Flags selected by the crate's Cargo features.
    pub const BUILD: Self = Self {
        show_second_hand: cfg!(feature = "second-hand"),
        show_bluetooth_icon: cfg!(feature = "bluetooth-icon"),
        show_battery_icon: cfg!(feature = "battery-icon"),
    };

    /// Everything enabled.
    pub const ALL: Self = Self {
        show_second_hand: true,
        show_bluetooth_icon: true,
        show_battery_icon: true,
    };
}

impl Default for FeatureFlags {
    fn default() -> Self { Self::BUILD }
}

// =============================================================================
// Unit Tests
// =============================================================================
