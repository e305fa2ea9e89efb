//! Color constants for the monochrome watch display.
//!
//! The panel is 1-bit, so every color is a [`BinaryColor`]. `On` is a lit
//! (white) pixel and `Off` is the black background.

use embedded_graphics::pixelcolor::BinaryColor;

/// Window background. The face is drawn white-on-black.
pub const BACKGROUND: BinaryColor = BinaryColor::Off;

/// Marker dots, hand fill, outer pivot circle and icon artwork.
pub const FOREGROUND: BinaryColor = BinaryColor::On;

/// Hand outline stroke (drawn over the white fill).
pub const HAND_STROKE: BinaryColor = BinaryColor::Off;

/// Second hand stroke. Drawn through the inverting composite, so only
/// whether a pixel is touched matters, not its final color.
pub const SECOND_HAND_STROKE: BinaryColor = BinaryColor::On;
