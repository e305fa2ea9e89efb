//! Status icon layers drawn over the face.
//!
//! Each layer has a frame (animated by the overlay slides), a hidden flag
//! (feature flags and the charging blink) and the bitmap it currently shows.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::{BATTERY_FRAME, BLUETOOTH_FRAME};
use crate::icons::{AssetStore, ResourceId};

/// The two overlay layers, always driven in lockstep.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayerId {
    Bluetooth,
    Battery,
}

impl LayerId {
    pub const ALL: [Self; 2] = [Self::Bluetooth, Self::Battery];

    /// Frame where the icon rests while shown.
    pub const fn resting_frame(self) -> Rectangle {
        match self {
            Self::Bluetooth => BLUETOOTH_FRAME,
            Self::Battery => BATTERY_FRAME,
        }
    }

    /// Same frame with its bottom edge on the top of the screen.
    pub const fn offscreen_frame(self) -> Rectangle {
        let rest = self.resting_frame();
        Rectangle::new(Point::new(rest.top_left.x, -(rest.size.height as i32)), rest.size)
    }
}

/// One bitmap layer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IconLayer {
    pub frame: Rectangle,
    pub hidden: bool,
    pub image: ResourceId,
}

impl IconLayer {
    /// A layer parked off screen, as it is before the first gesture.
    pub const fn offscreen(
        id: LayerId,
        image: ResourceId,
    ) -> Self {
        Self {
            frame: id.offscreen_frame(),
            hidden: false,
            image,
        }
    }

    /// Draw the bitmap clipped to the layer frame, unless hidden.
    pub fn draw<A, D>(
        &self,
        assets: &A,
        target: &mut D,
    ) where
        A: AssetStore,
        D: DrawTarget<Color = BinaryColor>,
    {
        if self.hidden {
            return;
        }
        let mut clipped = target.clipped(&self.frame);
        assets.draw_bitmap(self.image, self.frame, &mut clipped);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::Framebuffer;
    use crate::icons::{RESOURCE_ID_BLUETOOTH_ON, VectorIcons};

    #[test]
    fn test_offscreen_frame_is_just_above_screen() {
        for id in LayerId::ALL {
            let off = id.offscreen_frame();
            assert_eq!(off.size, id.resting_frame().size);
            assert_eq!(off.top_left.x, id.resting_frame().top_left.x);
            assert_eq!(off.top_left.y + off.size.height as i32, 0);
        }
    }

    #[test]
    fn test_offscreen_layer_draws_nothing() {
        let mut fb = Framebuffer::new();
        IconLayer::offscreen(LayerId::Bluetooth, RESOURCE_ID_BLUETOOTH_ON).draw(&VectorIcons, &mut fb);
        assert_eq!(fb.lit_count(), 0);
    }

    #[test]
    fn test_hidden_layer_draws_nothing() {
        let mut fb = Framebuffer::new();
        let layer = IconLayer {
            frame: LayerId::Bluetooth.resting_frame(),
            hidden: true,
            image: RESOURCE_ID_BLUETOOTH_ON,
        };
        layer.draw(&VectorIcons, &mut fb);
        assert_eq!(fb.lit_count(), 0);
    }

    #[test]
    fn test_resting_layer_draws_inside_frame() {
        let mut fb = Framebuffer::new();
        let layer = IconLayer {
            frame: LayerId::Bluetooth.resting_frame(),
            hidden: false,
            image: RESOURCE_ID_BLUETOOTH_ON,
        };
        layer.draw(&VectorIcons, &mut fb);
        assert!(fb.lit_count() > 0);
    }

    #[test]
    fn test_partially_visible_layer_is_clipped() {
        let mut full = Framebuffer::new();
        let mut half = Framebuffer::new();
        let rest = LayerId::Bluetooth.resting_frame();
        let layer = IconLayer {
            frame: rest,
            hidden: false,
            image: RESOURCE_ID_BLUETOOTH_ON,
        };
        layer.draw(&VectorIcons, &mut full);
        IconLayer {
            frame: Rectangle::new(Point::new(rest.top_left.x, -6), rest.size),
            ..layer
        }
        .draw(&VectorIcons, &mut half);
        assert!(half.lit_count() > 0);
        assert!(half.lit_count() < full.lit_count());
    }
}
