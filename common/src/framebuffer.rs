//! 1-bit framebuffer for the watch display.
//!
//! The face is composed into this buffer and the host then blits it to the
//! real panel (SDL window or SPI display). Unlike a write-only `DrawTarget`,
//! the framebuffer can read pixels back, which the inverting composite needs.
//!
//! # Memory Layout
//!
//! Pixels are packed 8 per byte, MSB first, row-major:
//! 144 px / 8 = 18 bytes per row, 18 × 168 = 3024 bytes total.
//!
//! # Inverted Compositing
//!
//! [`Framebuffer::invert_masked`] flips every pixel that is lit in a mask.
//! Strokes are rasterized into a cleared mask first, so a pixel shared by two
//! segments is still inverted exactly once.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

const WIDTH: usize = SCREEN_WIDTH as usize;
const HEIGHT: usize = SCREEN_HEIGHT as usize;
const ROW_BYTES: usize = WIDTH.div_ceil(8);
const BUFFER_SIZE: usize = ROW_BYTES * HEIGHT;

/// Packed 1bpp framebuffer sized to the watch display.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    bits: [u8; BUFFER_SIZE],
}

impl Framebuffer {
    /// Create a framebuffer with every pixel off (background).
    pub const fn new() -> Self { Self { bits: [0; BUFFER_SIZE] } }

    /// Read a pixel. Returns `None` outside the display.
    pub fn pixel(
        &self,
        point: Point,
    ) -> Option<BinaryColor> {
        let (byte, mask) = Self::locate(point)?;
        Some(BinaryColor::from(self.bits[byte] & mask != 0))
    }

    /// Write a pixel. Points outside the display are ignored.
    #[inline]
    pub fn set_pixel(
        &mut self,
        point: Point,
        color: BinaryColor,
    ) {
        if let Some((byte, mask)) = Self::locate(point) {
            if color.is_on() {
                self.bits[byte] |= mask;
            } else {
                self.bits[byte] &= !mask;
            }
        }
    }

    /// Invert every pixel that is lit in `mask`.
    pub fn invert_masked(
        &mut self,
        mask: &Self,
    ) {
        for (dst, src) in self.bits.iter_mut().zip(mask.bits.iter()) {
            *dst ^= *src;
        }
    }

    /// Number of lit pixels.
    pub fn lit_count(&self) -> u32 { self.bits.iter().map(|b| b.count_ones()).sum() }

    /// Iterate all pixels row by row, for blitting to a panel.
    pub fn colors(&self) -> impl Iterator<Item = BinaryColor> + '_ {
        (0..HEIGHT).flat_map(move |y| {
            (0..WIDTH).map(move |x| {
                let byte = self.bits[y * ROW_BYTES + x / 8];
                BinaryColor::from(byte & (0x80 >> (x % 8)) != 0)
            })
        })
    }

    /// Byte index and bit mask for a point, if on screen.
    #[inline]
    fn locate(point: Point) -> Option<(usize, u8)> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let (x, y) = (point.x as usize, point.y as usize);
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        Some((y * ROW_BYTES + x / 8, 0x80 >> (x % 8)))
    }
}

impl Default for Framebuffer {
    fn default() -> Self { Self::new() }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size { Size::new(SCREEN_WIDTH, SCREEN_HEIGHT) }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point, color);
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.bits.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
