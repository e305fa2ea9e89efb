//! Core logic for the analog watchface.
//!
//! This crate contains platform-agnostic code shared between the desktop
//! simulator and the embassy firmware:
//!
//! - [`trig`]: Fixed-point angle circle and sine/cosine lookup
//! - [`angles`]: Wall-clock time to hand-rotation angles
//! - [`hands`]: Hand outlines and the rotate-and-translate transform
//! - [`framebuffer`]: 1-bit framebuffer with pixel read-back and inversion
//! - [`face`]: Marker dots, hands and pivot rendering
//! - [`icons`]: Bluetooth and battery icon state plus icon artwork
//! - [`layers`]: Status icon layers drawn over the face
//! - [`overlay`]: Slide-in/slide-out state machine for the status icons
//! - [`blink`]: Charging blink for the battery icon
//! - [`animations`]: Rectangle interpolation used by hosts to run slides
//! - [`events`]: Callback events and service subscriptions
//! - [`render`]: Dirty tracking for redraw coalescing
//! - [`scheduler`]: Host-side slide runner and hide timer
//! - [`log`]: Timestamped event log ring buffer
//! - [`watchface`]: The application object that owns all watchface state
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` and allocation free. Tests run with `std` enabled
//! (via `cfg_attr`) so the standard test harness works on the host:
//!
//! ```bash
//! cargo test -p watchface-common
//! ```

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod angles;
pub mod animations;
pub mod blink;
pub mod colors;
pub mod config;
pub mod events;
pub mod face;
pub mod framebuffer;
pub mod hands;
pub mod icons;
pub mod layers;
pub mod log;
pub mod overlay;
pub mod render;
pub mod scheduler;
pub mod trig;
pub mod watchface;

// Re-export commonly used items
pub use angles::{ClockAngles, WallTime};
pub use config::FeatureFlags;
pub use events::WatchEvent;
pub use framebuffer::Framebuffer;
pub use scheduler::OverlayScheduler;
pub use watchface::{InitialSnapshot, Watchface, WatchfaceState};
