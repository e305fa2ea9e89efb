//! Analog watchface simulator for desktop platforms.
//!
//! Runs the watchface core in an SDL window using the
//! embedded-graphics-simulator crate, standing in for every watch service:
//!
//! | Key | Service |
//! |-----|---------|
//! | `Space` / `T` | Tap gesture |
//! | `B` | Toggle bluetooth connection |
//! | `C` | Toggle charging |
//! | `Up` / `Down` | Battery level ±10 % |
//! | `L` | Toggle the event log page |
//!
//! The tick source is the local wall clock, the animation service and hide
//! timer are an [`OverlayScheduler`] on `std::time::Instant`.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod pages;
mod screens;
mod services;
mod timing;

use std::thread;
use std::time::Instant;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{BinaryColorTheme, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use watchface_common::config::SCREEN_SIZE;
use watchface_common::icons::VectorIcons;
use watchface_common::{FeatureFlags, Framebuffer, OverlayScheduler, WatchEvent, Watchface};

use crate::pages::Page;
use crate::screens::draw_log_page;
use crate::services::{SimServices, WallClock};
use crate::timing::{BATTERY_STEP, FRAME_TIME};

fn main() {
    let mut display: SimulatorDisplay<BinaryColor> = SimulatorDisplay::new(SCREEN_SIZE);
    let output_settings = OutputSettingsBuilder::new()
        .scale(2)
        .theme(BinaryColorTheme::OledWhite)
        .build();
    let mut window = Window::new("Analog Watchface Sim", &output_settings);

    display.clear(BinaryColor::Off).ok();
    window.update(&display);

    let started = Instant::now();
    let now_ms = || started.elapsed().as_millis() as u64;

    let mut services = SimServices::new();
    let mut clock = WallClock::new();
    let mut face = Watchface::new(FeatureFlags::BUILD, SCREEN_SIZE, services.snapshot());
    let mut scheduler = OverlayScheduler::new();
    let mut fb = Framebuffer::new();
    let mut current_page = Page::default();

    loop {
        let frame_start = Instant::now();

        // Handle events
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => {
                    face.shutdown();
                    return;
                }
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    let event = match keycode {
                        Keycode::Space | Keycode::T => Some(WatchEvent::Tap),
                        Keycode::B => Some(services.toggle_bluetooth()),
                        Keycode::C => Some(services.toggle_charging()),
                        Keycode::Up => Some(services.adjust_battery(BATTERY_STEP)),
                        Keycode::Down => Some(services.adjust_battery(-BATTERY_STEP)),
                        Keycode::L => {
                            current_page = current_page.toggle();
                            if current_page == Page::Watchface {
                                face.mark_display_cleared();
                            }
                            None
                        }
                        _ => None,
                    };
                    if let Some(event) = event {
                        scheduler.dispatch(&mut face, event, now_ms());
                    }
                }
                _ => {}
            }
        }

        // Tick source
        if let Some(time) = clock.poll() {
            scheduler.dispatch(&mut face, WatchEvent::Tick(time), now_ms());
        }

        // Animation service and hide timer
        scheduler.poll(&mut face, now_ms());

        match current_page {
            Page::Watchface => {
                if face.needs_redraw() {
                    face.render(&mut fb, &VectorIcons);
                    display
                        .fill_contiguous(&Rectangle::new(Point::zero(), SCREEN_SIZE), fb.colors())
                        .ok();
                    face.end_frame();
                }
            }
            Page::Log => draw_log_page(&mut display, &face, &services),
        }

        window.update(&display);

        let elapsed = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(elapsed) {
            thread::sleep(remaining);
        }
    }
}
