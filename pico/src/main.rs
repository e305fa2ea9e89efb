//! Analog Watchface Firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Shows the 144 × 168 watchface centered on the Pimoroni PIM715 Display
//! Pack 2.8". The watch services are stood in for by the board:
//!
//! | Input | Service |
//! |-------|---------|
//! | A | Tap gesture |
//! | B | Toggle bluetooth connection |
//! | X | Toggle charging |
//! | Y | Battery -10 % (wraps to 100 %) |
//! | 1 Hz ticker | Wall clock, counted from [`BOOT_TIME`] |

#![no_std]
#![no_main]

mod button;
mod config;
mod display;

use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::Spi;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker, Timer};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use watchface_common::config::SCREEN_SIZE;
use watchface_common::icons::{BatterySnapshot, VectorIcons};
use watchface_common::watchface::InitialSnapshot;
use watchface_common::{FeatureFlags, Framebuffer, OverlayScheduler, WallTime, WatchEvent, Watchface};
use {defmt_rtt as _, panic_probe as _};

use crate::button::Button;
use crate::config::{BATTERY_STEP, BOOT_TIME, FRAME_MS};
use crate::display::{blit_face, display_spi_config, init_display};

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"pico2-watchface"),
    embassy_rp::binary_info::rp_program_description!(c"Analog watchface on PIM715 Display"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

/// Latest wall time from the tick task. The main loop takes it once per frame.
static TICK: Signal<CriticalSectionRawMutex, WallTime> = Signal::new();

/// Wall time `uptime` after boot.
fn wall_time_at(uptime: Duration) -> WallTime {
    WallTime::from_seconds_of_day(BOOT_TIME.seconds_of_day() + uptime.as_secs() as u32)
}

/// 1 Hz tick source.
#[embassy_executor::task]
async fn tick_task(boot: Instant) {
    let mut ticker = Ticker::every(Duration::from_secs(1));
    loop {
        ticker.next().await;
        TICK.signal(wall_time_at(boot.elapsed()));
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Analog watchface starting...");

    let p = embassy_rp::init(Default::default());
    let boot = Instant::now();

    // Initialize RGB LED (active-low: Low = ON)
    // PIM715: Red=26, Green=27, Blue=28
    let mut led_r = Output::new(p.PIN_26, Level::High); // Off
    let mut led_g = Output::new(p.PIN_27, Level::High); // Off
    let _led_b = Output::new(p.PIN_28, Level::High); // Off

    // Flash red to indicate startup
    led_r.set_low();
    Timer::after_millis(200).await;
    led_r.set_high();

    // Initialize display pins
    // PIM715 pinout: CS=17, DC=16, CLK=18, MOSI=19, Backlight=20
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let _backlight = Output::new(p.PIN_20, Level::High); // Turn on backlight

    // Initialize SPI (TX-only, display doesn't need MISO)
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, display_spi_config());

    // Initialize display (no reset pin on PIM715)
    let mut display = init_display(spi, cs, dc);

    info!("Display initialized!");

    // Flash green to indicate display init success
    led_g.set_low();
    Timer::after_millis(200).await;
    led_g.set_high();

    display.clear(Rgb565::BLACK).ok();

    // Initialize buttons (active-low with internal pull-up)
    // PIM715: A=12, B=13, X=14, Y=15
    let mut btn_a = Button::new(Input::new(p.PIN_12, Pull::Up));
    let mut btn_b = Button::new(Input::new(p.PIN_13, Pull::Up));
    let mut btn_x = Button::new(Input::new(p.PIN_14, Pull::Up));
    let mut btn_y = Button::new(Input::new(p.PIN_15, Pull::Up));

    info!("Buttons initialized!");

    // Stand-in service values
    let mut connected = true;
    let mut battery = BatterySnapshot::new(80, false);

    let mut face = Watchface::new(
        FeatureFlags::BUILD,
        SCREEN_SIZE,
        InitialSnapshot {
            time: BOOT_TIME,
            connected,
            battery,
        },
    );
    let mut scheduler = OverlayScheduler::new();
    let mut fb = Framebuffer::new();

    spawner.spawn(tick_task(boot)).unwrap();
    info!("Tick task spawned");

    info!("Starting main loop...");

    loop {
        let now_ms = Instant::now().as_millis();

        if btn_a.just_pressed() {
            info!("Tap");
            scheduler.dispatch(&mut face, WatchEvent::Tap, now_ms);
        }

        if btn_b.just_pressed() {
            connected = !connected;
            info!("Bluetooth: {}", if connected { "connected" } else { "disconnected" });
            scheduler.dispatch(&mut face, WatchEvent::Connection(connected), now_ms);
        }

        if btn_x.just_pressed() {
            battery.charging = !battery.charging;
            info!("Battery: {}", battery);
            scheduler.dispatch(&mut face, WatchEvent::Battery(battery), now_ms);
        }

        if btn_y.just_pressed() {
            battery.charge_percent = match battery.charge_percent {
                0 => 100,
                percent => percent.saturating_sub(BATTERY_STEP),
            };
            info!("Battery: {}", battery);
            scheduler.dispatch(&mut face, WatchEvent::Battery(battery), now_ms);
        }

        if let Some(time) = TICK.try_take() {
            scheduler.dispatch(&mut face, WatchEvent::Tick(time), now_ms);
        }

        let overlay_before = face.state().overlay.state();
        scheduler.poll(&mut face, now_ms);
        let overlay_after = face.state().overlay.state();
        if overlay_after != overlay_before {
            info!("Overlay: {}", overlay_after.label());
        }

        if face.needs_redraw() {
            face.render(&mut fb, &VectorIcons);
            blit_face(&mut display, &fb);
            face.end_frame();
        }

        Timer::after_millis(FRAME_MS).await;
    }
}
