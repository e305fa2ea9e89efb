//! Event log page.
//!
//! ```text
//! EVENT LOG          hidden
//! BT on  BATT 80% CHG
//! ──────────────────────────
//! > 12:04:31 tap: showing
//! > 12:04:32 hide scheduled
//! > _
//! ```

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_4X6;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::Text;
use embedded_graphics_simulator::SimulatorDisplay;
use heapless::String;
use profont::PROFONT_9_POINT;
use watchface_common::Watchface;
use watchface_common::config::SCREEN_WIDTH;

use crate::services::SimServices;

const HEADER_Y: i32 = 10;
const STATUS_Y: i32 = 22;
const DIVIDER_Y: i32 = 27;
const LOG_Y: i32 = 36;
const LOG_LINE_HEIGHT: i32 = 8;
const COL1_X: i32 = 2;
const PROMPT_WIDTH: i32 = 8;

pub fn draw_log_page(
    display: &mut SimulatorDisplay<BinaryColor>,
    face: &Watchface,
    services: &SimServices,
) {
    display.clear(BinaryColor::Off).ok();
    draw_header(display, face);
    draw_status(display, services);

    Line::new(Point::new(COL1_X, DIVIDER_Y), Point::new(SCREEN_WIDTH as i32 - COL1_X, DIVIDER_Y))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(display)
        .ok();

    draw_log_terminal(display, face);
}

fn draw_header(
    display: &mut SimulatorDisplay<BinaryColor>,
    face: &Watchface,
) {
    let style = MonoTextStyle::new(&PROFONT_9_POINT, BinaryColor::On);
    Text::new("EVENT LOG", Point::new(COL1_X, HEADER_Y), style).draw(display).ok();

    let label = face.state().overlay.state().label();
    let x = SCREEN_WIDTH as i32 - COL1_X - 4 * label.len() as i32;
    Text::new(label, Point::new(x, HEADER_Y), MonoTextStyle::new(&FONT_4X6, BinaryColor::On))
        .draw(display)
        .ok();
}

fn draw_status(
    display: &mut SimulatorDisplay<BinaryColor>,
    services: &SimServices,
) {
    let style = MonoTextStyle::new(&FONT_4X6, BinaryColor::On);
    let battery = services.battery();

    let mut s: String<32> = String::new();
    let _ = write!(
        s,
        "BT {}  BATT {}%{}",
        if services.connected() { "on" } else { "off" },
        battery.charge_percent,
        if battery.charging { " CHG" } else { "" }
    );
    Text::new(&s, Point::new(COL1_X, STATUS_Y), style).draw(display).ok();
}

fn draw_log_terminal(
    display: &mut SimulatorDisplay<BinaryColor>,
    face: &Watchface,
) {
    let style = MonoTextStyle::new(&FONT_4X6, BinaryColor::On);
    let mut y = LOG_Y;

    for line in face.log().iter() {
        Text::new(">", Point::new(COL1_X, y), style).draw(display).ok();
        Text::new(line, Point::new(COL1_X + PROMPT_WIDTH, y), style).draw(display).ok();
        y += LOG_LINE_HEIGHT;
    }

    Text::new("> _", Point::new(COL1_X, y), style).draw(display).ok();
}
