//! Screen modules for the simulator's extra pages.

mod log;

pub use log::draw_log_page;
