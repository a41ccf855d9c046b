//! Fixed boot-time drawing sequence.
use spin::Mutex;

use crate::config::BootConfig;
use crate::drivers::{PortIo, SerialPort};
use crate::framebuffer::Framebuffer;

/// Writes the banner, clears the head of the framebuffer, draws the splash
/// rectangle and writes the closing line.
///
/// The serial lock is taken per write so logging in between cannot deadlock.
pub fn run<P: PortIo>(serial: &Mutex<SerialPort<P>>, fb: &mut Framebuffer<'_>, config: &BootConfig) {
    serial.lock().write_text(config.banner);

    log::debug!(
        "framebuffer {}x{} stride {} format {:?}",
        fb.width,
        fb.height,
        fb.stride,
        fb.pixel_format
    );

    fb.fill_bytes(config.clear_bytes, config.clear_value);

    let splash = config.splash;
    fb.fill_rectangle(splash.x, splash.y, splash.width, splash.height, splash.color);
    log::trace!("splash {:?} drawn", splash);

    if let Some(marker) = config.progress_marker {
        serial.lock().write_text(marker);
    }

    serial.lock().write_text(config.farewell);
}
