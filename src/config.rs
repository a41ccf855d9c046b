//! Fixed boot parameters.
use log::LevelFilter;

use crate::framebuffer::Color;

/// COM1
pub const DEFAULT_SERIAL_BASE: u16 = 0x3F8;

/// Rectangle drawn once at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplashRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy)]
pub struct BootConfig {
    pub serial_base: u16,
    pub log_level: LevelFilter,
    /// Written right after the serial port comes up.
    pub banner: &'static str,
    /// Written once the splash rectangle is on screen.
    pub progress_marker: Option<&'static str>,
    /// Last line before the halt loop.
    pub farewell: &'static str,
    /// Number of leading framebuffer bytes overwritten with `clear_value`.
    pub clear_bytes: usize,
    pub clear_value: u8,
    pub splash: SplashRect,
}

impl BootConfig {
    pub const DEFAULT: BootConfig = BootConfig {
        serial_base: DEFAULT_SERIAL_BASE,
        log_level: LevelFilter::Info,
        banner: "hello qemu serial\n",
        progress_marker: Some("drawed\n"),
        farewell: "we cleared\n",
        clear_bytes: 5000,
        clear_value: 0xFF,
        splash: SplashRect {
            x: 0,
            y: 0,
            width: 40,
            height: 40,
            color: Color::WHITE,
        },
    };
}

impl Default for BootConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
