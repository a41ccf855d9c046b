//! Kernel initialization phases
use spin::Mutex;

use crate::config::BootConfig;
use crate::drivers::serial::{self, HardwareSerial};
use crate::logger;

/// Brings up the diagnostic channel and the logger.
///
/// The UART is programmed only on the first call; the handle is shared for
/// the rest of the program.
pub fn init_kernel(config: &BootConfig) -> &'static Mutex<HardwareSerial> {
    let serial = serial::init(config.serial_base);

    // Nothing to recover: without a logger only `log` output is lost.
    let _ = init_phase("Logger", || {
        logger::init(config.log_level).map_err(|_| "logger already installed")
    });

    serial
}

fn init_phase<F>(name: &'static str, init_fn: F) -> Result<(), &'static str>
where
    F: FnOnce() -> Result<(), &'static str>,
{
    match init_fn() {
        Ok(()) => {
            log::debug!("{} initialized", name);
            Ok(())
        }
        Err(e) => {
            crate::serial_println!("{} failed: {}", name, e);
            Err(e)
        }
    }
}
