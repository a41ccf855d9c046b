//! `log` backend over the diagnostic serial channel.
use core::fmt::{self, Write};

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Formats one record as `[LEVEL] target: message` followed by a newline.
pub fn write_record<W: Write>(out: &mut W, record: &Record<'_>) -> fmt::Result {
    writeln!(out, "[{:<5}] {}: {}", record.level(), record.target(), record.args())
}

/// Writes records to the serial singleton. Records logged before the port is
/// initialized, or while it is locked, are dropped.
pub struct SerialLogger;

static LOGGER: SerialLogger = SerialLogger;

impl Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        emit(record);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "x86_64")]
fn emit(record: &Record<'_>) {
    if let Some(serial) = crate::drivers::serial::get() {
        if let Some(mut port) = serial.try_lock() {
            let _ = write_record(&mut *port, record);
        }
    }
}

#[cfg(not(target_arch = "x86_64"))]
fn emit(_record: &Record<'_>) {}

/// Installs the serial logger. Fails if a logger is already set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
