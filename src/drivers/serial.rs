//! # 16550 UART Driver
//!
//! Polled, transmit-only driver for the diagnostic serial channel.
//!
//! ## Line Setup
//!
//! `init()` programs 38400 baud (divisor 3), 8 data bits, no parity, one stop
//! bit, FIFO enabled with a 14-byte threshold. No status is checked.
//!
//! ## Output
//!
//! Every byte waits for the transmit holding register to drain. Text output
//! turns `\n` into `\r\n`.
//!
//! ## Usage
//!
//! ```ignore
//! let serial = serial::init(0x3F8);
//! serial.lock().write_text("hello\n");
//! serial_println!("value = {}", 42);
//! ```

use core::fmt;

use spin::{Mutex, Once};

use crate::drivers::port::PortIo;

const DATA: u16 = 0;
const INT_ENABLE: u16 = 1;
const FIFO_CTRL: u16 = 2;
const LINE_CTRL: u16 = 3;
const MODEM_CTRL: u16 = 4;
const LINE_STATUS: u16 = 5;

/// Transmitter holding register empty
const LSR_THR_EMPTY: u8 = 0x20;

pub struct SerialPort<P: PortIo> {
    base: u16,
    io: P,
}

impl<P: PortIo> SerialPort<P> {
    /// Creates a handle for the UART at `base`. Does not touch hardware.
    pub const fn new(base: u16, io: P) -> Self {
        Self { base, io }
    }

    pub fn init(&mut self) {
        self.out(INT_ENABLE, 0x00); // Disable interrupts
        self.out(LINE_CTRL, 0x80); // DLAB on
        self.out(DATA, 0x03); // Divisor lo: 38400 baud
        self.out(INT_ENABLE, 0x00); // Divisor hi
        self.out(LINE_CTRL, 0x03); // 8N1
        self.out(FIFO_CTRL, 0xC7); // FIFO on, cleared, 14-byte threshold
        self.out(MODEM_CTRL, 0x0B); // IRQs enabled, RTS/DSR set
    }

    pub fn is_transmit_empty(&mut self) -> bool {
        self.io.read_u8(self.base + LINE_STATUS) & LSR_THR_EMPTY != 0
    }

    pub fn write_byte(&mut self, byte: u8) {
        while !self.is_transmit_empty() {
            core::hint::spin_loop();
        }
        self.out(DATA, byte);
    }

    pub fn write_text(&mut self, text: &str) {
        for &byte in text.as_bytes() {
            if byte == b'\n' {
                self.write_byte(b'\r');
            }
            self.write_byte(byte);
        }
    }

    fn out(&mut self, offset: u16, value: u8) {
        self.io.write_u8(self.base + offset, value);
    }

    #[cfg(test)]
    pub(crate) fn io(&self) -> &P {
        &self.io
    }
}

impl<P: PortIo> fmt::Write for SerialPort<P> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_text(s);
        Ok(())
    }
}

/// Programs the UART on the first call for `cell` and returns its handle.
/// Later calls return the existing handle and never touch `io`.
pub fn init_in<P: PortIo>(
    cell: &Once<Mutex<SerialPort<P>>>,
    base: u16,
    io: impl FnOnce() -> P,
) -> &Mutex<SerialPort<P>> {
    cell.call_once(|| {
        let mut port = SerialPort::new(base, io());
        port.init();
        Mutex::new(port)
    })
}

#[cfg(target_arch = "x86_64")]
mod global {
    use spin::{Mutex, Once};

    use super::{init_in, SerialPort};
    use crate::drivers::port::X86PortIo;

    pub type HardwareSerial = SerialPort<X86PortIo>;

    static SERIAL: Once<Mutex<HardwareSerial>> = Once::new();

    /// Programs COM hardware on the first call and returns the shared handle.
    /// Later calls return the existing handle, whatever `base` they pass.
    pub fn init(base: u16) -> &'static Mutex<HardwareSerial> {
        init_in(&SERIAL, base, || unsafe { X86PortIo::new() })
    }

    pub fn get() -> Option<&'static Mutex<HardwareSerial>> {
        SERIAL.get()
    }
}

#[cfg(target_arch = "x86_64")]
pub use global::{get, init, HardwareSerial};

#[macro_export]
macro_rules! serial_print {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        if let Some(serial) = $crate::drivers::serial::get() {
            let _ = write!(serial.lock(), $($arg)*);
        }
    }};
}

#[macro_export]
macro_rules! serial_println {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        if let Some(serial) = $crate::drivers::serial::get() {
            let _ = writeln!(serial.lock(), $($arg)*);
        }
    }};
}

#[cfg(test)]
pub(crate) mod mock {
    use super::PortIo;

    /// Records every port write and reports the transmitter busy for the
    /// first `busy_polls` status reads.
    #[derive(Debug, Default)]
    pub struct MockPortIo {
        pub writes: Vec<(u16, u8)>,
        pub status_reads: usize,
        pub busy_polls: usize,
    }

    impl MockPortIo {
        pub fn transmitted(&self, base: u16) -> Vec<u8> {
            self.writes
                .iter()
                .filter(|(port, _)| *port == base)
                .map(|(_, value)| *value)
                .collect()
        }
    }

    impl PortIo for MockPortIo {
        fn read_u8(&mut self, _port: u16) -> u8 {
            self.status_reads += 1;
            if self.busy_polls > 0 {
                self.busy_polls -= 1;
                0x00
            } else {
                0x20
            }
        }

        fn write_u8(&mut self, port: u16, value: u8) {
            self.writes.push((port, value));
        }
    }
}
