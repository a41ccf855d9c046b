//! Device Drivers
//!
//! - `port`: x86 I/O port access behind the `PortIo` trait
//! - `serial`: 16550 UART used as the diagnostic channel

pub mod port;
pub mod serial;

pub use port::PortIo;
#[cfg(target_arch = "x86_64")]
pub use port::X86PortIo;
pub use serial::SerialPort;
