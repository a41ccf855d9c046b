//! Byte-wide I/O port access.

/// Raw `inb`/`outb` style access to an I/O address space.
pub trait PortIo {
    fn read_u8(&mut self, port: u16) -> u8;
    fn write_u8(&mut self, port: u16, value: u8);
}

/// The real x86 I/O port space.
#[cfg(target_arch = "x86_64")]
#[derive(Debug)]
pub struct X86PortIo {
    _private: (),
}

#[cfg(target_arch = "x86_64")]
impl X86PortIo {
    /// # Safety
    ///
    /// Port writes reach hardware directly. The caller must only hand this to
    /// a driver that owns the ports it touches.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

#[cfg(target_arch = "x86_64")]
impl PortIo for X86PortIo {
    fn read_u8(&mut self, port: u16) -> u8 {
        use x86_64::instructions::port::Port;
        unsafe { Port::<u8>::new(port).read() }
    }

    fn write_u8(&mut self, port: u16, value: u8) {
        use x86_64::instructions::port::Port;
        unsafe { Port::<u8>::new(port).write(value) }
    }
}
