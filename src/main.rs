#![no_std]
#![no_main]

#[cfg(target_os = "none")]
extern crate rlibc;

use core::panic::PanicInfo;

use reginald_kernel::{
    drivers::serial,
    framebuffer::{DescriptorError, Framebuffer, FramebufferDescriptor},
    kernel, BootConfig,
};

/// Entry point jumped to by the UEFI loader after it exits boot services.
#[cfg(not(feature = "bootloader-api"))]
#[no_mangle]
pub extern "C" fn _start(descriptor: *const FramebufferDescriptor) -> ! {
    // SAFETY: the loader passes a pointer to a descriptor that stays alive
    // for the whole program.
    match unsafe { descriptor.as_ref() } {
        Some(descriptor) => kernel_start(descriptor),
        None => kernel_abort(DescriptorError::NullBase),
    }
}

#[cfg(feature = "bootloader-api")]
bootloader_api::entry_point!(kernel_main);

#[cfg(feature = "bootloader-api")]
fn kernel_main(boot_info: &'static mut bootloader_api::BootInfo) -> ! {
    let descriptor = match boot_info.framebuffer.as_mut() {
        Some(fb) => FramebufferDescriptor::from_boot_framebuffer(fb),
        None => Err(DescriptorError::NullBase),
    };
    match descriptor {
        Ok(descriptor) => kernel_start(&descriptor),
        Err(e) => kernel_abort(e),
    }
}

fn kernel_start(descriptor: &FramebufferDescriptor) -> ! {
    let config = BootConfig::DEFAULT;
    let serial = kernel::init_kernel(&config);

    log::debug!("{:#?}", descriptor);

    // SAFETY: firmware hands the region over exclusively and never reclaims it.
    match unsafe { Framebuffer::from_descriptor(descriptor) } {
        Ok(mut fb) => kernel::run(serial, &mut fb, &config),
        Err(e) => log::error!("framebuffer rejected: {}", e),
    }

    halt_loop()
}

fn kernel_abort(err: DescriptorError) -> ! {
    let _ = kernel::init_kernel(&BootConfig::DEFAULT);
    log::error!("no usable framebuffer: {}", err);
    halt_loop()
}

fn halt_loop() -> ! {
    loop {
        x86_64::instructions::hlt();
    }
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    use core::fmt::Write;

    let msg = info.message();
    let loc = info.location();
    // The lock may be held by whatever panicked.
    if let Some(serial) = serial::get() {
        if let Some(mut port) = serial.try_lock() {
            let _ = writeln!(port, "PANIC : {} | {:?}", msg, loc);
        }
    }

    halt_loop()
}
