//! Boot-time kernel core: serial diagnostics and a linear framebuffer renderer.
//!
//! The library is `no_std` on the target and links `std` only for host unit
//! tests. The `kernel` binary in `main.rs` provides the entry point.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod drivers;
pub mod framebuffer;
pub mod kernel;
pub mod logger;

pub use config::BootConfig;
pub use framebuffer::{Color, Framebuffer, FramebufferDescriptor};
