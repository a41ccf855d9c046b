//! # Framebuffer Graphics Module
//!
//! Direct pixel access to the linear framebuffer handed over by the loader.
//!
//! ## Modules
//!
//! - `descriptor`: `FramebufferDescriptor` as laid out by the loader, plus
//!   validation errors and the pixel format tag
//! - `framebuffer`: `Framebuffer`, the bounds-aware writer
//! - `color`: `Color` and its packed 32-bit form
//!
//! ## Pixel Layout
//!
//! Every pixel is one native-endian `u32`: bits 23..16 red, 15..8 green,
//! 7..0 blue, top byte zero. Scanlines are `stride` pixels apart.
//!
//! ## Clipping
//!
//! `fill_rectangle` clips against the right and bottom edges the same way the
//! boot trace expects: the first row past the bottom ends the whole fill, the
//! first column past the right edge ends that row. Rendering through
//! `embedded_graphics` clips each pixel on its own.

pub mod color;
pub mod descriptor;
pub mod framebuffer;

pub use color::Color;
pub use descriptor::{DescriptorError, FramebufferDescriptor, PixelFormat};
pub use framebuffer::{DrawError, Framebuffer};

/// Bytes per pixel for every supported format.
pub const BYTES_PER_PIXEL: usize = 4;
