//! Framebuffer writer
use core::fmt;

use embedded_graphics::{pixelcolor::Rgb888, prelude::*};

use super::color::Color;
use super::descriptor::{check_geometry, DescriptorError, FramebufferDescriptor, PixelFormat};
use super::BYTES_PER_PIXEL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawError {
    OutOfBounds { x: i64, y: i64 },
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::OutOfBounds { x, y } => write!(f, "pixel ({}, {}) is off-screen", x, y),
        }
    }
}

pub struct Framebuffer<'a> {
    pixels: &'a mut [u32],
    pub width: usize,
    pub height: usize,
    pub stride: usize,
    pub pixel_format: PixelFormat,
}

impl<'a> Framebuffer<'a> {
    /// Wraps `pixels` as a `width` x `height` surface with `stride` pixels
    /// per scanline.
    pub fn new(
        pixels: &'a mut [u32],
        width: usize,
        height: usize,
        stride: usize,
    ) -> Result<Self, DescriptorError> {
        check_geometry(width, height, stride, pixels.len() * BYTES_PER_PIXEL)?;
        Ok(Self {
            pixels,
            width,
            height,
            stride,
            pixel_format: PixelFormat::Rgb,
        })
    }

    pub fn with_format(mut self, format: PixelFormat) -> Self {
        self.pixel_format = format;
        self
    }

    /// # Safety
    ///
    /// `desc.buffer` must point to `desc.size` bytes of writable memory that
    /// nothing else accesses for the rest of the program.
    pub unsafe fn from_descriptor(
        desc: &FramebufferDescriptor,
    ) -> Result<Framebuffer<'static>, DescriptorError> {
        desc.validate()?;
        let pixels = core::slice::from_raw_parts_mut(
            desc.buffer as *mut u32,
            desc.size / BYTES_PER_PIXEL,
        );
        Ok(Framebuffer {
            pixels,
            width: desc.width,
            height: desc.height,
            stride: desc.stride,
            pixel_format: desc.format(),
        })
    }

    fn is_visible(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width as u64 && (y as u64) < self.height as u64
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.offset(x, y)])
        } else {
            None
        }
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) -> Result<(), DrawError> {
        let (x, y) = (x as i64, y as i64);
        if !self.is_visible(x, y) {
            return Err(DrawError::OutOfBounds { x, y });
        }
        let offset = self.offset(x as usize, y as usize);
        self.pixels[offset] = color.to_packed();
        Ok(())
    }

    /// Writes one pixel without a bounds check.
    ///
    /// # Safety
    ///
    /// `y * stride + x` must lie inside the framebuffer region. Only
    /// on-screen coordinates are checked, and only in debug builds.
    pub unsafe fn set_pixel_unchecked(&mut self, x: usize, y: usize, color: Color) {
        debug_assert!(x < self.width && y < self.height, "pixel ({}, {}) off-screen", x, y);
        let offset = self.offset(x, y);
        *self.pixels.as_mut_ptr().add(offset) = color.to_packed();
    }

    /// Fills `w` x `h` pixels starting at `(x, y)`.
    ///
    /// The first row at or past `height` ends the fill. A column at or past
    /// `width` ends only its own row. Rows and columns left of or above the
    /// origin are never visited.
    pub fn fill_rectangle(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        let packed = color.to_packed();
        let (width, height) = (self.width as i64, self.height as i64);
        let (x, y) = (x as i64, y as i64);

        for dy in (-y).max(0)..h as i64 {
            let py = y + dy;
            if py >= height {
                break;
            }

            for dx in (-x).max(0)..w as i64 {
                let px = x + dx;
                if px >= width {
                    break;
                }
                let offset = self.offset(px as usize, py as usize);
                self.pixels[offset] = packed;
            }
        }
    }

    /// Sets the first `count` bytes of the region to `value`, ignoring pixel
    /// boundaries. Stops at the end of the region.
    pub fn fill_bytes(&mut self, count: usize, value: u8) {
        let bytes = self.as_bytes_mut();
        let count = count.min(bytes.len());
        bytes[..count].fill(value);
    }

    pub fn clear(&mut self, color: Color) {
        self.fill_rectangle(0, 0, self.width as u32, self.height as u32, color);
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        let len = self.pixels.len() * BYTES_PER_PIXEL;
        // u32 -> u8 reinterpretation of memory we hold exclusively
        unsafe { core::slice::from_raw_parts_mut(self.pixels.as_mut_ptr() as *mut u8, len) }
    }
}

// Implement DrawTarget for embedded-graphics
impl DrawTarget for Framebuffer<'_> {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            // Off-screen pixels are dropped one by one
            let _ = self.set_pixel(x, y, color.into());
        }
        Ok(())
    }
}

impl OriginDimensions for Framebuffer<'_> {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}
