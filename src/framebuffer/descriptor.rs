//! Framebuffer handoff structure shared with the loader.
use core::fmt;

use super::BYTES_PER_PIXEL;

/// Framebuffer description passed to the kernel entry point.
///
/// The layout is fixed by the loader and must not change.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FramebufferDescriptor {
    pub buffer: *mut u8,
    /// Length of the region in bytes.
    pub size: usize,
    /// Pixels per scanline.
    pub stride: usize,
    pub width: usize,
    pub height: usize,
    /// UEFI GOP pixel format tag, see [`PixelFormat`].
    pub pixel_format: u32,
}

impl FramebufferDescriptor {
    pub fn format(&self) -> PixelFormat {
        PixelFormat::from_raw(self.pixel_format)
    }

    /// Checks that the region can hold `height` scanlines of `stride` pixels
    /// and that the base is usable for 32-bit pixel access.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if self.buffer.is_null() {
            return Err(DescriptorError::NullBase);
        }
        if self.buffer as usize % BYTES_PER_PIXEL != 0 {
            return Err(DescriptorError::Misaligned(self.buffer as usize));
        }
        check_geometry(self.width, self.height, self.stride, self.size)
    }

    /// Builds a descriptor from the `bootloader_api` framebuffer.
    #[cfg(feature = "bootloader-api")]
    pub fn from_boot_framebuffer(
        fb: &mut bootloader_api::info::FrameBuffer,
    ) -> Result<Self, DescriptorError> {
        let info = fb.info();
        if info.bytes_per_pixel != BYTES_PER_PIXEL {
            return Err(DescriptorError::UnsupportedBytesPerPixel(
                info.bytes_per_pixel,
            ));
        }
        let buffer = fb.buffer_mut();
        Ok(Self {
            buffer: buffer.as_mut_ptr(),
            size: buffer.len(),
            stride: info.stride,
            width: info.width,
            height: info.height,
            pixel_format: PixelFormat::from(info.pixel_format).raw(),
        })
    }
}

/// Shared by the descriptor path and slice-backed framebuffers.
pub(crate) fn check_geometry(
    width: usize,
    height: usize,
    stride: usize,
    available: usize,
) -> Result<(), DescriptorError> {
    if stride < width {
        return Err(DescriptorError::StrideTooSmall { stride, width });
    }
    let required = stride
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
        .ok_or(DescriptorError::RegionTooSmall {
            required: usize::MAX,
            available,
        })?;
    if available < required {
        return Err(DescriptorError::RegionTooSmall {
            required,
            available,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorError {
    NullBase,
    Misaligned(usize),
    StrideTooSmall { stride: usize, width: usize },
    RegionTooSmall { required: usize, available: usize },
    UnsupportedBytesPerPixel(usize),
}

impl fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescriptorError::NullBase => write!(f, "framebuffer base is null"),
            DescriptorError::Misaligned(addr) => {
                write!(f, "framebuffer base {:#x} is not 4-byte aligned", addr)
            }
            DescriptorError::StrideTooSmall { stride, width } => {
                write!(f, "stride {} is smaller than width {}", stride, width)
            }
            DescriptorError::RegionTooSmall {
                required,
                available,
            } => write!(
                f,
                "region holds {} bytes, {} required",
                available, required
            ),
            DescriptorError::UnsupportedBytesPerPixel(bpp) => {
                write!(f, "{} bytes per pixel not supported", bpp)
            }
        }
    }
}

/// Channel layout reported by firmware. Drawing always writes `0x00RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb,
    Bgr,
    Bitmask,
    BltOnly,
    Unknown(u32),
}

impl PixelFormat {
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            0 => PixelFormat::Rgb,
            1 => PixelFormat::Bgr,
            2 => PixelFormat::Bitmask,
            3 => PixelFormat::BltOnly,
            other => PixelFormat::Unknown(other),
        }
    }

    pub const fn raw(self) -> u32 {
        match self {
            PixelFormat::Rgb => 0,
            PixelFormat::Bgr => 1,
            PixelFormat::Bitmask => 2,
            PixelFormat::BltOnly => 3,
            PixelFormat::Unknown(other) => other,
        }
    }
}

#[cfg(feature = "bootloader-api")]
impl From<bootloader_api::info::PixelFormat> for PixelFormat {
    fn from(format: bootloader_api::info::PixelFormat) -> Self {
        use bootloader_api::info::PixelFormat as Boot;
        match format {
            Boot::Rgb => PixelFormat::Rgb,
            Boot::Bgr => PixelFormat::Bgr,
            Boot::Unknown { .. } => PixelFormat::Bitmask,
            _ => PixelFormat::BltOnly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(buf: &mut [u32], width: usize, height: usize, stride: usize) -> FramebufferDescriptor {
        FramebufferDescriptor {
            buffer: buf.as_mut_ptr() as *mut u8,
            size: buf.len() * BYTES_PER_PIXEL,
            stride,
            width,
            height,
            pixel_format: 1,
        }
    }

    #[test]
    fn test_valid_descriptor() {
        let mut buf = vec![0u32; 16 * 8];
        let desc = descriptor(&mut buf, 12, 8, 16);
        assert_eq!(desc.validate(), Ok(()));
        assert_eq!(desc.format(), PixelFormat::Bgr);
    }

    #[test]
    fn test_null_base_rejected() {
        let mut buf = vec![0u32; 4];
        let mut desc = descriptor(&mut buf, 2, 2, 2);
        desc.buffer = core::ptr::null_mut();
        assert_eq!(desc.validate(), Err(DescriptorError::NullBase));
    }

    #[test]
    fn test_misaligned_base_rejected() {
        let mut buf = vec![0u32; 8];
        let mut desc = descriptor(&mut buf, 2, 2, 2);
        desc.buffer = unsafe { desc.buffer.add(1) };
        assert!(matches!(desc.validate(), Err(DescriptorError::Misaligned(_))));
    }

    #[test]
    fn test_stride_smaller_than_width_rejected() {
        let mut buf = vec![0u32; 64];
        let desc = descriptor(&mut buf, 10, 4, 8);
        assert_eq!(
            desc.validate(),
            Err(DescriptorError::StrideTooSmall {
                stride: 8,
                width: 10
            })
        );
    }

    #[test]
    fn test_short_region_rejected() {
        let mut buf = vec![0u32; 10 * 10 - 1];
        let desc = descriptor(&mut buf, 10, 10, 10);
        assert_eq!(
            desc.validate(),
            Err(DescriptorError::RegionTooSmall {
                required: 400,
                available: 396
            })
        );
    }

    #[test]
    fn test_overflowing_geometry_rejected() {
        assert!(matches!(
            check_geometry(1, usize::MAX, usize::MAX, 64),
            Err(DescriptorError::RegionTooSmall { .. })
        ));
    }

    #[test]
    fn test_pixel_format_tags() {
        for raw in 0..5 {
            assert_eq!(PixelFormat::from_raw(raw).raw(), raw);
        }
        assert_eq!(PixelFormat::from_raw(9), PixelFormat::Unknown(9));
    }
}
