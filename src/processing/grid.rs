//! # Pixel Grids
//!
//! The core only needs a width, a height and one integer per pixel. Anything
//! that can hand out and accept those values can carry a hidden message.
//!
//! Two implementations ship with the crate:
//! - [`MemoryGrid`]: a plain row-major buffer, handy for tests and callers
//!   that already hold raw pixel words
//! - [`image::RgbaImage`]: each pixel is packed into one ARGB word
//!   (`a << 24 | r << 16 | g << 8 | b`), so only the low bit of the blue
//!   channel is ever changed

use image::{Rgba, RgbaImage};

use super::error::{Result, StegError};

/// Read access to a rectangular grid of integer pixels.
pub trait PixelGrid {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Pixel value at `(x, y)`. Callers keep `x < width` and `y < height`.
    fn pixel(&self, x: u32, y: u32) -> u32;

    /// Number of payload bits the grid can carry (one per pixel).
    fn capacity_bits(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }
}

/// Write access on top of [`PixelGrid`].
pub trait PixelGridMut: PixelGrid {
    fn set_pixel(&mut self, x: u32, y: u32, value: u32);
}

/// Owned, row-major grid of packed pixel values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryGrid {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl MemoryGrid {
    /// Zero-filled grid of the given size.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(StegError::EmptyGrid);
        }
        let len = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            pixels: vec![0; len],
        })
    }

    /// Wrap an existing row-major pixel buffer.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(StegError::EmptyGrid);
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(StegError::GridSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u32> {
        self.pixels
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl PixelGrid for MemoryGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> u32 {
        self.pixels[self.index(x, y)]
    }
}

impl PixelGridMut for MemoryGrid {
    fn set_pixel(&mut self, x: u32, y: u32, value: u32) {
        let idx = self.index(x, y);
        self.pixels[idx] = value;
    }
}

/// Pack an RGBA pixel into a single ARGB word.
pub fn pack_argb(pixel: &Rgba<u8>) -> u32 {
    let [r, g, b, a] = pixel.0;
    u32::from_be_bytes([a, r, g, b])
}

/// Inverse of [`pack_argb`].
pub fn unpack_argb(value: u32) -> Rgba<u8> {
    let [a, r, g, b] = value.to_be_bytes();
    Rgba([r, g, b, a])
}

impl PixelGrid for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel(&self, x: u32, y: u32) -> u32 {
        pack_argb(self.get_pixel(x, y))
    }
}

impl PixelGridMut for RgbaImage {
    fn set_pixel(&mut self, x: u32, y: u32, value: u32) {
        self.put_pixel(x, y, unpack_argb(value));
    }
}
