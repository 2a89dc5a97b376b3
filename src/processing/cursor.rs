//! Row-major traversal over a pixel grid.

use super::error::{Result, StegError};
use super::grid::PixelGrid;

/// Current position of an encode or decode pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    x: u32,
    y: u32,
}

impl Cursor {
    /// Cursor at the top-left pixel.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    /// Move to the next pixel, wrapping to the start of the next row.
    ///
    /// Fails with [`StegError::OutOfBounds`] when the move runs off the last
    /// row. The cursor is then left one row past the end and must not be used
    /// to address a pixel.
    pub fn advance<G: PixelGrid + ?Sized>(&mut self, grid: &G) -> Result<()> {
        self.x += 1;
        if self.x == grid.width() {
            self.x = 0;
            self.y += 1;
        }
        if self.y == grid.height() {
            return Err(StegError::OutOfBounds {
                x: self.x,
                y: self.y,
            });
        }
        Ok(())
    }
}
