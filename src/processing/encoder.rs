//! # Message Encoder
//!
//! Writes a framed message into the low bit of consecutive pixels.
//!
//! ## Frame layout
//!
//! ```text
//! <decimal byte count> ':' <raw message bytes>
//! ```
//!
//! The count is the length of the raw message, not of the whole frame. Each
//! frame byte is written most significant bit first, one bit per pixel, in
//! row-major order starting at (0, 0).
//!
//! ## Capacity
//! A `W x H` grid holds exactly `W * H` bits. The check runs before the first
//! pixel is touched, so a rejected message leaves the grid unchanged.

use log::{debug, warn};

use super::bits::{byte_bits, set_lsb};
use super::cursor::Cursor;
use super::error::{Result, StegError};
use super::grid::PixelGridMut;

/// Separates the decimal length prefix from the message body.
pub const DELIMITER: u8 = b':';

/// Outcome of a successful [`hide`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedSummary {
    /// Raw message length in bytes
    pub message_bytes: usize,
    /// Length including prefix and delimiter
    pub framed_bytes: usize,
    pub bits_written: u64,
    pub capacity_bits: u64,
}

/// Build `<len>:<message>`.
pub fn frame_message(message: &[u8]) -> Vec<u8> {
    let prefix = message.len().to_string();
    let mut framed = Vec::with_capacity(prefix.len() + 1 + message.len());
    framed.extend_from_slice(prefix.as_bytes());
    framed.push(DELIMITER);
    framed.extend_from_slice(message);
    framed
}

/// Size of the frame for a message of `len` bytes.
pub fn framed_len(len: u64) -> u64 {
    let digits = len.checked_ilog10().map_or(1, |d| u64::from(d) + 1);
    digits + 1 + len
}

/// Largest message (in bytes) that fits in `capacity_bits`, or `None` when
/// not even an empty frame fits.
pub fn max_message_len(capacity_bits: u64) -> Option<u64> {
    let capacity_bytes = capacity_bits / 8;
    let mut len = capacity_bytes.saturating_sub(2);
    while len > 0 && framed_len(len) > capacity_bytes {
        len -= 1;
    }
    (framed_len(len) <= capacity_bytes).then_some(len)
}

/// Hide `message` in `grid`, mutating it in place.
///
/// # Errors
/// - [`StegError::CapacityExceeded`] if the framed message needs more bits
///   than the grid has pixels. The grid is not modified.
pub fn hide<G: PixelGridMut + ?Sized>(message: &[u8], grid: &mut G) -> Result<EmbedSummary> {
    let framed = frame_message(message);
    let required_bits = framed.len() as u64 * 8;
    let available_bits = grid.capacity_bits();

    if required_bits > available_bits {
        warn!(
            "Message of {} bytes does not fit: need {} bits, image holds {}",
            message.len(),
            required_bits,
            available_bits
        );
        return Err(StegError::CapacityExceeded {
            required_bits,
            available_bits,
        });
    }

    debug!(
        "Embedding {} framed bytes into {}x{} grid ({} of {} bits)",
        framed.len(),
        grid.width(),
        grid.height(),
        required_bits,
        available_bits
    );

    let mut cursor = Cursor::new();
    for (i, bit) in framed.iter().flat_map(|&byte| byte_bits(byte)).enumerate() {
        // Only step between bits so the final pixel can be used.
        if i > 0 {
            cursor.advance(&*grid)?;
        }
        let (x, y) = (cursor.x(), cursor.y());
        let value = grid.pixel(x, y);
        grid.set_pixel(x, y, set_lsb(value, bit));
    }

    Ok(EmbedSummary {
        message_bytes: message.len(),
        framed_bytes: framed.len(),
        bits_written: required_bits,
        capacity_bits: available_bits,
    })
}

/// Text convenience over [`hide`].
pub fn hide_str<G: PixelGridMut + ?Sized>(message: &str, grid: &mut G) -> Result<EmbedSummary> {
    hide(message.as_bytes(), grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::bits::get_lsb;
    use crate::processing::grid::{MemoryGrid, PixelGrid};

    #[test]
    fn test_frame_message() {
        assert_eq!(frame_message(b"hello"), b"5:hello".to_vec());
        assert_eq!(frame_message(b""), b"0:".to_vec());
        assert_eq!(frame_message(b"a:b"), b"3:a:b".to_vec());
    }

    #[test]
    fn test_framed_len() {
        assert_eq!(framed_len(0), 2);
        assert_eq!(framed_len(9), 11);
        assert_eq!(framed_len(10), 13);
        assert_eq!(framed_len(100), 104);
    }

    #[test]
    fn test_max_message_len() {
        assert_eq!(max_message_len(8), None);
        assert_eq!(max_message_len(16), Some(0));
        // 50x50 holds 312 bytes: "308:" + 308
        assert_eq!(max_message_len(2500), Some(308));
        // 12 bytes: "9:" + 9 fits, "10:" + 10 does not
        assert_eq!(max_message_len(96), Some(9));
    }

    #[test]
    fn test_bits_written_msb_first() {
        let mut grid = MemoryGrid::new(8, 3).unwrap();
        hide(b"A", &mut grid).unwrap();
        // "1:A" = 0x31 0x3A 0x41
        let bits: Vec<u32> = grid.pixels().iter().map(|&p| get_lsb(p)).collect();
        assert_eq!(&bits[0..8], &[0, 0, 1, 1, 0, 0, 0, 1]);
        assert_eq!(&bits[8..16], &[0, 0, 1, 1, 1, 0, 1, 0]);
        assert_eq!(&bits[16..24], &[0, 1, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_only_low_bit_changes() {
        let pixels: Vec<u32> = (0..64).map(|i| 0xFF80_4020 + i * 2).collect();
        let mut grid = MemoryGrid::from_pixels(8, 8, pixels.clone()).unwrap();
        hide(b"xyz", &mut grid).unwrap();
        for (before, after) in pixels.iter().zip(grid.pixels()) {
            assert_eq!(before >> 1, after >> 1);
        }
    }

    #[test]
    fn test_exact_fit_uses_last_pixel() {
        // "1:Z" is 24 bits
        let mut grid = MemoryGrid::new(6, 4).unwrap();
        let summary = hide(b"Z", &mut grid).unwrap();
        assert_eq!(summary.bits_written, 24);
        assert_eq!(summary.capacity_bits, 24);
        // 'Z' = 0b0101_1010
        assert_eq!(get_lsb(grid.pixel(5, 3)), 0);
        assert_eq!(get_lsb(grid.pixel(4, 3)), 1);
    }

    #[test]
    fn test_capacity_exceeded_leaves_grid_untouched() {
        let pixels: Vec<u32> = (0..2500).map(|i| i * 7 + 1).collect();
        let mut grid = MemoryGrid::from_pixels(50, 50, pixels.clone()).unwrap();
        let message = vec![b'q'; 400];

        let err = hide(&message, &mut grid).unwrap_err();

        assert_eq!(
            err,
            StegError::CapacityExceeded {
                required_bits: 404 * 8,
                available_bits: 2500
            }
        );
        assert_eq!(grid.pixels(), pixels.as_slice());
    }

    #[test]
    fn test_summary() {
        let mut grid = MemoryGrid::new(50, 50).unwrap();
        let summary = hide_str("hello", &mut grid).unwrap();
        assert_eq!(
            summary,
            EmbedSummary {
                message_bytes: 5,
                framed_bytes: 7,
                bits_written: 56,
                capacity_bits: 2500,
            }
        );
    }
}
