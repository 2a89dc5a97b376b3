//! # Message Decoder
//!
//! Recovers a message written by [`hide`](super::encoder::hide).
//!
//! Decoding is a single row-major pass over the grid driven by a two-state
//! machine:
//!
//! ```text
//! ReadingLength --':'--> ReadingMessage --(len bytes read)--> done
//! ```
//!
//! While reading the length every completed byte must be an ASCII digit. Once
//! the delimiter is seen the body is read as exactly `len` raw bytes, so the
//! message itself may contain ':' freely.

use log::debug;

use super::bits::get_lsb;
use super::cursor::Cursor;
use super::encoder::DELIMITER;
use super::error::{Result, StegError};
use super::grid::PixelGrid;

/// `usize::MAX` has 20 decimal digits on 64-bit targets.
const MAX_PREFIX_DIGITS: usize = 20;

#[derive(Debug)]
enum DecodeState {
    ReadingLength { prefix: Vec<u8> },
    ReadingMessage { declared: usize, message: Vec<u8> },
}

impl DecodeState {
    fn is_complete(&self) -> bool {
        matches!(self, DecodeState::ReadingMessage { declared, message } if message.len() == *declared)
    }

    fn truncated(&self) -> StegError {
        match self {
            DecodeState::ReadingLength { .. } => StegError::TruncatedMessage {
                declared: None,
                recovered: 0,
            },
            DecodeState::ReadingMessage { declared, message } => StegError::TruncatedMessage {
                declared: Some(*declared),
                recovered: message.len(),
            },
        }
    }
}

fn malformed(prefix: &[u8]) -> StegError {
    StegError::MalformedLength {
        prefix: String::from_utf8_lossy(prefix).into_owned(),
    }
}

fn parse_length(prefix: &[u8]) -> Result<usize> {
    if prefix.is_empty() {
        return Err(malformed(prefix));
    }
    std::str::from_utf8(prefix)
        .ok()
        .and_then(|digits| digits.parse::<usize>().ok())
        .ok_or_else(|| malformed(prefix))
}

/// Recover the raw message bytes hidden in `grid`.
///
/// # Errors
/// - [`StegError::MalformedLength`] if the prefix is not a decimal number
///   followed by ':'
/// - [`StegError::TruncatedMessage`] if the grid ends before the declared
///   number of bytes has been read
pub fn reveal<G: PixelGrid + ?Sized>(grid: &G) -> Result<Vec<u8>> {
    let capacity_bits = grid.capacity_bits();
    let mut state = DecodeState::ReadingLength { prefix: Vec::new() };
    let mut cursor = Cursor::new();
    let mut bits_read: u64 = 0;
    let mut acc: u8 = 0;
    let mut acc_bits = 0;

    loop {
        let bit = get_lsb(grid.pixel(cursor.x(), cursor.y())) as u8;
        acc = (acc << 1) | bit;
        acc_bits += 1;
        bits_read += 1;

        if acc_bits == 8 {
            let byte = acc;
            acc = 0;
            acc_bits = 0;

            match &mut state {
                DecodeState::ReadingLength { prefix } if byte == DELIMITER => {
                    let declared = parse_length(prefix)?;
                    debug!("Found length prefix: {} bytes", declared);

                    let remaining_bits = capacity_bits - bits_read;
                    let fits = (declared as u64)
                        .checked_mul(8)
                        .is_some_and(|needed| needed <= remaining_bits);
                    if !fits {
                        return Err(StegError::TruncatedMessage {
                            declared: Some(declared),
                            recovered: 0,
                        });
                    }

                    state = DecodeState::ReadingMessage {
                        declared,
                        message: Vec::with_capacity(declared),
                    };
                }
                DecodeState::ReadingLength { prefix } => {
                    prefix.push(byte);
                    if !byte.is_ascii_digit() || prefix.len() > MAX_PREFIX_DIGITS {
                        return Err(malformed(prefix));
                    }
                }
                DecodeState::ReadingMessage { message, .. } => message.push(byte),
            }
        }

        if state.is_complete() {
            break;
        }

        if cursor.advance(grid).is_err() {
            return Err(state.truncated());
        }
    }

    match state {
        DecodeState::ReadingMessage { message, .. } => {
            debug!("Recovered {} message bytes from {} bits", message.len(), bits_read);
            Ok(message)
        }
        DecodeState::ReadingLength { .. } => Err(state.truncated()),
    }
}

/// Recover a UTF-8 text message hidden in `grid`.
pub fn reveal_string<G: PixelGrid + ?Sized>(grid: &G) -> Result<String> {
    let bytes = reveal(grid)?;
    String::from_utf8(bytes).map_err(|_| StegError::InvalidUtf8)
}
