//! # LSB Message Hiding
//!
//! Hides an arbitrary byte message in the least significant bit of each pixel
//! of a grid, one bit per pixel, and recovers it again.
//!
//! ## Modules
//!
//! - [`grid`]: the pixel grid abstraction the core works against
//! - [`bits`]: read and write the low bit of a single pixel value
//! - [`cursor`]: row-major traversal of the grid
//! - [`encoder`]: frame a message as `<len>:<bytes>` and write it
//! - [`decoder`]: read the frame back
//! - [`error`]: failure cases shared by the above

pub mod bits;
pub mod cursor;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod grid;

// Re-export main functions for convenience
pub use decoder::{reveal, reveal_string};
pub use encoder::{hide, hide_str, max_message_len, EmbedSummary};
pub use error::{Result, StegError};
pub use grid::{MemoryGrid, PixelGrid, PixelGridMut};
