//! Error taxonomy for the embedding core.

/// Errors raised while hiding or recovering a message.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StegError {
    /// The framed message needs more bits than the grid holds.
    /// Raised before any pixel is touched.
    #[error("message needs {required_bits} bits but the image only holds {available_bits}")]
    CapacityExceeded {
        required_bits: u64,
        available_bits: u64,
    },

    /// The cursor was advanced past the last pixel of the grid.
    #[error("cursor moved beyond the end of the image (at {x}, {y})")]
    OutOfBounds { x: u32, y: u32 },

    /// The image ran out of pixels before the declared message was read.
    #[error("hidden message is truncated (declared {declared:?} bytes, recovered {recovered})")]
    TruncatedMessage {
        declared: Option<usize>,
        recovered: usize,
    },

    /// The bytes in front of the ':' delimiter are not a decimal length.
    #[error("malformed length prefix {prefix:?}")]
    MalformedLength { prefix: String },

    /// The recovered payload is not valid UTF-8 text.
    #[error("hidden message is not valid UTF-8")]
    InvalidUtf8,

    #[error("pixel grid must be at least 1x1")]
    EmptyGrid,

    #[error("pixel buffer holds {actual} values, expected {expected}")]
    GridSizeMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, StegError>;
