pub mod common;
pub mod processing;
pub mod utils;

pub use processing::{hide, reveal, MemoryGrid, PixelGrid, PixelGridMut, StegError};
