//! # Common Components
//!
//! Everything around the embedding core that deals with the outside world.
//!
//! ## Modules
//!
//! - [`config`]: Configuration parsing utilities
//! - [`image_io`]: Loading and saving images on disk

pub mod config;
pub mod image_io;
