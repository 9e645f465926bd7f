//! Image decoding: bytes to layer handles, scheduled per slot.
//!
//! ## Key Types
//!
//! - `ImageSource`: in-memory bytes or a file path
//! - `DecodeScheduler`: one cancellable decode per slot, latest request wins
//! - `DecodeCompletion`: a finished decode tagged with slot and generation

pub mod raster;
pub mod scheduler;

pub use raster::{data_url, decode_file, decode_image, ImageSource};
pub use scheduler::{DecodeCompletion, DecodeScheduler};
