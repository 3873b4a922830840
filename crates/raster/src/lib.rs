//! Raster - Logo pixel processing
//!
//! This crate provides the raster half of the design pipeline:
//! - Decoding uploads and encoding processed logos as PNG
//! - Normalized-rect cropping with a bounded output size
//! - Background removal (distance-to-corner-color, with a soft edge band)
//! - Monochrome (binary black/white) conversion
//! - 90°-step rotation
//!
//! Every operation is a pure function over an [`image::RgbaImage`]: no
//! shared state, so independent calls can run concurrently without
//! coordination.
//!
//! # Example
//!
//! ```ignore
//! use raster::{CropRect, TransparentLevel};
//!
//! let mut logo = raster::decode(&upload_bytes)?;
//! let mut logo = raster::crop(&logo, &CropRect { x: 0.1, y: 0.1, w: 0.8, h: 0.8 })?;
//! raster::remove_background(&mut logo, TransparentLevel::Medium);
//! raster::monochrome(&mut logo);
//! let png = raster::encode_png(&logo)?;
//! ```

mod background;
mod codec;
mod crop;
mod monochrome;
mod rotate;

pub use background::{remove_background, remove_background_engrave, TransparentLevel};
pub use codec::{decode, encode_png};
pub use crop::{crop, CropRect, MAX_OUTPUT_HEIGHT, MAX_OUTPUT_WIDTH};
pub use monochrome::monochrome;
pub use rotate::{rotate90, rotate_quarter_turns};

use thiserror::Error;

/// Errors that can occur during raster processing
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Crop rectangle selects no pixels")]
    EmptyCrop,
}

/// Result type for raster operations
pub type Result<T> = std::result::Result<T, RasterError>;
