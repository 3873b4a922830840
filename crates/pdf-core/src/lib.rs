//! PDF Core - Low-level PDF construction
//!
//! This crate provides functionality for:
//! - Building blank single-page PDF documents from scratch
//! - Embedding raster images (PNG with alpha via SMask, JPEG)
//! - Drawing filled/stroked rectangles
//! - Inserting text with the built-in Helvetica base font
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Align, Color, PdfDocument};
//!
//! let mut doc = PdfDocument::new(pdf_core::A4_WIDTH, pdf_core::A4_HEIGHT);
//! doc.insert_image(&png_bytes, 1, 100.0, 200.0, 150.0, 150.0)?;
//! doc.insert_text("Design ID: 250101_ABCDEFGH", 1, 40.0, 800.0, Align::Left)?;
//! let bytes = doc.to_bytes()?;
//! ```

mod document;
mod graphics;
mod image;
mod text;

pub use document::{Color, PdfDocument};
pub use graphics::RectStyle;
pub use image::{calculate_scaled_dimensions, get_dimensions, ImageDimensions, ImageScaleMode};
pub use text::text_width_points;

use thiserror::Error;

/// A4 page width in points
pub const A4_WIDTH: f64 = 595.28;
/// A4 page height in points
pub const A4_HEIGHT: f64 = 841.89;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("Image embed failed (neither PNG nor JPEG accepted): {0}")]
    EmbedError(String),

    #[error("PDF parsing error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}
