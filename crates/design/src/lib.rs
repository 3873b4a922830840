//! Design - templates, placement, and document issuance
//!
//! This crate ties the pipeline together:
//! - Template / logo-settings / placement schema types (JSON wire format)
//! - Placement engine: initial placement and interactive clamping
//! - Design ID generation
//! - The PDF compositor producing the confirm and engrave documents
//!
//! # Example
//!
//! ```ignore
//! use design::{initial_placement, PdfCompositor, Size};
//!
//! let base = Size { w: logo.width() as f64, h: logo.height() as f64 };
//! let placement = initial_placement(&template.engraving_area, &base).into();
//! let compositor = PdfCompositor::new(&template);
//! let confirm = compositor.render_confirm(Some(&bg_bytes), &logo, &placement, &id)?;
//! let engrave = compositor.render_engrave(&logo, &placement, &id, chrono::Utc::now())?;
//! ```

mod compositor;
mod frame;
mod ident;
mod logo;
mod placement;
mod schema;

pub use compositor::PdfCompositor;
pub use frame::{format_mm, px_to_mm, CoordinateFrame};
pub use ident::{DesignIdGenerator, ID_ALPHABET, ID_SUFFIX_LEN};
pub use logo::{process_logo, ProcessedLogo};
pub use placement::{
    clamp_position, clamp_scale, effective_base_size, initial_placement, is_inside_area,
    MIN_PLACEMENT_PX,
};
pub use schema::*;

use thiserror::Error;

/// Errors that can occur while building a design
#[derive(Debug, Error)]
pub enum DesignError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Raster error: {0}")]
    Raster(#[from] raster::RasterError),

    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_core::PdfError),

    #[error("Document generation failed: {0}")]
    Generation(String),
}

/// Result type for design operations
pub type Result<T> = std::result::Result<T, DesignError>;
