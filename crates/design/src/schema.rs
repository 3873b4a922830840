//! Template and design schema types
//!
//! These are the wire shapes exchanged with the template store and the
//! front end; all coordinates are in template canvas pixels unless a field
//! name says otherwise.

use crate::{DesignError, Result};
use serde::{Deserialize, Serialize};

pub use raster::{CropRect, TransparentLevel};

/// Axis-aligned rectangle in template canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

/// Width/height pair in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

/// Template background raster and design-canvas dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    /// Asset file name of the background raster
    pub file_name: String,
    /// Design canvas width in pixels
    pub canvas_width_px: f64,
    /// Design canvas height in pixels
    pub canvas_height_px: f64,
}

/// Operator policy limits for customer placements
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRules {
    /// Whether the customer may rotate the logo in 90° steps
    pub allow_rotate: bool,
    /// Whether a placement must stay inside the engraving area to issue
    pub keep_inside_engraving_area: bool,
    /// Minimum scale relative to the base logo size
    pub min_scale: f64,
    /// Maximum scale relative to the base logo size
    pub max_scale: f64,
}

/// Physical page size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
}

/// Page orientation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Output document settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfSettings {
    #[serde(default)]
    pub page_size: PageSize,
    #[serde(default)]
    pub orientation: Orientation,
    /// Pixel density used only for the human-readable mm footer
    pub dpi: f64,
}

impl PdfSettings {
    /// Page dimensions in points, orientation applied
    pub fn page_points(&self) -> (f64, f64) {
        let (w, h) = match self.page_size {
            PageSize::A4 => (pdf_core::A4_WIDTH, pdf_core::A4_HEIGHT),
        };
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// An operator-defined engraving template
///
/// Immutable per render call; owned by the template store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Store key of this template, embedded in engrave-document metadata
    pub key: String,
    pub background: Background,
    pub engraving_area: Rect,
    pub placement_rules: PlacementRules,
    pub pdf: PdfSettings,
}

impl Template {
    /// Check structural invariants: the engraving area must lie within the
    /// canvas bounds and the scale limits must be ordered.
    pub fn validate(&self) -> Result<()> {
        let area = &self.engraving_area;
        let cw = self.background.canvas_width_px;
        let ch = self.background.canvas_height_px;

        if area.w <= 0.0 || area.h <= 0.0 {
            return Err(DesignError::Validation(
                "engraving area has no extent".to_string(),
            ));
        }
        if area.x < 0.0 || area.y < 0.0 || area.x + area.w > cw || area.y + area.h > ch {
            return Err(DesignError::Validation(format!(
                "engraving area {:?} exceeds canvas {}x{}",
                area, cw, ch
            )));
        }
        if self.placement_rules.min_scale > self.placement_rules.max_scale {
            return Err(DesignError::Validation(
                "minScale exceeds maxScale".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-session logo processing settings chosen by the customer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoSettings {
    /// Crop rect normalized to [0,1] of the original upload
    pub crop: CropSpec,
    pub transparent_level: LevelSpec,
    pub monochrome: bool,
}

impl LogoSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.crop.as_crop_rect().is_normalized() {
            return Err(DesignError::Validation(format!(
                "crop rect out of range: {:?}",
                self.crop
            )));
        }
        Ok(())
    }
}

/// Serde-facing crop rect (raster's CropRect without serde baggage)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CropSpec {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl CropSpec {
    pub fn as_crop_rect(&self) -> CropRect {
        CropRect {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        }
    }
}

/// Serde-facing transparency level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelSpec {
    Weak,
    #[default]
    Medium,
    Strong,
}

impl From<LevelSpec> for TransparentLevel {
    fn from(level: LevelSpec) -> Self {
        match level {
            LevelSpec::Weak => TransparentLevel::Weak,
            LevelSpec::Medium => TransparentLevel::Medium,
            LevelSpec::Strong => TransparentLevel::Strong,
        }
    }
}

/// 90°-step rotation of a placed logo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Number of clockwise quarter turns
    pub fn quarter_turns(self) -> u8 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    /// True for 90° and 270°, where the visual footprint swaps w and h
    pub fn is_sideways(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(deg: u16) -> std::result::Result<Self, Self::Error> {
        match deg {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(format!("rotation must be a multiple of 90: {other}")),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(r: Rotation) -> u16 {
        match r {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }
}

/// The logo's current rect (+ optional rotation) on the template canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignPlacement {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(default, rename = "rotationDeg")]
    pub rotation: Rotation,
}

impl DesignPlacement {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

impl From<Rect> for DesignPlacement {
    fn from(r: Rect) -> Self {
        Self {
            x: r.x,
            y: r.y,
            w: r.w,
            h: r.h,
            rotation: Rotation::Deg0,
        }
    }
}
