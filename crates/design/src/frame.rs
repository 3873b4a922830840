//! Canvas-to-page coordinate mapping
//!
//! The design canvas is measured in pixels with the origin at the top
//! left. Output pages are measured in points. A [`CoordinateFrame`] scales
//! the whole canvas uniformly onto the page and centers it, so every rect
//! on the canvas has exactly one spot on the page.

use crate::schema::{Rect, Size};

/// Points per millimeter at 72 dpi
const MM_PER_INCH: f64 = 25.4;

/// Uniform scale and centering offset from canvas pixels to page points
#[derive(Debug, Clone, Copy)]
pub struct CoordinateFrame {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub page_width: f64,
    pub page_height: f64,
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl CoordinateFrame {
    /// Fit a canvas onto a page, preserving aspect ratio and centering
    pub fn new(canvas_width: f64, canvas_height: f64, page_width: f64, page_height: f64) -> Self {
        let scale = f64::min(page_width / canvas_width, page_height / canvas_height);
        Self {
            canvas_width,
            canvas_height,
            page_width,
            page_height,
            scale,
            offset_x: (page_width - canvas_width * scale) / 2.0,
            offset_y: (page_height - canvas_height * scale) / 2.0,
        }
    }

    /// Map a canvas-pixel rect to a page-point rect (both top-origin)
    pub fn to_page(&self, rect: &Rect) -> Rect {
        Rect {
            x: self.offset_x + rect.x * self.scale,
            y: self.offset_y + rect.y * self.scale,
            w: rect.w * self.scale,
            h: rect.h * self.scale,
        }
    }
}

/// Aspect-fit a content size into a container rect, centered
///
/// Used for the confirm page's background raster, whose pixel dimensions
/// need not match the declared canvas.
pub fn fit_within(content: &Size, container: &Rect) -> Rect {
    let scale = f64::min(container.w / content.w, container.h / content.h);
    let w = content.w * scale;
    let h = content.h * scale;
    Rect {
        x: container.x + (container.w - w) / 2.0,
        y: container.y + (container.h - h) / 2.0,
        w,
        h,
    }
}

/// Convert canvas pixels to millimeters at the template's dpi
///
/// Rounded to one decimal, matching what the footer prints.
pub fn px_to_mm(px: f64, dpi: f64) -> f64 {
    (px * MM_PER_INCH / dpi * 10.0).round() / 10.0
}

/// Format a millimeter value the way the footer shows it
///
/// Whole numbers print without a decimal point: `12` rather than `12.0`,
/// but `8.5` keeps its fraction.
pub fn format_mm(mm: f64) -> String {
    format!("{}", mm)
}
