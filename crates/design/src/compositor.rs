//! Confirm and engrave document rendering
//!
//! Two documents are issued per design. The confirm sheet shows the
//! customer what they ordered: template background, the logo in place,
//! and a footer with the physical position and size. The engrave sheet is
//! what the workshop loads into the machine: the logo alone on a white
//! page with a faint area outline and the job metadata.

use crate::frame::{fit_within, format_mm, px_to_mm, CoordinateFrame};
use crate::placement::is_inside_area;
use crate::schema::{DesignPlacement, Rect, Size, Template};
use crate::{DesignError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use image::RgbaImage;
use pdf_core::{Align, Color, PdfDocument, RectStyle};

/// Left margin of the footer text block, in points
const FOOTER_MARGIN_X: f64 = 40.0;
/// Distance of the lowest footer baseline from the page bottom, in points
const FOOTER_MARGIN_Y: f64 = 28.0;
/// Footer line spacing in points
const FOOTER_LEADING: f64 = 14.0;
/// Footer font size in points
const FOOTER_FONT_SIZE: f32 = 10.0;

/// Renderer for a single template's output documents
pub struct PdfCompositor<'a> {
    template: &'a Template,
}

impl<'a> PdfCompositor<'a> {
    pub fn new(template: &'a Template) -> Self {
        Self { template }
    }

    /// Render the customer-facing confirm sheet
    ///
    /// The background raster is aspect-fitted over the canvas region; if it
    /// is missing or undecodable the sheet degrades to a white rectangle
    /// and rendering continues. A logo that cannot be embedded is fatal:
    /// a confirm sheet without the logo would confirm nothing.
    ///
    /// # Arguments
    /// * `background` - Background image bytes (PNG or JPEG), if available
    /// * `logo` - Processed logo pixels
    /// * `placement` - Logo rect on the template canvas
    /// * `design_id` - Issued design ID for the footer
    pub fn render_confirm(
        &self,
        background: Option<&[u8]>,
        logo: &RgbaImage,
        placement: &DesignPlacement,
        design_id: &str,
    ) -> Result<Vec<u8>> {
        self.check_placement(placement)?;

        let (page_w, page_h) = self.template.pdf.page_points();
        let frame = self.frame(page_w, page_h);
        let mut doc = PdfDocument::new(page_w, page_h);

        self.draw_background(&mut doc, &frame, background)?;
        self.draw_area_outline(&mut doc, &frame, Color::gray(0.5), 0.75)?;
        self.draw_logo(&mut doc, &frame, logo, placement)?;

        let dpi = self.template.pdf.dpi;
        let footer = format!(
            "Pos(mm): x={}mm y={}mm / Size(mm): w={}mm h={}mm",
            format_mm(px_to_mm(placement.x, dpi)),
            format_mm(px_to_mm(placement.y, dpi)),
            format_mm(px_to_mm(placement.w, dpi)),
            format_mm(px_to_mm(placement.h, dpi)),
        );
        doc.set_font_size(FOOTER_FONT_SIZE);
        doc.set_text_color(Color::black());
        doc.insert_text(
            &footer,
            1,
            FOOTER_MARGIN_X,
            page_h - FOOTER_MARGIN_Y - FOOTER_LEADING,
            Align::Left,
        )?;
        doc.insert_text(
            design_id,
            1,
            FOOTER_MARGIN_X,
            page_h - FOOTER_MARGIN_Y,
            Align::Left,
        )?;

        Ok(doc.to_bytes()?)
    }

    /// Render the workshop-facing engrave sheet
    ///
    /// White page, faint engraving-area outline for alignment, the logo at
    /// its placed position, and three metadata lines identifying the job.
    ///
    /// # Arguments
    /// * `logo` - Processed logo pixels (engrave-ready variant)
    /// * `placement` - Logo rect on the template canvas
    /// * `design_id` - Issued design ID
    /// * `created_at` - Issuance timestamp, printed as ISO-8601
    pub fn render_engrave(
        &self,
        logo: &RgbaImage,
        placement: &DesignPlacement,
        design_id: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Vec<u8>> {
        self.check_placement(placement)?;

        let (page_w, page_h) = self.template.pdf.page_points();
        let frame = self.frame(page_w, page_h);
        let mut doc = PdfDocument::new(page_w, page_h);

        self.draw_area_outline(&mut doc, &frame, Color::gray(0.85), 0.5)?;
        self.draw_logo(&mut doc, &frame, logo, placement)?;

        doc.set_font_size(FOOTER_FONT_SIZE);
        doc.set_text_color(Color::black());
        let lines = [
            format!("Design ID: {design_id}"),
            format!("Template: {}", self.template.key),
            format!(
                "Created at: {}",
                created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
            ),
        ];
        for (i, line) in lines.iter().enumerate() {
            let y = page_h - FOOTER_MARGIN_Y - (lines.len() - 1 - i) as f64 * FOOTER_LEADING;
            doc.insert_text(line, 1, FOOTER_MARGIN_X, y, Align::Left)?;
        }

        Ok(doc.to_bytes()?)
    }

    /// Reject a placement that escapes the engraving area when the
    /// template demands containment
    fn check_placement(&self, placement: &DesignPlacement) -> Result<()> {
        self.template.validate()?;
        if self.template.placement_rules.keep_inside_engraving_area
            && !is_inside_area(&placement.rect(), &self.template.engraving_area)
        {
            return Err(DesignError::Validation(format!(
                "placement {:?} escapes engraving area {:?}",
                placement.rect(),
                self.template.engraving_area
            )));
        }
        Ok(())
    }

    fn frame(&self, page_w: f64, page_h: f64) -> CoordinateFrame {
        CoordinateFrame::new(
            self.template.background.canvas_width_px,
            self.template.background.canvas_height_px,
            page_w,
            page_h,
        )
    }

    /// Draw the template background over the canvas region
    ///
    /// Missing or broken backgrounds degrade to a white rectangle so the
    /// confirm sheet still shows the logo at its true position.
    fn draw_background(
        &self,
        doc: &mut PdfDocument,
        frame: &CoordinateFrame,
        background: Option<&[u8]>,
    ) -> Result<()> {
        let canvas_rect = Rect::new(
            frame.offset_x,
            frame.offset_y,
            frame.canvas_width * frame.scale,
            frame.canvas_height * frame.scale,
        );

        if let Some(bytes) = background {
            if let Ok(dims) = pdf_core::get_dimensions(bytes) {
                let fitted = fit_within(
                    &Size {
                        w: dims.width as f64,
                        h: dims.height as f64,
                    },
                    &canvas_rect,
                );
                if doc
                    .insert_image(bytes, 1, fitted.x, fitted.y, fitted.w, fitted.h)
                    .is_ok()
                {
                    return Ok(());
                }
            }
        }

        doc.draw_rect(
            1,
            canvas_rect.x,
            canvas_rect.y,
            canvas_rect.w,
            canvas_rect.h,
            &RectStyle::filled(Color::white()),
        )?;
        Ok(())
    }

    fn draw_area_outline(
        &self,
        doc: &mut PdfDocument,
        frame: &CoordinateFrame,
        color: Color,
        line_width: f64,
    ) -> Result<()> {
        let area = frame.to_page(&self.template.engraving_area);
        doc.draw_rect(
            1,
            area.x,
            area.y,
            area.w,
            area.h,
            &RectStyle::stroked(color, line_width),
        )?;
        Ok(())
    }

    /// Embed the rotated logo at its page position; any failure is fatal
    fn draw_logo(
        &self,
        doc: &mut PdfDocument,
        frame: &CoordinateFrame,
        logo: &RgbaImage,
        placement: &DesignPlacement,
    ) -> Result<()> {
        let rotated = raster::rotate_quarter_turns(logo, placement.rotation.quarter_turns());
        let png = raster::encode_png(&rotated)?;
        let target = frame.to_page(&placement.rect());
        doc.insert_image(&png, 1, target.x, target.y, target.w, target.h)
            .map_err(|e| DesignError::Generation(format!("logo embed failed: {e}")))?;
        Ok(())
    }
}
