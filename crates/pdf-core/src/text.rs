//! Text rendering utilities
//!
//! Text is rendered with the built-in Helvetica base font (WinAnsi
//! encoding, no embedded font program). Metric data for alignment comes
//! from the standard Helvetica AFM width table.

use crate::document::Color;
use crate::Align;

/// Helvetica glyph advance widths for ASCII 32..=126, in 1/1000 em units
/// (standard AFM metrics). Characters outside this range fall back to the
/// space width.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, // ' '..')'
    389, 584, 278, 333, 278, 278, 556, 556, 556, 556, // '*'..'3'
    556, 556, 556, 556, 556, 556, 278, 278, 584, 584, // '4'..'='
    584, 556, 1015, 667, 667, 722, 722, 667, 611, 778, // '>'..'G'
    722, 278, 500, 667, 556, 833, 722, 778, 667, 778, // 'H'..'Q'
    722, 667, 611, 722, 667, 944, 667, 667, 611, 278, // 'R'..'['
    278, 278, 469, 556, 333, 556, 556, 500, 556, 556, // '\'..'e'
    278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 'f'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, // 'p'..'y'
    500, 334, 260, 334, 584, // 'z'..'~'
];

/// Measure text width in points for a given Helvetica font size
pub fn text_width_points(text: &str, font_size: f32) -> f64 {
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as u32;
            if (32..=126).contains(&code) {
                HELVETICA_WIDTHS[(code - 32) as usize] as u32
            } else {
                HELVETICA_WIDTHS[0] as u32
            }
        })
        .sum();

    units as f64 * font_size as f64 / 1000.0
}

/// Escape text for a PDF literal string
///
/// Backslash, parentheses, and line breaks must be escaped inside `(...)`.
pub fn escape_pdf_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Context for rendering text
pub struct TextRenderContext {
    /// PDF font resource name (e.g., "F1")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Text width in points (for alignment)
    pub text_width: f64,
    /// Text color (RGB)
    pub color: Color,
}

/// Generate PDF operators for text insertion
///
/// Creates the proper PDF text operators (BT, Tf, Td, Tj, ET) to render text
/// at a specific position with alignment support.
///
/// # Arguments
/// * `text` - Raw text (escaped here, emitted as a literal string)
/// * `x` - X coordinate in points (PDF coordinates, from left)
/// * `y` - Y coordinate in points (PDF coordinates, from bottom)
/// * `align` - Text alignment
/// * `ctx` - Text rendering context
///
/// # Returns
/// Vector of bytes containing the PDF operators
pub fn generate_text_operators(
    text: &str,
    x: f64,
    y: f64,
    align: Align,
    ctx: &TextRenderContext,
) -> Vec<u8> {
    let mut ops = String::new();

    // Calculate X offset for alignment
    let x_offset = match align {
        Align::Left => 0.0,
        Align::Center => -ctx.text_width / 2.0,
        Align::Right => -ctx.text_width,
    };

    let final_x = x + x_offset;
    let escaped = escape_pdf_string(text);

    // Begin Text
    ops.push_str("BT\n");

    // Set text color (rg operator for non-stroking color)
    ops.push_str(&format!(
        "{} {} {} rg\n",
        ctx.color.r, ctx.color.g, ctx.color.b
    ));

    // Set font and size: /F1 12 Tf
    ops.push_str(&format!("/{} {} Tf\n", ctx.font_name, ctx.font_size));

    // Move to position: x y Td
    ops.push_str(&format!("{final_x} {y} Td\n"));

    // Show text: (string) Tj
    ops.push_str(&format!("({escaped}) Tj\n"));

    // End Text
    ops.push_str("ET\n");

    ops.into_bytes()
}
