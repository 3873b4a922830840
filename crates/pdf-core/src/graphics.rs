//! Rectangle drawing operators

use crate::document::Color;

/// How a rectangle is painted
///
/// A style may fill, stroke, or both; an empty style paints nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectStyle {
    /// Fill color
    pub fill: Option<Color>,
    /// Stroke color
    pub stroke: Option<Color>,
    /// Stroke line width in points
    pub line_width: f64,
}

impl RectStyle {
    /// Solid fill, no stroke
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
            line_width: 0.0,
        }
    }

    /// Stroke only
    pub fn stroked(color: Color, line_width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(color),
            line_width,
        }
    }
}

/// Generate operators to draw a rectangle
///
/// # Arguments
/// * `x` - X coordinate in points
/// * `y` - Y coordinate in points (from bottom, PDF coordinates)
/// * `width` - Rectangle width in points
/// * `height` - Rectangle height in points
/// * `style` - Fill/stroke style
///
/// # Returns
/// PDF content stream operators as bytes
pub fn generate_rect_operators(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    style: &RectStyle,
) -> Vec<u8> {
    let mut ops = String::from("q\n");

    if let Some(fill) = style.fill {
        ops.push_str(&format!("{} {} {} rg\n", fill.r, fill.g, fill.b));
    }
    if let Some(stroke) = style.stroke {
        ops.push_str(&format!("{} {} {} RG\n", stroke.r, stroke.g, stroke.b));
        ops.push_str(&format!("{} w\n", style.line_width));
    }

    ops.push_str(&format!("{x} {y} {width} {height} re\n"));

    // Path-painting operator depends on which colors are set
    let paint = match (style.fill.is_some(), style.stroke.is_some()) {
        (true, true) => "B\n",
        (true, false) => "f\n",
        (false, true) => "S\n",
        (false, false) => "n\n",
    };
    ops.push_str(paint);
    ops.push_str("Q\n");

    ops.into_bytes()
}
