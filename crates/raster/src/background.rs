//! Background removal
//!
//! The background reference color is sampled from the four corner pixels.
//! Pixels whose RGB distance to the reference falls under the level's
//! threshold become transparent; a 12-unit band above the threshold fades
//! alpha linearly so anti-aliased logo edges keep a soft rim.

use image::RgbaImage;

/// Width of the soft-edge band above the removal threshold
const SOFT_EDGE: f64 = 12.0;

/// Alpha at or below this value is treated as fully transparent
const ALPHA_CUTOFF: u8 = 8;

/// Qualitative background-removal strength
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransparentLevel {
    Weak,
    #[default]
    Medium,
    Strong,
}

impl TransparentLevel {
    /// RGB Euclidean-distance threshold for this level
    pub fn threshold(self) -> f64 {
        match self {
            TransparentLevel::Weak => 24.0,
            TransparentLevel::Medium => 40.0,
            TransparentLevel::Strong => 64.0,
        }
    }
}

/// Average RGB of the corner pixels that are not transparent
///
/// White is the fallback when all four corners are transparent.
fn corner_reference(img: &RgbaImage) -> [f64; 3] {
    let (w, h) = img.dimensions();
    let corners = [
        img.get_pixel(0, 0),
        img.get_pixel(w - 1, 0),
        img.get_pixel(0, h - 1),
        img.get_pixel(w - 1, h - 1),
    ];

    let mut sum = [0.0f64; 3];
    let mut count = 0u32;
    for p in corners {
        if p[3] > 0 {
            sum[0] += p[0] as f64;
            sum[1] += p[1] as f64;
            sum[2] += p[2] as f64;
            count += 1;
        }
    }

    if count == 0 {
        [255.0, 255.0, 255.0]
    } else {
        [
            sum[0] / count as f64,
            sum[1] / count as f64,
            sum[2] / count as f64,
        ]
    }
}

/// Core removal pass with a raw distance threshold
///
/// A threshold of 0 skips the distance logic entirely; only the trailing
/// alpha cleanup runs (near-invisible pixels snap to fully transparent).
pub(crate) fn strip_background(img: &mut RgbaImage, threshold: f64) {
    let reference = corner_reference(img);

    for pixel in img.pixels_mut() {
        if threshold > 0.0 {
            let dr = pixel[0] as f64 - reference[0];
            let dg = pixel[1] as f64 - reference[1];
            let db = pixel[2] as f64 - reference[2];
            let d = (dr * dr + dg * dg + db * db).sqrt();

            if d < threshold {
                pixel[3] = 0;
            } else if d < threshold + SOFT_EDGE {
                pixel[3] = (pixel[3] as f64 * (d - threshold) / SOFT_EDGE) as u8;
            }
        }

        if pixel[3] <= ALPHA_CUTOFF {
            pixel[3] = 0;
        }
    }
}

/// Strip the background color from a logo in place
pub fn remove_background(img: &mut RgbaImage, level: TransparentLevel) {
    strip_background(img, level.threshold());
}

/// Strip the background and flatten the survivors to a black silhouette
///
/// Used when preparing a logo for engraving: anything still visible after
/// removal is forced to solid black (alpha untouched); anything at or
/// below the alpha cutoff is dropped entirely.
pub fn remove_background_engrave(img: &mut RgbaImage, level: TransparentLevel) {
    strip_background(img, level.threshold());

    for pixel in img.pixels_mut() {
        if pixel[3] > ALPHA_CUTOFF {
            pixel[0] = 0;
            pixel[1] = 0;
            pixel[2] = 0;
        } else {
            pixel[3] = 0;
        }
    }
}
