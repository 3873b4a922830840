//! Binary black/white conversion

use image::RgbaImage;

/// Luminance threshold separating white from black
const LUMA_THRESHOLD: f64 = 160.0;

/// Convert a logo to pure black and white in place
///
/// Per pixel: luminance `0.299R + 0.587G + 0.114B`; at or above the
/// threshold R, G, and B all become 255, otherwise 0. Alpha is untouched,
/// so transparency from background removal survives.
pub fn monochrome(img: &mut RgbaImage) {
    for pixel in img.pixels_mut() {
        let luma =
            0.299 * pixel[0] as f64 + 0.587 * pixel[1] as f64 + 0.114 * pixel[2] as f64;
        let value = if luma >= LUMA_THRESHOLD { 255 } else { 0 };
        pixel[0] = value;
        pixel[1] = value;
        pixel[2] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dark_pixel_goes_black() {
        let mut img = RgbaImage::from_pixel(1, 1, Rgba([100, 100, 100, 200]));
        monochrome(&mut img);
        assert_eq!(img.get_pixel(0, 0), &Rgba([0, 0, 0, 200]));
    }

    #[test]
    fn test_light_pixel_goes_white() {
        let mut img = RgbaImage::from_pixel(1, 1, Rgba([200, 200, 200, 55]));
        monochrome(&mut img);
        assert_eq!(img.get_pixel(0, 0), &Rgba([255, 255, 255, 55]));
    }

    #[test]
    fn test_threshold_boundary() {
        // Gray 160 has luminance exactly 160 -> white
        let mut at = RgbaImage::from_pixel(1, 1, Rgba([160, 160, 160, 255]));
        monochrome(&mut at);
        assert_eq!(at.get_pixel(0, 0)[0], 255);

        let mut below = RgbaImage::from_pixel(1, 1, Rgba([159, 159, 159, 255]));
        monochrome(&mut below);
        assert_eq!(below.get_pixel(0, 0)[0], 0);
    }

    #[test]
    fn test_saturated_colors_weighted_by_luminance() {
        // Pure green: luma 149.7 -> black; pure yellow: luma 225.9 -> white
        let mut green = RgbaImage::from_pixel(1, 1, Rgba([0, 255, 0, 255]));
        monochrome(&mut green);
        assert_eq!(green.get_pixel(0, 0)[0], 0);

        let mut yellow = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 0, 255]));
        monochrome(&mut yellow);
        assert_eq!(yellow.get_pixel(0, 0)[0], 255);
    }
}
