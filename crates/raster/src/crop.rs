//! Normalized-rect cropping with a bounded output size

use crate::{RasterError, Result};
use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Maximum width of a cropped logo in pixels
pub const MAX_OUTPUT_WIDTH: u32 = 1000;
/// Maximum height of a cropped logo in pixels
pub const MAX_OUTPUT_HEIGHT: u32 = 1000;

/// Crop rectangle normalized to [0,1] of the original upload
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl CropRect {
    /// The whole image
    pub fn full() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            w: 1.0,
            h: 1.0,
        }
    }

    /// True when every coordinate lies in [0,1] and the rect has extent
    pub fn is_normalized(&self) -> bool {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        in_unit(self.x)
            && in_unit(self.y)
            && in_unit(self.w)
            && in_unit(self.h)
            && self.w > 0.0
            && self.h > 0.0
            && self.x + self.w <= 1.0 + 1e-9
            && self.y + self.h <= 1.0 + 1e-9
    }
}

/// Crop a region out of the source image
///
/// The source rect is `sx = x*bw, sy = y*bh, sw = round(w*bw),
/// sh = round(h*bh)`, clamped to the source bounds. The result is
/// downscaled (aspect preserved) when it exceeds
/// [`MAX_OUTPUT_WIDTH`]×[`MAX_OUTPUT_HEIGHT`]; it is never upscaled.
pub fn crop(img: &RgbaImage, rect: &CropRect) -> Result<RgbaImage> {
    let (bw, bh) = img.dimensions();

    let sx = (rect.x * bw as f64).max(0.0) as u32;
    let sy = (rect.y * bh as f64).max(0.0) as u32;
    let sw = (rect.w * bw as f64).round() as u32;
    let sh = (rect.h * bh as f64).round() as u32;

    let sx = sx.min(bw.saturating_sub(1));
    let sy = sy.min(bh.saturating_sub(1));
    let sw = sw.min(bw - sx);
    let sh = sh.min(bh - sy);

    if sw == 0 || sh == 0 {
        return Err(RasterError::EmptyCrop);
    }

    let cropped = imageops::crop_imm(img, sx, sy, sw, sh).to_image();

    // Downscale only; small selections stay at their native resolution
    let scale = (MAX_OUTPUT_WIDTH as f64 / sw as f64)
        .min(MAX_OUTPUT_HEIGHT as f64 / sh as f64)
        .min(1.0);
    if scale >= 1.0 {
        return Ok(cropped);
    }

    let out_w = ((sw as f64 * scale).round() as u32).max(1);
    let out_h = ((sh as f64 * scale).round() as u32).max(1);
    Ok(imageops::resize(&cropped, out_w, out_h, FilterType::Triangle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use pretty_assertions::assert_eq;

    fn gradient(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| Rgba([x as u8, y as u8, 0, 255]))
    }

    #[test]
    fn test_full_crop_is_identity_sized() {
        let img = gradient(40, 30);
        let out = crop(&img, &CropRect::full()).unwrap();
        assert_eq!(out.dimensions(), (40, 30));
    }

    #[test]
    fn test_quarter_crop() {
        let img = gradient(100, 80);
        let rect = CropRect {
            x: 0.5,
            y: 0.5,
            w: 0.5,
            h: 0.5,
        };
        let out = crop(&img, &rect).unwrap();
        assert_eq!(out.dimensions(), (50, 40));
        // Top-left of the crop is the center of the source
        assert_eq!(out.get_pixel(0, 0), img.get_pixel(50, 40));
    }

    #[test]
    fn test_crop_rounds_dimensions() {
        let img = gradient(99, 99);
        let rect = CropRect {
            x: 0.0,
            y: 0.0,
            w: 0.333,
            h: 0.333,
        };
        let out = crop(&img, &rect).unwrap();
        // 0.333 * 99 = 32.967 -> rounds to 33
        assert_eq!(out.dimensions(), (33, 33));
    }

    #[test]
    fn test_oversized_output_is_downscaled() {
        let img = RgbaImage::from_pixel(2400, 1200, Rgba([9, 9, 9, 255]));
        let out = crop(&img, &CropRect::full()).unwrap();
        // Limited by width: scale = 1000/2400
        assert_eq!(out.dimensions(), (1000, 500));
    }

    #[test]
    fn test_small_output_never_upscaled() {
        let img = gradient(10, 10);
        let out = crop(&img, &CropRect::full()).unwrap();
        assert_eq!(out.dimensions(), (10, 10));
    }

    #[test]
    fn test_zero_area_rect_is_error() {
        let img = gradient(10, 10);
        let rect = CropRect {
            x: 0.5,
            y: 0.5,
            w: 0.0,
            h: 0.5,
        };
        assert!(matches!(crop(&img, &rect), Err(RasterError::EmptyCrop)));
    }

    #[test]
    fn test_is_normalized() {
        assert!(CropRect::full().is_normalized());
        assert!(!CropRect {
            x: 0.8,
            y: 0.0,
            w: 0.5,
            h: 1.0
        }
        .is_normalized());
        assert!(!CropRect {
            x: -0.1,
            y: 0.0,
            w: 0.5,
            h: 0.5
        }
        .is_normalized());
    }
}
