//! 90°-step rotation

use image::imageops;
use image::RgbaImage;

/// Rotate an image a quarter turn clockwise
///
/// The output has swapped dimensions. Pure: the source is untouched and
/// composing the operation N times yields a 90·N° rotation.
pub fn rotate90(img: &RgbaImage) -> RgbaImage {
    imageops::rotate90(img)
}

/// Rotate an image by `turns` quarter turns clockwise
pub fn rotate_quarter_turns(img: &RgbaImage, turns: u8) -> RgbaImage {
    match turns % 4 {
        0 => img.clone(),
        1 => imageops::rotate90(img),
        2 => imageops::rotate180(img),
        _ => imageops::rotate270(img),
    }
}
