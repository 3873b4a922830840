//! Decode/encode helpers

use crate::{RasterError, Result};
use image::RgbaImage;
use std::io::Cursor;

/// Decode uploaded image bytes into an RGBA pixel buffer
///
/// The format is sniffed from magic bytes; anything the `image` crate
/// understands is accepted. Corrupt or unsupported data is a
/// [`RasterError::Decode`].
pub fn decode(data: &[u8]) -> Result<RgbaImage> {
    let reader = image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| RasterError::Decode(e.to_string()))?;
    let img = reader
        .decode()
        .map_err(|e| RasterError::Decode(e.to_string()))?;
    Ok(img.to_rgba8())
}

/// Encode a pixel buffer as PNG bytes
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| RasterError::Encode(e.to_string()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode(&[0u8; 32]);
        assert!(matches!(err, Err(RasterError::Decode(_))));
    }

    #[test]
    fn test_png_round_trip() {
        let img = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 200]));
        let bytes = encode_png(&img).unwrap();
        let back = decode(&bytes).unwrap();

        assert_eq!(back.dimensions(), (3, 2));
        assert_eq!(back.get_pixel(0, 0), &Rgba([1, 2, 3, 200]));
    }

    #[test]
    fn test_decode_jpeg() {
        let rgb = image::RgbImage::from_pixel(4, 4, image::Rgb([100, 150, 200]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(rgb)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Jpeg)
            .unwrap();

        let img = decode(&bytes).unwrap();
        assert_eq!(img.dimensions(), (4, 4));
        // JPEG decode always yields opaque alpha
        assert_eq!(img.get_pixel(0, 0)[3], 255);
    }
}
