//! Upload-to-placeable-logo processing pipeline

use crate::schema::LogoSettings;
use crate::Result;
use image::RgbaImage;

/// The two render-ready variants produced from one upload
#[derive(Debug, Clone)]
pub struct ProcessedLogo {
    /// Full-color variant with the background stripped, for the confirm
    /// sheet (monochrome-converted when the settings ask for it)
    pub confirm: RgbaImage,
    /// Black-silhouette variant for the engrave sheet
    pub engrave: RgbaImage,
}

impl ProcessedLogo {
    /// Pixel dimensions shared by both variants
    pub fn dimensions(&self) -> (u32, u32) {
        self.confirm.dimensions()
    }
}

/// Run an uploaded image through the customer's processing settings
///
/// Decode, crop to the selected region, strip the background at the
/// chosen strength, then branch: the confirm variant keeps its colors
/// (optionally collapsed to black/white), the engrave variant flattens
/// every surviving pixel to solid black.
pub fn process_logo(data: &[u8], settings: &LogoSettings) -> Result<ProcessedLogo> {
    settings.validate()?;

    let decoded = raster::decode(data)?;
    let cropped = raster::crop(&decoded, &settings.crop.as_crop_rect())?;
    let level = settings.transparent_level.into();

    let mut confirm = cropped.clone();
    raster::remove_background(&mut confirm, level);
    if settings.monochrome {
        raster::monochrome(&mut confirm);
    }

    let mut engrave = cropped;
    raster::remove_background_engrave(&mut engrave, level);

    Ok(ProcessedLogo { confirm, engrave })
}
