//! End-to-end issuance: process a logo, place it, and render both sheets

use chrono::{TimeZone, Utc};
use design::{
    clamp_position, clamp_scale, effective_base_size, initial_placement, is_inside_area,
    Background, DesignIdGenerator, DesignPlacement, Orientation, PageSize, PdfCompositor,
    PdfSettings, PlacementRules, Rect, Size, Template,
};
use image::{Rgba, RgbaImage};
use std::collections::HashSet;

fn mug_template() -> Template {
    Template {
        key: "mug-classic".to_string(),
        background: Background {
            file_name: "mug.png".to_string(),
            canvas_width_px: 1200.0,
            canvas_height_px: 1600.0,
        },
        engraving_area: Rect::new(820.0, 1220.0, 280.0, 180.0),
        placement_rules: PlacementRules {
            allow_rotate: true,
            keep_inside_engraving_area: true,
            min_scale: 0.2,
            max_scale: 3.0,
        },
        pdf: PdfSettings {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            dpi: 300.0,
        },
    }
}

/// A dark glyph on a white field, like a typical uploaded logo scan
fn uploaded_logo() -> Vec<u8> {
    let mut img = RgbaImage::from_pixel(120, 60, Rgba([255, 255, 255, 255]));
    for y in 20..40 {
        for x in 30..90 {
            img.put_pixel(x, y, Rgba([20, 20, 20, 255]));
        }
    }
    raster::encode_png(&img).unwrap()
}

fn background_png() -> Vec<u8> {
    let img = RgbaImage::from_pixel(300, 400, Rgba([210, 190, 170, 255]));
    raster::encode_png(&img).unwrap()
}

fn page_content(bytes: &[u8]) -> String {
    let doc = lopdf::Document::load_mem(bytes).unwrap();
    let pages = doc.get_pages();
    let content = doc.get_page_content(pages[&1]).unwrap();
    String::from_utf8_lossy(&content).to_string()
}

#[test]
fn issue_confirm_and_engrave_sheets() {
    let template = mug_template();
    template.validate().unwrap();

    // Process the upload: crop to the glyph, strip the white field
    let settings = design::LogoSettings {
        crop: design::CropSpec {
            x: 0.2,
            y: 0.25,
            w: 0.6,
            h: 0.5,
        },
        transparent_level: design::LevelSpec::Medium,
        monochrome: false,
    };
    let logo = design::process_logo(&uploaded_logo(), &settings).unwrap();

    // Place it
    let (logo_w, logo_h) = logo.dimensions();
    let base = Size {
        w: logo_w as f64,
        h: logo_h as f64,
    };
    let initial = initial_placement(&template.engraving_area, &base);
    assert!(is_inside_area(&initial, &template.engraving_area));

    // Simulate a customer drag past the edge and an oversize resize
    let dragged = Rect::new(initial.x + 500.0, initial.y, initial.w, initial.h);
    let corrected = clamp_position(&dragged, &template.engraving_area);
    let resized = Rect::new(corrected.x, corrected.y, 900.0, 1.0);
    let sized = clamp_scale(
        &resized,
        &base,
        &template.placement_rules,
        &template.engraving_area,
    );
    let placement: DesignPlacement =
        clamp_position(&sized, &template.engraving_area).into();
    assert!(is_inside_area(&placement.rect(), &template.engraving_area));

    // Issue
    let mut ids = HashSet::new();
    let design_id = DesignIdGenerator::with_seed(2026).generate(&ids);
    ids.insert(design_id.clone());

    let compositor = PdfCompositor::new(&template);
    let confirm = compositor
        .render_confirm(Some(&background_png()), &logo.confirm, &placement, &design_id)
        .unwrap();
    let created = Utc.with_ymd_and_hms(2026, 8, 26, 14, 0, 0).unwrap();
    let engrave = compositor
        .render_engrave(&logo.engrave, &placement, &design_id, created)
        .unwrap();

    // Both parse back as one-page PDFs
    for bytes in [&confirm, &engrave] {
        assert!(bytes.starts_with(b"%PDF"));
        let doc = lopdf::Document::load_mem(bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    let confirm_text = page_content(&confirm);
    assert!(confirm_text.contains(&format!("({design_id}) Tj")));
    assert!(!confirm_text.contains(&format!("(Design ID: {design_id}) Tj")));
    assert!(confirm_text.contains("Pos\\(mm\\):"));
    // Background and logo both embedded
    assert!(confirm_text.contains("/Im1 Do"));
    assert!(confirm_text.contains("/Im2 Do"));

    let engrave_text = page_content(&engrave);
    assert!(engrave_text.contains("(Template: mug-classic) Tj"));
    assert!(engrave_text.contains("(Created at: 2026-08-26T14:00:00.000Z) Tj"));
}

#[test]
fn rotation_swaps_scale_bounds() {
    let template = mug_template();
    let base = Size { w: 600.0, h: 300.0 };

    // Sideways, the logo's footprint is 300x600 and the initial fit is
    // height-limited by the 180px-tall area.
    let sideways = effective_base_size(&base, design::Rotation::Deg90);
    let placed = initial_placement(&template.engraving_area, &sideways);
    assert!((placed.h - 162.0).abs() < 1e-9);
    assert!((placed.w - 81.0).abs() < 1e-9);
    assert!(is_inside_area(&placed, &template.engraving_area));
}

#[test]
fn missing_background_still_issues() {
    let template = mug_template();
    let logo = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
    let placement: DesignPlacement = initial_placement(
        &template.engraving_area,
        &Size { w: 10.0, h: 10.0 },
    )
    .into();

    let bytes = PdfCompositor::new(&template)
        .render_confirm(None, &logo, &placement, "260826_TESTTEST")
        .unwrap();
    let text = page_content(&bytes);
    // Degraded to a white canvas rectangle; the logo is the only image
    assert!(text.contains("1 1 1 rg"));
    assert_eq!(text.matches(" Do").count(), 1);
}
