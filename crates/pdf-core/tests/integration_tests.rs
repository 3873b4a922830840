//! Integration tests for pdf-core
//!
//! These tests verify end-to-end functionality with real PDF operations.

use pdf_core::{Align, Color, PdfDocument, RectStyle, A4_HEIGHT, A4_WIDTH};

/// Create a small PNG with an alpha channel for testing
fn create_test_png() -> Vec<u8> {
    let mut img = image::RgbaImage::from_pixel(8, 4, image::Rgba([10, 20, 30, 255]));
    img.put_pixel(0, 0, image::Rgba([10, 20, 30, 0]));

    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .expect("PNG encode failed");
    bytes
}

/// Create a small JPEG for testing
fn create_test_jpeg() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(6, 6, image::Rgb([200, 100, 50]));

    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Jpeg,
        )
        .expect("JPEG encode failed");
    bytes
}

fn content_bytes(pdf_bytes: &[u8]) -> Vec<u8> {
    let doc = lopdf::Document::load_mem(pdf_bytes).expect("reparse failed");
    let pages = doc.get_pages();
    let page_id = pages[&1];
    doc.get_page_content(page_id).expect("no content")
}

#[test]
fn test_blank_document_round_trip() {
    let mut doc = PdfDocument::new(A4_WIDTH, A4_HEIGHT);
    let bytes = doc.to_bytes().unwrap();

    let reparsed = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(reparsed.get_pages().len(), 1);

    let page_id = reparsed.get_pages()[&1];
    let page = reparsed.get_object(page_id).unwrap().as_dict().unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
    assert_eq!(media_box.len(), 4);
}

#[test]
fn test_landscape_media_box() {
    let mut doc = PdfDocument::new(A4_HEIGHT, A4_WIDTH);
    let bytes = doc.to_bytes().unwrap();

    let reparsed = lopdf::Document::load_mem(&bytes).unwrap();
    let page_id = reparsed.get_pages()[&1];
    let page = reparsed.get_object(page_id).unwrap().as_dict().unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
    let width = media_box[2].as_f32().unwrap();
    let height = media_box[3].as_f32().unwrap();
    assert!(width > height);
}

#[test]
fn test_text_lands_in_content_stream() {
    let mut doc = PdfDocument::new_a4();
    doc.set_font_size(10.0);
    doc.insert_text("Design ID: 250101_ABCDEFGH", 1, 40.0, 800.0, Align::Left)
        .unwrap();
    let bytes = doc.to_bytes().unwrap();

    let content = content_bytes(&bytes);
    let content_str = String::from_utf8_lossy(&content);
    assert!(content_str.contains("(Design ID: 250101_ABCDEFGH) Tj"));
    assert!(content_str.contains("/F1 10 Tf"));
}

#[test]
fn test_font_resource_registered() {
    let mut doc = PdfDocument::new_a4();
    doc.insert_text("abc", 1, 10.0, 10.0, Align::Left).unwrap();
    let bytes = doc.to_bytes().unwrap();

    let reparsed = lopdf::Document::load_mem(&bytes).unwrap();
    let page_id = reparsed.get_pages()[&1];
    let page = reparsed.get_object(page_id).unwrap().as_dict().unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    let fonts = resources.get(b"Font").unwrap().as_dict().unwrap();
    assert!(fonts.get(b"F1").is_ok());
}

#[test]
fn test_png_embedding_with_smask() {
    let mut doc = PdfDocument::new_a4();
    doc.insert_image(&create_test_png(), 1, 100.0, 100.0, 80.0, 40.0)
        .unwrap();
    let bytes = doc.to_bytes().unwrap();

    let reparsed = lopdf::Document::load_mem(&bytes).unwrap();
    let page_id = reparsed.get_pages()[&1];
    let page = reparsed.get_object(page_id).unwrap().as_dict().unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
    let image_ref = xobjects.get(b"Im1").unwrap().as_reference().unwrap();

    let image_obj = reparsed.get_object(image_ref).unwrap().as_stream().unwrap();
    assert!(image_obj.dict.get(b"SMask").is_ok());
}

#[test]
fn test_jpeg_embedding() {
    let mut doc = PdfDocument::new_a4();
    doc.insert_image(&create_test_jpeg(), 1, 50.0, 50.0, 60.0, 60.0)
        .unwrap();
    let bytes = doc.to_bytes().unwrap();

    let content = content_bytes(&bytes);
    let content_str = String::from_utf8_lossy(&content);
    assert!(content_str.contains("/Im1 Do"));
}

#[test]
fn test_image_deduplication() {
    let png = create_test_png();
    let mut doc = PdfDocument::new_a4();
    doc.insert_image(&png, 1, 0.0, 0.0, 10.0, 10.0).unwrap();
    doc.insert_image(&png, 1, 50.0, 50.0, 10.0, 10.0).unwrap();
    let bytes = doc.to_bytes().unwrap();

    let reparsed = lopdf::Document::load_mem(&bytes).unwrap();
    let page_id = reparsed.get_pages()[&1];
    let page = reparsed.get_object(page_id).unwrap().as_dict().unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
    // Same data drawn twice shares one XObject
    assert_eq!(xobjects.len(), 1);
}

#[test]
fn test_rect_y_flip() {
    // A rect drawn at top-origin y=0 must end up at the top of the page:
    // PDF y = pageH - y - h.
    let mut doc = PdfDocument::new(500.0, 800.0);
    doc.draw_rect(1, 10.0, 0.0, 100.0, 50.0, &RectStyle::filled(Color::white()))
        .unwrap();
    let bytes = doc.to_bytes().unwrap();

    let content = content_bytes(&bytes);
    let content_str = String::from_utf8_lossy(&content);
    assert!(content_str.contains("10 750 100 50 re"));
}

#[test]
fn test_drawing_order_preserved() {
    let mut doc = PdfDocument::new_a4();
    doc.draw_rect(1, 0.0, 0.0, 10.0, 10.0, &RectStyle::filled(Color::white()))
        .unwrap();
    doc.insert_image(&create_test_jpeg(), 1, 0.0, 0.0, 10.0, 10.0)
        .unwrap();
    doc.insert_text("on top", 1, 5.0, 5.0, Align::Left).unwrap();
    let bytes = doc.to_bytes().unwrap();

    let content = content_bytes(&bytes);
    let content_str = String::from_utf8_lossy(&content);
    let rect_pos = content_str.find(" re").unwrap();
    let img_pos = content_str.find("/Im1 Do").unwrap();
    let text_pos = content_str.find("(on top) Tj").unwrap();
    assert!(rect_pos < img_pos);
    assert!(img_pos < text_pos);
}
