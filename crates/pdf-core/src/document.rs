//! PDF Document wrapper

use crate::graphics::{generate_rect_operators, RectStyle};
use crate::image::{calculate_scaled_dimensions, generate_image_operators, ImageScaleMode, ImageXObject};
use crate::text::{generate_text_operators, text_width_points, TextRenderContext};
use crate::{Align, PdfError, Result, A4_HEIGHT, A4_WIDTH};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeSet, HashMap};
use std::hash::{Hash, Hasher};
use std::path::Path;

/// Resource name of the built-in base font
const BASE_FONT_RESOURCE: &str = "F1";

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    /// Red color
    pub fn red() -> Self {
        Self::rgb(1.0, 0.0, 0.0)
    }

    /// Mid gray
    pub fn gray(level: f32) -> Self {
        Self::rgb(level, level, level)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// PDF Document wrapper providing high-level drawing operations
///
/// Documents are built from scratch: a single blank page of the requested
/// size, then images, rectangles, and text drawn onto it. All callers pass
/// top-origin y coordinates; the conversion to PDF bottom-origin happens
/// exactly once per drawn object, inside this type.
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Current font size
    current_font_size: f32,
    /// Current text color
    current_text_color: Color,
    /// Pages that render text and need the base font in their resources
    pages_using_font: BTreeSet<usize>,
    /// Embedded base font object (created at save time)
    base_font_id: Option<ObjectId>,
    /// Embedded images (data hash -> PDF object ID)
    embedded_images: HashMap<u64, ObjectId>,
    /// Page image resources (page number -> image name -> object ID)
    page_image_resources: HashMap<usize, HashMap<String, ObjectId>>,
    /// Next image resource number
    next_image_resource: u32,
    /// Buffered content operators per page (page number -> operators)
    page_content_buffer: HashMap<usize, Vec<u8>>,
}

impl PdfDocument {
    /// Create a new single-page document
    ///
    /// # Arguments
    /// * `width` - Page width in points
    /// * `height` - Page height in points
    ///
    /// # Example
    /// ```ignore
    /// let doc = PdfDocument::new(pdf_core::A4_WIDTH, pdf_core::A4_HEIGHT);
    /// ```
    pub fn new(width: f64, height: f64) -> Self {
        let mut inner = Document::with_version("1.5");

        let pages_id = inner.new_object_id();

        let contents_id = inner.add_object(Object::Stream(Stream::new(Dictionary::new(), vec![])));

        let mut page_dict = Dictionary::new();
        page_dict.set(b"Type", Object::Name(b"Page".to_vec()));
        page_dict.set(b"Parent", Object::Reference(pages_id));
        page_dict.set(
            b"MediaBox",
            Object::Array(vec![
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(width as f32),
                Object::Real(height as f32),
            ]),
        );
        page_dict.set(b"Resources", Object::Dictionary(Dictionary::new()));
        page_dict.set(b"Contents", Object::Reference(contents_id));
        let page_id = inner.add_object(Object::Dictionary(page_dict));

        let mut pages_dict = Dictionary::new();
        pages_dict.set(b"Type", Object::Name(b"Pages".to_vec()));
        pages_dict.set(b"Kids", Object::Array(vec![Object::Reference(page_id)]));
        pages_dict.set(b"Count", Object::Integer(1));
        inner
            .objects
            .insert(pages_id, Object::Dictionary(pages_dict));

        let mut catalog = Dictionary::new();
        catalog.set(b"Type", Object::Name(b"Catalog".to_vec()));
        catalog.set(b"Pages", Object::Reference(pages_id));
        let catalog_id = inner.add_object(Object::Dictionary(catalog));
        inner.trailer.set("Root", catalog_id);

        Self {
            inner,
            current_font_size: 12.0,
            current_text_color: Color::default(),
            pages_using_font: BTreeSet::new(),
            base_font_id: None,
            embedded_images: HashMap::new(),
            page_image_resources: HashMap::new(),
            next_image_resource: 1,
            page_content_buffer: HashMap::new(),
        }
    }

    /// Create a new single-page A4 document (portrait)
    pub fn new_a4() -> Self {
        Self::new(A4_WIDTH, A4_HEIGHT)
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.inner.get_pages().len()
    }

    /// Set the font size for subsequent text insertions
    pub fn set_font_size(&mut self, size: f32) {
        self.current_font_size = size;
    }

    /// Set the text color for subsequent text insertions
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Measure text width in points at the current font size
    pub fn get_text_width(&self, text: &str) -> f64 {
        text_width_points(text, self.current_font_size)
    }

    /// Insert text at a specific position
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Y coordinate in points (from top)
    /// * `align` - Text alignment
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }

        // Skip empty text - nothing to render
        if text.is_empty() {
            return Ok(());
        }

        // Convert Y coordinate from top-origin to PDF bottom-origin
        let page_height = self.get_page_height(page)?;
        let pdf_y = page_height - y;

        let ctx = TextRenderContext {
            font_name: BASE_FONT_RESOURCE.to_string(),
            font_size: self.current_font_size,
            text_width: text_width_points(text, self.current_font_size),
            color: self.current_text_color,
        };

        let operators = generate_text_operators(text, x, pdf_y, align, &ctx);
        self.buffer_content(page, &operators);
        self.pages_using_font.insert(page);

        Ok(())
    }

    /// Insert an image at a specific position
    ///
    /// # Arguments
    /// * `data` - Image file bytes (PNG or JPEG)
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Y coordinate in points (from top)
    /// * `width` - Image width in points
    /// * `height` - Image height in points
    pub fn insert_image(
        &mut self,
        data: &[u8],
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<()> {
        self.insert_image_scaled(data, page, x, y, width, height, ImageScaleMode::Stretch)
    }

    /// Insert an image with scaling mode
    ///
    /// # Arguments
    /// * `data` - Image file bytes (PNG or JPEG)
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Y coordinate in points (from top)
    /// * `width` - Target width in points
    /// * `height` - Target height in points
    /// * `mode` - Scaling mode
    #[allow(clippy::too_many_arguments)]
    pub fn insert_image_scaled(
        &mut self,
        data: &[u8],
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        mode: ImageScaleMode,
    ) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }

        let (image_resource_name, orig_width, orig_height) =
            self.get_or_create_image_ref(data, page)?;

        // Calculate actual display dimensions based on mode
        let (actual_width, actual_height) =
            calculate_scaled_dimensions(orig_width, orig_height, width, height, mode);

        // Convert Y coordinate from top-origin to PDF bottom-origin
        let page_height = self.get_page_height(page)?;
        let pdf_y = page_height - y - actual_height;

        let operators =
            generate_image_operators(&image_resource_name, x, pdf_y, actual_width, actual_height);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Draw a rectangle
    ///
    /// # Arguments
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Y coordinate in points (from top)
    /// * `width` - Rectangle width in points
    /// * `height` - Rectangle height in points
    /// * `style` - Fill/stroke style
    pub fn draw_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        style: &RectStyle,
    ) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }

        // Convert Y coordinate from top-origin to PDF bottom-origin
        let page_height = self.get_page_height(page)?;
        let pdf_y = page_height - y - height;

        let operators = generate_rect_operators(x, pdf_y, width, height, style);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Save the document to a file
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.flush_content_buffers()?;
        self.finalize_font_resources()?;

        self.inner
            .save(path)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(())
    }

    /// Save the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.flush_content_buffers()?;
        self.finalize_font_resources()?;

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        Ok(buffer)
    }

    /// Get a reference to the underlying lopdf document
    pub fn inner(&self) -> &Document {
        &self.inner
    }

    /// Get page height in points
    ///
    /// Extracts the page height from the page's MediaBox. Pages are always
    /// created by this type so the MediaBox is a direct array; A4 is the
    /// defensive fallback.
    fn get_page_height(&self, page: usize) -> Result<f64> {
        let pages = self.inner.get_pages();
        let page_id = *pages
            .get(&(page as u32))
            .ok_or(PdfError::InvalidPage(page, pages.len()))?;

        let page_obj = self.inner.get_object(page_id)?;
        let page_dict = page_obj
            .as_dict()
            .map_err(|_| PdfError::ParseError("Page object is not a dictionary".to_string()))?;

        let media_box = match page_dict.get(b"MediaBox") {
            Ok(Object::Array(arr)) if arr.len() >= 4 => arr.clone(),
            _ => return Ok(A4_HEIGHT),
        };

        let as_f64 = |obj: &Object| -> Option<f64> {
            obj.as_f32()
                .map(|v| v as f64)
                .ok()
                .or_else(|| obj.as_i64().ok().map(|v| v as f64))
        };
        let y1 = as_f64(&media_box[1])
            .ok_or_else(|| PdfError::ParseError("Invalid MediaBox y1".to_string()))?;
        let y2 = as_f64(&media_box[3])
            .ok_or_else(|| PdfError::ParseError("Invalid MediaBox y2".to_string()))?;

        Ok(y2 - y1)
    }

    /// Buffer content operators for a page (written at save time)
    ///
    /// Instead of immediately appending to the content stream (which creates
    /// orphan objects), this buffers the operators and flushes them all at
    /// once during save.
    fn buffer_content(&mut self, page: usize, content: &[u8]) {
        self.page_content_buffer
            .entry(page)
            .or_default()
            .extend_from_slice(content);
    }

    /// Flush all buffered content to page streams
    fn flush_content_buffers(&mut self) -> Result<()> {
        // Take ownership of buffer to avoid borrow issues
        let mut buffers: Vec<(usize, Vec<u8>)> = self.page_content_buffer.drain().collect();
        buffers.sort_by_key(|(page, _)| *page);

        for (page, content) in buffers {
            if !content.is_empty() {
                self.append_to_content_stream(page, &content)?;
            }
        }

        Ok(())
    }

    /// Append content to a page's content stream
    fn append_to_content_stream(&mut self, page: usize, content: &[u8]) -> Result<()> {
        let pages = self.inner.get_pages();
        let page_id = *pages
            .get(&(page as u32))
            .ok_or(PdfError::InvalidPage(page, pages.len()))?;

        let (existing_content, page_dict_clone) = {
            let page_obj = self.inner.get_object(page_id)?;
            let page_dict = page_obj
                .as_dict()
                .map_err(|_| PdfError::ParseError("Page object is not a dictionary".to_string()))?;

            let existing = match page_dict.get(b"Contents") {
                Ok(Object::Reference(ref_id)) => {
                    if let Ok(Object::Stream(stream)) = self.inner.get_object(*ref_id) {
                        stream
                            .decompressed_content()
                            .unwrap_or_else(|_| stream.content.clone())
                    } else {
                        Vec::new()
                    }
                }
                Ok(Object::Stream(stream)) => stream
                    .decompressed_content()
                    .unwrap_or_else(|_| stream.content.clone()),
                _ => Vec::new(),
            };

            (existing, page_dict.clone())
        };

        let mut new_content = existing_content;
        new_content.extend_from_slice(content);

        let new_stream = Stream::new(Dictionary::new(), new_content);
        let stream_id = self.inner.add_object(new_stream);

        let mut new_page_dict = page_dict_clone;
        new_page_dict.set(b"Contents", Object::Reference(stream_id));
        self.inner.objects.insert(page_id, new_page_dict.into());

        Ok(())
    }

    /// Embed the base font and reference it from every page that drew text
    ///
    /// Helvetica is one of the base-14 fonts, so only a font dictionary is
    /// needed; no font program is embedded.
    fn finalize_font_resources(&mut self) -> Result<()> {
        if self.pages_using_font.is_empty() {
            return Ok(());
        }

        let font_id = match self.base_font_id {
            Some(id) => id,
            None => {
                let mut font_dict = Dictionary::new();
                font_dict.set(b"Type", Object::Name(b"Font".to_vec()));
                font_dict.set(b"Subtype", Object::Name(b"Type1".to_vec()));
                font_dict.set(b"BaseFont", Object::Name(b"Helvetica".to_vec()));
                font_dict.set(b"Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
                let id = self.inner.add_object(Object::Dictionary(font_dict));
                self.base_font_id = Some(id);
                id
            }
        };

        let pages: Vec<usize> = self.pages_using_font.iter().copied().collect();
        for page in pages {
            self.add_font_to_page_resources(page, font_id)?;
        }

        Ok(())
    }

    /// Add the base font reference to a page's Resources dictionary
    fn add_font_to_page_resources(&mut self, page: usize, font_id: ObjectId) -> Result<()> {
        let pages = self.inner.get_pages();
        let page_id = *pages
            .get(&(page as u32))
            .ok_or(PdfError::InvalidPage(page, pages.len()))?;

        let page_obj = self.inner.get_object(page_id)?;
        let page_dict = page_obj
            .as_dict()
            .map_err(|_| PdfError::SaveError("Page object is not a dictionary".to_string()))?;

        let mut resources_dict = match page_dict.get(b"Resources") {
            Ok(resources) => resources.as_dict().cloned().unwrap_or_default(),
            Err(_) => Dictionary::new(),
        };

        let mut font_dict = match resources_dict.get(b"Font") {
            Ok(font) => font.as_dict().cloned().unwrap_or_default(),
            Err(_) => Dictionary::new(),
        };
        font_dict.set(BASE_FONT_RESOURCE.as_bytes(), Object::Reference(font_id));
        resources_dict.set(b"Font", Object::Dictionary(font_dict));

        let mut new_page_dict = page_dict.clone();
        new_page_dict.set(b"Resources", Object::Dictionary(resources_dict));
        self.inner.objects.insert(page_id, new_page_dict.into());

        Ok(())
    }

    /// Get or create an image reference for a specific page
    ///
    /// Returns the resource name (e.g., "Im1", "Im2") and original
    /// dimensions. Images are deduplicated by hash of their data. PNG is
    /// tried first, JPEG second; if neither decoder accepts the data the
    /// image cannot be embedded.
    fn get_or_create_image_ref(&mut self, data: &[u8], page: usize) -> Result<(String, u32, u32)> {
        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);
        let data_hash = hasher.finish();

        if !self.embedded_images.contains_key(&data_hash) {
            let xobject = ImageXObject::from_png(data)
                .or_else(|_| ImageXObject::from_jpeg(data))
                .map_err(|e| PdfError::EmbedError(e.to_string()))?;

            // Alpha channel goes in first as its own grayscale stream
            let smask_id = xobject
                .smask_stream()
                .map(|stream| self.inner.add_object(stream));

            let stream = xobject.to_pdf_stream(smask_id);
            let object_id = self.inner.add_object(stream);

            self.embedded_images.insert(data_hash, object_id);
        }

        let object_id = self.embedded_images[&data_hash];

        // Read the dimensions back off the embedded XObject
        let xobject_stream = self.inner.get_object(object_id)?;
        let xobject_dict = &xobject_stream
            .as_stream()
            .map_err(|_| PdfError::ParseError("Image object is not a stream".to_string()))?
            .dict;
        let width = xobject_dict
            .get(b"Width")
            .ok()
            .and_then(|v| v.as_i64().ok())
            .map(|v| v as u32)
            .ok_or_else(|| PdfError::ParseError("Image missing Width".to_string()))?;
        let height = xobject_dict
            .get(b"Height")
            .ok()
            .and_then(|v| v.as_i64().ok())
            .map(|v| v as u32)
            .ok_or_else(|| PdfError::ParseError("Image missing Height".to_string()))?;

        // Check if image is already registered for this page
        let page_resources = self.page_image_resources.entry(page).or_default();
        for (name, id) in page_resources.iter() {
            if *id == object_id {
                return Ok((name.clone(), width, height));
            }
        }

        let resource_name = format!("Im{}", self.next_image_resource);
        self.next_image_resource += 1;
        page_resources.insert(resource_name.clone(), object_id);

        self.add_image_to_page_resources(page, &resource_name, object_id)?;

        Ok((resource_name, width, height))
    }

    /// Add image to a specific page's Resources dictionary
    fn add_image_to_page_resources(
        &mut self,
        page: usize,
        resource_name: &str,
        object_id: ObjectId,
    ) -> Result<()> {
        let pages = self.inner.get_pages();
        let page_id = *pages
            .get(&(page as u32))
            .ok_or(PdfError::InvalidPage(page, pages.len()))?;

        let page_obj = self.inner.get_object(page_id)?;
        let page_dict = page_obj
            .as_dict()
            .map_err(|_| PdfError::SaveError("Page object is not a dictionary".to_string()))?;

        let mut resources_dict = match page_dict.get(b"Resources") {
            Ok(resources) => resources.as_dict().cloned().unwrap_or_default(),
            Err(_) => Dictionary::new(),
        };

        let mut xobject_dict = match resources_dict.get(b"XObject") {
            Ok(xobject) => xobject.as_dict().cloned().unwrap_or_default(),
            Err(_) => Dictionary::new(),
        };
        xobject_dict.set(resource_name.as_bytes(), Object::Reference(object_id));
        resources_dict.set(b"XObject", Object::Dictionary(xobject_dict));

        let mut new_page_dict = page_dict.clone();
        new_page_dict.set(b"Resources", Object::Dictionary(resources_dict));
        self.inner.objects.insert(page_id, new_page_dict.into());

        Ok(())
    }
}
