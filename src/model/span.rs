//! Positioned text spans and page geometry.

use serde::{Deserialize, Serialize};

use super::{FontSize, Style};

/// Axis-aligned rectangle in top-down page coordinates.
///
/// The origin is the top-left corner of the page, so `top < bottom` for any
/// non-degenerate box and a smaller `top` means higher on the page.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// A run of text with uniform font, as produced by the page decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// Normalized text content (never empty)
    pub text: String,
    /// Font size in points, rounded to 2 decimals
    pub font_size: f32,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Whether the font name signals a bold variant
    pub is_bold: bool,
    /// Bounding box in top-down page coordinates
    pub bbox: BBox,
    /// 1-based page number
    pub page: u32,
}

impl TextSpan {
    /// Create a new span. Boldness and size rounding are derived here.
    pub fn new(
        text: impl Into<String>,
        font_size: f32,
        font_name: impl Into<String>,
        bbox: BBox,
        page: u32,
    ) -> Self {
        let font_name = font_name.into();
        let is_bold = is_bold_font(&font_name);
        Self {
            text: text.into(),
            font_size: FontSize::from_points(font_size).points(),
            font_name,
            is_bold,
            bbox,
            page,
        }
    }

    /// The classification key of this span.
    pub fn style(&self) -> Style {
        Style::new(self.font_size, self.is_bold)
    }

    /// Font size as an exact grouping key.
    pub fn size_key(&self) -> FontSize {
        FontSize::from_points(self.font_size)
    }

    /// Number of characters in the text.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Whether a font name designates a bold face.
pub fn is_bold_font(font_name: &str) -> bool {
    font_name.to_lowercase().contains("bold")
}

/// Geometry of a single page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// 1-based page number
    pub number: u32,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
}

impl PageLayout {
    /// Create a new page layout.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
        }
    }

    /// US Letter page (612 x 792 points).
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0)
    }
}

/// Everything the outline engine needs to know about one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentLayout {
    /// Pages in document order
    pub pages: Vec<PageLayout>,
    /// Spans in document (content stream) order
    pub spans: Vec<TextSpan>,
}

impl DocumentLayout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page.
    pub fn add_page(&mut self, page: PageLayout) {
        self.pages.push(page);
    }

    /// Add a span.
    pub fn add_span(&mut self, span: TextSpan) {
        self.spans.push(span);
    }

    /// Look up the geometry of a page by number.
    pub fn page(&self, number: u32) -> Option<&PageLayout> {
        self.pages.iter().find(|p| p.number == number)
    }

    /// Height of a page, if known.
    pub fn page_height(&self, number: u32) -> Option<f32> {
        self.page(number).map(|p| p.height)
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Check if there are no spans.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}
