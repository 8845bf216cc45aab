//! Span extraction from PDF content streams.
//!
//! Walks each page's content stream, tracking the text and graphics state,
//! and emits one [`TextSpan`] per text-showing operator with its font,
//! effective size, and a bounding box in top-down page coordinates.

use std::collections::HashMap;

use crate::analysis::normalize_text;
use crate::error::Result;
use crate::model::{BBox, DocumentLayout, FontSize, PageLayout, TextSpan};

use super::backend::{strip_subset_prefix, ContentOp, PageBox, PageId, PdfBackend, PdfValue};
use super::options::{ErrorMode, ExtractOptions};

/// Fraction of the font size above the baseline.
const ASCENT: f32 = 0.8;
/// Fraction of the font size below the baseline.
const DESCENT: f32 = 0.2;
/// Estimated glyph advance as a fraction of the font size.
const AVG_CHAR_WIDTH: f32 = 0.5;
/// TJ adjustment (thousandths of an em) treated as a word space.
const TJ_SPACE_THRESHOLD: f32 = 200.0;
/// Baseline variance, as a fraction of the size, still read as one line.
const LINE_TOLERANCE: f32 = 0.3;
/// Gap between shown runs, as a fraction of the estimated glyph width,
/// above which a word space is inserted.
const WORD_GAP_RATIO: f32 = 0.2;
/// Gap between shown runs, in ems, above which they stay separate spans.
const MAX_RUN_GAP: f32 = 3.0;

/// Builds a [`DocumentLayout`] from any [`PdfBackend`].
pub struct LayoutExtractor<'a, B: PdfBackend> {
    backend: &'a B,
    options: ExtractOptions,
}

impl<'a, B: PdfBackend> LayoutExtractor<'a, B> {
    /// Create a new extractor.
    pub fn new(backend: &'a B, options: ExtractOptions) -> Self {
        Self { backend, options }
    }

    /// Decode every page into page geometry and spans.
    pub fn extract(&self) -> Result<DocumentLayout> {
        let mut layout = DocumentLayout::new();

        for (page_num, page_id) in self.backend.pages() {
            if !self.options.includes_page(page_num) {
                continue;
            }

            let page_box = match self.backend.page_box(page_id) {
                Ok(b) => b,
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    log::warn!("Failed to read page box of page {}: {}", page_num, e);
                    super::backend::DEFAULT_PAGE_BOX
                }
            };
            layout.add_page(PageLayout::new(
                page_num,
                page_box.width(),
                page_box.height(),
            ));

            match self.extract_page_spans(page_num, page_id, &page_box) {
                Ok(spans) => layout.spans.extend(spans),
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    log::warn!("Failed to extract text from page {}: {}", page_num, e);
                }
            }
        }

        Ok(layout)
    }

    /// Extract the spans of a single page, in content stream order.
    pub fn extract_page_spans(
        &self,
        page_num: u32,
        page_id: PageId,
        page_box: &PageBox,
    ) -> Result<Vec<TextSpan>> {
        let fonts: HashMap<Vec<u8>, String> = match self.backend.page_fonts(page_id) {
            Ok(fonts) => fonts
                .into_iter()
                .map(|f| (f.name, strip_subset_prefix(&f.base_font).to_string()))
                .collect(),
            Err(e) => {
                log::debug!("No font info for page {}: {}", page_num, e);
                HashMap::new()
            }
        };

        let content = self.backend.page_content(page_id)?;
        let ops = self.backend.decode_content(&content)?;

        let mut walker = ContentWalker {
            backend: self.backend,
            page_num,
            page_id,
            page_box: *page_box,
            fonts: &fonts,
            state: TextState::default(),
            ctm: Matrix::IDENTITY,
            ctm_stack: Vec::new(),
            pending: None,
            spans: Vec::new(),
        };
        for op in &ops {
            walker.apply(op);
        }

        Ok(walker.finish())
    }
}

/// 2D affine transform `[a b c d e f]` in PDF row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    fn translation(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    fn from_operands(op: &ContentOp) -> Option<Self> {
        Some(Self::new(
            op.number(0)?,
            op.number(1)?,
            op.number(2)?,
            op.number(3)?,
            op.number(4)?,
            op.number(5)?,
        ))
    }

    /// `self × other`: apply `self` first, then `other`.
    fn then(&self, o: &Matrix) -> Matrix {
        Matrix {
            a: self.a * o.a + self.b * o.c,
            b: self.a * o.b + self.b * o.d,
            c: self.c * o.a + self.d * o.c,
            d: self.c * o.b + self.d * o.d,
            e: self.e * o.a + self.f * o.c + o.e,
            f: self.e * o.b + self.f * o.d + o.f,
        }
    }

    fn horizontal_scale(&self) -> f32 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Text state inside and between BT/ET blocks.
#[derive(Debug, Clone)]
struct TextState {
    font_resource: Vec<u8>,
    font_size: f32,
    leading: f32,
    tm: Matrix,
    tlm: Matrix,
    in_text: bool,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font_resource: Vec::new(),
            font_size: 12.0,
            leading: 0.0,
            tm: Matrix::IDENTITY,
            tlm: Matrix::IDENTITY,
            in_text: false,
        }
    }
}

impl TextState {
    fn move_line(&mut self, tx: f32, ty: f32) {
        self.tlm = Matrix::translation(tx, ty).then(&self.tlm);
        self.tm = self.tlm;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }
}

struct ContentWalker<'w, B: PdfBackend> {
    backend: &'w B,
    page_num: u32,
    page_id: PageId,
    page_box: PageBox,
    fonts: &'w HashMap<Vec<u8>, String>,
    state: TextState,
    ctm: Matrix,
    ctm_stack: Vec<Matrix>,
    pending: Option<PendingRun>,
    spans: Vec<TextSpan>,
}

/// Text shown by consecutive operators on one line with one font, not yet
/// emitted as a span. Coordinates are top-down.
#[derive(Debug)]
struct PendingRun {
    raw: String,
    font_resource: Vec<u8>,
    size: f32,
    baseline: f32,
    left: f32,
    right: f32,
}

impl PendingRun {
    /// Whether a run starting at `left` on `baseline` continues this one.
    fn continues(&self, font_resource: &[u8], size: f32, baseline: f32, left: f32) -> bool {
        self.font_resource == font_resource
            && FontSize::from_points(self.size) == FontSize::from_points(size)
            && (self.baseline - baseline).abs() <= size * LINE_TOLERANCE
            && left >= self.left
            && left - self.right <= size * MAX_RUN_GAP
    }

    fn extend(&mut self, raw: &str, left: f32, right: f32) {
        let gap = left - self.right;
        let needs_space = gap > self.size * AVG_CHAR_WIDTH * WORD_GAP_RATIO
            && !self.raw.ends_with(char::is_whitespace)
            && !raw.starts_with(char::is_whitespace);
        if needs_space {
            self.raw.push(' ');
        }
        self.raw.push_str(raw);
        self.right = self.right.max(right);
    }
}

impl<B: PdfBackend> ContentWalker<'_, B> {
    fn apply(&mut self, op: &ContentOp) {
        match op.operator.as_str() {
            "q" => self.ctm_stack.push(self.ctm),
            "Q" => {
                if let Some(ctm) = self.ctm_stack.pop() {
                    self.ctm = ctm;
                }
            }
            "cm" => {
                if let Some(m) = Matrix::from_operands(op) {
                    self.ctm = m.then(&self.ctm);
                }
            }
            "BT" => {
                self.state.in_text = true;
                self.state.tm = Matrix::IDENTITY;
                self.state.tlm = Matrix::IDENTITY;
            }
            "ET" => self.state.in_text = false,
            "Tf" => {
                if let Some(PdfValue::Name(name)) = op.operands.first() {
                    self.state.font_resource = name.clone();
                }
                if let Some(size) = op.number(1) {
                    self.state.font_size = size;
                }
            }
            "TL" => {
                if let Some(leading) = op.number(0) {
                    self.state.leading = leading;
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                    self.state.move_line(tx, ty);
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                    self.state.leading = -ty;
                    self.state.move_line(tx, ty);
                }
            }
            "Tm" => {
                if let Some(m) = Matrix::from_operands(op) {
                    self.state.tm = m;
                    self.state.tlm = m;
                }
            }
            "T*" => self.state.next_line(),
            "Tj" => {
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let text = self.decode(bytes);
                    self.show(text);
                }
            }
            "TJ" => {
                if let Some(PdfValue::Array(items)) = op.operands.first() {
                    let text = self.decode_array(items);
                    self.show(text);
                }
            }
            "'" => {
                self.state.next_line();
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let text = self.decode(bytes);
                    self.show(text);
                }
            }
            "\"" => {
                self.state.next_line();
                if let Some(PdfValue::Str(bytes)) = op.operands.get(2) {
                    let text = self.decode(bytes);
                    self.show(text);
                }
            }
            _ => {}
        }
    }

    fn decode(&self, bytes: &[u8]) -> String {
        self.backend
            .decode_text(self.page_id, &self.state.font_resource, bytes)
    }

    /// Decode a TJ array. Large negative adjustments become word spaces.
    fn decode_array(&self, items: &[PdfValue]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                PdfValue::Str(bytes) => combined.push_str(&self.decode(bytes)),
                other => {
                    if let Some(n) = other.as_number() {
                        if -n > TJ_SPACE_THRESHOLD
                            && !combined.is_empty()
                            && !combined.ends_with(char::is_whitespace)
                        {
                            combined.push(' ');
                        }
                    }
                }
            }
        }
        combined
    }

    fn show(&mut self, raw: String) {
        if !self.state.in_text {
            return;
        }

        let chars = raw.chars().count() as f32;
        let trm = self.state.tm.then(&self.ctm);
        let size = self.state.font_size * trm.vertical_scale();
        let advance = chars * AVG_CHAR_WIDTH * self.state.font_size;
        let width = advance * trm.horizontal_scale();

        // Advance the text matrix past the shown glyphs.
        self.state.tm = Matrix::translation(advance, 0.0).then(&self.state.tm);

        if raw.is_empty() || size <= 0.0 {
            return;
        }

        let left = trm.e - self.page_box.x0;
        let baseline = self.page_box.y1 - trm.f;

        if let Some(run) = self.pending.as_mut() {
            if run.continues(&self.state.font_resource, size, baseline, left) {
                run.extend(&raw, left, left + width);
                return;
            }
        }

        self.flush();
        self.pending = Some(PendingRun {
            raw,
            font_resource: self.state.font_resource.clone(),
            size,
            baseline,
            left,
            right: left + width,
        });
    }

    /// Emit the pending run as a span, unless it normalizes to nothing.
    fn flush(&mut self) {
        let Some(run) = self.pending.take() else {
            return;
        };

        let text = normalize_text(&run.raw);
        if text.is_empty() {
            return;
        }

        let bbox = BBox::new(
            run.left,
            run.baseline - ASCENT * run.size,
            run.right,
            run.baseline + DESCENT * run.size,
        );

        let font_name = self
            .fonts
            .get(&run.font_resource)
            .cloned()
            .unwrap_or_else(|| String::from_utf8_lossy(&run.font_resource).to_string());

        self.spans
            .push(TextSpan::new(text, run.size, font_name, bbox, self.page_num));
    }

    fn finish(mut self) -> Vec<TextSpan> {
        self.flush();
        self.spans
    }
}
