//! Shared helpers for integration tests.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use pdf_outline::{BBox, DocumentLayout, PageLayout, TextSpan};

/// A line of text to place on a generated page.
pub struct Line {
    pub text: &'static str,
    pub size: f32,
    pub bold: bool,
    pub x: f32,
    pub y: f32,
}

pub fn line(text: &'static str, size: f32, bold: bool, y: f32) -> Line {
    Line {
        text,
        size,
        bold,
        x: 72.0,
        y,
    }
}

/// Build a PDF with one US Letter page per entry of `pages`.
///
/// `y` is the text baseline in PDF user space (origin bottom-left).
pub fn build_pdf(pages: &[Vec<Line>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
        },
    });

    let mut kids = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for l in lines {
            let font = if l.bold { "F2" } else { "F1" };
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![Object::Name(font.as_bytes().to_vec()), Object::Real(l.size)],
            ));
            operations.push(Operation::new(
                "Td",
                vec![Object::Real(l.x), Object::Real(l.y)],
            ));
            operations.push(Operation::new("Tj", vec![Object::string_literal(l.text)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let encoded = content.encode().expect("encode content stream");
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ],
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("save pdf");
    bytes
}

/// A one-page report: bold title, a section heading, body text, an appendix
/// heading and a bold footer.
pub fn report_pdf() -> Vec<u8> {
    let mut lines = vec![
        line("Annual Report", 24.0, true, 720.0),
        line("Introduction", 16.0, true, 660.0),
    ];
    for i in 0..6 {
        let y = 630.0 - i as f32 * 16.0;
        lines.push(line("Revenue grew across all regions", 12.0, false, y));
    }
    lines.push(line("Appendix A: Data", 16.0, true, 400.0));
    lines.push(line("Confidential draft", 12.0, true, 30.0));
    build_pdf(&[lines])
}

/// Build a decoded layout from `(text, size, font, top, page)` rows on
/// Letter-sized pages.
pub fn layout(rows: &[(&str, f32, &str, f32, u32)]) -> DocumentLayout {
    let mut layout = DocumentLayout::new();
    let pages = rows.iter().map(|r| r.4).max().unwrap_or(1);
    for n in 1..=pages {
        layout.add_page(PageLayout::letter(n));
    }
    for &(text, size, font, top, page) in rows {
        let bbox = BBox::new(72.0, top, 72.0 + text.len() as f32 * size * 0.5, top + size);
        layout.add_span(TextSpan::new(text, size, font, bbox, page));
    }
    layout
}
