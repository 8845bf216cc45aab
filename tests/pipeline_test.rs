//! End-to-end tests of title and outline inference.

mod common;

use std::collections::HashSet;

use common::{build_pdf, layout, line, report_pdf};
use pdf_outline::render::{to_json, JsonFormat};
use pdf_outline::{
    extract_bytes, extract_layout, DocumentStructure, ExtractionOutcome, HeadingLevel,
    OutlineConfig, OutlineEntry, StructureExtractor, ERROR_TITLE, NO_TEXT_TITLE,
};

const BODY: &str = "Helvetica";
const BOLD: &str = "Helvetica-Bold";

type Row = (&'static str, f32, &'static str, f32, u32);

fn body_rows(page: u32, start: f32, count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| ("the quick brown fox", 12.0, BODY, start + i as f32 * 16.0, page))
        .collect()
}

#[test]
fn test_report_pdf_structure() {
    let structure = extract_bytes(&report_pdf());

    assert_eq!(structure.title, "Annual Report");
    assert_eq!(
        structure.outline,
        vec![
            OutlineEntry::new(HeadingLevel::H2, "Introduction", 1),
            OutlineEntry::new(HeadingLevel::H2, "Appendix A: Data", 1),
        ]
    );
}

#[test]
fn test_extraction_is_idempotent() {
    let pdf = report_pdf();
    let first = extract_bytes(&pdf);
    let second = extract_bytes(&pdf);
    assert_eq!(first, second);
    assert_eq!(
        to_json(&first, JsonFormat::Pretty).unwrap(),
        to_json(&second, JsonFormat::Pretty).unwrap()
    );
}

#[test]
fn test_footer_band_is_excluded() {
    let mut rows = vec![("Handbook", 24.0, BOLD, 40.0, 1)];
    rows.extend(body_rows(1, 120.0, 8));
    rows.push(("Chapter One", 18.0, BOLD, 100.0, 1));
    // 0.9 * 792 = 712.8
    rows.push(("Chapter Footer", 18.0, BOLD, 720.0, 1));

    let structure = extract_layout(&layout(&rows));
    assert_eq!(structure.title, "Handbook");
    let texts: Vec<&str> = structure.outline.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["Chapter One"]);
}

#[test]
fn test_footer_ratio_is_configurable() {
    let mut rows = vec![("Handbook", 24.0, BOLD, 40.0, 1)];
    rows.extend(body_rows(1, 120.0, 8));
    rows.push(("Closing Notes", 18.0, BOLD, 720.0, 1));

    let extractor =
        StructureExtractor::new().with_config(OutlineConfig::new().with_footer_ratio(0.95));
    let structure = extractor.run_layout(&layout(&rows)).into_structure();
    assert_eq!(structure.outline.len(), 1);
    assert_eq!(structure.outline[0].text, "Closing Notes");
}

#[test]
fn test_appendix_override_wins_over_style() {
    let mut rows = vec![
        ("Thesis", 28.0, BOLD, 40.0, 1),
        ("Background", 20.0, BOLD, 120.0, 1),
        ("Method", 16.0, BOLD, 300.0, 1),
        ("APPENDIX B: Tables", 20.0, BOLD, 100.0, 2),
    ];
    rows.extend(body_rows(1, 140.0, 6));
    rows.extend(body_rows(2, 140.0, 6));

    let structure = extract_layout(&layout(&rows));
    assert_eq!(
        structure.outline,
        vec![
            OutlineEntry::new(HeadingLevel::H2, "Background", 1),
            OutlineEntry::new(HeadingLevel::H3, "Method", 1),
            OutlineEntry::new(HeadingLevel::H2, "APPENDIX B: Tables", 2),
        ]
    );
}

#[test]
fn test_outline_texts_are_unique_and_ordered() {
    let mut rows = vec![("Guide", 24.0, BOLD, 40.0, 1)];
    for page in 1..=3 {
        rows.extend(body_rows(page, 200.0, 5));
        rows.push(("Overview", 16.0, BOLD, 150.0, page));
    }
    rows.push(("Details", 16.0, BOLD, 100.0, 3));
    rows.push(("Guide", 16.0, BOLD, 120.0, 2));

    let structure = extract_layout(&layout(&rows));

    let mut seen = HashSet::new();
    for entry in &structure.outline {
        assert!(seen.insert(entry.text.clone()), "duplicate {}", entry.text);
        assert_ne!(entry.text, structure.title);
    }
    let keys: Vec<(u32, &str)> = structure
        .outline
        .iter()
        .map(|e| (e.page, e.text.as_str()))
        .collect();
    assert_eq!(keys, vec![(1, "Overview"), (3, "Details")]);
}

#[test]
fn test_multi_line_title_is_merged() {
    let mut rows = vec![
        ("Foundations of", 22.0, BOLD, 40.0, 1),
        ("Applied Cartography", 22.0, BOLD, 66.0, 1),
        ("Preface", 16.0, BOLD, 140.0, 1),
    ];
    rows.extend(body_rows(1, 200.0, 6));

    let structure = extract_layout(&layout(&rows));
    assert_eq!(structure.title, "Foundations of Applied Cartography");
    // Only the merged title is excluded; its individual lines remain headings.
    assert_eq!(
        structure.outline,
        vec![
            OutlineEntry::new(HeadingLevel::H1, "Foundations of", 1),
            OutlineEntry::new(HeadingLevel::H1, "Applied Cartography", 1),
            OutlineEntry::new(HeadingLevel::H2, "Preface", 1),
        ]
    );
}

#[test]
fn test_legacy_sort_uses_first_matching_span() {
    let mut rows = vec![
        ("Quarterly Review", 24.0, BOLD, 40.0, 1),
        ("Summary", 12.0, BODY, 500.0, 1),
        ("Summary", 16.0, BOLD, 100.0, 1),
        ("Results", 16.0, BOLD, 300.0, 1),
    ];
    rows.extend(body_rows(1, 320.0, 6));
    let layout = layout(&rows);

    let current = extract_layout(&layout);
    let texts: Vec<&str> = current.outline.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["Summary", "Results"]);

    let legacy = StructureExtractor::new()
        .with_config(OutlineConfig::new().legacy_sort())
        .run_layout(&layout)
        .into_structure();
    let texts: Vec<&str> = legacy.outline.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["Results", "Summary"]);
}

#[test]
fn test_title_never_empty() {
    let cases = vec![
        extract_bytes(&report_pdf()),
        extract_bytes(b"not a pdf at all"),
        extract_bytes(&build_pdf(&[vec![]])),
        extract_bytes(&build_pdf(&[vec![line("all body text here", 12.0, false, 700.0)]])),
    ];
    for structure in cases {
        assert!(!structure.title.is_empty());
    }
}

#[test]
fn test_sentinels() {
    let broken = StructureExtractor::new().run_bytes(b"definitely not a pdf");
    assert!(matches!(broken, ExtractionOutcome::OpenFailure(_)));
    assert_eq!(
        broken.into_structure(),
        DocumentStructure::new(ERROR_TITLE, vec![])
    );

    let blank = StructureExtractor::new().run_bytes(&build_pdf(&[vec![], vec![]]));
    assert!(matches!(blank, ExtractionOutcome::EmptyDocument));
    assert_eq!(
        blank.into_structure(),
        DocumentStructure::new(NO_TEXT_TITLE, vec![])
    );
}

#[test]
fn test_json_shape() {
    let structure = extract_bytes(&report_pdf());
    let json = to_json(&structure, JsonFormat::Pretty).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["title"], "Annual Report");
    let outline = value["outline"].as_array().unwrap();
    assert_eq!(outline.len(), 2);
    assert_eq!(outline[0]["level"], "H2");
    assert_eq!(outline[0]["text"], "Introduction");
    assert_eq!(outline[0]["page"], 1);
    assert!(json.contains("\n    \"title\""));
}
