//! Heading classification, deduplication and ordering.

use std::collections::HashSet;

use crate::model::{DocumentLayout, HeadingLevelMap, OutlineEntry, TextSpan};

use super::config::{OutlineConfig, PositionLookup};
use super::rules::override_level;

/// Build the outline of a document.
///
/// Spans are visited in document order. A span becomes a heading when its
/// style is a heading style, its text is neither the title nor an already
/// accepted heading, it is long enough, and it does not sit in the footer
/// band of its page. Override rules may replace the style-derived level.
/// The result is ordered by page, then by vertical position.
pub fn build_outline(
    layout: &DocumentLayout,
    levels: &HeadingLevelMap,
    title: &str,
    config: &OutlineConfig,
) -> Vec<OutlineEntry> {
    let mut processed: HashSet<&str> = HashSet::new();
    processed.insert(title);

    let mut accepted: Vec<(usize, OutlineEntry)> = Vec::new();

    for (idx, span) in layout.spans.iter().enumerate() {
        let Some(style_level) = levels.get(&span.style()) else {
            continue;
        };
        if processed.contains(span.text.as_str()) {
            continue;
        }
        if span.char_len() < config.min_heading_chars {
            continue;
        }
        if is_footer(span, layout, config.footer_ratio) {
            continue;
        }

        let level = override_level(&config.rules, &span.text).unwrap_or(style_level);
        processed.insert(span.text.as_str());
        accepted.push((idx, OutlineEntry::new(level, span.text.clone(), span.page)));
    }

    let mut keyed: Vec<(f32, OutlineEntry)> = accepted
        .into_iter()
        .map(|(idx, entry)| {
            let top = match config.position_lookup {
                PositionLookup::AcceptedSpan => layout.spans[idx].bbox.top,
                PositionLookup::FirstTextMatch => first_text_match_top(layout, &entry)
                    .unwrap_or(layout.spans[idx].bbox.top),
            };
            (top, entry)
        })
        .collect();

    keyed.sort_by(|(top_a, a), (top_b, b)| a.page.cmp(&b.page).then(top_a.total_cmp(top_b)));

    keyed.into_iter().map(|(_, entry)| entry).collect()
}

/// Whether a span lies below the footer cutoff of its page.
/// Spans on pages without known geometry are never footers.
fn is_footer(span: &TextSpan, layout: &DocumentLayout, footer_ratio: f32) -> bool {
    layout
        .page_height(span.page)
        .is_some_and(|height| span.bbox.top > height * footer_ratio)
}

fn first_text_match_top(layout: &DocumentLayout, entry: &OutlineEntry) -> Option<f32> {
    layout
        .spans
        .iter()
        .find(|s| s.page == entry.page && s.text == entry.text)
        .map(|s| s.bbox.top)
}
