//! Title detection from first-page spans.

use crate::model::{FontSize, TextSpan};

use super::config::OutlineConfig;

/// Title reported when no first-page span is larger than body text.
pub const TITLE_NOT_FOUND: &str = "Title Not Found";

/// Detect the document title.
///
/// Candidates are page-1 spans larger than the body size, read top to
/// bottom. The first candidate seeds the title; following candidates are
/// appended while they sit within `title_gap` of the previous line and share
/// the seed's font size. The merge stops at the first candidate that breaks
/// either condition.
pub fn detect_title(spans: &[TextSpan], body_size: FontSize, config: &OutlineConfig) -> String {
    let mut candidates: Vec<&TextSpan> = spans
        .iter()
        .filter(|s| s.page == 1 && s.size_key() > body_size)
        .collect();

    if candidates.is_empty() {
        return TITLE_NOT_FOUND.to_string();
    }

    candidates.sort_by(|a, b| a.bbox.top.total_cmp(&b.bbox.top));

    let seed = candidates[0];
    let mut parts: Vec<&str> = vec![seed.text.as_str()];
    for pair in candidates.windows(2) {
        let (prev, cur) = (pair[0], pair[1]);
        if cur.bbox.top - prev.bbox.bottom < config.title_gap && cur.size_key() == seed.size_key()
        {
            parts.push(cur.text.as_str());
        } else {
            break;
        }
    }

    parts.join(" ")
}
