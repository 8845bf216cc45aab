//! Font usage statistics and heading style ranking.

use std::collections::HashMap;

use crate::model::{FontSize, HeadingLevelMap, Style, TextSpan};

use super::config::OutlineConfig;

/// Font statistics of one document.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleProfile {
    /// Body text font size (most common)
    pub body_size: FontSize,
    /// Heading styles ranked into levels
    pub levels: HeadingLevelMap,
    /// Observed styles with occurrence counts, in order of first appearance
    pub style_counts: Vec<(Style, usize)>,
}

impl StyleProfile {
    /// Profile the spans of a document.
    ///
    /// Only spans with more than two characters are counted. The body size is
    /// the most frequent size; on a tie the size seen first wins. Every style
    /// larger than the body size, or bold, becomes a heading style.
    pub fn analyze(spans: &[TextSpan], config: &OutlineConfig) -> Self {
        let considered: Vec<&TextSpan> = spans
            .iter()
            .filter(|s| s.char_len() >= config.min_profile_chars)
            .collect();

        if considered.is_empty() {
            return Self {
                body_size: FontSize::from_points(config.default_body_size),
                levels: HeadingLevelMap::default(),
                style_counts: Vec::new(),
            };
        }

        let body_size = most_common(considered.iter().map(|s| s.size_key()))
            .unwrap_or_else(|| FontSize::from_points(config.default_body_size));
        let style_counts = tally(considered.iter().map(|s| s.style()));

        let levels = HeadingLevelMap::from_styles(
            style_counts
                .iter()
                .map(|(style, _)| *style)
                .filter(|style| style.size > body_size || style.is_bold),
        );

        log::debug!(
            "Body size {}pt, {} heading styles out of {}",
            body_size,
            levels.len(),
            style_counts.len()
        );

        Self {
            body_size,
            levels,
            style_counts,
        }
    }

    /// Body size in points.
    pub fn body_size_points(&self) -> f32 {
        self.body_size.points()
    }
}

/// Count occurrences, keeping first-appearance order.
fn tally<T, I>(items: I) -> Vec<(T, usize)>
where
    T: Copy + Eq + std::hash::Hash,
    I: IntoIterator<Item = T>,
{
    let mut index: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<(T, usize)> = Vec::new();
    for item in items {
        match index.get(&item) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(item, counts.len());
                counts.push((item, 1));
            }
        }
    }
    counts
}

/// Most frequent item; the earliest one wins ties.
fn most_common<T, I>(items: I) -> Option<T>
where
    T: Copy + Eq + std::hash::Hash,
    I: IntoIterator<Item = T>,
{
    let mut best: Option<(T, usize)> = None;
    for (item, count) in tally(items) {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((item, count));
        }
    }
    best.map(|(item, _)| item)
}
