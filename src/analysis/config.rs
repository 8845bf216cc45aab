//! Heuristic parameters for outline inference.

use super::rules::OverrideRule;

/// How the final sort recovers the vertical position of an accepted heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionLookup {
    /// Use the span that was actually accepted.
    #[default]
    AcceptedSpan,
    /// Re-scan all spans for the first one with the same text on the same
    /// page. With duplicate text this may pick an occurrence other than the
    /// accepted one.
    FirstTextMatch,
}

/// Parameters of the style profiler, title detector and outline builder.
#[derive(Debug, Clone)]
pub struct OutlineConfig {
    /// Body size reported when no span qualifies for profiling
    pub default_body_size: f32,

    /// Minimum text length (characters) for a span to count in the style profile
    pub min_profile_chars: usize,

    /// Minimum text length (characters) for a heading
    pub min_heading_chars: usize,

    /// Maximum vertical gap between merged title lines
    pub title_gap: f32,

    /// Spans whose top lies below this fraction of the page height are footers
    pub footer_ratio: f32,

    /// Level overrides, highest priority first
    pub rules: Vec<OverrideRule>,

    /// Sort key recovery strategy
    pub position_lookup: PositionLookup,
}

impl OutlineConfig {
    /// Create a config with the default heuristics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title line gap.
    pub fn with_title_gap(mut self, gap: f32) -> Self {
        self.title_gap = gap;
        self
    }

    /// Set the footer cutoff ratio.
    pub fn with_footer_ratio(mut self, ratio: f32) -> Self {
        self.footer_ratio = ratio;
        self
    }

    /// Replace the override rules.
    pub fn with_rules(mut self, rules: Vec<OverrideRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Append an override rule with the lowest priority.
    pub fn add_rule(mut self, rule: OverrideRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Set the position lookup strategy.
    pub fn with_position_lookup(mut self, lookup: PositionLookup) -> Self {
        self.position_lookup = lookup;
        self
    }

    /// Reproduce the first-text-match sort key.
    pub fn legacy_sort(self) -> Self {
        self.with_position_lookup(PositionLookup::FirstTextMatch)
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            default_body_size: 12.0,
            min_profile_chars: 3,
            min_heading_chars: 3,
            title_gap: 10.0,
            footer_ratio: 0.9,
            rules: OverrideRule::defaults(),
            position_lookup: PositionLookup::AcceptedSpan,
        }
    }
}
