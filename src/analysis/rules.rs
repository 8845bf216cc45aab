//! Lexical level overrides.
//!
//! Rules are evaluated in order after the style-derived level has been
//! determined; the first rule whose pattern matches forces its level.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::model::HeadingLevel;

static APPENDIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Appendix [A-Z]:").unwrap());

static NUMBERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s").unwrap());

/// A (pattern, forced level) pair.
#[derive(Debug, Clone)]
pub struct OverrideRule {
    pattern: Regex,
    level: HeadingLevel,
}

impl OverrideRule {
    /// Compile a rule from a regular expression.
    pub fn new(pattern: &str, level: HeadingLevel) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            level,
        })
    }

    /// `Appendix <letter>:` headings are forced to `H2`.
    pub fn appendix() -> Self {
        Self {
            pattern: APPENDIX.clone(),
            level: HeadingLevel::H2,
        }
    }

    /// `<digits>. ` numbered items are forced to `H3`.
    pub fn numbered_item() -> Self {
        Self {
            pattern: NUMBERED_ITEM.clone(),
            level: HeadingLevel::H3,
        }
    }

    /// The built-in rules, highest priority first.
    pub fn defaults() -> Vec<Self> {
        vec![Self::appendix(), Self::numbered_item()]
    }

    /// The level this rule forces.
    pub fn level(&self) -> HeadingLevel {
        self.level
    }

    /// Source of the pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Whether the rule applies to `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Level forced by the first matching rule, if any.
pub fn override_level(rules: &[OverrideRule], text: &str) -> Option<HeadingLevel> {
    rules.iter().find(|r| r.matches(text)).map(|r| r.level)
}
