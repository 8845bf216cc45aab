//! Typographic styles and heading levels.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A font size held as an integer number of hundredths of a point.
///
/// Sizes are compared, hashed and grouped through this key so that two spans
/// whose sizes round to the same two decimals always land in the same bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FontSize(i64);

impl FontSize {
    /// Round a size in points to two decimals.
    pub fn from_points(points: f32) -> Self {
        Self((points as f64 * 100.0).round() as i64)
    }

    /// Size in points.
    pub fn points(self) -> f32 {
        (self.0 as f64 / 100.0) as f32
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.points())
    }
}

/// Font size + weight pair used as the heading classification key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    pub size: FontSize,
    pub is_bold: bool,
}

impl Style {
    /// Create a style from a size in points.
    pub fn new(font_size: f32, is_bold: bool) -> Self {
        Self {
            size: FontSize::from_points(font_size),
            is_bold,
        }
    }

    /// Font size in points.
    pub fn font_size(&self) -> f32 {
        self.size.points()
    }

    /// Heading rank order: larger sizes first, bold before regular at equal size.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .size
            .cmp(&self.size)
            .then_with(|| other.is_bold.cmp(&self.is_bold))
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bold {
            write!(f, "{}pt bold", self.size)
        } else {
            write!(f, "{}pt", self.size)
        }
    }
}

/// Outline heading level (`H1`, `H2`, ...). There is no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HeadingLevel(u32);

impl HeadingLevel {
    pub const H1: HeadingLevel = HeadingLevel(1);
    pub const H2: HeadingLevel = HeadingLevel(2);
    pub const H3: HeadingLevel = HeadingLevel(3);

    /// Create a level from its 1-based depth. Returns `None` for 0.
    pub fn new(depth: u32) -> Option<Self> {
        (depth > 0).then_some(Self(depth))
    }

    /// 1-based depth (1 for `H1`).
    pub fn depth(self) -> u32 {
        self.0
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.0)
    }
}

impl FromStr for HeadingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('H')
            .or_else(|| s.strip_prefix('h'))
            .ok_or_else(|| format!("invalid heading level: {}", s))?;
        digits
            .parse::<u32>()
            .ok()
            .and_then(HeadingLevel::new)
            .ok_or_else(|| format!("invalid heading level: {}", s))
    }
}

impl Serialize for HeadingLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HeadingLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Mapping from heading styles to levels, in rank order.
///
/// Every style maps to exactly one level and levels run `H1..Hk` without gaps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadingLevelMap {
    ranked: Vec<Style>,
    levels: HashMap<Style, HeadingLevel>,
}

impl HeadingLevelMap {
    /// Build a map from styles, ranking them and assigning levels in order.
    /// Duplicate styles collapse into one level.
    pub fn from_styles<I: IntoIterator<Item = Style>>(styles: I) -> Self {
        let mut ranked: Vec<Style> = Vec::new();
        for style in styles {
            if !ranked.contains(&style) {
                ranked.push(style);
            }
        }
        ranked.sort_by(Style::rank_cmp);

        let levels = ranked
            .iter()
            .enumerate()
            .map(|(i, style)| (*style, HeadingLevel(i as u32 + 1)))
            .collect();

        Self { ranked, levels }
    }

    /// Level assigned to a style, if it is a heading style.
    pub fn get(&self, style: &Style) -> Option<HeadingLevel> {
        self.levels.get(style).copied()
    }

    /// Styles with their levels, `H1` first.
    pub fn iter(&self) -> impl Iterator<Item = (Style, HeadingLevel)> + '_ {
        self.ranked
            .iter()
            .enumerate()
            .map(|(i, style)| (*style, HeadingLevel(i as u32 + 1)))
    }

    /// Number of heading styles.
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    /// Check if no style is a heading style.
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_size_rounding() {
        assert_eq!(FontSize::from_points(11.999), FontSize::from_points(12.0));
        assert_ne!(FontSize::from_points(11.99), FontSize::from_points(12.0));
        assert_eq!(FontSize::from_points(14.5).to_string(), "14.50");
    }

    #[test]
    fn test_rank_order() {
        let map = HeadingLevelMap::from_styles(vec![
            Style::new(12.0, true),
            Style::new(24.0, false),
            Style::new(16.0, false),
            Style::new(16.0, true),
        ]);

        let ranked: Vec<(Style, String)> =
            map.iter().map(|(s, l)| (s, l.to_string())).collect();
        assert_eq!(
            ranked,
            vec![
                (Style::new(24.0, false), "H1".to_string()),
                (Style::new(16.0, true), "H2".to_string()),
                (Style::new(16.0, false), "H3".to_string()),
                (Style::new(12.0, true), "H4".to_string()),
            ]
        );
        assert_eq!(map.get(&Style::new(16.0, true)), Some(HeadingLevel::H2));
        assert_eq!(map.get(&Style::new(10.0, false)), None);
    }

    #[test]
    fn test_duplicate_styles_collapse() {
        let map = HeadingLevelMap::from_styles(vec![
            Style::new(18.0, false),
            Style::new(18.0, false),
        ]);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_heading_level_parse_and_serialize() {
        assert_eq!("H3".parse::<HeadingLevel>().unwrap(), HeadingLevel::H3);
        assert!("H0".parse::<HeadingLevel>().is_err());
        assert!("Heading".parse::<HeadingLevel>().is_err());

        let json = serde_json::to_string(&HeadingLevel::new(12).unwrap()).unwrap();
        assert_eq!(json, "\"H12\"");
        let level: HeadingLevel = serde_json::from_str("\"H2\"").unwrap();
        assert_eq!(level, HeadingLevel::H2);
    }
}
