//! Inferred document structure.

use serde::{Deserialize, Serialize};

use super::HeadingLevel;

/// A single heading in the inferred outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level
    pub level: HeadingLevel,
    /// Heading text
    pub text: String,
    /// 1-based page number
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new outline entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Title and outline of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStructure {
    /// Document title
    pub title: String,
    /// Headings ordered by page, then vertical position
    pub outline: Vec<OutlineEntry>,
}

impl DocumentStructure {
    /// Create a structure from a title and outline.
    pub fn new(title: impl Into<String>, outline: Vec<OutlineEntry>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// A structure with a title and no outline.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self::new(title, Vec::new())
    }

    /// Number of outline entries.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Check if the outline is empty.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let structure = DocumentStructure::new(
            "Annual Report",
            vec![OutlineEntry::new(HeadingLevel::H1, "Summary", 2)],
        );
        let value = serde_json::to_value(&structure).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "title": "Annual Report",
                "outline": [{"level": "H1", "text": "Summary", "page": 2}]
            })
        );
    }

    #[test]
    fn test_sentinel_shape() {
        let value = serde_json::to_value(DocumentStructure::with_title("No text found")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"title": "No text found", "outline": []})
        );
    }
}
