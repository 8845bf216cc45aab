//! Layout-to-structure inference.
//!
//! The pipeline runs in three steps over the spans of a single document:
//!
//! 1. [`StyleProfile::analyze`] finds the body font size and ranks the
//!    remaining styles into heading levels.
//! 2. [`detect_title`] merges the large first-page lines into a title.
//! 3. [`build_outline`] classifies, deduplicates and orders the headings.
//!
//! Every step is a pure function of its inputs; nothing is shared between
//! documents.

mod config;
mod normalize;
mod outline;
mod profile;
mod rules;
mod title;

pub use config::{OutlineConfig, PositionLookup};
pub use normalize::normalize_text;
pub use outline::build_outline;
pub use profile::StyleProfile;
pub use rules::{override_level, OverrideRule};
pub use title::{detect_title, TITLE_NOT_FOUND};

use crate::model::{DocumentLayout, DocumentStructure};

/// Infer the title and outline of a decoded document.
pub fn analyze_layout(layout: &DocumentLayout, config: &OutlineConfig) -> DocumentStructure {
    let profile = StyleProfile::analyze(&layout.spans, config);
    let title = detect_title(&layout.spans, profile.body_size, config);
    let outline = build_outline(layout, &profile.levels, &title, config);

    log::debug!(
        "Inferred title {:?} with {} outline entries",
        title,
        outline.len()
    );

    DocumentStructure::new(title, outline)
}
