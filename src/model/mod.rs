//! Model types for layout-driven structure inference.
//!
//! The page decoder produces a [`DocumentLayout`] (page geometry and
//! positioned [`TextSpan`]s); the analysis pipeline turns it into a
//! [`DocumentStructure`]. All values are scoped to a single document.

mod span;
mod structure;
mod style;

pub use span::{is_bold_font, BBox, DocumentLayout, PageLayout, TextSpan};
pub use structure::{DocumentStructure, OutlineEntry};
pub use style::{FontSize, HeadingLevel, HeadingLevelMap, Style};
