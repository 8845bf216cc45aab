//! PDF decoding into positioned text spans.

pub mod backend;
mod layout;
mod options;

pub use backend::{BackendFontInfo, ContentOp, LopdfBackend, PageBox, PageId, PdfBackend, PdfValue};
pub use layout::LayoutExtractor;
pub use options::{ErrorMode, ExtractOptions};
