//! JSON output for inferred document structures.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::Result;
use crate::model::DocumentStructure;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with a four-space indent
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a document structure.
///
/// Non-ASCII text is written as-is, not escaped.
pub fn to_json(structure: &DocumentStructure, format: JsonFormat) -> Result<String> {
    let bytes = match format {
        JsonFormat::Pretty => {
            let mut buf = Vec::new();
            let formatter = PrettyFormatter::with_indent(b"    ");
            let mut ser = Serializer::with_formatter(&mut buf, formatter);
            structure.serialize(&mut ser)?;
            buf
        }
        JsonFormat::Compact => serde_json::to_vec(structure)?,
    };

    // serde_json only emits valid UTF-8.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Serialize a document structure and write it to `path`.
pub fn write_json<P: AsRef<Path>>(
    path: P,
    structure: &DocumentStructure,
    format: JsonFormat,
) -> Result<()> {
    let json = to_json(structure, format)?;
    fs::write(path, json)?;
    Ok(())
}
