//! JSON rendering for outline results.

use std::io::Write;

use serde::Serialize;
use serde_json::ser::{CompactFormatter, PrettyFormatter, Serializer};

use crate::error::Result;
use crate::model::OutlineResult;

const PRETTY_INDENT: &[u8] = b"    ";

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with a four-space indent
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline result to JSON.
///
/// Non-ASCII text is written as UTF-8, never as `\u` escapes.
pub fn to_json(result: &OutlineResult, format: JsonFormat) -> Result<String> {
    let mut buf = Vec::new();
    write_json(&mut buf, result, format)?;
    // serde_json only emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write an outline result as JSON to `writer`.
pub fn write_json<W: Write>(writer: W, result: &OutlineResult, format: JsonFormat) -> Result<()> {
    match format {
        JsonFormat::Pretty => {
            let mut ser =
                Serializer::with_formatter(writer, PrettyFormatter::with_indent(PRETTY_INDENT));
            result.serialize(&mut ser)?;
        }
        JsonFormat::Compact => {
            let mut ser = Serializer::with_formatter(writer, CompactFormatter);
            result.serialize(&mut ser)?;
        }
    }
    Ok(())
}
