//! Rendering of outline results.

mod json;
mod text;

pub use json::{to_json, write_json, JsonFormat};
pub use text::{to_line_table, to_tree};
