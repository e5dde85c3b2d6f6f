//! Rendering every string leaf of a record tree.

use crate::error::Result;
use crate::traits::MarkupRenderer;
use crate::value::{Record, Value};

/// Rewrites every string leaf with inline rendering, trimming the output.
///
/// Objects keep their key set and arrays their length and order; only leaf
/// values change.
pub fn markdownify<R>(value: Value, renderer: &R) -> Result<Value>
where
    R: MarkupRenderer + ?Sized,
{
    match value {
        Value::String(s) => Ok(Value::String(renderer.render_inline(&s)?.trim().to_string())),
        Value::Object(map) => Ok(Value::Object(markdownify_record(map, renderer)?)),
        Value::Array(items) => items
            .into_iter()
            .map(|item| markdownify(item, renderer))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
    }
}

/// [`markdownify`] applied to each value of a mapping.
pub fn markdownify_record<R>(record: Record, renderer: &R) -> Result<Record>
where
    R: MarkupRenderer + ?Sized,
{
    record
        .into_iter()
        .map(|(key, value)| Ok((key, markdownify(value, renderer)?)))
        .collect()
}
