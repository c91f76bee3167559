//! JSON table writer.

use serde::Serialize;

use crate::error::Result;

/// Serializes one table as a pretty-printed JSON array.
///
/// Works for any row type; the three tables differ only in their row
/// structs.
///
/// # Format
/// ```json
/// [
///   {"id": 0, "content": "hello", "content_type": "messages", ...},
///   {"id": 0, "content": [...], "content_type": "photos", ...}
/// ]
/// ```
pub fn table_to_json<T: Serialize>(rows: &[T]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}
