//! JSONL (JSON Lines) table writer.

use serde::Serialize;

use crate::error::Result;

/// Serializes one table as JSON Lines: one compact JSON object per line.
///
/// # Format
/// ```json
/// {"id":0,"reaction":"❤","actor":"Bob"}
/// {"id":3,"reaction":"😂","actor":"Alice"}
/// ```
pub fn table_to_jsonl<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut out = String::new();
    for row in rows {
        out.push_str(&serde_json::to_string(row)?);
        out.push('\n');
    }
    Ok(out)
}
