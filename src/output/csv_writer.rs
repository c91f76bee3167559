//! CSV table writers.
//!
//! Each table gets its own writer because the columns differ:
//!
//! - messages: fixed columns `id,content_type,sender_name,time,content`
//! - participants: `name` plus one column per extra key seen in the data
//! - reactions: `id,reaction,actor` plus extra-key columns
//!
//! Extra-key columns are the sorted union across all rows, so the header
//! is stable regardless of which rows carry which keys.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::error::Result;
use crate::export::Participant;
use crate::tables::{ContentRow, ContentValue, ReactionRow};

/// Timestamp rendering for the `time` column.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Serializes the messages table to CSV.
///
/// # Format
/// - Delimiter: `,`
/// - Columns: `id`, `content_type`, `sender_name`, `time`, `content`
/// - Encoding: UTF-8
pub fn messages_to_csv(rows: &[ContentRow]) -> Result<String> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(["id", "content_type", "sender_name", "time", "content"])?;

        for row in rows {
            writer.write_record([
                row.id.to_string(),
                row.content_type.to_string(),
                row.sender_name.clone(),
                row.time.format(TIME_FORMAT).to_string(),
                content_field(&row.content)?,
            ])?;
        }
        writer.flush()?;
    }
    Ok(String::from_utf8(buf)?)
}

/// Serializes the participants table to CSV.
pub fn participants_to_csv(rows: &[Participant]) -> Result<String> {
    let extra_cols = extra_columns(rows.iter().map(|p| &p.extra));

    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);

        let mut header = vec!["name".to_string()];
        header.extend(extra_cols.iter().cloned());
        writer.write_record(&header)?;

        for participant in rows {
            let mut record = vec![participant.name.clone()];
            for col in &extra_cols {
                record.push(extra_field(&participant.extra, col)?);
            }
            writer.write_record(&record)?;
        }
        writer.flush()?;
    }
    Ok(String::from_utf8(buf)?)
}

/// Serializes the reactions table to CSV.
pub fn reactions_to_csv(rows: &[ReactionRow]) -> Result<String> {
    let extra_cols = extra_columns(rows.iter().map(|r| &r.extra));

    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);

        let mut header = vec!["id".to_string(), "reaction".to_string(), "actor".to_string()];
        header.extend(extra_cols.iter().cloned());
        writer.write_record(&header)?;

        for row in rows {
            let mut record = vec![row.id.to_string(), row.reaction.clone(), row.actor.clone()];
            for col in &extra_cols {
                record.push(extra_field(&row.extra, col)?);
            }
            writer.write_record(&record)?;
        }
        writer.flush()?;
    }
    Ok(String::from_utf8(buf)?)
}

/// Renders the content column: text bodies verbatim, structured values as
/// compact JSON.
fn content_field(value: &ContentValue) -> Result<String> {
    Ok(match value {
        ContentValue::Text(text) => text.clone(),
        other => serde_json::to_string(other)?,
    })
}

/// Sorted union of extra keys across all rows.
fn extra_columns<'a>(maps: impl Iterator<Item = &'a Map<String, Value>>) -> Vec<String> {
    let mut columns = BTreeSet::new();
    for map in maps {
        columns.extend(map.keys().cloned());
    }
    columns.into_iter().collect()
}

/// Renders one extra-column cell: strings bare, other values as compact
/// JSON, absent or null as empty.
fn extra_field(map: &Map<String, Value>, key: &str) -> Result<String> {
    Ok(match map.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => serde_json::to_string(other)?,
    })
}
