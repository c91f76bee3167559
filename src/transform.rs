//! Export-to-tables transform.
//!
//! This module contains [`ExportTransformer`], which turns one Messenger
//! export document into the three tables of a [`Dataset`]:
//!
//! - **messages**: one row per populated content field per message
//! - **participants**: the participant list, passed through verbatim
//! - **reactions**: one row per reaction entry
//!
//! Row ids are positions in the export's message array, counted over the
//! full array before any filtering, so rows from all three tables join
//! back to the same originating message.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde_json::error::Category;

use crate::config::TransformConfig;
use crate::error::{ChatframeError, Result};
use crate::export::{Participant, RawExport, RawMessage, repair_mojibake, timestamp_from_ms};
use crate::tables::{ContentKind, ContentRow, ContentValue, Dataset, ReactionRow};

/// Transformer for Messenger JSON exports.
///
/// # Example
///
/// ```rust
/// use chatframe::transform::ExportTransformer;
///
/// let json = r#"{
///     "participants": [{"name": "Alice"}, {"name": "Bob"}],
///     "messages": [
///         {"sender_name": "Alice", "timestamp_ms": 1705315800000,
///          "content": "hello", "type": "Generic"}
///     ]
/// }"#;
///
/// let dataset = ExportTransformer::new().transform_str(json)?;
/// assert_eq!(dataset.messages.len(), 1);
/// assert_eq!(dataset.participants.len(), 2);
/// # Ok::<(), chatframe::ChatframeError>(())
/// ```
pub struct ExportTransformer {
    config: TransformConfig,
}

impl ExportTransformer {
    /// Creates a new transformer with default configuration.
    pub fn new() -> Self {
        Self {
            config: TransformConfig::default(),
        }
    }

    /// Creates a transformer with custom configuration.
    pub fn with_config(config: TransformConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Loads an export file and transforms it into tables.
    pub fn transform(&self, path: &Path) -> Result<Dataset> {
        let content = fs::read_to_string(path)
            .map_err(|err| ChatframeError::load_io(err, Some(path.to_path_buf())))?;
        let export = parse_export(&content, Some(path))?;
        self.derive(&export)
    }

    /// Transforms export content already in memory.
    pub fn transform_str(&self, content: &str) -> Result<Dataset> {
        let export = parse_export(content, None)?;
        self.derive(&export)
    }

    fn derive(&self, export: &RawExport) -> Result<Dataset> {
        Ok(Dataset {
            messages: self.extract_messages(export)?,
            participants: self.extract_participants(export),
            reactions: self.extract_reactions(export),
        })
    }

    /// Builds the content table.
    fn extract_messages(&self, export: &RawExport) -> Result<Vec<ContentRow>> {
        // Number every message first, validate every timestamp, and only
        // then drop the non-content kinds. Call events and the like keep
        // their slots in the id sequence.
        let mut generic: Vec<(u64, &RawMessage, DateTime<Utc>)> = Vec::new();
        for (idx, msg) in export.messages.iter().enumerate() {
            let time = timestamp_from_ms(msg.timestamp_ms).ok_or_else(|| {
                ChatframeError::schema(format!(
                    "timestamp_ms {} at message {idx} is out of range",
                    msg.timestamp_ms
                ))
            })?;
            if msg.is_generic() {
                generic.push((idx as u64, msg, time));
            }
        }

        let mut rows = Vec::new();

        // Text rows are built before attachment rows so the stable sort
        // below keeps them first within one id.
        for &(id, msg, time) in &generic {
            if let Some(text) = &msg.content {
                rows.push(ContentRow {
                    id,
                    content: ContentValue::Text(self.repair(text)),
                    content_type: ContentKind::Messages,
                    sender_name: self.repair(&msg.sender_name),
                    time,
                });
            }
        }
        for &kind in ContentKind::attachment_kinds() {
            for &(id, msg, time) in &generic {
                if let Some(content) = self.attachment_value(msg, kind) {
                    rows.push(ContentRow {
                        id,
                        content,
                        content_type: kind,
                        sender_name: self.repair(&msg.sender_name),
                        time,
                    });
                }
            }
        }

        rows.sort_by_key(|row| row.id);
        Ok(rows)
    }

    /// Builds the participants table.
    fn extract_participants(&self, export: &RawExport) -> Vec<Participant> {
        export
            .participants
            .iter()
            .map(|participant| {
                let mut row = participant.clone();
                if self.config.fix_encoding {
                    row.name = repair_mojibake(&row.name);
                }
                row
            })
            .collect()
    }

    /// Builds the reactions table.
    ///
    /// Reactions are collected from every message, content-bearing or not,
    /// so reaction ids share the same sequence as content row ids.
    fn extract_reactions(&self, export: &RawExport) -> Vec<ReactionRow> {
        let mut rows = Vec::new();
        for (idx, msg) in export.messages.iter().enumerate() {
            if let Some(reactions) = &msg.reactions {
                for entry in reactions {
                    rows.push(ReactionRow {
                        id: idx as u64,
                        reaction: self.repair(&entry.reaction),
                        actor: self.repair(&entry.actor),
                        extra: entry.extra.clone(),
                    });
                }
            }
        }
        rows
    }

    /// Returns the row value for one attachment field, if populated.
    fn attachment_value(&self, msg: &RawMessage, kind: ContentKind) -> Option<ContentValue> {
        match kind {
            ContentKind::AudioFiles => msg.audio_files.clone().map(ContentValue::Media),
            ContentKind::Files => msg.files.clone().map(ContentValue::Media),
            ContentKind::Gifs => msg.gifs.clone().map(ContentValue::Media),
            ContentKind::Photos => msg.photos.clone().map(ContentValue::Media),
            ContentKind::Videos => msg.videos.clone().map(ContentValue::Media),
            ContentKind::Sticker => msg.sticker.clone().map(ContentValue::Sticker),
            ContentKind::Share => msg.share.clone().map(|mut share| {
                if self.config.fix_encoding {
                    if let Some(text) = share.share_text.take() {
                        share.share_text = Some(repair_mojibake(&text));
                    }
                }
                ContentValue::Share(share)
            }),
            // Text bodies are handled separately
            ContentKind::Messages => None,
        }
    }

    fn repair(&self, s: &str) -> String {
        if self.config.fix_encoding {
            repair_mojibake(s)
        } else {
            s.to_string()
        }
    }
}

impl Default for ExportTransformer {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses export content, splitting failures into load and schema errors.
///
/// Malformed JSON (including truncation) is a load error. Well-formed JSON
/// that doesn't match the export shape is a schema error.
fn parse_export(content: &str, path: Option<&Path>) -> Result<RawExport> {
    match serde_json::from_str(content) {
        Ok(export) => Ok(export),
        Err(err) => match err.classify() {
            Category::Data => Err(ChatframeError::schema(err.to_string())),
            _ => Err(ChatframeError::load_json(err, path.map(Path::to_path_buf))),
        },
    }
}

/// Transforms an export file with the default configuration.
///
/// # Example
///
/// ```rust,no_run
/// let dataset = chatframe::transform_file("message_1.json".as_ref())?;
/// println!("{} content rows", dataset.messages.len());
/// # Ok::<(), chatframe::ChatframeError>(())
/// ```
pub fn transform_file(path: &Path) -> Result<Dataset> {
    ExportTransformer::new().transform(path)
}

/// Transforms export content with the default configuration.
pub fn transform_str(content: &str) -> Result<Dataset> {
    ExportTransformer::new().transform_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn kinds(dataset: &Dataset) -> Vec<&'static str> {
        dataset
            .messages
            .iter()
            .map(|row| row.content_type.as_str())
            .collect()
    }

    // =========================================================================
    // ExportTransformer construction tests
    // =========================================================================

    #[test]
    fn test_transformer_new() {
        let transformer = ExportTransformer::new();
        assert!(!transformer.config().fix_encoding);
    }

    #[test]
    fn test_transformer_default() {
        let transformer = ExportTransformer::default();
        assert!(!transformer.config().fix_encoding);
    }

    #[test]
    fn test_transformer_with_config() {
        let config = TransformConfig::new().with_fix_encoding(true);
        let transformer = ExportTransformer::with_config(config);
        assert!(transformer.config().fix_encoding);
    }

    // =========================================================================
    // Content table tests
    // =========================================================================

    #[test]
    fn test_single_text_message() {
        let json = r#"{
            "participants": [{"name": "Alice"}],
            "messages": [
                {"sender_name": "Alice", "timestamp_ms": 1705315800000,
                 "content": "hello", "type": "Generic"}
            ]
        }"#;
        let dataset = transform_str(json).expect("transform failed");

        assert_eq!(dataset.messages.len(), 1);
        let row = &dataset.messages[0];
        assert_eq!(row.id, 0);
        assert_eq!(row.content.as_text(), Some("hello"));
        assert_eq!(row.content_type, ContentKind::Messages);
        assert_eq!(row.sender_name, "Alice");
        assert_eq!(
            row.time,
            Utc.timestamp_millis_opt(1705315800000).single().unwrap()
        );
    }

    #[test]
    fn test_minimal_export_at_epoch() {
        let json = r#"{
            "participants": [{"name": "A"}],
            "messages": [
                {"sender_name": "A", "timestamp_ms": 0, "content": "hi", "type": "Generic"}
            ]
        }"#;
        let dataset = transform_str(json).expect("transform failed");

        let row = &dataset.messages[0];
        assert_eq!(row.id, 0);
        assert_eq!(row.content.as_text(), Some("hi"));
        assert_eq!(row.content_type, ContentKind::Messages);
        assert_eq!(row.sender_name, "A");
        assert_eq!(row.time, Utc.timestamp_millis_opt(0).single().unwrap());
    }

    #[test]
    fn test_ids_count_filtered_messages() {
        let json = r#"{
            "participants": [],
            "messages": [
                {"sender_name": "A", "timestamp_ms": 1000, "content": "one", "type": "Generic"},
                {"sender_name": "A", "timestamp_ms": 2000, "content": "Call duration: 62", "type": "Call"},
                {"sender_name": "B", "timestamp_ms": 3000, "content": "two", "type": "Generic"}
            ]
        }"#;
        let dataset = transform_str(json).expect("transform failed");

        let ids: Vec<u64> = dataset.messages.iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_non_generic_content_excluded() {
        let json = r#"{
            "participants": [],
            "messages": [
                {"sender_name": "A", "timestamp_ms": 1000, "content": "missed call", "type": "Call"}
            ]
        }"#;
        let dataset = transform_str(json).expect("transform failed");
        assert!(dataset.messages.is_empty());
    }

    #[test]
    fn test_message_with_text_and_photos_makes_two_rows() {
        let json = r#"{
            "participants": [],
            "messages": [
                {"sender_name": "A", "timestamp_ms": 1000, "content": "look",
                 "photos": [{"uri": "photos/1.jpg", "creation_timestamp": 1}],
                 "type": "Generic"}
            ]
        }"#;
        let dataset = transform_str(json).expect("transform failed");

        assert_eq!(dataset.messages.len(), 2);
        assert_eq!(dataset.messages[0].id, 0);
        assert_eq!(dataset.messages[1].id, 0);
        assert_eq!(kinds(&dataset), vec!["messages", "photos"]);
        // Both rows carry the originating message's sender and time
        assert_eq!(dataset.messages[0].sender_name, "A");
        assert_eq!(dataset.messages[1].sender_name, "A");
        assert_eq!(dataset.messages[0].time, dataset.messages[1].time);
    }

    #[test]
    fn test_attachment_order_within_one_id() {
        let json = r#"{
            "participants": [],
            "messages": [
                {"sender_name": "A", "timestamp_ms": 1000, "content": "all of it",
                 "videos": [{"uri": "v.mp4"}],
                 "audio_files": [{"uri": "a.aac"}],
                 "photos": [{"uri": "p.jpg"}],
                 "type": "Generic"}
            ]
        }"#;
        let dataset = transform_str(json).expect("transform failed");
        assert_eq!(
            kinds(&dataset),
            vec!["messages", "audio_files", "photos", "videos"]
        );
    }

    #[test]
    fn test_rows_sorted_by_id() {
        let json = r#"{
            "participants": [],
            "messages": [
                {"sender_name": "A", "timestamp_ms": 1000,
                 "photos": [{"uri": "p.jpg"}], "type": "Generic"},
                {"sender_name": "B", "timestamp_ms": 2000, "content": "hi", "type": "Generic"},
                {"sender_name": "A", "timestamp_ms": 3000, "content": "sticker time",
                 "sticker": {"uri": "s.png"}, "type": "Generic"}
            ]
        }"#;
        let dataset = transform_str(json).expect("transform failed");

        let ids: Vec<u64> = dataset.messages.iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 2]);
        assert_eq!(kinds(&dataset), vec!["photos", "messages", "messages", "sticker"]);
    }

    #[test]
    fn test_empty_string_content_still_makes_a_row() {
        let json = r#"{
            "participants": [],
            "messages": [
                {"sender_name": "A", "timestamp_ms": 1000, "content": "", "type": "Generic"}
            ]
        }"#;
        let dataset = transform_str(json).expect("transform failed");
        assert_eq!(dataset.messages.len(), 1);
        assert_eq!(dataset.messages[0].content.as_text(), Some(""));
    }

    #[test]
    fn test_empty_attachment_list_still_makes_a_row() {
        let json = r#"{
            "participants": [],
            "messages": [
                {"sender_name": "A", "timestamp_ms": 1000, "gifs": [], "type": "Generic"}
            ]
        }"#;
        let dataset = transform_str(json).expect("transform failed");
        assert_eq!(dataset.messages.len(), 1);
        assert_eq!(dataset.messages[0].content, ContentValue::Media(vec![]));
        assert_eq!(dataset.messages[0].content_type, ContentKind::Gifs);
    }

    #[test]
    fn test_null_content_fields_make_no_rows() {
        let json = r#"{
            "participants": [],
            "messages": [
                {"sender_name": "A", "timestamp_ms": 1000, "content": null,
                 "photos": null, "type": "Generic"}
            ]
        }"#;
        let dataset = transform_str(json).expect("transform failed");
        assert!(dataset.messages.is_empty());
    }

    #[test]
    fn test_share_value_preserved() {
        let json = r#"{
            "participants": [],
            "messages": [
                {"sender_name": "A", "timestamp_ms": 1000,
                 "share": {"link": "https://example.com", "share_text": "worth a read"},
                 "type": "Generic"}
            ]
        }"#;
        let dataset = transform_str(json).expect("transform failed");

        assert_eq!(dataset.messages.len(), 1);
        match &dataset.messages[0].content {
            ContentValue::Share(share) => {
                assert_eq!(share.link.as_deref(), Some("https://example.com"));
                assert_eq!(share.share_text.as_deref(), Some("worth a read"));
            }
            other => panic!("expected share value, got {other:?}"),
        }
    }

    #[test]
    fn test_media_value_preserved() {
        let json = r#"{
            "participants": [],
            "messages": [
                {"sender_name": "A", "timestamp_ms": 1000,
                 "files": [{"uri": "files/doc.pdf", "creation_timestamp": 99},
                           {"uri": "files/notes.txt"}],
                 "type": "Generic"}
            ]
        }"#;
        let dataset = transform_str(json).expect("transform failed");

        match &dataset.messages[0].content {
            ContentValue::Media(files) => {
                assert_eq!(files.len(), 2);
                assert_eq!(files[0].uri.as_deref(), Some("files/doc.pdf"));
                assert_eq!(files[0].creation_timestamp, Some(99));
                assert!(files[1].creation_timestamp.is_none());
            }
            other => panic!("expected media value, got {other:?}"),
        }
    }

    // =========================================================================
    // Participants table tests
    // =========================================================================

    #[test]
    fn test_participants_passthrough_in_order() {
        let json = r#"{
            "participants": [{"name": "Alice"}, {"name": "Bob", "muted": true}],
            "messages": []
        }"#;
        let dataset = transform_str(json).expect("transform failed");

        assert_eq!(dataset.participants.len(), 2);
        assert_eq!(dataset.participants[0].name, "Alice");
        assert_eq!(dataset.participants[1].name, "Bob");
        assert_eq!(
            dataset.participants[1].extra.get("muted"),
            Some(&serde_json::Value::Bool(true))
        );
    }

    // =========================================================================
    // Reactions table tests
    // =========================================================================

    #[test]
    fn test_reactions_keep_message_position() {
        let json = r#"{
            "participants": [],
            "messages": [
                {"sender_name": "A", "timestamp_ms": 1000, "content": "hi", "type": "Generic"},
                {"sender_name": "B", "timestamp_ms": 2000, "content": "hello", "type": "Generic"},
                {"sender_name": "A", "timestamp_ms": 3000, "type": "Call"},
                {"sender_name": "B", "timestamp_ms": 4000, "content": "back", "type": "Generic",
                 "reactions": [{"reaction": "❤", "actor": "A"},
                               {"reaction": "😂", "actor": "C"}]}
            ]
        }"#;
        let dataset = transform_str(json).expect("transform failed");

        // Both rows carry the owning message's position in the full sequence
        assert_eq!(dataset.reactions.len(), 2);
        assert_eq!(dataset.reactions[0].id, 3);
        assert_eq!(dataset.reactions[0].reaction, "❤");
        assert_eq!(dataset.reactions[0].actor, "A");
        assert_eq!(dataset.reactions[1].id, 3);
        assert_eq!(dataset.reactions[1].reaction, "😂");
    }

    #[test]
    fn test_reactions_on_non_generic_messages_are_kept() {
        let json = r#"{
            "participants": [],
            "messages": [
                {"sender_name": "A", "timestamp_ms": 1000, "type": "Call",
                 "reactions": [{"reaction": "👍", "actor": "B"}]}
            ]
        }"#;
        let dataset = transform_str(json).expect("transform failed");

        assert!(dataset.messages.is_empty());
        assert_eq!(dataset.reactions.len(), 1);
        assert_eq!(dataset.reactions[0].id, 0);
    }

    #[test]
    fn test_reaction_extra_fields_preserved() {
        let json = r#"{
            "participants": [],
            "messages": [
                {"sender_name": "A", "timestamp_ms": 1000, "content": "x", "type": "Generic",
                 "reactions": [{"reaction": "❤", "actor": "B", "timestamp": 1001}]}
            ]
        }"#;
        let dataset = transform_str(json).expect("transform failed");
        assert_eq!(
            dataset.reactions[0].extra.get("timestamp"),
            Some(&serde_json::Value::from(1001))
        );
    }

    // =========================================================================
    // Encoding fix tests
    // =========================================================================

    #[test]
    fn test_fix_encoding_repairs_derived_strings() {
        // "é" mojibake'd into its UTF-8 bytes as Latin-1 codepoints
        let json = "{\
            \"participants\": [{\"name\": \"Ren\u{c3}\u{a9}\"}],\
            \"messages\": [\
                {\"sender_name\": \"Ren\u{c3}\u{a9}\", \"timestamp_ms\": 1000,\
                 \"content\": \"caf\u{c3}\u{a9}\", \"type\": \"Generic\"}\
            ]\
        }";

        let fixed = ExportTransformer::with_config(TransformConfig::new().with_fix_encoding(true))
            .transform_str(json)
            .expect("transform failed");
        assert_eq!(fixed.participants[0].name, "René");
        assert_eq!(fixed.messages[0].sender_name, "René");
        assert_eq!(fixed.messages[0].content.as_text(), Some("café"));

        let verbatim = transform_str(json).expect("transform failed");
        assert_eq!(verbatim.messages[0].content.as_text(), Some("caf\u{c3}\u{a9}"));
    }

    // =========================================================================
    // Error classification tests
    // =========================================================================

    #[test]
    fn test_malformed_json_is_load_error() {
        let err = transform_str("not json at all").unwrap_err();
        assert!(err.is_load());
    }

    #[test]
    fn test_truncated_json_is_load_error() {
        let err = transform_str(r#"{"participants": [], "messages": ["#).unwrap_err();
        assert!(err.is_load());
    }

    #[test]
    fn test_wrong_shape_is_schema_error() {
        let err = transform_str(r#"{"participants": []}"#).unwrap_err();
        assert!(err.is_schema());

        let err = transform_str(r#"[1, 2, 3]"#).unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_message_missing_required_field_is_schema_error() {
        let json = r#"{
            "participants": [],
            "messages": [{"sender_name": "A", "timestamp_ms": 1000}]
        }"#;
        let err = transform_str(json).unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_string_timestamp_is_schema_error() {
        let json = r#"{
            "participants": [],
            "messages": [{"sender_name": "A", "timestamp_ms": "soon", "type": "Generic"}]
        }"#;
        let err = transform_str(json).unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_out_of_range_timestamp_is_schema_error() {
        let json = format!(
            r#"{{
                "participants": [],
                "messages": [{{"sender_name": "A", "timestamp_ms": {},
                               "content": "x", "type": "Generic"}}]
            }}"#,
            i64::MAX
        );
        let err = transform_str(&json).unwrap_err();
        assert!(err.is_schema());
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = transform_file(Path::new("/no/such/export.json")).unwrap_err();
        assert!(err.is_load());
    }

    // =========================================================================
    // Whole-dataset tests
    // =========================================================================

    #[test]
    fn test_empty_export() {
        let dataset = transform_str(r#"{"participants": [], "messages": []}"#)
            .expect("transform failed");
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_transform_is_deterministic() {
        let json = r#"{
            "participants": [{"name": "Alice"}, {"name": "Bob"}],
            "messages": [
                {"sender_name": "Alice", "timestamp_ms": 1000, "content": "hi",
                 "photos": [{"uri": "p.jpg"}], "type": "Generic",
                 "reactions": [{"reaction": "❤", "actor": "Bob"}]},
                {"sender_name": "Bob", "timestamp_ms": 2000, "videos": [{"uri": "v.mp4"}],
                 "type": "Generic"}
            ]
        }"#;
        let first = transform_str(json).expect("transform failed");
        let second = transform_str(json).expect("transform failed");

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
