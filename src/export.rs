//! Raw Messenger export structures.
//!
//! This module contains the deserialization types for Meta's
//! `message_1.json` shape, shared by the transformer and the output writers.
//! Fields the transform never touches (participant and reaction extras) are
//! captured as raw JSON so they survive the trip to the output tables.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message type that carries user content. Everything else (calls,
/// subscriptions, unsent tombstones) is excluded from the content table.
const GENERIC_KIND: &str = "Generic";

/// Top-level export document.
#[derive(Debug, Deserialize)]
pub struct RawExport {
    pub participants: Vec<Participant>,
    pub messages: Vec<RawMessage>,
}

/// Raw Messenger message structure for deserialization.
///
/// Only `sender_name`, `timestamp_ms`, and `type` are required; every
/// content field may be absent or `null` depending on what the message
/// carried.
#[derive(Debug, Deserialize)]
pub struct RawMessage {
    pub sender_name: String,
    pub timestamp_ms: i64,
    /// Message type from the export, e.g. `"Generic"` or `"Call"`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub photos: Option<Vec<MediaAttachment>>,
    #[serde(default)]
    pub videos: Option<Vec<MediaAttachment>>,
    #[serde(default)]
    pub audio_files: Option<Vec<MediaAttachment>>,
    #[serde(default)]
    pub files: Option<Vec<MediaAttachment>>,
    #[serde(default)]
    pub gifs: Option<Vec<MediaAttachment>>,
    #[serde(default)]
    pub sticker: Option<StickerAttachment>,
    #[serde(default)]
    pub share: Option<SharedLink>,
    #[serde(default)]
    pub reactions: Option<Vec<RawReaction>>,
}

impl RawMessage {
    /// Returns `true` if this message carries user content.
    pub fn is_generic(&self) -> bool {
        self.kind == GENERIC_KIND
    }
}

/// Media entry (photo, video, audio file, file, or gif).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAttachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<i64>,
}

/// Sticker attachment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickerAttachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// Shared link structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_text: Option<String>,
}

/// Conversation participant.
///
/// Messenger exports usually carry only `name`, but any further keys are
/// preserved verbatim in `extra` and reappear in the participants table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Raw reaction entry attached to a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawReaction {
    pub reaction: String,
    pub actor: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fix Meta's broken encoding (Mojibake).
///
/// Meta exports UTF-8 text encoded as if it were ISO-8859-1.
/// Each UTF-8 byte is stored as a separate Unicode codepoint.
/// Example: "Привет" becomes "ÐŸÑ€Ð¸Ð²ÐµÑ‚"
///
/// This function reverses that process by:
/// 1. Taking each char as its byte value
/// 2. Reconstructing the original UTF-8 string
///
/// Strings containing codepoints above U+00FF were never mojibake in the
/// first place and are returned unchanged.
#[allow(clippy::cast_possible_truncation)]
pub fn repair_mojibake(s: &str) -> String {
    if s.chars().any(|c| c as u32 > 0xFF) {
        return s.to_string();
    }
    let bytes: Vec<u8> = s.chars().map(|c| c as u8).collect();
    String::from_utf8(bytes).unwrap_or_else(|_| s.to_string())
}

/// Parses a millisecond timestamp to DateTime.
pub fn timestamp_from_ms(timestamp_ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(timestamp_ms).single()
}
