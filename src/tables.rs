//! Derived table types.
//!
//! A transformed export is a [`Dataset`] of three tables: content rows,
//! participants, and reactions. Rows from different tables join on `id`,
//! the position of the originating message in the export's message array.
//!
//! # Example
//!
//! ```rust
//! use chatframe::tables::{ContentKind, ContentValue};
//!
//! assert_eq!(ContentKind::AudioFiles.as_str(), "audio_files");
//!
//! let value = ContentValue::Text("hello".to_string());
//! assert_eq!(value.as_text(), Some("hello"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::export::{MediaAttachment, Participant, SharedLink, StickerAttachment};

/// Category tag for a content row.
///
/// [`Messages`](ContentKind::Messages) marks text bodies; the remaining
/// kinds mirror the attachment fields of a Messenger message.
///
/// # Example
///
/// ```rust
/// use chatframe::tables::ContentKind;
/// use std::str::FromStr;
///
/// let kind = ContentKind::from_str("photos").unwrap();
/// assert_eq!(kind, ContentKind::Photos);
/// assert_eq!(kind.to_string(), "photos");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Text body of a message
    Messages,
    /// Voice messages and audio clips
    AudioFiles,
    /// Generic file attachments
    Files,
    /// Animated gifs
    Gifs,
    /// Photos
    Photos,
    /// Shared links
    Share,
    /// Stickers
    Sticker,
    /// Videos
    Videos,
}

impl ContentKind {
    /// Returns the tag as it appears in the `content_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Messages => "messages",
            ContentKind::AudioFiles => "audio_files",
            ContentKind::Files => "files",
            ContentKind::Gifs => "gifs",
            ContentKind::Photos => "photos",
            ContentKind::Share => "share",
            ContentKind::Sticker => "sticker",
            ContentKind::Videos => "videos",
        }
    }

    /// Returns the attachment kinds in extraction order.
    ///
    /// Text bodies ([`ContentKind::Messages`]) are extracted separately and
    /// are not part of this list.
    pub fn attachment_kinds() -> &'static [ContentKind] {
        &[
            ContentKind::AudioFiles,
            ContentKind::Files,
            ContentKind::Gifs,
            ContentKind::Photos,
            ContentKind::Share,
            ContentKind::Sticker,
            ContentKind::Videos,
        ]
    }

    /// Returns all content kinds.
    pub fn all() -> &'static [ContentKind] {
        &[
            ContentKind::Messages,
            ContentKind::AudioFiles,
            ContentKind::Files,
            ContentKind::Gifs,
            ContentKind::Photos,
            ContentKind::Share,
            ContentKind::Sticker,
            ContentKind::Videos,
        ]
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "messages" => Ok(ContentKind::Messages),
            "audio_files" => Ok(ContentKind::AudioFiles),
            "files" => Ok(ContentKind::Files),
            "gifs" => Ok(ContentKind::Gifs),
            "photos" => Ok(ContentKind::Photos),
            "share" => Ok(ContentKind::Share),
            "sticker" => Ok(ContentKind::Sticker),
            "videos" => Ok(ContentKind::Videos),
            _ => Err(format!(
                "Unknown content kind: '{}'. Expected one of: {}",
                s,
                ContentKind::all()
                    .iter()
                    .map(ContentKind::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

/// The value carried by one content row.
///
/// The value is the message field verbatim, so a media row keeps its full
/// attachment list and a share row keeps the link structure. Serializing
/// a row reproduces the field exactly as it appeared in the export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentValue {
    /// Text body of a message
    Text(String),
    /// Attachment list (audio files, files, gifs, photos, videos)
    Media(Vec<MediaAttachment>),
    /// Sticker attachment
    Sticker(StickerAttachment),
    /// Shared link
    Share(SharedLink),
}

impl ContentValue {
    /// Returns the text body if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns `true` if this is a text value.
    pub fn is_text(&self) -> bool {
        matches!(self, ContentValue::Text(_))
    }
}

/// One row of the content table.
///
/// A message with a text body and two attachment fields produces three
/// rows sharing the same `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentRow {
    /// Join key: position of the originating message in the export
    pub id: u64,
    /// The message field, verbatim
    pub content: ContentValue,
    /// Which field this row came from
    pub content_type: ContentKind,
    /// Sender of the originating message
    pub sender_name: String,
    /// Timestamp of the originating message
    pub time: DateTime<Utc>,
}

/// One row of the reactions table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReactionRow {
    /// Join key: position of the owning message in the export
    pub id: u64,
    /// The reaction emoji, verbatim
    pub reaction: String,
    /// Who reacted
    pub actor: String,
    /// Any further reaction fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The three tables derived from one export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    /// Content rows, sorted by `id`
    pub messages: Vec<ContentRow>,
    /// Participants, in export order
    pub participants: Vec<Participant>,
    /// Reactions, grouped by owning message in export order
    pub reactions: Vec<ReactionRow>,
}

impl Dataset {
    /// Returns `true` if all three tables are empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.participants.is_empty() && self.reactions.is_empty()
    }
}
