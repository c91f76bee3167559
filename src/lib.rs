//! # Chatframe
//!
//! A Rust library for turning Messenger JSON chat exports into tidy,
//! analysis-ready tables.
//!
//! ## Overview
//!
//! Meta's "Download Your Information" export stores a conversation as one
//! `message_1.json` document: a participant list plus a message array where
//! each message mixes text, attachments, and reactions in a single object.
//! Chatframe reshapes that document into three flat tables:
//!
//! - **messages** — one row per populated content field (text body, photos,
//!   videos, audio files, files, gifs, sticker, share), tagged with its
//!   `content_type` and joined to sender and time
//! - **participants** — the participant list, passed through verbatim
//! - **reactions** — one row per reaction entry
//!
//! Rows carry an `id`, the position of the originating message in the
//! export, so the tables join back together.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatframe::prelude::*;
//!
//! let json = r#"{
//!     "participants": [{"name": "Alice"}, {"name": "Bob"}],
//!     "messages": [
//!         {"sender_name": "Alice", "timestamp_ms": 1705315800000,
//!          "content": "look at this",
//!          "photos": [{"uri": "photos/1.jpg", "creation_timestamp": 1705315799}],
//!          "type": "Generic",
//!          "reactions": [{"reaction": "❤", "actor": "Bob"}]}
//!     ]
//! }"#;
//!
//! let dataset = transform_str(json)?;
//!
//! // Text body and photo list become separate rows sharing one id
//! assert_eq!(dataset.messages.len(), 2);
//! assert_eq!(dataset.messages[0].content_type, ContentKind::Messages);
//! assert_eq!(dataset.messages[1].content_type, ContentKind::Photos);
//! assert_eq!(dataset.reactions[0].actor, "Bob");
//! # Ok::<(), chatframe::ChatframeError>(())
//! ```
//!
//! ## Writing tables
//!
//! ```rust,no_run
//! use chatframe::output::{OutputFormat, write_dataset};
//!
//! let dataset = chatframe::transform_file("message_1.json".as_ref())?;
//! write_dataset(&dataset, "tables".as_ref(), OutputFormat::Csv)?;
//! # Ok::<(), chatframe::ChatframeError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`transform`] — The export-to-tables transform
//!   - [`ExportTransformer`](transform::ExportTransformer) — configurable transformer
//!   - [`transform_file`](transform::transform_file), [`transform_str`](transform::transform_str)
//! - [`tables`] — Derived table types ([`Dataset`], [`ContentRow`](tables::ContentRow), [`ReactionRow`](tables::ReactionRow))
//! - [`export`] — Raw export structures ([`RawExport`](export::RawExport), [`Participant`](export::Participant))
//! - [`config`] — [`TransformConfig`](config::TransformConfig)
//! - [`output`] — Table writers ([`write_dataset`](output::write_dataset), [`OutputFormat`](output::OutputFormat))
//! - [`error`] — Unified error types ([`ChatframeError`], [`Result`])
//! - [`prelude`] — Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod output;
pub mod tables;
pub mod transform;

// Re-export the main types at the crate root for convenience
pub use error::{ChatframeError, Result};
pub use tables::Dataset;
pub use transform::{ExportTransformer, transform_file, transform_str};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatframe::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{ChatframeError, Result};

    // Transform entry points
    pub use crate::transform::{ExportTransformer, transform_file, transform_str};

    // Configuration
    pub use crate::config::TransformConfig;

    // Table types
    pub use crate::tables::{ContentKind, ContentRow, ContentValue, Dataset, ReactionRow};

    // Raw export types that surface in tables
    pub use crate::export::{MediaAttachment, Participant, SharedLink, StickerAttachment};

    // Output
    pub use crate::output::{OutputFormat, write_dataset};
}
