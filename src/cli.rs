//! Command-line interface definition using clap.
//!
//! This module defines [`Args`], the CLI argument structure. Format
//! selection reuses [`OutputFormat`](crate::output::OutputFormat) from the
//! output module, so the CLI and the library accept the same names.

use clap::Parser;

use crate::output::OutputFormat;

/// Turn a Messenger JSON export into analysis-ready tables
/// (messages, participants, reactions).
#[derive(Parser, Debug, Clone)]
#[command(name = "chatframe")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatframe message_1.json
    chatframe message_1.json -o tables
    chatframe message_1.json --format jsonl
    chatframe message_1.json --fix-encoding")]
pub struct Args {
    /// Path to the exported message_1.json
    pub input: String,

    /// Directory for the generated tables
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub out_dir: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Fix Meta's broken text encoding (Mojibake) in derived columns
    #[arg(long)]
    pub fix_encoding: bool,
}
