//! # Transcript Export
//!
//! Renders the conversation as JSON or plain text and writes it to a dated
//! file in the working directory; the terminal equivalent of a client-side
//! download. The in-flight loading placeholder is never exported.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::chat::{Message, Sender};

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Text,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Text => "txt",
        }
    }
}

/// One exported message. Timestamps serialize as RFC 3339 via chrono.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ExportedMessage {
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

/// The JSON export payload.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatExport {
    pub messages: Vec<ExportedMessage>,
    pub exported_at: DateTime<Utc>,
    pub total_messages: usize,
}

fn exportable(messages: &[Message]) -> impl Iterator<Item = &Message> {
    messages.iter().filter(|m| !m.is_loading)
}

/// Render the conversation as a pretty-printed JSON document.
pub fn export_json(messages: &[Message]) -> String {
    let exported: Vec<ExportedMessage> = exportable(messages)
        .map(|m| ExportedMessage {
            content: m.content.clone(),
            sender: m.sender,
            timestamp: m.timestamp,
        })
        .collect();

    let payload = ChatExport {
        total_messages: exported.len(),
        exported_at: Utc::now(),
        messages: exported,
    };

    // ChatExport contains no map keys that can fail to serialize
    serde_json::to_string_pretty(&payload).unwrap_or_else(|e| {
        warn!("JSON export serialization failed: {e}");
        String::from("{}")
    })
}

/// Render the conversation as plain text: one block per message,
/// `[<local time>] SENDER: content`, blocks separated by a blank line.
pub fn export_text(messages: &[Message]) -> String {
    exportable(messages)
        .map(|m| {
            let local: DateTime<Local> = m.timestamp.into();
            format!(
                "[{}] {}: {}",
                local.format("%Y-%m-%d %H:%M:%S"),
                m.sender.label().to_uppercase(),
                m.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Default export file name: `chat-export-YYYY-MM-DD.<ext>`.
pub fn default_filename(format: ExportFormat) -> String {
    format!(
        "chat-export-{}.{}",
        Local::now().format("%Y-%m-%d"),
        format.extension()
    )
}

/// Write the transcript into `dir` and return the path written.
pub fn write_export(messages: &[Message], format: ExportFormat, dir: &Path) -> io::Result<PathBuf> {
    let body = match format {
        ExportFormat::Json => export_json(messages),
        ExportFormat::Text => export_text(messages),
    };
    let path = dir.join(default_filename(format));
    fs::write(&path, body)?;
    debug!("Exported {} messages to {}", messages.len(), path.display());
    Ok(path)
}
