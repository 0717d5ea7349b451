pub mod text;

use std::path::Path;

use crate::error::ExtractError;
use crate::validate::ValidatedPath;

/// Supported content types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Text,
    Markdown,
    Unknown,
}

impl ContentType {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .as_deref()
        {
            Some("txt") => ContentType::Text,
            Some("md" | "markdown") => ContentType::Markdown,
            _ => ContentType::Unknown,
        }
    }
}

/// Full text of a validated file, loaded once
#[derive(Debug, Clone)]
pub struct Document {
    pub source: String,
    pub content_type: ContentType,
    pub text: String,
}

/// Read a validated path into memory
pub fn load_document(path: &ValidatedPath) -> Result<Document, ExtractError> {
    let content_type = ContentType::from_path(path.as_path());

    if content_type == ContentType::Unknown {
        // Try to read as text anyway
        tracing::debug!(path = %path, "unrecognized extension, reading as plain text");
    }

    let text = text::extract(path)?;
    tracing::debug!(path = %path, bytes = text.len(), "loaded document");

    Ok(Document {
        source: path.to_string(),
        content_type,
        text,
    })
}
