use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::MissingFieldPolicy;
use crate::error::ExtractError;
use crate::extract::{self, Field, FieldExtractor};
use crate::ingest;
use crate::validate::validate;

/// Result of one command: an exit code plus the lines it prints to stdout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub exit_code: i32,
    pub lines: Vec<String>,
}

impl Outcome {
    fn success(lines: Vec<String>) -> Self {
        Self { exit_code: 0, lines }
    }

    fn failure(err: &ExtractError) -> Self {
        Self {
            exit_code: err.exit_code(),
            lines: vec![err.to_string()],
        }
    }

    pub fn first_line(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// Print every line to stdout
    pub fn emit(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
    }
}

/// Print the "Author" value of the document at `path`
pub fn get_author(path: Option<&str>, policy: MissingFieldPolicy) -> Outcome {
    get_field(Field::Author, path, policy)
}

/// Print the "Full Title" value of the document at `path`
pub fn get_title(path: Option<&str>, policy: MissingFieldPolicy) -> Outcome {
    get_field(Field::FullTitle, path, policy)
}

/// Look up one field; any failure becomes the first output line
pub fn get_field(field: Field, path: Option<&str>, policy: MissingFieldPolicy) -> Outcome {
    match lookup(field, path, policy) {
        Ok(value) => Outcome::success(vec![value]),
        Err(err) => {
            tracing::debug!(error = %err, "field lookup failed");
            Outcome::failure(&err)
        }
    }
}

fn lookup(
    field: Field,
    path: Option<&str>,
    policy: MissingFieldPolicy,
) -> Result<String, ExtractError> {
    // Label is checked before the path
    let extractor = FieldExtractor::new(field)?;
    let path = validate(path)?;
    let document = ingest::load_document(&path)?;

    match extractor.extract(&document.text) {
        Some(value) => Ok(value.to_string()),
        None => match policy {
            MissingFieldPolicy::Empty => Ok(String::new()),
            MissingFieldPolicy::Error => Err(ExtractError::FieldNotFound {
                label: extractor.field().label().to_string(),
            }),
        },
    }
}

#[derive(Serialize)]
struct FieldEntry {
    label: String,
    value: String,
}

/// List every `- Label: value` line, as text or as a JSON array
pub fn list_fields(path: Option<&str>, json: bool) -> Result<Outcome> {
    let document = match validate(path).and_then(|p| ingest::load_document(&p)) {
        Ok(doc) => doc,
        Err(err) => return Ok(Outcome::failure(&err)),
    };

    let fields = extract::extract_all(&document.text);
    tracing::debug!(
        count = fields.len(),
        source = %document.source,
        kind = ?document.content_type,
        "listed metadata fields"
    );

    let lines = if json {
        let entries: Vec<FieldEntry> = fields
            .into_iter()
            .map(|(label, value)| FieldEntry { label, value })
            .collect();
        vec![serde_json::to_string_pretty(&entries).context("Failed to serialize fields")?]
    } else {
        fields
            .into_iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect()
    };

    Ok(Outcome::success(lines))
}
