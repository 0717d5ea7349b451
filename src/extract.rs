//! Label-based value extraction from Markdown metadata blocks
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::error::ExtractError;

/// Well-known metadata fields, plus any free-form label
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Author,
    FullTitle,
    Custom(String),
}

impl Field {
    pub fn label(&self) -> &str {
        match self {
            Field::Author => "Author",
            Field::FullTitle => "Full Title",
            Field::Custom(label) => label,
        }
    }

    /// Map a label onto a known field where one exists.
    ///
    /// Surrounding whitespace is not part of a label.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Author" => Field::Author,
            "Full Title" => Field::FullTitle,
            other => Field::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

static AUTHOR_RE: Lazy<Regex> = Lazy::new(|| build_pattern("Author").unwrap());
static FULL_TITLE_RE: Lazy<Regex> = Lazy::new(|| build_pattern("Full Title").unwrap());

/// `- Label: value` lines, label up to the first colon
static METADATA_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*[-*+][ \t]+([^:\r\n]+?):[^\S\r\n]+([^\r\n]*)").unwrap()
});

/// Label, colon, at least one horizontal whitespace, then the rest of the line
fn build_pattern(label: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"{}:[^\S\r\n]+([^\r\n]*)", regex::escape(label)))
}

/// Extracts the value of one field from document text.
///
/// Holds nothing but the compiled pattern, so one extractor can be reused
/// across any number of documents.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    field: Field,
    pattern: Regex,
}

impl FieldExtractor {
    pub fn new(field: Field) -> Result<Self, ExtractError> {
        let pattern = match &field {
            Field::Author => (*AUTHOR_RE).clone(),
            Field::FullTitle => (*FULL_TITLE_RE).clone(),
            Field::Custom(label) => {
                if label.trim().is_empty() || label.contains(['\n', '\r']) {
                    return Err(ExtractError::InvalidLabel {
                        label: label.clone(),
                    });
                }
                build_pattern(label).map_err(|_| ExtractError::InvalidLabel {
                    label: label.clone(),
                })?
            }
        };

        Ok(Self { field, pattern })
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// First value for this field, or `None` when no line carries the label.
    ///
    /// An empty value (`Author: ` at end of line) is `Some("")`.
    pub fn extract<'a>(&self, document: &'a str) -> Option<&'a str> {
        let value = self
            .pattern
            .captures(document)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str());

        match value {
            Some(v) => tracing::debug!(field = %self.field, value = v, "field matched"),
            None => tracing::debug!(field = %self.field, "no line carries field"),
        }

        value
    }
}

/// Every `- Label: value` line in document order
pub fn extract_all(document: &str) -> Vec<(String, String)> {
    METADATA_LINE_RE
        .captures_iter(document)
        .map(|caps| (caps[1].trim().to_string(), caps[2].to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOK_NOTE: &str = "# Above the Clouds\n\n\
        ## Metadata\n\
        - Author: Kilian Jornet\n\
        - Full Title: Above the Clouds: How I Carved My Own Path to the Top of the World\n\
        - Category: #books\n";

    #[test]
    fn test_extract_author() {
        let extractor = FieldExtractor::new(Field::Author).unwrap();
        assert_eq!(extractor.extract(BOOK_NOTE), Some("Kilian Jornet"));
    }

    #[test]
    fn test_extract_full_title_keeps_inner_colon() {
        let extractor = FieldExtractor::new(Field::FullTitle).unwrap();
        assert_eq!(
            extractor.extract(BOOK_NOTE),
            Some("Above the Clouds: How I Carved My Own Path to the Top of the World")
        );
    }

    #[test]
    fn test_absent_field_is_none() {
        let extractor = FieldExtractor::new(Field::FullTitle).unwrap();
        assert_eq!(extractor.extract("- Author: Kilian Jornet\n"), None);
    }

    #[test]
    fn test_empty_value_is_distinct_from_absent() {
        let extractor = FieldExtractor::new(Field::Author).unwrap();
        assert_eq!(extractor.extract("- Author: \n- Full Title: X\n"), Some(""));
    }

    #[test]
    fn test_first_match_wins() {
        let doc = "- Author: Jane Doe, John Roe\n- Author: Someone Else\n";
        let extractor = FieldExtractor::new(Field::Author).unwrap();
        assert_eq!(extractor.extract(doc), Some("Jane Doe, John Roe"));
    }

    #[test]
    fn test_label_is_case_sensitive() {
        let extractor = FieldExtractor::new(Field::Author).unwrap();
        assert_eq!(extractor.extract("- author: lowercase\n"), None);
    }

    #[test]
    fn test_requires_whitespace_after_colon() {
        let extractor = FieldExtractor::new(Field::Author).unwrap();
        assert_eq!(extractor.extract("- Author:Glued\n"), None);
    }

    #[test]
    fn test_value_does_not_span_lines() {
        let extractor = FieldExtractor::new(Field::Author).unwrap();
        assert_eq!(extractor.extract("Author:\nKilian Jornet\n"), None);
    }

    #[test]
    fn test_trailing_whitespace_preserved_and_crlf_excluded() {
        let extractor = FieldExtractor::new(Field::Author).unwrap();
        assert_eq!(
            extractor.extract("- Author:   Kilian Jornet  \r\n"),
            Some("Kilian Jornet  ")
        );
    }

    #[test]
    fn test_custom_label_is_matched_literally() {
        let extractor = FieldExtractor::new(Field::Custom("A.thor".to_string())).unwrap();
        assert_eq!(extractor.extract("- Author: Kilian Jornet\n"), None);
        assert_eq!(extractor.extract("- A.thor: Dotted\n"), Some("Dotted"));
    }

    #[test]
    fn test_invalid_custom_labels_rejected() {
        for label in ["", "   ", "Two\nLines"] {
            let result = FieldExtractor::new(Field::Custom(label.to_string()));
            assert!(matches!(result, Err(ExtractError::InvalidLabel { .. })));
        }
    }

    #[test]
    fn test_from_label_maps_known_fields() {
        assert_eq!(Field::from_label("Author"), Field::Author);
        assert_eq!(Field::from_label("Full Title"), Field::FullTitle);
        assert_eq!(
            Field::from_label("Category"),
            Field::Custom("Category".to_string())
        );
    }

    #[test]
    fn test_from_label_ignores_surrounding_whitespace() {
        assert_eq!(Field::from_label("Author "), Field::Author);
        assert_eq!(Field::from_label("  Full Title\t"), Field::FullTitle);
        assert_eq!(
            Field::from_label(" Category "),
            Field::Custom("Category".to_string())
        );
    }

    #[test]
    fn test_extract_all_lists_metadata_lines() {
        let fields = extract_all(BOOK_NOTE);
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], ("Author".to_string(), "Kilian Jornet".to_string()));
        assert_eq!(fields[1].0, "Full Title");
        assert!(fields[1].1.contains("Above the Clouds: How"));
        assert_eq!(fields[2], ("Category".to_string(), "#books".to_string()));
    }
}
