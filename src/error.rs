use thiserror::Error;

/// Failures surfaced by a single extraction call
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Missing argument file")]
    MissingArgument,

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Cannot read file {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Field not found: {label}")]
    FieldNotFound { label: String },

    #[error("Invalid field label: {label}")]
    InvalidLabel { label: String },
}

impl ExtractError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            ExtractError::MissingArgument => 1,
            ExtractError::FileNotFound { .. } | ExtractError::Unreadable { .. } => 2,
            ExtractError::FieldNotFound { .. } => 3,
            ExtractError::InvalidLabel { .. } => 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_argument_message() {
        let err = ExtractError::MissingArgument;
        assert_eq!(err.to_string(), "Missing argument file");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let not_found = ExtractError::FileNotFound {
            path: "notes.md".to_string(),
        };
        let missing_field = ExtractError::FieldNotFound {
            label: "Author".to_string(),
        };
        assert_eq!(not_found.to_string(), "File not found: notes.md");
        assert_ne!(not_found.exit_code(), ExtractError::MissingArgument.exit_code());
        assert_ne!(missing_field.exit_code(), not_found.exit_code());
    }
}
