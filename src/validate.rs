use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ExtractError;

/// A path that was supplied and refers to a readable file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPath(PathBuf);

impl ValidatedPath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ValidatedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Check that a path argument was given and that the file can be opened.
///
/// The returned path is the input, unchanged.
pub fn validate(path: Option<&str>) -> Result<ValidatedPath, ExtractError> {
    let raw = match path {
        Some(p) if !p.is_empty() => p,
        _ => return Err(ExtractError::MissingArgument),
    };

    let path = PathBuf::from(raw);
    if !path.is_file() {
        debug!(path = %raw, "path does not name a regular file");
        return Err(ExtractError::FileNotFound {
            path: raw.to_string(),
        });
    }

    // Probe only; the handle is dropped here
    File::open(&path).map_err(|source| ExtractError::Unreadable {
        path: raw.to_string(),
        source,
    })?;

    debug!(path = %raw, "validated input path");
    Ok(ValidatedPath(path))
}
