use crate::error::ExtractError;
use crate::validate::ValidatedPath;

/// Read a text/markdown file fully; the handle is closed on return.
///
/// Invalid UTF-8 is replaced with U+FFFD so clean lines stay reachable.
pub fn extract(path: &ValidatedPath) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path.as_path()).map_err(|source| ExtractError::Unreadable {
        path: path.to_string(),
        source,
    })?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            tracing::warn!(
                path = %path,
                offset = e.utf8_error().valid_up_to(),
                "file is not valid UTF-8, decoding lossily"
            );
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}
