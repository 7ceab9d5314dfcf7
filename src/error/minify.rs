//! Minifier errors

use super::LoaderError;

/// Creates a minify failed error
pub fn failed(target: impl Into<String>, message: impl Into<String>) -> LoaderError {
    LoaderError::MinifyFailed {
        target: target.into(),
        message: message.into(),
    }
}
