//! Polyfill declaration errors

use super::LoaderError;

/// Creates an invalid polyfill error
pub fn invalid(message: impl Into<String>) -> LoaderError {
    LoaderError::InvalidPolyfill {
        message: message.into(),
    }
}

/// Creates a duplicate polyfill error
pub fn duplicate(name: impl Into<String>) -> LoaderError {
    LoaderError::DuplicatePolyfill { name: name.into() }
}

/// Creates a not found error for a polyfill file, suggesting the npm package
/// that ships it when one is known
pub fn file_not_found(path: impl Into<String>, package: Option<&str>) -> LoaderError {
    LoaderError::FileNotFound {
        path: path.into(),
        help: package.map(|pkg| format!("Install with \"npm i -D {pkg}\"")),
    }
}
