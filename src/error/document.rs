//! Index HTML errors

use super::LoaderError;

/// Creates an invalid document error
pub fn invalid(message: impl Into<String>) -> LoaderError {
    LoaderError::InvalidDocument {
        message: message.into(),
    }
}

/// Creates the error for a document without `<head>` or `<body>`
pub fn missing_head_or_body() -> LoaderError {
    invalid("missing <head> or <body>")
}
