//! File system errors

use super::LoaderError;

/// Creates a file not found error
pub fn not_found(path: impl Into<String>) -> LoaderError {
    LoaderError::FileNotFound {
        path: path.into(),
        help: None,
    }
}

/// Creates a file read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> LoaderError {
    LoaderError::FileReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> LoaderError {
    LoaderError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> LoaderError {
    LoaderError::IoError {
        message: message.into(),
    }
}
