use thiserror::Error;

/// Error type for import operations.
///
/// Almost nothing in the import pipeline is an `Err`: fatal conditions,
/// rejected rows, and soft issues are all returned as data inside
/// [`ImportResult`](crate::ImportResult). The only condition that surfaces
/// as an error is input that is not text at all.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Input bytes are not valid UTF-8 text.
    #[error("input is not valid UTF-8 text")]
    Utf8(#[from] simdutf8::basic::Utf8Error),
}

/// Result type alias for import operations.
pub type Result<T> = std::result::Result<T, ImportError>;
