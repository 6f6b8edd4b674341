//! Error types for header decoding.

use std::string::FromUtf8Error;

/// Result type alias for header decoding.
pub type Result<T> = std::result::Result<T, Error>;

/// Header decoding error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Base64 payload of an encoded word is malformed.
    #[error("Base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    /// Decoded bytes are not valid UTF-8.
    #[error("UTF-8 decode error: {0}")]
    Utf8Decode(#[from] FromUtf8Error),
}
