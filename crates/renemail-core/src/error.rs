//! Error types for filename synthesis.

use thiserror::Error;

/// Errors that can occur while computing a filename.
#[derive(Debug, Error)]
pub enum Error {
    /// An encoded word in a header could not be decoded.
    #[error("Header decoding error: {0}")]
    Decode(#[from] renemail_mime::Error),

    /// A required header is absent.
    #[error("Header not found: {0}")]
    HeaderNotFound(String),

    /// The Date header does not follow `[Day, ]d Mon yyyy HH:mm:ss +HHMM`.
    #[error("Unparseable date {value:?}: {source}")]
    DateUnparseable {
        /// Header value as found.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: chrono::ParseError,
    },

    /// The message has no Subject header.
    #[error("Message has no Subject header")]
    MissingSubject,

    /// The message has no From header.
    #[error("Message has no From header")]
    MissingSender,

    /// The From header holds no `@`.
    #[error("Malformed sender address: {0:?}")]
    MalformedAddress(String),

    /// Format variant other than 1 or 2.
    #[error("Unsupported format variant: {0} (expected 1 or 2)")]
    UnsupportedFormatVariant(String),
}

impl Error {
    /// Short, stable name of the failure kind, used in reports.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode",
            Self::HeaderNotFound(_) => "header-not-found",
            Self::DateUnparseable { .. } => "date-unparseable",
            Self::MissingSubject => "missing-subject",
            Self::MissingSender => "missing-sender",
            Self::MalformedAddress(_) => "malformed-address",
            Self::UnsupportedFormatVariant(_) => "unsupported-format",
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
