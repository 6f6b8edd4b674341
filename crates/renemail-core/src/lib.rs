//! # renemail-core
//!
//! Filename synthesis for stored email messages.
//!
//! This crate provides:
//! - Date header parsing and the two date-prefix formats
//! - Subject summaries (punctuation collapsed, reply markers removed)
//! - Sender summaries (`local-domain`)
//! - Filename composition and detection of already-renamed files
//!
//! ```
//! use renemail_core::{Config, FormatVariant, RawMessage, compute_name};
//!
//! let text = "Date: Mon, 3 Jan 2022 10:15:00 +0000\nSubject: Re: Hello World\n";
//! let name = compute_name(&RawMessage::new(text), "0001.eml", &Config::default())?;
//! assert_eq!(name, "2022-01-03-10-15 Hello_World.eml");
//! # Ok::<(), renemail_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod compose;
pub mod config;
pub mod date;
mod error;
pub mod summary;

pub use compose::{compute_name, extension_of, is_already_renamed};
pub use config::{Config, FormatVariant};
pub use date::{Timestamp, compute_date};
pub use error::{Error, Result};
pub use renemail_mime::RawMessage;
pub use summary::{
    MAX_SUBJECT_LEN, sanitize_sender, sanitize_subject, summarize_from, summarize_subject,
};

/// Compiles a pattern known to be valid at build time.
#[allow(clippy::expect_used)]
pub(crate) fn static_regex(pattern: &str) -> regex::Regex {
    regex::Regex::new(pattern).expect("static pattern is valid")
}
