//! # renemail-mime
//!
//! Header lookup and RFC 2047 decoding for stored email messages.
//!
//! ## Features
//!
//! - **Header scanning**: first match by case-insensitive name, folded
//!   continuation lines, any mix of `\r\n`, `\r` and `\n` line endings
//! - **Encoded words**: `=?UTF-8?B?...?=` and `=?UTF-8?Q?...?=`, with
//!   whitespace between adjacent encoded words dropped
//! - **Q decoding**: multi-byte characters split across `=XX` escapes are
//!   reassembled
//!
//! Only the UTF-8 charset is decoded; encoded words in other charsets are
//! left as literal text.
//!
//! ## Quick Start
//!
//! ```
//! use renemail_mime::RawMessage;
//!
//! let text = "Subject: =?utf-8?Q?caf=C3=A9?= au lait\r\n\r\nbody";
//! let message = RawMessage::new(text);
//! assert_eq!(message.subject()?.as_deref(), Some("café au lait"));
//! assert_eq!(message.header("Date")?, None);
//! # Ok::<(), renemail_mime::Error>(())
//! ```
//!
//! ### Decoding a single value
//!
//! ```
//! use renemail_mime::encoding::{decode_header_value, decode_q};
//!
//! assert_eq!(decode_q("=E2=80=93_dash")?, "\u{2013} dash");
//! assert_eq!(
//!     decode_header_value("=?utf-8?Q?aeiou?= plus =?utf-8?B?w6XDpMO2?=")?,
//!     "aeiou plus \u{e5}\u{e4}\u{f6}"
//! );
//! # Ok::<(), renemail_mime::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
mod message;

pub mod encoding;
pub mod header;

pub use encoding::{
    EncodedWord, Segment, Segments, WordEncoding, decode_header_lines, decode_header_value,
    segments,
};
pub use error::{Error, Result};
pub use header::get_header;
pub use message::RawMessage;
