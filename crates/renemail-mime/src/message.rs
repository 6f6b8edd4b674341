//! Read-only view over the text of a stored message.

use crate::error::Result;
use crate::header::get_header;

/// The full text of one message file, headers and body alike.
///
/// Nothing is parsed up front; every accessor scans the text on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMessage<'a> {
    text: &'a str,
}

impl<'a> RawMessage<'a> {
    /// Wraps message text.
    #[must_use]
    pub const fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Finds and decodes a header by case-insensitive name.
    ///
    /// # Errors
    ///
    /// Returns an error if an encoded word in the value is malformed.
    pub fn header(&self, name: &str) -> Result<Option<String>> {
        get_header(self.text, name)
    }

    /// Decoded `Subject` header.
    ///
    /// # Errors
    ///
    /// Returns an error if an encoded word in the value is malformed.
    pub fn subject(&self) -> Result<Option<String>> {
        self.header("Subject")
    }

    /// Decoded `From` header.
    ///
    /// # Errors
    ///
    /// Returns an error if an encoded word in the value is malformed.
    pub fn sender(&self) -> Result<Option<String>> {
        self.header("From")
    }

    /// Decoded `Date` header.
    ///
    /// # Errors
    ///
    /// Returns an error if an encoded word in the value is malformed.
    pub fn date(&self) -> Result<Option<String>> {
        self.header("Date")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const MESSAGE: &str = concat!(
        "Date: Mon, 3 Jan 2022 10:15:00 +0000\r\n",
        "From: John <john@example.com>\r\n",
        "Subject: =?utf-8?Q?Re:_Hello?= World\r\n",
        "\r\n",
        "Body text\r\n",
    );

    #[test]
    fn test_accessors() {
        let message = RawMessage::new(MESSAGE);
        assert_eq!(message.subject().unwrap().as_deref(), Some("Re: Hello World"));
        assert_eq!(
            message.sender().unwrap().as_deref(),
            Some("John <john@example.com>")
        );
        assert_eq!(
            message.date().unwrap().as_deref(),
            Some("Mon, 3 Jan 2022 10:15:00 +0000")
        );
    }

    #[test]
    fn test_missing_header() {
        let message = RawMessage::new("Subject: only\n");
        assert_eq!(message.sender().unwrap(), None);
        assert_eq!(message.date().unwrap(), None);
        assert_eq!(message.subject().unwrap().as_deref(), Some("only"));
    }
}
