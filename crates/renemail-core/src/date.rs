//! Date header parsing.

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset};
use renemail_mime::RawMessage;
use tracing::debug;

use crate::config::FormatVariant;
use crate::error::{Error, Result};

/// Layout of the Date header once weekday and zone comment are removed.
const DATE_PATTERN: &str = "%d %b %Y %H:%M:%S %z";

/// A parsed Date header.
///
/// Keeps the offset written in the header; formatting uses the header's
/// own wall-clock fields rather than converting to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    /// Parses `[Weekday, ]d Mon yyyy HH:mm:ss +HHMM[ (Zone)]`.
    ///
    /// Obsolete two-digit years map to 2000-2049 (`00`-`49`) or 1950-1999
    /// (`50`-`99`); three-digit years are counted from 1900.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DateUnparseable`] if the value does not match.
    pub fn parse(value: &str) -> Result<Self> {
        let text = widen_year(strip_zone_comment(strip_weekday(value.trim())));
        DateTime::parse_from_str(&text, DATE_PATTERN)
            .map(Self)
            .map_err(|source| Error::DateUnparseable {
                value: value.to_string(),
                source,
            })
    }

    /// Formats the timestamp for the given filename template.
    #[must_use]
    pub fn format(&self, variant: FormatVariant) -> String {
        self.0.format(variant.date_format()).to_string()
    }
}

fn strip_weekday(text: &str) -> &str {
    match text.split_once(',') {
        Some((day, rest)) if !day.is_empty() && day.chars().all(|c| c.is_ascii_alphabetic()) => {
            rest.trim_start()
        }
        _ => text,
    }
}

fn strip_zone_comment(text: &str) -> &str {
    match text.rfind('(') {
        Some(idx) if text.ends_with(')') => text[..idx].trim_end(),
        _ => text,
    }
}

/// Rewrites a two- or three-digit year field as four digits.
fn widen_year(text: &str) -> Cow<'_, str> {
    let year = text
        .split_whitespace()
        .nth(2)
        .filter(|y| matches!(y.len(), 2 | 3) && y.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|y| Some((y.len(), y.parse::<u16>().ok()?)));
    let full = match year {
        Some((2, y)) if y < 50 => 2000 + y,
        Some((_, y)) => 1900 + y,
        None => return Cow::Borrowed(text),
    }
    .to_string();

    let fields: Vec<&str> = text
        .split_whitespace()
        .enumerate()
        .map(|(idx, field)| if idx == 2 { full.as_str() } else { field })
        .collect();
    Cow::Owned(fields.join(" "))
}

/// Finds the Date header of a message and formats it for `variant`.
///
/// # Errors
///
/// Returns [`Error::HeaderNotFound`] if there is no Date header and
/// [`Error::DateUnparseable`] if its value cannot be parsed.
pub fn compute_date(message: &RawMessage<'_>, variant: FormatVariant) -> Result<String> {
    let value = message
        .date()?
        .ok_or_else(|| Error::HeaderNotFound("Date".to_string()))?;
    let formatted = Timestamp::parse(&value)?.format(variant);
    debug!(date = %value, %formatted, "parsed date");
    Ok(formatted)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_with_weekday() {
        let ts = Timestamp::parse("Mon, 3 Jan 2022 10:15:00 +0000").unwrap();
        assert_eq!(ts.0.year(), 2022);
        assert_eq!(ts.0.day(), 3);
        assert_eq!(ts.0.minute(), 15);
        assert_eq!(ts.format(FormatVariant::DateSubject), "2022-01-03-10-15");
        assert_eq!(ts.format(FormatVariant::DateSenderSubject), "220103-1015");
    }

    #[test]
    fn test_parse_without_weekday() {
        let ts = Timestamp::parse("14 Feb 2023 08:05:09 +0100").unwrap();
        assert_eq!(ts.format(FormatVariant::DateSubject), "2023-02-14-08-05");
    }

    #[test]
    fn test_parse_ignores_zone_comment() {
        let ts = Timestamp::parse("Tue, 4 Jan 2022 23:59:59 -0500 (EST)").unwrap();
        assert_eq!(ts.format(FormatVariant::DateSubject), "2022-01-04-23-59");
        assert_eq!(ts.0.offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn test_parse_obsolete_years() {
        let ts = Timestamp::parse("Mon, 03 Jan 22 10:15:00 +0000").unwrap();
        assert_eq!(ts.format(FormatVariant::DateSubject), "2022-01-03-10-15");

        let ts = Timestamp::parse("1 Feb 99 00:00:00 +0000").unwrap();
        assert_eq!(ts.0.year(), 1999);
        let ts = Timestamp::parse("1 Feb 49 00:00:00 +0000").unwrap();
        assert_eq!(ts.0.year(), 2049);
        let ts = Timestamp::parse("1 Feb 103 00:00:00 +0000").unwrap();
        assert_eq!(ts.0.year(), 2003);
        let ts = Timestamp::parse("1 Feb 0022 00:00:00 +0000").unwrap();
        assert_eq!(ts.0.year(), 22);
    }

    #[test]
    fn test_offset_does_not_shift_wall_clock() {
        let ts = Timestamp::parse("Sat, 31 Dec 2022 23:30:00 -1000").unwrap();
        assert_eq!(ts.format(FormatVariant::DateSenderSubject), "221231-2330");
    }

    #[test]
    fn test_unparseable() {
        for value in [
            "",
            "yesterday",
            "Mon, 3 Jan 2022",
            "3 Foo 2022 10:15:00 +0000",
            "3 Jan 2022 10:15:00",
        ] {
            assert!(
                matches!(Timestamp::parse(value), Err(Error::DateUnparseable { .. })),
                "{value}"
            );
        }
    }

    #[test]
    fn test_compute_date() {
        let message = RawMessage::new("Subject: x\nDate: Mon, 3 Jan 2022 10:15:00 +0000\n");
        assert_eq!(
            compute_date(&message, FormatVariant::DateSubject).unwrap(),
            "2022-01-03-10-15"
        );
    }

    #[test]
    fn test_compute_date_missing() {
        let message = RawMessage::new("Subject: x\n");
        assert!(matches!(
            compute_date(&message, FormatVariant::DateSubject),
            Err(Error::HeaderNotFound(name)) if name == "Date"
        ));
    }
}
