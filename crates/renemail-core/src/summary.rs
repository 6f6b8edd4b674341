//! Subject and sender summaries used as filename fragments.

use std::sync::LazyLock;

use regex::Regex;
use renemail_mime::RawMessage;
use tracing::debug;

use crate::error::{Error, Result};
use crate::static_regex;

/// Maximum length of a subject fragment, in characters.
pub const MAX_SUBJECT_LEN: usize = 45;

/// Characters kept from the local part of the sender address.
const LOCAL_PART_LEN: usize = 6;

/// Maximum length of the sender domain fragment.
const DOMAIN_LEN: usize = 12;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| static_regex(r"\W+"));

// Reply and forward markers after punctuation has become underscores.
static REPLY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| static_regex(r"(?i)^_*(?:(?:re|fwd|fw|ext)(?:_+|$))+"));

/// Turns a decoded subject into a filename fragment.
///
/// Runs of non-word characters become one underscore, leading `Re:`,
/// `Fwd:`, `Fw:` and `Ext:` markers are removed, and the result is cut to
/// [`MAX_SUBJECT_LEN`] characters.
#[must_use]
pub fn sanitize_subject(subject: &str) -> String {
    let collapsed = NON_WORD.replace_all(subject, "_");
    let stripped = REPLY_PREFIX.replace(&collapsed, "");
    stripped.chars().take(MAX_SUBJECT_LEN).collect()
}

/// Turns a decoded From value into a `local-domain` fragment.
///
/// Everything except ASCII letters, digits, `@` and `.` is dropped before
/// splitting at the first `@`. The fragment is at most six characters of
/// the local part, a hyphen, and the last two labels of the domain cut to
/// twelve characters.
///
/// # Errors
///
/// Returns [`Error::MalformedAddress`] if no `@` survives filtering.
pub fn sanitize_sender(from: &str) -> Result<String> {
    let filtered: String = from
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '.'))
        .collect();
    let (local, domain) = filtered
        .split_once('@')
        .ok_or_else(|| Error::MalformedAddress(from.to_string()))?;

    let labels: Vec<&str> = domain.split('.').filter(|l| !l.is_empty()).collect();
    let tail = labels[labels.len().saturating_sub(2)..].join(".");

    let mut fragment: String = local.chars().take(LOCAL_PART_LEN).collect();
    fragment.push('-');
    fragment.extend(tail.chars().take(DOMAIN_LEN));
    Ok(fragment)
}

/// Subject fragment of a message.
///
/// # Errors
///
/// Returns [`Error::MissingSubject`] if there is no Subject header, or a
/// decode error for malformed encoded words.
pub fn summarize_subject(message: &RawMessage<'_>) -> Result<String> {
    let subject = message.subject()?.ok_or(Error::MissingSubject)?;
    let fragment = sanitize_subject(&subject);
    debug!(%subject, %fragment, "summarized subject");
    Ok(fragment)
}

/// Sender fragment of a message.
///
/// # Errors
///
/// Returns [`Error::MissingSender`] if there is no From header,
/// [`Error::MalformedAddress`] if it holds no address, or a decode error.
pub fn summarize_from(message: &RawMessage<'_>) -> Result<String> {
    let from = message.sender()?.ok_or(Error::MissingSender)?;
    let fragment = sanitize_sender(&from)?;
    debug!(%from, %fragment, "summarized sender");
    Ok(fragment)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::non_ascii_literal)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_collapses_punctuation() {
        assert_eq!(sanitize_subject("Hello there!"), "Hello_there_");
        assert_eq!(sanitize_subject("a -- b...c"), "a_b_c");
    }

    #[test]
    fn test_subject_keeps_unicode_words() {
        assert_eq!(sanitize_subject("Grüße aus Köln"), "Grüße_aus_Köln");
        assert_eq!(sanitize_subject("A–Zz"), "A_Zz");
    }

    #[test]
    fn test_subject_strips_reply_markers() {
        assert_eq!(sanitize_subject("Re: Hello World"), "Hello_World");
        assert_eq!(sanitize_subject("RE: FW: fwd: Plans"), "Plans");
        assert_eq!(sanitize_subject("Fwd Re Lunch"), "Lunch");
        assert_eq!(sanitize_subject("[Ext:] WORDS1234 Dude!?"), "WORDS1234_Dude_");
    }

    #[test]
    fn test_subject_markers_must_be_whole_words() {
        assert_eq!(sanitize_subject("Rent due"), "Rent_due");
        assert_eq!(sanitize_subject("Extra: news"), "Extra_news");
        assert_eq!(sanitize_subject("Lunch? Re: no"), "Lunch_Re_no");
    }

    #[test]
    fn test_subject_truncated() {
        let long = "word ".repeat(20);
        let fragment = sanitize_subject(&long);
        assert_eq!(fragment.chars().count(), MAX_SUBJECT_LEN);
        assert!(fragment.starts_with("word_word_"));

        let wide = "ä".repeat(60);
        assert_eq!(sanitize_subject(&wide).chars().count(), MAX_SUBJECT_LEN);
    }

    #[test]
    fn test_sender_display_name() {
        assert_eq!(
            sanitize_sender("John Jacob Jingleheimer Schmidt <jjjs@sub2.sub1.example.com>")
                .unwrap(),
            "JohnJa-example.com"
        );
    }

    #[test]
    fn test_sender_bare_address() {
        assert_eq!(sanitize_sender("jo@example.org").unwrap(), "jo-example.org");
        assert_eq!(sanitize_sender("<x_y+z@localhost>").unwrap(), "xyz-localhost");
    }

    #[test]
    fn test_sender_domain_capped() {
        assert_eq!(
            sanitize_sender("a@mail.averylongdomainname.info.").unwrap(),
            "a-averylongdom"
        );
    }

    #[test]
    fn test_sender_without_at() {
        assert!(matches!(
            sanitize_sender("undisclosed-recipients"),
            Err(Error::MalformedAddress(_))
        ));
    }

    #[test]
    fn test_summaries_from_message() {
        let message = RawMessage::new("From: Ann <ann.lee@corp.example.net>\nSubject: Fw: Q3\n");
        assert_eq!(summarize_subject(&message).unwrap(), "Q3");
        assert_eq!(summarize_from(&message).unwrap(), "Annann-example.net");
    }

    #[test]
    fn test_summaries_missing_headers() {
        let message = RawMessage::new("Date: Mon, 3 Jan 2022 10:15:00 +0000\n");
        assert!(matches!(summarize_subject(&message), Err(Error::MissingSubject)));
        assert!(matches!(summarize_from(&message), Err(Error::MissingSender)));
    }
}
