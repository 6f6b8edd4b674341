//! RFC 2047 encoded-word decoding.
//!
//! A header value is split into plain-text and encoded-word segments by
//! [`segments`]; [`decode_header_value`] and [`decode_header_lines`] fold
//! those segments back into UTF-8 text. Only the `UTF-8` charset is
//! recognised. Encoded words in any other charset do not match the grammar
//! and pass through as plain text.

use crate::error::Result;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::trace;

/// Maximum number of payload characters in a single encoded word.
const MAX_PAYLOAD_LEN: usize = 75;

/// Decodes Base64 data.
///
/// # Errors
///
/// Returns an error if the input is not valid, padded Base64.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    STANDARD.decode(data).map_err(Into::into)
}

/// Decodes the header flavour of Quoted-Printable (RFC 2047 "Q").
///
/// Underscores become spaces. Each contiguous run of `=XX` escapes is
/// decoded as one byte sequence, so a character spread over several
/// escapes (`=E2=80=93`) comes back whole. An `=` that does not start a
/// valid escape is kept as is.
///
/// # Errors
///
/// Returns an error if an escape run does not form valid UTF-8.
pub fn decode_q(payload: &str) -> Result<String> {
    let text = payload.replace('_', " ");
    let mut result = String::with_capacity(text.len());
    let mut rest = text.as_str();

    while let Some(idx) = rest.find('=') {
        result.push_str(&rest[..idx]);
        let (bytes, remainder) = take_escape_run(&rest[idx..]);
        if bytes.is_empty() {
            result.push('=');
            rest = &rest[idx + 1..];
        } else {
            result.push_str(&String::from_utf8(bytes)?);
            rest = remainder;
        }
    }
    result.push_str(rest);

    Ok(result)
}

/// Consumes consecutive `=XX` escapes, returning their bytes and the rest.
fn take_escape_run(mut input: &str) -> (Vec<u8>, &str) {
    let mut bytes = Vec::new();
    while let Some(byte) = escaped_byte(input) {
        bytes.push(byte);
        input = &input[3..];
    }
    (bytes, input)
}

fn escaped_byte(input: &str) -> Option<u8> {
    let hex = input.strip_prefix('=')?.get(..2)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(hex, 16).ok()
}

/// Content encoding of an encoded word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordEncoding {
    /// `B`: Base64.
    Base64,
    /// `Q`: header Quoted-Printable.
    Quoted,
}

/// A single `=?UTF-8?encoding?payload?=` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedWord<'a> {
    /// Payload encoding.
    pub encoding: WordEncoding,
    /// Encoded payload text.
    pub payload: &'a str,
}

impl EncodedWord<'_> {
    /// Decodes the payload into text.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed Base64 or bytes that are not UTF-8.
    pub fn decode(&self) -> Result<String> {
        trace!(encoding = ?self.encoding, payload = self.payload, "decoding encoded word");
        match self.encoding {
            WordEncoding::Base64 => Ok(String::from_utf8(decode_base64(self.payload)?)?),
            WordEncoding::Quoted => decode_q(self.payload),
        }
    }
}

/// A run of header text, either literal or encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text outside any encoded word, kept verbatim.
    Plain(&'a str),
    /// An encoded word.
    Encoded(EncodedWord<'a>),
}

/// Lazy tokenizer over a raw header value.
///
/// Clone the iterator to fork the scan at its current position; call
/// [`segments`] again to start over.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    input: &'a str,
    pos: usize,
    pending: Option<(EncodedWord<'a>, usize)>,
}

/// Splits a raw header value into plain and encoded-word segments.
#[must_use]
pub const fn segments(input: &str) -> Segments<'_> {
    Segments {
        input,
        pos: 0,
        pending: None,
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((word, end)) = self.pending.take() {
            self.pos = end;
            return Some(Segment::Encoded(word));
        }

        let input = self.input;
        let rest = &input[self.pos..];
        if rest.is_empty() {
            return None;
        }

        let found = rest
            .match_indices("=?")
            .find_map(|(idx, _)| parse_word(&rest[idx..]).map(|(word, len)| (idx, word, len)));

        match found {
            Some((0, word, len)) => {
                self.pos += len;
                Some(Segment::Encoded(word))
            }
            Some((idx, word, len)) => {
                let start = self.pos;
                self.pending = Some((word, start + idx + len));
                self.pos += idx;
                Some(Segment::Plain(&input[start..start + idx]))
            }
            None => {
                self.pos = input.len();
                Some(Segment::Plain(rest))
            }
        }
    }
}

/// Characters allowed inside an encoded-word payload.
const fn is_payload_char(c: char) -> bool {
    !c.is_ascii_whitespace()
        && !c.is_ascii_control()
        && !matches!(
            c,
            '?' | '(' | ')' | '<' | '>' | ',' | ';' | '"' | '\\' | '[' | ']'
        )
}

/// Matches an encoded word at the start of `input`, returning it and its length.
fn parse_word(input: &str) -> Option<(EncodedWord<'_>, usize)> {
    let rest = input.strip_prefix("=?")?;
    let (charset, rest) = rest.split_once('?')?;
    if !charset.eq_ignore_ascii_case("utf-8") {
        return None;
    }

    let mut chars = rest.chars();
    let encoding = match chars.next()? {
        'B' | 'b' => WordEncoding::Base64,
        'Q' | 'q' => WordEncoding::Quoted,
        _ => return None,
    };
    let rest = chars.as_str().strip_prefix('?')?;

    let end = rest
        .find(|c: char| !is_payload_char(c))
        .unwrap_or(rest.len());
    let payload = &rest[..end];
    let count = payload.chars().count();
    if count == 0 || count > MAX_PAYLOAD_LEN || !rest[end..].starts_with("?=") {
        return None;
    }

    let len = input.len() - rest.len() + end + 2;
    Some((EncodedWord { encoding, payload }, len))
}

fn is_blank(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c == ' ' || c == '\t' || c == '\r' || c == '\n')
}

/// Decodes every encoded word in a raw header value.
///
/// Plain text is copied unchanged. Whitespace that separates two encoded
/// words is dropped; whitespace between an encoded word and plain text is
/// kept.
///
/// # Errors
///
/// Returns an error if an encoded word carries a malformed payload.
pub fn decode_header_value(raw: &str) -> Result<String> {
    decode_header_lines([raw])
}

/// Decodes the lines of a folded header value as one value.
///
/// Each line is tokenized on its own, so an encoded word never spans a
/// fold, and the decoded lines are joined with nothing in between.
/// Whitespace between two encoded words is dropped even when a fold
/// falls inside it.
///
/// # Errors
///
/// Returns an error if an encoded word carries a malformed payload.
pub fn decode_header_lines<'a, I>(lines: I) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut result = String::new();
    // Blank text seen since the last encoded word. It is written out only
    // once something other than another encoded word follows.
    let mut gap: Option<String> = None;

    for segment in lines.into_iter().flat_map(segments) {
        match segment {
            Segment::Plain(text) => match gap.as_mut() {
                Some(held) if is_blank(text) => held.push_str(text),
                _ => {
                    if let Some(held) = gap.take() {
                        result.push_str(&held);
                    }
                    result.push_str(text);
                }
            },
            Segment::Encoded(word) => {
                gap = Some(String::new());
                result.push_str(&word.decode()?);
            }
        }
    }
    if let Some(held) = gap {
        result.push_str(&held);
    }

    Ok(result)
}
