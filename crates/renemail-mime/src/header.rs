//! Header lookup in raw message text.

use crate::encoding::decode_header_lines;
use crate::error::Result;
use tracing::debug;

/// Splits text into lines on `\r\n`, `\r` or `\n`, in any mix.
pub fn lines(text: &str) -> impl Iterator<Item = &str> + '_ {
    let mut rest = Some(text);
    std::iter::from_fn(move || {
        let current = rest?;
        match current.find(['\r', '\n']) {
            Some(idx) => {
                let skip = if current[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&current[idx + skip..]);
                Some(&current[..idx])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}

/// Returns the value after `name:` if `line` opens that header.
///
/// One whitespace character after the colon is dropped.
fn header_start<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let head = line.get(..name.len())?;
    if !head.eq_ignore_ascii_case(name) {
        return None;
    }
    let value = line[name.len()..].strip_prefix(':')?;
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => Some(chars.as_str()),
        _ => Some(value),
    }
}

/// Collects the raw segments of the first `name` header: the remainder
/// of the header line followed by each continuation line, minus its
/// leading whitespace character.
///
/// Returns `None` if no line opens the header.
#[must_use]
pub fn raw_header<'a>(text: &'a str, name: &str) -> Option<Vec<&'a str>> {
    let mut lines = lines(text);
    let first = lines.by_ref().find_map(|line| header_start(line, name))?;

    let mut parts = vec![first];
    parts.extend(lines.map_while(|line| line.strip_prefix([' ', '\t'])));
    Some(parts)
}

/// Finds and decodes the first `name` header in `text`.
///
/// The name is matched case-insensitively. Each line of a folded value
/// is tokenized on its own, so an encoded word never spans a fold, but
/// whitespace between two encoded words is dropped across the fold as
/// well as within a line. `Ok(None)` means the header is absent, which
/// is distinct from a present but empty value.
///
/// # Errors
///
/// Returns an error if an encoded word in the value is malformed.
pub fn get_header(text: &str, name: &str) -> Result<Option<String>> {
    let Some(parts) = raw_header(text, name) else {
        debug!(header = name, "header not found");
        return Ok(None);
    };

    let value = decode_header_lines(parts)?;
    debug!(header = name, value = %value, "decoded header");

    Ok(Some(value))
}
