//! Final filename composition.

use std::sync::LazyLock;

use regex::Regex;
use renemail_mime::RawMessage;
use tracing::debug;

use crate::config::Config;
use crate::date::compute_date;
use crate::error::Result;
use crate::static_regex;
use crate::summary::{summarize_from, summarize_subject};

// Date prefixes written by both format variants, followed by a space, the
// extension, or nothing.
static RENAMED: LazyLock<Regex> = LazyLock::new(|| {
    static_regex(r"^(?:[0-9]{4}-[0-9]{2}-[0-9]{2}-[0-9]{2}-[0-9]{2}|[0-9]{6}-[0-9]{4})(?:[ .]|$)")
});

/// Extension of `filename` including the leading dot, or `""`.
///
/// Case is preserved. A name whose only dot is the first character (a
/// dotfile) has no extension.
#[must_use]
pub fn extension_of(filename: &str) -> &str {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[idx..],
        _ => "",
    }
}

/// Whether a filename already starts with a date prefix this crate writes.
#[must_use]
pub fn is_already_renamed(filename: &str) -> bool {
    RENAMED.is_match(filename)
}

/// Computes the new filename for a message.
///
/// The date prefix always comes first; variant 2 inserts the sender
/// fragment before the subject fragment. A subject that sanitizes to
/// nothing (`Re:`) adds no fragment and no separator. The original
/// extension is kept as written.
///
/// # Errors
///
/// Returns the first failure among the date, sender and subject lookups.
pub fn compute_name(
    message: &RawMessage<'_>,
    original_filename: &str,
    config: &Config,
) -> Result<String> {
    let mut name = compute_date(message, config.format)?;
    if config.format.includes_sender() {
        name.push(' ');
        name.push_str(&summarize_from(message)?);
    }
    let subject = summarize_subject(message)?;
    if !subject.is_empty() {
        name.push(' ');
        name.push_str(&subject);
    }
    name.push_str(extension_of(original_filename));

    debug!(original = original_filename, %name, format = %config.format, "computed name");
    Ok(name)
}
