//! Run configuration.

use std::fmt;

use crate::error::{Error, Result};

/// Filename template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormatVariant {
    /// `yyyy-MM-dd-HH-mm <subject><ext>` (variant 1).
    #[default]
    DateSubject,
    /// `yyMMdd-HHmm <sender> <subject><ext>` (variant 2).
    DateSenderSubject,
}

impl FormatVariant {
    /// Numeric identifier used on the command line.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::DateSubject => 1,
            Self::DateSenderSubject => 2,
        }
    }

    /// `chrono` format string for the date prefix.
    #[must_use]
    pub const fn date_format(self) -> &'static str {
        match self {
            Self::DateSubject => "%Y-%m-%d-%H-%M",
            Self::DateSenderSubject => "%y%m%d-%H%M",
        }
    }

    /// Whether the sender summary is part of the name.
    #[must_use]
    pub const fn includes_sender(self) -> bool {
        matches!(self, Self::DateSenderSubject)
    }
}

impl TryFrom<u8> for FormatVariant {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::DateSubject),
            2 => Ok(Self::DateSenderSubject),
            other => Err(Error::UnsupportedFormatVariant(other.to_string())),
        }
    }
}

impl fmt::Display for FormatVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Options for one run, passed explicitly to every operation that needs them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Filename template.
    pub format: FormatVariant,
    /// Verbose tracing. Diagnostic only.
    pub debug: bool,
    /// Process files even if their name already carries a date prefix.
    pub force: bool,
    /// Report planned renames without touching the filesystem.
    pub dry_run: bool,
}

impl Config {
    /// Creates a configuration with the given template and all flags off.
    #[must_use]
    pub const fn new(format: FormatVariant) -> Self {
        Self {
            format,
            debug: false,
            force: false,
            dry_run: false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_variant_from_number() {
        assert_eq!(FormatVariant::try_from(1).unwrap(), FormatVariant::DateSubject);
        assert_eq!(
            FormatVariant::try_from(2).unwrap(),
            FormatVariant::DateSenderSubject
        );
        assert!(matches!(
            FormatVariant::try_from(3),
            Err(Error::UnsupportedFormatVariant(v)) if v == "3"
        ));
    }

    #[test]
    fn test_format_variant_display() {
        assert_eq!(FormatVariant::DateSenderSubject.to_string(), "2");
        assert_eq!(FormatVariant::default().to_string(), "1");
    }

    #[test]
    fn test_config_new() {
        let config = Config::new(FormatVariant::DateSenderSubject);
        assert!(config.format.includes_sender());
        assert!(!config.force && !config.debug && !config.dry_run);
    }
}
