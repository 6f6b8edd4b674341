//! Command line options.

use std::path::PathBuf;

use clap::Parser;
use renemail_core::{Config, FormatVariant};

/// Rename email message files after their date, subject and sender.
#[derive(Debug, Parser)]
#[command(name = "renemail", version, about)]
pub struct Cli {
    /// Message files, or directories whose message files are renamed.
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Filename template: 1 = date + subject, 2 = date + sender + subject.
    #[arg(short, long, default_value_t = 1, value_name = "1|2")]
    pub format: u8,

    /// Verbose tracing of header decoding and name composition.
    #[arg(short, long)]
    pub debug: bool,

    /// Also rename files whose name already starts with a date prefix.
    #[arg(long)]
    pub force: bool,

    /// Print planned renames without touching any file.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Extension of message files picked up from directories (repeatable).
    #[arg(short, long = "ext", value_name = "EXT", default_value = "eml")]
    pub extensions: Vec<String>,
}

impl Cli {
    /// Builds the run configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for a format variant other than 1 or 2.
    pub fn config(&self) -> renemail_core::Result<Config> {
        Ok(Config {
            format: FormatVariant::try_from(self.format)?,
            debug: self.debug,
            force: self.force,
            dry_run: self.dry_run,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["renemail", "inbox"]).unwrap();
        assert_eq!(cli.extensions, vec!["eml".to_string()]);
        let config = cli.config().unwrap();
        assert_eq!(config.format, FormatVariant::DateSubject);
        assert!(!config.force && !config.dry_run && !config.debug);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "renemail", "-f", "2", "-d", "--force", "-n", "--ext", "msg", "--ext", "txt", "a.eml",
        ])
        .unwrap();
        let config = cli.config().unwrap();
        assert_eq!(config.format, FormatVariant::DateSenderSubject);
        assert!(config.force && config.dry_run && config.debug);
        assert_eq!(cli.extensions, vec!["msg".to_string(), "txt".to_string()]);
    }

    #[test]
    fn test_unsupported_format_is_rejected() {
        let cli = Cli::try_parse_from(["renemail", "--format", "3", "a.eml"]).unwrap();
        assert!(matches!(
            cli.config(),
            Err(renemail_core::Error::UnsupportedFormatVariant(_))
        ));
    }

    #[test]
    fn test_paths_required() {
        assert!(Cli::try_parse_from(["renemail"]).is_err());
    }
}
