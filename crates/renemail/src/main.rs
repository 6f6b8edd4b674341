//! `renemail` - rename stored email message files after their headers.
//!
//! Each file is named `<date> <subject><ext>` (format 1) or
//! `<date> <sender> <subject><ext>` (format 2), from its Date, Subject and
//! From headers.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod cli;
mod rename;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;

fn init_tracing(debug: bool) {
    let default = if debug {
        "renemail=debug,renemail_core=debug,renemail_mime=debug"
    } else {
        "renemail=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    // Configuration errors stop the run before any file is touched.
    let config = cli.config()?;
    debug!(?config, "starting");

    let files = rename::discover(&cli.paths, &cli.extensions).await?;
    let (files, skipped) = rename::skip_renamed(files, &config);

    let mut summary = rename::run(files, config).await;
    summary.skipped += skipped;
    info!(%summary, "done");
    eprintln!("{summary}");

    Ok(if summary.failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
