//! File discovery, name planning and renaming.
//!
//! Files are read and named concurrently, one task each. Reporting and
//! renaming happen on the calling task as plans complete, so the line
//! printed for a file is always followed by that file's own rename and
//! two files can never race for the same target name.

use std::collections::{BTreeSet, HashMap};
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow, bail};
use renemail_core::{Config, RawMessage, compute_name, is_already_renamed};
use tokio::fs;
use tokio::task::{self, JoinSet};
use tracing::{debug, error, info, warn};

/// A computed rename for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Current path.
    pub source: PathBuf,
    /// New path, in the same directory.
    pub target: PathBuf,
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Files renamed (or that would be, in a dry run).
    pub renamed: usize,
    /// Files whose computed name equals their current one.
    pub unchanged: usize,
    /// Files skipped because they already carry a date prefix.
    pub skipped: usize,
    /// Files that could not be processed.
    pub failed: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} renamed, {} unchanged, {} skipped, {} failed",
            self.renamed, self.unchanged, self.skipped, self.failed
        )
    }
}

fn file_name(path: &Path) -> anyhow::Result<&str> {
    path.file_name()
        .and_then(OsStr::to_str)
        .ok_or_else(|| anyhow!("file name is not valid UTF-8"))
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
}

/// Expands the command line paths into message files.
///
/// Directories contribute their regular files with a matching extension
/// (not recursively); files named explicitly are always included. The
/// result is sorted and free of duplicates.
///
/// # Errors
///
/// Returns an error if a path does not exist or a directory cannot be read.
pub async fn discover(paths: &[PathBuf], extensions: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();

    for path in paths {
        let metadata = fs::metadata(path)
            .await
            .with_context(|| format!("cannot access {}", path.display()))?;

        if !metadata.is_dir() {
            files.insert(path.clone());
            continue;
        }

        let mut entries = fs::read_dir(path)
            .await
            .with_context(|| format!("cannot read directory {}", path.display()))?;
        while let Some(entry) = entries.next_entry().await? {
            let entry_path = entry.path();
            if entry.file_type().await?.is_file() && has_extension(&entry_path, extensions) {
                files.insert(entry_path);
            }
        }
    }

    debug!(count = files.len(), "discovered message files");
    Ok(files.into_iter().collect())
}

/// Drops files whose name already starts with a date prefix, unless forced.
///
/// Returns the remaining files and the number skipped.
#[must_use]
pub fn skip_renamed(files: Vec<PathBuf>, config: &Config) -> (Vec<PathBuf>, usize) {
    if config.force {
        return (files, 0);
    }

    let (skipped, kept): (Vec<_>, Vec<_>) = files.into_iter().partition(|path| {
        path.file_name()
            .and_then(OsStr::to_str)
            .is_some_and(is_already_renamed)
    });
    for path in &skipped {
        warn!(file = %path.display(), "already renamed, skipping (use --force to override)");
    }
    (kept, skipped.len())
}

/// Reads a file and computes its new name.
///
/// Returns `None` when the name would not change.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its headers do not
/// yield a name.
pub async fn plan(path: &Path, config: &Config) -> anyhow::Result<Option<Plan>> {
    let current = file_name(path)?;
    let bytes = fs::read(path).await.context("cannot read file")?;
    let text = String::from_utf8_lossy(&bytes);

    let new_name = compute_name(&RawMessage::new(&text), current, config)?;
    if new_name == current {
        return Ok(None);
    }

    Ok(Some(Plan {
        source: path.to_path_buf(),
        target: path.with_file_name(new_name),
    }))
}

/// Reports a plan and, unless this is a dry run, performs it.
///
/// # Errors
///
/// Returns an error if the target already exists or the rename fails.
pub async fn apply(plan: &Plan, config: &Config) -> anyhow::Result<()> {
    if fs::try_exists(&plan.target).await? {
        bail!("target {:?} already exists", file_name(&plan.target)?);
    }

    println!(
        "{:?} -> {:?}",
        file_name(&plan.source)?,
        file_name(&plan.target)?
    );
    if config.dry_run {
        return Ok(());
    }

    fs::rename(&plan.source, &plan.target)
        .await
        .context("rename failed")?;
    info!(from = %plan.source.display(), to = %plan.target.display(), "renamed");
    Ok(())
}

fn report_failure(path: &Path, err: &anyhow::Error) {
    let kind = err
        .downcast_ref::<renemail_core::Error>()
        .map_or("file", renemail_core::Error::kind);
    error!(file = %path.display(), kind, error = %err, "failed");
    eprintln!("error: {}: [{kind}] {err:#}", path.display());
}

/// Processes every file, isolating failures to the file they occur in.
pub async fn run(files: Vec<PathBuf>, config: Config) -> Summary {
    run_with(files, config, |path, config| async move { plan(&path, &config).await }).await
}

/// Drives `planner` over every file, one task each, then reports and
/// applies the plans on the calling task as they arrive.
async fn run_with<F, Fut>(files: Vec<PathBuf>, config: Config, planner: F) -> Summary
where
    F: Fn(PathBuf, Config) -> Fut,
    Fut: Future<Output = anyhow::Result<Option<Plan>>> + Send + 'static,
{
    let mut summary = Summary::default();
    let mut tasks = JoinSet::new();
    let mut paths: HashMap<task::Id, PathBuf> = HashMap::new();

    for path in files {
        let handle = tasks.spawn(planner(path.clone(), config));
        paths.insert(handle.id(), path);
    }

    while let Some(joined) = tasks.join_next_with_id().await {
        let (path, result) = match joined {
            Ok((id, result)) => (paths.remove(&id), result),
            Err(join_error) => {
                let path = paths.remove(&join_error.id());
                (path, Err(anyhow!("task failed: {join_error}")))
            }
        };
        let Some(path) = path else {
            error!("finished task has no file");
            summary.failed += 1;
            continue;
        };

        let outcome = match result {
            Ok(Some(plan)) => apply(&plan, &config).await.map(|()| true),
            Ok(None) => Ok(false),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(true) => summary.renamed += 1,
            Ok(false) => {
                debug!(file = %path.display(), "name unchanged");
                summary.unchanged += 1;
            }
            Err(err) => {
                report_failure(&path, &err);
                summary.failed += 1;
            }
        }
    }

    summary
}
