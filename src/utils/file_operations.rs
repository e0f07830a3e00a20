use crate::models::Reference;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, FileTimes};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// First candidate that exists as a file under `root`
pub fn first_existing<'a, I>(root: &Path, candidates: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = &'a PathBuf>,
{
    candidates
        .into_iter()
        .find(|candidate| root.join(candidate).is_file())
        .cloned()
}

/// Reduce a project-relative path to plain components.
///
/// Fails for absolute paths and `..`, which would land outside the output root.
pub fn safe_relative_path(path: &Path) -> Result<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(segment) => out.push(segment),
            Component::CurDir => {}
            Component::Prefix(_) | Component::RootDir | Component::ParentDir => {
                anyhow::bail!("path escapes the output directory: {:?}", path)
            }
        }
    }
    if out.as_os_str().is_empty() {
        anyhow::bail!("empty path: {:?}", path);
    }
    Ok(out)
}

/// Copy a file together with its permissions and timestamps
pub fn copy_with_metadata<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Result<u64> {
    let src_path = source.as_ref();
    let dest_path = destination.as_ref();

    if let Some(parent) = dest_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    let bytes = fs::copy(src_path, dest_path)
        .with_context(|| format!("Failed to copy file from {:?} to {:?}", src_path, dest_path))?;

    let metadata = fs::metadata(src_path)
        .with_context(|| format!("Failed to read metadata for: {:?}", src_path))?;

    let mut times = FileTimes::new();
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }

    // Read-only copies cannot be reopened for writing; the content is still there
    if let Err(e) = fs::File::options()
        .write(true)
        .open(dest_path)
        .and_then(|file| file.set_times(times))
    {
        debug!("Could not set timestamps on {:?}: {}", dest_path, e);
    }

    Ok(bytes)
}

/// Result of materializing one reference
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CopyOutcome {
    Copied {
        reference: Reference,
        source: PathBuf,
        destination: PathBuf,
    },
    SkippedMissing {
        reference: Reference,
        tried: Vec<PathBuf>,
    },
    Failed {
        reference: Reference,
        source: PathBuf,
        destination: PathBuf,
        error: String,
    },
}

impl CopyOutcome {
    pub fn reference(&self) -> &Reference {
        match self {
            CopyOutcome::Copied { reference, .. }
            | CopyOutcome::SkippedMissing { reference, .. }
            | CopyOutcome::Failed { reference, .. } => reference,
        }
    }

    pub fn is_copied(&self) -> bool {
        matches!(self, CopyOutcome::Copied { .. })
    }
}
