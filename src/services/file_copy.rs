use crate::error::DistError;
use crate::models::{ExtensionPolicy, Reference};
use crate::utils::{copy_with_metadata, first_existing, safe_relative_path, CopyOutcome};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Configuration for file copying operations
#[derive(Debug, Clone, Default)]
pub struct FileCopyConfig {
    pub dry_run: bool,
}

/// Create the output root before anything is copied into it
pub fn prepare_output_root(output_root: &Path) -> Result<(), DistError> {
    fs::create_dir_all(output_root).map_err(|source| DistError::OutputDirectory {
        path: output_root.to_path_buf(),
        source,
    })
}

/// Copy every reference to the same relative path under `output_root`.
///
/// A reference is tried at its literal name, then with each fallback
/// extension of its kind. Missing files and copy failures are recorded in the
/// report and never abort the run.
pub fn copy_all(
    references: &[Reference],
    project_root: &Path,
    output_root: &Path,
    extensions: &ExtensionPolicy,
    config: &FileCopyConfig,
) -> FileCopyReport {
    info!(
        "Copying {} references into {}{}",
        references.len(),
        output_root.display(),
        if config.dry_run { " (dry run)" } else { "" }
    );

    let outcomes: Vec<CopyOutcome> = references
        .iter()
        .map(|reference| copy_reference(reference, project_root, output_root, extensions, config))
        .collect();

    let report = create_copy_report(outcomes, config.dry_run);

    info!(
        "File copy completed. Copied: {}, Skipped: {}, Failed: {}",
        report.copied, report.skipped, report.failed
    );

    report
}

fn copy_reference(
    reference: &Reference,
    project_root: &Path,
    output_root: &Path,
    extensions: &ExtensionPolicy,
    config: &FileCopyConfig,
) -> CopyOutcome {
    let candidates = reference.candidates(extensions.fallbacks_for(reference.kind));

    let Some(found) = first_existing(project_root, &candidates) else {
        return CopyOutcome::SkippedMissing {
            reference: reference.clone(),
            tried: candidates,
        };
    };

    let source = project_root.join(&found);
    let destination = match safe_relative_path(&found) {
        Ok(relative) => output_root.join(relative),
        Err(e) => {
            return CopyOutcome::Failed {
                reference: reference.clone(),
                source,
                destination: output_root.join(&found),
                error: e.to_string(),
            };
        }
    };

    if is_same_file(&source, &destination) {
        return CopyOutcome::Failed {
            reference: reference.clone(),
            source,
            destination,
            error: "source and destination are the same file".to_string(),
        };
    }

    if config.dry_run {
        return CopyOutcome::Copied {
            reference: reference.clone(),
            source,
            destination,
        };
    }

    match copy_with_metadata(&source, &destination) {
        Ok(_) => CopyOutcome::Copied {
            reference: reference.clone(),
            source,
            destination,
        },
        Err(e) => CopyOutcome::Failed {
            reference: reference.clone(),
            source,
            destination,
            error: format!("{e:#}"),
        },
    }
}

fn is_same_file(source: &Path, destination: &Path) -> bool {
    match (fs::canonicalize(source), fs::canonicalize(destination)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Create a report from copy outcomes, logging the ones that did not copy
fn create_copy_report(outcomes: Vec<CopyOutcome>, dry_run: bool) -> FileCopyReport {
    let mut copied = 0;
    let mut skipped = 0;
    let mut failed = 0;

    for outcome in &outcomes {
        match outcome {
            CopyOutcome::Copied {
                source,
                destination,
                ..
            } => {
                copied += 1;
                debug!("Copied {} to {}", source.display(), destination.display());
            }
            CopyOutcome::SkippedMissing { reference, tried } => {
                skipped += 1;
                debug!("Skipped {}: none of {:?} exists", reference, tried);
            }
            CopyOutcome::Failed {
                source,
                destination,
                error,
                ..
            } => {
                failed += 1;
                warn!(
                    "Failed to copy {} to {}: {}",
                    source.display(),
                    destination.display(),
                    error
                );
            }
        }
    }

    FileCopyReport {
        dry_run,
        copied,
        skipped,
        failed,
        outcomes,
    }
}

/// Report structure for file copy operations
#[derive(Debug, Clone, Serialize)]
pub struct FileCopyReport {
    pub dry_run: bool,
    pub copied: usize,
    pub skipped: usize,
    pub failed: usize,
    pub outcomes: Vec<CopyOutcome>,
}

impl FileCopyReport {
    pub fn total_processed(&self) -> usize {
        self.copied + self.skipped + self.failed
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.total_processed();
        if total == 0 {
            0.0
        } else {
            self.copied as f64 / total as f64
        }
    }

    /// References that did not resolve to any file in the project
    pub fn skipped_references(&self) -> impl Iterator<Item = &Reference> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, CopyOutcome::SkippedMissing { .. }))
            .map(CopyOutcome::reference)
    }
}
