use crate::content::ContentProvider;
use crate::error::DistError;
use crate::services::{copy_all, prepare_output_root, scan_document, FileCopyReport, ScanReport};
use crate::utils::safe_relative_path;
use crate::AppConfig;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Scan and copy results of one run
#[derive(Debug, Clone, Serialize)]
pub struct DistributionReport {
    pub scan: ScanReport,
    pub copy: FileCopyReport,
}

/// Express the main document relative to the project root.
///
/// Relative paths are taken as relative to the root already; absolute paths
/// must point inside it.
pub fn normalize_main_document(root: &Path, main_document: &Path) -> Result<PathBuf, DistError> {
    let outside = || DistError::OutsideProject {
        path: main_document.to_path_buf(),
        root: root.to_path_buf(),
    };

    let relative = if main_document.is_absolute() {
        let root = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
        let main = fs::canonicalize(main_document).unwrap_or_else(|_| main_document.to_path_buf());
        main.strip_prefix(&root).map_err(|_| outside())?.to_path_buf()
    } else {
        main_document.to_path_buf()
    };

    safe_relative_path(&relative).map_err(|_| outside())
}

/// Collect everything the main document needs and copy it to the output directory
pub fn build_distribution(
    config: &AppConfig,
    provider: &dyn ContentProvider,
) -> Result<DistributionReport> {
    let main_document = normalize_main_document(&config.root, &config.main_document)?;

    let scan = scan_document(provider, &config.root, &main_document, &config.extensions)
        .with_context(|| format!("Failed to scan {}", main_document.display()))?;

    if !config.copy.dry_run {
        prepare_output_root(&config.output_dir)?;
    }

    let copy = copy_all(
        &scan.references(),
        &config.root,
        &config.output_dir,
        &config.extensions,
        &config.copy,
    );

    info!(
        "Distribution of {} ready in {}",
        main_document.display(),
        config.output_dir.display()
    );

    Ok(DistributionReport { scan, copy })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_main_document_is_cleaned() {
        let path = normalize_main_document(Path::new("."), Path::new("./paper/main.tex")).unwrap();
        assert_eq!(path, PathBuf::from("paper/main.tex"));
    }

    #[test]
    fn test_main_document_outside_root_is_rejected() {
        let err = normalize_main_document(Path::new("."), Path::new("../main.tex")).unwrap_err();
        assert!(matches!(err, DistError::OutsideProject { .. }));
    }

    #[test]
    fn test_absolute_main_document_inside_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.tex"), "").unwrap();

        let path = normalize_main_document(dir.path(), &dir.path().join("main.tex")).unwrap();
        assert_eq!(path, PathBuf::from("main.tex"));
    }
}
