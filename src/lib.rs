pub mod content;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use std::path::PathBuf;
use tracing::{info, warn};

// Re-export commonly used types
pub use content::{create_provider, ContentProvider, GitGrep, ProviderKind, WorkingTree};
pub use error::{ContentError, DistError};
pub use models::{ExtensionPolicy, Reference, ReferenceKind};
pub use services::{
    build_distribution, copy_all, scan_document, shift, DistributionReport, FileCopyConfig,
    FileCopyReport, ReferenceScanner, ScanReport,
};
pub use utils::CopyOutcome;

// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub root: PathBuf,
    pub main_document: PathBuf,
    pub output_dir: PathBuf,
    pub provider: ProviderKind,
    pub git_program: Option<String>,
    pub extensions: ExtensionPolicy,
    pub copy: FileCopyConfig,
    pub log_level: String,
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            main_document: PathBuf::from("main.tex"),
            output_dir: PathBuf::from("dist"),
            provider: ProviderKind::Git,
            git_program: None,
            extensions: ExtensionPolicy::default(),
            copy: FileCopyConfig::default(),
            log_level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Apply `TEXDIST_*` overrides read through `lookup`.
    ///
    /// Blank values are ignored, and so is an extension list that parses to
    /// nothing, leaving the defaults in place.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(program) = non_empty("TEXDIST_GIT") {
            info!("Using git executable {}", program);
            self.git_program = Some(program);
        }

        for (var, target) in [
            ("TEXDIST_SOURCE_EXTENSIONS", &mut self.extensions.sources),
            ("TEXDIST_FIGURE_EXTENSIONS", &mut self.extensions.figures),
        ] {
            let Some(raw) = non_empty(var) else {
                continue;
            };
            let parsed = ExtensionPolicy::parse_list(&raw);
            if parsed.is_empty() {
                warn!("Ignoring {}: no extensions in {:?}", var, raw);
            } else {
                info!("{} = {:?}", var, parsed);
                *target = parsed;
            }
        }
    }
}
