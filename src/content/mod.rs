//! Line-search access to the text of project documents.
//!
//! Scanning never reads LaTeX sources directly; it asks a [`ContentProvider`]
//! for the lines of a file that contain a given fixed string. The default
//! provider asks git, so only tracked content is seen.

pub mod git;
pub mod working_tree;

use crate::error::ContentError;
use std::path::{Path, PathBuf};

pub use git::GitGrep;
pub use working_tree::WorkingTree;

/// Oracle returning the lines of `file` that contain `pattern`, in file order
pub trait ContentProvider {
    fn search(&self, pattern: &str, file: &Path) -> Result<Vec<String>, ContentError>;

    fn name(&self) -> &'static str;
}

/// Which provider a run scans documents with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Git,
    WorkingTree,
}

/// Build the provider selected by configuration, rooted at the project root
pub fn create_provider(
    kind: ProviderKind,
    root: &Path,
    git_program: Option<&str>,
) -> Box<dyn ContentProvider> {
    let root: PathBuf = root.to_path_buf();
    match kind {
        ProviderKind::Git => {
            let provider = GitGrep::new(root);
            match git_program {
                Some(program) => Box::new(provider.with_program(program)),
                None => Box::new(provider),
            }
        }
        ProviderKind::WorkingTree => Box::new(WorkingTree::new(root)),
    }
}
