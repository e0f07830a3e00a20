use super::ContentProvider;
use crate::error::ContentError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Searches files as they are on disk, for projects without version control
#[derive(Debug, Clone)]
pub struct WorkingTree {
    root: PathBuf,
}

impl WorkingTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ContentProvider for WorkingTree {
    fn search(&self, pattern: &str, file: &Path) -> Result<Vec<String>, ContentError> {
        let path = self.root.join(file);
        if !path.is_file() {
            return Ok(Vec::new());
        }

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(ContentError::Read { path, source }),
        };

        Ok(String::from_utf8_lossy(&bytes)
            .lines()
            .filter(|line| line.contains(pattern))
            .map(str::to_string)
            .collect())
    }

    fn name(&self) -> &'static str {
        "working-tree"
    }
}
