use super::ContentProvider;
use crate::error::ContentError;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Searches tracked files with `git grep`, run from the project root
#[derive(Debug, Clone)]
pub struct GitGrep {
    program: String,
    root: PathBuf,
}

impl GitGrep {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            program: "git".to_string(),
            root: root.into(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl ContentProvider for GitGrep {
    fn search(&self, pattern: &str, file: &Path) -> Result<Vec<String>, ContentError> {
        let output = Command::new(&self.program)
            .current_dir(&self.root)
            .args(["--literal-pathspecs", "grep", "--no-color", "-h", "-F", "-e"])
            .arg(pattern)
            .arg("--")
            .arg(file)
            .output()
            .map_err(|source| ContentError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // git grep exits with 1 when nothing matched
        match output.status.code() {
            Some(0) => {}
            Some(1) => {
                debug!("git grep {} in {:?}: no matches", pattern, file);
                return Ok(Vec::new());
            }
            code => {
                return Err(ContentError::CommandFailed {
                    program: self.program.clone(),
                    file: file.to_path_buf(),
                    status: code.unwrap_or(-1),
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                });
            }
        }

        let lines: Vec<String> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect();

        debug!("git grep {} in {:?}: {} lines", pattern, file, lines.len());
        Ok(lines)
    }

    fn name(&self) -> &'static str {
        "git"
    }
}
