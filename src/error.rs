use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while querying the versioned content of a document
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with status {status} while searching {file:?}: {stderr}")]
    CommandFailed {
        program: String,
        file: PathBuf,
        status: i32,
        stderr: String,
    },

    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that stop a distribution run as a whole
#[derive(Debug, Error)]
pub enum DistError {
    #[error("main document {path:?} is not inside the project root {root:?}")]
    OutsideProject { path: PathBuf, root: PathBuf },

    #[error("failed to create output directory {path:?}: {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Content(#[from] ContentError),
}
