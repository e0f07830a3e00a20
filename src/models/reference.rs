use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// What kind of command a reference was discovered through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Document,
    Input,
    Class,
    BibliographyStyle,
    Bibliography,
    Figure,
}

impl ReferenceKind {
    /// Whether files of this kind are LaTeX sources that can be scanned in turn
    pub fn is_text_document(self) -> bool {
        matches!(self, ReferenceKind::Document | ReferenceKind::Input)
    }

    /// Extension appended to arguments of this kind when they lack it
    pub fn forced_extension(self) -> Option<&'static str> {
        match self {
            ReferenceKind::Class => Some(".cls"),
            ReferenceKind::BibliographyStyle => Some(".bst"),
            ReferenceKind::Bibliography => Some(".bib"),
            _ => None,
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReferenceKind::Document => "document",
            ReferenceKind::Input => "input",
            ReferenceKind::Class => "class",
            ReferenceKind::BibliographyStyle => "bibliography style",
            ReferenceKind::Bibliography => "bibliography",
            ReferenceKind::Figure => "figure",
        };
        f.write_str(name)
    }
}

/// A project-relative file the distribution has to carry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    pub path: PathBuf,
    pub kind: ReferenceKind,
}

impl Reference {
    pub fn new(path: impl Into<PathBuf>, kind: ReferenceKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Literal path first, then the path with each fallback extension appended
    pub fn candidates(&self, fallbacks: &[String]) -> Vec<PathBuf> {
        std::iter::once(self.path.clone())
            .chain(fallbacks.iter().map(|ext| append_extension(&self.path, ext)))
            .collect()
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path.display(), self.kind)
    }
}

/// Append `extension` verbatim, so `fig.v2` + `.pdf` gives `fig.v2.pdf`
pub fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(extension);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_keep_literal_name_first() {
        let reference = Reference::new("intro", ReferenceKind::Input);
        let fallbacks = vec![".tex".to_string(), ".inc".to_string()];

        assert_eq!(
            reference.candidates(&fallbacks),
            vec![
                PathBuf::from("intro"),
                PathBuf::from("intro.tex"),
                PathBuf::from("intro.inc"),
            ]
        );
    }

    #[test]
    fn test_append_extension_does_not_replace_existing_one() {
        assert_eq!(
            append_extension(Path::new("figs/plot.v2"), ".pdf"),
            PathBuf::from("figs/plot.v2.pdf")
        );
    }
}
