use super::ReferenceKind;
use serde::{Deserialize, Serialize};

/// Ordered extension fallbacks tried when a bare name does not resolve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionPolicy {
    pub sources: Vec<String>,
    pub figures: Vec<String>,
}

impl Default for ExtensionPolicy {
    fn default() -> Self {
        Self {
            sources: vec![".tex".to_string(), ".inc".to_string()],
            figures: vec![".pdf".to_string(), ".png".to_string()],
        }
    }
}

impl ExtensionPolicy {
    /// Fallback list for a reference kind; extras already carry their extension
    pub fn fallbacks_for(&self, kind: ReferenceKind) -> &[String] {
        match kind {
            ReferenceKind::Document | ReferenceKind::Input => &self.sources,
            ReferenceKind::Figure => &self.figures,
            ReferenceKind::Class
            | ReferenceKind::BibliographyStyle
            | ReferenceKind::Bibliography => &[],
        }
    }

    /// Parse a comma-separated list such as `pdf, .png, eps`
    pub fn parse_list(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|ext| !ext.is_empty() && *ext != ".")
            .map(normalize_extension)
            .collect()
    }
}

/// Ensure an extension carries exactly one leading dot
pub fn normalize_extension(ext: &str) -> String {
    format!(".{}", ext.trim_start_matches('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefers_pdf_over_png() {
        let policy = ExtensionPolicy::default();
        assert_eq!(policy.fallbacks_for(ReferenceKind::Figure), [".pdf", ".png"]);
        assert_eq!(policy.fallbacks_for(ReferenceKind::Input), [".tex", ".inc"]);
        assert!(policy.fallbacks_for(ReferenceKind::Class).is_empty());
    }

    #[test]
    fn test_parse_list_normalizes_dots() {
        assert_eq!(
            ExtensionPolicy::parse_list("pdf, .png,,eps"),
            vec![".pdf", ".png", ".eps"]
        );
        assert!(ExtensionPolicy::parse_list(" , ").is_empty());
    }
}
