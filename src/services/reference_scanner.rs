use crate::content::ContentProvider;
use crate::error::ContentError;
use crate::models::{append_extension, ExtensionPolicy, Reference, ReferenceKind};
use crate::utils::{command_arguments, first_existing, LineFilter};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

const INPUT: &str = r"\input";
const DOCUMENT_CLASS: &str = r"\documentclass";
const BIBLIOGRAPHY_STYLE: &str = r"\bibliographystyle";
const BIBLIOGRAPHY: &str = r"\bibliography";
const FIGURE_DIR: &str = r"\figdir";

/// Figures found in a set of documents
#[derive(Debug, Clone, Default, Serialize)]
pub struct FigureScan {
    pub resolved: Vec<Reference>,
    pub missing: Vec<PathBuf>,
}

/// Everything discovered for one main document
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub main_document: Reference,
    pub figure_dir: String,
    pub inputs: Vec<Reference>,
    pub extras: Vec<Reference>,
    pub figures: Vec<Reference>,
    pub missing_figures: Vec<PathBuf>,
}

impl ScanReport {
    /// Main document, inputs and extras, in discovery order
    pub fn sources(&self) -> Vec<Reference> {
        std::iter::once(self.main_document.clone())
            .chain(self.inputs.iter().cloned())
            .chain(self.extras.iter().cloned())
            .collect()
    }

    /// Every reference the copy step has to materialize
    pub fn references(&self) -> Vec<Reference> {
        let mut references = self.sources();
        references.extend(self.figures.iter().cloned());
        references
    }
}

/// Finds the files a LaTeX document depends on through a [`ContentProvider`]
pub struct ReferenceScanner<'a> {
    provider: &'a dyn ContentProvider,
    root: &'a Path,
    extensions: &'a ExtensionPolicy,
}

impl<'a> ReferenceScanner<'a> {
    pub fn new(
        provider: &'a dyn ContentProvider,
        root: &'a Path,
        extensions: &'a ExtensionPolicy,
    ) -> Self {
        Self {
            provider,
            root,
            extensions,
        }
    }

    /// Transitive `\input` references of `path`, each listed once
    pub fn collect_inputs(&self, path: &Path) -> Result<Vec<Reference>, ContentError> {
        let root_document = Reference::new(path, ReferenceKind::Document);
        let mut visited = HashSet::new();
        visited.insert(self.visit_key(&root_document));

        self.inputs_of(&root_document, &mut visited)
    }

    fn inputs_of(
        &self,
        document: &Reference,
        visited: &mut HashSet<PathBuf>,
    ) -> Result<Vec<Reference>, ContentError> {
        let location = self.text_location(document);

        let children: Vec<Reference> = self
            .arguments(&location, INPUT, LineFilter::Usages, false)?
            .into_iter()
            .map(|name| Reference::new(name, ReferenceKind::Input))
            .filter(|child| {
                let fresh = visited.insert(self.visit_key(child));
                if !fresh {
                    debug!("{} already queued, not scanning it again", child.path.display());
                }
                fresh
            })
            .collect();

        let mut inputs = children.clone();
        for child in &children {
            inputs.extend(self.inputs_of(child, visited)?);
        }
        Ok(inputs)
    }

    /// Class, bibliography style and bibliography files named by `path`
    pub fn collect_extras(&self, path: &Path) -> Result<Vec<Reference>, ContentError> {
        let location = self.text_location(&Reference::new(path, ReferenceKind::Document));
        let commands = [
            (DOCUMENT_CLASS, ReferenceKind::Class, true),
            (BIBLIOGRAPHY_STYLE, ReferenceKind::BibliographyStyle, true),
            (BIBLIOGRAPHY, ReferenceKind::Bibliography, false),
        ];

        let mut extras = Vec::new();
        for (command, kind, single) in commands {
            for arg in self.arguments(&location, command, LineFilter::Usages, single)? {
                let names: Vec<&str> = if kind == ReferenceKind::Bibliography {
                    arg.split(',')
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .collect()
                } else {
                    vec![arg.as_str()]
                };

                extras.extend(
                    names
                        .into_iter()
                        .map(|name| Reference::new(with_forced_extension(name, kind), kind)),
                );
            }
        }
        Ok(extras)
    }

    /// Value of the first `\figdir` definition, or an empty string
    pub fn collect_figure_dir(&self, path: &Path) -> Result<String, ContentError> {
        let location = self.text_location(&Reference::new(path, ReferenceKind::Document));
        let figdir = self
            .arguments(&location, FIGURE_DIR, LineFilter::Definitions, true)?
            .into_iter()
            .next()
            .unwrap_or_default();
        Ok(figdir)
    }

    /// Resolve every `\figdir/<name>` usage in the text documents among `paths`
    pub fn collect_figures(
        &self,
        paths: &[Reference],
        figdir: &str,
    ) -> Result<FigureScan, ContentError> {
        let mut scan = FigureScan::default();
        let mut seen = HashSet::new();

        for document in paths.iter().filter(|r| r.kind.is_text_document()) {
            let location = self.text_location(document);

            for arg in self.arguments(&location, FIGURE_DIR, LineFilter::Usages, false)? {
                let Some(name) = arg.strip_prefix('/').map(str::trim).filter(|n| !n.is_empty())
                else {
                    debug!("ignoring {} usage without a file name: {}", FIGURE_DIR, arg);
                    continue;
                };

                let candidate = Path::new(figdir).join(name);
                match self.resolve_figure(&candidate) {
                    Some(resolved) => {
                        if seen.insert(resolved.clone()) {
                            scan.resolved
                                .push(Reference::new(resolved, ReferenceKind::Figure));
                        }
                    }
                    None => {
                        warn!("figure {} not found!", candidate.display());
                        if !scan.missing.contains(&candidate) {
                            scan.missing.push(candidate);
                        }
                    }
                }
            }
        }
        Ok(scan)
    }

    fn resolve_figure(&self, candidate: &Path) -> Option<PathBuf> {
        if candidate.extension().is_some() && self.root.join(candidate).is_file() {
            return Some(candidate.to_path_buf());
        }

        let fallbacks: Vec<PathBuf> = self
            .extensions
            .figures
            .iter()
            .map(|ext| append_extension(candidate, ext))
            .collect();
        first_existing(self.root, &fallbacks)
    }

    /// Where the text of a document reference lives: the literal name or its
    /// first existing fallback, else the literal name
    pub fn text_location(&self, reference: &Reference) -> PathBuf {
        let candidates = reference.candidates(self.extensions.fallbacks_for(reference.kind));
        first_existing(self.root, &candidates).unwrap_or_else(|| reference.path.clone())
    }

    fn visit_key(&self, reference: &Reference) -> PathBuf {
        self.text_location(reference)
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    }

    fn arguments(
        &self,
        file: &Path,
        command: &str,
        filter: LineFilter,
        single: bool,
    ) -> Result<Vec<String>, ContentError> {
        let mut args = Vec::new();
        for line in self.provider.search(command, file)? {
            args.extend(command_arguments(&line, command, filter));
            if single && !args.is_empty() {
                args.truncate(1);
                break;
            }
        }
        Ok(args)
    }
}

fn with_forced_extension(name: &str, kind: ReferenceKind) -> String {
    match kind.forced_extension() {
        Some(ext) if !name.ends_with(ext) => format!("{name}{ext}"),
        _ => name.to_string(),
    }
}

/// Scan a main document: figure directory, inputs, extras, then figures
pub fn scan_document(
    provider: &dyn ContentProvider,
    root: &Path,
    main_document: &Path,
    extensions: &ExtensionPolicy,
) -> Result<ScanReport, ContentError> {
    info!(
        "Scanning {} with the {} provider",
        main_document.display(),
        provider.name()
    );

    let scanner = ReferenceScanner::new(provider, root, extensions);

    let figure_dir = scanner.collect_figure_dir(main_document)?;
    let inputs = scanner.collect_inputs(main_document)?;
    let extras = scanner.collect_extras(main_document)?;

    let main = Reference::new(main_document, ReferenceKind::Document);
    let documents: Vec<Reference> = std::iter::once(main.clone())
        .chain(inputs.iter().cloned())
        .collect();
    let figures = scanner.collect_figures(&documents, &figure_dir)?;

    info!(
        "Found {} inputs, {} extras and {} figures ({} missing), figure directory {:?}",
        inputs.len(),
        extras.len(),
        figures.resolved.len(),
        figures.missing.len(),
        figure_dir
    );

    Ok(ScanReport {
        main_document: main,
        figure_dir,
        inputs,
        extras,
        figures: figures.resolved,
        missing_figures: figures.missing,
    })
}
