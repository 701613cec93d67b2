//! Texture metadata generation.
//!
//! For every image in a directory that has no `.yaml` sidecar yet, classify
//! its usage from the filename and write a descriptor rendered from a
//! [`MetadataTemplate`]. Existing sidecars are never touched, so running the
//! generator twice is a no-op the second time.
//!
//! Eligibility is a case-sensitive suffix match (`brick.PNG` is skipped) while
//! usage classification ignores case.

use crate::{
    error::GeneratorError,
    store::AssetStore,
    template::MetadataTemplate,
    usage::TextureUsage,
};
use serde::Serialize;
use std::{collections::BTreeMap, path::Path};
use tracing::{debug, info};

pub const DEFAULT_EXTENSIONS: &[&str] = &[".png"];
pub const OUTPUT_EXTENSION: &str = ".yaml";

/// A descriptor ready to be written next to its source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedDocument {
    pub source: String,
    pub output: String,
    pub usage: TextureUsage,
    pub virtual_path: String,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryDecision {
    /// Name does not end with a recognised image extension.
    Ineligible,
    /// Sidecar already present; left untouched.
    AlreadyDocumented { output: String },
    Generate(PlannedDocument),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenDocument {
    pub source: String,
    pub output: String,
    pub usage: TextureUsage,
}

/// Outcome of one [`MetadataGenerator::run`]. In a dry run `written` lists the
/// documents that would have been created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub scanned: usize,
    pub written: Vec<WrittenDocument>,
    pub skipped_existing: Vec<String>,
    pub ineligible: Vec<String>,
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct MetadataGenerator {
    virtual_root: String,
    template: MetadataTemplate,
    extensions: Vec<String>,
    dry_run: bool,
    sorted: bool,
}

impl MetadataGenerator {
    pub fn new(virtual_root: impl Into<String>, template: MetadataTemplate) -> Self {
        Self {
            virtual_root: virtual_root.into(),
            template,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            dry_run: false,
            sorted: false,
        }
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Process entries in name order instead of listing order.
    pub fn with_sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    /// The recognised extension `name` ends with, if any (case-sensitive).
    pub fn matched_extension(&self, name: &str) -> Option<&str> {
        self.extensions
            .iter()
            .map(String::as_str)
            .find(|ext| name.ends_with(ext))
    }

    /// Sidecar name for `name`: the trailing image extension swapped for `.yaml`.
    pub fn output_name(&self, name: &str) -> Option<String> {
        let ext = self.matched_extension(name)?;
        let stem = &name[..name.len() - ext.len()];
        Some(format!("{stem}{OUTPUT_EXTENSION}"))
    }

    /// Plain concatenation; separators in either part are kept as-is.
    pub fn virtual_path(&self, name: &str) -> String {
        format!("{}/{}", self.virtual_root, name)
    }

    pub fn render(&self, name: &str) -> String {
        let usage = TextureUsage::classify(name);
        let virtual_path = self.virtual_path(name);
        self.render_with(usage, &virtual_path)
    }

    fn render_with(&self, usage: TextureUsage, virtual_path: &str) -> String {
        let values = BTreeMap::from([("usage", usage.as_str()), ("path", virtual_path)]);
        self.template.render(&values)
    }

    pub fn plan_entry<S>(&self, store: &S, dir: &Path, name: &str) -> EntryDecision
    where
        S: AssetStore + ?Sized,
    {
        let Some(output) = self.output_name(name) else {
            return EntryDecision::Ineligible;
        };
        if store.exists(&dir.join(&output)) {
            return EntryDecision::AlreadyDocumented { output };
        }
        let usage = TextureUsage::classify(name);
        let virtual_path = self.virtual_path(name);
        let contents = self.render_with(usage, &virtual_path);
        EntryDecision::Generate(PlannedDocument {
            source: name.to_string(),
            output,
            usage,
            virtual_path,
            contents,
        })
    }

    /// Scan `dir` (non-recursive) and write every missing sidecar. The first
    /// storage failure aborts the scan; documents already written stay.
    pub fn run<S>(&self, store: &S, dir: &Path) -> Result<GenerationReport, GeneratorError>
    where
        S: AssetStore + ?Sized,
    {
        info!("Generating metadata for files in: {}", dir.display());
        let mut entries = store.list(dir).map_err(|source| GeneratorError::List {
            dir: dir.to_path_buf(),
            source,
        })?;
        if self.sorted {
            entries.sort();
        }

        let mut report = GenerationReport {
            dry_run: self.dry_run,
            ..Default::default()
        };
        for name in entries {
            report.scanned += 1;
            match self.plan_entry(store, dir, &name) {
                EntryDecision::Ineligible => {
                    debug!("skip {name}: not a recognised image");
                    report.ineligible.push(name);
                }
                EntryDecision::AlreadyDocumented { output } => {
                    debug!("skip {name}: {output} already exists");
                    report.skipped_existing.push(output);
                }
                EntryDecision::Generate(doc) => {
                    let path = dir.join(&doc.output);
                    if self.dry_run {
                        info!(
                            "Would generate metadata for: {} (usage={})",
                            path.display(),
                            doc.usage
                        );
                    } else {
                        info!("Generating metadata for: {}", path.display());
                        store
                            .write_text(&path, &doc.contents)
                            .map_err(|source| GeneratorError::Write { path, source })?;
                    }
                    report.written.push(WrittenDocument {
                        source: doc.source,
                        output: doc.output,
                        usage: doc.usage,
                    });
                }
            }
        }
        Ok(report)
    }
}
