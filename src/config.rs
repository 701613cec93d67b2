// Generator configuration: RON files, layered loading, non-fatal validation.

use crate::{
    error::GeneratorError,
    generator::{MetadataGenerator, DEFAULT_EXTENSIONS, OUTPUT_EXTENSION},
    template::MetadataTemplate,
};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory to scan (immediate entries only).
    pub source_directory: Option<PathBuf>,
    /// Prefix written verbatim in front of `/<filename>` in the `faces` entry.
    pub virtual_root: String,
    /// Case-sensitive filename suffixes that mark an image.
    pub extensions: Vec<String>,
    /// Replaces the built-in descriptor template when set.
    pub template_path: Option<PathBuf>,
    pub sorted: bool,
    pub dry_run: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            source_directory: None,
            virtual_root: "data:textures".into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            template_path: None,
            sorted: true,
            dry_run: false,
        }
    }
}

impl GeneratorConfig {
    /// Load from a single RON file (errors contain human-readable context).
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    /// Load multiple layers; later overrides earlier (deep merge).
    /// Unreadable layers are skipped; returns (config, used_paths, errors).
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                if let Some(val) = incoming.take() {
                                    merge_value(ev, val);
                                }
                                break;
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.display().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        match merged {
            Some(val) => match val.into_rust::<GeneratorConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => {
                    errors.push(format!(
                        "failed to deserialize merged config; using defaults: {e}"
                    ));
                    (GeneratorConfig::default(), used, errors)
                }
            },
            None => (GeneratorConfig::default(), used, errors),
        }
    }

    /// Produce validation warnings (non-fatal) for suspicious values.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.virtual_root.is_empty() {
            w.push("virtual_root is empty; faces paths will start with '/'".into());
        } else if self.virtual_root.ends_with('/') {
            w.push(format!(
                "virtual_root '{}' ends with '/'; faces paths will contain '//'",
                self.virtual_root
            ));
        }
        if self.extensions.is_empty() {
            w.push("extensions is empty; no file will be eligible".into());
        }
        for ext in &self.extensions {
            if ext.is_empty() {
                w.push("extensions contains an empty entry; every file would be eligible".into());
            } else if !ext.starts_with('.') {
                w.push(format!(
                    "extension '{ext}' has no leading '.'; names like 'x{ext}' also match"
                ));
            }
            if ext.as_str() == OUTPUT_EXTENSION {
                w.push(format!(
                    "extension '{OUTPUT_EXTENSION}' is the sidecar extension; \
                     sidecars would be treated as images"
                ));
            }
        }
        if self.source_directory.is_none() {
            w.push("source_directory not set".into());
        }
        w
    }

    /// The configured template override, or the built-in texture template.
    pub fn template(&self) -> Result<MetadataTemplate, GeneratorError> {
        match &self.template_path {
            Some(path) => MetadataTemplate::from_file(path),
            None => Ok(MetadataTemplate::default()),
        }
    }

    pub fn build_generator(&self) -> Result<MetadataGenerator, GeneratorError> {
        Ok(self.generator_with(self.template()?))
    }

    pub fn generator_with(&self, template: MetadataTemplate) -> MetadataGenerator {
        MetadataGenerator::new(self.virtual_root.clone(), template)
            .with_extensions(self.extensions.iter().cloned())
            .with_sorted(self.sorted)
            .with_dry_run(self.dry_run)
    }
}
