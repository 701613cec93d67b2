//! Placeholder substitution for texture descriptors.
//!
//! Templates are plain text with `{{name}}` markers. Rendering is a single
//! left-to-right pass, so substituted values are never re-scanned for markers.

use crate::error::GeneratorError;
use std::{collections::BTreeMap, fs, path::Path};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Markers every texture descriptor template is expected to contain.
pub const REQUIRED_PLACEHOLDERS: [&str; 2] = ["usage", "path"];

/// Built-in texture descriptor. Key order and indentation are consumed
/// positionally by the asset loader; keep them stable.
pub const TEXTURE_TEMPLATE: &str = "\
# ================================================================================================
#  workshop
#  Copyright (C) 2022 Tim Leonard
# ================================================================================================
type: texture
version: 1

group: world

usage: {{usage}}

faces:
    - {{path}}
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataTemplate {
    text: String,
}

impl Default for MetadataTemplate {
    fn default() -> Self {
        Self::new(TEXTURE_TEMPLATE)
    }
}

impl MetadataTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GeneratorError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| GeneratorError::Template {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(text))
    }

    /// Names of all `{{...}}` markers in order of appearance (duplicates kept).
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut rest = self.text.as_str();
        while let Some((_, name, tail)) = split_marker(rest) {
            names.push(name);
            rest = tail;
        }
        names
    }

    /// Required markers absent from this template.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let present = self.placeholders();
        REQUIRED_PLACEHOLDERS
            .into_iter()
            .filter(|req| !present.contains(req))
            .collect()
    }

    /// Replace each known marker with its value. Unknown markers are kept verbatim.
    pub fn render(&self, values: &BTreeMap<&str, &str>) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut rest = self.text.as_str();
        while let Some((before, name, tail)) = split_marker(rest) {
            out.push_str(before);
            match values.get(name) {
                Some(value) => out.push_str(value),
                None => {
                    out.push_str(OPEN);
                    out.push_str(name);
                    out.push_str(CLOSE);
                }
            }
            rest = tail;
        }
        out.push_str(rest);
        out
    }
}

// (text before marker, marker name, text after marker)
//
// The marker is the `{{` closest to the first `}}`, so a stray `{{` earlier in
// the text stays literal instead of swallowing the next marker.
fn split_marker(text: &str) -> Option<(&str, &str, &str)> {
    let first = text.find(OPEN)?;
    let end = first + OPEN.len() + text[first + OPEN.len()..].find(CLOSE)?;
    let start = text[..end].rfind(OPEN)?;
    Some((
        &text[..start],
        &text[start + OPEN.len()..end],
        &text[end + CLOSE.len()..],
    ))
}
