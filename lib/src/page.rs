use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Chainable, Result};

/// Replaced by the navigation markup in the spec page template.
pub const SIDEBAR_LINKS: &str = "{{SIDEBAR_LINKS}}";

/// Replaced by the assembled sections in the spec page template.
pub const SPEC_CONTENT: &str = "{{SPEC_CONTENT}}";

/// A page template, read in full.
#[derive(Debug, Clone)]
pub struct Template {
    pub name: String,
    pub text: String,
}

impl Template {
    /// Reads `dir/name`. A missing template is an error.
    pub fn load(dir: &Path, name: &str) -> Result<Template> {
        let path = dir.join(name);
        let text = fs::read_to_string(&path).chain_with(|| error! {
            "failed to read page template",
            "template" => name,
            "path" => path.display(),
        })?;

        Ok(Template { name: name.into(), text })
    }

    /// Substitutes the first [`SIDEBAR_LINKS`] with `navigation`, then the
    /// first [`SPEC_CONTENT`] of the result with `content`. Replacement text
    /// is inserted literally.
    pub fn substitute(&self, navigation: &str, content: &str) -> String {
        for token in [SIDEBAR_LINKS, SPEC_CONTENT] {
            if !self.text.contains(token) {
                tracing::warn!("template {} has no {} placeholder", self.name, token);
            }
        }

        self.text
            .replacen(SIDEBAR_LINKS, navigation, 1)
            .replacen(SPEC_CONTENT, content, 1)
    }

    /// Writes the template unchanged to `output/name`.
    pub fn copy_to(&self, output: &Path) -> Result<PathBuf> {
        write_page(output, &self.name, &self.text)
    }
}

/// Writes `contents` to `output/name`, replacing any existing file.
pub fn write_page(output: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    let path = output.join(name);
    fs::write(&path, contents).chain_with(|| error! {
        "failed to write page",
        "path" => path.display(),
    })?;

    Ok(path)
}
