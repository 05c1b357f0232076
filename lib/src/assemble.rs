use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Chainable, Result};
use crate::manifest::{Entry, Manifest};
use crate::markdown::{FrontMatter, Markdown, Rules, WithRules};
use crate::util::escape_attr;

/// A manifest entry's document, rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    pub html: String,
}

impl Section {
    /// Renders `source`, less any leading metadata block, with `rules`.
    pub fn render<R: Rules>(id: &str, source: &str, rules: R) -> Result<Section> {
        let html = Markdown::from(source)
            .plugin(FrontMatter::strip())
            .plugin(WithRules::new(rules))
            .run()?;

        Ok(Section { id: id.into(), html })
    }

    /// Appends the section, wrapped in its container and followed by a
    /// blank line, to `output`.
    pub fn write_container(&self, output: &mut String) {
        output.push_str("<section class=\"spec-section\" id=\"");
        output.push_str(&escape_attr(&self.id));
        output.push_str("\">\n");
        output.push_str(&self.html);
        output.push_str("</section>\n\n");
    }
}

/// The rendered sections of a manifest, in manifest order.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub sections: Vec<Section>,
    /// Source files of entries that were skipped because they don't exist.
    pub skipped: Vec<PathBuf>,
}

impl Assembly {
    /// The concatenation of every section's container.
    pub fn html(&self) -> String {
        let capacity = self.sections.iter().map(|s| s.html.len() + 64).sum();
        let mut output = String::with_capacity(capacity);
        for section in &self.sections {
            section.write_container(&mut output);
        }

        output
    }
}

/// Renders every entry of `manifest` whose source file exists under `root`.
///
/// A missing source file is logged and skipped. Any other failure to read
/// a source file is an error.
pub fn assemble<R: Rules>(root: &Path, manifest: &Manifest, rules: &R) -> Result<Assembly> {
    let mut assembly = Assembly::default();
    for entry in manifest {
        match load(root, entry)? {
            Some(source) => {
                assembly.sections.push(Section::render(&entry.id, &source, rules)?);
                tracing::info!("converted {}", entry.file.display());
            }
            None => {
                tracing::warn!("{} not found, skipping", entry.file.display());
                assembly.skipped.push(entry.file.clone());
            }
        }
    }

    Ok(assembly)
}

fn load(root: &Path, entry: &Entry) -> Result<Option<String>> {
    let path = root.join(&entry.file);
    let exists = path.try_exists().chain_with(|| error! {
        "failed to check for section source",
        "path" => path.display(),
    })?;

    if !exists {
        return Ok(None);
    }

    let source = fs::read_to_string(&path).chain_with(|| error! {
        "failed to read section source",
        "path" => path.display(),
        "section" => &entry.id,
    })?;

    Ok(Some(source))
}
