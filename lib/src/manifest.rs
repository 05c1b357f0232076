use std::path::PathBuf;

use derive_more::Deref;
use rustc_hash::FxHashSet;
use serde::Deserialize;

use crate::error::Result;

/// One source document and how it appears in the assembled page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Entry {
    /// Source path, relative to the source root.
    pub file: PathBuf,
    /// Display label in the navigation, e.g. `06` or `B`.
    pub number: String,
    pub title: String,
    /// The `id` of the section's container, unique in the manifest.
    pub id: String,
    /// Consecutive entries with the same group are listed together.
    #[serde(default)]
    pub group: Option<String>,
}

impl Entry {
    pub fn new(file: &str, number: &str, title: &str, id: &str) -> Self {
        Entry {
            file: file.into(),
            number: number.into(),
            title: title.into(),
            id: id.into(),
            group: None,
        }
    }

    pub fn grouped(mut self, group: &str) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// The ordered list of documents to assemble. Order is document order and
/// navigation order.
///
/// Entries sharing a group are expected to be contiguous. A group that
/// reappears after a different one gets a second header; nothing checks
/// for or merges such groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct Manifest(Vec<Entry>);

impl Manifest {
    /// Creates a manifest, checking that every id is non-empty and unique.
    pub fn new(entries: Vec<Entry>) -> Result<Self> {
        let mut seen = FxHashSet::default();
        for entry in &entries {
            if entry.id.is_empty() {
                return err! {
                    "manifest entry has an empty id",
                    "file" => entry.file.display(),
                };
            }

            if !seen.insert(entry.id.as_str()) {
                return err! {
                    "manifest entry ids must be unique",
                    "duplicate id" => &entry.id,
                    "file" => entry.file.display(),
                };
            }
        }

        Ok(Manifest(entries))
    }

    /// Creates a manifest without validating it. The caller guarantees that
    /// ids are non-empty and unique.
    pub fn new_unchecked(entries: Vec<Entry>) -> Self {
        Manifest(entries)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
