use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use folio::error::{Chainable, Result};
use folio::{error, Entry, Layout, Manifest, Site};

#[derive(Debug)]
pub struct Config {
    pub root: PathBuf,
    pub settings: Settings,
}

/// The contents of `site.toml`. Paths are relative to the project root.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub output: PathBuf,
    pub templates: PathBuf,
    pub assets: PathBuf,
    pub pass_through: Vec<String>,
    /// Replaces the built-in manifest when non-empty.
    pub section: Vec<Entry>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            output: "site/dist".into(),
            templates: "site/templates".into(),
            assets: "site/static".into(),
            pass_through: vec!["index.html".into(), "ecosystem.html".into()],
            section: vec![],
        }
    }
}

impl Config {
    /// Reads the settings at `file`, or at `root/site/site.toml` when no
    /// file is given. Only an explicitly given file must exist.
    pub fn discover(root: &Path, file: Option<&Path>) -> Result<Self> {
        let (path, required) = match file {
            Some(file) => (file.to_path_buf(), true),
            None => (root.join(crate::CONFIG_FILE), false),
        };

        let settings = if required || path.is_file() {
            let text = fs::read_to_string(&path).chain_with(|| error! {
                "failed to read site configuration",
                "path" => path.display(),
            })?;

            toml::from_str(&text).chain_with(|| error! {
                "invalid site configuration",
                "path" => path.display(),
            })?
        } else {
            Settings::default()
        };

        Ok(Config { root: root.to_path_buf(), settings })
    }

    pub fn layout(&self) -> Layout {
        Layout {
            source_root: self.root.clone(),
            output: self.root.join(&self.settings.output),
            templates: self.root.join(&self.settings.templates),
            assets: self.root.join(&self.settings.assets),
        }
    }

    pub fn into_site(self) -> Result<Site> {
        let layout = self.layout();
        let manifest = if self.settings.section.is_empty() {
            crate::manifest::mdbase()
        } else {
            Manifest::new(self.settings.section)
                .chain_with(|| "invalid manifest in site configuration")?
        };

        let mut site = Site::new(layout, manifest);
        site.pass_through = self.settings.pass_through;
        Ok(site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::discover(dir.path(), None).unwrap();
        assert_eq!(config.settings, Settings::default());

        let layout = config.layout();
        assert_eq!(layout.source_root, dir.path());
        assert_eq!(layout.output, dir.path().join("site/dist"));
        assert_eq!(layout.templates, dir.path().join("site/templates"));
        assert_eq!(layout.assets, dir.path().join("site/static"));

        let site = config.into_site().unwrap();
        assert_eq!(site.manifest.len(), 20);
        assert_eq!(site.pass_through, ["index.html", "ecosystem.html"]);
    }

    #[test]
    fn reads_settings_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("site")).unwrap();
        fs::write(dir.path().join("site/site.toml"), r#"
            output = "public"
            pass_through = ["index.html"]

            [[section]]
            file = "docs/intro.md"
            number = "1"
            title = "Intro"
            id = "intro"
        "#).unwrap();

        let config = Config::discover(dir.path(), None).unwrap();
        assert_eq!(config.settings.templates, PathBuf::from("site/templates"));
        assert_eq!(config.layout().output, dir.path().join("public"));

        let site = config.into_site().unwrap();
        assert_eq!(site.manifest.len(), 1);
        assert_eq!(site.manifest[0].file, PathBuf::from("docs/intro.md"));
        assert_eq!(site.pass_through, ["index.html"]);
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let error = Config::discover(dir.path(), Some(&missing)).unwrap_err();
        assert_eq!(error.message(), "failed to read site configuration");
    }

    #[test]
    fn rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.toml");
        fs::write(&path, "outptu = \"dist\"\n").unwrap();

        let error = Config::discover(dir.path(), Some(&path)).unwrap_err();
        assert_eq!(error.message(), "invalid site configuration");
    }

    #[test]
    fn rejects_duplicate_section_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.toml");
        fs::write(&path, r#"
            [[section]]
            file = "a.md"
            number = "1"
            title = "A"
            id = "same"

            [[section]]
            file = "b.md"
            number = "2"
            title = "B"
            id = "same"
        "#).unwrap();

        let config = Config::discover(dir.path(), Some(&path)).unwrap();
        let error = config.into_site().unwrap_err();
        assert_eq!(error.message(), "invalid manifest in site configuration");
        assert!(error.to_string().contains("duplicate id: same"));
    }
}
