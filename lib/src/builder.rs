use std::fs;
use std::path::PathBuf;

use crate::assemble::assemble;
use crate::assets::copy_tree;
use crate::error::{Chainable, Result};
use crate::manifest::Manifest;
use crate::markdown::{Rules, SpecRules};
use crate::navigation::navigation;
use crate::page::{write_page, Template};

/// Where a build reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Directory that manifest entry paths are relative to.
    pub source_root: PathBuf,
    /// Output directory. Created if missing.
    pub output: PathBuf,
    /// Directory holding the page templates.
    pub templates: PathBuf,
    /// Directory copied as is into the output directory.
    pub assets: PathBuf,
}

/// Everything needed to build the site.
#[derive(Debug, Clone)]
pub struct Site {
    pub layout: Layout,
    pub manifest: Manifest,
    /// Templates copied to the output without substitution.
    pub pass_through: Vec<String>,
    /// The template the assembled document is substituted into.
    pub spec_page: String,
}

/// What a build did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub assets: usize,
    /// Anchor ids of the rendered sections, in document order.
    pub sections: Vec<String>,
    /// Source files of skipped manifest entries.
    pub skipped: Vec<PathBuf>,
    /// Written pages, in the order they were written.
    pub pages: Vec<PathBuf>,
}

impl Site {
    pub const SPEC_PAGE: &'static str = "spec.html";

    pub fn new(layout: Layout, manifest: Manifest) -> Self {
        Site {
            layout,
            manifest,
            pass_through: vec!["index.html".into(), "ecosystem.html".into()],
            spec_page: Site::SPEC_PAGE.into(),
        }
    }

    pub fn build(&self) -> Result<BuildReport> {
        self.build_with(&SpecRules)
    }

    /// Builds the site, rendering sections with `rules`.
    ///
    /// Creates the output directory, copies the static assets, copies the
    /// pass-through pages, and writes the spec page last.
    pub fn build_with<R: Rules>(&self, rules: &R) -> Result<BuildReport> {
        let layout = &self.layout;
        let mut report = BuildReport::default();

        fs::create_dir_all(&layout.output).chain_with(|| error! {
            "failed to create output directory",
            "path" => layout.output.display(),
        })?;

        report.assets = copy_tree(&layout.assets, &layout.output)?;
        tracing::info!("copied static assets");

        for name in &self.pass_through {
            let template = Template::load(&layout.templates, name)?;
            report.pages.push(template.copy_to(&layout.output)?);
            tracing::info!("built {name}");
        }

        let template = Template::load(&layout.templates, &self.spec_page)?;
        let sidebar = navigation(&self.manifest);
        let assembly = assemble(&layout.source_root, &self.manifest, rules)?;
        let page = template.substitute(&sidebar, &assembly.html());
        report.pages.push(write_page(&layout.output, &self.spec_page, &page)?);
        tracing::info!("built {}", self.spec_page);

        report.sections = assembly.sections.into_iter().map(|s| s.id).collect();
        report.skipped = assembly.skipped;
        Ok(report)
    }
}
