use std::path::PathBuf;
use std::time::Instant;

use folio::BuildReport;
use folio::error::Result;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

mod config;
mod flags;
mod manifest;

pub const CONFIG_FILE: &str = "site/site.toml";

pub fn main() {
    let flags = flags::MdbaseSite::from_env_or_exit();

    let level = if flags.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .without_time()
        .init();

    let start = Instant::now();
    match build(&flags) {
        Ok(report) => {
            tracing::info!(
                sections = report.sections.len(),
                skipped = report.skipped.len(),
                assets = report.assets,
                "done in {}ms",
                start.elapsed().as_millis(),
            );
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn build(flags: &flags::MdbaseSite) -> Result<BuildReport> {
    let root = flags.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let config = Config::discover(&root, flags.config.as_deref())?;

    let mut site = config.into_site()?;
    if let Some(output) = &flags.output {
        site.layout.output = output.clone();
    }

    tracing::debug!(layout = ?site.layout, "resolved site layout");
    tracing::info!("building mdbase.dev into {}", site.layout.output.display());
    site.build()
}
