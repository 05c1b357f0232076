use std::fs;
use std::path::Path;

use jwalk::WalkDir;

use crate::error::{Chainable, Result};

/// Recursively copies the directory `from` into `to`, preserving its
/// structure and overwriting existing files. Hidden files are included.
/// Returns the number of files copied.
///
/// `from` must be an existing directory.
pub fn copy_tree(from: &Path, to: &Path) -> Result<usize> {
    if !from.is_dir() {
        return err! {
            "static assets directory must exist",
            "path" => from.display(),
        };
    }

    let walker = WalkDir::new(from)
        .sort(true)
        .skip_hidden(false)
        .follow_links(true);

    let mut copied = 0;
    for entry in walker {
        let entry = entry.chain_with(|| error! {
            "failed to walk static assets",
            "root" => from.display(),
        })?;

        let path = entry.path();
        let relative = path.strip_prefix(from).map_err(|_| error! {
            "static asset outside of the assets directory",
            "path" => path.display(),
        })?;

        let target = to.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).chain_with(|| error! {
                "failed to create asset directory",
                "path" => target.display(),
            })?;
        } else {
            fs::copy(&path, &target).chain_with(|| error! {
                "failed to copy asset",
                "source path" => path.display(),
                "destination path" => target.display(),
            })?;

            tracing::debug!("copied {}", relative.display());
            copied += 1;
        }
    }

    Ok(copied)
}
