use std::fmt::Write;

use crate::manifest::Manifest;
use crate::util::{escape_attr, escape_text};

/// Builds the sidebar: one link per manifest entry, in manifest order.
///
/// Each time an entry's group differs from the last group seen, the
/// current group container is closed, a new one is opened, and the group's
/// label is emitted. Entries without a group leave the current container
/// as is. The outermost container is opened and closed by the template.
pub fn navigation(manifest: &Manifest) -> String {
    let mut output = String::new();
    let mut current: Option<&str> = None;

    for entry in manifest {
        if let Some(group) = entry.group.as_deref() {
            if current != Some(group) {
                current = Some(group);
                output.push_str("</div>\n<div class=\"sidebar-group\">\n");
                let _ = writeln!(output, "  <div class=\"sidebar-group-label\">{}</div>", escape_text(group));
            }
        }

        tracing::debug!("navigation link to #{}", entry.id);
        let _ = writeln!(
            output,
            "  <a class=\"sidebar-link\" href=\"#{}\"><span class=\"num\">{}</span>{}</a>",
            escape_attr(&entry.id),
            escape_text(&entry.number),
            escape_text(&entry.title),
        );
    }

    output
}
