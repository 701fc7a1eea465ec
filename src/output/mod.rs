//! Output formatting for CLI display
//!
//! Helpers for printing tags, items and status lines. In quiet mode only
//! bare results are printed.

use colored::Colorize;

use crate::dataset::DataItem;

/// Format a tag with the number of items that carry it
#[must_use]
pub fn tag_with_count(tag: &str, count: usize, quiet: bool) -> String {
    if quiet {
        tag.to_string()
    } else {
        format!("  {tag} (used by {count} item(s))")
    }
}

/// Format an item with its tags and, when known, its loss
#[must_use]
pub fn item_with_tags(item: &DataItem, quiet: bool) -> String {
    if quiet {
        return format!("{}: {}", item.name, item.tags);
    }
    let tags = if item.tags.is_empty() {
        "(no tags)".dimmed().to_string()
    } else {
        format!("[{}]", item.tags.joined().cyan())
    };
    match (item.loss, item.last_loss) {
        (Some(loss), Some(last)) => format!("  {} {tags} loss={loss:.4} recent={last:.4}", item.name.bold()),
        _ => format!("  {} {tags}", item.name.bold()),
    }
}

/// Print a success line unless quiet
pub fn success(message: &str, quiet: bool) {
    if !quiet {
        println!("{} {}", "✓".green(), message);
    }
}

/// Print an informational line unless quiet
pub fn info(message: &str, quiet: bool) {
    if !quiet {
        println!("{}", message.dimmed());
    }
}

/// Print a warning line unless quiet
pub fn warning(message: &str, quiet: bool) {
    if !quiet {
        println!("{} {}", "⚠️".yellow(), message);
    }
}

/// Print an error line to stderr
pub fn error(message: &str) {
    eprintln!("{} {}", "❌".red(), message);
}
