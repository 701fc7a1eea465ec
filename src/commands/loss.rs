//! Loss command: merge a training log and rank items

use std::path::Path;

use colored::Colorize;

use super::Result;
use crate::dataset::Dataset;
use crate::loss::{LossRecord, ranked_by_loss};
use crate::output;
use crate::storage::Storage;

/// Merge the log at `log` and print items by descending loss
///
/// Returns the printed ranking.
///
/// # Errors
/// Returns an error if the log is missing or unreadable.
pub fn execute<S: Storage>(
    dataset: &mut Dataset<S>,
    log: &Path,
    top: Option<usize>,
    quiet: bool,
) -> Result<Vec<LossRecord>> {
    let summary = dataset.load_loss(log)?;
    output::success(
        &format!(
            "Matched {} loss record(s) from {}",
            summary.matched,
            log.display()
        ),
        quiet,
    );
    if summary.unmatched > 0 {
        output::warning(
            &format!("{} record(s) named images not in this folder", summary.unmatched),
            quiet,
        );
    }

    let mut ranked = ranked_by_loss(dataset.registry());
    if let Some(top) = top {
        ranked.truncate(top);
    }

    if !quiet && !ranked.is_empty() {
        println!("\n{}", "Items by loss:".bold());
    }
    for record in &ranked {
        if quiet {
            println!("{}\t{}\t{}", record.name, record.loss, record.last_loss);
        } else {
            println!(
                "  {:<32} loss={:.4} recent={:.4}",
                record.name, record.loss, record.last_loss
            );
        }
    }
    Ok(ranked)
}
