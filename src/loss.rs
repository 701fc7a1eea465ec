//! Training-loss log merging
//!
//! Training scripts print per-image statistics as three-line records:
//!
//! ```text
//! Loss statistics for file img001.png
//! loss:0.1234±0.01
//! recent 50 loss:0.0987±0.02
//! ```
//!
//! [`LossParser`] scans a log for these records and copies the two numbers
//! onto the matching registry items. Anything that does not fit the pattern
//! is skipped.

use std::path::Path;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::dataset::{DatasetError, Registry};
use crate::storage::Storage;

const FILE_PREFIX: &str = "Loss statistics for file ";
const LOSS_PREFIX: &str = "loss";
const RECENT_PREFIX: &str = "recent";

static LOSS_RE: LazyLock<Regex> = LazyLock::new(|| case_insensitive(r"loss:([0-9]*[.]?[0-9]+)±"));
static RECENT_RE: LazyLock<Regex> =
    LazyLock::new(|| case_insensitive(r"recent \d+ loss:([0-9]*[.]?[0-9]+)±"));

fn case_insensitive(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("loss pattern is valid")
}

/// One parsed log record
#[derive(Debug, Clone, PartialEq)]
pub struct LossRecord {
    /// Item identifier: the logged file name without its extension
    pub name: String,
    pub loss: f32,
    pub last_loss: f32,
}

/// Outcome of merging a log into a registry
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LossSummary {
    /// Records applied to an item
    pub matched: usize,
    /// Well-formed records naming an item that is not loaded
    pub unmatched: usize,
}

/// Scanner for loss-statistics logs
#[derive(Debug, Default, Clone, Copy)]
pub struct LossParser;

impl LossParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Try to read a record from the three lines starting at `lines[0]`
    #[must_use]
    pub fn parse_record(&self, lines: &[&str]) -> Option<LossRecord> {
        let [header, loss_line, recent_line, ..] = lines else {
            return None;
        };
        let file = header.strip_prefix(FILE_PREFIX)?;
        let name = base_name(file.trim())?;

        if !loss_line.starts_with(LOSS_PREFIX) {
            return None;
        }
        let loss = capture_number(&LOSS_RE, loss_line)?;

        if !recent_line.starts_with(RECENT_PREFIX) {
            return None;
        }
        let last_loss = capture_number(&RECENT_RE, recent_line)?;

        Some(LossRecord {
            name,
            loss,
            last_loss,
        })
    }

    /// Merge every record in `text` into `registry`
    ///
    /// A record is consumed as a block only when it is applied; otherwise the
    /// scan moves on by a single line.
    pub fn apply(&self, registry: &mut Registry, text: &str) -> LossSummary {
        let lines: Vec<&str> = text.lines().collect();
        let mut summary = LossSummary::default();
        let mut i = 0;
        while i + 2 < lines.len() {
            match self.parse_record(&lines[i..]) {
                Some(record) if registry.set_loss(&record.name, record.loss, record.last_loss) => {
                    summary.matched += 1;
                    i += 3;
                }
                Some(record) => {
                    tracing::debug!(name = %record.name, line = i + 1, "loss record for unknown item");
                    summary.unmatched += 1;
                    i += 1;
                }
                None => i += 1,
            }
        }
        summary
    }
}

/// File name without directory or extension
///
/// Both `/` and `\` are separators.
fn base_name(file: &str) -> Option<String> {
    let file_name = file.rsplit(['/', '\\']).next()?;
    let stem = Path::new(file_name).file_stem()?;
    Some(stem.to_string_lossy().into_owned())
}

fn capture_number(re: &Regex, line: &str) -> Option<f32> {
    re.captures(line)?.get(1)?.as_str().parse().ok()
}

/// Read the log at `path` through `storage` and merge it into `registry`
///
/// # Errors
/// Returns `DatasetError::FileNotFound` if the log does not exist, or
/// `DatasetError::Read` if it cannot be read.
pub fn load_loss<S: Storage + ?Sized>(
    registry: &mut Registry,
    storage: &S,
    path: &Path,
) -> Result<LossSummary, DatasetError> {
    if !storage.file_exists(path) {
        return Err(DatasetError::FileNotFound(path.to_path_buf()));
    }
    let text = storage
        .read_all_text(path)
        .map_err(|source| DatasetError::from_read(path.to_path_buf(), source, DatasetError::FileNotFound))?;
    let summary = LossParser::new().apply(registry, &text);
    tracing::info!(
        log = %path.display(),
        matched = summary.matched,
        unmatched = summary.unmatched,
        "merged loss log"
    );
    Ok(summary)
}

/// Items that have a loss value, highest loss first
///
/// Ties are broken by identifier.
#[must_use]
pub fn ranked_by_loss(registry: &Registry) -> Vec<LossRecord> {
    let mut ranked: Vec<LossRecord> = registry
        .iter()
        .filter_map(|item| {
            Some(LossRecord {
                name: item.name.clone(),
                loss: item.loss?,
                last_loss: item.last_loss?,
            })
        })
        .collect();
    ranked.sort_by(|a, b| b.loss.total_cmp(&a.loss).then_with(|| a.name.cmp(&b.name)));
    ranked
}
