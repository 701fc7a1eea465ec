//! Tagset CLI application entry point
//!
//! Command-line front end for managing the tags of an image captioning
//! dataset: a folder of images with one comma-separated `.txt` caption file
//! per image.
//!
//! # Usage
//!
//! ```bash
//! # Show every tag, or only the tags all images share
//! tagset tags ./dataset
//! tagset tags ./dataset --common --counts
//!
//! # Bulk edits (captions are rewritten only if something changed)
//! tagset add ./dataset solo --placement top
//! tagset add ./dataset masterpiece --at 1
//! tagset rm ./dataset watermark
//! tagset replace ./dataset "blue eyes" blue_eyes
//! tagset set ./dataset "1girl, solo" --only-empty
//!
//! # Preview an edit without writing
//! tagset --dry-run rm ./dataset watermark
//!
//! # Merge a training loss log and show the worst images
//! tagset loss ./dataset train.log --top 20
//! ```
//!
//! # Configuration
//!
//! Defaults live in the user's config directory
//! (`~/.config/tagset/config.toml` on Linux). Logging is controlled by the
//! `TAGSET_LOG` environment variable or the `log_level` setting.

use std::process::ExitCode;

use tagset::{
    TagsetError,
    cli::{Cli, Commands, parse_tag_args, resolve_position},
    commands::{self, show::TagsView},
    config::TagsetConfig,
    dataset::Dataset,
    output,
    storage::FsStorage,
};
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, TagsetError>;

/// Install the stderr log subscriber
///
/// `TAGSET_LOG` wins over the configured level; the fallback is `warn`.
fn init_tracing(config: &TagsetConfig) {
    let filter = EnvFilter::try_from_env("TAGSET_LOG")
        .or_else(|_| EnvFilter::try_new(config.log_level.as_deref().unwrap_or("warn")))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config_path = TagsetConfig::config_path()?;
    let mut config = TagsetConfig::load_from(&config_path)?;
    init_tracing(&config);

    let quiet = cli.quiet || config.quiet;
    let dry_run = cli.dry_run;

    if let Commands::Config { command } = &cli.command {
        return commands::config::execute(&mut config, &config_path, command, quiet);
    }

    let folder = cli
        .command
        .folder()
        .ok_or_else(|| TagsetError::InvalidInput("No dataset folder given".into()))?;
    let mut dataset =
        Dataset::open_with_extensions(FsStorage::new(), folder, config.image_extensions.as_slice())?;
    tracing::debug!(items = dataset.registry().len(), "dataset ready");

    match &cli.command {
        Commands::Tags {
            common,
            counts,
            json,
            ..
        } => {
            let view = TagsView {
                common: *common,
                counts: *counts,
                json: *json,
            };
            commands::show::tags(&dataset, view, quiet)?;
        }
        Commands::Items { .. } => commands::show::items(&dataset, quiet),
        Commands::Find { tag, .. } => {
            commands::show::find(&dataset, tag, quiet);
        }
        Commands::Add {
            tag, placement, at, ..
        } => {
            let position = resolve_position(*placement, *at, &config);
            commands::edit::add(&mut dataset, tag, position, dry_run, quiet)?;
        }
        Commands::Remove { tag, .. } => {
            commands::edit::remove(&mut dataset, tag, dry_run, quiet)?;
        }
        Commands::Replace { src, dst, .. } => {
            commands::edit::replace(&mut dataset, src, dst, dry_run, quiet)?;
        }
        Commands::Set {
            tags, only_empty, ..
        } => {
            let tags = parse_tag_args(tags);
            commands::edit::set(&mut dataset, &tags, *only_empty, dry_run, quiet)?;
        }
        Commands::Loss { log, top, .. } => {
            commands::loss::execute(&mut dataset, log, *top, quiet)?;
        }
        Commands::Config { .. } => unreachable!(),
    }

    Ok(())
}

/// Main entry point for the tagset application
fn main() -> ExitCode {
    match run(Cli::parse_args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
