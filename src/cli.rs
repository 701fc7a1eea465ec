//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for tagset using the `clap` crate.
//!
//! # Commands
//!
//! - **tags**: list every tag, or the tags common to all items
//! - **items**: list items with their tags
//! - **find**: items carrying a tag
//! - **add** / **remove** / **replace** / **set**: bulk edits across the dataset
//! - **loss**: merge a training loss log and rank items by loss
//! - **config**: read and change defaults
//!
//! Editing commands save caption files only when something changed, and never
//! with `--dry-run`.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::{Placement, TagsetConfig};
use crate::tags::{AddPosition, TagList};

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "tagset")]
#[command(about = "Tag manager for image captioning datasets", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Apply edits in memory and report, without writing caption files
    #[arg(short = 'n', long = "dry-run", global = true)]
    pub dry_run: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List all tags in the dataset
    #[command(visible_alias = "t")]
    Tags {
        /// Dataset folder
        folder: PathBuf,

        /// Only tags shared by every item
        #[arg(short = 'c', long)]
        common: bool,

        /// Show how many items carry each tag
        #[arg(long)]
        counts: bool,

        /// Print all and common tags as JSON
        #[arg(long, conflicts_with_all = ["common", "counts"])]
        json: bool,
    },

    /// List items with their tags
    #[command(visible_alias = "ls")]
    Items {
        /// Dataset folder
        folder: PathBuf,
    },

    /// Find items carrying a tag
    #[command(visible_alias = "f")]
    Find {
        /// Dataset folder
        folder: PathBuf,

        /// Tag to look for (case-insensitive)
        tag: String,
    },

    /// Add a tag to every item
    #[command(visible_alias = "a")]
    Add {
        /// Dataset folder
        folder: PathBuf,

        /// Tag to add (stored lowercase)
        tag: String,

        /// Where to put the tag (defaults to the configured placement)
        #[arg(short = 'p', long, value_enum)]
        placement: Option<Placement>,

        /// Index for the custom placement; implies `--placement custom`
        #[arg(long, allow_negative_numbers = true)]
        at: Option<i64>,
    },

    /// Remove a tag from every item
    #[command(visible_alias = "rm")]
    Remove {
        /// Dataset folder
        folder: PathBuf,

        /// Tag to remove
        tag: String,
    },

    /// Rename a tag in every item
    #[command(visible_alias = "mv")]
    Replace {
        /// Dataset folder
        folder: PathBuf,

        /// Tag to rename
        src: String,

        /// New name; items that already have it just lose the old tag
        dst: String,
    },

    /// Give every item the same tag list
    Set {
        /// Dataset folder
        folder: PathBuf,

        /// Tags, as separate arguments or comma-separated
        #[arg(required = true, num_args = 1..)]
        tags: Vec<String>,

        /// Only fill items that have no tags yet
        #[arg(long)]
        only_empty: bool,
    },

    /// Merge a training loss log and rank items by loss
    Loss {
        /// Dataset folder
        folder: PathBuf,

        /// Log file containing loss statistics
        log: PathBuf,

        /// Show only the N highest-loss items
        #[arg(long, value_name = "N")]
        top: Option<usize>,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., placement=top)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., placement)
        #[arg(value_name = "KEY")]
        key: String,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Commands {
    /// Dataset folder the command operates on, if any
    #[must_use]
    pub fn folder(&self) -> Option<&Path> {
        match self {
            Self::Tags { folder, .. }
            | Self::Items { folder }
            | Self::Find { folder, .. }
            | Self::Add { folder, .. }
            | Self::Remove { folder, .. }
            | Self::Replace { folder, .. }
            | Self::Set { folder, .. }
            | Self::Loss { folder, .. } => Some(folder),
            Self::Config { .. } => None,
        }
    }
}

/// Resolve `add` flags against the configured defaults
///
/// `--at` alone means a custom position; a placement without `--at` uses the
/// configured custom index.
#[must_use]
pub fn resolve_position(
    placement: Option<Placement>,
    at: Option<i64>,
    config: &TagsetConfig,
) -> AddPosition {
    match (placement, at) {
        (Some(placement), at) => placement.with_index(at.unwrap_or(config.custom_position)),
        (None, Some(at)) => AddPosition::Custom(at),
        (None, None) => config.add_position(),
    }
}

/// Flatten `set` arguments, splitting comma-separated ones
#[must_use]
pub fn parse_tag_args(args: &[String]) -> Vec<String> {
    TagList::parse(&args.join(",")).as_slice().to_vec()
}
