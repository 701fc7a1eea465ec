//! Config command - read and change defaults

use std::path::Path;

use super::Result;
use crate::cli::ConfigCommands;
use crate::config::TagsetConfig;
use crate::{TagsetError, output};

/// Execute a config subcommand against the file at `path`
///
/// # Errors
/// Returns an error for malformed input, unknown keys, or a failed save.
pub fn execute(
    config: &mut TagsetConfig,
    path: &Path,
    command: &ConfigCommands,
    quiet: bool,
) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let (key, value) = setting.split_once('=').ok_or_else(|| {
                TagsetError::InvalidInput("Invalid format. Use: tagset config set key=value".into())
            })?;
            let (key, value) = (key.trim(), value.trim());
            config.set_value(key, value)?;
            config.save_to(path)?;
            output::success(&format!("Set {key} = {}", config.get_value(key)?), quiet);
        }
        ConfigCommands::Get { key } => {
            println!("{}", config.get_value(key)?);
        }
    }
    Ok(())
}
