pub mod commands;
pub mod logging;
pub mod prompts;
pub mod utils;

use anyhow::{Context, Result};
use clap::ArgMatches;
use lang_router_plugin::Config;
use std::path::PathBuf;

/// Project directory argument plus the configuration found there
pub fn load_project(matches: &ArgMatches) -> Result<(PathBuf, Config)> {
    let project_dir = matches
        .get_one::<PathBuf>("project-dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));

    if !project_dir.is_dir() {
        anyhow::bail!("{} is not a directory", project_dir.display());
    }

    let config = Config::load_from_dir(&project_dir)
        .with_context(|| format!("Failed to load configuration from {}", project_dir.display()))?;

    Ok((project_dir, config))
}
