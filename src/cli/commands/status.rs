use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::cli::utils::{check_icon, pluralize};
use crate::cli::{load_project, logging};
use lang_router_plugin::OsFileSystem;
use lang_router_plugin::orchestrator::display_relative;
use lang_router_plugin::status::{self, WiringStatus};
use std::path::Path;

pub fn handle_status(matches: &ArgMatches) -> Result<bool> {
    let (project_dir, config) = load_project(matches)?;
    logging::init(&config.logging, matches.get_flag("verbose"))?;

    let status = status::inspect(&OsFileSystem, &config, &project_dir)
        .with_context(|| format!("Cannot inspect {}", project_dir.display()))?;

    let format = matches.get_one::<String>("format").map(String::as_str).unwrap_or("plain");
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&status)?),
        _ => print_status(&status, &project_dir),
    }

    Ok(status.is_complete())
}

fn print_status(status: &WiringStatus, root: &Path) {
    println!("🔍 Localized routing status ({:?})", status.script);
    println!("=================================\n");

    for check in &status.checks {
        println!(
            "  {} {:<20} {}",
            check_icon(check.state),
            check.name,
            display_relative(&check.file, root)
        );
    }

    let pending = status.pending().count();
    println!();
    if pending == 0 {
        println!("✅ Localized routing is fully wired");
    } else {
        println!("⏳ {} pending", pluralize("check", pending));
        println!("    💡 Run 'lang-router apply' to wire the rest");
    }
}
