use anyhow::{Context, Result};
use clap::ArgMatches;
use std::io::{self, IsTerminal};
use std::path::Path;

use crate::cli::prompts::{self, TerminalPrompter};
use crate::cli::utils::{level_icon, outcome_icon, pluralize};
use crate::cli::{load_project, logging};
use lang_router_plugin::orchestrator::display_relative;
use lang_router_plugin::{Config, DiagnosticLevel, Orchestrator, OsFileSystem, Report};

pub fn handle_apply(matches: &ArgMatches) -> Result<bool> {
    let (project_dir, mut config) = load_project(matches)?;
    apply_flags(matches, &mut config);
    config.validate()?;

    logging::init(&config.logging, matches.get_flag("verbose"))?;

    let dry_run = matches.get_flag("dry-run");
    if config.options.interactive && io::stdin().is_terminal() {
        let mut prompter = TerminalPrompter::new(io::stdin().lock(), io::stdout());
        prompts::ask_options(&mut prompter, &mut config.options)?;
    }

    println!("🌍 Adding {} to {}", config.dependency.name, project_dir.display());
    if dry_run {
        println!("📋 Dry run: no files will be written");
    }

    let report = Orchestrator::new(&config, OsFileSystem)
        .dry_run(dry_run)
        .run(&project_dir)
        .with_context(|| format!("Cannot apply {} here", config.dependency.name))?;

    print_report(&report, &project_dir);

    Ok(!report.diagnostics.iter().any(|d| d.level == DiagnosticLevel::Error))
}

/// Command-line flags override configuration file and environment
fn apply_flags(matches: &ArgMatches, config: &mut Config) {
    let options = &mut config.options;
    if matches.get_flag("no-template") {
        options.render_template = false;
    }
    if matches.get_flag("no-link-rewrite") {
        options.rewrite_router_link = false;
    }
    if matches.get_flag("language-switcher") {
        options.add_language_switcher = true;
    }
    if matches.get_flag("yes") {
        options.interactive = false;
    }
    if let Some(language) = matches.get_one::<String>("default-language") {
        config.i18n.default_language = language.clone();
    }
}

fn print_report(report: &Report, root: &Path) {
    println!();
    for step in &report.steps {
        let files: Vec<_> = step.files.iter().map(|f| display_relative(f, root)).collect();
        if files.is_empty() {
            println!("{} {:<10} {:?}", outcome_icon(step.outcome), step.step, step.outcome);
        } else {
            println!(
                "{} {:<10} {:?} ({})",
                outcome_icon(step.outcome),
                step.step,
                step.outcome,
                files.join(", ")
            );
        }
    }

    if !report.diagnostics.is_empty() {
        println!();
        for diagnostic in &report.diagnostics {
            println!("{} {}", level_icon(diagnostic.level), diagnostic.message);
        }
    }

    let modified = report.modified_files().len();
    let warnings = report.warnings().count();
    println!();
    if report.dry_run {
        println!("📋 Would modify {}", pluralize("file", modified));
    } else {
        println!("✨ Modified {}", pluralize("file", modified));
    }
    if warnings > 0 {
        println!("⚠️  {} need manual attention", pluralize("item", warnings));
    } else if !report.dry_run {
        println!("💡 Run `npm install` to fetch the new dependency");
    }
}
