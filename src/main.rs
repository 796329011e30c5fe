use clap::{Arg, ArgAction, Command};
use dotenv::dotenv;
use std::path::PathBuf;
use std::process;

mod cli;

fn main() {
    // Load environment variables from .env file
    dotenv().ok();

    let matches = build_cli().get_matches();

    match run_command(matches) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn build_cli() -> Command {
    Command::new("lang-router")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Wire vue-lang-router into a Vue CLI project")
        .long_about(
            "Rewrites the router, entry and App files of a Vue 2 CLI project so that it \
             uses vue-lang-router for localized routes, and adds example translation files",
        )
        .arg_required_else_help(true)
        .subcommand(
            Command::new("apply")
                .about("Run the generator over a project")
                .arg(project_dir_arg())
                .arg(
                    Arg::new("no-template")
                        .long("no-template")
                        .help("Do not add the example translation files")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("no-link-rewrite")
                        .long("no-link-rewrite")
                        .help("Leave <router-link> tags in App.vue as they are")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("language-switcher")
                        .long("language-switcher")
                        .help("Add a <language-switcher> to the navigation in App.vue")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("default-language")
                        .long("default-language")
                        .help("Language tag used when no language is present in the URL")
                        .value_name("TAG"),
                )
                .arg(
                    Arg::new("yes")
                        .short('y')
                        .long("yes")
                        .help("Do not ask questions; use configuration and flags")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Show what would change without writing files")
                        .action(ArgAction::SetTrue),
                )
                .arg(verbose_arg()),
        )
        .subcommand(
            Command::new("status")
                .about("Report which parts of the localized wiring are in place")
                .arg(project_dir_arg())
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .help("Output format")
                        .value_parser(["plain", "json"])
                        .default_value("plain"),
                )
                .arg(verbose_arg()),
        )
}

fn project_dir_arg() -> Arg {
    Arg::new("project-dir")
        .help("Root of the Vue CLI project")
        .index(1)
        .default_value(".")
        .value_parser(clap::value_parser!(PathBuf))
}

fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help("Verbose output")
        .action(ArgAction::SetTrue)
}

/// Returns whether the command succeeded
fn run_command(matches: clap::ArgMatches) -> anyhow::Result<bool> {
    match matches.subcommand() {
        Some(("apply", sub_matches)) => cli::commands::apply::handle_apply(sub_matches),
        Some(("status", sub_matches)) => cli::commands::status::handle_status(sub_matches),
        _ => {
            unreachable!("Command parsing should ensure we never reach this");
        }
    }
}
