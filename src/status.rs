//! Read-only report of which parts of the localized wiring are in place.

use crate::config::Config;
use crate::filesystem::FileSystem;
use crate::manifest::Manifest;
use crate::models::{ProjectContext, ScriptKind};
use crate::transform::{locator, markup, rewriter};
use crate::{PluginError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    Done,
    Pending,
    /// The file the check needs does not exist
    Missing,
}

#[derive(Serialize, Debug, Clone)]
pub struct WiringCheck {
    pub name: &'static str,
    pub file: PathBuf,
    pub state: CheckState,
}

#[derive(Serialize, Debug, Clone)]
pub struct WiringStatus {
    pub script: ScriptKind,
    pub checks: Vec<WiringCheck>,
}

impl WiringStatus {
    pub fn is_complete(&self) -> bool {
        self.checks.iter().all(|c| c.state == CheckState::Done)
    }

    pub fn pending(&self) -> impl Iterator<Item = &WiringCheck> {
        self.checks.iter().filter(|c| c.state != CheckState::Done)
    }
}

/// Inspect the project at `root` without modifying anything
pub fn inspect<F: FileSystem>(fs: &F, config: &Config, root: &Path) -> Result<WiringStatus> {
    let manifest_path = root.join("package.json");
    let manifest = Manifest::parse(&fs.read_to_string(&manifest_path).map_err(|e| {
        PluginError::Precondition(format!("Cannot read {}: {}", manifest_path.display(), e))
    })?)?;

    let context = ProjectContext {
        root: root.to_path_buf(),
        script: manifest.script_kind(),
        framework_major: None,
    };
    let wiring = &config.router;
    let mut checks = Vec::new();

    checks.push(WiringCheck {
        name: "dependency declared",
        file: manifest_path,
        state: state_of(manifest.has_dependency(&config.dependency.name)),
    });

    let router = context.router_file();
    let router_text = fs.read_to_string(&router).ok();
    let router_checks: [(&'static str, fn(&str, &Config) -> bool); 3] = [
        ("router import", |text, config| {
            rewriter::has_import_line(text, &config.router.router_import_line())
        }),
        ("install directive", |text, config| {
            locator::find_install_directive(text, &config.router.host, &config.router.to_symbol).is_some()
        }),
        ("router construction", |text, config| {
            locator::find_construction(text, &config.router.to_symbol).is_some()
        }),
    ];
    for (name, check) in router_checks {
        checks.push(file_check(name, &router, router_text.as_deref(), |text| check(text, config)));
    }

    let entry = context.entry_file();
    let entry_text = fs.read_to_string(&entry).ok();
    checks.push(file_check("i18n import", &entry, entry_text.as_deref(), |text| {
        rewriter::has_import_line(text, &wiring.i18n_import_line())
    }));
    checks.push(file_check("i18n root option", &entry, entry_text.as_deref(), |text| {
        locator::find_root_options(text, &wiring.host)
            .is_some_and(|object| locator::contains_identifier(&text[object], &wiring.i18n_symbol))
    }));

    let app = context.app_file();
    let app_text = fs.read_to_string(&app).ok();
    if config.options.rewrite_router_link {
        checks.push(file_check("links localized", &app, app_text.as_deref(), |text| {
            !markup::has_unexcluded_tag(text, &wiring.link_tag, &wiring.switcher_tag)
        }));
    }
    if config.options.add_language_switcher {
        checks.push(file_check("language switcher", &app, app_text.as_deref(), |text| {
            text.contains(&format!("<{}", wiring.switcher_tag))
        }));
    }

    Ok(WiringStatus {
        script: context.script,
        checks,
    })
}

fn state_of(done: bool) -> CheckState {
    if done { CheckState::Done } else { CheckState::Pending }
}

fn file_check(
    name: &'static str,
    file: &Path,
    text: Option<&str>,
    check: impl FnOnce(&str) -> bool,
) -> WiringCheck {
    WiringCheck {
        name,
        file: file.to_path_buf(),
        state: text.map_or(CheckState::Missing, |text| state_of(check(text))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::OsFileSystem;
    use crate::orchestrator::Orchestrator;
    use crate::test_helpers::TestProject;

    #[test]
    fn test_fresh_project_is_pending() {
        let project = TestProject::vue_cli().unwrap();
        let config = Config::for_testing();

        let status = inspect(&OsFileSystem, &config, project.root()).unwrap();

        assert!(!status.is_complete());
        assert_eq!(status.script, ScriptKind::JavaScript);
        assert!(status.checks.iter().all(|c| c.state == CheckState::Pending));
    }

    #[test]
    fn test_complete_after_apply() {
        let project = TestProject::vue_cli().unwrap();
        let config = Config::for_testing();

        Orchestrator::new(&config, OsFileSystem).run(project.root()).unwrap();
        let status = inspect(&OsFileSystem, &config, project.root()).unwrap();

        let pending: Vec<_> = status.pending().map(|c| c.name).collect();
        assert!(status.is_complete(), "pending checks: {:?}", pending);
    }

    #[test]
    fn test_hand_written_import_counts_as_done() {
        let project = TestProject::vue_cli().unwrap();
        project
            .write_file(
                "src/router/index.js",
                "import Vue from 'vue'\nimport {LangRouter} from \"vue-lang-router\";\n\nVue.use(LangRouter)\n",
            )
            .unwrap();
        let config = Config::for_testing();

        let status = inspect(&OsFileSystem, &config, project.root()).unwrap();

        let import = status.checks.iter().find(|c| c.name == "router import").unwrap();
        assert_eq!(import.state, CheckState::Done);
        let install = status.checks.iter().find(|c| c.name == "install directive").unwrap();
        assert_eq!(install.state, CheckState::Done);
    }

    #[test]
    fn test_missing_files_are_reported() {
        let project = TestProject::new().unwrap();
        project.write_file("package.json", "{}").unwrap();
        let config = Config::for_testing();

        let status = inspect(&OsFileSystem, &config, project.root()).unwrap();

        let router = status.checks.iter().find(|c| c.name == "router import").unwrap();
        assert_eq!(router.state, CheckState::Missing);
    }
}
