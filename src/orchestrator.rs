//! Sequences the generation pass over a project.
//!
//! Preconditions are checked first and abort the pass. After that each step
//! loads its file, runs pure text transforms on it and writes it once; a
//! step that cannot find its file reports a warning and the next step runs
//! regardless.

use crate::config::Config;
use crate::filesystem::FileSystem;
use crate::manifest::{Manifest, parse_major_version};
use crate::models::{Diagnostic, DiagnosticLevel, ProjectContext, Report, SourceFile, Step, StepOutcome};
use crate::templates::{self, builtin};
use crate::transform::{self, InstallArgs, locator, markup};
use crate::{PluginError, Result};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument, warn};

/// Only Vue 2 exposes `Vue.use` for router plugins
pub const SUPPORTED_FRAMEWORK_MAJOR: u64 = 2;

const ROUTER_DEPENDENCY: &str = "vue-router";
const FRAMEWORK_DEPENDENCY: &str = "vue";

pub struct Orchestrator<'a, F: FileSystem> {
    config: &'a Config,
    fs: F,
    dry_run: bool,
}

impl<'a, F: FileSystem> Orchestrator<'a, F> {
    pub fn new(config: &'a Config, fs: F) -> Self {
        Self {
            config,
            fs,
            dry_run: false,
        }
    }

    /// Compute every change without writing anything
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run the whole pass over the project at `root`
    #[instrument(skip(self), fields(dry_run = self.dry_run))]
    pub fn run(&self, root: &Path) -> Result<Report> {
        let mut report = Report {
            dry_run: self.dry_run,
            ..Report::default()
        };

        let (context, manifest) = self.check_preconditions(root, &mut report)?;
        info!(
            script = context.script.extension(),
            framework_major = ?context.framework_major,
            "Preconditions satisfied"
        );

        self.manifest_step(&context, manifest, &mut report)?;
        let templates_rendered = self.templates_step(&context, &mut report);
        self.entry_step(&context, &mut report);
        self.router_step(&context, templates_rendered, &mut report);
        self.markup_step(&context, &mut report);

        Ok(report)
    }

    /// Read package.json and decide whether the project can be wired at all.
    /// Nothing is written before this succeeds.
    pub fn check_preconditions(&self, root: &Path, report: &mut Report) -> Result<(ProjectContext, Manifest)> {
        let manifest_path = root.join("package.json");
        let content = self.fs.read_to_string(&manifest_path).map_err(|e| {
            PluginError::Precondition(format!(
                "Cannot read {} ({}); run this inside a Vue CLI project",
                manifest_path.display(),
                e
            ))
        })?;

        let manifest = Manifest::parse(&content).map_err(|e| match e {
            PluginError::Json(e) => PluginError::Precondition(format!("Invalid package.json: {}", e)),
            other => other,
        })?;
        manifest.check_sections()?;

        if !manifest.has_dependency(ROUTER_DEPENDENCY) {
            return Err(PluginError::Precondition(format!(
                "{} is not installed; add the router plugin first (vue add router)",
                ROUTER_DEPENDENCY
            )));
        }

        let Some(framework) = manifest.dependency(FRAMEWORK_DEPENDENCY) else {
            return Err(PluginError::Precondition(format!(
                "{} is not a dependency of this project",
                FRAMEWORK_DEPENDENCY
            )));
        };

        let framework_major = parse_major_version(framework);
        match framework_major {
            Some(major) if major != SUPPORTED_FRAMEWORK_MAJOR => {
                return Err(PluginError::Precondition(format!(
                    "{} {} is not supported; {} requires Vue {}",
                    FRAMEWORK_DEPENDENCY, framework, self.config.dependency.name, SUPPORTED_FRAMEWORK_MAJOR
                )));
            }
            Some(_) => {}
            None => self.emit(
                report,
                Diagnostic::warn(format!(
                    "Could not read the Vue version from \"{}\"; assuming Vue {}",
                    framework, SUPPORTED_FRAMEWORK_MAJOR
                )),
            ),
        }

        let context = ProjectContext {
            root: root.to_path_buf(),
            script: manifest.script_kind(),
            framework_major,
        };

        Ok((context, manifest))
    }

    #[instrument(skip_all)]
    fn manifest_step(&self, context: &ProjectContext, mut manifest: Manifest, report: &mut Report) -> Result<()> {
        let path = context.manifest_file();
        let dependency = &self.config.dependency;

        if !manifest.declare_dependency(&dependency.name, &dependency.version)? {
            self.emit(report, Diagnostic::info(format!("{} is already declared", dependency.name)));
            report.record(Step::Manifest, StepOutcome::Unchanged, vec![path]);
            return Ok(());
        }

        let outcome = self.write(&path, &manifest.to_json_string()?, report);
        if outcome == StepOutcome::Modified {
            self.emit(
                report,
                Diagnostic::info(format!("Added {}@{} to package.json", dependency.name, dependency.version)),
            );
        }
        report.record(Step::Manifest, outcome, vec![path]);
        Ok(())
    }

    /// Returns whether the example translation modules exist afterwards
    #[instrument(skip_all)]
    fn templates_step(&self, context: &ProjectContext, report: &mut Report) -> bool {
        if !self.config.options.render_template {
            report.record(Step::Templates, StepOutcome::Skipped, Vec::new());
            return false;
        }

        let sources = match templates::resolve_sources(self.config) {
            Ok(sources) => sources,
            Err(e) => {
                self.emit(report, Diagnostic::error(format!("{}; example files were not added", e)));
                report.record(Step::Templates, StepOutcome::Skipped, Vec::new());
                return false;
            }
        };

        let variables = templates::template_variables(self.config, context);
        let summary = match templates::render(&self.fs, &context.root, &sources, &variables, self.dry_run) {
            Ok(summary) => summary,
            Err(e) => {
                self.emit(report, Diagnostic::error(format!("Rendering example files failed: {}", e)));
                report.record(Step::Templates, StepOutcome::Skipped, Vec::new());
                return false;
            }
        };

        for skipped in &summary.skipped {
            self.emit(
                report,
                Diagnostic::info(format!("{} already exists, left as is", display_relative(skipped, &context.root))),
            );
        }

        let outcome = if summary.written.is_empty() {
            StepOutcome::Unchanged
        } else {
            StepOutcome::Modified
        };
        report.record(Step::Templates, outcome, summary.written);

        // A custom template directory may not provide the modules the router imports
        self.config.templates.dir.is_none()
    }

    #[instrument(skip_all)]
    fn entry_step(&self, context: &ProjectContext, report: &mut Report) {
        if !self.config.options.inject_i18n {
            report.record(Step::Entry, StepOutcome::Skipped, Vec::new());
            return;
        }

        let path = context.entry_file();
        let Some(mut file) = self.load(&path, report, "make sure to import i18n manually!") else {
            report.record(Step::Entry, StepOutcome::Skipped, vec![path]);
            return;
        };

        let wiring = &self.config.router;
        let import_line = wiring.i18n_import_line();
        file.apply(|text| transform::add_import(text, &wiring.i18n_symbol, &import_line));

        if locator::find_root_options(&file.content, &wiring.host).is_some() {
            file.apply(|text| transform::inject_root_option(text, &wiring.host, &wiring.i18n_symbol));
        } else {
            self.emit(
                report,
                Diagnostic::warn(format!(
                    "Root `new {}({{ ... }})` not found in {}; add `{}` to its options manually",
                    wiring.host,
                    display_relative(&path, &context.root),
                    wiring.i18n_symbol
                )),
            );
        }

        let outcome = self.save(&file, report);
        report.record(Step::Entry, outcome, vec![path]);
    }

    #[instrument(skip_all)]
    fn router_step(&self, context: &ProjectContext, templates_rendered: bool, report: &mut Report) {
        let path = context.router_file();
        let wiring = &self.config.router;
        let Some(mut file) = self.load(&path, report, &format!("make sure to add {} manually!", wiring.to_symbol)) else {
            report.record(Step::Router, StepOutcome::Skipped, vec![path]);
            return;
        };

        let import_line = wiring.router_import_line();
        file.apply(|text| transform::add_import(text, &wiring.from_symbol, &import_line));

        let args = if templates_rendered {
            for (symbol, line) in builtin::router_imports() {
                file.apply(|text| transform::add_import(text, symbol, line));
            }
            InstallArgs {
                default_language: Some(self.config.i18n.default_language.clone()),
                translations: Some("translations".to_string()),
                localized_urls: Some("localizedURLs".to_string()),
            }
        } else {
            InstallArgs::default()
        };

        file.apply(|text| transform::replace_install_directive(text, wiring, &args));

        let relative = display_relative(&path, &context.root);
        if locator::find_install_directive(&file.content, &wiring.host, &wiring.to_symbol).is_none() {
            self.emit(
                report,
                Diagnostic::warn(format!(
                    "{}.use({}) not found in {}; register {} manually",
                    wiring.host, wiring.from_symbol, relative, wiring.to_symbol
                )),
            );
        } else if !templates_rendered {
            self.emit(
                report,
                Diagnostic::info(format!(
                    "Pass your translations to {}.use({}, {{ ... }}) in {}",
                    wiring.host, wiring.to_symbol, relative
                )),
            );
        }

        if locator::find_construction(&file.content, &wiring.to_symbol).is_none() {
            self.emit(
                report,
                Diagnostic::warn(format!(
                    "new {} not found in {}; construct {} manually",
                    wiring.from_symbol, relative, wiring.to_symbol
                )),
            );
        }

        let outcome = self.save(&file, report);
        report.record(Step::Router, outcome, vec![path]);
    }

    #[instrument(skip_all)]
    fn markup_step(&self, context: &ProjectContext, report: &mut Report) {
        let options = &self.config.options;
        if !options.rewrite_router_link && !options.add_language_switcher {
            report.record(Step::Markup, StepOutcome::Skipped, Vec::new());
            return;
        }

        let path = context.app_file();
        let wiring = &self.config.router;
        let Some(mut file) = self.load(&path, report, &format!("skipping <{}> changes.", wiring.link_tag)) else {
            report.record(Step::Markup, StepOutcome::Skipped, vec![path]);
            return;
        };

        if options.rewrite_router_link {
            file.apply(|text| {
                markup::rewrite_markup_tag(text, &wiring.link_tag, &wiring.localized_link_tag, &wiring.switcher_tag)
            });
        }

        if options.add_language_switcher {
            match markup::insert_language_switcher(&file.content, wiring) {
                Some(content) => file.content = content,
                None => self.emit(
                    report,
                    Diagnostic::warn(format!(
                        "No <div> found in {}; add <{}> manually",
                        display_relative(&path, &context.root),
                        wiring.switcher_tag
                    )),
                ),
            }
        }

        let outcome = self.save(&file, report);
        report.record(Step::Markup, outcome, vec![path]);
    }

    /// Read a file for a step; a failure becomes a warning naming the manual remedy
    fn load(&self, path: &Path, report: &mut Report, remedy: &str) -> Option<SourceFile> {
        match self.fs.read_to_string(path) {
            Ok(content) => Some(SourceFile::new(path.to_path_buf(), content)),
            Err(e) => {
                let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
                let reason = if e.kind() == io::ErrorKind::NotFound {
                    "not found".to_string()
                } else {
                    format!("unreadable ({})", e)
                };
                self.emit(report, Diagnostic::warn(format!("{} {}, {}", name, reason, remedy)));
                None
            }
        }
    }

    fn save(&self, file: &SourceFile, report: &mut Report) -> StepOutcome {
        if !file.is_modified() {
            debug!("{} already up to date", file.path.display());
            return StepOutcome::Unchanged;
        }
        self.write(&file.path, &file.content, report)
    }

    fn write(&self, path: &Path, content: &str, report: &mut Report) -> StepOutcome {
        if self.dry_run {
            debug!("Dry run: not writing {}", path.display());
            return StepOutcome::Modified;
        }

        match self.fs.write(path, content) {
            Ok(()) => StepOutcome::Modified,
            Err(e) => {
                self.emit(report, Diagnostic::error(format!("Failed to write {}: {}", path.display(), e)));
                StepOutcome::Skipped
            }
        }
    }

    fn emit(&self, report: &mut Report, diagnostic: Diagnostic) {
        match diagnostic.level {
            DiagnosticLevel::Info => info!("{}", diagnostic.message),
            DiagnosticLevel::Warn => warn!("{}", diagnostic.message),
            DiagnosticLevel::Error => error!("{}", diagnostic.message),
        }
        report.diagnostics.push(diagnostic);
    }
}

pub fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .map(PathBuf::from)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
