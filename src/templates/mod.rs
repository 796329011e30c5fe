pub mod builtin;

use crate::config::Config;
use crate::filesystem::FileSystem;
use crate::models::ProjectContext;
use crate::{PluginError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use walkdir::WalkDir;

/// A template before placeholder substitution; `relative` may hold placeholders too
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    pub relative: String,
    pub content: String,
}

/// Files written and files left alone because they already existed
#[derive(Debug, Clone, Default)]
pub struct RenderSummary {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

pub fn replace_placeholders(template: &str, variables: &BTreeMap<String, String>) -> String {
    variables.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{{{}}}}}", key), value)
    })
}

/// Key/value set available to every template
pub fn template_variables(config: &Config, context: &ProjectContext) -> BTreeMap<String, String> {
    let options = &config.options;
    let now = chrono::Utc::now();

    [
        ("DEFAULT_LANGUAGE", config.i18n.default_language.clone()),
        ("SCRIPT_EXT", context.script.extension().to_string()),
        ("PACKAGE", config.router.package.clone()),
        ("ROUTER_SYMBOL", config.router.to_symbol.clone()),
        ("LINK_TAG", config.router.localized_link_tag.clone()),
        ("SWITCHER_TAG", config.router.switcher_tag.clone()),
        ("RENDER_TEMPLATE", options.render_template.to_string()),
        ("REWRITE_ROUTER_LINK", options.rewrite_router_link.to_string()),
        ("ADD_LANGUAGE_SWITCHER", options.add_language_switcher.to_string()),
        ("YEAR", now.format("%Y").to_string()),
        ("DATE", now.format("%Y-%m-%d").to_string()),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect()
}

/// Read every file under `dir` as a template, keyed by its path relative to `dir`
pub fn load_template_dir(dir: &Path) -> Result<Vec<TemplateSource>> {
    if !dir.is_dir() {
        return Err(PluginError::Template(format!(
            "Template directory not found: {}",
            dir.display()
        )));
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(dir)
            .map_err(|e| PluginError::Template(e.to_string()))?;
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        let content = std::fs::read_to_string(entry.path())?;
        sources.push(TemplateSource { relative, content });
    }

    Ok(sources)
}

/// Built-in templates, or the configured template directory when set
pub fn resolve_sources(config: &Config) -> Result<Vec<TemplateSource>> {
    match &config.templates.dir {
        Some(dir) => load_template_dir(dir),
        None => Ok(builtin::example_templates()),
    }
}

/// Materialize `sources` under `root`. Existing files are never overwritten;
/// nothing is written when `dry_run` is set.
#[instrument(skip(fs, sources, variables), fields(count = sources.len()))]
pub fn render<F: FileSystem>(
    fs: &F,
    root: &Path,
    sources: &[TemplateSource],
    variables: &BTreeMap<String, String>,
    dry_run: bool,
) -> Result<RenderSummary> {
    let mut summary = RenderSummary::default();

    for source in sources {
        let target = root.join(replace_placeholders(&source.relative, variables));

        if fs.exists(&target) {
            debug!("Keeping existing {}", target.display());
            summary.skipped.push(target);
            continue;
        }

        if !dry_run {
            if let Some(parent) = target.parent() {
                fs.create_dir_all(parent)?;
            }
            fs.write(&target, &replace_placeholders(&source.content, variables))?;
        }

        debug!("Rendered {}", target.display());
        summary.written.push(target);
    }

    Ok(summary)
}
