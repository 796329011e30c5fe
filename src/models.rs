use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::path::PathBuf;

/// Where an import of a symbol was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportMatch {
    /// The line imports exactly the symbol; `line` spans the whole line
    Standalone { line: Range<usize> },
    /// The symbol is one of several bindings on the line; `binding` spans the
    /// symbol plus one adjacent separator
    Grouped {
        line: Range<usize>,
        binding: Range<usize>,
    },
}

impl ImportMatch {
    pub fn line(&self) -> &Range<usize> {
        match self {
            ImportMatch::Standalone { line } => line,
            ImportMatch::Grouped { line, .. } => line,
        }
    }

    pub fn is_standalone(&self) -> bool {
        matches!(self, ImportMatch::Standalone { .. })
    }
}

/// A file loaded for transformation. Read once, rewritten in memory, written once.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub original: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: PathBuf, content: String) -> Self {
        Self {
            path,
            original: content.clone(),
            content,
        }
    }

    /// Apply a pure text transform to the buffered content
    pub fn apply(&mut self, transform: impl FnOnce(&str) -> String) {
        self.content = transform(&self.content);
    }

    pub fn is_modified(&self) -> bool {
        self.content != self.original
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Info,
    Warn,
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warn => write!(f, "warn"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
}

impl Diagnostic {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: DiagnosticLevel::Info, message: message.into() }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self { level: DiagnosticLevel::Warn, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: DiagnosticLevel::Error, message: message.into() }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepOutcome {
    Modified,
    Unchanged,
    Skipped,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    Manifest,
    Templates,
    Entry,
    Router,
    Markup,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Manifest => "manifest",
            Step::Templates => "templates",
            Step::Entry => "entry",
            Step::Router => "router",
            Step::Markup => "markup",
        };
        f.pad(name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StepReport {
    pub step: Step,
    pub outcome: StepOutcome,
    pub files: Vec<PathBuf>,
}

/// Everything a generation pass did, in order
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Report {
    pub steps: Vec<StepReport>,
    pub diagnostics: Vec<Diagnostic>,
    pub dry_run: bool,
}

impl Report {
    pub fn record(&mut self, step: Step, outcome: StepOutcome, files: Vec<PathBuf>) {
        self.steps.push(StepReport { step, outcome, files });
    }

    pub fn outcome(&self, step: Step) -> Option<StepOutcome> {
        self.steps.iter().find(|s| s.step == step).map(|s| s.outcome)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.level >= DiagnosticLevel::Warn)
    }

    pub fn modified_files(&self) -> Vec<&PathBuf> {
        self.steps
            .iter()
            .filter(|s| s.outcome == StepOutcome::Modified)
            .flat_map(|s| s.files.iter())
            .collect()
    }
}

/// Source language of the scaffolded project
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScriptKind {
    JavaScript,
    TypeScript,
}

impl ScriptKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ScriptKind::JavaScript => "js",
            ScriptKind::TypeScript => "ts",
        }
    }
}

/// Facts about the target project, detected once before any file is touched
/// and passed to every step that needs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    pub root: PathBuf,
    pub script: ScriptKind,
    /// Major version of the `vue` dependency, when it could be parsed
    pub framework_major: Option<u64>,
}

impl ProjectContext {
    pub fn entry_file(&self) -> PathBuf {
        self.root.join("src").join(format!("main.{}", self.script.extension()))
    }

    pub fn router_file(&self) -> PathBuf {
        self.root
            .join("src")
            .join("router")
            .join(format!("index.{}", self.script.extension()))
    }

    pub fn app_file(&self) -> PathBuf {
        self.root.join("src").join("App.vue")
    }

    pub fn manifest_file(&self) -> PathBuf {
        self.root.join("package.json")
    }
}
