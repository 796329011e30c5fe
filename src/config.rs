use crate::Result;
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the optional configuration file looked up in the project root
pub const CONFIG_FILE_NAME: &str = "lang-router.toml";

/// Main configuration structure for the generator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub options: GeneratorOptions,
    pub dependency: DependencyConfig,
    pub router: RouterWiring,
    pub i18n: I18nConfig,
    pub templates: TemplateConfig,
    pub logging: LoggingConfig,
}

/// Boolean switches normally answered through prompts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    pub render_template: bool,
    pub rewrite_router_link: bool,
    pub add_language_switcher: bool,
    pub inject_i18n: bool,
    pub interactive: bool,
}

/// The dependency declared in package.json
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyConfig {
    pub name: String,
    pub version: String,
}

/// Symbols and tags involved in swapping the router for the localized one
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterWiring {
    pub host: String,
    pub from_symbol: String,
    pub to_symbol: String,
    pub package: String,
    pub i18n_symbol: String,
    pub link_tag: String,
    pub localized_link_tag: String,
    pub switcher_tag: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    pub default_language: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory replacing the built-in example templates
    pub dir: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            render_template: true,
            rewrite_router_link: true,
            add_language_switcher: false,
            inject_i18n: true,
            interactive: true,
        }
    }
}

impl Default for DependencyConfig {
    fn default() -> Self {
        Self {
            name: "vue-lang-router".to_string(),
            version: "^1.2.0".to_string(),
        }
    }
}

impl Default for RouterWiring {
    fn default() -> Self {
        Self {
            host: "Vue".to_string(),
            from_symbol: "VueRouter".to_string(),
            to_symbol: "LangRouter".to_string(),
            package: "vue-lang-router".to_string(),
            i18n_symbol: "i18n".to_string(),
            link_tag: "router-link".to_string(),
            localized_link_tag: "localized-link".to_string(),
            switcher_tag: "language-switcher".to_string(),
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(), // pretty, compact, json
        }
    }
}

impl RouterWiring {
    /// `import { LangRouter } from 'vue-lang-router'`
    pub fn router_import_line(&self) -> String {
        format!("import {{ {} }} from '{}'", self.to_symbol, self.package)
    }

    /// `import { i18n } from 'vue-lang-router'`
    pub fn i18n_import_line(&self) -> String {
        format!("import {{ {} }} from '{}'", self.i18n_symbol, self.package)
    }
}

impl Config {
    /// Load configuration with precedence (lowest first):
    /// 1. Default values
    /// 2. lang-router.toml in `dir` (if it exists)
    /// 3. Environment variables (LANG_ROUTER_<SECTION>__<KEY>)
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        let config_file = dir.join(CONFIG_FILE_NAME);
        if config_file.exists() {
            builder = builder.add_source(File::from(config_file));
        }

        builder = builder.add_source(
            Environment::with_prefix("LANG_ROUTER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let loaded = config.try_deserialize::<Config>()?;
        loaded.validate()?;

        Ok(loaded)
    }

    /// Create a Config for tests: non-interactive, everything enabled
    #[cfg(any(test, feature = "test-helpers"))]
    pub fn for_testing() -> Self {
        Self {
            options: GeneratorOptions {
                render_template: true,
                rewrite_router_link: true,
                add_language_switcher: true,
                inject_i18n: true,
                interactive: false,
            },
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: "compact".to_string(),
            },
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("router.host", &self.router.host),
            ("router.from_symbol", &self.router.from_symbol),
            ("router.to_symbol", &self.router.to_symbol),
            ("router.package", &self.router.package),
            ("router.i18n_symbol", &self.router.i18n_symbol),
            ("dependency.name", &self.dependency.name),
            ("i18n.default_language", &self.i18n.default_language),
        ];

        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(crate::PluginError::Configuration(format!(
                    "{} must not be empty",
                    key
                )));
            }
        }

        match self.logging.format.as_str() {
            "pretty" | "compact" | "json" => Ok(()),
            other => Err(crate::PluginError::Configuration(format!(
                "Unknown logging format: {}",
                other
            ))),
        }
    }
}
