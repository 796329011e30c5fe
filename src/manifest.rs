//! package.json access: dependency lookups and declaring one dependency.

use crate::models::ScriptKind;
use crate::{PluginError, Result};
use serde_json::{Map, Value};

const DEPENDENCY_SECTIONS: [&str; 2] = ["dependencies", "devDependencies"];

/// An order-preserving view of package.json
#[derive(Debug, Clone)]
pub struct Manifest {
    root: Map<String, Value>,
}

impl Manifest {
    pub fn parse(content: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(content)? {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(PluginError::Precondition(
                "package.json must contain a JSON object".to_string(),
            )),
        }
    }

    /// Dependency sections, when present, must be objects
    pub fn check_sections(&self) -> Result<()> {
        for section in DEPENDENCY_SECTIONS {
            if self.root.get(section).is_some_and(|deps| !deps.is_object()) {
                return Err(PluginError::Precondition(format!(
                    "\"{}\" in package.json is not an object",
                    section
                )));
            }
        }
        Ok(())
    }

    /// Version specifier of `name` from dependencies or devDependencies
    pub fn dependency(&self, name: &str) -> Option<&str> {
        DEPENDENCY_SECTIONS.iter().find_map(|section| {
            self.root
                .get(*section)
                .and_then(|deps| deps.get(name))
                .and_then(Value::as_str)
        })
    }

    pub fn has_dependency(&self, name: &str) -> bool {
        self.dependency(name).is_some()
    }

    /// Declare `name: version` under dependencies. Returns false when the
    /// identical entry is already there.
    pub fn declare_dependency(&mut self, name: &str, version: &str) -> Result<bool> {
        let deps = self
            .root
            .entry("dependencies")
            .or_insert_with(|| Value::Object(Map::new()));

        let Value::Object(deps) = deps else {
            return Err(PluginError::Internal(
                "\"dependencies\" in package.json is not an object".to_string(),
            ));
        };

        if deps.get(name).and_then(Value::as_str) == Some(version) {
            return Ok(false);
        }

        deps.insert(name.to_string(), Value::String(version.to_string()));
        Ok(true)
    }

    pub fn script_kind(&self) -> ScriptKind {
        if self.has_dependency("@vue/cli-plugin-typescript") || self.has_dependency("typescript") {
            ScriptKind::TypeScript
        } else {
            ScriptKind::JavaScript
        }
    }

    /// Two-space indented JSON with a trailing newline, the way npm writes it
    pub fn to_json_string(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&self.root)?;
        out.push('\n');
        Ok(out)
    }
}

/// Major version out of an npm range such as `^2.6.11`, `~3.0.0`, `>=2`, `2.x`.
/// `None` for tags, URLs and anything else without a leading number.
pub fn parse_major_version(spec: &str) -> Option<u64> {
    let trimmed = spec.trim().trim_start_matches(['^', '~', '=', '>', '<', 'v', ' ']);
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
