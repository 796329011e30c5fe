//! Statement Rewriter
//!
//! Pure `&str -> String` transforms built on the locator. Each one is
//! idempotent: feeding its own output back in returns it unchanged.

use super::locator;
use crate::config::RouterWiring;
use crate::models::ImportMatch;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// `, {  }` left behind once the only named binding was cut out
static EMPTY_NAMED_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]*,?[ \t]*\{[ \t]*\}").unwrap());

/// An import clause with no bindings left: `import  from 'x'`
static EMPTY_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*import[ \t]*from\b").unwrap());

/// Options passed to the localized router's install call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallArgs {
    pub default_language: Option<String>,
    pub translations: Option<String>,
    pub localized_urls: Option<String>,
}

impl InstallArgs {
    pub fn is_empty(&self) -> bool {
        self.default_language.is_none() && self.translations.is_none() && self.localized_urls.is_none()
    }

    /// `{ defaultLanguage: 'en', translations, localizedURLs }`, one entry per line
    fn render(&self, newline: &str) -> String {
        let mut entries = Vec::new();
        if let Some(language) = &self.default_language {
            entries.push(format!("defaultLanguage: '{}'", language));
        }
        if let Some(translations) = &self.translations {
            entries.push(shorthand("translations", translations));
        }
        if let Some(urls) = &self.localized_urls {
            entries.push(shorthand("localizedURLs", urls));
        }

        let body: String = entries
            .iter()
            .map(|entry| format!("  {},{}", entry, newline))
            .collect();
        format!("{{{}{}}}", newline, body)
    }
}

fn shorthand(key: &str, value: &str) -> String {
    if key == value {
        key.to_string()
    } else {
        format!("{}: {}", key, value)
    }
}

/// `\r\n` when the text already uses it, `\n` otherwise
pub fn line_ending(text: &str) -> &'static str {
    if text.contains("\r\n") { "\r\n" } else { "\n" }
}

fn splice(text: &str, range: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() + replacement.len());
    out.push_str(&text[..range.start]);
    out.push_str(replacement);
    out.push_str(&text[range.end..]);
    out
}

/// Whether `import_line` is already present as a line of its own.
/// Spacing, quote style and a trailing semicolon do not matter.
pub fn has_import_line(text: &str, import_line: &str) -> bool {
    let wanted = normalize_import(import_line);
    text.lines().any(|line| normalize_import(line) == wanted)
}

/// `import {A,B} from "m";` and `import { A, B } from 'm'` compare equal
fn normalize_import(line: &str) -> String {
    let collapsed = line
        .trim()
        .trim_end_matches(';')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('"', "'");

    let mut out = String::with_capacity(collapsed.len());
    for c in collapsed.chars() {
        if matches!(c, '{' | '}' | ',') && out.ends_with(' ') {
            out.pop();
        }
        if c == ' ' && out.ends_with(['{', '}', ',']) {
            continue;
        }
        out.push(c);
    }
    out
}

/// Make `new_import_line` the import that provides `symbol`.
///
/// 1. Already present verbatim: unchanged.
/// 2. Standalone import of `symbol`: that line is replaced.
/// 3. Grouped import: `symbol` is cut from its line and the new import goes
///    after the last import.
/// 4. Not imported: the new import goes after the last import, or first in
///    the file when there is none.
pub fn add_import(text: &str, symbol: &str, new_import_line: &str) -> String {
    if has_import_line(text, new_import_line) {
        return text.to_string();
    }

    match locator::find_import(text, symbol) {
        Some(ImportMatch::Standalone { line }) => splice(text, line, new_import_line),
        Some(ImportMatch::Grouped { line, binding }) => {
            let excised = excise_binding(text, line, binding);
            insert_after_last_import(&excised, new_import_line)
        }
        None => insert_after_last_import(text, new_import_line),
    }
}

/// Remove one binding from an import line. A line left without any binding
/// is dropped together with its line terminator.
fn excise_binding(text: &str, line: Range<usize>, binding: Range<usize>) -> String {
    let line_text = &text[line.clone()];
    let relative = binding.start - line.start..binding.end - line.start;

    let mut rewritten = String::with_capacity(line_text.len());
    rewritten.push_str(&line_text[..relative.start]);
    rewritten.push_str(&line_text[relative.end..]);
    let rewritten = EMPTY_NAMED_GROUP.replace(&rewritten, "").into_owned();

    if EMPTY_CLAUSE.is_match(&rewritten) {
        let end = match &text[line.end..] {
            rest if rest.starts_with("\r\n") => line.end + 2,
            rest if rest.starts_with('\n') => line.end + 1,
            _ => line.end,
        };
        return splice(text, line.start..end, "");
    }

    splice(text, line, &rewritten)
}

/// Insert `line` right after the last import line, or prepend it
pub fn insert_after_last_import(text: &str, line: &str) -> String {
    let newline = line_ending(text);

    match locator::last_import_line(text) {
        Some(last) => splice(text, last.end..last.end, &format!("{}{}", newline, line)),
        None => format!("{}{}{}", line, newline, text),
    }
}

/// Swap the first install directive and the first construction statement
/// from the stock router to the localized one.
///
/// `Vue.use(VueRouter)` becomes `Vue.use(LangRouter)`, or
/// `Vue.use(LangRouter, { ... })` when `args` is not empty, and
/// `new VueRouter` becomes `new LangRouter`. Only the first match of each is
/// touched; a project has one router.
pub fn replace_install_directive(text: &str, wiring: &RouterWiring, args: &InstallArgs) -> String {
    let installed = replace_install_call(text, wiring, args);
    replace_construction(&installed, wiring)
}

fn replace_install_call(text: &str, wiring: &RouterWiring, args: &InstallArgs) -> String {
    let Some(range) = locator::find_install_directive(text, &wiring.host, &wiring.from_symbol) else {
        return text.to_string();
    };

    let call = if args.is_empty() {
        format!("{}.use({})", wiring.host, wiring.to_symbol)
    } else {
        format!(
            "{}.use({}, {})",
            wiring.host,
            wiring.to_symbol,
            args.render(line_ending(text))
        )
    };

    splice(text, range, &call)
}

fn replace_construction(text: &str, wiring: &RouterWiring) -> String {
    match locator::find_construction(text, &wiring.from_symbol) {
        Some(range) => splice(text, range, &format!("new {}", wiring.to_symbol)),
        None => text.to_string(),
    }
}

/// Add `option` as the first property of the root `new host({ ... })`
/// options object. Unchanged when the property is already there or the
/// root instance cannot be found.
pub fn inject_root_option(text: &str, host: &str, option: &str) -> String {
    let Some(object) = locator::find_root_options(text, host) else {
        return text.to_string();
    };

    if locator::contains_identifier(&text[object.clone()], option) {
        return text.to_string();
    }

    let newline = line_ending(text);
    let after_brace = object.start + 1;
    let rest = &text[after_brace..object.end];

    let insertion = if rest.starts_with(newline) {
        let next_line = &rest[newline.len()..];
        let indent: String = next_line
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .collect();
        let indent = if indent.is_empty() || next_line[indent.len()..].starts_with('}') {
            "  ".to_string()
        } else {
            indent
        };
        format!("{}{}{},", newline, indent, option)
    } else {
        format!(" {},", option)
    };

    splice(text, after_brace..after_brace, &insertion)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LANG_ROUTER_IMPORT: &str = "import { LangRouter } from 'vue-lang-router'";

    fn wiring() -> RouterWiring {
        RouterWiring::default()
    }

    #[test]
    fn test_standalone_import_is_replaced_in_place() {
        let text = "import Vue from 'vue'\nimport VueRouter from 'vue-router'\nimport Home from '../views/Home.vue'\n";
        let out = add_import(text, "VueRouter", LANG_ROUTER_IMPORT);

        assert_eq!(
            out,
            "import Vue from 'vue'\nimport { LangRouter } from 'vue-lang-router'\nimport Home from '../views/Home.vue'\n"
        );
    }

    #[test]
    fn test_grouped_import_excises_only_the_symbol() {
        let text = "import { A, Target, B } from 'm'\nconst x = 1\n";
        let out = add_import(text, "Target", "import { Target } from 'n'");

        assert_eq!(out, "import { A, B } from 'm'\nimport { Target } from 'n'\nconst x = 1\n");
    }

    #[test]
    fn test_grouped_last_binding() {
        let text = "import { A, Target } from 'm'\n";
        let out = add_import(text, "Target", "import { Target } from 'n'");

        assert_eq!(out, "import { A } from 'm'\nimport { Target } from 'n'\n");
    }

    #[test]
    fn test_typescript_router_import() {
        let text = "import Vue from 'vue'\nimport VueRouter, { RouteConfig } from 'vue-router'\nimport Home from '../views/Home.vue'\n";
        let out = add_import(text, "VueRouter", LANG_ROUTER_IMPORT);

        assert_eq!(
            out,
            "import Vue from 'vue'\nimport { RouteConfig } from 'vue-router'\nimport Home from '../views/Home.vue'\nimport { LangRouter } from 'vue-lang-router'\n"
        );
    }

    #[test]
    fn test_emptied_named_group_is_removed() {
        let text = "import Vue, { i18n } from 'vue'\n";
        let out = add_import(text, "i18n", "import { i18n } from 'vue-lang-router'");

        assert_eq!(out, "import Vue from 'vue'\nimport { i18n } from 'vue-lang-router'\n");
    }

    #[test]
    fn test_line_without_bindings_is_dropped() {
        let text = "import { i18n, } from './old'\nimport Vue from 'vue'\n";
        let out = add_import(text, "i18n", "import { i18n } from 'vue-lang-router'");

        assert_eq!(out, "import Vue from 'vue'\nimport { i18n } from 'vue-lang-router'\n");
    }

    #[test]
    fn test_type_only_import_is_left_intact() {
        let text = "import Vue from 'vue'\nimport type VueRouter from 'vue-router'\n";
        let out = add_import(text, "VueRouter", LANG_ROUTER_IMPORT);

        assert_eq!(
            out,
            "import Vue from 'vue'\nimport type VueRouter from 'vue-router'\nimport { LangRouter } from 'vue-lang-router'\n"
        );
    }

    #[test]
    fn test_missing_symbol_goes_after_last_import() {
        let text = "import Vue from 'vue'\nimport App from './App.vue'\n\nnew Vue({})\n";
        let out = add_import(text, "i18n", "import { i18n } from 'vue-lang-router'");

        assert_eq!(
            out,
            "import Vue from 'vue'\nimport App from './App.vue'\nimport { i18n } from 'vue-lang-router'\n\nnew Vue({})\n"
        );
    }

    #[test]
    fn test_no_imports_prepends() {
        let text = "const a = 1\n";
        let out = add_import(text, "i18n", "import { i18n } from 'vue-lang-router'");

        assert_eq!(out, "import { i18n } from 'vue-lang-router'\nconst a = 1\n");
    }

    #[test]
    fn test_add_import_is_idempotent() {
        let inputs = [
            "import VueRouter from 'vue-router'\n",
            "import { A, VueRouter, B } from 'm'\n",
            "const a = 1\n",
            "",
        ];

        for input in inputs {
            let once = add_import(input, "VueRouter", LANG_ROUTER_IMPORT);
            let twice = add_import(&once, "VueRouter", LANG_ROUTER_IMPORT);
            assert_eq!(once, twice, "not idempotent for {:?}", input);
            assert_eq!(once.matches(LANG_ROUTER_IMPORT).count(), 1);
        }
    }

    #[test]
    fn test_existing_line_with_semicolon_counts_as_present() {
        let text = "import { LangRouter } from 'vue-lang-router';\n";
        assert_eq!(add_import(text, "VueRouter", LANG_ROUTER_IMPORT), text);
    }

    #[test]
    fn test_existing_import_with_other_spacing_counts_as_present() {
        let text = "import Vue from 'vue'\nimport {LangRouter} from 'vue-lang-router'\nimport VueRouter from 'vue-router'\n";
        assert_eq!(add_import(text, "VueRouter", LANG_ROUTER_IMPORT), text);

        assert!(has_import_line("import {  LangRouter  } from \"vue-lang-router\";", LANG_ROUTER_IMPORT));
        assert!(!has_import_line("import { LangRouter, x } from 'vue-lang-router'", LANG_ROUTER_IMPORT));
    }

    #[test]
    fn test_crlf_is_preserved() {
        let text = "import Vue from 'vue'\r\nconst a = 1\r\n";
        let out = add_import(text, "i18n", "import { i18n } from 'vue-lang-router'");

        assert_eq!(out, "import Vue from 'vue'\r\nimport { i18n } from 'vue-lang-router'\r\nconst a = 1\r\n");
    }

    #[test]
    fn test_replace_install_directive_end_to_end() {
        let text = "import Vue from 'vue'\nimport VueRouter from 'vue-router'\n\nVue.use(VueRouter)\n\nconst router = new VueRouter({\n  routes\n})\n\nexport default router\n";
        let imported = add_import(text, "VueRouter", LANG_ROUTER_IMPORT);
        let out = replace_install_directive(&imported, &wiring(), &InstallArgs::default());

        assert_eq!(
            out,
            "import Vue from 'vue'\nimport { LangRouter } from 'vue-lang-router'\n\nVue.use(LangRouter)\n\nconst router = new LangRouter({\n  routes\n})\n\nexport default router\n"
        );
        assert_eq!(replace_install_directive(&out, &wiring(), &InstallArgs::default()), out);
    }

    #[test]
    fn test_replace_install_directive_with_arguments() {
        let args = InstallArgs {
            default_language: Some("en".to_string()),
            translations: Some("translations".to_string()),
            localized_urls: Some("localizedURLs".to_string()),
        };
        let out = replace_install_directive("Vue.use(VueRouter)\n", &wiring(), &args);

        assert_eq!(
            out,
            "Vue.use(LangRouter, {\n  defaultLanguage: 'en',\n  translations,\n  localizedURLs,\n})\n"
        );
        assert_eq!(replace_install_directive(&out, &wiring(), &args), out);
    }

    #[test]
    fn test_only_first_occurrence_is_replaced() {
        let text = "Vue.use(VueRouter)\nVue.use(VueRouter)\nnew VueRouter()\nnew VueRouter()\n";
        let out = replace_install_directive(text, &wiring(), &InstallArgs::default());

        assert_eq!(out, "Vue.use(LangRouter)\nVue.use(VueRouter)\nnew LangRouter()\nnew VueRouter()\n");
    }

    #[test]
    fn test_inject_root_option() {
        let text = "new Vue({\n  router,\n  render: h => h(App)\n}).$mount('#app')\n";
        let out = inject_root_option(text, "Vue", "i18n");

        assert_eq!(out, "new Vue({\n  i18n,\n  router,\n  render: h => h(App)\n}).$mount('#app')\n");
        assert_eq!(inject_root_option(&out, "Vue", "i18n"), out);
    }

    #[test]
    fn test_inject_root_option_inline_and_missing() {
        assert_eq!(inject_root_option("new Vue({ router })", "Vue", "i18n"), "new Vue({ i18n, router })");
        assert_eq!(inject_root_option("createApp(App)", "Vue", "i18n"), "createApp(App)");
    }
}
