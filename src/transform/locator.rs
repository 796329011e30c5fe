//! Statement Locator
//!
//! Finds well-known statement shapes in raw source text with line-anchored
//! regular expressions. Nothing here parses JavaScript; every function
//! documents the exact shape it recognises and returns `None` for anything
//! else.

use crate::models::ImportMatch;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Any line that starts an import declaration: `import X`, `import {`,
/// `import *`, `import './side-effect.css'`. Dynamic `import(` is excluded.
static IMPORT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?mR)^[ \t]*import[ \t{*'"].*$"#).unwrap());

/// `import <clause> from ...` on a single line; `clause` stops at the first
/// `from` keyword and never crosses a string quote.
static IMPORT_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?mR)^[ \t]*import\b(?P<clause>[^'"\r\n]*?)\bfrom\b.*$"#).unwrap()
});

/// Locate an import of `symbol`.
///
/// Standalone imports (`import S from 'm'`, `import { S } from 'm'`) win over
/// grouped ones (`import { A, S, B } from 'm'`, `import S, { A } from 'm'`).
/// Occurrences inside a longer identifier never match.
pub fn find_import(text: &str, symbol: &str) -> Option<ImportMatch> {
    find_standalone_import(text, symbol).or_else(|| find_grouped_import(text, symbol))
}

/// `import [{] S [}] from <anything>` spanning a whole line
pub fn find_standalone_import(text: &str, symbol: &str) -> Option<ImportMatch> {
    let pattern = format!(
        r"(?mR)^[ \t]*import[ \t{{]+{}[ \t}}]+from\b.*$",
        regex::escape(symbol)
    );
    let re = Regex::new(&pattern).ok()?;

    re.find(text).map(|m| ImportMatch::Standalone { line: m.range() })
}

/// First single-line import whose binding clause lists `symbol` among other
/// bindings. The reported binding span covers the symbol and one adjacent
/// separator, so cutting it out leaves the sibling bindings intact.
pub fn find_grouped_import(text: &str, symbol: &str) -> Option<ImportMatch> {
    for caps in IMPORT_CLAUSE.captures_iter(text) {
        let (Some(line), Some(clause)) = (caps.get(0), caps.name("clause")) else {
            continue;
        };

        if let Some(binding) = locate_binding(clause.as_str(), symbol) {
            return Some(ImportMatch::Grouped {
                line: line.range(),
                binding: clause.start() + binding.start..clause.start() + binding.end,
            });
        }
    }

    None
}

/// Span of the last import line. An import whose brace list continues on
/// following lines extends to the line holding the closing brace.
pub fn last_import_line(text: &str) -> Option<Range<usize>> {
    let last = IMPORT_LINE.find_iter(text).last()?;
    let line = last.as_str();

    if line.contains('{') && !line.contains('}') {
        if let Some(close) = text[last.end()..].find('}') {
            let close = last.end() + close;
            let end = text[close..]
                .find(['\r', '\n'])
                .map(|offset| close + offset)
                .unwrap_or(text.len());
            return Some(last.start()..end);
        }
    }

    Some(last.range())
}

/// First `host.use(symbol ...)` call, including its argument list.
/// Arguments may span lines but must not contain parentheses.
pub fn find_install_directive(text: &str, host: &str, symbol: &str) -> Option<Range<usize>> {
    let pattern = format!(
        r"\b{}\s*\.\s*use\(\s*{}\b[^)]*\)",
        regex::escape(host),
        regex::escape(symbol)
    );
    let re = Regex::new(&pattern).ok()?;

    re.find(text).map(|m| m.range())
}

/// First `new symbol` expression; the span ends after the symbol name.
pub fn find_construction(text: &str, symbol: &str) -> Option<Range<usize>> {
    let pattern = format!(r"\bnew\s+{}\b", regex::escape(symbol));
    let re = Regex::new(&pattern).ok()?;

    re.find(text).map(|m| m.range())
}

/// The `{ ... }` object literal passed to the first `new host({`.
/// String literals are skipped while balancing braces; `None` when the
/// object is missing or never closed.
pub fn find_root_options(text: &str, host: &str) -> Option<Range<usize>> {
    let pattern = format!(r"\bnew\s+{}\s*\(\s*\{{", regex::escape(host));
    let re = Regex::new(&pattern).ok()?;
    let open = re.find(text)?.end() - 1;

    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (offset, c) in text[open..].char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' | '`' => quote = Some(c),
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open..open + offset + 1);
                }
            }
            _ => {}
        }
    }

    None
}

/// Whether `name` appears as a whole identifier in `text`
pub fn contains_identifier(text: &str, name: &str) -> bool {
    identifier_positions(text, name).next().is_some()
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn identifier_positions<'a>(text: &'a str, name: &'a str) -> impl Iterator<Item = usize> + 'a {
    text.match_indices(name).filter_map(move |(start, _)| {
        let end = start + name.len();
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        let bounded = !before.is_some_and(is_identifier_char) && !after.is_some_and(is_identifier_char);
        bounded.then_some(start)
    })
}

/// Span of `symbol` plus one separator inside an import clause such as
/// ` { A, S, B } ` or ` S, { A } `.
fn locate_binding(clause: &str, symbol: &str) -> Option<Range<usize>> {
    // Namespace imports bind a single name; nothing to excise
    if clause.contains('*') {
        return None;
    }

    for start in identifier_positions(clause, symbol) {
        let end = start + symbol.len();
        let before = clause[..start].trim_end();
        let after = clause[end..].trim_start();

        // `X as S` and `S as X` rename the binding; leave them alone
        if before.ends_with(" as") || after.starts_with("as ") {
            continue;
        }

        if after.starts_with(',') {
            let comma = end + (clause[end..].len() - after.len());
            let rest = &clause[comma + 1..];
            let trailing = rest.len() - rest.trim_start_matches([' ', '\t']).len();
            return Some(start..comma + 1 + trailing);
        }

        if before.ends_with(',') {
            return Some(before.len() - 1..end);
        }

        // Sole member of a named list next to a default binding: `X, { S }`
        if before.ends_with('{') && after.starts_with('}') {
            return Some(start..end);
        }

        // `type S`, `typeof S` and other shapes that are not binding lists
        return None;
    }

    None
}
