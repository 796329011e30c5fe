//! Tag-level rewrites for single-file components.
//!
//! Regions wrapped in an exclusion tag are swapped for placeholders before a
//! global rename and put back afterwards, so tags nested inside them survive
//! untouched. Exclusion regions pair in order and do not nest.

use crate::config::RouterWiring;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static NAV_DIV: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<div[^>\n]*\bid="nav"[^>\n]*>"#).unwrap());

static ANY_DIV: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<div\b[^>\n]*>").unwrap());

/// A region of the original text hidden behind a placeholder
#[derive(Debug, Clone)]
struct MaskedRegion {
    placeholder: String,
    original: String,
}

/// Rename every `<from_tag ...>` / `</from_tag>` to `to_tag`, except inside
/// `<exclusion_tag> ... </exclusion_tag>` regions.
pub fn rewrite_markup_tag(text: &str, from_tag: &str, to_tag: &str, exclusion_tag: &str) -> String {
    let (masked, regions) = mask_regions(text, exclusion_tag);
    let renamed = rename_tag(&masked, from_tag, to_tag);
    restore_regions(renamed, &regions)
}

/// Whether `tag` still appears outside the exclusion regions
pub fn has_unexcluded_tag(text: &str, tag: &str, exclusion_tag: &str) -> bool {
    let (masked, _) = mask_regions(text, exclusion_tag);
    opening_tag(tag).is_some_and(|re| re.is_match(&masked))
}

fn opening_tag(tag: &str) -> Option<Regex> {
    Regex::new(&format!(r"<{}([\s/>])", regex::escape(tag))).ok()
}

fn closing_tag(tag: &str) -> Option<Regex> {
    Regex::new(&format!(r"</{}(\s*)>", regex::escape(tag))).ok()
}

fn rename_tag(text: &str, from_tag: &str, to_tag: &str) -> String {
    let (Some(open), Some(close)) = (opening_tag(from_tag), closing_tag(from_tag)) else {
        return text.to_string();
    };

    let opened = open.replace_all(text, format!("<{}${{1}}", to_tag).as_str());
    close
        .replace_all(&opened, format!("</{}${{1}}>", to_tag).as_str())
        .into_owned()
}

fn mask_regions(text: &str, exclusion_tag: &str) -> (String, Vec<MaskedRegion>) {
    let (Some(open), Some(close)) = (opening_tag(exclusion_tag), closing_tag(exclusion_tag)) else {
        return (text.to_string(), Vec::new());
    };

    let stamp = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let mut index = 0usize;
    let mut regions = Vec::new();
    let mut masked = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(region) = next_region(text, cursor, &open, &close) {
        let placeholder = loop {
            let candidate = format!("__lang_router_excluded_{}_{}__", index, stamp);
            index += 1;
            if !text.contains(&candidate) {
                break candidate;
            }
        };

        masked.push_str(&text[cursor..region.start]);
        masked.push_str(&placeholder);
        regions.push(MaskedRegion {
            placeholder,
            original: text[region.clone()].to_string(),
        });
        cursor = region.end;
    }

    masked.push_str(&text[cursor..]);
    (masked, regions)
}

/// Next exclusion region at or after `from`: a self-closing tag on its own,
/// otherwise from the opening tag to the first closing tag after it.
fn next_region(text: &str, from: usize, open: &Regex, close: &Regex) -> Option<Range<usize>> {
    let start = open.find_at(text, from)?.start();
    let tag_end = tag_end(text, start)?;

    if text[..tag_end].ends_with("/>") {
        return Some(start..tag_end);
    }

    let end = close.find_at(text, tag_end)?.end();
    Some(start..end)
}

/// Offset just past the `>` closing the tag opened at `start`; a `>` inside a
/// quoted attribute value does not count.
fn tag_end(text: &str, start: usize) -> Option<usize> {
    let mut quote: Option<char> = None;

    for (offset, c) in text[start..].char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(start + offset + 1),
            _ => {}
        }
    }

    None
}

fn restore_regions(mut text: String, regions: &[MaskedRegion]) -> String {
    for region in regions {
        text = text.replacen(&region.placeholder, &region.original, 1);
    }
    text
}

/// The example `<language-switcher>` block, indented by `indent`
pub fn language_switcher_snippet(wiring: &RouterWiring, indent: &str, newline: &str) -> String {
    let lines = [
        format!("<{} v-slot=\"{{ links }}\">", wiring.switcher_tag),
        format!(
            "  <{} :to=\"link.url\" v-for=\"link in links\" :key=\"link.langIndex\">",
            wiring.link_tag
        ),
        "    <span>{{ link.langName }}</span>".to_string(),
        format!("  </{}>", wiring.link_tag),
        format!("</{}>", wiring.switcher_tag),
    ];

    lines
        .iter()
        .map(|line| format!("{}{}{}", newline, indent, line))
        .collect()
}

/// Insert the language switcher right after `<div id="nav">`, or after the
/// first `<div>` when there is no nav.
///
/// Returns the text unchanged when a switcher is already present, and `None`
/// when there is no `<div>` to anchor on.
pub fn insert_language_switcher(text: &str, wiring: &RouterWiring) -> Option<String> {
    if opening_tag(&wiring.switcher_tag).is_some_and(|re| re.is_match(text)) {
        return Some(text.to_string());
    }

    let anchor = NAV_DIV.find(text).or_else(|| ANY_DIV.find(text))?;
    let line_start = text[..anchor.start()].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let base_indent: String = text[line_start..]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect();
    let indent = format!("{}  ", base_indent);
    let newline = super::rewriter::line_ending(text);

    let snippet = language_switcher_snippet(wiring, &indent, newline);

    let mut out = String::with_capacity(text.len() + snippet.len());
    out.push_str(&text[..anchor.end()]);
    out.push_str(&snippet);
    out.push_str(&text[anchor.end()..]);
    Some(out)
}
