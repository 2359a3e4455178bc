use std::sync::OnceLock;

use regex::Regex;

use crate::models::ItemId;

/// Shape of a single script line.
///
/// Produced by [`ScriptLineClassifier::classify`] from the line alone, without
/// reference to scanner state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `    [501] = {`
    ItemHeader(ItemId),
    /// `        identifiedDisplayName = "Red Potion",`
    KeyValue { key: &'a str, value: &'a str },
    /// `        identifiedDescriptionName = {`
    EmbedOpen { key: &'a str },
    /// `            "A potion made from red herbs.",`
    EmbedValue { raw: &'a str },
    /// `function main()` or `main = function()`
    EndMarker,
    Other,
}

struct Patterns {
    item_header: Regex,
    key_value: Regex,
    embed_open: Regex,
    embed_value: Regex,
    end_marker: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        item_header: Regex::new(r"^\s{4,}\[(\d{3,5})\]\s+=\s+\{$").expect("Invalid item header regex"),
        key_value: Regex::new(r#"^\s{4,}(\w+)\s+=\s+("[^\n]*"|\d+|\{[^\n]*\}),?$"#)
            .expect("Invalid key/value regex"),
        embed_open: Regex::new(r"^\s{4,}(\w+)\s+=\s+\{$").expect("Invalid embed open regex"),
        embed_value: Regex::new(r#"^\s{4,}(?:-- )?\s*(?:\w+)?\s*"[^\n]*",?$"#)
            .expect("Invalid embed value regex"),
        end_marker: Regex::new(r"^(?:function\s+main\([^\n]*\)|main\s*=\s*function\([^\n]*\))$")
            .expect("Invalid end marker regex"),
    })
}

/// Removes a trailing `\n` or `\r\n`.
pub fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Classifies item-info script lines.
///
/// Rules are tried in a fixed order and the first match wins. Key/value is
/// tried before embed-open because both share the `key = {` prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptLineClassifier;

impl ScriptLineClassifier {
    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        let line = strip_line_ending(line);
        let p = patterns();

        if let Some(caps) = p.item_header.captures(line)
            && let Some(digits) = caps.get(1)
            && let Ok(id) = ItemId::parse(digits.as_str())
        {
            return LineKind::ItemHeader(id);
        }

        if let Some(caps) = p.key_value.captures(line)
            && let (Some(key), Some(value)) = (caps.get(1), caps.get(2))
        {
            return LineKind::KeyValue {
                key: key.as_str(),
                value: unwrap_value(value.as_str()),
            };
        }

        if let Some(caps) = p.embed_open.captures(line)
            && let Some(key) = caps.get(1)
        {
            return LineKind::EmbedOpen {
                key: key.as_str().trim(),
            };
        }

        if p.embed_value.is_match(line) {
            let raw = line.trim();
            return LineKind::EmbedValue {
                raw: raw.strip_suffix(',').unwrap_or(raw),
            };
        }

        if p.end_marker.is_match(line) {
            return LineKind::EndMarker;
        }

        LineKind::Other
    }
}

/// Strips one level of braces from an inline list, or one level of quotes
/// from a string. Bare integers are returned unchanged.
fn unwrap_value(value: &str) -> &str {
    if let Some(inner) = value.strip_prefix('{').and_then(|v| v.strip_suffix('}')) {
        return inner.trim();
    }
    if value.len() >= 2
        && let Some(inner) = value.strip_prefix('"').and_then(|v| v.strip_suffix('"'))
    {
        return inner;
    }
    value
}
