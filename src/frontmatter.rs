//! Front matter synthesis and heading injection for emitted notes

use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants as C;

/// A line starting with `#` and at least one space
static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^# +").unwrap());

/// Build the `---` delimited front matter block for a note.
///
/// The returned block ends with the closing delimiter and a newline.
pub fn build(id: &str, title: &str, created: &DateTime<Utc>, tags: &[String]) -> String {
    let mut out = String::new();
    out.push_str(C::FRONT_MATTER_DELIMITER);
    out.push('\n');
    out.push_str(&format!("id: {}\n", id));
    out.push_str(&format!("title: {}\n", quote(title)));
    out.push_str(&format!("created: {}\n", iso_timestamp(created)));

    if tags.is_empty() {
        out.push_str(C::EMPTY_TAGS);
        out.push('\n');
    } else {
        out.push_str("tags:\n");
        for tag in tags {
            out.push_str(&format!("  - {}\n", yaml_scalar(tag)));
        }
    }

    out.push_str(C::FRONT_MATTER_DELIMITER);
    out.push('\n');
    out
}

/// Double-quote a string, escaping backslashes, quotes and control characters
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// ISO-8601 in UTC with millisecond precision: `2023-11-14T22:13:20.000Z`
pub fn iso_timestamp(created: &DateTime<Utc>) -> String {
    created.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Render a tag as a YAML scalar, quoting only when a plain scalar would not
/// round-trip. Control characters always take the quoted form, serde_yaml
/// would emit a block scalar that cannot sit inline after `- `.
fn yaml_scalar(tag: &str) -> String {
    if tag.contains(|c: char| c.is_control()) {
        return quote(tag);
    }
    match serde_yaml::to_string(tag) {
        Ok(s) => s.trim_end_matches('\n').to_string(),
        Err(_) => quote(tag),
    }
}

/// Does the raw body already carry a top-level heading line?
pub fn has_heading(body: &str) -> bool {
    HEADING_RE.is_match(body)
}

/// Prepend `# <title>` and a blank line unless the body already has a heading
pub fn ensure_heading(title: &str, body: &str) -> String {
    if has_heading(body) {
        return body.to_string();
    }
    let title = title.lines().next().unwrap_or("").trim();
    let title = if title.is_empty() { C::UNTITLED_NOTE_TITLE } else { title };
    format!("# {}\n\n{}", title, body)
}
