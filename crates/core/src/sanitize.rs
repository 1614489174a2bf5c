//! Field sanitization for submitted lead values and form options.
//!
//! Every function here is total: any input, including an empty one, maps to
//! a defined output. Nothing is rejected with an error; callers decide what
//! an empty result means.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidateEmail;

/// `<script>` and `<style>` elements are removed together with their body.
static SCRIPT_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style)[^>]*?>.*?</(script|style)\s*>").expect("valid regex")
});

/// Any remaining tag, comment, or processing instruction.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[a-zA-Z/!?][^>]*>").expect("valid regex"));

/// Runs of whitespace that collapse to one space in single-line text.
static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n\t ]+").expect("valid regex"));

/// How a raw value should be cleaned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind<'a> {
    /// Single-line free text.
    PlainText,
    /// An email address, or nothing.
    Email,
    /// Free text that keeps its line breaks.
    MultilineText,
    /// One of a closed set of values, or nothing.
    EnumeratedChoice(&'a [&'a str]),
}

/// Clean `raw` according to `kind`.
pub fn sanitize(kind: FieldKind<'_>, raw: &str) -> String {
    match kind {
        FieldKind::PlainText => sanitize_text(raw),
        FieldKind::Email => sanitize_email(raw),
        FieldKind::MultilineText => sanitize_multiline(raw),
        FieldKind::EnumeratedChoice(allowed) => sanitize_choice(raw, allowed),
    }
}

/// Parse a rendering limit, falling back to `default` unless it is a
/// positive number.
///
/// Any number above zero is accepted. Fractions are truncated, but never
/// below 1, so `"0.5"` renders as 1.
pub fn positive_integer(raw: &str, default: u32) -> u32 {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<u32>() {
        return if n > 0 { n } else { default };
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => n.clamp(1.0, u32::MAX as f64) as u32,
        _ => default,
    }
}

fn strip_tags(raw: &str) -> String {
    let without_scripts = SCRIPT_STYLE_RE.replace_all(raw, "");
    TAG_RE.replace_all(&without_scripts, "").into_owned()
}

fn sanitize_text(raw: &str) -> String {
    let stripped = strip_tags(raw);
    let collapsed = WHITESPACE_RUN_RE.replace_all(&stripped, " ");
    collapsed
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

fn sanitize_multiline(raw: &str) -> String {
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");
    let stripped = strip_tags(&normalized);
    let kept: String = stripped
        .chars()
        .filter(|c| *c == '\n' || *c == '\t' || !c.is_control())
        .collect();
    kept.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn sanitize_choice(raw: &str, allowed: &[&str]) -> String {
    if allowed.contains(&raw) {
        raw.to_string()
    } else {
        String::new()
    }
}

fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+/=?^_`{|}~.-".contains(c)
}

fn sanitize_email(raw: &str) -> String {
    let trimmed = raw.trim();
    let Some((local, domain)) = trimmed.split_once('@') else {
        return String::new();
    };

    let local: String = local.chars().filter(|c| is_local_char(*c)).collect();
    if local.is_empty() {
        return String::new();
    }

    let labels: Vec<String> = domain
        .split('.')
        .map(|label| {
            label
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
                .collect::<String>()
                .trim_matches('-')
                .to_string()
        })
        .filter(|label| !label.is_empty())
        .collect();
    if labels.len() < 2 {
        return String::new();
    }

    let candidate = format!("{local}@{}", labels.join("."));
    if candidate.validate_email() {
        candidate
    } else {
        String::new()
    }
}
