//! Plain text from the HTML fragments the dictionary returns as entry bodies.
use regex::{Captures, Regex};
use smol_str::SmolStr;
use std::sync::OnceLock;

fn breaks() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)<br\s*/?>|</(?:p|div|li|tr|td|h[1-6])\s*>").expect("valid regex")
    })
}

fn tags() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"))
}

fn entities() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("valid regex"))
}

fn italics() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<(?:i|em)(?:\s[^>]*)?>(.*?)</(?:i|em)\s*>").expect("valid regex")
    })
}

fn decode_entity(caps: &Captures) -> String {
    let name = &caps[1];
    let decoded = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = name.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        match name {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some(' '),
            "ndash" => Some('–'),
            "mdash" => Some('—'),
            "laquo" => Some('«'),
            "raquo" => Some('»'),
            _ => None,
        }
    };

    match decoded {
        Some(c) => c.to_string(),
        // unknown entities are left as written
        None => caps[0].to_string(),
    }
}

/// Visible text of an HTML fragment with whitespace collapsed.
pub fn to_text(html: &str) -> String {
    let spaced = breaks().replace_all(html, " ");
    let stripped = tags().replace_all(&spaced, "");
    let decoded = entities().replace_all(&stripped, decode_entity);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Texts of `<i>`/`<em>` elements, which the dictionary uses for grammatical labels.
pub fn italic_labels(html: &str) -> Vec<SmolStr> {
    italics()
        .captures_iter(html)
        .map(|caps| to_text(&caps[1]))
        .filter(|label| !label.is_empty())
        .map(SmolStr::from)
        .collect()
}
