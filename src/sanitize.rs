// src/sanitize.rs
//! Allow-list HTML filter for group descriptions.
//!
//! Only `<a href>` (absolute http, https or mailto targets) and `<br>` survive.
//! Everything else is reduced to its escaped text; `script`/`style` bodies are
//! dropped entirely. After filtering, raw newlines and any escaped `<br>` left
//! in the text are turned into `<br/>\n` so the site renders line breaks.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Elements whose content is discarded along with the tags.
const SKIP_CONTENT: &[&str] = &["script", "style"];

const LINE_BREAK: &str = "<br/>\n";

static RE_MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)<!--.*?(?:-->|$)|<[!?][^>]*>|<(/?)([A-Za-z][A-Za-z0-9:-]*)((?:[^>"']|"[^"]*"|'[^']*')*)>"#,
    )
    .unwrap()
});

static RE_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([^\s"'<>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#).unwrap()
});

/// Filter `raw` through the allow-list, then normalize line breaks.
pub fn sanitize(raw: &str) -> String {
    normalize_breaks(&filter_html(raw))
}

/// Newline normalization. Runs after filtering because filtering is what
/// turns literal `<br>` text into `&lt;br&gt;`.
pub fn normalize_breaks(s: &str) -> String {
    s.replace('\n', LINE_BREAK).replace("&lt;br&gt;", LINE_BREAK)
}

/// Allow-list pass only.
pub fn filter_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    // One entry per open <a>: whether its start tag was emitted.
    let mut anchors: Vec<bool> = Vec::new();
    let mut skipping: Option<String> = None;
    let mut last = 0usize;

    for caps in RE_MARKUP.captures_iter(raw) {
        let Some(m) = caps.get(0) else { continue };
        if skipping.is_none() {
            push_text(&mut out, &raw[last..m.start()]);
        }
        last = m.end();

        // Comments, doctypes, processing instructions.
        let Some(name) = caps.get(2) else { continue };
        let name = name.as_str().to_ascii_lowercase();
        let closing = caps.get(1).is_some_and(|c| !c.as_str().is_empty());

        if let Some(skip) = &skipping {
            if closing && *skip == name {
                skipping = None;
            }
            continue;
        }

        match name.as_str() {
            "br" => out.push_str("<br/>"),
            "a" if closing => {
                if anchors.pop() == Some(true) {
                    out.push_str("</a>");
                }
            }
            "a" => {
                let attrs = caps.get(3).map_or("", |a| a.as_str());
                match allowed_href(attrs) {
                    Some(href) => {
                        out.push_str("<a href=\"");
                        out.push_str(&html_escape::encode_double_quoted_attribute(&href));
                        out.push_str("\">");
                        anchors.push(true);
                    }
                    None => anchors.push(false),
                }
            }
            other if !closing && SKIP_CONTENT.contains(&other) => {
                let self_closed = caps.get(3).is_some_and(|a| a.as_str().trim_end().ends_with('/'));
                if !self_closed {
                    skipping = Some(other.to_string());
                }
            }
            _ => {}
        }
    }

    if skipping.is_none() {
        push_text(&mut out, &raw[last..]);
    }
    for emitted in anchors.into_iter().rev() {
        if emitted {
            out.push_str("</a>");
        }
    }
    out
}

fn push_text(out: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    let decoded = html_escape::decode_html_entities(text);
    out.push_str(&html_escape::encode_text(&decoded));
}

/// The first `href` in `attrs`, if it points somewhere safe.
///
/// The value must be an absolute URL with an allowed scheme and no control or
/// whitespace characters; the re-serialized parse is returned, never the input.
fn allowed_href(attrs: &str) -> Option<String> {
    let caps = RE_ATTR
        .captures_iter(attrs)
        .find(|c| c.get(1).is_some_and(|n| n.as_str().eq_ignore_ascii_case("href")))?;
    let value = caps.get(2).or(caps.get(3)).or(caps.get(4))?.as_str();
    let decoded = html_escape::decode_html_entities(value);
    let href = decoded.trim();
    if href.is_empty() || href.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return None;
    }

    // Relative references fail here (no base).
    let url = Url::parse(href).ok()?;
    ALLOWED_SCHEMES
        .contains(&url.scheme())
        .then(|| url.into())
}
