// src/render/sanitize.rs
// =============================================================================
// This module sanitizes HTML before it is handed over for direct injection
// into a page.
//
// Approach: allowlist, not blocklist.
// - Tags outside the allowlist are dropped; their text content survives
// - script/style/iframe (and similar executable containers) are dropped
//   together with everything inside them
// - Attributes outside the allowlist are dropped, which removes every
//   on* event handler; target and rel are explicitly allowed so the
//   rewrite step's additions survive
// - href/src values with executable schemes are removed entirely
//
// Raw text between tags passes through untouched: the markdown renderer
// already escaped it, and raw-HTML text was never markup to begin with.
// =============================================================================

use once_cell::sync::Lazy;
use regex::Regex;

/// Tags that survive sanitization.
const ALLOWED_TAGS: &[&str] = &[
    "a", "abbr", "b", "blockquote", "br", "code", "dd", "del", "details", "div", "dl", "dt",
    "em", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "i", "img", "input", "kbd", "li", "ol", "p",
    "picture", "pre", "s", "source", "span", "strong", "sub", "summary", "sup", "table", "tbody",
    "td", "th", "thead", "tr", "ul", "video",
];

/// Tags removed together with their entire content.
const DROPPED_WITH_CONTENT: &[&str] = &["script", "style", "iframe", "object", "embed", "form"];

/// Attributes that survive on allowed tags.
const ALLOWED_ATTRS: &[&str] = &[
    "href", "src", "alt", "title", "width", "height", "align", "class", "id", "type", "checked",
    "disabled", "target", "rel", "controls", "poster", "start", "loading",
];

// name="value" or bare name (checked, disabled, controls)
static ATTR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([a-zA-Z][a-zA-Z0-9-]*)(?:\s*=\s*"([^"]*)")?"#).unwrap());

/// Strips unsafe markup from HTML, keeping the displayable structure.
pub fn sanitize(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let bytes = html.as_bytes();
    let mut pos = 0;

    while pos < html.len() {
        let open = match html[pos..].find('<') {
            Some(i) => pos + i,
            None => {
                out.push_str(&html[pos..]);
                break;
            }
        };

        out.push_str(&html[pos..open]);

        let close = match html[open..].find('>') {
            Some(i) => open + i,
            None => {
                // Stray '<' with no tag end: escape it and keep going
                out.push_str("&lt;");
                pos = open + 1;
                continue;
            }
        };

        // HTML comments are dropped whole
        if html[open..].starts_with("<!--") {
            pos = match html[open..].find("-->") {
                Some(i) => open + i + 3,
                None => html.len(),
            };
            continue;
        }

        let inner = &html[open + 1..close];
        let is_closing = inner.starts_with('/');
        let name_part = inner.trim_start_matches('/');
        let name: String = name_part
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        if name.is_empty() {
            // Not a tag (e.g. "<3" or a comment); escape the bracket
            out.push_str("&lt;");
            pos = open + 1;
            continue;
        }

        if DROPPED_WITH_CONTENT.contains(&name.as_str()) {
            pos = skip_element(html, close + 1, &name, is_closing);
            continue;
        }

        if ALLOWED_TAGS.contains(&name.as_str()) {
            if is_closing {
                out.push_str(&format!("</{}>", name));
            } else {
                out.push_str(&rebuild_tag(&name, name_part, bytes[close - 1] == b'/'));
            }
        }
        // Disallowed tag: emit nothing, its inner content survives on its own

        pos = close + 1;
    }

    out
}

// Skips past the matching close tag of a dropped element (or to the end of
// the document when it never closes). A closing tag on its own just gets
// dropped in place.
fn skip_element(html: &str, from: usize, name: &str, was_closing: bool) -> usize {
    if was_closing {
        return from;
    }
    let end_tag = format!("</{}", name);
    match find_ignore_ascii_case(&html[from..], &end_tag) {
        Some(i) => {
            let after = from + i;
            match html[after..].find('>') {
                Some(j) => after + j + 1,
                None => html.len(),
            }
        }
        None => html.len(),
    }
}

// Case-insensitive substring search over the original bytes. No
// transcoding, so every returned offset is valid in the haystack; the
// needle starts with ASCII '<', which never matches a UTF-8 continuation
// byte, so matches land on char boundaries.
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || h.len() < n.len() {
        return None;
    }
    (0..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

// Re-emits an opening tag with only the allowed attributes
fn rebuild_tag(name: &str, tag_body: &str, self_closing: bool) -> String {
    let mut tag = format!("<{}", name);

    let attrs = &tag_body[name.len()..];
    for cap in ATTR_RE.captures_iter(attrs) {
        let attr_name = cap[1].to_lowercase();
        if !ALLOWED_ATTRS.contains(&attr_name.as_str()) {
            continue;
        }
        match cap.get(2) {
            Some(value) => {
                let value = value.as_str();
                if (attr_name == "href" || attr_name == "src") && has_unsafe_scheme(value) {
                    continue;
                }
                tag.push_str(&format!(" {}=\"{}\"", attr_name, value));
            }
            None => tag.push_str(&format!(" {}", attr_name)),
        }
    }

    if self_closing {
        tag.push_str(" /");
    }
    tag.push('>');
    tag
}

// Executable or otherwise dangerous URL schemes
fn has_unsafe_scheme(value: &str) -> bool {
    let lower = value.trim().to_lowercase();
    lower.starts_with("javascript:")
        || lower.starts_with("vbscript:")
        || (lower.starts_with("data:") && !lower.starts_with("data:image/"))
}
