// src/render/rewrite.rs
// =============================================================================
// This module rewrites media URLs inside rendered HTML.
//
// Two transformations:
// 1. <img>, <video> and <source> tags with a relative src get an absolute
//    raw-content URL for the owning repository. Absolute URLs, fragment
//    links and inline data: URLs are left alone.
// 2. <a> tags pointing at http(s) URLs get target="_blank" and
//    rel="noopener noreferrer" so external links open in a new context.
//
// The scan works directly on the HTML string (no DOM): find the next tag of
// interest, locate its attribute value between quotes, splice in the
// replacement. A structurally broken tag (unterminated, unquoted) is an
// error - the caller falls back to the unmodified HTML.
// =============================================================================

use anyhow::{anyhow, Result};
use url::Url;

use crate::config::PortfolioConfig;

/// Tags whose src attribute is rewritten.
const MEDIA_TAGS: &[&str] = &["<img ", "<video ", "<source "];

/// Rewrites relative media sources and marks external anchors.
///
/// Returns an error only when the markup is structurally broken; the
/// renderer treats that as a degradation and keeps the input HTML.
pub fn rewrite_media_urls(html: &str, repo: &str, cfg: &PortfolioConfig) -> Result<String> {
    let rewritten = rewrite_sources(html, repo, cfg)?;
    mark_external_anchors(&rewritten)
}

// True for URLs that must not be rewritten: fragments, already-absolute
// http(s) URLs, and inline data: URLs. Relative paths fail Url::parse.
fn is_absolute_or_special(src: &str) -> bool {
    if src.starts_with('#') {
        return true;
    }
    match Url::parse(src) {
        Ok(url) => matches!(url.scheme(), "http" | "https" | "data"),
        Err(_) => false,
    }
}

// True when the href is an absolute http(s) URL
fn is_http_url(href: &str) -> bool {
    Url::parse(href)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

// Pass 1: rewrite src="..." on media tags
fn rewrite_sources(html: &str, repo: &str, cfg: &PortfolioConfig) -> Result<String> {
    let mut out = String::with_capacity(html.len());
    let mut pos = 0;

    while pos < html.len() {
        // Earliest media tag from the current position
        let next = MEDIA_TAGS
            .iter()
            .filter_map(|tag| html[pos..].find(tag).map(|i| pos + i))
            .min();

        let tag_start = match next {
            Some(i) => i,
            None => {
                out.push_str(&html[pos..]);
                break;
            }
        };

        out.push_str(&html[pos..tag_start]);

        let tag_end = html[tag_start..]
            .find('>')
            .map(|i| tag_start + i)
            .ok_or_else(|| anyhow!("unterminated tag at offset {}", tag_start))?;

        let tag = &html[tag_start..tag_end];

        match attribute_span(tag, "src") {
            Some((value_start, value_end)) => {
                let src = &tag[value_start..value_end];
                if is_absolute_or_special(src) {
                    out.push_str(tag);
                } else {
                    out.push_str(&tag[..value_start]);
                    out.push_str(&cfg.raw_url(repo, src));
                    out.push_str(&tag[value_end..]);
                }
            }
            // A media tag without src stays as-is
            None => out.push_str(tag),
        }

        pos = tag_end;
    }

    Ok(out)
}

// Pass 2: add target/rel to anchors with http(s) hrefs
fn mark_external_anchors(html: &str) -> Result<String> {
    let mut out = String::with_capacity(html.len());
    let mut pos = 0;

    while pos < html.len() {
        let tag_start = match html[pos..].find("<a ") {
            Some(i) => pos + i,
            None => {
                out.push_str(&html[pos..]);
                break;
            }
        };

        out.push_str(&html[pos..tag_start]);

        let tag_end = html[tag_start..]
            .find('>')
            .map(|i| tag_start + i)
            .ok_or_else(|| anyhow!("unterminated anchor at offset {}", tag_start))?;

        let tag = &html[tag_start..tag_end];

        let external = matches!(
            attribute_span(tag, "href"),
            Some((start, end)) if is_http_url(&tag[start..end])
        );

        if external && !tag.contains("target=") {
            out.push_str(tag);
            out.push_str(" target=\"_blank\" rel=\"noopener noreferrer\"");
        } else {
            out.push_str(tag);
        }

        pos = tag_end;
    }

    Ok(out)
}

// Locates the value of a double-quoted attribute inside a tag, returning
// the (start, end) byte range of the value. The match must be preceded by
// whitespace so "src" never matches inside "data-src".
fn attribute_span(tag: &str, name: &str) -> Option<(usize, usize)> {
    let needle = format!("{}=\"", name);
    let mut from = 0;

    loop {
        let attr = tag[from..].find(&needle)? + from;
        let preceded_by_space = tag[..attr]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_whitespace());

        if preceded_by_space {
            let value_start = attr + needle.len();
            let value_end = tag[value_start..].find('"')? + value_start;
            return Some((value_start, value_end));
        }

        from = attr + needle.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> PortfolioConfig {
        PortfolioConfig::default()
    }

    #[test]
    fn test_relative_img_src_rewritten() {
        let html = r#"<img src="./img.png" alt="a" />"#;
        let result = rewrite_media_urls(html, "demo", &cfg()).unwrap();
        assert!(result.contains(
            "src=\"https://raw.githubusercontent.com/allan-bismarck/demo/main/img.png\""
        ));
    }

    #[test]
    fn test_absolute_img_src_untouched() {
        let html = r#"<img src="https://example.com/a.png" />"#;
        let result = rewrite_media_urls(html, "demo", &cfg()).unwrap();
        assert_eq!(result, html);
    }

    #[test]
    fn test_data_and_fragment_srcs_untouched() {
        let html = r##"<img src="data:image/png;base64,AAAA" /><img src="#frag" />"##;
        let result = rewrite_media_urls(html, "demo", &cfg()).unwrap();
        assert_eq!(result, html);
    }

    #[test]
    fn test_video_and_source_rewritten() {
        let html = r#"<video src="media/clip.mp4"></video><source src="media/clip.webm" />"#;
        let result = rewrite_media_urls(html, "demo", &cfg()).unwrap();
        assert!(result.contains(
            "src=\"https://raw.githubusercontent.com/allan-bismarck/demo/main/media/clip.mp4\""
        ));
        assert!(result.contains(
            "src=\"https://raw.githubusercontent.com/allan-bismarck/demo/main/media/clip.webm\""
        ));
    }

    #[test]
    fn test_data_src_attribute_not_mistaken_for_src() {
        let html = r#"<img data-src="lazy.png" src="./img.png" />"#;
        let result = rewrite_media_urls(html, "demo", &cfg()).unwrap();
        assert!(result.contains(r#"data-src="lazy.png""#));
        assert!(result.contains(
            "src=\"https://raw.githubusercontent.com/allan-bismarck/demo/main/img.png\""
        ));
    }

    #[test]
    fn test_media_tag_with_only_data_src_untouched() {
        let html = r#"<img data-src="lazy.png" />"#;
        let result = rewrite_media_urls(html, "demo", &cfg()).unwrap();
        assert_eq!(result, html);
    }

    #[test]
    fn test_uppercase_scheme_treated_as_absolute() {
        let html = r#"<img src="HTTPS://example.com/a.png" />"#;
        let result = rewrite_media_urls(html, "demo", &cfg()).unwrap();
        assert_eq!(result, html);
    }

    #[test]
    fn test_external_anchor_gets_target_and_rel() {
        let html = r#"<a href="https://example.com">x</a>"#;
        let result = rewrite_media_urls(html, "demo", &cfg()).unwrap();
        assert!(result.contains(r#"target="_blank" rel="noopener noreferrer""#));
    }

    #[test]
    fn test_internal_anchor_left_alone() {
        let html = r##"<a href="#section">x</a>"##;
        let result = rewrite_media_urls(html, "demo", &cfg()).unwrap();
        assert_eq!(result, html);
    }

    #[test]
    fn test_unterminated_tag_is_an_error() {
        let html = r#"<img src="./img.png"#;
        assert!(rewrite_media_urls(html, "demo", &cfg()).is_err());
    }
}
