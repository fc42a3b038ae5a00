// src/render/markdown.rs
// =============================================================================
// This module renders Markdown to HTML.
//
// We use the `pulldown-cmark` crate which:
// - Parses Markdown into events (heading, paragraph, link, etc.)
// - Follows the CommonMark specification
// - Is fast and memory-efficient (it's a streaming parser)
//
// On top of the plain conversion we:
// - Highlight fenced code blocks with syntect, emitting CSS classes with
//   an "hljs-" prefix; unknown languages fall back to first-line detection
//   and finally to escaped plain text
// - Neutralize unsafe link/image schemes (javascript: and friends) at the
//   event level, before any HTML exists
// - Rewrite relative media URLs when the owning repository is known
// - Sanitize the final markup
//
// The full pipeline is infallible by design: a failing post-processing
// step degrades to its input instead of propagating an error.
// =============================================================================

use log::warn;
use once_cell::sync::Lazy;
use pulldown_cmark::escape::escape_html;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag};
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::config::PortfolioConfig;

use super::{rewrite_media_urls, sanitize};

// Syntax definitions are expensive to load, so share one set
static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

/// Renders Markdown to sanitized HTML.
///
/// When `repo` is given, relative image/video sources are rewritten to that
/// repository's raw-content URLs and external anchors are marked to open in
/// a new browsing context. When the rewrite step fails structurally, the
/// unrewritten HTML is used instead - rendering never fails the page.
pub fn render_markdown(content: &str, repo: Option<&str>, cfg: &PortfolioConfig) -> String {
    let html = markdown_to_html(content);

    let html = match repo {
        Some(repo) => match rewrite_media_urls(&html, repo, cfg) {
            Ok(rewritten) => rewritten,
            Err(e) => {
                warn!("media URL rewrite failed, using unmodified HTML: {}", e);
                html
            }
        },
        None => html,
    };

    sanitize(&html)
}

// Markdown -> HTML with GFM-ish extensions, highlighted code blocks, and
// unsafe schemes neutralized
fn markdown_to_html(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(content, options);

    // A fenced code block arrives as Start -> Text* -> End; we buffer the
    // text and replace the whole run with one highlighted Html event
    let mut events: Vec<Event> = Vec::new();
    let mut code_block: Option<(String, String)> = None; // (language, code)

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                // The info string may carry extras ("rust,ignore"); only the
                // first token names the language
                let lang = info
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .next()
                    .unwrap_or("")
                    .to_string();
                code_block = Some((lang, String::new()));
            }
            Event::Text(text) if code_block.is_some() => {
                if let Some((_, code)) = code_block.as_mut() {
                    code.push_str(&text);
                }
            }
            Event::End(Tag::CodeBlock(CodeBlockKind::Fenced(_))) => {
                if let Some((lang, code)) = code_block.take() {
                    events.push(Event::Html(CowStr::from(highlighted_block(&lang, &code))));
                }
            }
            Event::Start(Tag::Link(ty, dest, title)) => {
                events.push(Event::Start(Tag::Link(ty, neutralize(dest), title)));
            }
            Event::Start(Tag::Image(ty, dest, title)) => {
                events.push(Event::Start(Tag::Image(ty, neutralize(dest), title)));
            }
            other => events.push(other),
        }
    }

    let mut out = String::with_capacity(content.len() * 2);
    html::push_html(&mut out, events.into_iter());
    out
}

// Replaces executable URL schemes with a dead fragment link
fn neutralize(dest: CowStr<'_>) -> CowStr<'_> {
    let lower = dest.trim().to_lowercase();
    if lower.starts_with("javascript:") || lower.starts_with("vbscript:") {
        CowStr::from("#")
    } else {
        dest
    }
}

// Builds the <pre><code> block with syntect highlighting
fn highlighted_block(lang: &str, code: &str) -> String {
    let body = highlight_code(lang, code);
    if lang.is_empty() {
        format!("<pre><code>{}</code></pre>\n", body)
    } else {
        format!(
            "<pre><code class=\"language-{}\">{}</code></pre>\n",
            lang, body
        )
    }
}

// Highlights code with CSS classes, falling back to automatic detection on
// the first line and finally to escaped plain text
fn highlight_code(lang: &str, code: &str) -> String {
    if code.is_empty() {
        return String::new();
    }

    let syntax = SYNTAX_SET
        .find_syntax_by_token(lang)
        .or_else(|| {
            let first_line = code.lines().next().unwrap_or("");
            SYNTAX_SET.find_syntax_by_first_line(first_line)
        });

    let syntax = match syntax {
        Some(s) => s,
        None => return escaped(code),
    };

    let mut generator = ClassedHTMLGenerator::new_with_class_style(
        syntax,
        &SYNTAX_SET,
        ClassStyle::SpacedPrefixed { prefix: "hljs-" },
    );

    for line in LinesWithEndings::from(code) {
        if generator
            .parse_html_for_line_which_includes_newline(line)
            .is_err()
        {
            // Highlighting is cosmetic; degrade to plain text
            return escaped(code);
        }
    }

    generator.finalize()
}

fn escaped(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // escape_html only fails on a formatter error, which String never gives
    let _ = escape_html(&mut out, text);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn cfg() -> PortfolioConfig {
        PortfolioConfig::default()
    }

    #[test]
    fn test_renders_heading_and_paragraph() {
        let html = render_markdown("# Title\n\nHello world", None, &cfg());
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<p>Hello world</p>"));
    }

    #[test]
    fn test_relative_image_rewritten_to_raw_url() {
        let html = render_markdown("# Title\n![alt](./img.png)", Some("demo"), &cfg());
        let doc = Html::parse_fragment(&html);
        let selector = Selector::parse("img").unwrap();
        let img = doc.select(&selector).next().unwrap();
        assert_eq!(
            img.value().attr("src").unwrap(),
            "https://raw.githubusercontent.com/allan-bismarck/demo/main/img.png"
        );
    }

    #[test]
    fn test_absolute_image_untouched() {
        let html = render_markdown(
            "![shot](https://example.com/shot.png)",
            Some("demo"),
            &cfg(),
        );
        assert!(html.contains("src=\"https://example.com/shot.png\""));
    }

    #[test]
    fn test_external_anchor_opens_new_context() {
        let html = render_markdown("[site](https://example.com)", Some("demo"), &cfg());
        let doc = Html::parse_fragment(&html);
        let selector = Selector::parse("a").unwrap();
        let anchor = doc.select(&selector).next().unwrap();
        assert_eq!(anchor.value().attr("target").unwrap(), "_blank");
        assert_eq!(anchor.value().attr("rel").unwrap(), "noopener noreferrer");
    }

    #[test]
    fn test_fenced_code_block_keeps_language_class() {
        let html = render_markdown("```rust\nfn main() {}\n```", None, &cfg());
        assert!(html.contains("class=\"language-rust\""));
        assert!(html.contains("hljs-"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain_text() {
        let html = render_markdown("```nosuchlang\nplain < text\n```", None, &cfg());
        assert!(html.contains("language-nosuchlang"));
        assert!(html.contains("plain &lt; text"));
    }

    #[test]
    fn test_javascript_link_neutralized() {
        let html = render_markdown("[click](javascript:alert(1))", None, &cfg());
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn test_script_tag_stripped() {
        let html = render_markdown("hi\n\n<script>alert(1)</script>\n\nbye", None, &cfg());
        assert!(!html.contains("<script>"));
        assert!(!html.contains("alert(1)"));
    }

    #[test]
    fn test_render_without_repo_leaves_relative_src() {
        let html = render_markdown("![alt](./img.png)", None, &cfg());
        assert!(html.contains("src=\"./img.png\""));
    }
}
