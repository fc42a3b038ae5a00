// src/extract/media.rs
// =============================================================================
// Screenshot and media URL extraction, independent of the section scan.
//
// Two sweeps over the whole document:
// 1. Markdown image references `![alt](url)` whose URL has an image suffix
//    become screenshots; repository-relative paths resolve to raw-content
//    URLs first
// 2. Bare URLs with an image/video suffix, or pointing at a known video
//    host, are collected as extra media - deduplicated against the
//    screenshots and against each other
// =============================================================================

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::config::PortfolioConfig;

use super::Screenshot;

// ![alt](url)
static IMAGE_REF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());

// Bare URL, stopping at whitespace or a closing parenthesis
static BARE_URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://[^\s)]+").unwrap());

static IMAGE_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(png|jpg|jpeg|gif|webp)$").unwrap());

static MEDIA_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(png|jpg|jpeg|gif|webp|mp4|webm|mov)$").unwrap());

/// Collects screenshots and additional media URLs from README text.
pub fn collect(
    readme: &str,
    repo: &str,
    cfg: &PortfolioConfig,
) -> (Vec<Screenshot>, Vec<String>) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut screenshots = Vec::new();

    for cap in IMAGE_REF_RE.captures_iter(readme) {
        let alt = cap[1].trim();
        let target = cap[2].trim();

        // Relative paths point into the repository
        let url = if target.starts_with("http://") || target.starts_with("https://") {
            target.to_string()
        } else {
            cfg.raw_url(repo, target)
        };

        if !IMAGE_SUFFIX_RE.is_match(&url) {
            continue;
        }

        if seen.insert(url.clone()) {
            screenshots.push(Screenshot {
                alt: if alt.is_empty() {
                    "Screenshot".to_string()
                } else {
                    alt.to_string()
                },
                url,
            });
        }
    }

    let mut media_urls = Vec::new();
    for found in BARE_URL_RE.find_iter(readme) {
        let url = found.as_str();
        if !is_media_url(url) {
            continue;
        }
        if seen.insert(url.to_string()) {
            media_urls.push(url.to_string());
        }
    }

    (screenshots, media_urls)
}

// Image/video file suffixes plus the known video hosting patterns
fn is_media_url(url: &str) -> bool {
    MEDIA_SUFFIX_RE.is_match(url) || url.contains("youtube.com/watch") || url.contains("youtu.be/")
}
