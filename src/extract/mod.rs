// src/extract/mod.rs
// =============================================================================
// This module mines structured project info out of free-form README text.
//
// Submodules:
// - sections: locates the recognized section headings (bilingual labels)
//   and captures their text / list items
// - media: collects screenshot and media URLs from the whole document
//
// Everything here is best-effort by design: READMEs are free-form, so a
// missing section simply leaves its field empty. Absence is not an error.
// =============================================================================

use serde::Serialize;

use crate::config::PortfolioConfig;

mod media;
mod sections;

/// One Markdown image reference that looked like a screenshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Screenshot {
    /// Alt text, defaulting to "Screenshot" when the reference had none
    pub alt: String,
    /// Absolute URL (repository-relative paths are resolved to raw content)
    pub url: String,
}

/// Structured summary fields mined from a README.
///
/// Derived purely from the text; recomputed on every call, never stored.
/// Every field defaults to empty when the README has nothing to offer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractedInfo {
    pub features: Vec<String>,
    pub technologies: Vec<String>,
    pub installation: String,
    pub usage: String,
    pub screenshots: Vec<Screenshot>,
    pub media_urls: Vec<String>,
}

/// Extracts the structured summary from full README text.
///
/// `repo` is the owning repository name, used to resolve relative
/// screenshot paths to raw-content URLs.
pub fn extract_project_info(readme: &str, repo: &str, cfg: &PortfolioConfig) -> ExtractedInfo {
    let mut info = ExtractedInfo {
        features: sections::features(readme),
        technologies: sections::technologies(readme),
        installation: sections::installation(readme),
        usage: sections::usage(readme),
        ..ExtractedInfo::default()
    };

    let (screenshots, media_urls) = media::collect(readme, repo, cfg);
    info.screenshots = screenshots;
    info.media_urls = media_urls;

    info
}
