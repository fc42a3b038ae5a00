// src/github/releases.rs
// =============================================================================
// This module detects installer artifacts attached to a repository's
// releases.
//
// Strategy:
// - Only repositories that look like mobile apps (language or topics) are
//   checked at all; everything else is skipped without a network call
// - Only the most recent release is inspected
// - An asset whose name ends with ".apk" (case-insensitive) counts
// - A missing release list, an error response, or a failed request all mean
//   "no artifact" - absence is never an error here
//
// Rust concepts:
// - Enums with data: ArtifactInfo distinguishes "found", "looked and found
//   nothing", and "never looked" so callers can't confuse the last two
// - serde Deserialize: mapping the API's release JSON onto structs
// =============================================================================

use log::warn;
use serde::Deserialize;

use super::client::GithubClient;
use crate::config::PortfolioConfig;

/// Languages that mark a repository as a mobile app.
const MOBILE_LANGUAGES: &[&str] = &["Kotlin", "Java", "Dart"];

/// Topics that mark a repository as a mobile app.
const MOBILE_TOPICS: &[&str] = &["android", "flutter", "dart"];

/// Recognized installer suffix on release assets.
const APK_SUFFIX: &str = ".apk";

/// A published release as returned by the releases API.
#[derive(Debug, Deserialize)]
pub struct Release {
    /// Tag name (e.g. "v1.2.0")
    pub tag_name: String,
    /// Web page for the release
    pub html_url: String,
    /// Attached binary assets
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// A single downloadable file attached to a release.
#[derive(Debug, Deserialize)]
pub struct Asset {
    /// File name (e.g. "app-release.apk")
    pub name: String,
    /// Direct download URL
    pub browser_download_url: String,
}

/// Outcome of an artifact check for one repository.
///
/// Skipped and NotFound both mean "no artifact to offer", but Skipped says
/// the repository was never eligible, while NotFound says we looked and
/// came up empty.
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactInfo {
    /// The latest release carries an installer asset
    Found {
        apk_name: String,
        apk_url: String,
        release_tag: String,
        release_url: String,
    },
    /// The repository was checked but no installer was found
    NotFound,
    /// The repository is not mobile-oriented, so no check was made
    Skipped,
}

impl ArtifactInfo {
    /// True only for the Found variant.
    pub fn has_apk(&self) -> bool {
        matches!(self, ArtifactInfo::Found { .. })
    }
}

/// Decides whether a repository is worth an artifact check.
///
/// Matches the declared primary language against the mobile language list,
/// or any topic against the mobile topic list.
pub fn is_mobile_repo(language: Option<&str>, topics: &[String]) -> bool {
    if let Some(lang) = language {
        if MOBILE_LANGUAGES.contains(&lang) {
            return true;
        }
    }
    topics.iter().any(|t| MOBILE_TOPICS.contains(&t.as_str()))
}

/// Checks the most recent release of a repository for an installer asset.
///
/// Never returns an error: a failed request, a non-success status, or an
/// empty release list all collapse into ArtifactInfo::NotFound. The failure
/// is logged so it isn't silently invisible.
pub async fn check_for_apk(
    client: &GithubClient,
    cfg: &PortfolioConfig,
    repo_name: &str,
) -> ArtifactInfo {
    let url = cfg.api_url(&format!(
        "repos/{}/{}/releases",
        cfg.username, repo_name
    ));

    let releases: Vec<Release> = match client.get_json(&url).await {
        Ok(releases) => releases,
        Err(e) => {
            // Releases are optional data: absorb the failure
            warn!("could not fetch releases for {}: {}", repo_name, e);
            return ArtifactInfo::NotFound;
        }
    };

    // Only the most recent release is inspected
    let latest = match releases.first() {
        Some(release) => release,
        None => return ArtifactInfo::NotFound,
    };

    match find_apk_asset(latest) {
        Some(asset) => ArtifactInfo::Found {
            apk_name: asset.name.clone(),
            apk_url: asset.browser_download_url.clone(),
            release_tag: latest.tag_name.clone(),
            release_url: latest.html_url.clone(),
        },
        None => ArtifactInfo::NotFound,
    }
}

// Finds the first asset whose name ends with the installer suffix,
// case-insensitively
fn find_apk_asset(release: &Release) -> Option<&Asset> {
    release
        .assets
        .iter()
        .find(|asset| asset.name.to_lowercase().ends_with(APK_SUFFIX))
}
