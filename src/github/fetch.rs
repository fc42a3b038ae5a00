// src/github/fetch.rs
// =============================================================================
// This module fetches the portfolio data: user profile, repository list,
// and per-repository documentation files.
//
// Strategy:
// - Profile and repository list are primary data: a failure there is a real
//   error the caller must surface
// - The repository list is filtered (no forks, no archived repos, no
//   identity repos) and then augmented with artifact info; the artifact
//   checks for the eligible repos run concurrently
// - Documentation paths are probed concurrently too; a missing or failing
//   path is logged and excluded, never aborts the batch
//
// Rust concepts:
// - futures streams: .buffered(N) runs up to N futures at once while
//   keeping the original order of results
// - serde Deserialize/Serialize: API JSON in, --json output out
// =============================================================================

use anyhow::Result;
use futures::stream::{self, StreamExt};
use log::warn;
use serde::{Deserialize, Serialize};

use super::client::GithubClient;
use super::releases::{self, ArtifactInfo};
use crate::config::PortfolioConfig;
use crate::helpers::decode_base64;

/// How many artifact/documentation sub-requests run at once.
const CONCURRENT_REQUESTS: usize = 8;

/// The user profile fields the portfolio displays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: String,
    pub location: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub html_url: String,
}

// Raw repository item as the API returns it; only the fields we use
#[derive(Debug, Deserialize)]
struct ApiRepo {
    name: String,
    description: Option<String>,
    language: Option<String>,
    #[serde(default)]
    topics: Vec<String>,
    fork: bool,
    archived: bool,
    updated_at: String,
    html_url: String,
}

impl ApiRepo {
    // Filtering rule for the portfolio listing: no forks, nothing archived,
    // and neither of the two identity repos
    fn is_portfolio_repo(&self, cfg: &PortfolioConfig) -> bool {
        !self.fork
            && !self.archived
            && self.name != cfg.username
            && self.name != format!("{}.github.io", cfg.username)
    }
}

/// One repository after filtering and artifact augmentation.
///
/// Immutable once constructed; the artifact fields come from the release
/// check (all None / false when the repo was skipped or nothing was found).
#[derive(Debug, Clone, Serialize)]
pub struct RepositorySummary {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub topics: Vec<String>,
    pub updated_at: String,
    pub html_url: String,
    pub has_apk: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apk_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apk_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_url: Option<String>,
}

impl RepositorySummary {
    fn new(repo: ApiRepo, artifact: ArtifactInfo) -> Self {
        let (has_apk, apk_url, apk_name, release_tag, release_url) = match artifact {
            ArtifactInfo::Found {
                apk_name,
                apk_url,
                release_tag,
                release_url,
            } => (
                true,
                Some(apk_url),
                Some(apk_name),
                Some(release_tag),
                Some(release_url),
            ),
            ArtifactInfo::NotFound | ArtifactInfo::Skipped => (false, None, None, None, None),
        };

        Self {
            name: repo.name,
            description: repo.description,
            language: repo.language,
            topics: repo.topics,
            updated_at: repo.updated_at,
            html_url: repo.html_url,
            has_apk,
            apk_url,
            apk_name,
            release_tag,
            release_url,
        }
    }
}

/// One documentation file fetched through the contents API.
///
/// Request-scoped: fetched, decoded, rendered, discarded.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentationFile {
    /// Repository-relative path that was probed
    pub path: String,
    /// Base64 payload as the API returned it
    pub raw_content: String,
    /// Decoded UTF-8 text (empty when the payload was undecodable)
    pub decoded_text: String,
}

// Contents API response; content is base64 with embedded newlines
#[derive(Debug, Deserialize)]
struct ApiContents {
    content: String,
}

/// Fetches the user profile. Primary data: failures propagate.
pub async fn fetch_user(client: &GithubClient, cfg: &PortfolioConfig) -> Result<UserProfile> {
    let url = cfg.api_url(&format!("users/{}", cfg.username));
    client.get_json(&url).await
}

/// Fetches, filters, and augments the repository list.
///
/// Repositories come back sorted by update time (newest first, one page of
/// up to 100). Forks, archived repos, and the two identity repos are
/// dropped. Mobile-oriented repos then get a concurrent artifact check;
/// everything else is marked skipped without a network call.
pub async fn fetch_repos(
    client: &GithubClient,
    cfg: &PortfolioConfig,
) -> Result<Vec<RepositorySummary>> {
    let url = cfg.api_url(&format!(
        "users/{}/repos?sort=updated&direction=desc&per_page=100",
        cfg.username
    ));
    let repos: Vec<ApiRepo> = client.get_json(&url).await?;

    let filtered: Vec<ApiRepo> = repos
        .into_iter()
        .filter(|repo| repo.is_portfolio_repo(cfg))
        .collect();

    // Augment each repo with artifact info; only mobile repos hit the
    // network. .buffered keeps the update-time ordering of the list.
    let summaries = stream::iter(filtered.into_iter().map(|repo| async move {
        let artifact = if releases::is_mobile_repo(repo.language.as_deref(), &repo.topics) {
            releases::check_for_apk(client, cfg, &repo.name).await
        } else {
            ArtifactInfo::Skipped
        };
        RepositorySummary::new(repo, artifact)
    }))
    .buffered(CONCURRENT_REQUESTS)
    .collect::<Vec<_>>()
    .await;

    Ok(summaries)
}

/// Probes the configured documentation paths of one repository.
///
/// Each path is fetched concurrently through the contents API. A path that
/// is missing or fails to fetch is logged and left out of the result; the
/// remaining paths are unaffected. Returns the surviving files in the
/// configured path order.
pub async fn fetch_documentation(
    client: &GithubClient,
    cfg: &PortfolioConfig,
    repo_name: &str,
) -> Vec<DocumentationFile> {
    let fetches = cfg.doc_paths.iter().map(|path| async move {
        let url = cfg.api_url(&format!(
            "repos/{}/{}/contents/{}",
            cfg.username, repo_name, path
        ));
        match client.get_json::<ApiContents>(&url).await {
            Ok(contents) => {
                let decoded_text = decode_base64(&contents.content);
                Some(DocumentationFile {
                    path: path.clone(),
                    raw_content: contents.content,
                    decoded_text,
                })
            }
            Err(e) => {
                // One missing doc file never aborts the batch
                warn!("could not fetch {}/{}: {}", repo_name, path, e);
                None
            }
        }
    });

    stream::iter(fetches)
        .buffered(CONCURRENT_REQUESTS)
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_repo(name: &str, fork: bool, archived: bool) -> ApiRepo {
        ApiRepo {
            name: name.to_string(),
            description: None,
            language: Some("Rust".to_string()),
            topics: vec![],
            fork,
            archived,
            updated_at: "2024-01-15T10:30:00Z".to_string(),
            html_url: format!("https://github.com/allan-bismarck/{}", name),
        }
    }

    #[test]
    fn test_filter_excludes_forks_and_archived() {
        let cfg = PortfolioConfig::default();
        assert!(api_repo("cool-app", false, false).is_portfolio_repo(&cfg));
        assert!(!api_repo("some-fork", true, false).is_portfolio_repo(&cfg));
        assert!(!api_repo("old-thing", false, true).is_portfolio_repo(&cfg));
    }

    #[test]
    fn test_filter_excludes_identity_repos() {
        let cfg = PortfolioConfig::default();
        assert!(!api_repo("allan-bismarck", false, false).is_portfolio_repo(&cfg));
        assert!(!api_repo("allan-bismarck.github.io", false, false).is_portfolio_repo(&cfg));
    }

    #[test]
    fn test_summary_from_found_artifact() {
        let repo = api_repo("mobile-app", false, false);
        let artifact = ArtifactInfo::Found {
            apk_name: "app.apk".to_string(),
            apk_url: "https://example.com/app.apk".to_string(),
            release_tag: "v1.0.0".to_string(),
            release_url: "https://example.com/releases/v1.0.0".to_string(),
        };
        let summary = RepositorySummary::new(repo, artifact);
        assert!(summary.has_apk);
        assert_eq!(
            summary.apk_url.as_deref(),
            Some("https://example.com/app.apk")
        );
        assert_eq!(summary.release_tag.as_deref(), Some("v1.0.0"));
    }

    #[test]
    fn test_summary_from_skipped_artifact() {
        let repo = api_repo("web-app", false, false);
        let summary = RepositorySummary::new(repo, ArtifactInfo::Skipped);
        assert!(!summary.has_apk);
        assert!(summary.apk_url.is_none());
    }
}
