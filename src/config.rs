// src/config.rs
// =============================================================================
// This file defines the configuration value passed into the fetch, render
// and extraction functions.
//
// Everything that used to be a global constant (account name, API base,
// documentation probe list) lives here as an explicit value, so there is
// no hidden process-wide state and tests can construct their own configs.
//
// Rust concepts:
// - Structs with owned fields: the config owns its strings
// - Default trait: sensible defaults constructed with PortfolioConfig::default()
// =============================================================================

/// Documentation files probed in every repository, in display order.
pub const DOC_PATHS: &[&str] = &[
    "README.md",
    "CONTRIBUTING.md",
    "CHANGELOG.md",
    "docs/README.md",
    "docs/GETTING_STARTED.md",
    "docs/CONTRIBUTING.md",
];

/// Configuration for all GitHub access and URL resolution.
///
/// Pass one of these into the fetch/render/extract functions instead of
/// relying on module-level constants.
#[derive(Debug, Clone)]
pub struct PortfolioConfig {
    /// GitHub account whose portfolio is fetched
    pub username: String,
    /// REST API base, normally `https://api.github.com`
    pub api_base: String,
    /// Raw file content base, normally `https://raw.githubusercontent.com`
    pub raw_base: String,
    /// Branch used when resolving repository-relative asset paths
    pub branch: String,
    /// Documentation file paths probed per repository
    pub doc_paths: Vec<String>,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            username: "allan-bismarck".to_string(),
            api_base: "https://api.github.com".to_string(),
            raw_base: "https://raw.githubusercontent.com".to_string(),
            branch: "main".to_string(),
            doc_paths: DOC_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl PortfolioConfig {
    /// Creates a config for a specific GitHub account, keeping the defaults
    /// for everything else.
    pub fn for_user(username: &str) -> Self {
        Self {
            username: username.to_string(),
            ..Self::default()
        }
    }

    /// Builds the raw-content URL for a path inside a repository.
    ///
    /// A leading `./` on the path is dropped first, so `./img.png` and
    /// `img.png` resolve to the same URL.
    ///
    /// Example:
    ///   raw_url("demo", "./img.png")
    ///   -> "https://raw.githubusercontent.com/allan-bismarck/demo/main/img.png"
    pub fn raw_url(&self, repo: &str, path: &str) -> String {
        let path = path.strip_prefix("./").unwrap_or(path);
        format!(
            "{}/{}/{}/{}/{}",
            self.raw_base, self.username, repo, self.branch, path
        )
    }

    /// Builds an API URL from a path relative to the API base.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}
