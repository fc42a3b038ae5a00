// src/github/mod.rs
// =============================================================================
// This module handles all GitHub REST API access.
//
// Submodules:
// - client: HTTP client with the fixed API headers and typed RemoteError
// - fetch: user profile, repository list, documentation files
// - releases: release installer artifact detection
//
// This file (mod.rs) is the module root - it re-exports the public API so
// callers write `github::fetch_repos()` instead of reaching into the
// submodule layout.
// =============================================================================

mod client;
mod fetch;
mod releases;

pub use client::{GithubClient, RemoteError};
pub use fetch::{
    fetch_documentation, fetch_repos, fetch_user, DocumentationFile, RepositorySummary,
    UserProfile,
};
pub use releases::{check_for_apk, is_mobile_repo, ArtifactInfo, Asset, Release};
