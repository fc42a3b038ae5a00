// src/lib.rs
// =============================================================================
// Library root for portfolio-scout.
//
// The binary in main.rs is a thin CLI over these modules; integration
// tests exercise the same public API.
//
// Modules:
// - config:  explicit configuration value (account, API bases, doc paths)
// - github:  REST API access (profile, repos, releases, file contents)
// - render:  Markdown -> sanitized HTML pipeline
// - extract: structured project info mined from README text
// - helpers: pure display formatting utilities
// =============================================================================

pub mod config;
pub mod extract;
pub mod github;
pub mod helpers;
pub mod render;
