// src/render/mod.rs
// =============================================================================
// This module turns raw README Markdown into sanitized HTML that is safe to
// inject into a page.
//
// Submodules:
// - markdown: Markdown -> HTML with syntax-highlighted code blocks
// - rewrite: relative media URLs -> absolute raw-content URLs, external
//   anchors opened in a new context
// - sanitize: allowlist-based stripping of unsafe markup
//
// The pipeline never hard-fails: each post-processing step falls back to
// its input when something goes structurally wrong.
// =============================================================================

mod markdown;
mod rewrite;
mod sanitize;

pub use markdown::render_markdown;
pub use rewrite::rewrite_media_urls;
pub use sanitize::sanitize;
