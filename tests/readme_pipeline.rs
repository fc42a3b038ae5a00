// tests/readme_pipeline.rs
// =============================================================================
// Integration tests for the README pipeline: the extraction and rendering
// functions applied to a realistic bilingual README fixture, end to end
// through the public library API.
// =============================================================================

use portfolio_scout::config::PortfolioConfig;
use portfolio_scout::extract::extract_project_info;
use portfolio_scout::render::render_markdown;
use scraper::{Html, Selector};

const SAMPLE_README: &str = include_str!("fixtures/sample_readme.md");

fn cfg() -> PortfolioConfig {
    PortfolioConfig::default()
}

#[test]
fn extracts_features_from_fixture() {
    let info = extract_project_info(SAMPLE_README, "meu-app", &cfg());
    assert_eq!(
        info.features,
        vec!["Offline sync", "Dark mode", "Push notifications"]
    );
}

#[test]
fn extracts_technologies_from_portuguese_heading() {
    let info = extract_project_info(SAMPLE_README, "meu-app", &cfg());
    assert_eq!(info.technologies, vec!["Flutter", "Dart", "Firebase"]);
}

#[test]
fn extracts_installation_with_code_block() {
    let info = extract_project_info(SAMPLE_README, "meu-app", &cfg());
    assert!(info.installation.contains("git clone"));
    assert!(info.installation.contains("flutter pub get"));
}

#[test]
fn extracts_usage_section() {
    let info = extract_project_info(SAMPLE_README, "meu-app", &cfg());
    assert!(info.usage.contains("faça login"));
}

#[test]
fn resolves_screenshot_paths_to_raw_urls() {
    let info = extract_project_info(SAMPLE_README, "meu-app", &cfg());
    assert_eq!(info.screenshots.len(), 2);
    assert_eq!(info.screenshots[0].alt, "Tela inicial");
    assert_eq!(
        info.screenshots[0].url,
        "https://raw.githubusercontent.com/allan-bismarck/meu-app/main/screenshots/home.png"
    );
    // Empty alt text falls back to the generic label
    assert_eq!(info.screenshots[1].alt, "Screenshot");
    assert_eq!(
        info.screenshots[1].url,
        "https://raw.githubusercontent.com/allan-bismarck/meu-app/main/screenshots/login.jpg"
    );
}

#[test]
fn collects_video_media_urls_only() {
    let info = extract_project_info(SAMPLE_README, "meu-app", &cfg());
    assert_eq!(
        info.media_urls,
        vec![
            "https://youtu.be/dQw4w9WgXcQ",
            "https://example.com/full-demo.mp4",
        ]
    );
}

#[test]
fn extraction_is_pure_and_repeatable() {
    let first = extract_project_info(SAMPLE_README, "meu-app", &cfg());
    let second = extract_project_info(SAMPLE_README, "meu-app", &cfg());
    assert_eq!(first.features, second.features);
    assert_eq!(first.screenshots, second.screenshots);
    assert_eq!(first.media_urls, second.media_urls);
}

#[test]
fn rendered_fixture_rewrites_relative_images() {
    let html = render_markdown(SAMPLE_README, Some("meu-app"), &cfg());
    let doc = Html::parse_fragment(&html);
    let selector = Selector::parse("img").unwrap();

    let sources: Vec<_> = doc
        .select(&selector)
        .filter_map(|img| img.value().attr("src"))
        .collect();

    assert!(sources.contains(
        &"https://raw.githubusercontent.com/allan-bismarck/meu-app/main/screenshots/home.png"
    ));
    assert!(sources.contains(
        &"https://raw.githubusercontent.com/allan-bismarck/meu-app/main/screenshots/login.jpg"
    ));
}

#[test]
fn rendered_fixture_marks_external_links() {
    let html = render_markdown(SAMPLE_README, Some("meu-app"), &cfg());
    let doc = Html::parse_fragment(&html);
    let selector = Selector::parse("a[href=\"https://example.com/docs\"]").unwrap();

    let anchor = doc.select(&selector).next().expect("external link present");
    assert_eq!(anchor.value().attr("target"), Some("_blank"));
    assert_eq!(anchor.value().attr("rel"), Some("noopener noreferrer"));
}

#[test]
fn rendered_fixture_highlights_bash_block() {
    let html = render_markdown(SAMPLE_README, Some("meu-app"), &cfg());
    assert!(html.contains("class=\"language-bash\""));
    assert!(html.contains("hljs-"));
}

#[test]
fn rendered_fixture_contains_no_script_content() {
    let hostile = format!("{}\n<script>steal()</script>\n", SAMPLE_README);
    let html = render_markdown(&hostile, Some("meu-app"), &cfg());
    assert!(!html.contains("<script"));
    assert!(!html.contains("steal()"));
}
