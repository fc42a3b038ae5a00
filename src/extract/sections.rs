// src/extract/sections.rs
// =============================================================================
// Section extraction: finds recognized `##` headings and captures their
// text until the next top-level heading or the end of the document.
//
// The heading labels are bilingual (Portuguese and English) with optional
// decorative emoji, matching how the portfolio READMEs are actually
// written. This is regex-over-text by design: README documents are
// free-form, so a grammar would buy nothing.
// =============================================================================

use once_cell::sync::Lazy;
use regex::Regex;

// [^\S\n] = horizontal whitespace only, so a heading match never leaks
// onto the following line
static FEATURES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mi)^##[^\S\n]*(?:🚀[^\S\n]*)?(?:features|funcionalidades)[^\S\n]*$").unwrap()
});

static TECHNOLOGIES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?mi)^##[^\S\n]*(?:🛠️[^\S\n]*|🛠[^\S\n]*)?(?:technologies|tecnologias|tech stack|built with)[^\S\n]*$",
    )
    .unwrap()
});

static INSTALLATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?mi)^##[^\S\n]*(?:🚀[^\S\n]*)?(?:installation|instalação|getting started)[^\S\n]*$",
    )
    .unwrap()
});

static USAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?mi)^##[^\S\n]*(?:📝[^\S\n]*)?(?:usage|uso|how to use|documentation|documentação)[^\S\n]*$",
    )
    .unwrap()
});

/// Feature list items, one per list-marker line in the Features section.
pub fn features(text: &str) -> Vec<String> {
    section_body(text, &FEATURES_RE)
        .map(list_items)
        .unwrap_or_default()
}

/// Technology list items from the Technologies/Tech Stack section.
pub fn technologies(text: &str) -> Vec<String> {
    section_body(text, &TECHNOLOGIES_RE)
        .map(list_items)
        .unwrap_or_default()
}

/// Raw trimmed text of the Installation section.
pub fn installation(text: &str) -> String {
    section_body(text, &INSTALLATION_RE)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Raw trimmed text of the Usage/Documentation section.
pub fn usage(text: &str) -> String {
    section_body(text, &USAGE_RE)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

// Captures everything after the heading line up to the next `##` heading
// or the end of the document
fn section_body<'a>(text: &'a str, heading: &Regex) -> Option<&'a str> {
    let found = heading.find(text)?;
    let body = &text[found.end()..];
    let body = body.strip_prefix('\n').unwrap_or(body);
    let end = body.find("\n## ").unwrap_or(body.len());
    Some(&body[..end])
}

// Each `-` or `*` prefixed line becomes one item, marker stripped
fn list_items(section: &str) -> Vec<String> {
    section
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('-') || line.starts_with('*'))
        .map(|line| line[1..].trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_features_with_emoji_heading() {
        let text = "## 🚀 Features\n- Fast\n- Secure\n## Usage\n...";
        assert_eq!(features(text), vec!["Fast", "Secure"]);
    }

    #[test]
    fn test_features_without_emoji() {
        let text = "## Features\n* One\n* Two";
        assert_eq!(features(text), vec!["One", "Two"]);
    }

    #[test]
    fn test_features_portuguese_label() {
        let text = "## Funcionalidades\n- Rápido";
        assert_eq!(features(text), vec!["Rápido"]);
    }

    #[test]
    fn test_non_list_lines_ignored() {
        let text = "## Features\nSome intro text\n- Real item";
        assert_eq!(features(text), vec!["Real item"]);
    }

    #[test]
    fn test_technologies_label_variants() {
        for heading in ["## Technologies", "## Tecnologias", "## Tech Stack", "## Built With"] {
            let text = format!("{}\n- Flutter\n- Dart", heading);
            assert_eq!(technologies(&text), vec!["Flutter", "Dart"], "{}", heading);
        }
    }

    #[test]
    fn test_installation_captures_until_next_heading() {
        let text = "## Installation\nclone it\nbuild it\n## Usage\nrun it";
        assert_eq!(installation(text), "clone it\nbuild it");
    }

    #[test]
    fn test_installation_portuguese_with_emoji() {
        let text = "## 🚀 Instalação\npasso um";
        assert_eq!(installation(text), "passo um");
    }

    #[test]
    fn test_usage_label_variants() {
        for heading in ["## Usage", "## Uso", "## How to Use", "## 📝 Documentation"] {
            let text = format!("{}\ndo the thing", heading);
            assert_eq!(usage(&text), "do the thing", "{}", heading);
        }
    }

    #[test]
    fn test_missing_sections_are_empty() {
        let text = "# Title\nJust a description.";
        assert!(features(text).is_empty());
        assert!(technologies(text).is_empty());
        assert_eq!(installation(text), "");
        assert_eq!(usage(text), "");
    }

    #[test]
    fn test_section_runs_to_end_of_document() {
        let text = "## Usage\nlast section\nstill usage";
        assert_eq!(usage(text), "last section\nstill usage");
    }

    #[test]
    fn test_deeper_headings_do_not_end_section() {
        let text = "## Usage\nintro\n### Details\nmore\n## Features\n- x";
        assert_eq!(usage(text), "intro\n### Details\nmore");
    }
}
