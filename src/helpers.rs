// src/helpers.rs
// =============================================================================
// Display formatting helpers: pure input -> output functions with no side
// effects, used by the CLI output and by the extraction/render pipeline.
//
// Includes the permissive base64 decoder for contents-API payloads: it
// falls back progressively (UTF-8 -> latin-1 -> empty string) and never
// returns an error.
// =============================================================================

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Locale};

/// Palette for project card colors.
const CARD_COLORS: &[&str] = &[
    "#4a6cf7", "#6c5ce7", "#00b894", "#00cec9", "#0984e3", "#a29bfe", "#e17055", "#fd79a8",
];

/// Fallback color for languages outside the lookup table.
const DEFAULT_LANGUAGE_COLOR: &str = "#94a3b8";

/// Title-cases a dash-separated repository name.
///
/// Example: "my-cool-app" -> "My Cool App"
pub fn format_repo_name(name: &str) -> String {
    name.split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Derives a two-character initial badge from a repository name.
///
/// Two or more dash-separated words use the first letter of the first two
/// words; a single word uses its first two characters. Always uppercase,
/// "??" for an empty name.
///
/// Examples: "my-cool-app" -> "MC", "x" -> "X"
pub fn get_initials(name: &str) -> String {
    if name.is_empty() {
        return "??".to_string();
    }
    let words: Vec<&str> = name.split('-').filter(|w| !w.is_empty()).collect();
    let initials: String = if words.len() >= 2 {
        words[..2]
            .iter()
            .filter_map(|w| w.chars().next())
            .collect()
    } else {
        name.chars().take(2).collect()
    };
    initials.to_uppercase()
}

// FNV-1a, the same cheap stable hash used for avatar generation elsewhere
fn fnv1a(s: &str) -> u64 {
    const OFFSET: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;
    s.trim()
        .bytes()
        .fold(OFFSET, |h, b| (h ^ b as u64).wrapping_mul(PRIME))
}

/// Picks a display color for a project card.
///
/// Deterministic: the same name always maps to the same palette entry, so
/// cards keep their color across runs.
pub fn card_color(name: &str) -> &'static str {
    let h = fnv1a(name);
    CARD_COLORS[(h % CARD_COLORS.len() as u64) as usize]
}

/// Returns the conventional display color for a programming language.
pub fn language_color(lang: &str) -> &'static str {
    match lang {
        "JavaScript" => "#f1e05a",
        "TypeScript" => "#2b7489",
        "Vue" => "#41b883",
        "Python" => "#3572A5",
        "Java" => "#b07219",
        "Kotlin" => "#A97BFF",
        "HTML" => "#e34c26",
        "CSS" => "#563d7c",
        "Dart" => "#00B4AB",
        "Flutter" => "#02569B",
        _ => DEFAULT_LANGUAGE_COLOR,
    }
}

/// Formats an RFC 3339 timestamp as a long pt-BR date.
///
/// Example: "2024-01-15T10:30:00Z" -> "15 de janeiro de 2024"
///
/// Unparsable input is returned unchanged so a bad timestamp still shows
/// something instead of failing the listing.
pub fn format_date(date: &str) -> String {
    match DateTime::parse_from_rfc3339(date) {
        Ok(parsed) => parsed
            .format_localized("%-d de %B de %Y", Locale::pt_BR)
            .to_string(),
        Err(_) => date.to_string(),
    }
}

/// Decodes a base64 payload from the contents API, never failing.
///
/// The API wraps its base64 in newlines, so all whitespace is stripped
/// first. Valid UTF-8 comes back as-is; non-UTF-8 bytes fall back to a
/// latin-1 reading; undecodable base64 becomes the empty string.
pub fn decode_base64(input: &str) -> String {
    let clean: String = input.chars().filter(|c| !c.is_whitespace()).collect();

    match STANDARD.decode(clean.as_bytes()) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => text,
            // Legacy fallback: read each byte as a latin-1 code point
            Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
        },
        Err(_) => String::new(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
