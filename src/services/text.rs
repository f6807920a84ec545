//! Text heuristics applied to free-form product descriptions.
//!
//! Descriptions are merchant-authored HTML in French or English. Nothing here
//! fails: text that carries no recognizable signal yields empty notes or the
//! default gender.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::models::Gender;

static BLOCK_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<\s*(?:br|/p|/div|/li|/h[1-6]|/tr)\b[^>]*>").expect("valid regex")
});
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static INLINE_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\u{a0}]+").expect("valid regex"));

static TOP_LABEL: Lazy<Regex> = Lazy::new(|| notes_label(r"notes?\s+de\s+t[êe]te|top\s+notes?"));
static HEART_LABEL: Lazy<Regex> = Lazy::new(|| {
    notes_label(r"notes?\s+de\s+c(?:œ|oe|o)ur|heart\s+notes?|middle\s+notes?")
});
static BASE_LABEL: Lazy<Regex> = Lazy::new(|| notes_label(r"notes?\s+de\s+fond|base\s+notes?"));

static FEMININE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"femme|feminin|pour elle|women|woman|for her").expect("valid regex")
});
static MASCULINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"homme|masculin|pour lui|\bmen\b|\bman\b|for him").expect("valid regex")
});

/// Label followed by an optional separator, capturing up to the next sentence terminator
fn notes_label(label: &str) -> Regex {
    Regex::new(&format!(r"(?i)(?:{label})\s*[:：\-–]?\s*([^.!?\n]*)")).expect("valid regex")
}

/// Removes HTML tags and decodes the handful of entities merchants actually use.
///
/// Block-level closing tags become line breaks so that adjacent paragraphs do not
/// run into each other.
pub fn strip_markup(html: &str) -> String {
    let with_breaks = BLOCK_TAG.replace_all(html, "\n");
    let without_tags = ANY_TAG.replace_all(&with_breaks, " ");
    let decoded = decode_entities(&without_tags);

    decoded
        .lines()
        .map(|line| INLINE_SPACE.replace_all(line, " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_entities(text: &str) -> String {
    const ENTITIES: &[(&str, &str)] = &[
        ("&nbsp;", " "),
        ("&eacute;", "é"),
        ("&egrave;", "è"),
        ("&ecirc;", "ê"),
        ("&agrave;", "à"),
        ("&ccedil;", "ç"),
        ("&oelig;", "œ"),
        ("&rsquo;", "’"),
        ("&#39;", "'"),
        ("&quot;", "\""),
        ("&lt;", "<"),
        ("&gt;", ">"),
        // last, so that `&amp;lt;` stays `&lt;`
        ("&amp;", "&"),
    ];

    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, replacement)| {
            acc.replace(entity, replacement)
        })
}

/// Olfactive pyramid parsed from a description
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notes {
    pub top: Vec<String>,
    pub heart: Vec<String>,
    pub base: Vec<String>,
}

/// Extracts top, heart and base notes from plain text
pub fn extract_notes(text: &str) -> Notes {
    Notes {
        top: notes_after(&TOP_LABEL, text),
        heart: notes_after(&HEART_LABEL, text),
        base: notes_after(&BASE_LABEL, text),
    }
}

fn notes_after(label: &Regex, text: &str) -> Vec<String> {
    label
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|list| split_notes(list.as_str()))
        .unwrap_or_default()
}

fn split_notes(list: &str) -> Vec<String> {
    list.split([',', ';', '/', '·', '•'])
        .map(str::trim)
        .filter(|note| !note.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lowercases and strips diacritics (`Tête` -> `tete`, `Cœur` -> `cœur`)
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Infers gender positioning from normalized product text.
///
/// Feminine markers are tested first. A masculine marker found as well turns the
/// result into `Unisex`; a masculine marker alone gives `Homme`.
pub fn infer_gender(normalized: &str) -> Gender {
    let mut gender = Gender::Unisex;
    if FEMININE.is_match(normalized) {
        gender = Gender::Femme;
    }
    if MASCULINE.is_match(normalized) {
        gender = if gender == Gender::Femme {
            Gender::Unisex
        } else {
            Gender::Homme
        };
    }
    gender
}
