//! Questionnaire-based product scoring.
//!
//! Each answer contributes a fixed weight when it is present and the product's
//! profile text (title, brand, gender and notes) matches the pattern associated
//! with that answer. Scores are additive; an absent answer never contributes.
//!
//! Answer values are looked up after diacritics folding (`Boisé` finds the
//! `boise` row), but the patterns themselves run against the item text as is,
//! so they spell out accented variants where it matters.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    models::{Answers, CatalogItem, Gender, PriceBand, Recommendation},
    services::text,
};

/// Number of items returned when the caller does not ask for another amount
pub const DEFAULT_LIMIT: usize = 5;

/// Independent scoring signals and their weights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Gender,
    Profile,
    Intensity,
    Occasion,
    Budget,
    FormatOil,
    FormatEdp,
    Sensitivity,
}

impl Signal {
    pub const fn weight(self) -> i32 {
        match self {
            Signal::Gender => 2,
            Signal::Profile => 3,
            Signal::Intensity => 1,
            Signal::Occasion => 1,
            Signal::Budget => 2,
            Signal::FormatOil => 2,
            Signal::FormatEdp => 1,
            Signal::Sensitivity => -1,
        }
    }
}

/// Olfactive family answer -> notes that signal it
const PROFILE_PATTERNS: &[(&str, &str)] = &[
    (
        "floral",
        r"floral|fleur|rose|jasmin|iris|tub[ée]reuse|pivoine|muguet|ylang|n[ée]roli|violette|magnolia|lys",
    ),
    (
        "boise",
        r"bois|wood|c[èe]dre|cedar|santal|sandal|v[ée]tiver|patchouli|oud|gaïac|gaiac",
    ),
    (
        "ambre",
        r"ambr|amber|oriental|encens|incense|benjoin|myrrhe|r[ée]sine|labdanum|oud",
    ),
    (
        "oriental",
        r"ambr|amber|oriental|encens|incense|benjoin|myrrhe|r[ée]sine|labdanum|oud",
    ),
    (
        "frais",
        r"frais|fresh|agrume|citrus|bergamot|citron|lemon|pamplemousse|grapefruit|mandarin|orange|menthe|mint|marin|aquatique|verveine",
    ),
    (
        "hesperide",
        r"agrume|citrus|bergamot|citron|lemon|pamplemousse|grapefruit|mandarin|orange|yuzu",
    ),
    (
        "gourmand",
        r"gourmand|vanill|caramel|pralin|chocolat|cacao|caf[ée]|coffee|miel|honey|tonka|amande|almond",
    ),
    (
        "epice",
        r"[ée]pic|spic|poivre|pepper|cannelle|cinnamon|cardamome|cardamom|safran|saffron|gingembre|ginger|girofle|muscade",
    ),
    ("musque", r"musc|musk"),
    ("cuir", r"cuir|leather|tabac|tobacco|daim|suede"),
];

/// Intensity answer -> descriptive words that signal it
const INTENSITY_PATTERNS: &[(&str, &str)] = &[
    (
        "leger",
        r"l[ée]ger|light|frais|fresh|eau de toilette|\bedt\b|cologne|agrume|citrus",
    ),
    ("discret", r"l[ée]ger|light|doux|soft|musc|musk|cologne"),
    ("modere", r"[ée]quilibr|modéré|modere|eau de parfum|\bedp\b|floral|rose"),
    ("moyen", r"[ée]quilibr|modéré|modere|eau de parfum|\bedp\b|floral|rose"),
    (
        "intense",
        r"intense|puissant|extrait|oud|ambr|amber|cuir|leather|noir|strong",
    ),
    (
        "fort",
        r"intense|puissant|extrait|oud|ambr|amber|cuir|leather|noir|strong",
    ),
];

/// Keywords of a heavy fragrance; penalized for sensitive users
static STRONG: Lazy<Regex> = Lazy::new(|| ci(r"intense|puissant|extrait|oud|strong"));

static OIL: Lazy<Regex> = Lazy::new(|| ci(r"huile|oil|musc|musk"));
static EAU_DE_PARFUM: Lazy<Regex> = Lazy::new(|| ci(r"eau de parfum|\bedp\b"));

static EVENT_OCCASION: Lazy<Regex> =
    Lazy::new(|| ci(r"soir|soiree|evenement|fete|mariage|sortie|rendez|date|night|party|event"));
static DAILY_OCCASION: Lazy<Regex> =
    Lazy::new(|| ci(r"quotidien|tous les jours|bureau|travail|journee|daily|office|work"));
static EVENT_NOTES: Lazy<Regex> = Lazy::new(|| {
    ci(r"soir|nuit|night|intense|ambr|amber|oud|vanill|cuir|leather|[ée]pic|spic|noir")
});
static DAILY_NOTES: Lazy<Regex> = Lazy::new(|| {
    ci(r"frais|fresh|l[ée]ger|light|agrume|citrus|bergamot|citron|musc|musk|th[ée]\b|tea|quotidien|daily")
});

static PROFILE_RULES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| compile(PROFILE_PATTERNS));
static INTENSITY_RULES: Lazy<Vec<(&'static str, Regex)>> =
    Lazy::new(|| compile(INTENSITY_PATTERNS));

fn ci(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){}", pattern)).expect("valid regex")
}

fn compile(table: &[(&'static str, &str)]) -> Vec<(&'static str, Regex)> {
    table.iter().map(|(key, pattern)| (*key, ci(pattern))).collect()
}

/// First rule whose key appears in the folded answer
fn lookup<'a>(rules: &'a [(&'static str, Regex)], answer: &str) -> Option<&'a Regex> {
    let folded = text::normalize(answer);
    rules
        .iter()
        .find(|(key, _)| folded.contains(key))
        .map(|(_, pattern)| pattern)
}

/// Pattern an occasion answer is matched with.
///
/// Event and daily answers map to note families; anything else is matched
/// literally, each listed occasion being one alternative.
fn occasion_pattern(occasion: &str) -> Option<Regex> {
    let folded = text::normalize(occasion);
    if EVENT_OCCASION.is_match(&folded) {
        return Some((*EVENT_NOTES).clone());
    }
    if DAILY_OCCASION.is_match(&folded) {
        return Some((*DAILY_NOTES).clone());
    }

    let alternatives: Vec<String> = occasion
        .to_lowercase()
        .split([',', ';', '/', '|'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(regex::escape)
        .collect();
    if alternatives.is_empty() {
        return None;
    }

    Regex::new(&format!("(?i){}", alternatives.join("|"))).ok()
}

fn is_affirmative(answer: &str) -> bool {
    let folded = text::normalize(answer.trim());
    ["oui", "yes", "true", "1"]
        .iter()
        .any(|word| folded.starts_with(word))
}

/// Signals an item satisfies for the given answers, in table order
pub fn matched_signals(item: &CatalogItem, answers: &Answers) -> Vec<Signal> {
    let profile_text = item.profile_text();
    let mut signals = Vec::new();

    if let Some(gender) = answers.gender.as_deref().and_then(Gender::from_answer) {
        if gender == item.gender {
            signals.push(Signal::Gender);
        }
    }

    if let Some(pattern) = answers
        .profile
        .as_deref()
        .and_then(|profile| lookup(&PROFILE_RULES, profile))
    {
        if pattern.is_match(&profile_text) {
            signals.push(Signal::Profile);
        }
    }

    if let Some(pattern) = answers
        .intensity
        .as_deref()
        .and_then(|intensity| lookup(&INTENSITY_RULES, intensity))
    {
        if pattern.is_match(&profile_text) {
            signals.push(Signal::Intensity);
        }
    }

    if let Some(pattern) = answers.occasion.as_deref().and_then(occasion_pattern) {
        if pattern.is_match(&profile_text) {
            signals.push(Signal::Occasion);
        }
    }

    if let Some(band) = answers.budget.as_deref().and_then(PriceBand::from_budget) {
        if band == item.price_band {
            signals.push(Signal::Budget);
        }
    }

    if let Some(format) = answers.format.as_deref() {
        let folded = text::normalize(format.trim());
        if (folded.starts_with("huile") || folded.starts_with("oil")) && OIL.is_match(&profile_text)
        {
            signals.push(Signal::FormatOil);
        }
        if folded == "eau de parfum" && EAU_DE_PARFUM.is_match(&profile_text) {
            signals.push(Signal::FormatEdp);
        }
    }

    if answers.sensitivity.as_deref().is_some_and(is_affirmative) && STRONG.is_match(&profile_text)
    {
        signals.push(Signal::Sensitivity);
    }

    signals
}

/// Affinity score of an item for the given answers
pub fn score(item: &CatalogItem, answers: &Answers) -> i32 {
    matched_signals(item, answers)
        .into_iter()
        .map(Signal::weight)
        .sum()
}

/// Ranks the catalog by score and returns the best `limit` items.
///
/// The sort is stable, so equally scored items keep their catalog order. No
/// minimum score applies: a small catalog returns every item.
pub fn recommend(items: &[CatalogItem], answers: &Answers, limit: usize) -> Vec<Recommendation> {
    let mut scored: Vec<(i32, &CatalogItem)> =
        items.iter().map(|item| (score(item, answers), item)).collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .take(limit)
        .map(|(_, item)| Recommendation::from(item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn item(title: &str, brand: &str, gender: Gender, price: &str) -> CatalogItem {
        let price = Decimal::from_str(price).unwrap();
        CatalogItem {
            id: format!("gid://shopify/Product/{}", title),
            handle: title.to_lowercase().replace(' ', "-"),
            title: title.to_string(),
            brand: brand.to_string(),
            gender,
            notes_top: vec![],
            notes_heart: vec![],
            notes_base: vec![],
            price,
            price_band: PriceBand::from_price(price),
            currency: "EUR".to_string(),
            image: String::new(),
            url: String::new(),
            variant_id: String::new(),
        }
    }

    fn with_notes(mut item: CatalogItem, top: &[&str], heart: &[&str], base: &[&str]) -> CatalogItem {
        let owned = |notes: &[&str]| -> Vec<String> { notes.iter().map(|n| n.to_string()).collect() };
        item.notes_top = owned(top);
        item.notes_heart = owned(heart);
        item.notes_base = owned(base);
        item
    }

    fn answers(json: &str) -> Answers {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_empty_answers_score_zero() {
        let items = vec![
            item("Rose Noire", "Maison Lune", Gender::Femme, "32"),
            item("Oud Intense", "", Gender::Homme, "89"),
            with_notes(
                item("Musc Blanc", "Atelier", Gender::Unisex, "19"),
                &["Bergamote"],
                &["Rose"],
                &["Musc"],
            ),
        ];
        for item in &items {
            assert_eq!(score(item, &Answers::default()), 0);
        }
    }

    #[test]
    fn test_gender_signal() {
        let femme = item("Rose", "", Gender::Femme, "30");
        let unisex = item("Cologne", "", Gender::Unisex, "30");

        assert_eq!(score(&femme, &answers(r#"{"gender":"Femme"}"#)), 2);
        assert_eq!(score(&femme, &answers(r#"{"gender":"Homme"}"#)), 0);
        assert_eq!(score(&unisex, &answers(r#"{"gender":"Mixte"}"#)), 2);
    }

    #[test]
    fn test_profile_signal_matches_notes() {
        let woody = with_notes(
            item("Nuit Sauvage", "", Gender::Unisex, "45"),
            &["Poivre"],
            &["Cèdre"],
            &["Santal"],
        );
        assert_eq!(score(&woody, &answers(r#"{"profile":"Boisé"}"#)), 3);
        assert_eq!(score(&woody, &answers(r#"{"profile":"Floral"}"#)), 0);
    }

    #[test]
    fn test_unknown_profile_is_noop() {
        let rose = item("Rose", "", Gender::Femme, "30");
        assert_eq!(score(&rose, &answers(r#"{"profile":"Aquatique lunaire"}"#)), 0);
    }

    #[test]
    fn test_intensity_signal() {
        let extrait = item("Oud Extrait", "", Gender::Homme, "95");
        assert_eq!(score(&extrait, &answers(r#"{"intensity":"Intense"}"#)), 1);
        assert_eq!(score(&extrait, &answers(r#"{"intensity":"Léger"}"#)), 0);
    }

    #[test]
    fn test_occasion_event_and_daily() {
        let amber = with_notes(item("Ambre Nuit", "", Gender::Unisex, "50"), &[], &[], &["Vanille"]);
        let citrus = with_notes(item("Eau Vive", "", Gender::Unisex, "22"), &["Citron"], &[], &[]);

        let evening = answers(r#"{"occasion":"Soirée"}"#);
        let office = answers(r#"{"occasion":"Au bureau"}"#);

        assert_eq!(score(&amber, &evening), 1);
        assert_eq!(score(&citrus, &evening), 0);
        assert_eq!(score(&citrus, &office), 1);
    }

    #[test]
    fn test_occasion_literal_list() {
        let beach = item("Plage Été", "", Gender::Unisex, "22");
        let other = item("Forêt", "", Gender::Unisex, "22");
        let occasion = answers(r#"{"occasion":["Vacances","Plage"]}"#);

        assert_eq!(score(&beach, &occasion), 1);
        assert_eq!(score(&other, &occasion), 0);
    }

    #[test]
    fn test_budget_signal() {
        let mid = item("Rose", "", Gender::Femme, "40");
        assert_eq!(score(&mid, &answers(r#"{"budget":"25–40€"}"#)), 2);
        assert_eq!(score(&mid, &answers(r#"{"budget":"40–60€"}"#)), 0);
        assert_eq!(score(&mid, &answers(r#"{"budget":"n'importe"}"#)), 0);
    }

    #[test]
    fn test_format_signals() {
        let oil = with_notes(item("Huile Sacrée", "", Gender::Unisex, "28"), &[], &[], &["Musc"]);
        let edp = item("Rose Eau de Parfum", "", Gender::Femme, "55");

        assert_eq!(score(&oil, &answers(r#"{"format":"Huile parfumée"}"#)), 2);
        assert_eq!(score(&edp, &answers(r#"{"format":"Eau de parfum"}"#)), 1);
        assert_eq!(score(&edp, &answers(r#"{"format":"Huile parfumée"}"#)), 0);
    }

    #[test]
    fn test_sensitivity_penalty() {
        let strong = item("Oud Intense", "", Gender::Homme, "90");
        let soft = item("Fleur de Coton", "", Gender::Unisex, "20");

        assert_eq!(score(&strong, &answers(r#"{"sensitivity":"Oui"}"#)), -1);
        assert_eq!(score(&strong, &answers(r#"{"sensitivity":"Non"}"#)), 0);
        assert_eq!(score(&soft, &answers(r#"{"sensitivity":"Oui"}"#)), 0);
    }

    #[test]
    fn test_signals_are_additive() {
        let rose = with_notes(
            item("Rose Noire", "Maison Lune", Gender::Femme, "32"),
            &["Bergamote"],
            &["Rose", "Jasmin"],
            &["Musc"],
        );
        let base = answers(r#"{"gender":"Femme"}"#);
        let more = answers(r#"{"gender":"Femme","profile":"Floral","budget":"25–40€"}"#);

        assert_eq!(score(&rose, &base), 2);
        assert_eq!(score(&rose, &more), 7);
        assert!(score(&rose, &more) >= score(&rose, &base));
    }

    #[test]
    fn test_recommend_orders_by_score_and_limits() {
        let items: Vec<CatalogItem> = (0..8)
            .map(|i| item(&format!("Item {}", i), "", Gender::Unisex, "30"))
            .chain(std::iter::once(item("Her Rose", "", Gender::Femme, "30")))
            .collect();

        let result = recommend(&items, &answers(r#"{"gender":"Femme"}"#), DEFAULT_LIMIT);

        assert_eq!(result.len(), DEFAULT_LIMIT);
        assert_eq!(result[0].title, "Her Rose");
        // ties keep catalog order
        let rest: Vec<&str> = result[1..].iter().map(|r| r.title.as_str()).collect();
        assert_eq!(rest, vec!["Item 0", "Item 1", "Item 2", "Item 3"]);
    }

    #[test]
    fn test_recommend_keeps_negative_scores() {
        let items = vec![item("Oud Intense", "", Gender::Homme, "90")];
        let result = recommend(&items, &answers(r#"{"sensitivity":"oui"}"#), DEFAULT_LIMIT);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_recommend_empty_catalog() {
        assert!(recommend(&[], &Answers::default(), DEFAULT_LIMIT).is_empty());
    }
}
