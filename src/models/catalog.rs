use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Gender positioning derived from product text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Femme,
    Homme,
    #[default]
    Unisex,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Femme => "femme",
            Gender::Homme => "homme",
            Gender::Unisex => "unisex",
        }
    }

    /// Maps a questionnaire answer (`Femme`, `Homme`, `Mixte`) to a gender
    pub fn from_answer(answer: &str) -> Option<Self> {
        match answer.trim().to_lowercase().as_str() {
            "femme" => Some(Gender::Femme),
            "homme" => Some(Gender::Homme),
            "mixte" | "unisex" => Some(Gender::Unisex),
            _ => None,
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse price bucket used for budget matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceBand {
    #[serde(rename = "<25")]
    Under25,
    #[serde(rename = "25-40")]
    From25To40,
    #[serde(rename = "40-60")]
    From40To60,
    #[serde(rename = "+60")]
    Over60,
}

impl PriceBand {
    /// Upper bounds are inclusive: 40.00 is `25-40`, 60.00 is `40-60`.
    pub fn from_price(price: Decimal) -> Self {
        if price < Decimal::from(25) {
            PriceBand::Under25
        } else if price <= Decimal::from(40) {
            PriceBand::From25To40
        } else if price <= Decimal::from(60) {
            PriceBand::From40To60
        } else {
            PriceBand::Over60
        }
    }

    /// Parses a budget answer as shown in the questionnaire.
    ///
    /// Accepts the display strings with currency symbols and either dash,
    /// e.g. `<25€`, `25–40€`, `40-60 €`, `+60€`, `60€+`.
    pub fn from_budget(budget: &str) -> Option<Self> {
        let compact: String = budget
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '€' | '$' | '£'))
            .map(|c| match c {
                '–' | '—' | '−' => '-',
                other => other,
            })
            .collect::<String>()
            .to_lowercase();

        match compact.as_str() {
            "<25" | "-25" | "moinsde25" | "under25" => Some(PriceBand::Under25),
            "25-40" => Some(PriceBand::From25To40),
            "40-60" => Some(PriceBand::From40To60),
            "+60" | "60+" | ">60" | "plusde60" | "over60" => Some(PriceBand::Over60),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceBand::Under25 => "<25",
            PriceBand::From25To40 => "25-40",
            PriceBand::From40To60 => "40-60",
            PriceBand::Over60 => "+60",
        }
    }
}

impl Display for PriceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One storefront product after normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub brand: String,
    pub gender: Gender,
    pub notes_top: Vec<String>,
    pub notes_heart: Vec<String>,
    pub notes_base: Vec<String>,
    pub price: Decimal,
    pub price_band: PriceBand,
    pub currency: String,
    pub image: String,
    pub url: String,
    pub variant_id: String,
}

impl CatalogItem {
    /// Title, brand, gender and notes joined by spaces; the text scoring rules match against.
    pub fn profile_text(&self) -> String {
        let mut parts: Vec<&str> = vec![
            self.title.as_str(),
            self.brand.as_str(),
            self.gender.as_str(),
        ];
        parts.extend(self.notes_top.iter().map(String::as_str));
        parts.extend(self.notes_heart.iter().map(String::as_str));
        parts.extend(self.notes_base.iter().map(String::as_str));
        parts.join(" ")
    }

    /// Price with two decimals followed by the currency symbol, e.g. `29.00 €`
    pub fn display_price(&self) -> String {
        format!("{:.2} {}", self.price.round_dp(2), currency_symbol(&self.currency))
    }

    /// Brand and gender joined by ` · `, skipping empty parts
    pub fn badge(&self) -> String {
        [self.brand.trim(), self.gender.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

fn currency_symbol(code: &str) -> &str {
    match code {
        "EUR" | "" => "€",
        "USD" | "CAD" | "AUD" => "$",
        "GBP" => "£",
        "CHF" => "CHF",
        other => other,
    }
}

/// Compact view of a recommended item returned to the storefront widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub title: String,
    pub url: String,
    pub image: String,
    pub price: String,
    pub badge: String,
    pub variant_id: String,
}

impl From<&CatalogItem> for Recommendation {
    fn from(item: &CatalogItem) -> Self {
        Self {
            title: item.title.clone(),
            url: item.url.clone(),
            image: item.image.clone(),
            price: item.display_price(),
            badge: item.badge(),
            variant_id: item.variant_id.clone(),
        }
    }
}
