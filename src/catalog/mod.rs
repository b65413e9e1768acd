//! Mushroom names, descriptions and prices.
//!
//! The catalog turns a raw model label into everything the result page
//! shows: canonical name, localized text, nutrients and the price range for
//! the selected month.

mod canonical;
mod info;
mod month;
mod prices;

pub use canonical::{CANONICAL_LABELS, canonicalize, default_labels, label_key};
pub use info::{InfoCatalog, Language, MushroomInfo};
pub use month::Month;
pub use prices::PriceTable;

use crate::config::CatalogConfig;
use crate::constants::PRICE_NOT_AVAILABLE;
use crate::error::Result;
use serde::Serialize;
use tracing::{debug, info};

/// Everything known about an identified mushroom for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MushroomReport {
    /// Label as produced by the model.
    pub label: String,
    /// Canonical species name.
    pub canonical_name: String,
    /// Name in the requested language.
    pub display_name: String,
    /// Description, if known.
    pub description: Option<String>,
    /// Cultivation notes, if known.
    pub cultivation: Option<String>,
    /// Nutrient highlights.
    pub nutrients: Vec<String>,
    /// Month the price refers to, as given or abbreviated.
    pub month: String,
    /// Price range, or the "not available" text.
    pub price: String,
    /// Language of the text fields.
    pub language: Language,
}

/// Lookup tables used to describe predictions.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    info: InfoCatalog,
    prices: PriceTable,
}

impl Catalog {
    /// Build a catalog from its parts.
    pub fn new(info: InfoCatalog, prices: PriceTable) -> Self {
        Self { info, prices }
    }

    /// Load the catalog described by the configuration.
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let prices = match &config.price_table {
            Some(path) => {
                info!("Loading price table: {}", path.display());
                PriceTable::from_csv(path)?
            }
            None => PriceTable::builtin(),
        };

        let info = match &config.info_path {
            Some(path) => InfoCatalog::load(path)?,
            None => InfoCatalog::default(),
        };

        info!(
            "Catalog ready: {} priced species, {} info entries",
            prices.len(),
            info.len()
        );

        Ok(Self { info, prices })
    }

    /// Price table in use.
    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    /// Info entries in use.
    pub fn info(&self) -> &InfoCatalog {
        &self.info
    }

    /// Describe a raw model label.
    ///
    /// `month` is the month as the user supplied it; `None` means the current
    /// month. Returns `None` only for a blank label.
    pub fn describe(
        &self,
        label: &str,
        month: Option<&str>,
        language: Language,
    ) -> Option<MushroomReport> {
        let canonical_name = canonicalize(label)?;
        let entry = self
            .info
            .get(label)
            .or_else(|| self.info.get(&canonical_name));

        let (month_text, parsed) = match month.map(str::trim).filter(|m| !m.is_empty()) {
            Some(raw) => match raw.parse::<Month>() {
                Ok(parsed) => (parsed.abbrev().to_string(), Some(parsed)),
                Err(_) => (raw.to_string(), None),
            },
            None => {
                let current = Month::current();
                (current.abbrev().to_string(), Some(current))
            }
        };

        let price = parsed
            .and_then(|m| {
                entry
                    .and_then(|e| e.price_for(m.abbrev()))
                    .or_else(|| self.prices.price_for(&canonical_name, m))
            })
            .unwrap_or(PRICE_NOT_AVAILABLE)
            .to_string();

        debug!(
            "Described '{}' as '{}' (info entry: {}, month: {}, price: {})",
            label,
            canonical_name,
            entry.is_some(),
            month_text,
            price
        );

        Some(MushroomReport {
            label: label.trim().to_string(),
            display_name: entry
                .and_then(|e| e.name(language))
                .map_or_else(|| canonical_name.clone(), str::to_string),
            description: entry
                .and_then(|e| e.description(language))
                .map(str::to_string),
            cultivation: entry
                .and_then(|e| e.cultivation(language))
                .map(str::to_string),
            nutrients: entry.map(|e| e.nutrients.clone()).unwrap_or_default(),
            canonical_name,
            month: month_text,
            price,
            language,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog_with_info() -> Catalog {
        let info = InfoCatalog::from_json_str(
            r#"[{
                "label": "enoki_mushroom",
                "name_en": "Enoki",
                "name_hi": "एनोकी",
                "description_en": "Long thin white stems.",
                "nutrients": ["Fiber"],
                "price": {"Mar": "999–1111"}
            }]"#,
        )
        .unwrap();
        Catalog::new(info, PriceTable::builtin())
    }

    #[test]
    fn test_describe_uses_builtin_price() {
        let catalog = Catalog::new(InfoCatalog::default(), PriceTable::builtin());
        let report = catalog
            .describe("white_button_mushrooms", Some("jan"), Language::En)
            .unwrap();
        assert_eq!(report.canonical_name, "White Button Mushroom");
        assert_eq!(report.display_name, "White Button Mushroom");
        assert_eq!(report.month, "Jan");
        assert_eq!(report.price, "160–200");
        assert!(report.description.is_none());
        assert!(report.nutrients.is_empty());
    }

    #[test]
    fn test_describe_info_price_wins_over_table() {
        let report = catalog_with_info()
            .describe("enoki_mushroom", Some("Mar"), Language::En)
            .unwrap();
        assert_eq!(report.price, "999–1111");
        assert_eq!(report.display_name, "Enoki");
        assert_eq!(report.nutrients, vec!["Fiber"]);
    }

    #[test]
    fn test_describe_falls_back_to_table_for_other_months() {
        let report = catalog_with_info()
            .describe("enoki_mushroom", Some("Apr"), Language::Hi)
            .unwrap();
        assert_eq!(report.price, "900–1050");
        assert_eq!(report.display_name, "एनोकी");
        assert_eq!(
            report.description.as_deref(),
            Some("Long thin white stems.")
        );
        assert_eq!(report.language, Language::Hi);
    }

    #[test]
    fn test_describe_unknown_species_has_no_price() {
        let catalog = Catalog::new(InfoCatalog::default(), PriceTable::builtin());
        let report = catalog
            .describe("fly_agaric", Some("Jun"), Language::En)
            .unwrap();
        assert_eq!(report.canonical_name, "Fly Agaric");
        assert_eq!(report.price, PRICE_NOT_AVAILABLE);
    }

    #[test]
    fn test_describe_unparseable_month_keeps_text() {
        let catalog = Catalog::new(InfoCatalog::default(), PriceTable::builtin());
        let report = catalog
            .describe("oyster_mushroom", Some("Smarch"), Language::En)
            .unwrap();
        assert_eq!(report.month, "Smarch");
        assert_eq!(report.price, PRICE_NOT_AVAILABLE);
    }

    #[test]
    fn test_describe_missing_month_uses_current() {
        let catalog = Catalog::new(InfoCatalog::default(), PriceTable::builtin());
        let report = catalog
            .describe("oyster_mushroom", None, Language::En)
            .unwrap();
        assert_eq!(report.month, Month::current().abbrev());
        assert_ne!(report.price, PRICE_NOT_AVAILABLE);
    }

    #[test]
    fn test_describe_blank_label() {
        let catalog = Catalog::default();
        assert!(catalog.describe("  ", Some("Jan"), Language::En).is_none());
    }
}
