//! Bilingual mushroom descriptions loaded from JSON.

use crate::catalog::label_key;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Display language for descriptive text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Hindi.
    Hi,
}

impl Language {
    /// Language code as used in form values and JSON field suffixes.
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
        }
    }

    /// Parse a form value; anything other than Hindi falls back to English.
    pub fn from_code(code: &str) -> Self {
        if code.trim().eq_ignore_ascii_case("hi") {
            Self::Hi
        } else {
            Self::En
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// One species entry from the info file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MushroomInfo {
    /// Raw model label this entry describes.
    pub label: String,
    /// English name.
    pub name_en: Option<String>,
    /// Hindi name.
    pub name_hi: Option<String>,
    /// English description.
    pub description_en: Option<String>,
    /// Hindi description.
    pub description_hi: Option<String>,
    /// English cultivation notes.
    pub cultivation_en: Option<String>,
    /// Hindi cultivation notes.
    pub cultivation_hi: Option<String>,
    /// Nutrient highlights.
    pub nutrients: Vec<String>,
    /// Price range by month abbreviation.
    pub price: HashMap<String, String>,
}

/// Pick the requested language, falling back to the other one.
fn localized<'a>(
    language: Language,
    en: Option<&'a String>,
    hi: Option<&'a String>,
) -> Option<&'a str> {
    let (first, second) = match language {
        Language::En => (en, hi),
        Language::Hi => (hi, en),
    };
    first.or(second).map(String::as_str)
}

impl MushroomInfo {
    /// Localized display name.
    pub fn name(&self, language: Language) -> Option<&str> {
        localized(language, self.name_en.as_ref(), self.name_hi.as_ref())
    }

    /// Localized description.
    pub fn description(&self, language: Language) -> Option<&str> {
        localized(
            language,
            self.description_en.as_ref(),
            self.description_hi.as_ref(),
        )
    }

    /// Localized cultivation notes.
    pub fn cultivation(&self, language: Language) -> Option<&str> {
        localized(
            language,
            self.cultivation_en.as_ref(),
            self.cultivation_hi.as_ref(),
        )
    }

    /// Price range for a month abbreviation such as `Jan`.
    pub fn price_for(&self, month: &str) -> Option<&str> {
        self.price.get(month).map(String::as_str)
    }
}

/// The two layouts accepted for the info file.
#[derive(Deserialize)]
#[serde(untagged)]
enum InfoDocument {
    List(Vec<MushroomInfo>),
    Map(HashMap<String, MushroomInfo>),
}

/// Info entries keyed by normalized label.
#[derive(Debug, Clone, Default)]
pub struct InfoCatalog {
    entries: HashMap<String, MushroomInfo>,
}

impl InfoCatalog {
    /// Parse an info document from a JSON string.
    ///
    /// Accepts a list of entries carrying `label`, or an object keyed by label.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        let document: InfoDocument = serde_json::from_str(json)?;
        let entries = match document {
            InfoDocument::List(items) => items
                .into_iter()
                .filter(|item| !item.label.trim().is_empty())
                .map(|item| (label_key(&item.label), item))
                .collect(),
            InfoDocument::Map(map) => map
                .into_iter()
                .map(|(key, mut item)| {
                    if item.label.is_empty() {
                        item.label.clone_from(&key);
                    }
                    (label_key(&key), item)
                })
                .collect(),
        };
        Ok(Self { entries })
    }

    /// Load an info file.
    ///
    /// A missing file yields an empty catalog with a warning; unreadable or
    /// malformed files are errors.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!("Mushroom info file not found: {}", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| Error::InfoRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_json_str(&contents).map_err(|e| Error::InfoParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Find an entry by label or canonical name.
    pub fn get(&self, label: &str) -> Option<&MushroomInfo> {
        self.entries.get(&label_key(label))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const LIST_JSON: &str = r#"[
        {
            "label": "oyster_mushroom",
            "name_en": "Oyster Mushroom",
            "name_hi": "ढींगरी मशरूम",
            "description_en": "Fan-shaped caps growing in clusters.",
            "cultivation_hi": "भूसे पर उगाया जाता है।",
            "nutrients": ["Protein", "Vitamin B3"],
            "price": {"Jan": "200–250"}
        }
    ]"#;

    #[test]
    fn test_language_from_code() {
        assert_eq!(Language::from_code("hi"), Language::Hi);
        assert_eq!(Language::from_code(" HI "), Language::Hi);
        assert_eq!(Language::from_code("en"), Language::En);
        assert_eq!(Language::from_code("fr"), Language::En);
        assert_eq!(Language::from_code(""), Language::En);
    }

    #[test]
    fn test_parse_list_layout() {
        let catalog = InfoCatalog::from_json_str(LIST_JSON).unwrap();
        assert_eq!(catalog.len(), 1);
        let info = catalog.get("Oyster_Mushroom").unwrap();
        assert_eq!(info.nutrients, vec!["Protein", "Vitamin B3"]);
        assert_eq!(info.price_for("Jan"), Some("200–250"));
        assert_eq!(info.price_for("Feb"), None);
    }

    #[test]
    fn test_parse_map_layout_fills_label() {
        let json = r#"{"enoki_mushroom": {"name_en": "Enoki"}}"#;
        let catalog = InfoCatalog::from_json_str(json).unwrap();
        let info = catalog.get("enoki_mushroom").unwrap();
        assert_eq!(info.label, "enoki_mushroom");
        assert_eq!(info.name(Language::Hi), Some("Enoki"));
    }

    #[test]
    fn test_lookup_by_canonical_name() {
        let json = r#"{"Shiitake Mushroom": {"name_en": "Shiitake"}}"#;
        let catalog = InfoCatalog::from_json_str(json).unwrap();
        assert!(catalog.get("shiitake_mushroom").is_some());
        assert!(catalog.get("Shiitake Mushroom").is_some());
    }

    #[test]
    fn test_localized_fallback() {
        let catalog = InfoCatalog::from_json_str(LIST_JSON).unwrap();
        let info = catalog.get("oyster_mushroom").unwrap();

        assert_eq!(info.name(Language::Hi), Some("ढींगरी मशरूम"));
        assert_eq!(
            info.description(Language::Hi),
            Some("Fan-shaped caps growing in clusters.")
        );
        assert_eq!(
            info.cultivation(Language::En),
            Some("भूसे पर उगाया जाता है।")
        );
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let catalog = InfoCatalog::load(Path::new("/nonexistent/mushroom_info.json")).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_malformed_file_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let result = InfoCatalog::load(file.path());
        assert!(matches!(result, Err(Error::InfoParse { .. })));
    }
}
