//! Month-indexed price ranges per species.

use crate::catalog::Month;
use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Built-in price ranges (INR per kg) for the trained species, January to December.
const BUILTIN_PRICES: &[(&str, [&str; 12])] = &[
    (
        "White Button Mushroom",
        [
            "160–200", "150–190", "140–180", "130–170", "130–160", "140–170", "150–180",
            "160–200", "170–210", "180–220", "170–210", "160–200",
        ],
    ),
    (
        "Oyster Mushroom",
        [
            "200–250", "180–230", "170–220", "160–210", "150–200", "160–210", "170–220",
            "180–240", "190–250", "200–260", "190–250", "180–240",
        ],
    ),
    (
        "Shiitake Mushroom",
        [
            "750–900", "720–880", "700–850", "680–820", "650–800", "670–820", "700–850",
            "720–870", "740–880", "760–900", "740–880", "730–870",
        ],
    ),
    (
        "Portobello Mushroom",
        [
            "280–350", "300–370", "300–380", "310–390", "320–400", "330–420", "340–430",
            "350–440", "360–450", "370–460", "360–440", "340–420",
        ],
    ),
    (
        "Enoki Mushroom",
        [
            "950–1200", "950–1150", "930–1100", "900–1050", "900–1050", "920–1100",
            "950–1150", "950–1200", "960–1200", "980–1250", "960–1200", "950–1200",
        ],
    ),
    (
        "Morel Mushroom",
        [
            "16000–20000", "15500–19000", "15000–18500", "14500–18000", "14000–17500",
            "14500–18000", "15000–18500", "15500–19000", "16000–20000", "16500–20500",
            "16000–20000", "15500–19500",
        ],
    ),
    (
        "Paddy Straw Mushroom",
        [
            "130–170", "140–180", "150–200", "150–200", "160–220", "170–230", "180–250",
            "200–270", "190–260", "170–230", "150–200", "140–180",
        ],
    ),
    (
        "Cremini Mushroom",
        [
            "240–320", "250–330", "250–340", "260–350", "260–360", "270–370", "280–380",
            "280–390", "290–400", "300–410", "280–390", "260–370",
        ],
    ),
];

/// Species name to per-month price range.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    entries: BTreeMap<String, HashMap<Month, String>>,
}

impl PriceTable {
    /// Table with the built-in prices for the trained species.
    pub fn builtin() -> Self {
        let entries = BUILTIN_PRICES
            .iter()
            .map(|(species, ranges)| {
                let by_month = Month::ALL
                    .iter()
                    .zip(ranges)
                    .map(|(month, range)| (*month, (*range).to_string()))
                    .collect();
                ((*species).to_string(), by_month)
            })
            .collect();
        Self { entries }
    }

    /// Load a table from CSV.
    ///
    /// # File Format
    /// - Header: `species` followed by month columns (`Jan`..`Dec`, any order,
    ///   full names and numbers accepted)
    /// - One row per species; empty cells are skipped
    pub fn from_csv(path: &Path) -> Result<Self> {
        let read_err = |source| Error::PriceTableRead {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(read_err)?;

        let headers = reader.headers().map_err(read_err)?.clone();
        if headers.is_empty() {
            return Err(Error::PriceTableFormat {
                path: path.to_path_buf(),
                message: "missing header row".to_string(),
            });
        }

        let months = headers
            .iter()
            .skip(1)
            .map(|column| {
                column.parse::<Month>().map_err(|message| Error::PriceTableFormat {
                    path: path.to_path_buf(),
                    message,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut entries = BTreeMap::new();
        for record in reader.records() {
            let record = record.map_err(read_err)?;
            let Some(species) = record.get(0).filter(|s| !s.is_empty()) else {
                continue;
            };

            let by_month: HashMap<Month, String> = months
                .iter()
                .zip(record.iter().skip(1))
                .filter(|(_, cell)| !cell.is_empty())
                .map(|(month, cell)| (*month, cell.to_string()))
                .collect();

            entries.insert(species.to_string(), by_month);
        }

        Ok(Self { entries })
    }

    /// Price range for a species in a month.
    pub fn price_for(&self, species: &str, month: Month) -> Option<&str> {
        self.entries
            .get(species)
            .and_then(|by_month| by_month.get(&month))
            .map(String::as_str)
    }

    /// Whether the table has an entry for the species.
    pub fn contains(&self, species: &str) -> bool {
        self.entries.contains_key(species)
    }

    /// Species names in alphabetical order.
    pub fn species(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of species in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
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

    #[test]
    fn test_builtin_covers_all_canonical_names() {
        let table = PriceTable::builtin();
        assert_eq!(table.len(), 8);
        for (_, name) in crate::catalog::CANONICAL_LABELS {
            assert!(table.contains(name), "missing prices for {name}");
        }
    }

    #[test]
    fn test_builtin_lookup() {
        let table = PriceTable::builtin();
        assert_eq!(
            table.price_for("Oyster Mushroom", Month::Jan),
            Some("200–250")
        );
        assert_eq!(
            table.price_for("Morel Mushroom", Month::Oct),
            Some("16500–20500")
        );
        assert_eq!(table.price_for("Fly Agaric", Month::Jan), None);
    }

    #[test]
    fn test_from_csv() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "species,Jan,February,3").unwrap();
        writeln!(file, "Oyster Mushroom, 210–260 ,190–240,").unwrap();
        writeln!(file, "Lion's Mane,900–1100,,880–1050").unwrap();

        let table = PriceTable::from_csv(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.price_for("Oyster Mushroom", Month::Jan),
            Some("210–260")
        );
        assert_eq!(
            table.price_for("Oyster Mushroom", Month::Feb),
            Some("190–240")
        );
        assert_eq!(table.price_for("Oyster Mushroom", Month::Mar), None);
        assert_eq!(table.price_for("Lion's Mane", Month::Mar), Some("880–1050"));
        assert_eq!(table.price_for("Lion's Mane", Month::Feb), None);
    }

    #[test]
    fn test_from_csv_rejects_bad_month_column() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "species,Jan,Smarch").unwrap();
        writeln!(file, "Oyster Mushroom,1,2").unwrap();

        let result = PriceTable::from_csv(file.path());
        assert!(matches!(result, Err(Error::PriceTableFormat { .. })));
    }

    #[test]
    fn test_from_csv_missing_file() {
        let result = PriceTable::from_csv(Path::new("/nonexistent/prices.csv"));
        assert!(matches!(result, Err(Error::PriceTableRead { .. })));
    }
}
