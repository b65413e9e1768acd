//! Command-line output for one-shot predictions and catalog listings.

use crate::catalog::{Catalog, Month, MushroomReport};
use crate::constants::confidence::DECIMAL_PLACES;
use crate::error::{Error, Result};
use crate::inference::Prediction;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;

/// Result document printed by `predict --json`.
#[derive(Debug, Serialize)]
pub struct PredictionDocument {
    /// Image file that was analyzed.
    pub source_file: String,
    /// Analysis timestamp.
    pub analysis_date: DateTime<Utc>,
    /// Model file used.
    pub model: String,
    /// Raw prediction, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<Prediction>,
    /// Catalog details, if a label was predicted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<MushroomReport>,
    /// Why there is no result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictionDocument {
    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::JsonSerialize { source: e })
    }

    /// Human-readable summary.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Image: {}", self.source_file);

        if let Some(error) = &self.error {
            let _ = writeln!(out, "Error: {error}");
            return out;
        }

        if let Some(prediction) = &self.prediction {
            let _ = writeln!(
                out,
                "Label: {} ({:.*}, {:?})",
                prediction.label, DECIMAL_PLACES, prediction.confidence, prediction.kind
            );
        }

        if let Some(report) = &self.result {
            write_report(&mut out, report);
        }

        out
    }
}

/// Append a report as indented text.
pub fn write_report(out: &mut String, report: &MushroomReport) {
    write_details(out, report);
    let _ = writeln!(out, "  Price ({}): {}", report.month, report.price);
}

/// Append everything except the price.
pub fn write_details(out: &mut String, report: &MushroomReport) {
    let _ = writeln!(out, "Mushroom: {}", report.display_name);
    if report.display_name != report.canonical_name {
        let _ = writeln!(out, "  Canonical name: {}", report.canonical_name);
    }
    if let Some(description) = &report.description {
        let _ = writeln!(out, "  Description: {description}");
    }
    if let Some(cultivation) = &report.cultivation {
        let _ = writeln!(out, "  Cultivation: {cultivation}");
    }
    if !report.nutrients.is_empty() {
        let _ = writeln!(out, "  Nutrients: {}", report.nutrients.join(", "));
    }
}

/// Price listing for every species in the table.
pub fn format_price_list(catalog: &Catalog, month: Month) -> String {
    let prices = catalog.prices();
    let width = prices.species().map(str::len).max().unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "Prices for {month} ({} species):", prices.len());
    for species in prices.species() {
        let price = prices.price_for(species, month).unwrap_or("-");
        let _ = writeln!(out, "  {species:<width$}  {price}");
    }
    out
}
