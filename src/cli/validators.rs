//! CLI argument validators.

use crate::catalog::Language;

/// Parse and validate confidence value (0.0-1.0).
pub fn parse_confidence(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(0.0..=1.0).contains(&value) {
        return Err(format!(
            "confidence must be between 0.0 and 1.0, got {value}"
        ));
    }

    Ok(value)
}

/// Parse a language code strictly (`en` or `hi`).
///
/// The web form is lenient; the CLI rejects typos instead of silently
/// falling back to English.
pub fn parse_language(s: &str) -> Result<Language, String> {
    match s.trim().to_lowercase().as_str() {
        "en" | "english" => Ok(Language::En),
        "hi" | "hindi" => Ok(Language::Hi),
        other => Err(format!("unsupported language '{other}' (use en or hi)")),
    }
}
