//! Mapping from trained model labels to canonical mushroom names.

/// Trained labels and their canonical names, in model output order.
///
/// Canonical names are the keys of the price table.
pub const CANONICAL_LABELS: &[(&str, &str)] = &[
    ("cremini_mushrooms", "Cremini Mushroom"),
    ("enoki_mushroom", "Enoki Mushroom"),
    ("morel_mushrooms", "Morel Mushroom"),
    ("oyster_mushroom", "Oyster Mushroom"),
    ("paddystraw_mushroom", "Paddy Straw Mushroom"),
    ("portobello_mushrooms", "Portobello Mushroom"),
    ("shiitake_mushroom", "Shiitake Mushroom"),
    ("white_button_mushrooms", "White Button Mushroom"),
];

/// Class names of the trained model, used when no labels file is configured.
pub fn default_labels() -> Vec<String> {
    CANONICAL_LABELS
        .iter()
        .map(|(label, _)| (*label).to_string())
        .collect()
}

/// Map a raw model label to its canonical mushroom name.
///
/// Known labels are matched case-insensitively after trimming. Unknown
/// labels are title-cased with underscores turned into spaces. Blank input
/// yields `None`.
pub fn canonicalize(label: &str) -> Option<String> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return None;
    }

    let key = trimmed.to_lowercase();
    if let Some((_, name)) = CANONICAL_LABELS.iter().find(|(raw, _)| *raw == key) {
        return Some((*name).to_string());
    }

    Some(title_case(&trimmed.replace('_', " ")))
}

/// Normalize a label into the key form used by the mushroom info file.
pub fn label_key(label: &str) -> String {
    label.trim().to_lowercase().replace(' ', "_")
}

/// Uppercase the first letter of every word and lowercase the rest.
fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
