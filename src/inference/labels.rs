//! Labels file reading.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read class labels from file.
///
/// # File Format
/// - One label per line, in model output order
/// - Blank lines are ignored
/// - A `<index> <label>` or `<index>: <label>` prefix is stripped, so
///   class-name dumps from training tools can be used directly
///
/// # Errors
/// - Returns error if file cannot be read
/// - Returns error if no labels remain
pub fn read_labels(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| Error::LabelsRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let reader = BufReader::new(file);
    let mut labels = Vec::new();

    for line in reader.lines() {
        let line = line.map_err(|e| Error::LabelsRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let label = strip_index(line.trim());
        if !label.is_empty() {
            labels.push(label.to_string());
        }
    }

    if labels.is_empty() {
        return Err(Error::LabelsEmpty {
            path: path.to_path_buf(),
        });
    }

    Ok(labels)
}

/// Remove a leading numeric class index.
fn strip_index(line: &str) -> &str {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return line;
    }
    let rest = &line[digits..];
    let stripped = rest.trim_start_matches(':').trim_start();
    if stripped.len() == rest.len() {
        // digits glued to text, e.g. "3d_mushroom"
        return line;
    }
    stripped
}
