//! Inference module for mushroom identification.

mod classifier;
pub mod decode;
mod labels;
pub mod preprocess;

pub use classifier::MushroomClassifier;
pub use decode::PredictionKind;
pub use labels::read_labels;

use crate::error::Result;
use serde::Serialize;
use std::path::Path;

/// A label predicted for one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Raw model label.
    pub label: String,
    /// Index of the label in the model output.
    pub class_index: usize,
    /// Model score for the label.
    pub confidence: f32,
    /// Head that produced the label.
    pub kind: PredictionKind,
}

/// Something that can name the mushroom in an image file.
///
/// `Ok(None)` means the model ran but nothing cleared the confidence bar.
pub trait LabelPredictor: Send + Sync {
    /// Predict the label for an image on disk.
    fn predict(&self, image: &Path) -> Result<Option<Prediction>>;
}
