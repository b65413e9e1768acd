//! ONNX Runtime session wrapper for the mushroom model.

use crate::catalog::default_labels;
use crate::config::{ModelConfig, validate_model_files};
use crate::error::{Error, Result};
use crate::inference::decode::best_class;
use crate::inference::labels::read_labels;
use crate::inference::preprocess::{load_image, to_nchw};
use crate::inference::{LabelPredictor, Prediction};
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::Tensor;
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;
use tracing::{debug, info};

/// Mushroom classifier backed by an ONNX model.
///
/// Works with both classification and detection exports; see
/// [`best_class`](crate::inference::decode::best_class).
pub struct MushroomClassifier {
    session: Mutex<Session>,
    labels: Vec<String>,
    input_size: u32,
    min_confidence: f32,
}

impl std::fmt::Debug for MushroomClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MushroomClassifier")
            .field("labels", &self.labels.len())
            .field("input_size", &self.input_size)
            .field("min_confidence", &self.min_confidence)
            .finish_non_exhaustive()
    }
}

/// Build an ONNX Runtime session for the model file.
fn build_session(path: &Path, intra_threads: usize) -> ort::Result<Session> {
    Session::builder()?
        .with_optimization_level(GraphOptimizationLevel::Level3)?
        .with_intra_threads(intra_threads)?
        .commit_from_file(path)
}

impl MushroomClassifier {
    /// Build a classifier from model configuration.
    pub fn from_config(model: &ModelConfig) -> Result<Self> {
        validate_model_files(model)?;

        let labels = match &model.labels {
            Some(path) => {
                debug!("Reading labels: {}", path.display());
                read_labels(path)?
            }
            None => default_labels(),
        };

        let session = build_session(&model.path, model.intra_threads).map_err(|e| {
            Error::ClassifierBuild {
                reason: e.to_string(),
            }
        })?;

        info!(
            "Loaded model: {}, labels: {}, input: {}x{}, min_confidence: {}",
            model.path.display(),
            labels.len(),
            model.input_size,
            model.input_size,
            model.min_confidence
        );

        Ok(Self {
            session: Mutex::new(session),
            labels,
            input_size: model.input_size,
            min_confidence: model.min_confidence,
        })
    }

    /// Run the model on prepared NCHW data and return the raw output.
    fn run(&self, pixels: Vec<f32>) -> Result<(Vec<i64>, Vec<f32>)> {
        let inference_err = |e: ort::Error| Error::Inference {
            reason: e.to_string(),
        };

        let size = self.input_size as usize;
        let input = Tensor::from_array(([1_usize, 3, size, size], pixels)).map_err(inference_err)?;

        let mut session = self.session.lock().map_err(|_| Error::Internal {
            message: "model session lock poisoned".to_string(),
        })?;

        let outputs = session.run(ort::inputs![input]).map_err(inference_err)?;
        let (shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(inference_err)?;

        Ok((shape.iter().copied().collect(), data.to_vec()))
    }
}

impl LabelPredictor for MushroomClassifier {
    fn predict(&self, image: &Path) -> Result<Option<Prediction>> {
        let start = Instant::now();
        let decoded = load_image(image)?;
        let pixels = to_nchw(&decoded, self.input_size);

        let (shape, data) = self.run(pixels)?;
        let best = best_class(&shape, &data, self.labels.len(), self.min_confidence)?;

        debug!(
            "Inference on {} took {:?}, output shape {:?}",
            image.display(),
            start.elapsed(),
            shape
        );

        Ok(best.and_then(|b| {
            self.labels.get(b.class_index).map(|label| Prediction {
                label: label.clone(),
                class_index: b.class_index,
                confidence: b.confidence,
                kind: b.kind,
            })
        }))
    }
}
