//! Interpretation of raw model output tensors.
//!
//! The same service runs classification exports (one score per class) and
//! detection exports (box regressions plus class scores per anchor). The
//! output shape tells them apart.

use crate::error::{Error, Result};
use serde::Serialize;

/// Which kind of head produced a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionKind {
    /// Whole-image class scores.
    Classification,
    /// Highest-scoring detected box.
    Detection,
}

/// Best class found in an output tensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestClass {
    /// Class index into the label list.
    pub class_index: usize,
    /// Score of that class.
    pub confidence: f32,
    /// Head that produced it.
    pub kind: PredictionKind,
}

/// Box coordinates preceding class scores in detection outputs.
const BOX_FIELDS: usize = 4;

/// Detection output layouts.
#[derive(Debug, Clone, Copy)]
enum DetectionLayout {
    /// `[1, 4 + C, N]`: one row per field, anchors along the last axis.
    FieldsFirst { anchors: usize },
    /// `[1, N, 4 + C]`: one row per anchor.
    AnchorsFirst { anchors: usize },
    /// `[1, N, 5 + C]`: one row per anchor with an objectness score.
    AnchorsWithObjectness { anchors: usize },
}

/// Find the best class in a model output.
///
/// Returns `Ok(None)` when there are no candidates or the best score is
/// below `min_confidence`.
pub fn best_class(
    shape: &[i64],
    data: &[f32],
    num_labels: usize,
    min_confidence: f32,
) -> Result<Option<BestClass>> {
    let unexpected = || Error::UnexpectedOutputShape {
        shape: shape.to_vec(),
        labels: num_labels,
    };

    let dims = shape
        .iter()
        .map(|d| usize::try_from(*d).ok())
        .collect::<Option<Vec<_>>>()
        .ok_or_else(unexpected)?;

    if num_labels == 0 || dims.iter().product::<usize>() != data.len() {
        return Err(unexpected());
    }

    let best = match dims.as_slice() {
        [c] | [1, c] if *c == num_labels => classification(data),
        [1, fields, anchors] if *fields == BOX_FIELDS + num_labels => {
            detection(data, num_labels, DetectionLayout::FieldsFirst { anchors: *anchors })
        }
        [1, anchors, fields] if *fields == BOX_FIELDS + num_labels => {
            detection(data, num_labels, DetectionLayout::AnchorsFirst { anchors: *anchors })
        }
        [1, anchors, fields] if *fields == BOX_FIELDS + 1 + num_labels => detection(
            data,
            num_labels,
            DetectionLayout::AnchorsWithObjectness { anchors: *anchors },
        ),
        _ => return Err(unexpected()),
    };

    Ok(best.filter(|b| b.confidence >= min_confidence))
}

/// Top-1 over class scores.
fn classification(scores: &[f32]) -> Option<BestClass> {
    argmax(scores.iter().copied()).map(|(class_index, confidence)| BestClass {
        class_index,
        confidence,
        kind: PredictionKind::Classification,
    })
}

/// Highest class score over all anchors.
fn detection(data: &[f32], num_labels: usize, layout: DetectionLayout) -> Option<BestClass> {
    let score = |anchor: usize, class: usize| -> f32 {
        match layout {
            DetectionLayout::FieldsFirst { anchors } => {
                data[(BOX_FIELDS + class) * anchors + anchor]
            }
            DetectionLayout::AnchorsFirst { .. } => {
                data[anchor * (BOX_FIELDS + num_labels) + BOX_FIELDS + class]
            }
            DetectionLayout::AnchorsWithObjectness { .. } => {
                let row = anchor * (BOX_FIELDS + 1 + num_labels);
                data[row + BOX_FIELDS] * data[row + BOX_FIELDS + 1 + class]
            }
        }
    };

    let anchors = match layout {
        DetectionLayout::FieldsFirst { anchors }
        | DetectionLayout::AnchorsFirst { anchors }
        | DetectionLayout::AnchorsWithObjectness { anchors } => anchors,
    };

    (0..anchors)
        .filter_map(|anchor| {
            argmax((0..num_labels).map(|class| score(anchor, class)))
        })
        .fold(None, |best: Option<(usize, f32)>, candidate| match best {
            Some(current) if current.1 >= candidate.1 => Some(current),
            _ => Some(candidate),
        })
        .map(|(class_index, confidence)| BestClass {
            class_index,
            confidence,
            kind: PredictionKind::Detection,
        })
}

/// Index and value of the largest finite element. Ties keep the first.
fn argmax(values: impl Iterator<Item = f32>) -> Option<(usize, f32)> {
    values
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .fold(None, |best, (index, value)| match best {
            Some((_, current)) if current >= value => best,
            _ => Some((index, value)),
        })
}
