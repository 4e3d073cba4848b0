//! Inference service: the full prediction pipeline
//!
//! Owns the classifier backend and label table, both immutable after
//! construction, and exposes the single `predict` operation:
//! preprocess, forward pass, argmax, label lookup.

use image::DynamicImage;

use crate::error::{BreedwiseError, Result};
use crate::labels::LabelTable;
use crate::model::ClassifierBackend;
use crate::preprocess;

/// Top prediction for one image. Confidence is the raw model score in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
}

pub struct InferenceService {
    backend: Box<dyn ClassifierBackend>,
    labels: LabelTable,
}

impl InferenceService {
    pub fn new(backend: Box<dyn ClassifierBackend>, labels: LabelTable) -> Self {
        Self { backend, labels }
    }

    pub fn num_classes(&self) -> usize {
        self.labels.len()
    }

    /// Classify one decoded image.
    ///
    /// Deterministic for a fixed backend and input. Never panics: backend
    /// failures, empty score vectors, and an argmax index outside the label
    /// table all surface as errors.
    pub fn predict(&self, image: &DynamicImage) -> Result<Prediction> {
        let batch = preprocess::to_input_batch(image);
        let scores = self.backend.class_scores(batch.view())?;

        if scores.is_empty() {
            return Err(BreedwiseError::Prediction(
                "model returned an empty score vector".to_string(),
            ));
        }

        // Argmax; ties and NaNs resolve to the lowest index.
        let (top_index, top_score) = scores
            .iter()
            .copied()
            .enumerate()
            .fold((0usize, f32::NEG_INFINITY), |best, (i, score)| {
                if score > best.1 {
                    (i, score)
                } else {
                    best
                }
            });

        let label = self.labels.get(top_index).ok_or_else(|| {
            BreedwiseError::Prediction(format!(
                "class index {} outside label table ({} labels)",
                top_index,
                self.labels.len()
            ))
        })?;

        Ok(Prediction {
            label: label.to_string(),
            confidence: top_score,
        })
    }
}
