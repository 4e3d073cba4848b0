//! Classifier backend: the opaque "batch in, scores out" capability
//!
//! The trained model is an external artifact. The service only depends on
//! [`ClassifierBackend`], so the concrete inference runtime can be swapped
//! (or stubbed in tests) without touching the prediction pipeline.

use std::path::Path;

use ndarray::ArrayView4;
use ort::{inputs, GraphOptimizationLevel, Session};

use crate::error::{BreedwiseError, Result};

/// Opaque classification model: given a normalized NHWC image batch,
/// return one score per class. Scores are expected to be softmax-like
/// (non-negative, summing to ~1) but that is not enforced here.
pub trait ClassifierBackend: Send + Sync {
    fn class_scores(&self, batch: ArrayView4<f32>) -> Result<Vec<f32>>;
}

/// ONNX Runtime backed classifier.
pub struct OnnxClassifier {
    session: Session,
    input_name: String,
    output_name: String,
}

impl OnnxClassifier {
    /// Load a model from an ONNX file. Fails if the file is missing or the
    /// graph cannot be built; a failure here must abort startup.
    pub fn load(path: &Path) -> Result<Self> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .commit_from_file(path)
            .map_err(|e| {
                BreedwiseError::Model(format!("cannot load model from {}: {}", path.display(), e))
            })?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .ok_or_else(|| BreedwiseError::Model("model graph has no inputs".to_string()))?;
        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| BreedwiseError::Model("model graph has no outputs".to_string()))?;

        Ok(Self {
            session,
            input_name,
            output_name,
        })
    }
}

impl ClassifierBackend for OnnxClassifier {
    fn class_scores(&self, batch: ArrayView4<f32>) -> Result<Vec<f32>> {
        let outputs = self
            .session
            .run(inputs![self.input_name.as_str() => batch]?)?;
        let scores = outputs[self.output_name.as_str()].try_extract_tensor::<f32>()?;
        Ok(scores.iter().copied().collect())
    }
}
