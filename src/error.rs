//! Crate-level error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BreedwiseError {
    #[error("Label table error: {0}")]
    LabelTable(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Prediction error: {0}")]
    Prediction(String),

    #[error("Inference backend error: {0}")]
    Ort(#[from] ort::Error),
}

pub type Result<T> = std::result::Result<T, BreedwiseError>;
