//! Breedwise - dog breed image classification service
//!
//! Accepts a base64-encoded image over HTTP, runs it through a pretrained
//! classification model, and returns the top predicted breed with a
//! confidence score.
//!
//! # Modules
//!
//! - [`labels`] - Ordered class-index to breed-name table (CSV-backed)
//! - [`preprocess`] - Image normalization to the model input shape
//! - [`model`] - Opaque classifier backend trait and the ONNX implementation
//! - [`service`] - The prediction pipeline: preprocess, forward pass, argmax
//! - [`server`] - HTTP server with the REST API

// Core error handling
pub mod error;

// Classification pipeline
pub mod labels;
pub mod model;
pub mod preprocess;
pub mod service;

// Services
pub mod server;
