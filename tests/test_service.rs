//! Integration test: prediction pipeline with stub backends

use image::{DynamicImage, RgbImage};
use ndarray::ArrayView4;

use breedwise::error::{BreedwiseError, Result};
use breedwise::labels::LabelTable;
use breedwise::model::ClassifierBackend;
use breedwise::service::InferenceService;

struct FixedBackend {
    scores: Vec<f32>,
}

impl ClassifierBackend for FixedBackend {
    fn class_scores(&self, _batch: ArrayView4<f32>) -> Result<Vec<f32>> {
        Ok(self.scores.clone())
    }
}

struct FailingBackend;

impl ClassifierBackend for FailingBackend {
    fn class_scores(&self, _batch: ArrayView4<f32>) -> Result<Vec<f32>> {
        Err(BreedwiseError::Model("backend exploded".to_string()))
    }
}

/// Backend that checks its input honors the preprocessing contract.
struct ShapeCheckingBackend;

impl ClassifierBackend for ShapeCheckingBackend {
    fn class_scores(&self, batch: ArrayView4<f32>) -> Result<Vec<f32>> {
        assert_eq!(batch.shape(), &[1, 224, 224, 3]);
        assert!(batch.iter().all(|v| (0.0..=1.0).contains(v)));
        Ok(vec![1.0])
    }
}

fn labels() -> LabelTable {
    LabelTable::from_breeds(vec![
        "beagle".to_string(),
        "border_collie".to_string(),
        "whippet".to_string(),
    ])
}

fn sample_image() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(300, 200, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8])
    }))
}

#[test]
fn test_predict_picks_argmax_label() {
    let service = InferenceService::new(
        Box::new(FixedBackend {
            scores: vec![0.05, 0.15, 0.8],
        }),
        labels(),
    );
    let prediction = service.predict(&sample_image()).unwrap();
    assert_eq!(prediction.label, "whippet");
    assert!((prediction.confidence - 0.8).abs() < f32::EPSILON);
}

#[test]
fn test_predict_confidence_in_unit_range() {
    let service = InferenceService::new(
        Box::new(FixedBackend {
            scores: vec![0.3, 0.3, 0.4],
        }),
        labels(),
    );
    let prediction = service.predict(&sample_image()).unwrap();
    assert!((0.0..=1.0).contains(&prediction.confidence));
}

#[test]
fn test_predict_is_deterministic() {
    let service = InferenceService::new(
        Box::new(FixedBackend {
            scores: vec![0.2, 0.5, 0.3],
        }),
        labels(),
    );
    let image = sample_image();
    let first = service.predict(&image).unwrap();
    let second = service.predict(&image).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_tie_breaks_to_lowest_index() {
    let service = InferenceService::new(
        Box::new(FixedBackend {
            scores: vec![0.4, 0.4, 0.2],
        }),
        labels(),
    );
    let prediction = service.predict(&sample_image()).unwrap();
    assert_eq!(prediction.label, "beagle");
}

#[test]
fn test_label_always_from_table() {
    let table = labels();
    let service = InferenceService::new(
        Box::new(FixedBackend {
            scores: vec![0.1, 0.6, 0.3],
        }),
        table.clone(),
    );
    let prediction = service.predict(&sample_image()).unwrap();
    assert!((0..table.len()).any(|i| table.get(i) == Some(prediction.label.as_str())));
}

#[test]
fn test_argmax_outside_table_is_error() {
    let service = InferenceService::new(
        Box::new(FixedBackend {
            scores: vec![0.0, 0.0, 0.0, 0.0, 1.0],
        }),
        labels(),
    );
    let err = service.predict(&sample_image()).unwrap_err();
    assert!(matches!(err, BreedwiseError::Prediction(_)));
}

#[test]
fn test_empty_scores_is_error() {
    let service = InferenceService::new(Box::new(FixedBackend { scores: vec![] }), labels());
    let err = service.predict(&sample_image()).unwrap_err();
    assert!(matches!(err, BreedwiseError::Prediction(_)));
}

#[test]
fn test_backend_failure_propagates() {
    let service = InferenceService::new(Box::new(FailingBackend), labels());
    let err = service.predict(&sample_image()).unwrap_err();
    assert!(matches!(err, BreedwiseError::Model(_)));
}

#[test]
fn test_backend_receives_normalized_batch() {
    let service = InferenceService::new(
        Box::new(ShapeCheckingBackend),
        LabelTable::from_breeds(vec!["beagle".to_string()]),
    );
    // Exercises grayscale and RGBA conversion paths too.
    let gray = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(90, 33, image::Luma([200])));
    let rgba = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        17,
        400,
        image::Rgba([1, 2, 3, 4]),
    ));
    for image in [sample_image(), gray, rgba] {
        let prediction = service.predict(&image).unwrap();
        assert_eq!(prediction.label, "beagle");
    }
}
