//! HTTP request handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Html,
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::{Result, ServerError};
use super::state::AppState;

// ============================================================================
// Prediction
// ============================================================================

#[derive(Deserialize)]
pub struct PredictRequest {
    image: Option<String>,
}

#[derive(Serialize)]
pub struct PredictResponse {
    breed: String,
    /// Percentage in [0, 100], rounded to two decimals.
    confidence: f64,
}

/// Classify one base64-encoded image.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>> {
    let Json(request) =
        body.map_err(|_| ServerError::BadRequest("No data provided".to_string()))?;

    let image_data = request
        .image
        .ok_or_else(|| ServerError::BadRequest("No image data provided".to_string()))?;

    // Strip a data:<mime>;base64, prefix if present.
    let payload = image_data
        .split_once(',')
        .map(|(_, rest)| rest)
        .unwrap_or(&image_data);

    let image_bytes = STANDARD
        .decode(payload)
        .map_err(|e| ServerError::BadRequest(format!("Invalid image data: {}", e)))?;
    let image = image::load_from_memory(&image_bytes)
        .map_err(|e| ServerError::BadRequest(format!("Invalid image data: {}", e)))?;

    // The forward pass is CPU-bound; keep it off the async workers.
    let service = Arc::clone(&state.service);
    let prediction = tokio::task::spawn_blocking(move || service.predict(&image))
        .await
        .map_err(|e| ServerError::Internal(format!("Prediction task failed: {}", e)))??;

    info!(
        breed = %prediction.label,
        confidence = prediction.confidence,
        "Prediction served"
    );

    Ok(Json(PredictResponse {
        breed: prediction.label,
        confidence: (prediction.confidence as f64 * 100.0 * 100.0).round() / 100.0,
    }))
}

// ============================================================================
// Health
// ============================================================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "classes": state.service.num_classes(),
    }))
}

// ============================================================================
// UI Handler
// ============================================================================

pub async fn serve_index() -> Html<&'static str> {
    // Embedded HTML for portability
    Html(EMBEDDED_INDEX_HTML)
}

const EMBEDDED_INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Breedwise</title>
    <style>
        body{font-family:system-ui,sans-serif;max-width:640px;margin:3rem auto;padding:0 1rem;color:#1f2937}
        h1{font-size:1.5rem}
        #drop{border:2px dashed #9ca3af;border-radius:8px;padding:2rem;text-align:center;cursor:pointer}
        #preview{max-width:100%;margin-top:1rem;border-radius:8px;display:none}
        #result{margin-top:1rem;font-size:1.1rem}
        .error{color:#b91c1c}
    </style>
</head>
<body>
    <h1>Breedwise &mdash; dog breed identifier</h1>
    <div id="drop">Click to choose a photo of a dog</div>
    <input type="file" id="file" accept="image/*" hidden>
    <img id="preview" alt="preview">
    <div id="result"></div>
    <script>
        const drop = document.getElementById('drop');
        const file = document.getElementById('file');
        const preview = document.getElementById('preview');
        const result = document.getElementById('result');
        drop.addEventListener('click', () => file.click());
        file.addEventListener('change', () => {
            const f = file.files[0];
            if (!f) return;
            const reader = new FileReader();
            reader.onload = async () => {
                preview.src = reader.result;
                preview.style.display = 'block';
                result.textContent = 'Identifying…';
                try {
                    const resp = await fetch('/predict', {
                        method: 'POST',
                        headers: {'Content-Type': 'application/json'},
                        body: JSON.stringify({image: reader.result}),
                    });
                    const data = await resp.json();
                    if (!resp.ok) {
                        result.innerHTML = '<span class="error">' + data.error + '</span>';
                    } else {
                        result.textContent = data.breed + ' (' + data.confidence + '% confident)';
                    }
                } catch (e) {
                    result.innerHTML = '<span class="error">Request failed: ' + e + '</span>';
                }
            };
            reader.readAsDataURL(f);
        });
    </script>
</body>
</html>
"#;
