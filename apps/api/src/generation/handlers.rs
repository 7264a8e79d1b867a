//! Axum route handlers for the CV API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::generation::generator::generate_cv;
use crate::generation::models::GeneratedCv;
use crate::generation::normalizer::validate_document;
use crate::generation::validation::{
    validate_profile, validate_request, GenerateCvBody, ProfileBody,
};
use crate::render::render_plain_text;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateCvResponse {
    pub success: bool,
    pub data: GeneratedCv,
    pub rendered: String,
}

#[derive(Debug, Deserialize)]
pub struct RenderCvRequest {
    #[serde(default)]
    pub profile: ProfileBody,
    pub cv: Value,
}

#[derive(Debug, Serialize)]
pub struct RenderCvResponse {
    pub rendered: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cv/generate
///
/// Validates the form body, runs the generation pipeline once, and returns the
/// document exactly as validated plus its plain-text rendering.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateCvBody>,
) -> Result<Json<GenerateCvResponse>, AppError> {
    let request = validate_request(&body)?;

    let cv = generate_cv(state.provider.as_ref(), &state.settings, &request).await?;
    let rendered = render_plain_text(request.profile(), &cv);

    Ok(Json(GenerateCvResponse {
        success: true,
        data: cv,
        rendered,
    }))
}

/// POST /api/v1/cv/render
///
/// Re-renders a previously generated document. No provider call; the document
/// goes through the same schema check as a fresh provider response, but a
/// failure here is the caller's fault.
pub async fn handle_render(
    Json(body): Json<RenderCvRequest>,
) -> Result<Json<RenderCvResponse>, AppError> {
    let profile = validate_profile(&body.profile)?;
    let cv = validate_document(body.cv)
        .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;

    Ok(Json(RenderCvResponse {
        rendered: render_plain_text(&profile, &cv),
    }))
}
