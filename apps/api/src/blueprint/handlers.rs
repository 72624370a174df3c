//! Axum route handlers for the Blueprint API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::blueprint::{generate_blueprint, Blueprint, BlueprintError};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintRequest {
    pub company: String,
    pub resume_text: String,
    pub job_description: String,
}

/// A parse failure is returned with status 200 so the caller can still
/// inspect the raw model output; only model/configuration failures are
/// 500-class.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BlueprintResponse {
    Success {
        blueprint: Blueprint,
    },
    #[serde(rename_all = "camelCase")]
    ParseFailure {
        error: String,
        raw: String,
        parse_error: String,
    },
}

/// POST /api/v1/blueprint
///
/// Generates the interview blueprint for a resume / job description pair.
pub async fn handle_generate_blueprint(
    State(state): State<AppState>,
    Json(request): Json<BlueprintRequest>,
) -> Result<Json<BlueprintResponse>, AppError> {
    if request.company.trim().is_empty()
        || request.resume_text.trim().is_empty()
        || request.job_description.trim().is_empty()
    {
        return Err(AppError::Validation(
            "Missing inputs: company, resumeText, and jobDescription are all required".to_string(),
        ));
    }

    match generate_blueprint(
        &state.gateway,
        &request.company,
        &request.resume_text,
        &request.job_description,
    )
    .await
    {
        Ok(blueprint) => Ok(Json(BlueprintResponse::Success { blueprint })),
        Err(BlueprintError::Unparsed { raw, parse_error }) => {
            tracing::warn!("Blueprint parse failure: {parse_error}");
            Ok(Json(BlueprintResponse::ParseFailure {
                error: "Model output could not be parsed as a blueprint".to_string(),
                raw,
                parse_error,
            }))
        }
        Err(BlueprintError::Model(e)) => Err(e.into()),
    }
}
