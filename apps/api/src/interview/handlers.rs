//! Axum route handlers for the Interview API.
//!
//! One endpoint, dispatched on the request's `step` field. The server keeps
//! no session state: the client carries the transcript between requests and
//! the session is rebuilt from the wire payload each time.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::blueprint::{Blueprint, Mode};
use crate::coaching::{Coach, Scorecard};
use crate::errors::AppError;
use crate::interview::orchestrator::{start_interview, submit_answer};
use crate::interview::session::{parse_transcript, InterviewSession};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(tag = "step", rename_all = "lowercase")]
pub enum InterviewRequest {
    #[serde(rename_all = "camelCase")]
    Start {
        company: String,
        blueprint: Blueprint,
        mode: Mode,
    },
    #[serde(rename_all = "camelCase")]
    Followup {
        company: String,
        blueprint: Blueprint,
        mode: Mode,
        transcript: String,
        candidate_answer: String,
    },
}

#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub interviewer: String,
}

#[derive(Debug, Serialize)]
pub struct FollowupResponse {
    pub interviewer: String,
    pub coach: Coach,
    pub scorecard: Scorecard,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum InterviewResponse {
    Start(StartResponse),
    Followup(FollowupResponse),
}

/// POST /api/v1/interview
///
/// `step: "start"` issues the opening question; `step: "followup"` accepts a
/// candidate answer and returns the next question plus scoring feedback.
pub async fn handle_interview(
    State(state): State<AppState>,
    Json(request): Json<InterviewRequest>,
) -> Result<Json<InterviewResponse>, AppError> {
    match request {
        InterviewRequest::Start {
            company,
            blueprint,
            mode,
        } => {
            if company.trim().is_empty() {
                return Err(AppError::Validation("company is required".to_string()));
            }
            let mut session = InterviewSession::new(company, blueprint, mode)?;
            let interviewer = start_interview(&state.gateway, &mut session).await?;
            Ok(Json(InterviewResponse::Start(StartResponse { interviewer })))
        }
        InterviewRequest::Followup {
            company,
            blueprint,
            mode,
            transcript,
            candidate_answer,
        } => {
            let turns = parse_transcript(&transcript);
            let mut session = InterviewSession::resume(company, blueprint, mode, turns)?;
            let feedback = submit_answer(&state.gateway, &mut session, &candidate_answer).await?;
            Ok(Json(InterviewResponse::Followup(FollowupResponse {
                interviewer: feedback.interviewer,
                coach: feedback.coach,
                scorecard: feedback.scorecard,
            })))
        }
    }
}
