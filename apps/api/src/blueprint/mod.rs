//! Blueprint generation — turns a resume and job description into a
//! structured interview blueprint via one model call per session.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::model_gateway::{GatewayError, ModelGateway};

pub mod handlers;
pub mod prompts;

use self::prompts::{BLUEPRINT_PROMPT_TEMPLATE, BLUEPRINT_SYSTEM};

/// The interview category selected for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Behavioral,
    Technical,
    Case,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Behavioral => "behavioral",
            Mode::Technical => "technical",
            Mode::Case => "case",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of interview the role is likely to get. Never "mixed"; the
/// blueprint prompt disallows it by instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewType {
    BehavioralTechnical,
    BehavioralCase,
}

impl InterviewType {
    /// The legal set of modes selectable for a session of this type.
    pub fn allowed_modes(self) -> &'static [Mode] {
        match self {
            InterviewType::BehavioralTechnical => &[Mode::Behavioral, Mode::Technical],
            InterviewType::BehavioralCase => &[Mode::Behavioral, Mode::Case],
        }
    }

    pub fn allows(self, mode: Mode) -> bool {
        self.allowed_modes().contains(&mode)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InterviewType::BehavioralTechnical => "behavioral_technical",
            InterviewType::BehavioralCase => "behavioral_case",
        }
    }
}

impl fmt::Display for InterviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionCategory {
    Behavioral,
    Technical,
    Case,
}

impl QuestionCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionCategory::Behavioral => "behavioral",
            QuestionCategory::Technical => "technical",
            QuestionCategory::Case => "case",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleQuestion {
    #[serde(rename = "type")]
    pub category: QuestionCategory,
    pub question: String,
}

/// Structured profile of what an interview for a role/company is expected to
/// probe. Generated once per session and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub role_focus: Vec<String>,
    pub likely_interview_type: InterviewType,
    pub risk_gaps: Vec<String>,
    pub company_notes: Vec<String>,
    pub sample_questions: Vec<SampleQuestion>,
}

#[derive(Debug, Error)]
pub enum BlueprintError {
    #[error(transparent)]
    Model(#[from] GatewayError),

    /// The model's output was not decodable as a blueprint. The raw text is
    /// preserved so the caller can still display it.
    #[error("Model output was not valid blueprint JSON: {parse_error}")]
    Unparsed { raw: String, parse_error: String },
}

/// Generates a blueprint by calling the gateway across the fallback list and
/// decoding the JSON object in the response.
pub async fn generate_blueprint(
    gateway: &ModelGateway,
    company: &str,
    resume_text: &str,
    jd_text: &str,
) -> Result<Blueprint, BlueprintError> {
    let prompt = BLUEPRINT_PROMPT_TEMPLATE
        .replace("{company}", company)
        .replace("{resume_text}", resume_text)
        .replace("{jd_text}", jd_text);

    let text = gateway
        .generate_with_fallback(BLUEPRINT_SYSTEM, &prompt)
        .await?;

    let blueprint = parse_blueprint(&text)?;
    info!(
        "Blueprint generated: type={}, {} focus areas, {} sample questions",
        blueprint.likely_interview_type,
        blueprint.role_focus.len(),
        blueprint.sample_questions.len()
    );
    Ok(blueprint)
}

/// Decodes the substring between the first `{` and the last `}`.
///
/// The model is instructed to emit bare JSON, but sometimes wraps it in
/// prose or markdown fences anyway; this tolerates both.
pub fn parse_blueprint(text: &str) -> Result<Blueprint, BlueprintError> {
    let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
        return Err(BlueprintError::Unparsed {
            raw: text.to_string(),
            parse_error: "no JSON object found in model output".to_string(),
        });
    };
    if end < start {
        return Err(BlueprintError::Unparsed {
            raw: text.to_string(),
            parse_error: "no JSON object found in model output".to_string(),
        });
    }

    serde_json::from_str(&text[start..=end]).map_err(|e| BlueprintError::Unparsed {
        raw: text.to_string(),
        parse_error: e.to_string(),
    })
}
