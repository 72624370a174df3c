//! Interview orchestration — sequences model calls and deterministic coaching.
//!
//! Flow per answer: record candidate turn -> STAR detect + score (no model
//! call) -> follow-up question via the gateway -> record interviewer turn.
//! A model outage downgrades the follow-up to a fixed question; it never
//! blocks the scorecard.

use thiserror::Error;
use tracing::{info, warn};

use crate::coaching::{build_coach, build_scorecard, detect, Coach, Scorecard};
use crate::model_gateway::{GatewayError, ModelGateway};

use super::prompts::{
    FALLBACK_FOLLOWUP, FOLLOWUP_PROMPT_TEMPLATE, INTERVIEWER_SYSTEM, OPENING_PROMPT_TEMPLATE,
};
use super::session::{InterviewSession, SessionError};

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Model(#[from] GatewayError),
}

/// Everything returned after one candidate answer.
#[derive(Debug)]
pub struct AnswerFeedback {
    pub interviewer: String,
    pub coach: Coach,
    pub scorecard: Scorecard,
}

/// Requests the opening interviewer question and records it on the session.
pub async fn start_interview(
    gateway: &ModelGateway,
    session: &mut InterviewSession,
) -> Result<String, OrchestratorError> {
    let blueprint = session.blueprint();

    let sample_questions = blueprint
        .sample_questions
        .iter()
        .map(|q| format!("[{}] {}", q.category.as_str(), q.question))
        .collect::<Vec<_>>()
        .join(" | ");

    let prompt = OPENING_PROMPT_TEMPLATE
        .replace("{mode}", session.mode().as_str())
        .replace("{company}", session.company())
        .replace("{role_focus}", &blueprint.role_focus.join(", "))
        .replace("{risk_gaps}", &blueprint.risk_gaps.join("; "))
        .replace("{sample_questions}", &sample_questions);

    let question = gateway
        .generate_with_fallback(INTERVIEWER_SYSTEM, &prompt)
        .await?
        .trim()
        .to_string();

    session.record_opening(question.clone())?;
    info!("Interview started ({} mode)", session.mode());
    Ok(question)
}

/// Processes one candidate answer.
///
/// The candidate turn is appended before any model I/O so the transcript
/// keeps chronological order for the follow-up prompt. Scoring runs
/// synchronously and is returned even when the follow-up call fails.
pub async fn submit_answer(
    gateway: &ModelGateway,
    session: &mut InterviewSession,
    answer: &str,
) -> Result<AnswerFeedback, SessionError> {
    session.record_answer(answer)?;

    let star = detect(answer);
    let coach = build_coach(&star, session.mode());
    let scorecard = build_scorecard(star, session.mode());

    let prompt = FOLLOWUP_PROMPT_TEMPLATE
        .replace("{mode}", session.mode().as_str())
        .replace("{company}", session.company())
        .replace("{transcript}", &session.rendered_transcript())
        .replace("{answer}", answer);

    let interviewer = match gateway
        .generate_with_fallback(INTERVIEWER_SYSTEM, &prompt)
        .await
    {
        Ok(question) => question.trim().to_string(),
        Err(e) => {
            warn!("Follow-up generation failed, using fallback question: {e}");
            FALLBACK_FOLLOWUP.to_string()
        }
    };

    session.record_followup(interviewer.clone());

    Ok(AnswerFeedback {
        interviewer,
        coach,
        scorecard,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::blueprint::{Blueprint, InterviewType, Mode, QuestionCategory, SampleQuestion};
    use crate::interview::session::Role;
    use crate::model_gateway::testing::ScriptedModel;

    fn blueprint() -> Blueprint {
        Blueprint {
            role_focus: vec!["Rust".to_string()],
            likely_interview_type: InterviewType::BehavioralTechnical,
            risk_gaps: vec!["No Kafka experience".to_string()],
            company_notes: vec![],
            sample_questions: vec![SampleQuestion {
                category: QuestionCategory::Behavioral,
                question: "Tell me about a conflict".to_string(),
            }],
        }
    }

    fn session() -> InterviewSession {
        InterviewSession::new("Acme".to_string(), blueprint(), Mode::Behavioral).unwrap()
    }

    fn gateway(script: Vec<Result<String, GatewayError>>) -> ModelGateway {
        ModelGateway::with_transport(
            Arc::new(ScriptedModel::new(script)),
            vec!["gemini-2.0-flash".to_string()],
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_records_opening_question() {
        let gateway = gateway(vec![Ok("Tell me about a hard outage.\n".to_string())]);
        let mut session = session();

        let question = start_interview(&gateway, &mut session).await.unwrap();

        assert_eq!(question, "Tell me about a hard outage.");
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].role, Role::Interviewer);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_surfaces_model_failure() {
        let gateway = gateway(vec![Err(GatewayError::Fatal("boom".to_string()))]);
        let mut session = session();

        let result = start_interview(&gateway, &mut session).await;

        assert!(matches!(
            result,
            Err(OrchestratorError::Model(GatewayError::Fatal(_)))
        ));
        assert!(session.transcript().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_answer_returns_followup_and_feedback() {
        let gateway = gateway(vec![Ok("What metric did you move?".to_string())]);
        let mut session = session();
        session.record_opening("Q1".to_string()).unwrap();

        let feedback = submit_answer(
            &gateway,
            &mut session,
            "I led the redesign; as a result signups grew 20%.",
        )
        .await
        .unwrap();

        assert_eq!(feedback.interviewer, "What metric did you move?");
        assert_eq!(feedback.scorecard.scores.overall, 66);
        assert_eq!(feedback.coach.missing, vec!["Situation", "Task"]);
        // Q1, answer, follow-up.
        assert_eq!(session.transcript().len(), 3);
        assert_eq!(session.transcript()[1].role, Role::Candidate);
        assert_eq!(session.transcript()[2].content, "What metric did you move?");
    }

    #[tokio::test(start_paused = true)]
    async fn test_model_outage_falls_back_but_still_scores() {
        let gateway = gateway(vec![Err(GatewayError::Fatal("down".to_string()))]);
        let mut session = session();
        session.record_opening("Q1".to_string()).unwrap();

        let feedback = submit_answer(&gateway, &mut session, "I built the importer in 3 days.")
            .await
            .unwrap();

        assert_eq!(feedback.interviewer, FALLBACK_FOLLOWUP);
        assert!(feedback.scorecard.star.result.present);
        assert_eq!(session.transcript().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_answer_before_start_makes_no_model_call() {
        let transport = Arc::new(ScriptedModel::new(vec![Ok("unused".to_string())]));
        let gateway = ModelGateway::with_transport(
            transport.clone(),
            vec!["gemini-2.0-flash".to_string()],
        );
        let mut session = session();

        let result = submit_answer(&gateway, &mut session, "An answer").await;

        assert!(matches!(result, Err(SessionError::InvalidState(_))));
        assert!(session.transcript().is_empty());
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_followup_prompt_contains_latest_answer_in_transcript() {
        // NotFound on the only model exhausts the fallback list; what matters
        // here is that the candidate turn was already appended.
        let gateway = gateway(vec![
            Err(GatewayError::NotFound {
                model: "gemini-2.0-flash".to_string(),
            }),
        ]);
        let mut session = session();
        session.record_opening("Q1".to_string()).unwrap();

        submit_answer(&gateway, &mut session, "My answer text").await.unwrap();

        assert!(session
            .rendered_transcript()
            .contains("CANDIDATE: My answer text"));
    }
}
