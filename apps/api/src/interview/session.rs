#![allow(dead_code)]

//! Interview session — an explicit turn-state machine over an append-only
//! transcript.
//!
//! States: NotStarted -> AwaitingAnswer. There is no explicit end state; the
//! session simply stops receiving turns. Transition functions reject calls
//! from the wrong state with a typed `InvalidState` error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blueprint::{Blueprint, Mode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Interviewer,
    Candidate,
}

impl Role {
    fn label(self) -> &'static str {
        match self {
            Role::Interviewer => "INTERVIEWER",
            Role::Candidate => "CANDIDATE",
        }
    }
}

/// One utterance in the transcript. Ordering is the interview's
/// chronological order and is semantically significant: it becomes the
/// prompt context for follow-ups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn render(&self) -> String {
        format!("{}: {}", self.role.label(), self.content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    AwaitingAnswer,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Answer is empty")]
    EmptyAnswer,

    #[error("Mode '{mode}' is not selectable for interview type '{interview_type}'")]
    ModeNotAllowed {
        mode: String,
        interview_type: String,
    },
}

/// One mock-interview session. Owns its transcript and blueprint exclusively;
/// nothing here is shared across sessions.
pub struct InterviewSession {
    company: String,
    blueprint: Blueprint,
    mode: Mode,
    state: SessionState,
    transcript: Vec<Turn>,
}

impl InterviewSession {
    /// Fresh session with an empty transcript. The mode must be selectable
    /// for the blueprint's interview type.
    pub fn new(company: String, blueprint: Blueprint, mode: Mode) -> Result<Self, SessionError> {
        check_mode(&blueprint, mode)?;
        Ok(Self {
            company,
            blueprint,
            mode,
            state: SessionState::NotStarted,
            transcript: Vec::new(),
        })
    }

    /// Rebuilds a mid-interview session from an existing transcript.
    /// An empty transcript means the interview was never started.
    pub fn resume(
        company: String,
        blueprint: Blueprint,
        mode: Mode,
        transcript: Vec<Turn>,
    ) -> Result<Self, SessionError> {
        check_mode(&blueprint, mode)?;
        if transcript.is_empty() {
            return Err(SessionError::InvalidState(
                "Transcript is empty; start the interview before submitting an answer".to_string(),
            ));
        }
        Ok(Self {
            company,
            blueprint,
            mode,
            state: SessionState::AwaitingAnswer,
            transcript,
        })
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn blueprint(&self) -> &Blueprint {
        &self.blueprint
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    /// Serializes the transcript as `ROLE: content` lines, newline-joined.
    pub fn rendered_transcript(&self) -> String {
        render_transcript(&self.transcript)
    }

    /// Records the opening interviewer question and moves to AwaitingAnswer.
    pub fn record_opening(&mut self, question: String) -> Result<(), SessionError> {
        if self.state != SessionState::NotStarted {
            return Err(SessionError::InvalidState(
                "Interview has already started".to_string(),
            ));
        }
        self.transcript.push(Turn {
            role: Role::Interviewer,
            content: question,
        });
        self.state = SessionState::AwaitingAnswer;
        Ok(())
    }

    /// Appends the candidate's answer. Rejected before the interview starts
    /// and for empty or whitespace-only answers; no turn is appended on
    /// rejection.
    pub fn record_answer(&mut self, answer: &str) -> Result<(), SessionError> {
        if self.state != SessionState::AwaitingAnswer {
            return Err(SessionError::InvalidState(
                "No question has been asked yet; start the interview first".to_string(),
            ));
        }
        if answer.trim().is_empty() {
            return Err(SessionError::EmptyAnswer);
        }
        self.transcript.push(Turn {
            role: Role::Candidate,
            content: answer.to_string(),
        });
        Ok(())
    }

    /// Appends a follow-up interviewer question. The session stays in
    /// AwaitingAnswer: the interview is unbounded.
    pub fn record_followup(&mut self, question: String) {
        self.transcript.push(Turn {
            role: Role::Interviewer,
            content: question,
        });
    }
}

fn check_mode(blueprint: &Blueprint, mode: Mode) -> Result<(), SessionError> {
    if blueprint.likely_interview_type.allows(mode) {
        Ok(())
    } else {
        Err(SessionError::ModeNotAllowed {
            mode: mode.to_string(),
            interview_type: blueprint.likely_interview_type.to_string(),
        })
    }
}

pub fn render_transcript(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(Turn::render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses a `ROLE: content` transcript back into turns. Continuation lines
/// attach to the preceding turn; leading lines with no role marker are
/// dropped.
pub fn parse_transcript(raw: &str) -> Vec<Turn> {
    let mut turns: Vec<Turn> = Vec::new();
    for line in raw.lines() {
        if let Some(content) = line.strip_prefix("INTERVIEWER: ") {
            turns.push(Turn {
                role: Role::Interviewer,
                content: content.to_string(),
            });
        } else if let Some(content) = line.strip_prefix("CANDIDATE: ") {
            turns.push(Turn {
                role: Role::Candidate,
                content: content.to_string(),
            });
        } else if let Some(last) = turns.last_mut() {
            if !line.trim().is_empty() {
                last.content.push('\n');
                last.content.push_str(line);
            }
        }
    }
    turns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::{InterviewType, QuestionCategory, SampleQuestion};

    fn technical_blueprint() -> Blueprint {
        Blueprint {
            role_focus: vec!["Rust".to_string(), "distributed systems".to_string()],
            likely_interview_type: InterviewType::BehavioralTechnical,
            risk_gaps: vec!["No Kubernetes on resume".to_string()],
            company_notes: vec!["Deep systems rounds".to_string()],
            sample_questions: vec![SampleQuestion {
                category: QuestionCategory::Technical,
                question: "Design a rate limiter".to_string(),
            }],
        }
    }

    fn case_blueprint() -> Blueprint {
        Blueprint {
            likely_interview_type: InterviewType::BehavioralCase,
            ..technical_blueprint()
        }
    }

    #[test]
    fn test_new_session_starts_not_started_with_empty_transcript() {
        let session =
            InterviewSession::new("Acme".to_string(), technical_blueprint(), Mode::Behavioral)
                .unwrap();
        assert_eq!(session.state(), SessionState::NotStarted);
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_new_session_rejects_disallowed_mode() {
        let result =
            InterviewSession::new("Acme".to_string(), case_blueprint(), Mode::Technical);
        assert!(matches!(result, Err(SessionError::ModeNotAllowed { .. })));
    }

    #[test]
    fn test_record_opening_transitions_to_awaiting_answer() {
        let mut session =
            InterviewSession::new("Acme".to_string(), technical_blueprint(), Mode::Technical)
                .unwrap();
        session
            .record_opening("How would you design a cache?".to_string())
            .unwrap();
        assert_eq!(session.state(), SessionState::AwaitingAnswer);
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].role, Role::Interviewer);
    }

    #[test]
    fn test_double_opening_is_invalid_state() {
        let mut session =
            InterviewSession::new("Acme".to_string(), technical_blueprint(), Mode::Technical)
                .unwrap();
        session.record_opening("First question".to_string()).unwrap();
        let result = session.record_opening("Second question".to_string());
        assert!(matches!(result, Err(SessionError::InvalidState(_))));
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn test_answer_before_start_is_invalid_state_and_appends_nothing() {
        let mut session =
            InterviewSession::new("Acme".to_string(), technical_blueprint(), Mode::Behavioral)
                .unwrap();
        let result = session.record_answer("I led a project");
        assert!(matches!(result, Err(SessionError::InvalidState(_))));
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_empty_answer_is_rejected_without_appending() {
        let mut session =
            InterviewSession::new("Acme".to_string(), technical_blueprint(), Mode::Behavioral)
                .unwrap();
        session.record_opening("Tell me about a project".to_string()).unwrap();
        assert!(matches!(
            session.record_answer("   \n\t"),
            Err(SessionError::EmptyAnswer)
        ));
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn test_answer_then_followup_keeps_chronological_order() {
        let mut session =
            InterviewSession::new("Acme".to_string(), technical_blueprint(), Mode::Behavioral)
                .unwrap();
        session.record_opening("Q1".to_string()).unwrap();
        session.record_answer("A1").unwrap();
        session.record_followup("Q2".to_string());
        assert_eq!(session.state(), SessionState::AwaitingAnswer);

        let roles: Vec<Role> = session.transcript().iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![Role::Interviewer, Role::Candidate, Role::Interviewer]
        );
        assert_eq!(
            session.rendered_transcript(),
            "INTERVIEWER: Q1\nCANDIDATE: A1\nINTERVIEWER: Q2"
        );
    }

    #[test]
    fn test_resume_with_empty_transcript_is_invalid_state() {
        let result = InterviewSession::resume(
            "Acme".to_string(),
            technical_blueprint(),
            Mode::Behavioral,
            Vec::new(),
        );
        assert!(matches!(result, Err(SessionError::InvalidState(_))));
    }

    #[test]
    fn test_resume_with_transcript_awaits_answer() {
        let turns = vec![Turn {
            role: Role::Interviewer,
            content: "Tell me about a hard bug".to_string(),
        }];
        let session = InterviewSession::resume(
            "Acme".to_string(),
            technical_blueprint(),
            Mode::Technical,
            turns,
        )
        .unwrap();
        assert_eq!(session.state(), SessionState::AwaitingAnswer);
    }

    #[test]
    fn test_parse_transcript_round_trips_render() {
        let turns = vec![
            Turn {
                role: Role::Interviewer,
                content: "Q1".to_string(),
            },
            Turn {
                role: Role::Candidate,
                content: "A1".to_string(),
            },
        ];
        let rendered = render_transcript(&turns);
        assert_eq!(parse_transcript(&rendered), turns);
    }

    #[test]
    fn test_parse_transcript_attaches_continuation_lines() {
        let raw = "INTERVIEWER: Q1\nCANDIDATE: first line\nsecond line";
        let turns = parse_transcript(raw);
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].content, "first line\nsecond line");
    }

    #[test]
    fn test_parse_transcript_drops_leading_unmarked_lines() {
        let raw = "some preamble\nINTERVIEWER: Q1";
        let turns = parse_transcript(raw);
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].content, "Q1");
    }

    #[test]
    fn test_parse_transcript_empty_input() {
        assert!(parse_transcript("").is_empty());
    }
}
