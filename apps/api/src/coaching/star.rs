//! STAR detector — rule-based classifier over a candidate's free-text answer.
//!
//! Pure, case-insensitive cue-phrase matching. There is no false-positive
//! correction pass, and the evidence string for each component is one of
//! exactly two fixed messages per field.

use serde::{Deserialize, Serialize};

/// Temporal and contextual markers that open a situation.
const SITUATION_CUES: &[&str] = &[
    "when i",
    "while i",
    "at my",
    "in my previous",
    "in my last",
    "last year",
    "last month",
    "a few months ago",
    "previously",
    "at the time",
    "earlier in my",
    "back when",
];

/// Goal and ownership markers.
const TASK_CUES: &[&str] = &[
    "my task",
    "my goal",
    "my job was",
    "my responsibility",
    "i was responsible",
    "i was asked",
    "i needed to",
    "i had to",
    "the goal was",
    "we needed to",
    "i set out",
];

/// First-person action verbs.
const ACTION_CUES: &[&str] = &[
    "i led",
    "i built",
    "i designed",
    "i created",
    "i implemented",
    "i organized",
    "i developed",
    "i coordinated",
    "i analyzed",
    "i wrote",
    "i launched",
    "i migrated",
    "i refactored",
    "i set up",
    "i worked with",
    "i decided",
];

/// Outcome markers. A numeral or percent sign anywhere in the answer also
/// counts as a result signal.
const RESULT_CUES: &[&str] = &[
    "as a result",
    "resulted in",
    "which led to",
    "increased",
    "decreased",
    "reduced",
    "improved",
    "saved",
    "grew",
    "boosted",
    "delivered",
    "achieved",
];

const SITUATION_PRESENT: &str = "Situation: you set the scene with clear context.";
const SITUATION_MISSING: &str =
    "Situation: open with one sentence of context, where you were and what was happening.";
const TASK_PRESENT: &str = "Task: you stated the goal you owned.";
const TASK_MISSING: &str = "Task: name the specific goal or responsibility you owned.";
const ACTION_PRESENT: &str = "Action: you described what you personally did.";
const ACTION_MISSING: &str = "Action: describe the concrete steps you took, using 'I' statements.";
const RESULT_PRESENT: &str = "Result: you included an outcome or metric.";
const RESULT_MISSING: &str =
    "Result: end with a measurable outcome, such as a number, percentage, or time saved.";

/// Presence signal for one STAR component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarSignal {
    pub present: bool,
    pub evidence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarDetection {
    pub situation: StarSignal,
    pub task: StarSignal,
    pub action: StarSignal,
    pub result: StarSignal,
}

impl StarDetection {
    /// Count of present components, in [0, 4].
    pub fn present_count(&self) -> u32 {
        [&self.situation, &self.task, &self.action, &self.result]
            .iter()
            .filter(|s| s.present)
            .count() as u32
    }
}

/// Classifies a candidate answer for the presence of each STAR component.
pub fn detect(answer: &str) -> StarDetection {
    let lower = answer.to_lowercase();

    let situation = contains_any(&lower, SITUATION_CUES);
    let task = contains_any(&lower, TASK_CUES);
    let action = contains_any(&lower, ACTION_CUES);
    let result = contains_any(&lower, RESULT_CUES)
        || lower.contains('%')
        || lower.chars().any(|c| c.is_ascii_digit());

    StarDetection {
        situation: signal(situation, SITUATION_PRESENT, SITUATION_MISSING),
        task: signal(task, TASK_PRESENT, TASK_MISSING),
        action: signal(action, ACTION_PRESENT, ACTION_MISSING),
        result: signal(result, RESULT_PRESENT, RESULT_MISSING),
    }
}

fn contains_any(haystack: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| haystack.contains(cue))
}

fn signal(present: bool, affirming: &str, corrective: &str) -> StarSignal {
    StarSignal {
        present,
        evidence: if present { affirming } else { corrective }.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_answer_has_all_components_absent() {
        let star = detect("");
        assert!(!star.situation.present);
        assert!(!star.task.present);
        assert!(!star.action.present);
        assert!(!star.result.present);
        assert_eq!(star.present_count(), 0);
    }

    #[test]
    fn test_action_and_result_from_led_plus_metric() {
        let star = detect("I led the redesign project; as a result we increased signups by 20%.");
        assert!(!star.situation.present);
        assert!(!star.task.present);
        assert!(star.action.present);
        assert!(star.result.present);
        assert_eq!(star.present_count(), 2);
    }

    #[test]
    fn test_any_numeral_marks_result_present() {
        let star = detect("We shipped it to 3 regions");
        assert!(star.result.present);
    }

    #[test]
    fn test_percent_sign_marks_result_present() {
        let star = detect("latency dropped by a lot, roughly half a percent... well, %");
        assert!(star.result.present);
    }

    #[test]
    fn test_detection_is_case_insensitive() {
        let star = detect("WHEN I joined, MY TASK was clear. I BUILT the pipeline. As A Result it IMPROVED.");
        assert!(star.situation.present);
        assert!(star.task.present);
        assert!(star.action.present);
        assert!(star.result.present);
        assert_eq!(star.present_count(), 4);
    }

    #[test]
    fn test_full_star_answer_detects_all_four() {
        let answer = "Last year at my previous company, our checkout flow was failing. \
            My goal was to cut the error rate. I designed a retry layer and I implemented \
            circuit breaking. As a result, errors dropped by 40%.";
        let star = detect(answer);
        assert_eq!(star.present_count(), 4);
    }

    #[test]
    fn test_evidence_is_one_of_two_fixed_strings_per_field() {
        let present = detect("When I was on call, I had to act. I built a fix. It improved 10%.");
        let absent = detect("");

        assert_eq!(present.situation.evidence, SITUATION_PRESENT);
        assert_eq!(absent.situation.evidence, SITUATION_MISSING);
        assert_eq!(present.task.evidence, TASK_PRESENT);
        assert_eq!(absent.task.evidence, TASK_MISSING);
        assert_eq!(present.action.evidence, ACTION_PRESENT);
        assert_eq!(absent.action.evidence, ACTION_MISSING);
        assert_eq!(present.result.evidence, RESULT_PRESENT);
        assert_eq!(absent.result.evidence, RESULT_MISSING);
    }

    #[test]
    fn test_task_cue_without_action_or_result() {
        let star = detect("My responsibility was keeping the service healthy.");
        assert!(star.task.present);
        assert!(!star.action.present);
        assert!(!star.result.present);
    }
}
