//! Scoring engine — converts STAR presence signals into a scorecard and the
//! compact coach object.
//!
//! Pure functions over the detection result; never calls the model gateway.
//! This is the system's only source of guaranteed feedback when the model
//! path is degraded or unavailable.

use serde::{Deserialize, Serialize};

use crate::blueprint::Mode;
use crate::coaching::star::StarDetection;

const SUB_SCORE_MAX: u32 = 25;
const OVERALL_MAX: u32 = 100;

/// STAR-labeled skeleton offered when the session mode is behavioral.
const BEHAVIORAL_REWRITE: &str = "Situation: [one sentence of context]. \
    Task: [the goal you owned]. \
    Action: [the two or three specific steps you took]. \
    Result: [the measurable outcome].";

/// Skeleton for technical and case answers.
const ANALYTICAL_REWRITE: &str = "Approach: [how you framed the problem]. \
    Trade-offs: [the options you weighed]. \
    Decision: [what you chose and why]. \
    Validation: [how you verified it worked].";

const REWRITE_BULLETS: &[&str] = &[
    "Lead the result with a number or metric",
    "Keep the setup to one or two sentences",
    "Use 'I' statements for the actions you personally took",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scores {
    pub overall: u32,
    pub clarity: u32,
    pub structure: u32,
    pub impact: u32,
    pub role_fit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rewrite {
    pub improved_answer: String,
    pub bullets_to_add: Vec<String>,
}

/// Structured evaluation of one candidate answer. Recomputed fresh after
/// every answer; only the latest is retained for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub star: StarDetection,
    pub scores: Scores,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub rewrite: Rewrite,
}

/// Compact feedback object kept alongside the scorecard; its consumers
/// differ, so both are always returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coach {
    pub mode: Mode,
    pub star: String,
    pub missing: Vec<String>,
    pub why: String,
    pub intent: String,
}

/// Computes the four bounded sub-scores and their clamped sum.
pub fn compute_scores(star: &StarDetection, mode: Mode) -> Scores {
    let star_count = star.present_count();

    let clarity = (10 + 3 * star_count).min(SUB_SCORE_MAX);
    let structure = (8 + 4 * star_count).min(SUB_SCORE_MAX);
    let impact = (6 + if star.result.present { 12 } else { 3 }).min(SUB_SCORE_MAX);
    let role_fit = (10 + if mode == Mode::Behavioral { 6 } else { 4 }).min(SUB_SCORE_MAX);
    let overall = (clarity + structure + impact + role_fit).min(OVERALL_MAX);

    Scores {
        overall,
        clarity,
        structure,
        impact,
        role_fit,
    }
}

/// One fixed contribution per STAR field, in S, T, A, R order: a strength
/// when present, a gap when absent.
fn strengths_and_gaps(star: &StarDetection) -> (Vec<String>, Vec<String>) {
    let fields = [
        (
            star.situation.present,
            "Clear situation framing",
            "Missing context: open with the situation",
        ),
        (
            star.task.present,
            "Defined goal and ownership",
            "Goal not stated: name the task you owned",
        ),
        (
            star.action.present,
            "Concrete first-person actions",
            "Actions unclear: say what you personally did",
        ),
        (
            star.result.present,
            "Quantified or explicit outcome",
            "No measurable result: add a number or metric",
        ),
    ];

    let mut strengths = Vec::new();
    let mut gaps = Vec::new();
    for (present, strength, gap) in fields {
        if present {
            strengths.push(strength.to_string());
        } else {
            gaps.push(gap.to_string());
        }
    }
    (strengths, gaps)
}

/// Mode-selected structural scaffold, independent of the answer content.
fn build_rewrite(mode: Mode) -> Rewrite {
    let improved_answer = match mode {
        Mode::Behavioral => BEHAVIORAL_REWRITE,
        Mode::Technical | Mode::Case => ANALYTICAL_REWRITE,
    };
    Rewrite {
        improved_answer: improved_answer.to_string(),
        bullets_to_add: REWRITE_BULLETS.iter().map(|b| b.to_string()).collect(),
    }
}

/// Assembles the full scorecard from a detection result.
pub fn build_scorecard(star: StarDetection, mode: Mode) -> Scorecard {
    let scores = compute_scores(&star, mode);
    let (strengths, gaps) = strengths_and_gaps(&star);
    Scorecard {
        star,
        scores,
        strengths,
        gaps,
        rewrite: build_rewrite(mode),
    }
}

/// Derives the compact coach object from the same STAR signals.
pub fn build_coach(star: &StarDetection, mode: Mode) -> Coach {
    let components = [
        ("Situation", star.situation.present),
        ("Task", star.task.present),
        ("Action", star.action.present),
        ("Result", star.result.present),
    ];

    let compact = components
        .iter()
        .map(|(name, present)| {
            format!("{}{}", &name[..1], if *present { "\u{2713}" } else { "\u{2717}" })
        })
        .collect::<Vec<_>>()
        .join(" ");

    let missing: Vec<String> = components
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| name.to_string())
        .collect();

    let (why, intent) = if missing.is_empty() {
        (
            "All four STAR components are present, so the follow-up digs deeper into impact."
                .to_string(),
            "probe_depth".to_string(),
        )
    } else {
        (
            format!(
                "The answer is missing {}; the follow-up gives you a chance to fill the gap.",
                missing.join(", ")
            ),
            "fill_star_gaps".to_string(),
        )
    };

    Coach {
        mode,
        star: compact,
        missing,
        why,
        intent,
    }
}
