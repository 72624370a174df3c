// All LLM prompt constants for the Blueprint module.

/// System prompt for blueprint generation. Enforces JSON-only output.
pub const BLUEPRINT_SYSTEM: &str =
    "You are an expert interview coach and hiring analyst. \
    Analyze a resume against a job description and produce an interview blueprint. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Blueprint prompt template. Replace `{company}`, `{resume_text}`, and
/// `{jd_text}` before sending.
pub const BLUEPRINT_PROMPT_TEMPLATE: &str = r#"Analyze the resume and job description below and produce an interview blueprint for a candidate interviewing at {company}.

Return a JSON object with this EXACT schema (no extra fields):
{
  "role_focus": ["top skill or topic the interview will probe"],
  "likely_interview_type": "behavioral_technical",
  "risk_gaps": ["concrete mismatch between the resume and the job description"],
  "company_notes": ["company-specific interview context"],
  "sample_questions": [
    {"type": "behavioral", "question": "Tell me about a time you..."}
  ]
}

Rules:

LIKELY INTERVIEW TYPE (pick exactly one; "mixed" is NOT a valid value):
- "behavioral_technical": the role emphasizes engineering, technical, or data work
- "behavioral_case": the role emphasizes strategy, product, or business work

ROLE FOCUS: 4-6 skills or topics, ordered by how likely the interview is to probe them.
RISK GAPS: mismatches between the resume and the job description an interviewer may press on.
COMPANY NOTES: what is distinctive about interviewing at {company}.
SAMPLE QUESTIONS: 4-6 questions; "type" must be "behavioral", "technical", or "case".

RESUME:
{resume_text}

JOB DESCRIPTION:
{jd_text}"#;
