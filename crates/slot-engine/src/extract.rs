//! Adapter from free-text model output to structured results.
//!
//! Generative models wrap their JSON in Markdown fences more often than not.
//! Everything that depends on that heuristic lives here, behind
//! `raw text -> structured result`, so callers only see `ParseError`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ParseError;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// An interview question proposed by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub question: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub intent: Option<String>,
}

/// Upper bound of every model-assigned score; the lower bound is zero.
pub const MAX_SCORE: f64 = 10.0;

/// Score for one skill or mindset category, with the evidence cited for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub score: f64,
    #[serde(default)]
    pub evidence: Vec<String>,
}

/// An applicant evaluation returned by the model.
///
/// The three aggregate scores are required. Category lists, the summary,
/// strengths and concerns may be absent and default to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    #[serde(default)]
    pub skill_evaluations: Vec<CategoryScore>,
    #[serde(default)]
    pub mindset_evaluations: Vec<CategoryScore>,
    pub skill_score: f64,
    pub mindset_score: f64,
    pub total_score: f64,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub concerns: Vec<String>,
}

impl EvaluationResult {
    fn check_scores(&self) -> Result<(), ParseError> {
        let aggregates: [(&str, f64); 3] = [
            ("skill_score", self.skill_score),
            ("mindset_score", self.mindset_score),
            ("total_score", self.total_score),
        ];
        let categories = self
            .skill_evaluations
            .iter()
            .chain(&self.mindset_evaluations)
            .map(|c| (c.category.as_str(), c.score));

        for (name, score) in aggregates.into_iter().chain(categories) {
            if !(0.0..=MAX_SCORE).contains(&score) {
                return Err(ParseError::Shape(format!(
                    "{} score {} outside 0..={}",
                    name, score, MAX_SCORE
                )));
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct QuestionsEnvelope {
    questions: Vec<InterviewQuestion>,
}

/// Return the JSON-bearing part of `raw`.
///
/// Prefers the body of the first ```` ```json ```` fence, then the first bare
/// ```` ``` ```` fence, then the whole text. A fence without a closing marker
/// runs to the end of the text.
pub fn json_block(raw: &str) -> &str {
    let body = if let Some(pos) = raw.find(JSON_FENCE) {
        fenced(&raw[pos + JSON_FENCE.len()..])
    } else if let Some(pos) = raw.find(FENCE) {
        fenced(&raw[pos + FENCE.len()..])
    } else {
        raw
    };
    body.trim()
}

fn fenced(rest: &str) -> &str {
    match rest.find(FENCE) {
        Some(end) => &rest[..end],
        None => rest,
    }
}

/// Extract and parse the JSON value in a model response.
///
/// # Errors
/// `ParseError::NoJson` if nothing is left after fence extraction,
/// `ParseError::Json` if the remainder is not valid JSON.
pub fn extract_json_block(raw: &str) -> Result<Value, ParseError> {
    let block = json_block(raw);
    if block.is_empty() {
        return Err(ParseError::NoJson);
    }
    Ok(serde_json::from_str(block)?)
}

/// Parse `{"questions": [{question, category, intent}, ...]}` from a model
/// response, keeping at most `limit` questions.
///
/// # Errors
/// As [`extract_json_block`], plus `ParseError::Shape` when the JSON lacks a
/// `questions` array of objects with a `question` string.
pub fn parse_questions(raw: &str, limit: usize) -> Result<Vec<InterviewQuestion>, ParseError> {
    let value = extract_json_block(raw)?;
    let envelope: QuestionsEnvelope =
        serde_json::from_value(value).map_err(|e| ParseError::Shape(e.to_string()))?;

    let mut questions = envelope.questions;
    questions.truncate(limit);
    Ok(questions)
}

/// Parse an applicant evaluation from a model response.
///
/// # Errors
/// As [`extract_json_block`], plus `ParseError::Shape` when an aggregate score
/// is missing, a field has the wrong type, or any score falls outside
/// `0..=MAX_SCORE`.
pub fn parse_evaluation(raw: &str) -> Result<EvaluationResult, ParseError> {
    let value = extract_json_block(raw)?;
    let evaluation: EvaluationResult =
        serde_json::from_value(value).map_err(|e| ParseError::Shape(e.to_string()))?;
    evaluation.check_scores()?;
    Ok(evaluation)
}
