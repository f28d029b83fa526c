//! Answer composition: fallback table first, then the model, then the
//! generic last resort. `compose` never fails; every decision point has a
//! deterministic fallback output.

use tracing::{error, instrument, warn};

use crate::config::Prompts;
use crate::domain::{AnswerResult, GenerationRequest, Mode, SourceRef};
use crate::fallback::{
  lookup_trigger, GENERIC_ANSWER, GENERIC_EXPLANATION, GENERIC_PRACTICE,
};
use crate::model::TextModel;
use crate::util::{fill_template, find_ci, strip_list_marker};

pub const CONFIDENCE_TABLE: f32 = 0.9;
pub const CONFIDENCE_MODEL: f32 = 0.85;
pub const CONFIDENCE_GENERIC: f32 = 0.7;

const MAX_PRACTICE_STEPS: usize = 3;

/// Compose a best-effort answer for the request. Order of preference:
/// exact fallback-table hit (0.9), model-derived (0.85), generic (0.7).
#[instrument(level = "info", skip(model, prompts, req), fields(mode = ?req.mode, q_len = req.subject.len()))]
pub async fn compose<M: TextModel>(
  model: Option<&M>,
  prompts: &Prompts,
  req: &GenerationRequest,
) -> AnswerResult {
  let folded = req.subject.to_lowercase();
  if let Some(entry) = lookup_trigger(&folded) {
    return AnswerResult {
      answer: entry.answer.to_string(),
      explanation: entry.explanation.to_string(),
      practice_steps: entry.practice.iter().map(|s| s.to_string()).collect(),
      sources: vec![SourceRef { title: entry.source_title.to_string(), url: None }],
      confidence: CONFIDENCE_TABLE,
    };
  }

  if let Some(m) = model {
    let tpl = match req.mode {
      Mode::Quiz => &prompts.quiz_answer_user_template,
      _ => &prompts.answer_user_template,
    };
    let mut user = fill_template(tpl, &[("question", &req.subject)]);
    if let Some(ctx) = &req.user_context {
      if !ctx.weak_topics.is_empty() {
        user.push_str(&format!(
          "\n\nThe student struggles with: {}.",
          ctx.weak_topics.join(", ")
        ));
      }
    }
    match m.complete(&prompts.answer_system, &user).await {
      Ok(raw) => return from_model_text(&raw),
      Err(e) => {
        error!(target: "generate", error = %e, "Model answer failed; using generic fallback");
      }
    }
  } else {
    warn!(target: "generate", "No model configured; using generic fallback");
  }

  generic_answer()
}

/// Assemble an `AnswerResult` out of raw model text.
fn from_model_text(raw: &str) -> AnswerResult {
  let (answer, explanation) = split_explanation(raw);
  let practice = extract_practice(raw)
    .unwrap_or_else(|| GENERIC_PRACTICE.iter().map(|s| s.to_string()).collect());
  AnswerResult {
    answer,
    explanation,
    practice_steps: practice,
    sources: vec![SourceRef { title: "AI-generated response".into(), url: None }],
    confidence: CONFIDENCE_MODEL,
  }
}

fn generic_answer() -> AnswerResult {
  AnswerResult {
    answer: GENERIC_ANSWER.into(),
    explanation: GENERIC_EXPLANATION.into(),
    practice_steps: GENERIC_PRACTICE.iter().map(|s| s.to_string()).collect(),
    sources: vec![],
    confidence: CONFIDENCE_GENERIC,
  }
}

/// Split raw model text at the first case-insensitive "explanation" label
/// (colon or newline delimited). Returns (answer, explanation); with no
/// label, the whole text doubles as both.
pub fn split_explanation(raw: &str) -> (String, String) {
  match find_ci(raw, "explanation") {
    Some(idx) => {
      let before = raw[..idx].trim();
      let after = raw[idx + "explanation".len()..]
        .trim_start_matches(|c| c == ':' || c == '\n')
        .trim();
      let answer = if before.is_empty() { raw.trim() } else { before };
      (answer.to_string(), after.to_string())
    }
    None => (raw.trim().to_string(), raw.trim().to_string()),
  }
}

/// Up to 3 non-empty lines after the first case-insensitive occurrence of
/// "practice", with bullet/number markers stripped. `None` when the word is
/// absent or no usable lines follow.
///
/// The word is matched anywhere in the text, not just as a section header.
/// That can misfire when "practice" appears earlier in prose; this mirrors
/// the behavior callers have come to rely on, so don't tighten it casually.
pub fn extract_practice(raw: &str) -> Option<Vec<String>> {
  let idx = find_ci(raw, "practice")?;
  let steps: Vec<String> = raw[idx..]
    .lines()
    .skip(1) // the remainder of the label line itself
    .filter(|l| !l.trim().is_empty())
    .map(|l| strip_list_marker(l).to_string())
    .filter(|l| !l.is_empty())
    .take(MAX_PRACTICE_STEPS)
    .collect();
  if steps.is_empty() { None } else { Some(steps) }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::test_support::{FailingModel, FixedModel, NoModel};

  fn req(q: &str) -> GenerationRequest {
    GenerationRequest::new(q, Mode::Explain)
  }

  #[tokio::test]
  async fn trigger_hit_ignores_model_state() {
    let prompts = Prompts::default();
    let out = compose(Some(&FailingModel), &prompts, &req("What is the derivative of x^2?")).await;
    assert_eq!(out.confidence, CONFIDENCE_TABLE);
    assert_eq!(out.answer, "The derivative of x² is 2x.");
    assert_eq!(out.sources.len(), 1);
  }

  #[tokio::test]
  async fn no_model_no_trigger_is_generic() {
    let prompts = Prompts::default();
    let out = compose(None::<&NoModel>, &prompts, &req("tell me about glaciers")).await;
    assert_eq!(out.confidence, CONFIDENCE_GENERIC);
    assert_eq!(out.answer, GENERIC_ANSWER);
    assert_eq!(out.practice_steps.len(), 3);
  }

  #[tokio::test]
  async fn model_failure_falls_back_to_generic() {
    let prompts = Prompts::default();
    let out = compose(Some(&FailingModel), &prompts, &req("tell me about glaciers")).await;
    assert_eq!(out.confidence, CONFIDENCE_GENERIC);
  }

  #[tokio::test]
  async fn model_text_is_sectioned() {
    let prompts = Prompts::default();
    let raw = "Glaciers are rivers of ice.\nExplanation: They form from compacted snow.\nPractice:\n- Read about ice cores.\n- Sketch a glacier cross-section.\n- Explain moraine formation.\n- A fourth line that should be dropped.";
    let out = compose(Some(&FixedModel(raw.into())), &prompts, &req("tell me about glaciers")).await;
    assert_eq!(out.confidence, CONFIDENCE_MODEL);
    assert_eq!(out.answer, "Glaciers are rivers of ice.");
    assert_eq!(out.explanation, "They form from compacted snow.\nPractice:\n- Read about ice cores.\n- Sketch a glacier cross-section.\n- Explain moraine formation.\n- A fourth line that should be dropped.");
    assert_eq!(
      out.practice_steps,
      vec![
        "Read about ice cores.",
        "Sketch a glacier cross-section.",
        "Explain moraine formation.",
      ]
    );
  }

  #[test]
  fn missing_explanation_label_uses_whole_text() {
    let (answer, explanation) = split_explanation("Just one blob of text.");
    assert_eq!(answer, "Just one blob of text.");
    assert_eq!(explanation, "Just one blob of text.");
  }

  #[test]
  fn missing_practice_label_yields_none() {
    assert!(extract_practice("No steps here at all.").is_none());
  }

  #[test]
  fn practice_word_in_prose_misfires_from_there() {
    // Known heuristic: the first occurrence wins even mid-prose.
    let raw = "With practice you improve.\nline one\nline two";
    let steps = extract_practice(raw).expect("steps");
    assert_eq!(steps, vec!["line one", "line two"]);
  }

  #[test]
  fn numbered_markers_are_stripped() {
    let raw = "Practice:\n1. first\n2) second\n* third";
    let steps = extract_practice(raw).expect("steps");
    assert_eq!(steps, vec!["first", "second", "third"]);
  }
}
