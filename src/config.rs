//! Loading agent configuration (prompt overrides) from TOML.
//!
//! Prompts ship with built-in defaults; a TOML file named by
//! `AGENT_CONFIG_PATH` may override any of them to tune tone/structure.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AgentConfig {
  #[serde(default)]
  pub prompts: Prompts,
}

/// Prompts used by the text-model client. Defaults are sensible for a
/// general study assistant.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  // Answer composition
  pub answer_system: String,
  pub answer_user_template: String,
  pub quiz_answer_user_template: String,
  // Flashcards
  pub flashcard_system: String,
  pub flashcard_user_template: String,
  // Study plan
  pub plan_system: String,
  pub plan_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      answer_system: "You are a patient study tutor. Answer the student's question directly, then add a section labeled 'Explanation:' with the reasoning, then a section labeled 'Practice:' containing exactly 3 bulleted practice steps.".into(),
      answer_user_template: "Question: {question}\n\nAnswer it for a student.".into(),
      quiz_answer_user_template: "Question: {question}\n\nAnswer it as quiz preparation: state the answer first, keep the explanation short, and make the practice steps drill-style.".into(),
      flashcard_system: "You are a flashcard author. Output plain text only.".into(),
      flashcard_user_template: "Create {count} flashcards about {topic}, ordered from easiest to hardest. Format each card as two lines:\nQuestion: <question>\nAnswer: <answer>\nNo other text.".into(),
      plan_system: "You are a study planner. Respond ONLY with strict JSON.".into(),
      plan_user_template: "Build a 7-day study plan for these weak topics: {topics}. The student has {daily_hours} hours available per day. Spread topics across the week and increase difficulty over time. Return JSON: {\"tasks\": [{\"day\": int 1-7, \"timeSlot\": \"Morning\"|\"Afternoon\"|\"Evening\", \"duration\": minutes 20-30, \"topic\": string, \"activity\": string, \"description\": string}]}".into(),
    }
  }
}

/// Attempt to load `AgentConfig` from AGENT_CONFIG_PATH. On any parsing/IO
/// error, returns None and the defaults stay in effect.
pub fn load_agent_config_from_env() -> Option<AgentConfig> {
  let path = std::env::var("AGENT_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AgentConfig>(&s) {
      Ok(cfg) => {
        info!(target: "studymate_backend", %path, "Loaded agent config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "studymate_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "studymate_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn toml_overrides_only_named_prompts() {
    let cfg: AgentConfig =
      toml::from_str("[prompts]\nanswer_system = \"custom tutor\"\n").expect("parse");
    assert_eq!(cfg.prompts.answer_system, "custom tutor");
    // Untouched fields keep their defaults.
    assert_eq!(cfg.prompts.plan_system, Prompts::default().plan_system);
  }
}
