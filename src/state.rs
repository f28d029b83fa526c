//! Application state: prompts, quiz bank, and the optional model client.
//!
//! The generation core is stateless per call; everything here is built once
//! at startup and only ever read afterwards, so no locking is needed.
//! Concurrent requests are fully independent (and not deduplicated: two
//! simultaneous asks for the same question may both hit the model).

use tracing::{info, instrument};

use crate::config::{load_agent_config_from_env, Prompts};
use crate::model::OpenAi;
use crate::quiz::QuizBank;

#[derive(Clone)]
pub struct AppState {
    pub model: Option<OpenAi>,
    pub prompts: Prompts,
    pub quiz: QuizBank,
}

impl AppState {
    /// Build state from env: load prompt config, the quiz bank, and the
    /// model client if an API key is present.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let prompts = load_agent_config_from_env()
            .map(|c| c.prompts)
            .unwrap_or_default();

        let model = OpenAi::from_env();
        match &model {
            Some(m) => {
                info!(target: "studymate_backend", base_url = %m.base_url, model = %m.model, "Text model enabled.");
            }
            None => {
                info!(target: "studymate_backend", "Text model disabled (no OPENAI_API_KEY). Fallback-only mode.");
            }
        }

        Self {
            model,
            prompts,
            quiz: QuizBank::default(),
        }
    }
}
