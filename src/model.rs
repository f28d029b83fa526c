//! Text-model capability and its OpenAI-compatible implementation.
//!
//! Generators receive the model as an explicitly injected `Option<&impl
//! TextModel>` so tests can substitute a scripted double with zero
//! production-code changes. Every call is single-shot: no retry, no
//! caller-visible timeout beyond the client's own.
//!
//! NOTE: We never log the API key and we keep payload truncations short.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::GenError;
use crate::util::trunc_for_log;

/// The one capability the generation core needs from the outside world:
/// given a prompt, produce raw text or fail. Any failure is treated
/// uniformly as "unavailable".
#[async_trait]
pub trait TextModel: Send + Sync {
  async fn complete(&self, system: &str, user: &str) -> Result<String, GenError>;
}

#[derive(Clone)]
pub struct OpenAi {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

impl OpenAi {
  /// Construct the client if we find OPENAI_API_KEY; otherwise return None.
  /// Absence of the key is a supported state that forces fallback-only
  /// behavior for every generator.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("OPENAI_API_KEY").ok()?;
    let base_url =
      std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
    let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, model })
  }
}

#[async_trait]
impl TextModel for OpenAi {
  #[instrument(level = "info", skip(self, system, user), fields(model = %self.model, user_len = user.len()))]
  async fn complete(&self, system: &str, user: &str) -> Result<String, GenError> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: self.model.clone(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: system.into() },
        ChatMessageReq { role: "user".into(), content: user.into() },
      ],
      temperature: 0.7,
      max_tokens: None,
    };

    let res = self.client.post(&url)
      .header(USER_AGENT, "studymate-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await
      .map_err(|e| GenError::ModelUnavailable(e.to_string()))?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_api_error(&body).unwrap_or_else(|| trunc_for_log(&body, 300));
      return Err(GenError::ModelUnavailable(format!("HTTP {}: {}", status, msg)));
    }

    let body: ChatCompletionResponse = res.json().await
      .map_err(|e| GenError::ModelUnavailable(e.to_string()))?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "Model usage");
    }
    let text = body.choices.first()
      .and_then(|c| c.message.content.clone())
      .unwrap_or_default().trim().to_string();

    Ok(text)
  }
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  #[serde(skip_serializing_if = "Option::is_none")]
  max_tokens: Option<u32>,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

/// Try to extract a clean error message from an OpenAI-style error body.
fn extract_api_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}

#[cfg(test)]
pub mod test_support {
  //! Scripted model doubles shared by generator tests.

  use super::*;

  /// Returns a fixed string for every prompt.
  pub struct FixedModel(pub String);

  #[async_trait]
  impl TextModel for FixedModel {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String, GenError> {
      Ok(self.0.clone())
    }
  }

  /// Fails every call, like a down or quota-exhausted endpoint.
  pub struct FailingModel;

  #[async_trait]
  impl TextModel for FailingModel {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String, GenError> {
      Err(GenError::ModelUnavailable("quota exceeded".into()))
    }
  }

  /// Stand-in type for call sites that pass `None`.
  pub type NoModel = FixedModel;
}
