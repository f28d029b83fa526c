//! HTTP endpoint handlers. These are thin wrappers that forward to the
//! generation core. Each handler is instrumented and logs parameters and
//! basic result info.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, instrument};

use crate::domain::{GenerationRequest, Mode};
use crate::error::GenError;
use crate::protocol::*;
use crate::state::AppState;
use crate::{compose, flashcards, plan};

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state, body), fields(mode = ?body.mode, q_len = body.question.len()))]
pub async fn http_post_ask(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AskIn>,
) -> impl IntoResponse {
  let mut req = GenerationRequest::new(body.question, body.mode);
  req.user_context = body.user_context;
  let result = compose::compose(state.model.as_ref(), &state.prompts, &req).await;
  info!(target: "generate", confidence = result.confidence, "HTTP ask served");
  Json(result)
}

#[instrument(level = "info", skip(state, body), fields(topic = %body.topic, count = ?body.count))]
pub async fn http_post_flashcards(
  State(state): State<Arc<AppState>>,
  Json(body): Json<FlashcardsIn>,
) -> impl IntoResponse {
  let mut req = GenerationRequest::new(body.topic, Mode::Flashcard);
  req.count = body.count;
  let cards = flashcards::generate(state.model.as_ref(), &state.prompts, &req).await;
  info!(target: "generate", cards = cards.len(), "HTTP flashcards served");
  Json(cards)
}

#[instrument(level = "info", skip(state, body), fields(topics = body.topics.len(), count = body.count))]
pub async fn http_post_quiz_start(
  State(state): State<Arc<AppState>>,
  Json(body): Json<QuizStartIn>,
) -> impl IntoResponse {
  let questions: Vec<QuizQuestionOut> = state
    .quiz
    .start(&body.topics, body.count)
    .into_iter()
    .map(Into::into)
    .collect();
  info!(target: "generate", served = questions.len(), "HTTP quiz started");
  Json(questions)
}

#[instrument(level = "info", skip(state, body), fields(%body.question_id))]
pub async fn http_post_quiz_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<QuizAnswerIn>,
) -> impl IntoResponse {
  let graded = state.quiz.grade(&body.question_id, &body.user_answer);
  info!(target: "generate", id = %body.question_id, correct = graded.correct, "HTTP quiz answer graded");
  Json(graded)
}

#[instrument(level = "info", skip(state, body), fields(%body.user_id, daily_hours = body.daily_hours, topics = body.weak_topics.len()))]
pub async fn http_post_plan(
  State(state): State<Arc<AppState>>,
  Json(body): Json<PlanIn>,
) -> Result<impl IntoResponse, GenError> {
  let mut rng = StdRng::from_entropy();
  let plan = plan::generate(
    state.model.as_ref(),
    &state.prompts,
    &body.user_id,
    body.daily_hours,
    &body.weak_topics,
    &mut rng,
  )
  .await?;
  info!(target: "generate", plan_id = %plan.id, tasks = plan.tasks.len(), "HTTP plan served");
  Ok(Json(plan))
}
