//! Domain models used by the backend: generation requests, answers,
//! flashcards, study plans, and quiz records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of output is the caller asking for?
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
  /// Conversational answer with explanation and practice steps.
  Explain,
  /// Answer phrased as quiz-style prep.
  Quiz,
  /// Flashcard batch generation.
  Flashcard,
  /// Weekly study-plan generation.
  Plan,
}
impl Default for Mode {
  fn default() -> Self { Mode::Explain }
}

/// Per-user context forwarded by the HTTP layer when known.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
  #[serde(default)] pub weak_topics: Vec<String>,
  #[serde(default)] pub daily_budget_minutes: u32,
}

/// Immutable request record, created fresh per call by the HTTP layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
  pub subject: String,
  pub mode: Mode,
  #[serde(default)] pub count: Option<u32>,
  #[serde(default)] pub user_context: Option<UserContext>,
}

impl GenerationRequest {
  pub fn new(subject: impl Into<String>, mode: Mode) -> Self {
    Self { subject: subject.into(), mode, count: None, user_context: None }
  }

  pub fn with_count(mut self, count: u32) -> Self {
    self.count = Some(count);
    self
  }
}

/// Citation stub attached to answers so the UI can show provenance.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRef {
  pub title: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub url: Option<String>,
}

/// Fully-assembled answer handed back to the caller.
///
/// `confidence` is a provenance tag, not a probability: 0.9 means the answer
/// came verbatim from the fallback table, 0.85 that it was model-derived,
/// 0.7 that it is the last-resort generic response. Values are never
/// combined or averaged.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResult {
  pub answer: String,
  pub explanation: String,
  pub practice_steps: Vec<String>,
  pub sources: Vec<SourceRef>,
  pub confidence: f32,
}

/// A single flashcard. Ids are 1-based and dense within a batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
  pub id: u32,
  pub question: String,
  pub answer: String,
  pub topic: String,
}

/// Time slot for a study-plan task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeSlot {
  Morning,
  Afternoon,
  Evening,
}

impl TimeSlot {
  pub const ALL: [TimeSlot; 3] = [TimeSlot::Morning, TimeSlot::Afternoon, TimeSlot::Evening];

  /// Lenient parse used when decoding model output; unknown strings count
  /// as missing and take the Morning default.
  pub fn parse(s: &str) -> Option<Self> {
    match s.trim().to_lowercase().as_str() {
      "morning" => Some(TimeSlot::Morning),
      "afternoon" => Some(TimeSlot::Afternoon),
      "evening" => Some(TimeSlot::Evening),
      _ => None,
    }
  }
}

/// One scheduled task inside a weekly plan.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlanTask {
  pub id: String,
  /// Day of the week, 1..=7.
  pub day: u32,
  pub time_slot: TimeSlot,
  /// Minutes, 20..=30 per task.
  pub duration_minutes: u32,
  pub topic: String,
  pub activity: String,
  pub description: String,
  pub completed: bool,
}

/// A full weekly study plan.
///
/// The minute budget behind `tasks` is global across the whole week
/// (`daily_hours * 60` total), not per day; early days may exhaust it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
  pub id: String,
  pub user_id: String,
  pub daily_hours: u32,
  pub weak_topics: Vec<String>,
  pub tasks: Vec<StudyPlanTask>,
  pub created_at: DateTime<Utc>,
  pub completed_task_ids: Vec<String>,
  pub weekly_progress_percent: u32,
}

/// Quiz question held in the fixed in-memory bank.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
  pub id: String,
  pub topic: String,
  pub question: String,
  pub answer: String,
  pub explanation: String,
}

/// Grading outcome for one submitted quiz answer.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResult {
  pub correct: bool,
  pub explanation: String,
  pub new_score: u32,
}
