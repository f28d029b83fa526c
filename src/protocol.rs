//! Public HTTP request/response DTOs (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{Mode, QuizQuestion, UserContext};

#[derive(Debug, Deserialize)]
pub struct AskIn {
    pub question: String,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default, rename = "userContext")]
    pub user_context: Option<UserContext>,
}

#[derive(Debug, Deserialize)]
pub struct FlashcardsIn {
    pub topic: String,
    #[serde(default)]
    pub count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct QuizStartIn {
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default = "default_quiz_count")]
    pub count: usize,
}

fn default_quiz_count() -> usize {
    5
}

/// Question as shown to the quiz taker: the expected answer stays server-side.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestionOut {
    pub id: String,
    pub topic: String,
    pub question: String,
}

impl From<QuizQuestion> for QuizQuestionOut {
    fn from(q: QuizQuestion) -> Self {
        Self { id: q.id, topic: q.topic, question: q.question }
    }
}

#[derive(Debug, Deserialize)]
pub struct QuizAnswerIn {
    #[serde(rename = "questionId")]
    pub question_id: String,
    #[serde(rename = "userAnswer")]
    pub user_answer: String,
}

#[derive(Debug, Deserialize)]
pub struct PlanIn {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "dailyHours")]
    pub daily_hours: u32,
    #[serde(default, rename = "weakTopics")]
    pub weak_topics: Vec<String>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
