//! Quiz selection and grading over the fixed in-memory question bank.

use tracing::instrument;

use crate::domain::{GradeResult, QuizQuestion};
use crate::util::normalize_answer;

/// Points awarded for a correct answer.
const CORRECT_SCORE: u32 = 10;

/// Read-only question bank, built once at startup.
#[derive(Clone)]
pub struct QuizBank {
  questions: Vec<QuizQuestion>,
}

impl QuizBank {
  pub fn new(questions: Vec<QuizQuestion>) -> Self {
    Self { questions }
  }

  pub fn get(&self, id: &str) -> Option<&QuizQuestion> {
    self.questions.iter().find(|q| q.id == id)
  }

  /// Select up to `count` questions matching any of the requested topics
  /// (case-insensitive substring). With no topic hit, the whole bank is
  /// eligible so a quiz can always be started.
  #[instrument(level = "debug", skip(self, topics), fields(topics = topics.len(), count))]
  pub fn start(&self, topics: &[String], count: usize) -> Vec<QuizQuestion> {
    let folded: Vec<String> = topics.iter().map(|t| t.to_lowercase()).collect();
    let matched: Vec<QuizQuestion> = self
      .questions
      .iter()
      .filter(|q| folded.iter().any(|t| q.topic.to_lowercase().contains(t.as_str())))
      .cloned()
      .collect();
    let pool = if matched.is_empty() { self.questions.clone() } else { matched };
    pool.into_iter().take(count.max(1)).collect()
  }

  /// Grade one submitted answer. An unknown id is a negative result, not
  /// an error. Matching is exact after case-fold and trim on both sides.
  #[instrument(level = "info", skip(self, user_answer), fields(%question_id, ans_len = user_answer.len()))]
  pub fn grade(&self, question_id: &str, user_answer: &str) -> GradeResult {
    let Some(q) = self.get(question_id) else {
      return GradeResult {
        correct: false,
        explanation: "Question not found".into(),
        new_score: 0,
      };
    };
    let correct = normalize_answer(user_answer) == normalize_answer(&q.answer);
    GradeResult {
      correct,
      explanation: q.explanation.clone(),
      new_score: if correct { CORRECT_SCORE } else { 0 },
    }
  }
}

impl Default for QuizBank {
  fn default() -> Self {
    Self::new(crate::fallback::quiz_bank())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn exact_answer_scores_ten() {
    let bank = QuizBank::default();
    let g = bank.grade("calc-1", "2x");
    assert!(g.correct);
    assert_eq!(g.new_score, 10);
  }

  #[test]
  fn match_ignores_case_and_whitespace() {
    let bank = QuizBank::default();
    assert!(bank.grade("calc-1", "2X ").correct);
  }

  #[test]
  fn wrong_answer_scores_zero_with_explanation() {
    let bank = QuizBank::default();
    let g = bank.grade("calc-1", "x^2");
    assert!(!g.correct);
    assert_eq!(g.new_score, 0);
    assert!(!g.explanation.is_empty());
  }

  #[test]
  fn unknown_id_is_a_negative_result() {
    let bank = QuizBank::default();
    let g = bank.grade("bogus-id", "anything");
    assert!(!g.correct);
    assert_eq!(g.new_score, 0);
    assert_eq!(g.explanation, "Question not found");
  }

  #[test]
  fn start_filters_by_topic_substring() {
    let bank = QuizBank::default();
    let qs = bank.start(&["CALC".into()], 10);
    assert!(!qs.is_empty());
    assert!(qs.iter().all(|q| q.topic == "calculus"));
  }

  #[test]
  fn start_falls_back_to_whole_bank() {
    let bank = QuizBank::default();
    let qs = bank.start(&["astrology".into()], 2);
    assert_eq!(qs.len(), 2);
  }
}
