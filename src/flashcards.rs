//! Flashcard generation: model-produced "Question:/Answer:" line pairs,
//! with a per-subject static deck as fallback. Always returns at least one
//! card and never more than the requested count.

use tracing::{error, instrument, warn};

use crate::config::Prompts;
use crate::domain::{Flashcard, GenerationRequest};
use crate::fallback::lookup_deck;
use crate::model::TextModel;
use crate::util::{fill_template, find_ci};

pub const DEFAULT_COUNT: u32 = 5;

/// Generate up to `req.count` flashcards for `req.subject`.
#[instrument(level = "info", skip(model, prompts, req), fields(topic = %req.subject, count = req.count))]
pub async fn generate<M: TextModel>(
  model: Option<&M>,
  prompts: &Prompts,
  req: &GenerationRequest,
) -> Vec<Flashcard> {
  let topic = req.subject.as_str();
  // A batch is never empty, so a count of zero is lifted to one.
  let count = req.count.unwrap_or(DEFAULT_COUNT).max(1) as usize;

  if let Some(m) = model {
    let user = fill_template(
      &prompts.flashcard_user_template,
      &[("count", &count.to_string()), ("topic", topic)],
    );
    match m.complete(&prompts.flashcard_system, &user).await {
      Ok(raw) => {
        let cards = parse_flashcards(&raw, topic, count);
        if !cards.is_empty() {
          return cards;
        }
        warn!(target: "generate", %topic, "No Q/A pairs in model output; using fallback deck");
      }
      Err(e) => {
        error!(target: "generate", %topic, error = %e, "Model flashcards failed; using fallback deck");
      }
    }
  }

  fallback_cards(topic, count)
}

/// Parse "Question: …" / "Answer: …" line pairs out of free text.
///
/// A question line starts a new card, flushing a complete pending pair
/// first; an answer line completes the pending question. A dangling
/// complete pair at end-of-text is flushed if there is still room.
/// Scanning stops as soon as `count` cards have been flushed.
pub fn parse_flashcards(raw: &str, topic: &str, count: usize) -> Vec<Flashcard> {
  let mut cards: Vec<Flashcard> = Vec::new();
  let mut pending_q: Option<String> = None;
  let mut pending_a: Option<String> = None;

  for line in raw.lines() {
    if cards.len() >= count {
      break;
    }
    if let Some(idx) = find_ci(line, "question:") {
      if let (Some(q), Some(a)) = (pending_q.take(), pending_a.take()) {
        cards.push(Flashcard {
          id: cards.len() as u32 + 1,
          question: q,
          answer: a,
          topic: topic.to_string(),
        });
        if cards.len() >= count {
          break;
        }
      }
      // A question without a captured answer is simply overwritten.
      pending_q = Some(line[idx + "question:".len()..].trim().to_string());
      pending_a = None;
    } else if let Some(idx) = find_ci(line, "answer:") {
      if pending_q.is_some() {
        pending_a = Some(line[idx + "answer:".len()..].trim().to_string());
      }
    }
  }

  if cards.len() < count {
    if let (Some(q), Some(a)) = (pending_q, pending_a) {
      cards.push(Flashcard {
        id: cards.len() as u32 + 1,
        question: q,
        answer: a,
        topic: topic.to_string(),
      });
    }
  }

  cards
}

/// Static deck selected by topic keyword, or a single sentinel card when no
/// deck covers the topic.
fn fallback_cards(topic: &str, count: usize) -> Vec<Flashcard> {
  let folded = topic.to_lowercase();
  if let Some(deck) = lookup_deck(&folded) {
    return deck
      .cards
      .iter()
      .take(count)
      .enumerate()
      .map(|(i, (q, a))| Flashcard {
        id: i as u32 + 1,
        question: q.to_string(),
        answer: a.to_string(),
        topic: topic.to_string(),
      })
      .collect();
  }

  vec![Flashcard {
    id: 1,
    question: format!("No flashcards available for '{}' yet.", topic),
    answer: "Try a core subject such as calculus, algebra, physics, chemistry, biology or computer science.".into(),
    topic: topic.to_string(),
  }]
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Mode;
  use crate::model::test_support::{FailingModel, FixedModel, NoModel};

  fn req(topic: &str, count: u32) -> GenerationRequest {
    GenerationRequest::new(topic, Mode::Flashcard).with_count(count)
  }

  #[test]
  fn parses_well_formed_pairs() {
    let raw = "Question: What is X?\nAnswer: Y\nQuestion: What is Z?\nAnswer: W\n";
    let cards = parse_flashcards(raw, "algebra", 2);
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].id, 1);
    assert_eq!(cards[0].question, "What is X?");
    assert_eq!(cards[0].answer, "Y");
    assert_eq!(cards[1].id, 2);
    assert_eq!(cards[1].question, "What is Z?");
    assert_eq!(cards[1].answer, "W");
  }

  #[test]
  fn ids_stay_dense_despite_noise() {
    let raw = "Here are your cards!\n1. Question: A?\nAnswer: a\nsome chatter\nQuestion: B?\nAnswer: b";
    let cards = parse_flashcards(raw, "physics", 5);
    assert_eq!(cards.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2]);
  }

  #[test]
  fn answerless_question_is_overwritten() {
    let raw = "Question: dropped?\nQuestion: kept?\nAnswer: yes";
    let cards = parse_flashcards(raw, "t", 5);
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].question, "kept?");
  }

  #[test]
  fn stops_at_requested_count() {
    let raw = "Question: A?\nAnswer: a\nQuestion: B?\nAnswer: b\nQuestion: C?\nAnswer: c";
    let cards = parse_flashcards(raw, "t", 2);
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[1].question, "B?");
  }

  #[test]
  fn answer_without_pending_question_is_ignored() {
    let cards = parse_flashcards("Answer: orphan\nQuestion: Q?\nAnswer: A", "t", 5);
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].answer, "A");
  }

  #[tokio::test]
  async fn unparseable_model_output_uses_deck() {
    let prompts = Prompts::default();
    let cards = generate(Some(&FixedModel("total nonsense".into())), &prompts, &req("calculus", 3)).await;
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0].id, 1);
    assert_eq!(cards[0].answer, "2x");
  }

  #[tokio::test]
  async fn model_failure_uses_deck() {
    let prompts = Prompts::default();
    let cards = generate(Some(&FailingModel), &prompts, &req("intro to biology", 2)).await;
    assert_eq!(cards.len(), 2);
    assert!(cards.iter().all(|c| c.topic == "intro to biology"));
  }

  #[tokio::test]
  async fn unknown_topic_gets_sentinel_card() {
    let prompts = Prompts::default();
    let cards = generate(None::<&NoModel>, &prompts, &req("numerology", 4)).await;
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].id, 1);
    assert!(cards[0].question.contains("numerology"));
  }

  #[tokio::test]
  async fn batch_is_never_empty_or_oversized() {
    let prompts = Prompts::default();
    for count in [0, 1, 3, 50] {
      let cards = generate(None::<&NoModel>, &prompts, &req("chemistry", count)).await;
      assert!(!cards.is_empty());
      assert!(cards.len() <= count.max(1) as usize);
      for (i, c) in cards.iter().enumerate() {
        assert_eq!(c.id, i as u32 + 1);
      }
    }
  }
}
