//! Static fallback content that keeps the app useful without any model:
//! the keyword answer table, generic answer text, per-subject flashcard
//! decks, the study-plan activity list, and the fixed quiz bank.

use crate::domain::QuizQuestion;

/// One pre-written answer selected by trigger keywords.
pub struct TriggerEntry {
  /// Any of these substrings (against the case-folded question) selects
  /// the entry.
  pub keywords: &'static [&'static str],
  pub answer: &'static str,
  pub explanation: &'static str,
  pub practice: [&'static str; 3],
  pub source_title: &'static str,
}

/// Keyword answer table. This is a priority list, not independent checks:
/// entries are ordered most-specific first and the first match wins, because
/// a question can contain several trigger words ("derivative of x^2"
/// contains both the identity and the bare "derivative" keyword).
pub const TRIGGER_TABLE: &[TriggerEntry] = &[
  TriggerEntry {
    keywords: &["derivative of x^2", "derivative of x squared", "derivative of x²"],
    answer: "The derivative of x² is 2x.",
    explanation: "By the power rule, d/dx(xⁿ) = n·xⁿ⁻¹. With n = 2 this gives 2·x¹ = 2x.",
    practice: [
      "Differentiate x³ using the power rule.",
      "Differentiate 5x² and compare with the x² result.",
      "Check your answer by expanding (x+h)² and taking the limit.",
    ],
    source_title: "Calculus reference: power rule",
  },
  TriggerEntry {
    keywords: &["derivative"],
    answer: "A derivative measures the instantaneous rate of change of a function.",
    explanation: "For f(x), the derivative f'(x) is the limit of (f(x+h) - f(x)) / h as h approaches 0. Geometrically it is the slope of the tangent line at x.",
    practice: [
      "Compute the derivative of a linear function and interpret the slope.",
      "Apply the power rule to three polynomial terms.",
      "Sketch a curve and its tangent line at one point.",
    ],
    source_title: "Calculus reference: derivatives",
  },
  TriggerEntry {
    keywords: &["quadratic", "solve"],
    answer: "Use the quadratic formula: x = (-b ± √(b² - 4ac)) / 2a.",
    explanation: "For ax² + bx + c = 0, the discriminant b² - 4ac decides the roots: positive means two real roots, zero one repeated root, negative two complex roots.",
    practice: [
      "Solve x² - 5x + 6 = 0 by factoring, then verify with the formula.",
      "Compute the discriminant of 2x² + 3x + 5 = 0.",
      "Complete the square on x² + 6x + 2 = 0.",
    ],
    source_title: "Algebra reference: quadratic equations",
  },
  TriggerEntry {
    keywords: &["photosynthesis"],
    answer: "Photosynthesis converts light energy, water and CO₂ into glucose and oxygen.",
    explanation: "The overall reaction is 6CO₂ + 6H₂O + light → C₆H₁₂O₆ + 6O₂. Light-dependent reactions in the thylakoid produce ATP and NADPH, which drive the Calvin cycle in the stroma.",
    practice: [
      "Write out the balanced photosynthesis equation from memory.",
      "List the inputs and outputs of the light-dependent reactions.",
      "Explain where the Calvin cycle happens and what it produces.",
    ],
    source_title: "Biology reference: photosynthesis",
  },
];

/// First-match lookup against the case-folded question.
pub fn lookup_trigger(question_folded: &str) -> Option<&'static TriggerEntry> {
  TRIGGER_TABLE
    .iter()
    .find(|e| e.keywords.iter().any(|k| question_folded.contains(k)))
}

// Last-resort generic answer, used when there is no table hit and the
// model is unavailable or failed.
pub const GENERIC_ANSWER: &str =
  "I couldn't generate a tailored answer right now, but here is how to approach the question.";
pub const GENERIC_EXPLANATION: &str =
  "Break the question into smaller parts, identify what is given and what is asked, and work from definitions you already know toward the unknown.";
pub const GENERIC_PRACTICE: [&'static str; 3] = [
  "Restate the question in your own words.",
  "List the facts and formulas that could apply.",
  "Work a simpler version of the problem first.",
];

// Defaults applied when a model-produced plan task is missing fields.
pub const DEFAULT_ACTIVITY: &str = "Study session";
pub const DEFAULT_DESCRIPTION: &str = "Focused study session on a weak topic.";

/// Activities the fallback planner samples from.
pub const ACTIVITIES: &[&str] = &[
  "Review notes",
  "Practice problems",
  "Watch a tutorial",
  "Self-quiz",
  "Summarize the chapter",
];

/// Subject key plus its canned question/answer pairs.
pub struct FallbackDeck {
  pub key: &'static str,
  pub cards: &'static [(&'static str, &'static str)],
}

/// Per-subject flashcard decks, matched by case-insensitive substring of
/// the requested topic.
pub const FALLBACK_DECKS: &[FallbackDeck] = &[
  FallbackDeck {
    key: "calculus",
    cards: &[
      ("What is the derivative of x²?", "2x"),
      ("What is the integral of 2x dx?", "x² + C"),
      ("What does a derivative measure?", "The instantaneous rate of change of a function."),
      ("State the chain rule.", "d/dx f(g(x)) = f'(g(x)) · g'(x)"),
      ("What is the limit definition of the derivative?", "f'(x) = lim h→0 (f(x+h) - f(x)) / h"),
    ],
  },
  FallbackDeck {
    key: "algebra",
    cards: &[
      ("What is the quadratic formula?", "x = (-b ± √(b² - 4ac)) / 2a"),
      ("Factor x² - 9.", "(x - 3)(x + 3)"),
      ("What does the discriminant tell you?", "How many real roots a quadratic has."),
      ("Solve 2x + 6 = 0.", "x = -3"),
      ("What is a polynomial's degree?", "The highest exponent of its variable."),
    ],
  },
  FallbackDeck {
    key: "physics",
    cards: &[
      ("State Newton's second law.", "F = ma"),
      ("What is the SI unit of force?", "The newton (N)"),
      ("What is kinetic energy?", "KE = ½mv²"),
      ("What does acceleration measure?", "The rate of change of velocity."),
      ("State the law of conservation of energy.", "Energy can change form but is never created or destroyed."),
    ],
  },
  FallbackDeck {
    key: "chemistry",
    cards: &[
      ("What is an ion?", "An atom or molecule with a net electric charge."),
      ("What is Avogadro's number?", "6.022 × 10²³ particles per mole"),
      ("What is the pH of a neutral solution?", "7"),
      ("What holds a covalent bond together?", "Shared electron pairs."),
      ("What is an exothermic reaction?", "A reaction that releases heat."),
    ],
  },
  FallbackDeck {
    key: "biology",
    cards: &[
      ("What is the powerhouse of the cell?", "The mitochondrion"),
      ("What does DNA stand for?", "Deoxyribonucleic acid"),
      ("What is photosynthesis?", "Conversion of light, water and CO₂ into glucose and oxygen."),
      ("What is mitosis?", "Cell division producing two identical daughter cells."),
      ("What carries oxygen in blood?", "Hemoglobin in red blood cells."),
    ],
  },
  FallbackDeck {
    key: "computer science",
    cards: &[
      ("What is a binary search's time complexity?", "O(log n)"),
      ("What does CPU stand for?", "Central Processing Unit"),
      ("What is recursion?", "A function that calls itself on a smaller input."),
      ("What is a hash table's average lookup cost?", "O(1)"),
      ("What is a stack's access discipline?", "Last in, first out (LIFO)."),
    ],
  },
];

/// Pick a deck by case-insensitive substring match of the topic.
pub fn lookup_deck(topic_folded: &str) -> Option<&'static FallbackDeck> {
  FALLBACK_DECKS.iter().find(|d| topic_folded.contains(d.key))
}

/// Fixed in-memory quiz bank. Small on purpose: the app is useful for
/// self-testing even with no model and no persistence.
pub fn quiz_bank() -> Vec<QuizQuestion> {
  vec![
    QuizQuestion {
      id: "calc-1".into(),
      topic: "calculus".into(),
      question: "What is the derivative of x²?".into(),
      answer: "2x".into(),
      explanation: "By the power rule, d/dx(x²) = 2x.".into(),
    },
    QuizQuestion {
      id: "calc-2".into(),
      topic: "calculus".into(),
      question: "What is the integral of 2x dx?".into(),
      answer: "x^2 + c".into(),
      explanation: "Integration reverses the power rule; remember the constant.".into(),
    },
    QuizQuestion {
      id: "alg-1".into(),
      topic: "algebra".into(),
      question: "Solve x² - 4 = 0. Give the positive root.".into(),
      answer: "2".into(),
      explanation: "x² = 4, so x = ±2; the positive root is 2.".into(),
    },
    QuizQuestion {
      id: "phys-1".into(),
      topic: "physics".into(),
      question: "In F = ma, what does m stand for?".into(),
      answer: "mass".into(),
      explanation: "Newton's second law relates force, mass and acceleration.".into(),
    },
    QuizQuestion {
      id: "bio-1".into(),
      topic: "biology".into(),
      question: "Which organelle produces most of a cell's ATP?".into(),
      answer: "mitochondrion".into(),
      explanation: "Mitochondria run cellular respiration, the main ATP source.".into(),
    },
  ]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn identity_keyword_outranks_bare_derivative() {
    let hit = lookup_trigger("what is the derivative of x^2?").expect("hit");
    assert_eq!(hit.answer, "The derivative of x² is 2x.");
  }

  #[test]
  fn bare_derivative_still_matches() {
    let hit = lookup_trigger("explain what a derivative is").expect("hit");
    assert!(hit.answer.contains("rate of change"));
  }

  #[test]
  fn solve_and_quadratic_share_an_entry() {
    let a = lookup_trigger("solve this equation").expect("hit");
    let b = lookup_trigger("quadratic equations confuse me").expect("hit");
    assert_eq!(a.answer, b.answer);
  }

  #[test]
  fn deck_lookup_is_substring_based() {
    assert!(lookup_deck("advanced calculus ii").is_some());
    assert!(lookup_deck("underwater basket weaving").is_none());
  }
}
