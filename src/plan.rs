//! Weekly study-plan generation.
//!
//! Model path first (strict JSON decode, defaults filled in one place),
//! then a deterministic-shape fallback that spreads weak topics across the
//! week with an injectable random source.
//!
//! The minute budget is global across all 7 days (`daily_hours * 60`
//! total), not per day. That looks like a bug at first sight but it is the
//! intended behavior: early days are allowed to exhaust the whole week's
//! budget. Do not "fix" it into a per-day budget.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use tracing::{error, instrument, warn};
use uuid::Uuid;

use crate::config::Prompts;
use crate::domain::{StudyPlan, StudyPlanTask, TimeSlot};
use crate::error::GenError;
use crate::fallback::{ACTIVITIES, DEFAULT_ACTIVITY, DEFAULT_DESCRIPTION};
use crate::model::TextModel;
use crate::util::fill_template;

pub const MIN_DAILY_HOURS: u32 = 2;
const MIN_TASK_MINUTES: u32 = 20;
const MAX_TASK_MINUTES: u32 = 30;
const DAYS: usize = 7;

/// Generate a weekly plan for the user. Fails only on a precondition
/// violation; model and parse failures fall back silently.
#[instrument(level = "info", skip(model, prompts, weak_topics, rng), fields(%user_id, daily_hours, topics = weak_topics.len()))]
pub async fn generate<M: TextModel, R: Rng>(
  model: Option<&M>,
  prompts: &Prompts,
  user_id: &str,
  daily_hours: u32,
  weak_topics: &[String],
  rng: &mut R,
) -> Result<StudyPlan, GenError> {
  if daily_hours < MIN_DAILY_HOURS {
    return Err(GenError::InvalidArgument(format!(
      "dailyHours must be at least {}, got {}",
      MIN_DAILY_HOURS, daily_hours
    )));
  }
  let total_minutes = daily_hours * 60;

  if let Some(m) = model {
    if !weak_topics.is_empty() {
      let user = fill_template(
        &prompts.plan_user_template,
        &[
          ("topics", &weak_topics.join(", ")),
          ("daily_hours", &daily_hours.to_string()),
        ],
      );
      match m.complete(&prompts.plan_system, &user).await {
        Ok(raw) => match parse_plan_tasks(&raw, weak_topics) {
          Ok(tasks) => return Ok(assemble(user_id, daily_hours, weak_topics, tasks)),
          Err(e) => {
            warn!(target: "generate", %user_id, error = %e, "Plan output unparseable; using fallback plan");
          }
        },
        Err(e) => {
          error!(target: "generate", %user_id, error = %e, "Model plan failed; using fallback plan");
        }
      }
    }
  }

  let tasks = fallback_tasks(total_minutes, weak_topics, rng);
  Ok(assemble(user_id, daily_hours, weak_topics, tasks))
}

// --- Model-path decoding ---

#[derive(Deserialize)]
struct RawPlan {
  tasks: Vec<RawTask>,
}

#[derive(Deserialize)]
struct RawTask {
  #[serde(default)] day: Option<u32>,
  #[serde(default, rename = "timeSlot")] time_slot: Option<String>,
  #[serde(default)] duration: Option<u32>,
  #[serde(default)] topic: Option<String>,
  #[serde(default)] activity: Option<String>,
  #[serde(default)] description: Option<String>,
}

/// Strict decode of the model's JSON plan into typed tasks. All default
/// filling for missing fields lives here and nowhere else: day defaults to
/// `index/3 + 1` (capped at 7), time slot to Morning, duration to 30
/// minutes, topic to the first weak topic. Explicit values outside the
/// task invariants (day 1..=7, duration 20..=30) are a wrong shape and
/// reject the whole response, sending the caller to the deterministic
/// fallback.
pub fn parse_plan_tasks(raw: &str, weak_topics: &[String]) -> Result<Vec<StudyPlanTask>, GenError> {
  let plan: RawPlan =
    serde_json::from_str(raw).map_err(|e| GenError::ParseFailure(e.to_string()))?;
  if plan.tasks.is_empty() {
    return Err(GenError::ParseFailure("tasks array is empty".into()));
  }

  let default_topic = weak_topics
    .first()
    .cloned()
    .unwrap_or_else(|| "general review".into());

  let mut tasks = Vec::with_capacity(plan.tasks.len());
  for (i, t) in plan.tasks.into_iter().enumerate() {
    if let Some(d) = t.day {
      if !(1..=DAYS as u32).contains(&d) {
        return Err(GenError::ParseFailure(format!("day out of range: {}", d)));
      }
    }
    if let Some(dur) = t.duration {
      if !(MIN_TASK_MINUTES..=MAX_TASK_MINUTES).contains(&dur) {
        return Err(GenError::ParseFailure(format!("duration out of range: {}", dur)));
      }
    }
    tasks.push(StudyPlanTask {
      id: Uuid::new_v4().to_string(),
      day: t.day.unwrap_or_else(|| (i as u32 / 3 + 1).min(DAYS as u32)),
      time_slot: t
        .time_slot
        .as_deref()
        .and_then(TimeSlot::parse)
        .unwrap_or(TimeSlot::Morning),
      duration_minutes: t.duration.unwrap_or(30),
      topic: match t.topic {
        Some(s) if !s.trim().is_empty() => s,
        _ => default_topic.clone(),
      },
      activity: t.activity.unwrap_or_else(|| DEFAULT_ACTIVITY.into()),
      description: t.description.unwrap_or_else(|| DEFAULT_DESCRIPTION.into()),
      completed: false,
    });
  }
  Ok(tasks)
}

// --- Deterministic fallback ---

/// Spread topics across the week: round-robin by index, then backfill any
/// empty day with the topic assigned least often so far (ties broken by
/// topic-list order).
fn assign_topics(weak_topics: &[String]) -> Vec<Vec<String>> {
  let mut days: Vec<Vec<String>> = vec![Vec::new(); DAYS];
  for (i, t) in weak_topics.iter().enumerate() {
    days[i % DAYS].push(t.clone());
  }
  if weak_topics.is_empty() {
    return days;
  }
  for d in 0..DAYS {
    if days[d].is_empty() {
      let least = weak_topics
        .iter()
        .min_by_key(|t| days.iter().flatten().filter(|x| x == t).count())
        .cloned();
      if let Some(t) = least {
        days[d].push(t);
      }
    }
  }
  days
}

/// Randomized task layout under the global minute budget.
fn fallback_tasks<R: Rng>(
  total_minutes: u32,
  weak_topics: &[String],
  rng: &mut R,
) -> Vec<StudyPlanTask> {
  let day_topics = assign_topics(weak_topics);
  let mut remaining = total_minutes;
  let mut tasks = Vec::new();

  'week: for (d, candidates) in day_topics.iter().enumerate() {
    if candidates.is_empty() {
      continue;
    }
    let mut accum = 0u32;
    while accum < remaining.min(total_minutes) {
      if remaining < MIN_TASK_MINUTES {
        // Global budget spent; the rest of the week stays empty.
        break 'week;
      }
      let duration = rng.gen_range(MIN_TASK_MINUTES..=MAX_TASK_MINUTES.min(remaining));
      let time_slot = *TimeSlot::ALL.choose(rng).unwrap_or(&TimeSlot::Morning);
      let topic = candidates
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| "general review".into());
      let activity = ACTIVITIES.choose(rng).copied().unwrap_or(DEFAULT_ACTIVITY);
      tasks.push(StudyPlanTask {
        id: Uuid::new_v4().to_string(),
        day: d as u32 + 1,
        time_slot,
        duration_minutes: duration,
        topic: topic.clone(),
        activity: activity.to_string(),
        description: format!("{} focused on {}", activity, topic),
        completed: false,
      });
      accum += duration;
      remaining -= duration;
    }
  }

  tasks
}

fn assemble(
  user_id: &str,
  daily_hours: u32,
  weak_topics: &[String],
  tasks: Vec<StudyPlanTask>,
) -> StudyPlan {
  StudyPlan {
    id: Uuid::new_v4().to_string(),
    user_id: user_id.to_string(),
    daily_hours,
    weak_topics: weak_topics.to_vec(),
    tasks,
    created_at: chrono::Utc::now(),
    completed_task_ids: Vec::new(),
    weekly_progress_percent: 0,
  }
}
