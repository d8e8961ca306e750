//! Question Selection
//!
//! Given a candidate pool and a target count, return the questions most
//! in need of practice right now:
//!
//! 1. Gate each question on its box wait time (eligibility).
//! 2. Weight eligible questions: difficulty raises the base slightly,
//!    never-attempted questions get a strong boost, overdue and
//!    weak-performance questions compose multiplicatively on top.
//! 3. Take the top N by weight, ties broken by id.
//! 4. Backfill a short result from the still-cooling-down pool, picked
//!    uniformly at random, so a session is never needlessly short.
//!
//! Selection is read-only over the history snapshot; two calls with the
//! same seed and no intervening answers agree.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::history::HistoryTracker;
use crate::question::Question;
use crate::store::{HistoryStore, StoreResult};
use crate::types::{box_wait, LearningState};

// ==================== Configuration ====================

/// Tunable weighting constants. The defaults are the production values;
/// the selection rules only rely on the direction of each factor, not
/// the exact numbers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Per-point difficulty weight on the base priority
    pub difficulty_weight: f64,
    /// Multiplier for questions never attempted
    pub never_attempted_multiplier: f64,
    /// Multiplier once the box wait time has been exceeded
    pub overdue_multiplier: f64,
    /// Multiplier when wrong answers outnumber correct ones
    pub weakness_multiplier: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            difficulty_weight: 0.2,
            never_attempted_multiplier: 3.0,
            overdue_multiplier: 2.0,
            weakness_multiplier: 1.5,
        }
    }
}

// ==================== Eligibility ====================

/// A question is eligible once the wait time for its box has elapsed,
/// or immediately if it has never been attempted.
pub fn is_eligible(state: &LearningState, now: DateTime<Utc>) -> bool {
    match state.last_attempt {
        None => true,
        Some(last) => now - last >= box_wait(state.box_level),
    }
}

// ==================== Scheduler ====================

/// Question selector over a [`HistoryTracker`] snapshot.
pub struct Scheduler {
    config: SchedulerConfig,
    rng: ChaCha8Rng,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Deterministic scheduler for tests and reproducible sessions.
    pub fn with_seed(config: SchedulerConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Select up to `n` questions from `pool`, most in need first.
    ///
    /// Always returns `min(n, pool size)` questions (backfilling from
    /// the cooling-down pool when too few are due). `n <= 0` and an
    /// empty pool both return an empty list. A pool entry without an id
    /// is skipped. Only a store-level failure is an error; it propagates
    /// unmodified rather than silently treating the whole pool as never
    /// attempted.
    pub fn select_questions<S: HistoryStore>(
        &mut self,
        tracker: &HistoryTracker<S>,
        pool: &[Question],
        n: i32,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<Question>> {
        let n = n.max(0) as usize;
        if n == 0 || pool.is_empty() {
            return Ok(Vec::new());
        }

        let mut eligible: Vec<(f64, &Question)> = Vec::new();
        let mut cooling: Vec<&Question> = Vec::new();

        for question in pool {
            if question.id.is_empty() {
                tracing::warn!(topic = %question.topic, "skipping pool entry without an id");
                continue;
            }
            let state = tracker.get_state(&question.id)?;
            if is_eligible(&state, now) {
                eligible.push((self.priority(question, &state, now), question));
            } else {
                cooling.push(question);
            }
        }

        // Highest weight first, ties broken by id so the order is stable.
        eligible.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.1.id.cmp(&b.1.id))
        });

        let mut selected: Vec<Question> = eligible
            .into_iter()
            .take(n)
            .map(|(_, q)| q.clone())
            .collect();

        if selected.len() < n && !cooling.is_empty() {
            let shortfall = n - selected.len();
            cooling.shuffle(&mut self.rng);
            selected.extend(cooling.into_iter().take(shortfall).cloned());
        }

        tracing::debug!(
            requested = n,
            selected = selected.len(),
            pool = pool.len(),
            "question selection complete"
        );
        Ok(selected)
    }

    /// Priority weight for a question. Higher = more in need of
    /// practice. Monotone: a lower box or a longer stretch of neglect
    /// never lowers the weight.
    pub fn priority(
        &self,
        question: &Question,
        state: &LearningState,
        now: DateTime<Utc>,
    ) -> f64 {
        let mut weight = 1.0 + self.config.difficulty_weight * f64::from(question.difficulty);

        let Some(last) = state.last_attempt else {
            return weight * self.config.never_attempted_multiplier;
        };

        if now - last > box_wait(state.box_level) {
            weight *= self.config.overdue_multiplier;
        }
        if state.wrong_count > state.correct_count {
            weight *= self.config.weakness_multiplier;
        }
        weight
    }
}

// ==================== Tests ====================
