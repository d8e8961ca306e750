//! Learner Statistics
//!
//! Aggregates computed from a question pool and its learning history:
//! per-box histogram, due/cooling counts, accuracy, and a per-tag
//! breakdown. Read-only; pool entries without an id are ignored the same
//! way the scheduler ignores them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::history::HistoryTracker;
use crate::question::Question;
use crate::scheduler::is_eligible;
use crate::store::{HistoryStore, StoreResult};
use crate::types::MAX_BOX;

/// Aggregate learning statistics over a question pool.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningStats {
    pub total_questions: usize,
    pub never_attempted: usize,
    /// Question count per box level, index = box
    pub box_counts: [usize; MAX_BOX as usize + 1],
    /// Eligible for selection right now
    pub due_now: usize,
    /// Still inside their box wait time
    pub cooling_down: usize,
    pub total_correct: u64,
    pub total_wrong: u64,
    /// Correct share of all recorded attempts, 0 when none
    pub accuracy_rate: f64,
}

/// Per-tag attempt aggregate.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TagStats {
    pub questions: usize,
    pub correct: u64,
    pub wrong: u64,
}

/// Aggregate statistics for `pool` at time `now`.
pub fn learning_stats<S: HistoryStore>(
    tracker: &HistoryTracker<S>,
    pool: &[Question],
    now: DateTime<Utc>,
) -> StoreResult<LearningStats> {
    let mut stats = LearningStats::default();

    for question in pool {
        if question.id.is_empty() {
            continue;
        }
        let state = tracker.get_state(&question.id)?;

        stats.total_questions += 1;
        stats.box_counts[state.box_level as usize] += 1;
        if state.total_attempts() == 0 {
            stats.never_attempted += 1;
        }
        if is_eligible(&state, now) {
            stats.due_now += 1;
        } else {
            stats.cooling_down += 1;
        }
        stats.total_correct += u64::from(state.correct_count);
        stats.total_wrong += u64::from(state.wrong_count);
    }

    let attempts = stats.total_correct + stats.total_wrong;
    if attempts > 0 {
        stats.accuracy_rate = stats.total_correct as f64 / attempts as f64;
    }
    Ok(stats)
}

/// Attempt aggregates grouped by tag. Questions without tags do not
/// contribute to any bucket.
pub fn tag_breakdown<S: HistoryStore>(
    tracker: &HistoryTracker<S>,
    pool: &[Question],
) -> StoreResult<BTreeMap<String, TagStats>> {
    let mut buckets: BTreeMap<String, TagStats> = BTreeMap::new();

    for question in pool {
        if question.id.is_empty() {
            continue;
        }
        let state = tracker.get_state(&question.id)?;
        for tag in &question.tags {
            let bucket = buckets.entry(tag.clone()).or_default();
            bucket.questions += 1;
            bucket.correct += u64::from(state.correct_count);
            bucket.wrong += u64::from(state.wrong_count);
        }
    }
    Ok(buckets)
}

// ==================== Tests ====================
