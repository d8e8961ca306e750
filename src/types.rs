//! Common Types and Constants
//!
//! Shared data structures used across the scheduling and history modules.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Highest Leitner box level
pub const MAX_BOX: u8 = 5;

/// Minimum wait per box level before a question is due again, in seconds
///
/// Indexed by box level: show again immediately, then 10 minutes,
/// 1 day, 3 days, 7 days, 21 days.
pub const BOX_WAIT_SECONDS: [i64; MAX_BOX as usize + 1] =
    [0, 600, 86_400, 259_200, 604_800, 1_814_400];

/// Wait duration for a box level. Levels above [`MAX_BOX`] saturate to
/// the last entry.
pub fn box_wait(box_level: u8) -> Duration {
    let idx = (box_level as usize).min(MAX_BOX as usize);
    Duration::seconds(BOX_WAIT_SECONDS[idx])
}

// ==================== Learning State ====================

/// Per-question learning state: Leitner box plus cumulative counters.
///
/// Created lazily on the first recorded answer; the absent state is
/// equivalent to [`LearningState::default`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningState {
    /// Current Leitner box, `0..=MAX_BOX`
    pub box_level: u8,
    /// Time of the most recent answer; `None` until the first attempt
    pub last_attempt: Option<DateTime<Utc>>,
    /// Cumulative correct answers
    pub correct_count: u32,
    /// Cumulative wrong answers
    pub wrong_count: u32,
}

impl LearningState {
    pub fn total_attempts(&self) -> u32 {
        self.correct_count + self.wrong_count
    }

    /// Storage invariants: box within range, timestamp present exactly
    /// when at least one attempt has been recorded.
    pub fn is_well_formed(&self) -> bool {
        self.box_level <= MAX_BOX && self.last_attempt.is_some() == (self.total_attempts() > 0)
    }
}

// ==================== Tests ====================
