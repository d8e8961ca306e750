//! Learning History Tracking
//!
//! The entire state machine of the Leitner model lives here: a correct
//! answer moves a question one box up (saturating at [`MAX_BOX`]), a
//! wrong answer drops it back to box 0. There is no terminal "mastered"
//! state; a question parks at the top box until a wrong answer resets it.
//!
//! The tracker is a long-lived handle wrapping the history store. Every
//! answer is written through before `record_answer` returns, so a crash
//! after the call never silently loses the outcome. Read-modify-write
//! happens under one lock, which serializes concurrent updates to the
//! same question id.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::store::{HistoryStore, StoreError, StoreResult};
use crate::types::{LearningState, MAX_BOX};

/// Long-lived learning-state handle over a [`HistoryStore`].
///
/// Cloning shares the underlying store.
pub struct HistoryTracker<S: HistoryStore> {
    store: Arc<Mutex<S>>,
}

impl<S: HistoryStore> Clone for HistoryTracker<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: HistoryStore> HistoryTracker<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Stored learning state for a question, or the default state when
    /// nothing (or nothing usable) is on record.
    ///
    /// Only a store-level failure is an error; a missing or malformed
    /// record is not.
    pub fn get_state(&self, question_id: &str) -> StoreResult<LearningState> {
        let store = self.lock()?;
        let stored = store.read(question_id)?;
        Ok(recover(question_id, stored))
    }

    /// Apply one answer outcome and persist the new state before
    /// returning. Returns the state after the transition.
    ///
    /// If the write fails the store is left unchanged and the error
    /// propagates; there is no partially applied attempt.
    pub fn record_answer(
        &self,
        question_id: &str,
        is_correct: bool,
        now: DateTime<Utc>,
    ) -> StoreResult<LearningState> {
        let mut store = self.lock()?;
        let mut state = recover(question_id, store.read(question_id)?);

        if is_correct {
            state.box_level = (state.box_level + 1).min(MAX_BOX);
            state.correct_count += 1;
        } else {
            state.box_level = 0;
            state.wrong_count += 1;
        }
        state.last_attempt = Some(now);

        store.write(question_id, &state)?;
        Ok(state)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, S>> {
        self.store
            .lock()
            .map_err(|err| StoreError::Lock(err.to_string()))
    }
}

/// Treat a record that violates the storage invariants as never
/// attempted instead of aborting the whole selection.
fn recover(question_id: &str, stored: Option<LearningState>) -> LearningState {
    match stored {
        Some(state) if state.is_well_formed() => state,
        Some(state) => {
            tracing::warn!(
                question_id,
                box_level = state.box_level,
                "malformed history record, treating as never attempted"
            );
            LearningState::default()
        }
        None => LearningState::default(),
    }
}

// ==================== Tests ====================
