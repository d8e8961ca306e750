//! Quiz Session State
//!
//! An explicit value object owned by the caller: the selected question
//! list, the cursor, and the running score. The scheduler is called once
//! to produce the list; from then on the session grades submissions,
//! records outcomes through the tracker, and advances.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::history::HistoryTracker;
use crate::question::{AnswerInput, Question};
use crate::store::{HistoryStore, StoreResult};

/// Running score for one session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionScore {
    pub correct: u32,
    pub wrong: u32,
}

/// Result of grading one submission.
#[derive(Clone, Debug, PartialEq)]
pub struct AnswerOutcome {
    pub question_id: String,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

/// One in-progress quiz run over a fixed, ordered question list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuizSession {
    questions: Vec<Question>,
    current_index: usize,
    score: SessionScore,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            current_index: 0,
            score: SessionScore::default(),
        }
    }

    /// The question awaiting an answer, or `None` once the session is
    /// finished.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn is_finished(&self) -> bool {
        self.current_index >= self.questions.len()
    }

    pub fn score(&self) -> SessionScore {
        self.score
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Number of questions already answered.
    pub fn answered(&self) -> usize {
        self.current_index
    }

    /// Grade the submission for the current question, persist the
    /// outcome through the tracker, and advance. Returns `None` when the
    /// session is already finished.
    ///
    /// The session only advances after the outcome is persisted; a store
    /// failure leaves both the session and the history unchanged.
    pub fn submit_answer<S: HistoryStore>(
        &mut self,
        tracker: &HistoryTracker<S>,
        given: &AnswerInput,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<AnswerOutcome>> {
        let Some(question) = self.questions.get(self.current_index) else {
            return Ok(None);
        };

        let is_correct = question.check_answer(given);
        tracker.record_answer(&question.id, is_correct, now)?;

        if is_correct {
            self.score.correct += 1;
        } else {
            self.score.wrong += 1;
        }
        let outcome = AnswerOutcome {
            question_id: question.id.clone(),
            is_correct,
            explanation: question.explanation.clone(),
        };
        self.current_index += 1;
        Ok(Some(outcome))
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::AnswerKey;
    use crate::store::{MemoryHistoryStore, StoreError};
    use crate::types::LearningState;

    fn pool() -> Vec<Question> {
        vec![
            Question::new("q1", "algebra", AnswerKey::TrueFalse { answer: true })
                .with_explanation("It is."),
            Question::new(
                "q2",
                "algebra",
                AnswerKey::MultipleChoice {
                    choices: vec!["1".into(), "2".into()],
                    correct_index: 1,
                },
            ),
        ]
    }

    #[test]
    fn test_session_walkthrough() {
        let tracker = HistoryTracker::new(MemoryHistoryStore::new());
        let mut session = QuizSession::new(pool());
        let now = Utc::now();

        assert_eq!(session.len(), 2);
        assert_eq!(session.current_question().unwrap().id, "q1");

        let outcome = session
            .submit_answer(&tracker, &AnswerInput::TrueFalse(true), now)
            .expect("submit")
            .expect("in progress");
        assert!(outcome.is_correct);
        assert_eq!(outcome.explanation.as_deref(), Some("It is."));

        let outcome = session
            .submit_answer(&tracker, &AnswerInput::Choice(0), now)
            .expect("submit")
            .expect("in progress");
        assert!(!outcome.is_correct);

        assert!(session.is_finished());
        assert_eq!(session.score(), SessionScore { correct: 1, wrong: 1 });
        assert!(session.current_question().is_none());

        // Both outcomes reached the history.
        assert_eq!(tracker.get_state("q1").expect("get").box_level, 1);
        assert_eq!(tracker.get_state("q2").expect("get").wrong_count, 1);
    }

    #[test]
    fn test_submit_after_finish_is_none() {
        let tracker = HistoryTracker::new(MemoryHistoryStore::new());
        let mut session = QuizSession::new(Vec::new());

        let outcome = session
            .submit_answer(&tracker, &AnswerInput::TrueFalse(true), Utc::now())
            .expect("submit");
        assert!(outcome.is_none());
        assert_eq!(session.score(), SessionScore::default());
    }

    #[test]
    fn test_failed_persist_leaves_session_unchanged() {
        struct FailingStore;
        impl crate::store::HistoryStore for FailingStore {
            fn read(&self, _question_id: &str) -> crate::store::StoreResult<Option<LearningState>> {
                Ok(None)
            }
            fn write(
                &mut self,
                _question_id: &str,
                _state: &LearningState,
            ) -> crate::store::StoreResult<()> {
                Err(StoreError::Unavailable("backend offline".into()))
            }
        }

        let tracker = HistoryTracker::new(FailingStore);
        let mut session = QuizSession::new(pool());

        let result = session.submit_answer(&tracker, &AnswerInput::TrueFalse(true), Utc::now());
        assert!(result.is_err());
        assert_eq!(session.answered(), 0);
        assert_eq!(session.score(), SessionScore::default());
    }
}
