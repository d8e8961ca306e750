//! # docquiz-algo - DocQuiz scheduling core
//!
//! Pure Rust implementation of the DocQuiz learning algorithms:
//!
//! - **Leitner scheduling** - box-based spaced repetition with wait gates
//! - **History tracking** - the per-question learning state machine
//! - **Question selection** - weighted priority with random backfill
//! - **Quiz sessions** - explicit session state owned by the caller
//!
//! ## Design goals
//!
//! - **Pure Rust** - no framework dependencies, embeddable anywhere
//! - **Store-agnostic** - history and question pools behind narrow traits
//! - **Deterministic** - seedable randomness, tie-breaking by id
//! - **Fully tested** - unit, property, and integration tests
//!
//! ## Module structure
//!
//! - [`types`] - learning state, box wait table, shared constants
//! - [`question`] - question model, answer grading, pool filtering
//! - [`store`] - store contracts and reference implementations
//! - [`history`] - the state machine behind [`HistoryTracker`]
//! - [`scheduler`] - eligibility, priority, and selection ([`Scheduler`])
//! - [`session`] - the [`QuizSession`] value object
//! - [`stats`] - learner statistics aggregation
//!
//! ## Usage example
//!
//! ```rust
//! use chrono::Utc;
//! use docquiz_algo::{
//!     AnswerInput, AnswerKey, HistoryTracker, MemoryHistoryStore, Question, QuizSession,
//!     Scheduler, SchedulerConfig,
//! };
//!
//! let tracker = HistoryTracker::new(MemoryHistoryStore::new());
//! let pool = vec![
//!     Question::new("q1", "algebra", AnswerKey::TrueFalse { answer: true }),
//!     Question::new("q2", "algebra", AnswerKey::TrueFalse { answer: false }),
//! ];
//!
//! let mut scheduler = Scheduler::with_seed(SchedulerConfig::default(), 7);
//! let now = Utc::now();
//! let selected = scheduler.select_questions(&tracker, &pool, 5, now).unwrap();
//! assert_eq!(selected.len(), 2);
//!
//! let mut session = QuizSession::new(selected);
//! while !session.is_finished() {
//!     let answer = AnswerInput::TrueFalse(true);
//!     session.submit_answer(&tracker, &answer, Utc::now()).unwrap();
//! }
//! let score = session.score();
//! assert_eq!(score.correct + score.wrong, 2);
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod history;
pub mod question;
pub mod scheduler;
pub mod session;
pub mod stats;
pub mod store;
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export the shared types and constants
pub use types::{box_wait, LearningState, BOX_WAIT_SECONDS, MAX_BOX};

/// Re-export the question model
pub use question::{AnswerInput, AnswerKey, Question, QuestionFilter};

/// Re-export the store contracts and reference implementations
pub use store::{
    HistoryStore, JsonHistoryStore, MemoryHistoryStore, MemoryQuestionBank, QuestionStore,
    StoreError, StoreResult,
};

/// Re-export the history tracker
pub use history::HistoryTracker;

/// Re-export the scheduler
pub use scheduler::{is_eligible, Scheduler, SchedulerConfig};

/// Re-export the session types
pub use session::{AnswerOutcome, QuizSession, SessionScore};

/// Re-export the statistics helpers
pub use stats::{learning_stats, tag_breakdown, LearningStats, TagStats};
