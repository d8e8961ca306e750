//! Store Contracts and Reference Implementations
//!
//! The core consumes two narrow collaborator interfaces: a read-only
//! [`QuestionStore`] and a keyed read/write [`HistoryStore`]. The core
//! is agnostic to the backing medium; any serialization that preserves
//! the [`LearningState`] fields is conformant.
//!
//! Reference implementations:
//! - [`MemoryHistoryStore`] / [`MemoryQuestionBank`] for embedding and tests
//! - [`JsonHistoryStore`] for a single-document-per-learner JSON file

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::question::{Question, QuestionFilter};
use crate::types::LearningState;

// ==================== Errors ====================

/// Store-level error taxonomy.
///
/// These propagate to the caller unmodified; per-record malformation is
/// recovered locally and never surfaces as an error.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("history store unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("lock poisoned: {0}")]
    Lock(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

// ==================== Contracts ====================

/// Keyed record store for per-question learning state.
pub trait HistoryStore {
    /// Stored state for a question id, or `None` when absent. A record
    /// that fails to parse is reported as absent, not as an error.
    fn read(&self, question_id: &str) -> StoreResult<Option<LearningState>>;

    /// Persist the state for a question id before returning.
    fn write(&mut self, question_id: &str, state: &LearningState) -> StoreResult<()>;
}

/// Read-only source of question pools.
pub trait QuestionStore {
    fn list_questions(&self, filter: &QuestionFilter) -> StoreResult<Vec<Question>>;
}

// ==================== In-Memory Stores ====================

/// In-memory history store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    records: HashMap<String, LearningState>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn read(&self, question_id: &str) -> StoreResult<Option<LearningState>> {
        Ok(self.records.get(question_id).cloned())
    }

    fn write(&mut self, question_id: &str, state: &LearningState) -> StoreResult<()> {
        self.records.insert(question_id.to_string(), state.clone());
        Ok(())
    }
}

/// In-memory question bank.
#[derive(Debug, Default)]
pub struct MemoryQuestionBank {
    questions: Vec<Question>,
}

impl MemoryQuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }
}

impl QuestionStore for MemoryQuestionBank {
    fn list_questions(&self, filter: &QuestionFilter) -> StoreResult<Vec<Question>> {
        Ok(self
            .questions
            .iter()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect())
    }
}

// ==================== JSON File Store ====================

/// On-disk layout: one JSON document per learner,
/// `{"history": {"<question id>": {<LearningState fields>}}}`.
///
/// Records are kept as raw JSON values so a malformed neighbour survives
/// rewrites untouched until it is next written through.
#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryDocument {
    #[serde(default)]
    history: BTreeMap<String, serde_json::Value>,
}

/// History store persisting the whole learner document on every write.
pub struct JsonHistoryStore {
    path: PathBuf,
    doc: HistoryDocument,
}

impl JsonHistoryStore {
    /// Open or create the document at `path`. A missing file starts an
    /// empty history; an unreadable or syntactically corrupt file is a
    /// store-level failure for the caller to handle.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let doc = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HistoryDocument::default(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, doc })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Whole-document write via temp file + rename, so a crash mid-write
    // leaves the previous document intact.
    fn persist(&self) -> StoreResult<()> {
        let tmp = self.path.with_extension("json.tmp");
        let text = serde_json::to_string_pretty(&self.doc)?;
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl HistoryStore for JsonHistoryStore {
    fn read(&self, question_id: &str) -> StoreResult<Option<LearningState>> {
        let Some(value) = self.doc.history.get(question_id) else {
            return Ok(None);
        };
        match serde_json::from_value::<LearningState>(value.clone()) {
            Ok(state) => Ok(Some(state)),
            Err(err) => {
                tracing::warn!(
                    question_id,
                    %err,
                    "malformed history record, treating as never attempted"
                );
                Ok(None)
            }
        }
    }

    fn write(&mut self, question_id: &str, state: &LearningState) -> StoreResult<()> {
        self.doc
            .history
            .insert(question_id.to_string(), serde_json::to_value(state)?);
        self.persist()
    }
}

// ==================== Tests ====================
