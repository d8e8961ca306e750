//! Question Model and Answer Grading
//!
//! Questions are read-only to the scheduling core; the learning state
//! keyed by `Question::id` is the only mutable entity the core owns.
//! Grading compares a submitted answer against the stored key:
//! multiple choice by index, true/false by value, numeric input within
//! an absolute tolerance.

use serde::{Deserialize, Serialize};

fn default_difficulty() -> u8 {
    2
}

// ==================== Question ====================

/// A single quiz question.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Stable unique identifier, the join key into the learning history
    pub id: String,
    /// Subject the question belongs to
    pub topic: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Small positive weight on selection priority, default 2
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    #[serde(default)]
    pub prompt: String,
    pub answer: AnswerKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Expected answer for a question, by question type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AnswerKey {
    #[serde(rename = "mc")]
    MultipleChoice {
        choices: Vec<String>,
        correct_index: usize,
    },
    #[serde(rename = "tf")]
    TrueFalse { answer: bool },
    #[serde(rename = "input")]
    NumericInput {
        answer: f64,
        #[serde(default)]
        tolerance: f64,
    },
}

/// A learner's submitted answer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AnswerInput {
    Choice(usize),
    TrueFalse(bool),
    Numeric(f64),
}

impl Question {
    pub fn new(id: impl Into<String>, topic: impl Into<String>, answer: AnswerKey) -> Self {
        Self {
            id: id.into(),
            topic: topic.into(),
            tags: Vec::new(),
            difficulty: default_difficulty(),
            prompt: String::new(),
            answer,
            explanation: None,
        }
    }

    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Grade a submission against this question's answer key.
    ///
    /// A submission whose shape does not match the question type is
    /// simply wrong, not an error.
    pub fn check_answer(&self, given: &AnswerInput) -> bool {
        match (&self.answer, given) {
            (AnswerKey::MultipleChoice { correct_index, .. }, AnswerInput::Choice(idx)) => {
                idx == correct_index
            }
            (AnswerKey::TrueFalse { answer }, AnswerInput::TrueFalse(value)) => value == answer,
            (AnswerKey::NumericInput { answer, tolerance }, AnswerInput::Numeric(value)) => {
                (value - answer).abs() <= *tolerance
            }
            _ => false,
        }
    }
}

// ==================== Pool Filtering ====================

/// Topic/tag filter applied to a question pool upstream of selection.
///
/// Empty lists match everything.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct QuestionFilter {
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl QuestionFilter {
    pub fn by_topic(topic: impl Into<String>) -> Self {
        Self {
            topics: vec![topic.into()],
            tags: Vec::new(),
        }
    }

    pub fn matches(&self, question: &Question) -> bool {
        let topic_ok = self.topics.is_empty() || self.topics.contains(&question.topic);
        let tag_ok =
            self.tags.is_empty() || question.tags.iter().any(|tag| self.tags.contains(tag));
        topic_ok && tag_ok
    }
}

// ==================== Tests ====================
