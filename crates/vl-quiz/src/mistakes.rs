//! Mistake book: missed questions kept until the learner resolves them.
//!
//! Persisted as a single JSON file. A missing file reads as an empty book so
//! first runs need no setup.

use crate::error::QuizResult;
use crate::pool::Question;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One missed question with bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MistakeEntry {
    pub question: Question,
    /// RFC 3339 timestamp of the first miss.
    pub first_missed_at: String,
    /// How many rounds have missed this question.
    pub times_missed: u32,
}

/// In-memory mistake collection, keyed by question id, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MistakeBook {
    entries: Vec<MistakeEntry>,
}

impl MistakeBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[MistakeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a miss. A repeat miss bumps the counter instead of duplicating
    /// the entry.
    pub fn record(&mut self, question: &Question) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.question.id == question.id) {
            entry.times_missed += 1;
            return;
        }
        self.entries.push(MistakeEntry {
            question: question.clone(),
            first_missed_at: chrono::Utc::now().to_rfc3339(),
            times_missed: 1,
        });
    }

    /// Mark a question as learned. Returns `false` if it was not in the book.
    pub fn resolve(&mut self, question_id: u32) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.question.id != question_id);
        self.entries.len() < before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// File-backed persistence for the mistake book.
#[derive(Debug, Clone)]
pub struct MistakeStore {
    path: PathBuf,
}

impl MistakeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the book; a missing file is an empty book.
    pub fn load(&self) -> QuizResult<MistakeBook> {
        if !self.path.exists() {
            return Ok(MistakeBook::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the book, creating parent directories as needed.
    pub fn save(&self, book: &MistakeBook) -> QuizResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(book)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
