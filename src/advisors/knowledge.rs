//! Strategy-note lookup.
//!
//! The strategy advisor asks a [`KnowledgeSource`] for free-text context.
//! Lookups are optional: [`NoKnowledge`] answers with nothing, and a failing
//! source is logged and ignored by the caller.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How many notes a lookup returns.
pub const MAX_NOTES: usize = 3;

/// What the advisor is looking for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnowledgeQuery {
    /// Free text (hand, board, situation keywords).
    pub text: String,
    /// Hero seat name.
    pub position: Option<String>,
    /// Hero stack.
    pub stack: Option<f64>,
    /// Current pot.
    pub pot: Option<f64>,
}

impl KnowledgeQuery {
    /// Query with free text only.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Full query string including the optional parts.
    pub fn full_text(&self) -> String {
        let mut parts = vec![self.text.clone()];
        if let Some(position) = &self.position {
            parts.push(format!("position {}", position));
        }
        if let Some(stack) = self.stack {
            parts.push(format!("stacks {}", stack));
        }
        if let Some(pot) = self.pot {
            parts.push(format!("pot odds {}", pot));
        }
        parts.join(" ")
    }
}

/// Failure looking up or loading strategy notes.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    /// Notes file could not be read.
    #[error("failed to read notes {}: {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// Notes file is not valid JSON.
    #[error("failed to parse notes: {0}")]
    Parse(#[from] serde_json::Error),
    /// The source exists but cannot answer.
    #[error("knowledge source unavailable: {0}")]
    Unavailable(String),
}

/// Anything that can answer a strategy query with text.
pub trait KnowledgeSource: Send + Sync {
    /// Context for `query`; empty when nothing matches.
    fn context_for(&self, query: &KnowledgeQuery) -> Result<String, KnowledgeError>;
}

/// A source that knows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoKnowledge;

impl KnowledgeSource for NoKnowledge {
    fn context_for(&self, _query: &KnowledgeQuery) -> Result<String, KnowledgeError> {
        Ok(String::new())
    }
}

/// One strategy note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyNote {
    /// Heading.
    pub title: String,
    /// Keywords, matched with double weight.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Body.
    pub text: String,
}

/// Notes loaded from a JSON array, searched by keyword overlap.
#[derive(Debug, Clone, Default)]
pub struct NotesLibrary {
    notes: Vec<StrategyNote>,
}

impl NotesLibrary {
    /// Library over the given notes.
    pub fn from_notes(notes: Vec<StrategyNote>) -> Self {
        Self { notes }
    }

    /// Load a JSON array of notes.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, KnowledgeError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| KnowledgeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let library = Self::from_json_str(&content)?;
        log::info!("loaded {} strategy notes from {}", library.len(), path.display());
        Ok(library)
    }

    /// Parse a JSON array of notes.
    pub fn from_json_str(json: &str) -> Result<Self, KnowledgeError> {
        Ok(Self::from_notes(serde_json::from_str(json)?))
    }

    /// Number of notes.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// No notes loaded.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Best `limit` notes for the query, highest score first.
    ///
    /// A tag hit scores 2, a word shared with the title or body scores 1.
    /// Notes scoring 0 are dropped; ties keep file order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&StrategyNote> {
        let wanted = words(query);
        if wanted.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, &StrategyNote)> = self
            .notes
            .iter()
            .filter_map(|note| {
                let tags: FxHashSet<String> =
                    note.tags.iter().map(|t| t.to_lowercase()).collect();
                let mut body = words(&note.title);
                body.extend(words(&note.text));
                let score = wanted
                    .iter()
                    .map(|w| 2 * tags.contains(w) as usize + body.contains(w) as usize)
                    .sum::<usize>();
                (score > 0).then_some((score, note))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().take(limit).map(|(_, note)| note).collect()
    }
}

impl KnowledgeSource for NotesLibrary {
    fn context_for(&self, query: &KnowledgeQuery) -> Result<String, KnowledgeError> {
        let hits = self.search(&query.full_text(), MAX_NOTES);
        if hits.is_empty() {
            return Ok(String::new());
        }
        let mut parts = vec!["=== Relevant Strategic Insights ===".to_string()];
        for note in hits {
            parts.push(format!("{}:", note.title));
            parts.push(note.text.clone());
        }
        Ok(parts.join("\n"))
    }
}

/// Lower-cased alphanumeric words of two or more characters.
fn words(text: &str) -> FxHashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() >= 2)
        .map(|w| w.to_lowercase())
        .collect()
}
