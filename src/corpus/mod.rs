//! Corpus model: the typed, read-only representation of the corpus document.
//!
//! A corpus is loaded once, validated, and never mutated afterwards. Loading
//! either produces a complete [`Corpus`] or a [`CorpusError`]; there is no
//! partially loaded state.

pub mod model;

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CorpusError;

pub use model::{Chapter, Character, CharacterRelationship, Event, Problem, Reference, Verse};

/// Result type for corpus operations.
pub type CorpusResult<T> = std::result::Result<T, CorpusError>;

/// Wire layout of the corpus document. Both top-level fields are required.
#[derive(Deserialize)]
struct CorpusDocument {
    problem_solutions_map: BTreeMap<String, Problem>,
    chapters: Vec<Chapter>,
}

/// The loaded corpus: chapters in document order plus the problem map.
///
/// Problems iterate in key order, which keeps graph construction deterministic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Corpus {
    problem_solutions_map: BTreeMap<String, Problem>,
    chapters: Vec<Chapter>,
}

impl Corpus {
    /// Load a corpus from a JSON file.
    pub fn load(path: &Path) -> CorpusResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CorpusError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let corpus = Self::from_json_str(&content)?;
        tracing::info!(
            path = %path.display(),
            chapters = corpus.chapters.len(),
            problems = corpus.problem_solutions_map.len(),
            "loaded corpus"
        );
        Ok(corpus)
    }

    /// Parse a corpus from a JSON string.
    pub fn from_json_str(json: &str) -> CorpusResult<Self> {
        let doc: CorpusDocument =
            serde_json::from_str(json).map_err(|e| CorpusError::DataLoad {
                message: e.to_string(),
            })?;
        Self::from_parts(doc.problem_solutions_map, doc.chapters)
    }

    /// Assemble a corpus from already-typed records.
    ///
    /// Fills in the derived keys (problem ids, verse chapter numbers) and
    /// rejects duplicate chapter or verse numbers.
    pub fn from_parts(
        problems: BTreeMap<String, Problem>,
        chapters: Vec<Chapter>,
    ) -> CorpusResult<Self> {
        let mut problem_solutions_map = problems;
        for (id, problem) in problem_solutions_map.iter_mut() {
            problem.id.clone_from(id);
        }

        let mut chapters = chapters;
        let mut seen_chapters = HashSet::new();
        for chapter in chapters.iter_mut() {
            if !seen_chapters.insert(chapter.number) {
                return Err(CorpusError::DuplicateChapter {
                    number: chapter.number,
                });
            }
            let mut seen_verses = HashSet::new();
            for verse in chapter.verses.iter_mut() {
                if !seen_verses.insert(verse.number) {
                    return Err(CorpusError::DuplicateVerse {
                        chapter: chapter.number,
                        verse: verse.number,
                    });
                }
                verse.chapter = chapter.number;
            }
        }

        Ok(Self {
            problem_solutions_map,
            chapters,
        })
    }

    /// All chapters in document order.
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Look up a chapter by number.
    pub fn chapter(&self, number: u32) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.number == number)
    }

    /// All problems, in key order.
    pub fn problems(&self) -> impl Iterator<Item = &Problem> {
        self.problem_solutions_map.values()
    }

    /// Look up a problem by key.
    pub fn problem(&self, id: &str) -> Option<&Problem> {
        self.problem_solutions_map.get(id)
    }

    /// Number of problems in the map.
    pub fn problem_count(&self) -> usize {
        self.problem_solutions_map.len()
    }

    /// Total number of verses across all chapters.
    pub fn verse_count(&self) -> usize {
        self.chapters.iter().map(|c| c.verses.len()).sum()
    }
}
