//! Problem resolution: from a life problem to the verses held up for it, and
//! back from a verse to the problems that cite it.

use serde::Serialize;

use crate::corpus::{Corpus, Problem, Reference, Verse};
use crate::graph::index::KnowledgeGraph;

/// Look up a problem by key.
pub fn solutions_for<'c>(corpus: &'c Corpus, problem_id: &str) -> Option<&'c Problem> {
    corpus.problem(problem_id)
}

/// Resolve `(chapter, verse)` to a loaded verse. Dangling pairs yield `None`.
pub fn resolve_reference(corpus: &Corpus, chapter: u32, verse: u32) -> Option<&Verse> {
    corpus.chapter(chapter)?.verse(verse)
}

/// Problems that reference `(chapter, verse)`, read from the reverse index
/// the graph builder populated.
pub fn problems_for_verse(graph: &KnowledgeGraph, chapter: u32, verse: u32) -> Vec<&str> {
    graph.problems_for_verse(chapter, verse)
}

/// A problem reference paired with the verse it resolves to.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedReference<'c> {
    pub reference: Reference,
    pub verse: &'c Verse,
}

/// The references of `problem` that resolve, in reference order.
///
/// Dangling references are skipped.
pub fn resolved_references<'c>(corpus: &'c Corpus, problem: &Problem) -> Vec<ResolvedReference<'c>> {
    problem
        .references
        .iter()
        .filter_map(|&reference| {
            let verse = resolve_reference(corpus, reference.chapter, reference.verse);
            if verse.is_none() {
                tracing::debug!(
                    problem = %problem.id,
                    reference = %reference,
                    "skipping dangling reference"
                );
            }
            Some(ResolvedReference {
                reference,
                verse: verse?,
            })
        })
        .collect()
}
