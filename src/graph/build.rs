//! Deterministic graph construction from a corpus.
//!
//! Construction runs in id dependency order:
//!
//! 1. problems, with edges to the chapter and shloka of every reference
//!    (these endpoints are usually not materialized yet);
//! 2. chapters;
//! 3. shlokas, each with an edge to its chapter.
//!
//! Edges are keyed by id, so the forward references from step 1 resolve as
//! soon as steps 2 and 3 materialize the targets. A reference to a chapter or
//! shloka missing from the corpus leaves a dangling endpoint, which is a data
//! quality issue rather than a build failure.

use crate::corpus::{Chapter, Corpus, Problem, Verse};

use super::index::KnowledgeGraph;
use super::{Node, NodeId, NodeKind};

/// Build the knowledge graph for `corpus`.
///
/// Building twice from the same corpus yields equal node sets, edge sets and
/// attributes.
pub fn build(corpus: &Corpus) -> KnowledgeGraph {
    let mut kg = KnowledgeGraph::new();

    for problem in corpus.problems() {
        add_problem(&mut kg, problem);
    }

    for chapter in corpus.chapters() {
        kg.insert_node(chapter_node(chapter));
        let chapter_id = NodeId::chapter(chapter.number);
        for verse in &chapter.verses {
            kg.insert_node(shloka_node(verse));
            kg.insert_edge(&chapter_id, &NodeId::shloka(chapter.number, verse.number), None);
        }
    }

    let dangling = kg.dangling_ids();
    for id in &dangling {
        tracing::debug!(node = %id, "problem reference has no matching node");
    }
    tracing::info!(
        nodes = kg.node_count(),
        edges = kg.edge_count(),
        dangling = dangling.len(),
        "built knowledge graph"
    );

    kg
}

fn add_problem(kg: &mut KnowledgeGraph, problem: &Problem) {
    let problem_id = NodeId::problem(&problem.id);
    kg.insert_node(Node::new(
        problem_id.clone(),
        NodeKind::Problem {
            name: problem.id.clone(),
            description: problem.description.clone(),
        },
    ));

    for reference in &problem.references {
        kg.insert_edge(&problem_id, &NodeId::chapter(reference.chapter), None);
        kg.insert_edge(
            &problem_id,
            &NodeId::shloka(reference.chapter, reference.verse),
            None,
        );
        kg.index_reference(*reference, &problem.id);
    }
}

pub(crate) fn chapter_node(chapter: &Chapter) -> Node {
    Node::new(
        NodeId::chapter(chapter.number),
        NodeKind::Chapter {
            number: chapter.number,
            name: chapter.name.clone(),
            summary: chapter.summary.clone(),
            main_theme: chapter.main_theme.clone(),
        },
    )
}

pub(crate) fn shloka_node(verse: &Verse) -> Node {
    Node::new(
        NodeId::shloka(verse.chapter, verse.number),
        NodeKind::Shloka {
            chapter: verse.chapter,
            verse: verse.number,
            sanskrit_text: verse.sanskrit_text.clone(),
            meaning: verse.meaning.clone(),
            interpretation: verse.interpretation.clone(),
        },
    )
}
