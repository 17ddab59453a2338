//! Chapter-scoped character/event graphs and character profiles.
//!
//! These graphs are built fresh for each chapter on request and never merged
//! into the main knowledge graph.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::corpus::{Chapter, CharacterRelationship, Event, Verse};
use crate::graph::build::shloka_node;
use crate::graph::{Edge, Node, NodeId, NodeKind, Subgraph, SubgraphBuilder};

/// Character/event graph of one chapter.
///
/// Every event becomes a node linked to each of its characters and to each
/// shloka it cites. Characters and shlokas shared by several events appear
/// once. A cited shloka missing from the chapter still gets a node, without
/// text.
pub fn character_graph(chapter: &Chapter) -> Subgraph {
    let mut out = SubgraphBuilder::new();

    for event in &chapter.events {
        let event_id = NodeId::event(&event.description);
        out.add_node(Node::new(
            event_id.clone(),
            NodeKind::Event {
                description: event.description.clone(),
            },
        ));

        for name in &event.characters {
            let character_id = NodeId::character(name);
            out.add_node(Node::new(
                character_id.clone(),
                NodeKind::Character { name: name.clone() },
            ));
            out.add_edge(Edge::new(character_id, event_id.clone()));
        }

        for &number in &event.verses {
            out.add_node(chapter_shloka(chapter, number));
            out.add_edge(Edge::new(
                event_id.clone(),
                NodeId::shloka(chapter.number, number),
            ));
        }
    }

    let graph = out.finish();
    tracing::debug!(
        chapter = chapter.number,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built character graph"
    );
    graph
}

fn chapter_shloka(chapter: &Chapter, number: u32) -> Node {
    match chapter.verse(number) {
        Some(verse) => shloka_node(verse),
        None => Node::new(
            NodeId::shloka(chapter.number, number),
            NodeKind::Shloka {
                chapter: chapter.number,
                verse: number,
                sanskrit_text: String::new(),
                meaning: String::new(),
                interpretation: String::new(),
            },
        ),
    }
}

/// Distinct character names featured in the chapter's events, sorted.
pub fn event_characters(chapter: &Chapter) -> Vec<&str> {
    chapter
        .events
        .iter()
        .flat_map(|e| e.characters.iter().map(String::as_str))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// An event a character takes part in, with the verses it cites.
#[derive(Debug, Clone, Serialize)]
pub struct EventAppearance<'c> {
    pub event: &'c Event,
    /// Cited verses that exist in the chapter, in citation order.
    pub verses: Vec<&'c Verse>,
}

/// Everything a chapter says about one character.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterProfile<'c> {
    pub name: String,
    /// Description from the chapter's character list, if listed there.
    pub description: Option<&'c str>,
    pub appearances: Vec<EventAppearance<'c>>,
    /// Relationships whose `from` or `to` contains the name.
    pub relationships: Vec<&'c CharacterRelationship>,
}

impl CharacterProfile<'_> {
    /// Whether the chapter mentions the character anywhere.
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.appearances.is_empty() && self.relationships.is_empty()
    }
}

/// Collect the profile of `name` within `chapter`.
pub fn character_profile<'c>(chapter: &'c Chapter, name: &str) -> CharacterProfile<'c> {
    let appearances = chapter
        .events
        .iter()
        .filter(|event| event.features(name))
        .map(|event| EventAppearance {
            event,
            verses: event
                .verses
                .iter()
                .filter_map(|&n| chapter.verse(n))
                .collect(),
        })
        .collect();

    CharacterProfile {
        name: name.to_string(),
        description: chapter.character(name).map(|c| c.description.as_str()),
        appearances,
        relationships: chapter
            .relationships
            .iter()
            .filter(|rel| rel.involves(name))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Corpus;
    use crate::graph::NodeType;

    fn corpus() -> Corpus {
        Corpus::from_json_str(
            r#"{
                "problem_solutions_map": {},
                "chapters": [{
                    "number": 1,
                    "name": "Arjuna Vishada Yoga",
                    "shlokas": [
                        {"shloka_number": 1, "meaning": "Dhritarashtra asks"},
                        {"shloka_number": 28, "meaning": "Arjuna is overwhelmed"}
                    ],
                    "characters": [
                        {"name": "Arjuna", "description": "The warrior prince"},
                        {"name": "Krishna", "description": "The charioteer"}
                    ],
                    "character_relationships": [
                        {"from": "Krishna", "to": "Arjuna", "description": "Guide and disciple"},
                        {"from": "Sanjaya", "to": "Dhritarashtra", "description": "Narrator and king"}
                    ],
                    "key_events": [
                        {"event": "Arjuna's despair", "characters": ["Arjuna", "Krishna"], "shlokas": [28, 30]},
                        {"event": "The inquiry", "characters": ["Dhritarashtra", "Sanjaya"], "shlokas": [1]},
                        {"event": "Conches sound", "characters": ["Arjuna", "Krishna"], "shlokas": [28]}
                    ]
                }]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn character_graph_structure() {
        let corpus = corpus();
        let sub = character_graph(corpus.chapter(1).unwrap());

        let count = |t: NodeType| sub.nodes.iter().filter(|n| n.node_type() == t).count();
        assert_eq!(count(NodeType::Event), 3);
        assert_eq!(count(NodeType::Character), 4);
        assert_eq!(count(NodeType::Shloka), 3);

        let despair = NodeId::event("Arjuna's despair");
        assert!(sub.has_edge(&NodeId::character("Arjuna"), &despair));
        assert!(sub.has_edge(&despair, &NodeId::shloka(1, 28)));
        assert!(sub.has_edge(&despair, &NodeId::shloka(1, 30)));
        // Shloka 28 is shared by two events but appears once.
        assert!(sub.has_edge(&NodeId::event("Conches sound"), &NodeId::shloka(1, 28)));
        // 4 + 3 + 3 edges across the three events.
        assert_eq!(sub.edge_count(), 10);
    }

    #[test]
    fn cited_shloka_carries_text_when_present() {
        let corpus = corpus();
        let sub = character_graph(corpus.chapter(1).unwrap());
        let node = sub.node(&NodeId::shloka(1, 28)).unwrap();
        assert!(matches!(&node.kind, NodeKind::Shloka { meaning, .. } if meaning == "Arjuna is overwhelmed"));
        let missing = sub.node(&NodeId::shloka(1, 30)).unwrap();
        assert!(matches!(&missing.kind, NodeKind::Shloka { meaning, .. } if meaning.is_empty()));
    }

    #[test]
    fn chapter_without_events_yields_empty_graph() {
        let corpus = Corpus::from_json_str(
            r#"{"problem_solutions_map": {}, "chapters": [{"number": 3}]}"#,
        )
        .unwrap();
        assert!(character_graph(corpus.chapter(3).unwrap()).is_empty());
    }

    #[test]
    fn rebuilt_graph_is_identical() {
        let corpus = corpus();
        let chapter = corpus.chapter(1).unwrap();
        assert_eq!(character_graph(chapter), character_graph(chapter));
    }

    #[test]
    fn distinct_event_characters() {
        let corpus = corpus();
        assert_eq!(
            event_characters(corpus.chapter(1).unwrap()),
            vec!["Arjuna", "Dhritarashtra", "Krishna", "Sanjaya"]
        );
    }

    #[test]
    fn profile_collects_events_and_relationships() {
        let corpus = corpus();
        let profile = character_profile(corpus.chapter(1).unwrap(), "Arjuna");

        assert_eq!(profile.description, Some("The warrior prince"));
        assert_eq!(profile.appearances.len(), 2);
        let first = &profile.appearances[0];
        assert_eq!(first.event.description, "Arjuna's despair");
        // Shloka 30 is cited but not in the chapter.
        assert_eq!(first.verses.len(), 1);
        assert_eq!(profile.relationships.len(), 1);
        assert_eq!(profile.relationships[0].description, "Guide and disciple");
    }

    #[test]
    fn profile_for_unlisted_character() {
        let corpus = corpus();
        let profile = character_profile(corpus.chapter(1).unwrap(), "Sanjaya");
        assert_eq!(profile.description, None);
        assert_eq!(profile.appearances.len(), 1);
        assert_eq!(profile.relationships.len(), 1);

        assert!(character_profile(corpus.chapter(1).unwrap(), "Bhishma").is_empty());
    }
}
