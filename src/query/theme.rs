//! Theme and keyword matching.
//!
//! Chapter matching and verse matching use different rules:
//!
//! - a chapter matches when the theme is a case-sensitive substring of its
//!   `main_theme`, or equals one of its `philosophical_aspects` exactly;
//! - a verse matches when any of its keywords, lowercased, is a substring of
//!   the lowercased theme. The containment runs keyword-inside-theme, so the
//!   keyword `peace` matches the theme `inner peace and tranquility`.
//!
//! Both rules are kept as they are; changing either one changes which
//! chapters and verses a theme selects.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::corpus::{Chapter, Corpus, Problem, Verse};
use crate::graph::build::{chapter_node, shloka_node};
use crate::graph::{Edge, Node, NodeId, NodeKind, Subgraph, SubgraphBuilder};

/// Chapters whose `main_theme` contains `theme` or whose aspects include it.
pub fn chapters_by_theme<'c>(corpus: &'c Corpus, theme: &str) -> Vec<&'c Chapter> {
    corpus
        .chapters()
        .iter()
        .filter(|chapter| chapter_matches(chapter, theme))
        .collect()
}

fn chapter_matches(chapter: &Chapter, theme: &str) -> bool {
    chapter.main_theme.contains(theme) || chapter.philosophical_aspects.iter().any(|a| a == theme)
}

/// Verses of `chapter` with a keyword contained in `theme`, case-insensitively.
pub fn verses_by_theme<'c>(chapter: &'c Chapter, theme: &str) -> Vec<&'c Verse> {
    let theme = theme.to_lowercase();
    chapter
        .verses
        .iter()
        .filter(|verse| verse_matches(verse, &theme))
        .collect()
}

fn verse_matches(verse: &Verse, lowered_theme: &str) -> bool {
    verse
        .keywords
        .iter()
        .any(|kw| lowered_theme.contains(&kw.to_lowercase()))
}

/// Aspects of `chapter` that contain `theme` as a substring.
pub fn matching_aspects<'c>(chapter: &'c Chapter, theme: &str) -> Vec<&'c str> {
    chapter
        .philosophical_aspects
        .iter()
        .filter(|a| a.contains(theme))
        .map(String::as_str)
        .collect()
}

/// Problems whose description mentions `theme`, case-insensitively.
pub fn problems_by_theme<'c>(corpus: &'c Corpus, theme: &str) -> Vec<&'c Problem> {
    let theme = theme.to_lowercase();
    corpus
        .problems()
        .filter(|p| p.description.to_lowercase().contains(&theme))
        .collect()
}

/// Number of verses a theme selects across all of its matching chapters.
pub fn aggregate_verse_count(corpus: &Corpus, theme: &str) -> usize {
    chapters_by_theme(corpus, theme)
        .into_iter()
        .map(|chapter| verses_by_theme(chapter, theme).len())
        .sum()
}

/// Every distinct theme in the corpus: all `main_theme` values and all
/// `philosophical_aspects` entries, deduplicated by exact equality. Empty
/// strings are not themes.
pub fn corpus_themes(corpus: &Corpus) -> BTreeSet<&str> {
    let mut themes = BTreeSet::new();
    for chapter in corpus.chapters() {
        themes.insert(chapter.main_theme.as_str());
        themes.extend(chapter.philosophical_aspects.iter().map(String::as_str));
    }
    themes.remove("");
    themes
}

/// A theme with its aggregate verse count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeCount {
    pub theme: String,
    pub verse_count: usize,
}

/// Theme → aggregate verse count, computed once per corpus.
#[derive(Debug, Clone, Default)]
pub struct ThemeIndex {
    counts: BTreeMap<String, usize>,
}

impl ThemeIndex {
    pub fn build(corpus: &Corpus) -> Self {
        let counts: BTreeMap<String, usize> = corpus_themes(corpus)
            .into_iter()
            .map(|theme| (theme.to_string(), aggregate_verse_count(corpus, theme)))
            .collect();
        tracing::debug!(themes = counts.len(), "built theme index");
        Self { counts }
    }

    /// Aggregate verse count for a known theme.
    pub fn count(&self, theme: &str) -> Option<usize> {
        self.counts.get(theme).copied()
    }

    pub fn contains(&self, theme: &str) -> bool {
        self.counts.contains_key(theme)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// All themes, most verses first; ties in theme order.
    pub fn catalogue(&self) -> Vec<ThemeCount> {
        let mut out: Vec<ThemeCount> = self
            .counts
            .iter()
            .map(|(theme, &verse_count)| ThemeCount {
                theme: theme.clone(),
                verse_count,
            })
            .collect();
        // Stable sort keeps the BTreeMap's theme order among equal counts.
        out.sort_by(|a, b| b.verse_count.cmp(&a.verse_count));
        out
    }
}

/// Relationship graph for one theme.
///
/// The theme node links to every matching chapter (`contains`). Each verse the
/// theme selects links to its chapter (`contains`) and to the theme
/// (`references`).
pub fn theme_graph(corpus: &Corpus, theme: &str) -> Subgraph {
    let theme_id = NodeId::theme(theme);
    let mut out = SubgraphBuilder::new();
    out.add_node(Node::new(
        theme_id.clone(),
        NodeKind::Theme {
            name: theme.to_string(),
        },
    ));

    for chapter in chapters_by_theme(corpus, theme) {
        let chapter_id = NodeId::chapter(chapter.number);
        out.add_node(chapter_node(chapter));
        out.add_edge(Edge::new(theme_id.clone(), chapter_id.clone()).with_label("contains"));

        for verse in verses_by_theme(chapter, theme) {
            let shloka_id = NodeId::shloka(verse.chapter, verse.number);
            out.add_node(shloka_node(verse));
            out.add_edge(Edge::new(chapter_id.clone(), shloka_id.clone()).with_label("contains"));
            out.add_edge(Edge::new(theme_id.clone(), shloka_id).with_label("references"));
        }
    }

    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Corpus {
        Corpus::from_json_str(
            r#"{
                "problem_solutions_map": {
                    "anger": {"description": "Overcoming Anger and resentment"},
                    "grief": {"description": "Coping with loss"}
                },
                "chapters": [
                    {
                        "number": 2,
                        "main_theme": "Knowledge of the Self",
                        "philosophical_aspects": ["Equanimity", "Inner peace"],
                        "shlokas": [
                            {"shloka_number": 56, "keywords": ["Anger", "sage"]},
                            {"shloka_number": 62, "keywords": ["attachment"]},
                            {"shloka_number": 70, "keywords": ["peace"]}
                        ]
                    },
                    {
                        "number": 6,
                        "main_theme": "Meditation and Inner peace",
                        "philosophical_aspects": ["Equanimity"],
                        "shlokas": [{"shloka_number": 7, "keywords": ["peace", "equanimity"]}]
                    },
                    {"number": 9}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn verse_keyword_contained_in_theme() {
        let corpus = corpus();
        let chapter = corpus.chapter(2).unwrap();
        let verses = verses_by_theme(chapter, "overcoming anger and resentment");
        assert_eq!(verses.len(), 1);
        assert_eq!(verses[0].number, 56);
    }

    #[test]
    fn verse_match_direction_is_keyword_inside_theme() {
        let corpus = corpus();
        let chapter = corpus.chapter(2).unwrap();
        // "peace" is inside the theme; the theme is not inside "peace".
        let numbers: Vec<u32> = verses_by_theme(chapter, "Inner PEACE and tranquility")
            .iter()
            .map(|v| v.number)
            .collect();
        assert_eq!(numbers, vec![70]);
        assert!(verses_by_theme(chapter, "pea").is_empty());
    }

    #[test]
    fn chapter_match_is_case_sensitive() {
        let corpus = corpus();
        let numbers = |theme: &str| -> Vec<u32> {
            chapters_by_theme(&corpus, theme)
                .iter()
                .map(|c| c.number)
                .collect()
        };
        // Substring of main_theme.
        assert_eq!(numbers("Meditation"), vec![6]);
        assert!(numbers("meditation").is_empty());
        // Exact aspect entry.
        assert_eq!(numbers("Equanimity"), vec![2, 6]);
        // Partial aspect is not enough, but chapter 6 has it inside main_theme.
        assert_eq!(numbers("Inner"), vec![6]);
        assert_eq!(numbers("Inner peace"), vec![2, 6]);
    }

    #[test]
    fn aggregate_counts_over_matching_chapters() {
        let corpus = corpus();
        assert_eq!(aggregate_verse_count(&corpus, "Inner peace"), 2);
        assert_eq!(aggregate_verse_count(&corpus, "Equanimity"), 1);
        assert_eq!(aggregate_verse_count(&corpus, "Knowledge of the Self"), 0);
    }

    #[test]
    fn themes_are_deduplicated_and_exclude_empty() {
        let corpus = corpus();
        let themes: Vec<&str> = corpus_themes(&corpus).into_iter().collect();
        assert_eq!(
            themes,
            vec![
                "Equanimity",
                "Inner peace",
                "Knowledge of the Self",
                "Meditation and Inner peace"
            ]
        );
    }

    #[test]
    fn catalogue_sorted_by_count_desc() {
        let index = ThemeIndex::build(&corpus());
        assert_eq!(index.len(), 4);
        assert_eq!(index.count("Inner peace"), Some(2));
        assert_eq!(index.count("unknown"), None);

        let catalogue = index.catalogue();
        assert_eq!(catalogue[0].theme, "Inner peace");
        assert_eq!(catalogue[0].verse_count, 2);
        let counts: Vec<usize> = catalogue.iter().map(|t| t.verse_count).collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn aspects_and_problems_by_theme() {
        let corpus = corpus();
        let chapter = corpus.chapter(2).unwrap();
        assert_eq!(matching_aspects(chapter, "peace"), vec!["Inner peace"]);

        let problems: Vec<&str> = problems_by_theme(&corpus, "anger")
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(problems, vec!["anger"]);
    }

    #[test]
    fn theme_graph_links_chapters_and_verses() {
        let corpus = corpus();
        let sub = theme_graph(&corpus, "Inner peace");
        let theme = NodeId::theme("Inner peace");

        assert_eq!(sub.nodes[0].id, theme);
        assert!(sub.has_edge(&theme, &NodeId::chapter(2)));
        assert!(sub.has_edge(&theme, &NodeId::chapter(6)));
        assert!(sub.has_edge(&NodeId::chapter(2), &NodeId::shloka(2, 70)));
        assert!(sub.has_edge(&theme, &NodeId::shloka(6, 7)));
        assert_eq!(sub.node_count(), 5);
        assert_eq!(sub.edge_count(), 6);

        let reference = sub
            .edges
            .iter()
            .find(|e| e.connects(&theme, &NodeId::shloka(2, 70)))
            .unwrap();
        assert_eq!(reference.label.as_deref(), Some("references"));
    }

    #[test]
    fn theme_graph_without_matches_is_single_node() {
        let sub = theme_graph(&corpus(), "Bhakti");
        assert_eq!(sub.node_count(), 1);
        assert_eq!(sub.edge_count(), 0);
    }
}
