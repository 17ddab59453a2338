//! Engine facade: the context handle for the gita-kg system.
//!
//! The host application constructs one `Engine` per process, then passes it
//! (by reference) to every query. The engine owns the corpus, the knowledge
//! graph and the derived indices; none of them change after construction.

use crate::config::EngineConfig;
use crate::corpus::{Chapter, Corpus, Problem, Verse};
use crate::error::{GitaResult, QueryError};
use crate::graph::build::build;
use crate::graph::index::KnowledgeGraph;
use crate::graph::traverse;
use crate::graph::{NodeId, Subgraph};
use crate::query::character::{self, CharacterProfile};
use crate::query::problem::{self, ResolvedReference};
use crate::query::theme::{self, ThemeCount, ThemeIndex};

/// The gita-kg knowledge graph engine.
pub struct Engine {
    config: EngineConfig,
    corpus: Corpus,
    graph: KnowledgeGraph,
    themes: ThemeIndex,
}

impl Engine {
    /// Load the configured corpus and build the engine.
    pub fn new(config: EngineConfig) -> GitaResult<Self> {
        let corpus = Corpus::load(config.corpus_path()?)?;
        Ok(Self::from_corpus(corpus, config))
    }

    /// Build the engine around an already-loaded corpus.
    pub fn from_corpus(corpus: Corpus, config: EngineConfig) -> Self {
        let graph = build(&corpus);
        let themes = ThemeIndex::build(&corpus);

        let dangling = graph.dangling_ids();
        if config.warn_on_dangling && !dangling.is_empty() {
            tracing::warn!(
                count = dangling.len(),
                "corpus has problem references to missing chapters or shlokas"
            );
        }

        Self {
            config,
            corpus,
            graph,
            themes,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn knowledge_graph(&self) -> &KnowledgeGraph {
        &self.graph
    }

    pub fn theme_index(&self) -> &ThemeIndex {
        &self.themes
    }

    // -- graph ------------------------------------------------------------

    /// Radius-1 ego network around `center`.
    pub fn neighborhood(&self, center: &NodeId) -> GitaResult<Subgraph> {
        Ok(traverse::neighborhood(&self.graph, center)?)
    }

    /// Ego network of the given radius around `center`.
    pub fn ego_network(&self, center: &NodeId, radius: usize) -> GitaResult<Subgraph> {
        Ok(traverse::ego_network(&self.graph, center, radius)?)
    }

    // -- problems ---------------------------------------------------------

    pub fn solutions_for(&self, problem_id: &str) -> GitaResult<&Problem> {
        problem::solutions_for(&self.corpus, problem_id).ok_or_else(|| {
            QueryError::ProblemNotFound {
                id: problem_id.to_string(),
            }
            .into()
        })
    }

    pub fn resolve_reference(&self, chapter: u32, verse: u32) -> GitaResult<&Verse> {
        problem::resolve_reference(&self.corpus, chapter, verse)
            .ok_or_else(|| QueryError::VerseNotFound { chapter, verse }.into())
    }

    /// The problem's references that resolve to loaded verses.
    pub fn resolved_references(&self, problem_id: &str) -> GitaResult<Vec<ResolvedReference<'_>>> {
        let p = self.solutions_for(problem_id)?;
        Ok(problem::resolved_references(&self.corpus, p))
    }

    pub fn problems_for_verse(&self, chapter: u32, verse: u32) -> Vec<&str> {
        problem::problems_for_verse(&self.graph, chapter, verse)
    }

    // -- themes -----------------------------------------------------------

    pub fn chapters_by_theme(&self, theme: &str) -> Vec<&Chapter> {
        theme::chapters_by_theme(&self.corpus, theme)
    }

    pub fn themes(&self) -> Vec<ThemeCount> {
        self.themes.catalogue()
    }

    pub fn problems_by_theme(&self, theme: &str) -> Vec<&Problem> {
        theme::problems_by_theme(&self.corpus, theme)
    }

    pub fn theme_graph(&self, theme: &str) -> Subgraph {
        theme::theme_graph(&self.corpus, theme)
    }

    // -- characters -------------------------------------------------------

    pub fn chapter(&self, number: u32) -> GitaResult<&Chapter> {
        self.corpus
            .chapter(number)
            .ok_or_else(|| QueryError::ChapterNotFound { number }.into())
    }

    pub fn character_graph(&self, chapter: u32) -> GitaResult<Subgraph> {
        Ok(character::character_graph(self.chapter(chapter)?))
    }

    pub fn character_profile(&self, chapter: u32, name: &str) -> GitaResult<CharacterProfile<'_>> {
        Ok(character::character_profile(self.chapter(chapter)?, name))
    }

    /// Summary information about the engine state.
    pub fn info(&self) -> EngineInfo {
        EngineInfo {
            chapters: self.corpus.chapters().len(),
            verses: self.corpus.verse_count(),
            problems: self.corpus.problem_count(),
            themes: self.themes.len(),
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
            dangling: self.graph.dangling_ids().len(),
        }
    }
}

/// Summary information about the engine state.
#[derive(Debug, Clone, serde::Serialize)]
pub struct EngineInfo {
    pub chapters: usize,
    pub verses: usize,
    pub problems: usize,
    pub themes: usize,
    pub node_count: usize,
    pub edge_count: usize,
    pub dangling: usize,
}

impl std::fmt::Display for EngineInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "gita-kg engine info")?;
        writeln!(f, "  chapters:   {}", self.chapters)?;
        writeln!(f, "  shlokas:    {}", self.verses)?;
        writeln!(f, "  problems:   {}", self.problems)?;
        writeln!(f, "  themes:     {}", self.themes)?;
        writeln!(f, "  nodes:      {}", self.node_count)?;
        writeln!(f, "  edges:      {}", self.edge_count)?;
        writeln!(f, "  dangling:   {}", self.dangling)?;
        Ok(())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("knowledge_graph", &self.graph)
            .field("themes", &self.themes.len())
            .finish()
    }
}
