//! Query engine: read-only operations over a corpus and its knowledge graph.
//!
//! - **Themes** ([`theme`]): chapter/verse matching, theme counts, theme graphs
//! - **Problems** ([`problem`]): problem lookup and reference resolution
//! - **Characters** ([`character`]): chapter-scoped character/event graphs
//!
//! Neighborhood extraction lives with the graph in
//! [`graph::traverse`](crate::graph::traverse).

pub mod character;
pub mod problem;
pub mod theme;
