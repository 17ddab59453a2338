// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # gita-kg
//!
//! A knowledge graph engine over a chapter/verse annotated scripture corpus:
//! the Bhagavad Gita, its life problems and the verses that address them.
//!
//! ## Architecture
//!
//! - **Corpus** (`corpus`): typed JSON model of problems, chapters and shlokas
//! - **Knowledge graph** (`graph`): petgraph-backed undirected graph with an id index
//! - **Queries** (`query`): theme, problem and character lookups
//! - **Export** (`export`): flat node/edge lists for renderers
//!
//! ## Library usage
//!
//! ```no_run
//! use gita_kg::config::EngineConfig;
//! use gita_kg::engine::Engine;
//! use gita_kg::graph::NodeId;
//!
//! let engine = Engine::new(EngineConfig::with_corpus("bhagavad_gita_complete.json")).unwrap();
//! let around = engine.neighborhood(&NodeId::problem("anger")).unwrap();
//! for node in &around.nodes {
//!     println!("{} ({})", node.label(), node.node_type());
//! }
//! ```

pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod export;
pub mod graph;
pub mod query;
