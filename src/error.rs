//! Rich diagnostic error types for the gita-kg engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so callers know exactly what went wrong
//! and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the gita-kg engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum GitaError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Corpus errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum CorpusError {
    #[error("failed to read corpus file: {path}")]
    #[diagnostic(
        code(gita::corpus::io),
        help(
            "The corpus file could not be read. Check that the path exists \
             and that you have read permissions."
        )
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed corpus document: {message}")]
    #[diagnostic(
        code(gita::corpus::data_load),
        help(
            "The corpus must be a JSON object with the top-level fields \
             `problem_solutions_map` and `chapters`. Every chapter needs a \
             `number` and every shloka a `shloka_number`."
        )
    )]
    DataLoad { message: String },

    #[error("duplicate chapter number {number} in corpus")]
    #[diagnostic(
        code(gita::corpus::duplicate_chapter),
        help("Chapter numbers must be unique. Remove or renumber the repeated chapter.")
    )]
    DuplicateChapter { number: u32 },

    #[error("duplicate shloka number {verse} in chapter {chapter}")]
    #[diagnostic(
        code(gita::corpus::duplicate_verse),
        help("Shloka numbers must be unique within a chapter.")
    )]
    DuplicateVerse { chapter: u32, verse: u32 },
}

// ---------------------------------------------------------------------------
// Graph errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    #[error("node not found: \"{id}\"")]
    #[diagnostic(
        code(gita::graph::node_not_found),
        help(
            "Node ids have the form `Problem_<id>`, `Chapter_<n>` or \
             `Shloka_<chapter>_<verse>`. List the available nodes with \
             `gita-kg export`."
        )
    )]
    NodeNotFound { id: String },
}

// ---------------------------------------------------------------------------
// Query errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum QueryError {
    #[error("problem not found: \"{id}\"")]
    #[diagnostic(
        code(gita::query::problem_not_found),
        help("Check the key against `problem_solutions_map` in the corpus.")
    )]
    ProblemNotFound { id: String },

    #[error("chapter {number} not found")]
    #[diagnostic(
        code(gita::query::chapter_not_found),
        help("The corpus has no chapter with this number. Run `gita-kg info` to see the loaded chapters.")
    )]
    ChapterNotFound { number: u32 },

    #[error("shloka {chapter}.{verse} not found")]
    #[diagnostic(
        code(gita::query::verse_not_found),
        help(
            "The reference points to a chapter or shloka that is not in the corpus. \
             Dangling references are tolerated by the graph but cannot be resolved."
        )
    )]
    VerseNotFound { chapter: u32, verse: u32 },
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read engine config: {path}")]
    #[diagnostic(
        code(gita::config::read),
        help("Ensure the config file exists and is valid TOML.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse engine config: {path}")]
    #[diagnostic(
        code(gita::config::parse),
        help("Check the TOML syntax in the config file. {message}")
    )]
    Parse { path: String, message: String },

    #[error("failed to write engine config: {path}")]
    #[diagnostic(
        code(gita::config::write),
        help("Ensure you have write permissions to the config directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no corpus path configured")]
    #[diagnostic(
        code(gita::config::no_corpus),
        help("Pass `--corpus <file>` or set `corpus_path` in the config file.")
    )]
    NoCorpus,
}

/// Convenience alias for functions returning gita-kg results.
pub type GitaResult<T> = std::result::Result<T, GitaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_error_converts_to_gita_error() {
        let err = GraphError::NodeNotFound {
            id: "Chapter_99".into(),
        };
        let gita: GitaError = err.into();
        assert!(matches!(gita, GitaError::Graph(GraphError::NodeNotFound { .. })));
    }

    #[test]
    fn error_display_messages_are_descriptive() {
        let err = QueryError::VerseNotFound {
            chapter: 2,
            verse: 99,
        };
        assert_eq!(format!("{err}"), "shloka 2.99 not found");

        let err = CorpusError::DataLoad {
            message: "missing field `chapters`".into(),
        };
        assert!(format!("{err}").contains("missing field `chapters`"));
    }
}
