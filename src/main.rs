//! gita-kg CLI: Bhagavad Gita knowledge graph engine.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use gita_kg::config::EngineConfig;
use gita_kg::engine::Engine;
use gita_kg::export::GraphExport;
use gita_kg::graph::NodeId;
use gita_kg::query::{character, theme};

#[derive(Parser)]
#[command(name = "gita-kg", version, about = "Bhagavad Gita knowledge graph engine")]
struct Cli {
    /// Path to the corpus JSON document.
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show corpus and graph statistics.
    Info,

    /// Print the ego network around a node as JSON.
    Neighborhood {
        /// Node id, e.g. "Problem_anger", "Chapter_2" or "Shloka_2_47".
        id: String,

        /// Hop radius (defaults to the configured radius).
        #[arg(long)]
        radius: Option<usize>,
    },

    /// Show a problem and the verses it references.
    Problem {
        /// Problem key from the corpus.
        id: String,
    },

    /// Show a shloka and the problems that reference it.
    Verse { chapter: u32, verse: u32 },

    /// List all chapter themes with aggregate verse counts.
    Themes,

    /// Explore one theme: chapters, verses and related problems.
    Theme {
        theme: String,

        /// Print the theme graph instead of the report.
        #[arg(long)]
        graph: bool,
    },

    /// Print the character/event graph of a chapter as JSON.
    Characters { chapter: u32 },

    /// Show everything a chapter says about one character.
    Character { chapter: u32, name: String },

    /// Export the whole knowledge graph as JSON.
    Export,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(corpus) = cli.corpus {
        config.corpus_path = Some(corpus);
    }

    let engine = Engine::new(config)?;

    match cli.command {
        Commands::Info => {
            println!("{}", engine.info());
        }

        Commands::Neighborhood { id, radius } => {
            let radius = radius.unwrap_or(engine.config().neighborhood_radius);
            let sub = engine.ego_network(&NodeId::from(id), radius)?;
            print_json(&GraphExport::from(&sub))?;
        }

        Commands::Problem { id } => {
            let problem = engine.solutions_for(&id)?;
            println!("Problem: {}", problem.id);
            println!("  {}", problem.description);

            let resolved = engine.resolved_references(&id)?;
            println!("\nReferences ({}):", problem.references.len());
            for reference in &problem.references {
                match resolved.iter().find(|r| r.reference == *reference) {
                    Some(r) => {
                        println!("  {reference}: {}", r.verse.meaning);
                        if !r.verse.life_application.is_empty() {
                            println!("      application: {}", r.verse.life_application);
                        }
                    }
                    None => println!("  {reference}: (not in corpus)"),
                }
            }
        }

        Commands::Verse { chapter, verse } => {
            let shloka = engine.resolve_reference(chapter, verse)?;
            print_json(&VerseReport {
                verse: shloka,
                problems: engine.problems_for_verse(chapter, verse),
            })?;
        }

        Commands::Themes => {
            let themes = engine.themes();
            if themes.is_empty() {
                println!("No themes in corpus.");
            } else {
                println!("Themes ({}):", themes.len());
                for t in &themes {
                    println!("  {:>4}  {}", t.verse_count, t.theme);
                }
            }
        }

        Commands::Theme { theme, graph } => {
            if graph {
                print_json(&GraphExport::from(&engine.theme_graph(&theme)))?;
            } else {
                print_json(&theme_report(&engine, &theme))?;
            }
        }

        Commands::Characters { chapter } => {
            let sub = engine.character_graph(chapter)?;
            print_json(&GraphExport::from(&sub))?;
        }

        Commands::Character { chapter, name } => {
            let profile = engine.character_profile(chapter, &name)?;
            if profile.is_empty() {
                let known = character::event_characters(engine.chapter(chapter)?);
                miette::bail!(
                    help = format!("characters in chapter {chapter}: {}", known.join(", ")),
                    "chapter {chapter} does not mention {name}"
                );
            }
            print_json(&profile)?;
        }

        Commands::Export => {
            print_json(&GraphExport::from(engine.knowledge_graph()))?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{json}");
    Ok(())
}

#[derive(Serialize)]
struct VerseReport<'a> {
    #[serde(flatten)]
    verse: &'a gita_kg::corpus::Verse,
    problems: Vec<&'a str>,
}

#[derive(Serialize)]
struct ThemeReport<'a> {
    theme: &'a str,
    verse_count: usize,
    chapters: Vec<ThemeChapter<'a>>,
    problems: Vec<&'a str>,
}

#[derive(Serialize)]
struct ThemeChapter<'a> {
    number: u32,
    name: &'a str,
    main_theme: &'a str,
    aspects: Vec<&'a str>,
    verses: Vec<String>,
}

fn theme_report<'a>(engine: &'a Engine, name: &'a str) -> ThemeReport<'a> {
    let chapters = engine
        .chapters_by_theme(name)
        .into_iter()
        .map(|chapter| ThemeChapter {
            number: chapter.number,
            name: &chapter.name,
            main_theme: &chapter.main_theme,
            aspects: theme::matching_aspects(chapter, name),
            verses: theme::verses_by_theme(chapter, name)
                .iter()
                .map(|v| v.reference().to_string())
                .collect(),
        })
        .collect();

    ThemeReport {
        theme: name,
        verse_count: theme::aggregate_verse_count(engine.corpus(), name),
        chapters,
        problems: engine
            .problems_by_theme(name)
            .iter()
            .map(|p| p.id.as_str())
            .collect(),
    }
}
