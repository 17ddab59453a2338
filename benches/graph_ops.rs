//! Benchmarks for graph construction and queries.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gita_kg::corpus::{Chapter, Corpus, Problem, Reference, Verse};
use gita_kg::graph::build::build;
use gita_kg::graph::traverse;
use gita_kg::graph::NodeId;
use gita_kg::query::theme::{self, ThemeIndex};

const KEYWORDS: [&str; 6] = ["duty", "anger", "peace", "devotion", "knowledge", "action"];

/// A corpus shaped like the full text: 18 chapters, ~700 shlokas, and a few
/// dozen problems citing verses across chapters.
fn synthetic_corpus() -> Corpus {
    let chapters: Vec<Chapter> = (1..=18u32)
        .map(|c| {
            let verses = (1..=40u32)
                .map(|v| {
                    let mut verse: Verse = serde_json::from_value(serde_json::json!({
                        "shloka_number": v,
                        "keywords": [KEYWORDS[(c + v) as usize % KEYWORDS.len()]],
                    }))
                    .unwrap();
                    verse.meaning = format!("Meaning of {c}.{v}");
                    verse
                })
                .collect();
            let mut chapter: Chapter = serde_json::from_value(serde_json::json!({
                "number": c,
                "main_theme": format!("Path of {}", KEYWORDS[c as usize % KEYWORDS.len()]),
                "philosophical_aspects": [KEYWORDS[(c as usize + 1) % KEYWORDS.len()]],
            }))
            .unwrap();
            chapter.verses = verses;
            chapter
        })
        .collect();

    let problems = (0..40u32)
        .map(|p| {
            let mut problem: Problem = serde_json::from_value(serde_json::json!({
                "description": format!("Struggling with {}", KEYWORDS[p as usize % KEYWORDS.len()]),
            }))
            .unwrap();
            problem.references = (0..5)
                .map(|r| Reference::new((p + r) % 18 + 1, (p * 7 + r) % 40 + 1))
                .collect();
            (format!("problem_{p}"), problem)
        })
        .collect();

    Corpus::from_parts(problems, chapters).unwrap()
}

fn bench_build(c: &mut Criterion) {
    let corpus = synthetic_corpus();
    c.bench_function("build_graph", |bench| {
        bench.iter(|| black_box(build(&corpus)))
    });
}

fn bench_neighborhood(c: &mut Criterion) {
    let corpus = synthetic_corpus();
    let graph = build(&corpus);
    let chapter = NodeId::chapter(2);
    let problem = NodeId::problem("problem_3");

    c.bench_function("neighborhood_chapter", |bench| {
        bench.iter(|| black_box(traverse::neighborhood(&graph, &chapter).unwrap()))
    });
    c.bench_function("ego_network_r2_problem", |bench| {
        bench.iter(|| black_box(traverse::ego_network(&graph, &problem, 2).unwrap()))
    });
}

fn bench_themes(c: &mut Criterion) {
    let corpus = synthetic_corpus();
    c.bench_function("theme_index", |bench| {
        bench.iter(|| black_box(ThemeIndex::build(&corpus)))
    });
    c.bench_function("theme_graph", |bench| {
        bench.iter(|| black_box(theme::theme_graph(&corpus, "duty")))
    });
}

criterion_group!(benches, bench_build, bench_neighborhood, bench_themes);
criterion_main!(benches);
