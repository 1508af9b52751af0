//! Benchmarks for the metrics pipeline.
//!
//! Run with: cargo bench --bench engine_benchmarks

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use vault_metrics::domain::{NoteRecord, NoteSource, build_records};
use vault_metrics::engine::{compute_json, compute_report, extract, extract_all, resolve_all};

// =============================================================================
// Test Data Generation
// =============================================================================

/// Folders notes are spread across
const FOLDERS: &[&str] = &["", "projects/", "projects/alpha/", "reference/", "journal/2024/"];

/// Tags to assign to notes
const TAGS: &[&str] = &["draft", "review", "rust", "cli", "async", "idea"];

/// Sample words for note bodies
const WORDS: &[&str] = &[
    "architecture",
    "design",
    "pattern",
    "system",
    "component",
    "interface",
    "module",
    "function",
    "dependency",
    "testing",
    "performance",
    "optimization",
];

fn note_path(index: usize) -> String {
    format!("{}note-{}.md", FOLDERS[index % FOLDERS.len()], index)
}

/// Generates a note with frontmatter, headings, links, tags and a code block.
///
/// Every seventh link points nowhere so resolution sees dangling targets.
fn generate_note_content(index: usize, total: usize) -> String {
    let tag1 = TAGS[index % TAGS.len()];
    let tag2 = TAGS[(index + 2) % TAGS.len()];

    let mut body = format!("---\ntags: [{tag1}]\n---\n# Note {index}\n\n");
    for paragraph in 0..4 {
        let words: Vec<&str> = (0..30)
            .map(|w| WORDS[(index + paragraph * 7 + w) % WORDS.len()])
            .collect();
        body.push_str(&words.join(" "));

        let target = (index * 31 + paragraph * 17) % total;
        if (index + paragraph) % 7 == 0 {
            body.push_str(&format!(" [[missing-{target}]]"));
        } else {
            body.push_str(&format!(" [[note-{target}|see also]]"));
        }
        body.push_str(&format!(" #{tag2}\n\n## Section {paragraph}\n\n"));
    }
    body.push_str("```rust\nlet x = \"[[not-a-link]] #not-a-tag\";\n```\n");
    body
}

fn generate_sources(count: usize) -> Vec<NoteSource> {
    (0..count)
        .map(|i| NoteSource::new(generate_note_content(i, count), note_path(i)))
        .collect()
}

fn generate_records(count: usize) -> Vec<NoteRecord> {
    build_records(generate_sources(count), "").unwrap()
}

// =============================================================================
// Stage Benchmarks
// =============================================================================

fn bench_extract_single(c: &mut Criterion) {
    let text = generate_note_content(3, 1000);

    let mut group = c.benchmark_group("extract_single");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("note", |b| b.iter(|| extract(black_box(&text))));
    group.finish();
}

fn bench_extract_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_all");

    for size in [100, 1000, 5000] {
        let records = generate_records(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("notes", size), &records, |b, records| {
            b.iter(|| extract_all(records));
        });
    }

    group.finish();
}

fn bench_resolve_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_all");

    for size in [100, 1000, 5000] {
        let records = generate_records(size);
        let references = extract_all(&records);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("notes", size), &size, |b, _| {
            b.iter(|| resolve_all(&records, &references));
        });
    }

    group.finish();
}

// =============================================================================
// Pipeline Benchmarks
// =============================================================================

fn bench_compute_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_report");

    for size in [100, 1000, 5000] {
        let sources = generate_sources(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("notes", size), &sources, |b, sources| {
            b.iter(|| compute_report(sources.clone(), "").unwrap());
        });
    }

    group.finish();
}

fn bench_compute_json(c: &mut Criterion) {
    let sources = generate_sources(1000);

    let mut group = c.benchmark_group("compute_json");
    group.bench_function("1000_notes", |b| {
        b.iter(|| compute_json(sources.clone(), "").unwrap());
    });
    group.finish();
}

// =============================================================================
// Criterion Groups
// =============================================================================

criterion_group!(
    stage_benches,
    bench_extract_single,
    bench_extract_all,
    bench_resolve_all,
);

criterion_group!(pipeline_benches, bench_compute_report, bench_compute_json);

criterion_main!(stage_benches, pipeline_benches);
