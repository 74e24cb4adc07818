//! Benchmarks for query building and record rendering.
//!
//! Benchmark targets:
//! - Query building: <10us
//! - Short-form record rendering: <20us
//! - Long-form record rendering: <100us

// Criterion macros generate items without docs - this is expected for benchmarks
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use serde_json::json;
use std::hint::black_box;
use std::time::Duration;

use journal_search::services::normalize_name;
use journal_search::{FieldRenderer, FieldSpec, FieldValue, QueryBuilder};

// ============================================================================
// Query Builder Benchmarks
// ============================================================================

const SHORT_NAME: &str = "JHEP";
const DOTTED_NAME: &str = "Phys. Rev. D";
const LONG_NAME: &str = "Proceedings, 12th International Conference on Physics in Collision, Boulder, Colo.";

fn bench_query_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_building");
    group.measurement_time(Duration::from_secs(5));
    let builder = QueryBuilder::new();

    for (label, value) in [("short", SHORT_NAME), ("dotted", DOTTED_NAME), ("long", LONG_NAME)] {
        group.bench_with_input(BenchmarkId::new("default", label), value, |b, v| {
            b.iter(|| builder.build(black_box(v), false, false));
        });
        group.bench_with_input(BenchmarkId::new("exact", label), value, |b, v| {
            b.iter(|| builder.build(black_box(v), true, false));
        });
        group.bench_with_input(BenchmarkId::new("name", label), value, |b, v| {
            b.iter(|| builder.build(black_box(v), false, true));
        });
    }

    group.bench_function("normalize_long", |b| {
        b.iter(|| normalize_name(black_box(LONG_NAME)));
    });

    group.finish();
}

// ============================================================================
// Rendering Benchmarks
// ============================================================================

fn sample_record() -> FieldValue {
    FieldValue::from(json!({
        "control_number": 1_214_516,
        "self": {"$ref": "https://inspirehep.net/api/journals/1214516"},
        "short_title": "Phys.Rev.D",
        "journal_title": {"title": "Physical Review D"},
        "title_variants": ["PHYSICAL REVIEW D", "PHYS REV D", "PHYSICAL REVIEW D PARTICLES AND FIELDS"],
        "publisher": ["APS"],
        "urls": [
            {"value": "https://journals.aps.org/prd", "description": "Home page"},
            {"value": "https://journals.aps.org/prd/issues", "description": "Issues"}
        ],
        "doi_prefixes": ["10.1103"],
        "inspire_categories": [{"term": "Phenomenology-HEP"}, {"term": "Theory-HEP"}],
        "issns": [{"value": "2470-0010", "medium": "print"}, {"value": "2470-0029", "medium": "online"}],
        "license": {"url": "https://creativecommons.org/licenses/by/4.0/", "license": "CC BY 4.0"},
        "proceedings": false,
        "refereed": true,
        "deleted": false,
        "date_started": "2016",
        "legacy_creation_date": "1970-01-01",
        "legacy_version": "20230428123000.0"
    }))
}

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");
    group.measurement_time(Duration::from_secs(5));
    let renderer = FieldRenderer::new();
    let record = sample_record();

    for (label, fields) in [("short", FieldSpec::SHORT), ("long", FieldSpec::LONG)] {
        group.bench_with_input(BenchmarkId::new("record", label), &fields, |b, f| {
            b.iter(|| renderer.render(black_box(&record), f));
        });
    }

    group.finish();
}

fn bench_rendering_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering_batch");
    group.measurement_time(Duration::from_secs(5));
    let renderer = FieldRenderer::new();
    let record = sample_record();

    for size in [10usize, 100, 1000] {
        let batch = vec![record.clone(); size];
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("long", size), &batch, |b, records| {
            b.iter(|| {
                records
                    .iter()
                    .filter_map(|r| renderer.render(r, &FieldSpec::LONG).ok())
                    .count()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_query_building, bench_rendering, bench_rendering_batch);
criterion_main!(benches);
