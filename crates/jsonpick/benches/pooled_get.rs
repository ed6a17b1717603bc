//! Pooled accessor benchmarks
//!
//! Compares the pooled single-call accessors against a fresh parse per call
//! and against explicit parser reuse, which is the span the pool is meant to
//! close.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use jsonpick::{Parser, get_int, get_string, parse};
use std::hint::black_box;

const SMALL_JSON: &str = r#"{"id": 1, "name": "test", "status": "active"}"#;

const MEDIUM_JSON: &str = r#"{
  "user": {
    "id": 12345,
    "name": "John Doe",
    "email": "john.doe@example.com",
    "status": "active",
    "profile": {
      "bio": "Software engineer",
      "location": "San Francisco",
      "company": "TechCorp"
    },
    "posts": [
      {"id": 1, "title": "Hello World", "likes": 25},
      {"id": 2, "title": "Tech Tips", "likes": 42}
    ]
  }
}"#;

fn bench_pooled_accessors(c: &mut Criterion) {
    let mut group = c.benchmark_group("pooled_accessors");

    group.throughput(Throughput::Bytes(SMALL_JSON.len() as u64));
    group.bench_function("get_string/small", |b| {
        b.iter(|| get_string(black_box(SMALL_JSON.as_bytes()), &["name"]))
    });

    group.throughput(Throughput::Bytes(MEDIUM_JSON.len() as u64));
    group.bench_function("get_int/medium_nested", |b| {
        b.iter(|| get_int(black_box(MEDIUM_JSON.as_bytes()), &["user", "posts", "1", "likes"]))
    });

    group.finish();
}

fn bench_one_shot_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("one_shot_parse");

    group.throughput(Throughput::Bytes(MEDIUM_JSON.len() as u64));
    group.bench_function("parse_and_navigate/medium", |b| {
        b.iter(|| {
            let doc = parse(black_box(MEDIUM_JSON)).unwrap();
            doc.get(&["user", "profile", "location"])
                .and_then(|v| v.as_str().map(str::to_owned))
        })
    });

    group.finish();
}

fn bench_reused_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("reused_parser");
    let mut parser = Parser::new();

    group.throughput(Throughput::Bytes(MEDIUM_JSON.len() as u64));
    group.bench_function("parse_and_navigate/medium", |b| {
        b.iter(|| {
            let root = parser.parse(black_box(MEDIUM_JSON)).unwrap();
            root.get(&["user", "id"]).and_then(|v| v.as_i64())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_pooled_accessors,
    bench_one_shot_parse,
    bench_reused_parser
);
criterion_main!(benches);
