//! Performance benchmarks for field validation and registry file parsing.
//!
//! These benchmarks measure:
//! - Phone number validation and formatting
//! - Email validation
//! - Parsing data lines into people
//! - Loading registry files of different sizes

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use person_registry::codec::{load, parse_line, Separators};
use person_registry::domain::{email, phone};
use person_registry::events::EventSink;
use person_registry::registry::Registry;
use std::hint::black_box;
use std::io::Cursor;
use tokio_util::sync::CancellationToken;

fn registry_file(count: usize) -> String {
    let mut content = String::from("Name:Number,Email\n");
    for i in 0..count {
        content.push_str(&format!("Person{}: 0630/{:07}, person{}@example.com\n", i, i, i));
    }
    content
}

/// Benchmark phone validation and formatting on typical inputs.
fn bench_phone(c: &mut Criterion) {
    let mut group = c.benchmark_group("phone");

    for input in ["06301234567", "+36 (30) 123-4567", "0630/123456"] {
        group.bench_with_input(BenchmarkId::new("is_valid", input), input, |b, input| {
            b.iter(|| phone::is_valid(black_box(input)));
        });
        group.bench_with_input(BenchmarkId::new("format", input), input, |b, input| {
            b.iter(|| phone::format(black_box(input)));
        });
    }

    group.finish();
}

/// Benchmark email validation on valid and invalid addresses.
fn bench_email(c: &mut Criterion) {
    let mut group = c.benchmark_group("email");

    for input in ["person@email.com", "first.last@sub.example.org", ".@email.com", "vki@barmi"] {
        group.bench_with_input(BenchmarkId::from_parameter(input), input, |b, input| {
            b.iter(|| email::is_valid(black_box(input)));
        });
    }

    group.finish();
}

/// Benchmark turning one data line into a person.
fn bench_parse_line(c: &mut Criterion) {
    let separators = Separators::default();

    c.bench_function("parse_line", |b| {
        b.iter(|| parse_line(black_box("Alice: 0630/1234567, alice@x.com"), &separators));
    });
}

/// Benchmark loading whole files into an empty registry.
fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for count in [10, 100, 1_000] {
        let content = registry_file(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &content, |b, content| {
            b.iter(|| {
                let registry = Registry::new();
                load(
                    Cursor::new(content.as_bytes()),
                    &registry,
                    &CancellationToken::new(),
                    &EventSink::silent(),
                )
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_phone, bench_email, bench_parse_line, bench_load);
criterion_main!(benches);
