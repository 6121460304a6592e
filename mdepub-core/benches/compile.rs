//! Compilation benchmarks

use criterion::{criterion_group, criterion_main, Criterion};
use mdepub_core::types::{BookMetadata, SourceDocument};
use mdepub_core::{Compiler, CompilerConfig};

fn synthetic_book(chapters: usize) -> Vec<SourceDocument> {
    (1..=chapters)
        .map(|i| {
            let mut text = format!("# Chapter {}\n\n", i);
            for j in 1..=20 {
                text.push_str(&format!(
                    "## Section {}\n\nSome *emphasis*, some **strength** and `code`.\n\n- one\n- two\n\n",
                    j
                ));
            }
            SourceDocument::new(format!("{:03}-chapter.md", i), text)
        })
        .collect()
}

fn compile_benchmark(c: &mut Criterion) {
    let sources = synthetic_book(50);
    let metadata = BookMetadata::new("urn:bench:1", "Benchmark Book", "en");

    let parallel = Compiler::new();
    let sequential = Compiler::with_config(CompilerConfig::default().with_parallel(false));

    c.bench_function("compile_parallel_50", |b| {
        b.iter(|| {
            parallel
                .compile(std::hint::black_box(&sources), None, metadata.clone(), None)
                .unwrap()
        })
    });

    c.bench_function("compile_sequential_50", |b| {
        b.iter(|| {
            sequential
                .compile(std::hint::black_box(&sources), None, metadata.clone(), None)
                .unwrap()
        })
    });

    let package = parallel.compile(&sources, None, metadata, None).unwrap();
    c.bench_function("serialize_50", |b| {
        b.iter(|| std::hint::black_box(&package).to_bytes().unwrap())
    });
}

criterion_group!(benches, compile_benchmark);
criterion_main!(benches);
