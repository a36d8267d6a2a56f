//! Benchmarks for the engine's hot paths.
//!
//! Covers the full pipeline (compile, determinize, simulate) plus the
//! approximate matcher and both PDA modes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use formalsim::prelude::*;

fn pattern_table() -> Vec<(&'static str, &'static str)> {
    vec![
        // (name, pattern)
        ("literal_chain", "abcabcabc"),
        ("classic_suffix", "(a|b)*abb"),
        ("nested_groups", "((a|b)(c|d))*e?"),
        ("quantifier_mix", "a+(b|c)*d?a+"),
    ]
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    for (name, pattern) in pattern_table() {
        group.bench_with_input(BenchmarkId::from_parameter(name), pattern, |b, pattern| {
            b.iter(|| compile(black_box(pattern)).unwrap());
        });
    }
    group.finish();
}

fn bench_determinize(c: &mut Criterion) {
    let mut group = c.benchmark_group("determinize");
    for (name, pattern) in pattern_table() {
        let nfa = compile(pattern).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &nfa, |b, nfa| {
            b.iter(|| determinize(black_box(nfa)));
        });
    }
    group.finish();
}

fn bench_simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");
    let nfa = compile("(a|b)*abb").unwrap();
    let dfa = determinize(&nfa);
    let input = "abbaabbaabbaabbaabb".repeat(8);

    group.bench_function("nfa", |b| b.iter(|| nfa.simulate(black_box(&input))));
    group.bench_function("dfa", |b| b.iter(|| dfa.simulate(black_box(&input))));
    group.finish();
}

fn bench_approximate_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("approximate_match");
    let text = "acgtacgtacgtacgtacgtacgtacgtacgt".repeat(4);

    for (name, pattern, k) in [
        ("short_pattern", "gtac", 1),
        ("medium_pattern", "acgtacgtac", 2),
        ("miss", "ttttttt", 1),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| approximate_match(black_box(&text), black_box(pattern), k));
        });
    }
    group.finish();
}

fn bench_pda(c: &mut Criterion) {
    let mut group = c.benchmark_group("pda");
    let counting_input = format!("{}{}", "a".repeat(256), "b".repeat(256));
    let bracket_input = "<item><point/></item>".repeat(32);

    group.bench_function("counting", |b| {
        b.iter(|| simulate(black_box(&counting_input), PdaMode::Counting));
    });
    group.bench_function("brackets", |b| {
        b.iter(|| simulate(black_box(&bracket_input), PdaMode::Brackets));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_compile,
    bench_determinize,
    bench_simulate,
    bench_approximate_match,
    bench_pda
);
criterion_main!(benches);
