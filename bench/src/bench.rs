use criterion::{
    criterion_group, criterion_main, Bencher, Criterion, Throughput,
};
use regex_lazy::{
    hybrid::{dfa, regex::Regex},
    nfa::thompson::NFA,
};

use regex_lazy_bench::inputs::*;

fn compile(c: &mut Criterion) {
    define_compile(c, "literal", "wild");
    define_compile(c, "cats", "(w|m)i*ld");
    define_compile(c, "abb", "(a|b)*abb");
    define_compile(c, "nested", "((a|b)*(c|d)+e?)+f");
}

fn full_match(c: &mut Criterion) {
    let corpus = abb(10_000);
    define(c, "full-match", "abb-warm", &corpus, |b| {
        let mut re = Regex::new("(a|b)*abb").unwrap();
        b.iter(|| {
            assert!(re.full_match(&corpus));
        });
    });

    let corpus = abb(10_000);
    define(c, "full-match", "abb-cold", &corpus, |b| {
        let mut re = Regex::new("(a|b)*abb").unwrap();
        b.iter(|| {
            re.reset_cache();
            assert!(re.full_match(&corpus));
        });
    });

    let corpus = abb(10_000);
    define(c, "full-match", "abb-no-cache", &corpus, |b| {
        let mut re = Regex::builder()
            .dfa(dfa::Config::new().cache_capacity(0))
            .build("(a|b)*abb")
            .unwrap();
        b.iter(|| {
            assert!(re.full_match(&corpus));
        });
    });

    let corpus = EMPTY;
    define(c, "full-match", "empty", corpus, move |b| {
        let mut re = Regex::new("(a|b)*abb").unwrap();
        b.iter(|| {
            assert!(!re.full_match(corpus));
        });
    });
}

fn find_all(c: &mut Criterion) {
    let corpus = CATS;
    define(c, "find-all", "cats", corpus, move |b| {
        let mut re = Regex::new("(w|m)i*ld").unwrap();
        b.iter(|| {
            assert_eq!(3, re.find_all(corpus).len());
        });
    });

    let corpus = SHERLOCK_TINY;
    define(c, "find-all", "sherlock-tiny", corpus, move |b| {
        let mut re = Regex::new("Holmes|Sherlock").unwrap();
        b.iter(|| {
            assert_eq!(2, re.find_all_indices(corpus).len());
        });
    });

    let corpus = repeat(SHERLOCK_TINY, 4);
    define(c, "find-all", "sherlock-small", &corpus, |b| {
        let mut re = Regex::new("(t|T)he").unwrap();
        b.iter(|| {
            assert!(re.find_iter(&corpus).count() > 0);
        });
    });
}

fn define_compile(c: &mut Criterion, group_name: &str, pattern: &'static str) {
    let group = format!("compile/{}", group_name);
    define(c, &group, "nfa", &[], move |b| {
        b.iter(|| {
            let result = NFA::new(pattern);
            assert!(result.is_ok());
        });
    });
    define(c, &group, "regex", &[], move |b| {
        b.iter(|| {
            let result = Regex::new(pattern);
            assert!(result.is_ok());
        });
    });
}

fn define(
    c: &mut Criterion,
    group_name: &str,
    bench_name: &str,
    corpus: &[u8],
    bench: impl FnMut(&mut Bencher),
) {
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Bytes(corpus.len() as u64));
    group.bench_function(bench_name, bench);
    group.finish();
}

criterion_group!(g1, compile);
criterion_group!(g2, full_match);
criterion_group!(g3, find_all);
criterion_main!(g1, g2, g3);
