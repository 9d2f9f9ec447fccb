use std::io::{stdout, Write};

use {bstr::ByteSlice, regex_lazy::hybrid::dfa::Cache};

use crate::{
    config::{self, common, dfa, haystack, pattern, thompson},
    util::{self, Table},
};

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    const USAGE: &'static str = "\
Prints the postfix form, the Thompson NFA and the lazy DFA cache of a pattern.

Since a lazy DFA only builds the states a search needs, its cache is empty
apart from the dead state until it is used. Each haystack given is fully
matched against the pattern before the cache is printed, so the output shows
the states those searches built.

USAGE:
    regex-cli debug <pattern> [<haystack> ...]

TIP:
    use -h for short docs and --help for long docs

OPTIONS:
%options%
";

    let mut common = common::Config::default();
    let mut pattern = pattern::Config::default();
    let mut haystacks = haystack::Config::many();
    let mut thompson = thompson::Config::default();
    let mut dfa = dfa::Config::default();
    config::configure(
        p,
        USAGE,
        &mut [
            &mut common,
            &mut pattern,
            &mut haystacks,
            &mut thompson,
            &mut dfa,
        ],
    )?;

    let pattern = pattern.get()?;
    let haystacks = haystacks.get()?;
    let mut table = Table::empty();
    let (postfix, time) = util::timeitr(|| thompson.parse(pattern))?;
    table.add("parse time", time);
    let (nfa, time) = util::timeitr(|| thompson.build(pattern))?;
    table.add("compile nfa time", time);
    table.add("nfa states", nfa.len());
    table.add("nfa memory", nfa.memory_usage());

    let dfa = dfa.from_nfa(nfa.clone());
    let mut cache = Cache::new(&dfa);
    let mut verdicts = vec![];
    let (_, time) = util::timeit(|| {
        for haystack in haystacks.iter() {
            verdicts.push(dfa.full_match(&mut cache, haystack));
        }
    });
    table.add("search time", time);
    table.add("dfa states", cache.state_len());
    table.add("cache memory", cache.memory_usage());
    table.add("cache clears", cache.clear_count());
    table.print(stdout())?;
    if common.quiet {
        return Ok(());
    }

    let mut out = stdout();
    writeln!(out, "\npostfix: {}", postfix)?;
    writeln!(out, "\n{:?}", nfa)?;
    writeln!(out, "{:?}", cache)?;
    for (haystack, matched) in haystacks.iter().zip(verdicts) {
        writeln!(out, "{:?}: {}", haystack.as_bstr(), matched)?;
    }
    Ok(())
}
