use std::io::{stdout, Write};

use {bstr::ByteSlice, regex_lazy::hybrid::regex::Regex};

use crate::{
    config::{self, common, dfa, haystack, pattern, thompson},
    util::{self, Table},
};

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    const USAGE: &'static str = "\
Reports whether each haystack matches a pattern in full.

A haystack only matches if the pattern matches all of it, from its first byte
to its last. One line is printed per haystack. All haystacks are searched
with the same regex, so later haystacks reuse the states built by earlier
ones.

USAGE:
    regex-cli match <pattern> [<haystack> ...]

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
    let (nfa, time) = util::timeitr(|| thompson.build(pattern))?;
    let mut re = Regex::builder().build_from_dfa(dfa.from_nfa(nfa));

    let mut out = stdout();
    for haystack in haystacks.iter() {
        writeln!(out, "{}", verdict(re.full_match(haystack), haystack))?;
    }
    if !common.quiet {
        let mut table = Table::empty();
        table.add("compile time", time);
        table.add("dfa states", re.cache().state_len());
        table.add("memory", re.memory_usage());
        writeln!(out, "")?;
        table.print(out)?;
    }
    Ok(())
}

/// Renders one line of output. Haystacks are quoted, with bytes that aren't
/// valid UTF-8 escaped.
fn verdict(matched: bool, haystack: &[u8]) -> String {
    format!("{}: {:?}", matched, haystack.as_bstr())
}

#[cfg(test)]
mod tests {
    use super::verdict;

    #[test]
    fn quotes_haystack() {
        assert_eq!(r#"true: "abc""#, verdict(true, b"abc"));
        assert_eq!(r#"false: "a\xFFb""#, verdict(false, b"a\xFFb"));
    }
}
