use std::io::{stdout, Write};

use {
    bstr::ByteSlice,
    lexopt::{Arg, Parser},
    regex_lazy::hybrid::regex::Regex,
};

use crate::{
    args::Usage,
    config::{self, common, dfa, haystack, pattern, thompson, Configurable},
};

pub fn run(p: &mut Parser) -> anyhow::Result<()> {
    const USAGE: &'static str = "\
Prints every substring of a haystack that matches a pattern in full.

Every pair of start and end offsets is considered, so overlapping and nested
matches are all printed. Matches are ordered by their start offset and then by
their end offset. Each match is printed as 'start..end: substring'.

USAGE:
    regex-cli find <pattern> <haystack>
    regex-cli find <pattern> -f <path>

TIP:
    use -h for short docs and --help for long docs

OPTIONS:
%options%
";

    let mut common = common::Config::default();
    let mut find = Find::default();
    let mut pattern = pattern::Config::default();
    let mut haystack = haystack::Config::one();
    let mut thompson = thompson::Config::default();
    let mut dfa = dfa::Config::default();
    config::configure(
        p,
        USAGE,
        &mut [
            &mut common,
            &mut find,
            &mut pattern,
            &mut haystack,
            &mut thompson,
            &mut dfa,
        ],
    )?;

    let pattern = pattern.get()?;
    let haystack = haystack.get()?.remove(0);
    let nfa = thompson.build(pattern)?;
    let mut re = Regex::builder().build_from_dfa(dfa.from_nfa(nfa));

    let mut out = stdout();
    if common.quiet {
        writeln!(out, "{}", re.find_iter(&haystack).count())?;
    } else if find.indices {
        for start in re.find_all_indices(&haystack) {
            writeln!(out, "{}", start)?;
        }
    } else {
        for m in re.find_iter(&haystack) {
            let sub = haystack[m.range()].as_bstr();
            writeln!(out, "{}..{}: {}", m.start(), m.end(), sub)?;
        }
    }
    Ok(())
}

#[derive(Debug, Default)]
struct Find {
    indices: bool,
}

impl Configurable for Find {
    fn configure(
        &mut self,
        _: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            Arg::Short('i') | Arg::Long("indices") => {
                self.indices = true;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const USAGES: &'static [Usage] = &[Usage::new(
            "-i, --indices",
            "Print only the start offset of each match.",
            r#"
Print only the start offset of each match, one per line, instead of its span
and substring. The offsets appear in the same order as the matches.
"#,
        )];
        USAGES
    }
}
