use {
    lexopt::{Arg, Parser},
    regex_lazy::{hybrid::dfa, nfa::thompson::NFA},
};

use crate::{
    args::{self, Usage},
    config::Configurable,
};

/// This exposes the configuration knobs of a lazy DFA via CLI flags.
#[derive(Debug, Default)]
pub struct Config {
    dfa: dfa::Config,
}

impl Config {
    /// Return a `hybrid::dfa::Config` object from this configuration.
    pub fn dfa(&self) -> dfa::Config {
        self.dfa.clone()
    }

    /// Builds a lazy DFA from the given NFA.
    pub fn from_nfa(&self, nfa: NFA) -> dfa::DFA {
        dfa::DFA::builder().configure(self.dfa()).build_from_nfa(nfa)
    }
}

impl Configurable for Config {
    fn configure(
        &mut self,
        p: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            Arg::Short('C') | Arg::Long("cache-capacity") => {
                let capacity = args::parse(p, "-C/--cache-capacity")?;
                self.dfa = self.dfa.clone().cache_capacity(capacity);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const USAGES: &'static [Usage] = &[Usage::new(
            "-C, --cache-capacity <bytes>",
            "Set the cache capacity of the lazy DFA.",
            r#"
Set the maximum amount of heap memory, in bytes, that the lazy DFA's cache may
use for its states and transitions. When a new state would exceed this
capacity, the cache is cleared and the search continues.

By default, the cache is unbounded.
"#,
        )];
        USAGES
    }
}
