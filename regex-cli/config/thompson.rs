use {
    anyhow::Context,
    lexopt::{Arg, Parser},
    regex_lazy::nfa::thompson,
};

use crate::{
    args::{self, Usage},
    config::Configurable,
};

/// This exposes all of the configuration knobs on a
/// `regex_lazy::nfa::thompson::Config` via CLI flags.
#[derive(Debug, Default)]
pub struct Config {
    thompson: thompson::Config,
}

impl Config {
    /// Return a `thompson::Config` object from this configuration.
    pub fn thompson(&self) -> thompson::Config {
        self.thompson.clone()
    }

    /// Return a compiler configured by these flags.
    pub fn compiler(&self) -> thompson::Compiler {
        let mut compiler = thompson::Compiler::new();
        compiler.configure(self.thompson());
        compiler
    }

    /// Parses the given pattern into postfix notation.
    pub fn parse(&self, pattern: &str) -> anyhow::Result<thompson::Postfix> {
        self.compiler()
            .parse(pattern)
            .with_context(|| format!("failed to parse {:?}", pattern))
    }

    /// Compiles the given pattern into an NFA.
    pub fn build(&self, pattern: &str) -> anyhow::Result<thompson::NFA> {
        self.compiler()
            .build(pattern)
            .with_context(|| format!("failed to compile {:?}", pattern))
    }
}

impl Configurable for Config {
    fn configure(
        &mut self,
        p: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            Arg::Long("nest-limit") => {
                let limit = args::parse(p, "--nest-limit")?;
                self.thompson = self.thompson.clone().nest_limit(limit);
            }
            Arg::Long("max-pattern-len") => {
                let len = args::parse(p, "--max-pattern-len")?;
                self.thompson = self.thompson.clone().max_pattern_len(len);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const USAGES: &'static [Usage] = &[
            Usage::new(
                "--nest-limit <limit>",
                "Set the maximum nesting depth of groups.",
                r#"
Set the maximum number of groups that may be open at any point in the pattern.
A pattern that nests groups more deeply than this is rejected.

The default is 100.
"#,
            ),
            Usage::new(
                "--max-pattern-len <bytes>",
                "Set the maximum length of a pattern.",
                r#"
Set the length, in bytes, at which a pattern is considered too long. A pattern
whose length is equal to or greater than this limit is rejected.

The default is 4000.
"#,
            ),
        ];
        USAGES
    }
}
