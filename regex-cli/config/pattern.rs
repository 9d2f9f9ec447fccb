use lexopt::{Arg, Parser};

use crate::{
    args::{self, Usage},
    config::Configurable,
};

/// The single pattern given to a command as its first positional argument.
#[derive(Debug, Default)]
pub struct Config {
    pattern: Option<String>,
}

impl Config {
    /// Returns the pattern, or an error if none was given.
    pub fn get(&self) -> anyhow::Result<&str> {
        match self.pattern {
            Some(ref pattern) => Ok(pattern),
            None => anyhow::bail!("a pattern is required"),
        }
    }
}

impl Configurable for Config {
    fn configure(
        &mut self,
        _: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool> {
        if self.pattern.is_some() {
            return Ok(false);
        }
        match *arg {
            Arg::Value(ref mut v) => {
                let v = std::mem::take(v);
                self.pattern = Some(args::string(v)?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        &[]
    }
}
