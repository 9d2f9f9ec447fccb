use std::fmt::Debug;

use lexopt::{Arg, Parser};

use crate::args::Usage;

pub mod common;
pub mod dfa;
pub mod haystack;
pub mod pattern;
pub mod thompson;

/// A group of related command line flags (or positional arguments) that
/// configure one aspect of a command.
pub trait Configurable: Debug {
    /// Consume `arg`, along with any value it takes from `p`. Returns false
    /// if the argument belongs to some other group.
    fn configure(
        &mut self,
        p: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool>;

    /// Documentation for every argument this group recognizes.
    fn usage(&self) -> &[Usage];
}

/// Hand every remaining argument to the first target that recognizes it.
///
/// `-h` and `--help` return the given usage as an error, with `%options%`
/// replaced by the short or long documentation of every target.
pub fn configure(
    p: &mut Parser,
    usage: &str,
    targets: &mut [&mut dyn Configurable],
) -> anyhow::Result<()> {
    while let Some(arg) = p.next()? {
        if arg == Arg::Short('h') || arg == Arg::Long("help") {
            let long = arg == Arg::Long("help");
            anyhow::bail!("{}", help(usage, targets, long));
        }
        // A long flag borrows from the parser, which the targets need to
        // read flag values. Give the flag name its own home.
        let name;
        let mut arg = match arg {
            Arg::Long(flag) => {
                name = flag.to_string();
                Arg::Long(name.as_str())
            }
            Arg::Short(c) => Arg::Short(c),
            Arg::Value(value) => Arg::Value(value),
        };
        let mut recognized = false;
        for target in targets.iter_mut() {
            if target.configure(p, &mut arg)? {
                recognized = true;
                break;
            }
        }
        if !recognized {
            return Err(arg.unexpected().into());
        }
    }
    Ok(())
}

fn help(usage: &str, targets: &[&mut dyn Configurable], long: bool) -> String {
    let mut usages: Vec<Usage> =
        targets.iter().flat_map(|t| t.usage().iter().copied()).collect();
    usages.sort_by_key(|u| u.flag.trim_start_matches('-'));
    let options =
        if long { Usage::long(&usages) } else { Usage::short(&usages) };
    usage.replace("%options%", &options).trim().to_string()
}
