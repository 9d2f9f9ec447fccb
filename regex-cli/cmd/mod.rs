use crate::args;

mod debug;
mod find;
mod matches;

const USAGE: &'static str = "\
A tool for debugging and searching with regex-lazy on the command line.

USAGE:
    regex-cli <command> ...

COMMANDS:
    debug    Print the postfix form, NFA and lazy DFA of a pattern.
    find     Print every substring of a haystack that matches a pattern.
    match    Report whether each haystack matches a pattern in full.
";

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let cmd = args::next_as_command(USAGE, p)?;
    match &*cmd {
        "debug" => debug::run(p),
        "find" => find::run(p),
        "match" => matches::run(p),
        unk => anyhow::bail!("unrecognized command '{}'", unk),
    }
}
