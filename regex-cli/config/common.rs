use lexopt::{Arg, Parser};

use crate::{args::Usage, config::Configurable};

/// Flags shared by every command.
#[derive(Debug, Default)]
pub struct Config {
    pub quiet: bool,
}

impl Configurable for Config {
    fn configure(
        &mut self,
        _: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            Arg::Short('q') | Arg::Long("quiet") => {
                self.quiet = true;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const USAGES: &'static [Usage] = &[Usage::new(
            "-q, --quiet",
            "Suppress some output.",
            r#"
This is a generic flag that suppresses some (but not all) output. Which output
is suppressed depends on the command. For example, 'regex-cli debug' only
prints timings and sizes, and 'regex-cli find' only prints the number of
matches.
"#,
        )];
        USAGES
    }
}
