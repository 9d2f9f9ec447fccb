use std::path::PathBuf;

use {
    anyhow::Context,
    lexopt::{Arg, Parser},
};

use crate::{
    args::{self, Usage},
    config::Configurable,
};

/// The haystacks given to a command, either as positional arguments or read
/// from a file.
#[derive(Debug, Default)]
pub struct Config {
    haystacks: Vec<Vec<u8>>,
    file: Option<PathBuf>,
    many: bool,
}

impl Config {
    /// Accepts exactly one haystack: either a positional argument or the
    /// contents of the file given to `-f/--file`.
    pub fn one() -> Config {
        Config::default()
    }

    /// Accepts any number of positional haystacks, plus the contents of the
    /// file given to `-f/--file`.
    pub fn many() -> Config {
        Config { many: true, ..Config::default() }
    }

    /// Returns every haystack given. Positional haystacks come first, in
    /// order, followed by the file contents, if any.
    pub fn get(&self) -> anyhow::Result<Vec<Vec<u8>>> {
        let mut haystacks = self.haystacks.clone();
        if let Some(ref path) = self.file {
            let data = std::fs::read(path).with_context(|| {
                format!("failed to read {}", path.display())
            })?;
            haystacks.push(data);
        }
        if !self.many {
            anyhow::ensure!(
                haystacks.len() == 1,
                "exactly one haystack must be given as an argument or via \
                 -f/--file, but {} were given",
                haystacks.len(),
            );
        }
        Ok(haystacks)
    }
}

impl Configurable for Config {
    fn configure(
        &mut self,
        p: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            Arg::Short('f') | Arg::Long("file") => {
                let path = PathBuf::from(p.value().context("-f/--file")?);
                self.file = Some(path);
            }
            Arg::Value(ref mut v) => {
                let v = std::mem::take(v);
                self.haystacks.push(args::string(v)?.into_bytes());
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const USAGES: &'static [Usage] = &[Usage::new(
            "-f, --file <path>",
            "Read a haystack from a file.",
            r#"
Read the entire contents of the given file and use it as a haystack. The
contents are searched as is, including any trailing newline.
"#,
        )];
        USAGES
    }
}
