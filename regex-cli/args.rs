use std::{ffi::OsString, fmt::Display, str::FromStr};

use lexopt::{Arg, Parser};

/// Returns the name of the command given as the next argument.
///
/// When there is no next argument, or it is `-h` or `--help`, the usage is
/// returned as an error so that it gets printed.
pub fn next_as_command(usage: &str, p: &mut Parser) -> anyhow::Result<String> {
    match p.next()? {
        Some(Arg::Value(cmd)) => string(cmd),
        None | Some(Arg::Short('h')) | Some(Arg::Long("help")) => {
            anyhow::bail!("{}", usage.trim())
        }
        Some(arg) => Err(arg.unexpected().into()),
    }
}

/// Decodes an argument as UTF-8.
pub fn string(arg: OsString) -> anyhow::Result<String> {
    Ok(arg.into_string().map_err(lexopt::Error::from)?)
}

/// Parses the value of `flag` from the next argument.
pub fn parse<T>(p: &mut Parser, flag: &'static str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let value = string(p.value()?)?;
    value.parse().map_err(|err| anyhow::anyhow!("{}: {}", flag, err))
}

/// The documentation for one flag or positional argument.
#[derive(Clone, Copy, Debug)]
pub struct Usage {
    /// How the flag is written, e.g., `-C, --cache-capacity <bytes>`.
    pub flag: &'static str,
    /// A description short enough to share a line with `flag`.
    pub brief: &'static str,
    /// A description that may span several paragraphs. Paragraphs are
    /// separated by a blank line and are rewrapped when printed.
    pub doc: &'static str,
}

impl Usage {
    pub const fn new(
        flag: &'static str,
        brief: &'static str,
        doc: &'static str,
    ) -> Usage {
        Usage { flag, brief, doc }
    }

    /// Renders one line per usage, with the brief descriptions aligned in a
    /// second column.
    pub fn short(usages: &[Usage]) -> String {
        let width = usages.iter().map(|u| u.flag.len()).max().unwrap_or(0);
        usages
            .iter()
            .map(|u| {
                format!("    {:w$}  {}\n", u.flag, u.brief, w = width)
            })
            .collect()
    }

    /// Renders each usage as its flag followed by its full documentation,
    /// indented beneath it.
    pub fn long(usages: &[Usage]) -> String {
        let opts = textwrap::Options::new(79)
            .initial_indent("        ")
            .subsequent_indent("        ");
        let blocks: Vec<String> = usages
            .iter()
            .map(|u| {
                let paragraphs: Vec<String> = u
                    .doc
                    .trim()
                    .split("\n\n")
                    .map(|para| para.replace('\n', " "))
                    .map(|para| textwrap::fill(&para, &opts))
                    .collect();
                format!("    {}\n{}\n", u.flag, paragraphs.join("\n\n"))
            })
            .collect();
        blocks.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(args: &[&str]) -> Parser {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        Parser::from_args(args)
    }

    #[test]
    fn command_name() {
        let mut p = parser(&["find", "a+"]);
        assert_eq!("find", next_as_command("usage", &mut p).unwrap());

        let mut p = parser(&["--help"]);
        let err = next_as_command("usage", &mut p).unwrap_err();
        assert_eq!("usage", err.to_string());
    }

    #[test]
    fn parse_flag_value() {
        let mut p = parser(&["-C", "1024"]);
        assert_eq!(Some(Arg::Short('C')), p.next().unwrap());
        let capacity: usize = parse(&mut p, "-C").unwrap();
        assert_eq!(1024, capacity);

        let mut p = parser(&["-C", "lots"]);
        p.next().unwrap();
        assert!(parse::<usize>(&mut p, "-C").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_argument() {
        use std::os::unix::ffi::OsStringExt;

        let arg = OsString::from_vec(vec![b'a', 0xFF]);
        assert!(string(arg).is_err());
        assert_eq!("abc", string(OsString::from("abc")).unwrap());
    }
}
