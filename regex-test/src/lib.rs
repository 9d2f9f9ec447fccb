/*!
A TOML driven test harness for regex-lazy.

Each test names a pattern, an input and one or both of the following
expectations:

* `match`: whether the entire input is a full match of the pattern.
* `matches`: every `[start, end]` span of the input whose substring is a full
  match, ordered by start offset and then by end offset.

A test may instead set `compiles = false`, in which case the only
expectation is that the pattern is rejected.

```toml
[[tests]]
name = "alternation"
regex = "h(i|ello)"
input = "hello"
match = true
matches = [[0, 5]]
```

Setting `unescape = true` on a test replaces `\xNN`, `\n`, `\r`, `\t` and
`\\` in its input with the bytes they denote, which permits inputs that
aren't valid UTF-8.
*/

pub extern crate bstr;

use std::{collections::HashSet, fmt::Write, fs, path::Path};

use anyhow::{bail, Context, Result};
use bstr::{BStr, BString, ByteSlice};
use serde::Deserialize;

mod escape;

/// The environment variable used to select which tests run. See
/// [`TestRunner`].
const ENV_FILTER: &str = "REGEX_TEST";

/// When set to `1`, the runner prints every test it passed, skipped or
/// failed.
const ENV_VERBOSE: &str = "REGEX_TEST_VERBOSE";

/// A collection of regex tests, loaded from one or more TOML files.
#[derive(Clone, Debug, Default)]
pub struct RegexTests {
    tests: Vec<RegexTest>,
    names: HashSet<String>,
}

#[derive(Deserialize)]
struct TestFile {
    tests: Vec<RegexTest>,
}

/// A single test: a pattern, an input and what the pattern should do with
/// that input.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegexTest {
    #[serde(skip)]
    group: String,
    #[serde(default)]
    name: String,
    #[serde(skip)]
    full_name: String,
    regex: String,
    input: BString,
    #[serde(rename = "match")]
    full_match: Option<bool>,
    matches: Option<Vec<Match>>,
    #[serde(default = "yes")]
    compiles: bool,
    #[serde(default)]
    unescape: bool,
}

/// The span of a matching substring, as byte offsets into a test's input.
#[derive(Clone, Copy, Deserialize, Eq, Ord, PartialEq, PartialOrd)]
#[serde(from = "[usize; 2]")]
pub struct Match {
    /// The offset of the first byte of the match.
    pub start: usize,
    /// The offset one past the last byte of the match.
    pub end: usize,
}

impl std::fmt::Debug for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

impl From<[usize; 2]> for Match {
    fn from([start, end]: [usize; 2]) -> Match {
        Match { start, end }
    }
}

impl RegexTests {
    /// Create an empty collection.
    pub fn new() -> RegexTests {
        RegexTests::default()
    }

    /// Load every test in the TOML file at `path`. The tests are grouped
    /// under the file's stem, so `data/basic.toml` yields tests named
    /// `basic/...`.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let group = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .with_context(|| format!("no group name in {}", path.display()))?;
        let data = fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        self.load_slice(group, &data)
            .with_context(|| format!("failed to load {}", path.display()))
    }

    /// Load every test in the TOML encoded `data` under the given group
    /// name.
    ///
    /// Tests without a name are numbered in the order they appear,
    /// starting at `1`. Every test is checked for consistency, and loading
    /// fails if any test is inconsistent or if two tests share a name.
    pub fn load_slice(&mut self, group: &str, data: &[u8]) -> Result<()> {
        let file: TestFile =
            toml::from_slice(data).context("failed to decode TOML")?;
        let mut unnamed = 0;
        for mut test in file.tests {
            if test.name.is_empty() {
                unnamed += 1;
                test.name = unnamed.to_string();
            }
            test.group = group.to_string();
            test.full_name = format!("{}/{}", group, test.name);
            if test.unescape {
                test.input = BString::from(escape::unescape(&test.input));
            }
            test.check()
                .with_context(|| format!("bad test '{}'", test.full_name))?;
            if !self.names.insert(test.full_name.clone()) {
                bail!("more than one test is named '{}'", test.full_name);
            }
            self.tests.push(test);
        }
        Ok(())
    }

    /// Iterate over every test, in the order they were loaded.
    pub fn iter(&self) -> std::slice::Iter<'_, RegexTest> {
        self.tests.iter()
    }
}

impl RegexTest {
    fn check(&self) -> Result<()> {
        let has_expectation =
            self.full_match.is_some() || self.matches.is_some();
        if !self.compiles {
            if has_expectation {
                bail!("'match' and 'matches' require a pattern that compiles");
            }
            return Ok(());
        }
        if !has_expectation {
            bail!("one of 'match' or 'matches' is required");
        }
        let matches = match self.matches {
            None => return Ok(()),
            Some(ref matches) => matches,
        };
        let len = self.input.len();
        let bad_span = |m: &&Match| m.start > m.end || m.end > len;
        if let Some(m) = matches.iter().find(bad_span) {
            bail!("{:?} is out of bounds for input {:?}", m, self.input());
        }
        if let Some(w) = matches.windows(2).find(|w| w[0] >= w[1]) {
            bail!("spans out of order: {:?} comes before {:?}", w[0], w[1]);
        }
        if let Some(expected) = self.full_match {
            if expected != matches.contains(&self.whole()) {
                bail!(
                    "'match = {}' disagrees with whether 'matches' \
                     contains {:?}",
                    expected,
                    self.whole(),
                );
            }
        }
        Ok(())
    }

    fn whole(&self) -> Match {
        Match { start: 0, end: self.input.len() }
    }

    /// The group this test was loaded into.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The name of this test, unique within its group.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The group and name of this test, joined by a `/`.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// The pattern under test.
    pub fn regex(&self) -> &str {
        &self.regex
    }

    /// The bytes the pattern is matched against.
    pub fn input(&self) -> &BStr {
        self.input.as_bstr()
    }

    /// Whether the whole input should be a full match.
    ///
    /// A test that only lists `matches` expects a full match exactly when
    /// the span of the whole input is one of them.
    pub fn full_match(&self) -> bool {
        match (self.full_match, &self.matches) {
            (Some(yes), _) => yes,
            (None, Some(ms)) => ms.contains(&self.whole()),
            (None, None) => false,
        }
    }

    /// Every span of the input that should match, if the test lists them.
    pub fn matches(&self) -> Option<&[Match]> {
        self.matches.as_deref()
    }

    /// Whether the pattern should compile.
    pub fn compiles(&self) -> bool {
        self.compiles
    }
}

/// A compiled regex, ready to be searched by the runner.
///
/// The closure given to [`CompiledRegex::compiled`] runs every search the
/// implementation supports on a test's input and reports each outcome as a
/// [`TestResult`].
pub struct CompiledRegex {
    run: Option<Box<dyn FnMut(&RegexTest) -> Vec<TestResult>>>,
}

impl CompiledRegex {
    /// Wrap a closure that searches a test's input.
    ///
    /// The closure may mutate what it captures. Regexes in this crate fill
    /// in a cache as they search, and so need `&mut` access.
    pub fn compiled<F>(run: F) -> CompiledRegex
    where
        F: FnMut(&RegexTest) -> Vec<TestResult> + 'static,
    {
        CompiledRegex { run: Some(Box::new(run)) }
    }

    /// A regex whose tests are all skipped.
    pub fn skip() -> CompiledRegex {
        CompiledRegex { run: None }
    }
}

impl std::fmt::Debug for CompiledRegex {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let run = if self.run.is_some() { "Some(...)" } else { "None" };
        f.debug_struct("CompiledRegex").field("run", &run).finish()
    }
}

/// The outcome of one search on a test's input.
#[derive(Clone, Debug)]
pub struct TestResult {
    name: String,
    kind: Outcome,
}

#[derive(Clone, Debug)]
enum Outcome {
    FullMatch(bool),
    Matches(Vec<Match>),
    Skip,
}

impl TestResult {
    /// The verdict of a full match on the input.
    pub fn full_match(matched: bool) -> TestResult {
        TestResult { name: String::new(), kind: Outcome::FullMatch(matched) }
    }

    /// Every matching span found in the input.
    pub fn matches<I: IntoIterator<Item = Match>>(it: I) -> TestResult {
        let matches = it.into_iter().collect();
        TestResult { name: String::new(), kind: Outcome::Matches(matches) }
    }

    /// An outcome that isn't checked.
    pub fn skip() -> TestResult {
        TestResult { name: String::new(), kind: Outcome::Skip }
    }

    /// Label this outcome with the search that produced it. The label is
    /// reported alongside any failure.
    pub fn name(mut self, name: &str) -> TestResult {
        self.name = name.to_string();
        self
    }
}

/// Runs tests against a regex implementation and collects their failures.
///
/// Call [`TestRunner::test_iter`] on the tests and then
/// [`TestRunner::assert`], which panics with a report of every failure.
/// Failing tests never panic on their own, so a single run reports all of
/// them.
///
/// # Filtering
///
/// The `REGEX_TEST` environment variable may hold a comma separated list of
/// substrings. A substring prefixed with `-` excludes every test whose full
/// name contains it. Any other substring includes the tests whose full name
/// contains it. When at least one inclusion is given, tests matching none of
/// them are skipped. When a test matches several substrings, the last one
/// wins.
#[derive(Debug)]
pub struct TestRunner {
    filter: Filter,
    report: Report,
}

impl TestRunner {
    /// Create a runner, reading its filter from `REGEX_TEST`.
    pub fn new() -> Result<TestRunner> {
        let mut runner = TestRunner {
            filter: Filter::default(),
            report: Report::default(),
        };
        for rule in env(ENV_FILTER)?.split(',').map(str::trim) {
            match rule.strip_prefix('-') {
                _ if rule.is_empty() => {}
                Some(exclude) => {
                    runner.blacklist(exclude);
                }
                None => {
                    runner.whitelist(rule);
                }
            }
        }
        Ok(runner)
    }

    /// Run only tests whose full name contains `substring`, unless a later
    /// rule excludes them.
    pub fn whitelist(&mut self, substring: &str) -> &mut TestRunner {
        self.filter.rules.push((true, substring.to_string()));
        self
    }

    /// Skip tests whose full name contains `substring`, unless a later rule
    /// includes them.
    pub fn blacklist(&mut self, substring: &str) -> &mut TestRunner {
        self.filter.rules.push((false, substring.to_string()));
        self
    }

    /// Panic if any test run so far has failed.
    ///
    /// With `REGEX_TEST_VERBOSE=1`, a summary of every test is printed
    /// first.
    pub fn assert(&mut self) {
        if env(ENV_VERBOSE).map_or(false, |v| v == "1") {
            self.report.print();
        }
        self.report.assert();
    }

    /// Run every test in `it` that the filter allows, compiling each with
    /// `compile`.
    pub fn test_iter<'t, I, F>(&mut self, it: I, mut compile: F) -> &mut Self
    where
        I: IntoIterator<Item = &'t RegexTest>,
        F: FnMut(
            &RegexTest,
            &str,
        ) -> Result<CompiledRegex, Box<dyn std::error::Error>>,
    {
        for test in it {
            if self.filter.allows(test.full_name()) {
                self.test(test, |pattern| compile(test, pattern));
            } else {
                self.report.skipped.push(test.full_name().to_string());
            }
        }
        self
    }

    /// Compile and run a single test.
    pub fn test<F>(&mut self, test: &RegexTest, compile: F) -> &mut Self
    where
        F: FnOnce(&str) -> Result<CompiledRegex, Box<dyn std::error::Error>>,
    {
        let compiled = match catch_panic(|| compile(test.regex())) {
            Err(msg) => {
                let msg = format!("panic while compiling: {}", msg);
                self.report.fail(test, "", msg);
                return self;
            }
            Ok(Err(err)) if test.compiles() => {
                let msg = format!("expected the regex to compile: {}", err);
                self.report.fail(test, "", msg);
                return self;
            }
            Ok(Err(_)) => {
                self.report.pass(test, "");
                return self;
            }
            Ok(Ok(_)) if !test.compiles() => {
                let msg = "expected the regex to fail to compile".to_string();
                self.report.fail(test, "", msg);
                return self;
            }
            Ok(Ok(compiled)) => compiled,
        };
        let mut run = match compiled.run {
            None => {
                self.report.skipped.push(test.full_name().to_string());
                return self;
            }
            Some(run) => run,
        };
        let results = match catch_panic(|| run(test)) {
            Ok(results) => results,
            Err(msg) => {
                let msg = format!("panic while searching: {}", msg);
                self.report.fail(test, "", msg);
                return self;
            }
        };
        for result in results {
            self.check(test, result);
        }
        self
    }

    fn check(&mut self, test: &RegexTest, result: TestResult) {
        let name = &result.name;
        match result.kind {
            Outcome::Skip => {
                self.report.skipped.push(label(test, name));
            }
            Outcome::FullMatch(got) if got == test.full_match() => {
                self.report.pass(test, name);
            }
            Outcome::FullMatch(got) => {
                let msg = format!(
                    "expected full match {}, got {}",
                    test.full_match(),
                    got,
                );
                self.report.fail(test, name, msg);
            }
            Outcome::Matches(got) => match test.matches() {
                None => self.report.skipped.push(label(test, name)),
                Some(expected) if expected == &got[..] => {
                    self.report.pass(test, name);
                }
                Some(expected) => {
                    let msg = format!(
                        "wrong matches\nexpected: {:?}\n     got: {:?}",
                        expected, got,
                    );
                    self.report.fail(test, name, msg);
                }
            },
        }
    }
}

/// Inclusion and exclusion rules, as `(include, substring)` pairs.
#[derive(Debug, Default)]
struct Filter {
    rules: Vec<(bool, String)>,
}

impl Filter {
    fn allows(&self, full_name: &str) -> bool {
        let mut allowed = !self.rules.iter().any(|&(include, _)| include);
        for (include, substring) in self.rules.iter() {
            if full_name.contains(substring.as_str()) {
                allowed = *include;
            }
        }
        allowed
    }
}

#[derive(Debug, Default)]
struct Report {
    passed: Vec<String>,
    skipped: Vec<String>,
    failures: Vec<String>,
}

impl Report {
    fn pass(&mut self, test: &RegexTest, name: &str) {
        self.passed.push(label(test, name));
    }

    fn fail(&mut self, test: &RegexTest, name: &str, msg: String) {
        let mut failure = String::new();
        // Writing to a String never fails.
        let _ = write!(
            failure,
            "{}: {}\npattern: {:?}\n  input: {:?}",
            label(test, name),
            msg,
            test.regex(),
            test.input(),
        );
        self.failures.push(failure);
    }

    fn print(&self) {
        for name in self.skipped.iter() {
            println!("skip: {}", name);
        }
        for name in self.passed.iter() {
            println!("pass: {}", name);
        }
        println!(
            "passed: {}, skipped: {}, failed: {}",
            self.passed.len(),
            self.skipped.len(),
            self.failures.len(),
        );
    }

    fn assert(&self) {
        if self.failures.is_empty() {
            return;
        }
        let rule = "~".repeat(79);
        panic!(
            "{} test(s) failed\n{}\n{}\n{}\n\n\
             Use REGEX_TEST to pick tests by name. For example,\n\
             REGEX_TEST=basic,-dot runs the tests in 'basic' whose names\n\
             don't contain 'dot'.\n",
            self.failures.len(),
            rule,
            self.failures.join("\n\n"),
            rule,
        );
    }
}

fn label(test: &RegexTest, name: &str) -> String {
    if name.is_empty() {
        test.full_name().to_string()
    } else {
        format!("{} ({})", test.full_name(), name)
    }
}

/// Returns the value of the environment variable `var`, or an empty string
/// if it isn't set.
fn env(var: &str) -> Result<String> {
    match std::env::var_os(var) {
        None => Ok(String::new()),
        Some(val) => val.into_string().map_err(|val| {
            anyhow::anyhow!("{} is not valid UTF-8: {:?}", var, val)
        }),
    }
}

fn catch_panic<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)).map_err(|err| {
        if let Some(&msg) = err.downcast_ref::<&str>() {
            msg.to_string()
        } else if let Some(msg) = err.downcast_ref::<String>() {
            msg.clone()
        } else {
            "<panic payload is not a string>".to_string()
        }
    })
}

fn yes() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(data: &str) -> Result<RegexTests> {
        let mut tests = RegexTests::new();
        tests.load_slice("test", data.as_bytes())?;
        Ok(tests)
    }

    #[test]
    fn rejects_inconsistent_tests() {
        let bad = [
            // no regex
            "[[tests]]\ninput = 'abc'\nmatch = true",
            // unknown field
            "[[tests]]\nregex = 'ab*'\ninput = 'abb'\nmatch = true\nx = 0",
            // no expectation
            "[[tests]]\nregex = 'ab*'\ninput = 'abb'",
            // expectation on a pattern that doesn't compile
            "[[tests]]\nregex = '('\ninput = ''\ncompiles = false\n\
             match = false",
            // out of order
            "[[tests]]\nregex = 'a'\ninput = 'aa'\nmatches = [[1, 2], [0, 1]]",
            // out of bounds
            "[[tests]]\nregex = 'a'\ninput = 'a'\nmatches = [[0, 2]]",
            // contradiction
            "[[tests]]\nregex = 'a'\ninput = 'a'\nmatch = false\n\
             matches = [[0, 1]]",
            // duplicate name
            "[[tests]]\nname = 'x'\nregex = 'a'\ninput = 'a'\nmatch = true\n\
             [[tests]]\nname = 'x'\nregex = 'b'\ninput = 'b'\nmatch = true",
        ];
        for data in bad.iter() {
            assert!(load(data).is_err(), "loaded: {}", data);
        }
    }

    #[test]
    fn loads_full_match() {
        let tests = load(
            "[[tests]]\nname = 'foo'\nregex = 'ab*'\ninput = 'abb'\n\
             match = true",
        )
        .unwrap();
        let t = tests.iter().next().unwrap();
        assert_eq!("test", t.group());
        assert_eq!("foo", t.name());
        assert_eq!("test/foo", t.full_name());
        assert_eq!("ab*", t.regex());
        assert_eq!("abb", t.input());
        assert!(t.full_match());
        assert_eq!(None, t.matches());
        assert!(t.compiles());
    }

    #[test]
    fn derives_full_match_from_spans() {
        let tests = load(
            "[[tests]]\nregex = 'a*'\ninput = 'a'\n\
             matches = [[0, 0], [0, 1], [1, 1]]\n\
             [[tests]]\nregex = 'b'\ninput = 'ab'\nmatches = [[1, 2]]",
        )
        .unwrap();
        let ts: Vec<&RegexTest> = tests.iter().collect();
        assert_eq!("test/1", ts[0].full_name());
        assert!(ts[0].full_match());
        assert_eq!(3, ts[0].matches().map_or(0, |ms| ms.len()));
        assert_eq!("test/2", ts[1].full_name());
        assert!(!ts[1].full_match());
    }

    #[test]
    fn unescapes_input() {
        let tests = load(
            "[[tests]]\nregex = 'a'\ninput = '\\xFFa'\nunescape = true\n\
             matches = [[1, 2]]",
        )
        .unwrap();
        let t = tests.iter().next().unwrap();
        assert_eq!(&b"\xFFa"[..], t.input().as_bytes());
    }

    #[test]
    fn filter_last_rule_wins() {
        let mut filter = Filter::default();
        assert!(filter.allows("basic/dot"));
        filter.rules.push((false, "dot".to_string()));
        assert!(!filter.allows("basic/dot"));
        assert!(filter.allows("basic/star"));
        filter.rules.push((true, "basic/d".to_string()));
        assert!(filter.allows("basic/dot"));
        assert!(!filter.allows("basic/star"));
    }

    #[test]
    fn runner_reports_wrong_verdicts() {
        let tests = load(
            "[[tests]]\nname = 'yes'\nregex = 'a'\ninput = 'a'\nmatch = true",
        )
        .unwrap();
        let mut runner = TestRunner {
            filter: Filter::default(),
            report: Report::default(),
        };
        runner.test_iter(tests.iter(), |_, _| {
            Ok(CompiledRegex::compiled(|_| {
                vec![
                    TestResult::full_match(false),
                    TestResult::matches(vec![Match { start: 0, end: 1 }]),
                ]
            }))
        });
        assert_eq!(1, runner.report.failures.len());
        assert!(runner.report.failures[0].starts_with("test/yes: "));
        assert_eq!(vec!["test/yes".to_string()], runner.report.skipped);
    }
}
