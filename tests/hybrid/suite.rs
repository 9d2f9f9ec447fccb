use regex_lazy::hybrid::{
    dfa::{self, DFA},
    regex::{self, Regex},
};

use regex_test::{
    CompiledRegex, Match as TestMatch, RegexTest, TestResult, TestRunner,
};

use crate::{suite, Result};

/// Tests the default configuration of the hybrid NFA/DFA.
#[test]
fn default() -> Result<()> {
    let builder = Regex::builder();
    TestRunner::new()?.test_iter(suite()?.iter(), compiler(builder)).assert();
    Ok(())
}

/// Tests the hybrid NFA/DFA when the cache has no room for any state beyond
/// the ones it always keeps.
///
/// Every search then clears the cache over and over again, which exercises
/// the logic that saves and restores the current state across a clear.
#[test]
fn min_cache_capacity() -> Result<()> {
    let mut builder = Regex::builder();
    builder.dfa(DFA::config().cache_capacity(0));
    TestRunner::new()?.test_iter(suite()?.iter(), compiler(builder)).assert();
    Ok(())
}

/// Tests that the hybrid NFA/DFA never clears its cache for any test with
/// the default capacity.
#[test]
fn no_cache_clearing() -> Result<()> {
    for test in suite()?.iter().filter(|t| t.compiles()) {
        let mut re = Regex::new(test.regex())?;
        re.find_all(test.input());
        assert_eq!(
            0,
            re.cache().clear_count(),
            "cache was cleared for {}",
            test.full_name(),
        );
    }
    Ok(())
}

fn compiler(
    builder: regex::Builder,
) -> impl FnMut(&RegexTest, &str) -> Result<CompiledRegex> {
    move |_, pattern| {
        let mut re = builder.build(pattern)?;
        Ok(CompiledRegex::compiled(move |test| -> Vec<TestResult> {
            run_test(&mut re, test)
        }))
    }
}

fn run_test(re: &mut Regex, test: &RegexTest) -> Vec<TestResult> {
    let input = test.input();
    let full_match = TestResult::full_match(re.full_match(input));
    let dfa_full_match = {
        let dfa: &DFA = re.dfa();
        let mut cache = dfa::Cache::new(dfa);
        TestResult::full_match(dfa.full_match(&mut cache, input))
            .name("dfa_full_match")
    };
    let matches = TestResult::matches(
        re.find_iter(input)
            .map(|m| TestMatch { start: m.start(), end: m.end() }),
    )
    .name("find_iter");
    let indices = {
        let all = re.find_all(input);
        let idx = re.find_all_indices(input);
        TestResult::matches(
            all.iter()
                .zip(idx.iter())
                .map(|(s, &i)| TestMatch { start: i, end: i + s.len() }),
        )
        .name("find_all")
    };
    vec![full_match, dfa_full_match, matches, indices]
}
