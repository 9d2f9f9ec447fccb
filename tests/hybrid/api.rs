use quickcheck::{quickcheck, Arbitrary, Gen, TestResult};

use regex_lazy::{
    hybrid::{
        dfa::{self, DFA},
        regex::Regex,
    },
    nfa::thompson::{State, NFA},
    Match,
};

use crate::Result;

// The canonical example: every matching substring is reported, including
// one that ends exactly at the end of the haystack.
#[test]
fn wild_cats() -> Result<()> {
    let mut re = regex_lazy::compile("(w|m)i*ld")?;
    let hay = b"The wiiiiiiiiiild wild cat lived in a mild climate.";
    assert_eq!(
        vec![&b"wiiiiiiiiiild"[..], &b"wild"[..], &b"mild"[..]],
        re.find_all(hay),
    );
    assert_eq!(vec![4, 18, 38], re.find_all_indices(hay));

    let hay = b"a mild";
    assert_eq!(vec![Match::new(2, 6)], re.find_iter(hay).collect::<Vec<_>>());
    Ok(())
}

#[test]
fn empty_string_agrees_with_start_state() -> Result<()> {
    for &pattern in &["a*", "a?", "(ab)*", "a", "a+", "(a|b*)"] {
        let dfa = DFA::new(pattern)?;
        let mut cache = dfa.create_cache();
        let start = dfa.start_state(&mut cache);
        assert_eq!(
            start.is_match(),
            dfa.full_match(&mut cache, b""),
            "pattern: {:?}",
            pattern,
        );
    }
    Ok(())
}

// A cache must only be used with the DFA that created it. Resetting it
// against another DFA makes it usable again.
#[test]
fn cache_reset_retargets() -> Result<()> {
    let dfa1 = DFA::new("abc")?;
    let dfa2 = DFA::new("xyz")?;
    let mut cache = dfa1.create_cache();
    assert!(dfa1.full_match(&mut cache, b"abc"));

    cache.reset(&dfa2);
    assert!(dfa2.full_match(&mut cache, b"xyz"));
    assert!(!dfa2.full_match(&mut cache, b"abc"));
    Ok(())
}

#[test]
#[should_panic]
fn cache_from_other_dfa_panics() {
    let dfa1 = DFA::new("abc").unwrap();
    let dfa2 = DFA::new("abc").unwrap();
    let mut cache = dfa1.create_cache();
    dfa2.full_match(&mut cache, b"abc");
}

// A regex can be shared between threads as long as each one has its own
// copy of the cache.
#[test]
fn clone_per_thread() -> Result<()> {
    let re = Regex::new("a(b|c)+d")?;
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let mut re = re.clone();
            std::thread::spawn(move || {
                let hay = format!("{}abcbd", "x".repeat(i));
                re.find_all_indices(hay.as_bytes())
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(vec![i], handle.join().unwrap());
    }
    Ok(())
}

#[test]
fn clear_count_grows_with_small_capacity() -> Result<()> {
    let mut re = Regex::builder()
        .dfa(DFA::config().cache_capacity(0))
        .build("(a|b)*abb")?;
    let hay = b"abababbbabbabab";
    let small = re.find_all_indices(hay);
    assert!(re.cache().clear_count() > 0);

    let mut big = Regex::new("(a|b)*abb")?;
    assert_eq!(big.find_all_indices(hay), small);
    assert_eq!(0, big.cache().clear_count());
    Ok(())
}

#[test]
fn states_are_only_built_on_demand() -> Result<()> {
    let mut re = Regex::new("abcdefgh")?;
    // Only the dead state exists before any search.
    assert_eq!(1, re.cache().state_len());
    assert!(re.full_match(b"abcdefgh"));
    let after_match = re.cache().state_len();
    // One state per prefix plus the start state.
    assert!(after_match >= 9);
    assert!(!re.full_match(b"abcdefgx"));
    // The only new state (if any) is the dead state, which already exists.
    assert_eq!(after_match, re.cache().state_len());
    Ok(())
}

/// A pattern drawn from a tiny alphabet so that random haystacks have a
/// good chance of containing matches.
#[derive(Clone, Debug)]
struct Pattern(String);

impl Arbitrary for Pattern {
    fn arbitrary(g: &mut Gen) -> Pattern {
        let depth = usize::arbitrary(g) % 4;
        Pattern(expr(g, depth))
    }
}

fn expr(g: &mut Gen, depth: usize) -> String {
    if depth == 0 {
        return g.choose(&["a", "b", "."]).copied().unwrap_or("a").to_string();
    }
    match u8::arbitrary(g) % 6 {
        0 => expr(g, 0),
        1 => format!("{}{}", expr(g, depth - 1), expr(g, depth - 1)),
        2 => format!("{}|{}", expr(g, depth - 1), expr(g, depth - 1)),
        3 => format!("({})*", expr(g, depth - 1)),
        4 => format!("({})+", expr(g, depth - 1)),
        _ => format!("({})?", expr(g, depth - 1)),
    }
}

/// A short haystack over the same alphabet as `Pattern`, plus one byte
/// that never appears in a pattern.
#[derive(Clone, Debug)]
struct Haystack(Vec<u8>);

impl Arbitrary for Haystack {
    fn arbitrary(g: &mut Gen) -> Haystack {
        let len = usize::arbitrary(g) % 9;
        let bytes = (0..len)
            .map(|_| *g.choose(b"ab.z").unwrap_or(&b'a'))
            .collect();
        Haystack(bytes)
    }
}

/// Full matching by simulating the NFA directly, one set of states at a
/// time. This shares nothing with the lazy DFA beyond the NFA itself.
fn nfa_full_match(nfa: &NFA, haystack: &[u8]) -> bool {
    fn closure(nfa: &NFA, set: &mut Vec<bool>) {
        let mut stack: Vec<usize> =
            (0..set.len()).filter(|&i| set[i]).collect();
        while let Some(i) = stack.pop() {
            if let State::Split { alt1, alt2 } = nfa.states()[i] {
                for &alt in &[alt1, alt2] {
                    if !set[alt.as_usize()] {
                        set[alt.as_usize()] = true;
                        stack.push(alt.as_usize());
                    }
                }
            }
        }
    }

    let mut set = vec![false; nfa.len()];
    set[nfa.start().as_usize()] = true;
    closure(nfa, &mut set);
    for &b in haystack {
        let mut next = vec![false; nfa.len()];
        for (i, &on) in set.iter().enumerate() {
            if !on {
                continue;
            }
            if let Some(sid) = nfa.states()[i].next_on(b) {
                next[sid.as_usize()] = true;
            }
        }
        closure(nfa, &mut next);
        set = next;
    }
    set[nfa.match_id().as_usize()]
}

quickcheck! {
    fn prop_full_match_agrees_with_nfa(p: Pattern, h: Haystack) -> bool {
        let mut re = Regex::new(&p.0).unwrap();
        let nfa = re.dfa().nfa().clone();
        re.full_match(&h.0) == nfa_full_match(&nfa, &h.0)
    }

    fn prop_find_iter_agrees_with_full_match(
        p: Pattern,
        h: Haystack
    ) -> bool {
        let mut re = Regex::new(&p.0).unwrap();
        let got: Vec<Match> = re.find_iter(&h.0).collect();

        let mut naive = Regex::new(&p.0).unwrap();
        let mut expected = vec![];
        for i in 0..=h.0.len() {
            for j in i..=h.0.len() {
                if naive.full_match(&h.0[i..j]) {
                    expected.push(Match::new(i, j));
                }
            }
        }
        got == expected
    }

    fn prop_find_all_and_indices_correspond(
        p: Pattern,
        h: Haystack
    ) -> bool {
        let mut re = Regex::new(&p.0).unwrap();
        let all = re.find_all(&h.0);
        let idx = re.find_all_indices(&h.0);
        all.len() == idx.len()
            && all
                .iter()
                .zip(idx.iter())
                .all(|(s, &i)| &h.0[i..i + s.len()] == *s)
    }

    fn prop_verdicts_are_monotonic(
        p: Pattern,
        h1: Haystack,
        h2: Haystack
    ) -> bool {
        let mut re = Regex::new(&p.0).unwrap();
        let before = re.full_match(&h1.0);
        re.find_all(&h2.0);
        re.find_all(&h1.0);
        before == re.full_match(&h1.0)
    }

    fn prop_small_cache_agrees(p: Pattern, h: Haystack) -> TestResult {
        let config = dfa::Config::new().cache_capacity(0);
        let mut small = match Regex::builder().dfa(config).build(&p.0) {
            Ok(re) => re,
            Err(_) => return TestResult::discard(),
        };
        let mut big = Regex::new(&p.0).unwrap();
        TestResult::from_bool(
            small.find_all_indices(&h.0) == big.find_all_indices(&h.0)
                && small.full_match(&h.0) == big.full_match(&h.0),
        )
    }
}
