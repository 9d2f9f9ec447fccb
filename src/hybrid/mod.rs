/*!
A module for building and searching with lazy DFAs (also called "hybrid
NFA/DFAs").

A lazy DFA is a DFA whose states are computed on demand during a search. Each
state is the set of Thompson NFA states reachable after some prefix of the
input, so the DFA never holds more states than a search has actually needed.
Computed states and their transitions live in a [`dfa::Cache`], which means
that repeated searches get faster as the cache warms up.

This module has two layers:

* [`dfa::DFA`] is the low level automaton. It exposes the start state and the
  transition function, and requires callers to pass their own
  [`dfa::Cache`] to every routine.
* [`regex::Regex`] bundles a DFA with its cache and provides full matching
  along with exhaustive substring search.

# Example

```
use regex_lazy::{hybrid::regex::Regex, Match};

let mut re = Regex::new("a(b|c)*")?;
assert!(re.full_match(b"abccb"));

let matches: Vec<Match> = re.find_iter(b"xabc").collect();
assert_eq!(
    vec![Match::new(1, 2), Match::new(1, 3), Match::new(1, 4)],
    matches,
);

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

pub use self::{id::LazyStateID, search::FindMatches};

pub mod dfa;
mod id;
pub mod regex;
mod search;
