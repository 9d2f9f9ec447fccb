/*!
A small regular expression engine built from Thompson's construction and a
lazily determinized DFA.

A pattern is parsed into postfix notation, compiled into a Thompson NFA and
then matched by a hybrid NFA/DFA: DFA states are subsets of NFA states that
are computed on demand the first time a particular byte is observed from a
particular state, and then cached for every later search.

The pattern language is deliberately small. It consists of literal bytes,
concatenation, alternation (`|`), grouping (`()`) and the repetition
operators `*`, `+` and `?`. There are no character classes, anchors,
escapes or capturing groups. Every byte that isn't an operator is a literal,
including `.`.

# Matching semantics

The core operation is a *full* match: the automaton must consume the entire
haystack and end in an accepting state. Searching for occurrences inside a
larger haystack is built on top of this by enumerating every `(start, end)`
pair of offsets, in increasing order of `start` and then `end`, and reporting
each pair whose substring full-matches. Overlapping and nested matches are
all reported.

# Example

```
let mut re = regex_lazy::compile("(w|m)i*ld")?;
let hay = b"The wiiiiiiiiiild wild cat lived in a mild climate.";

assert!(re.full_match(b"wiiild"));
assert!(!re.full_match(b"wiiil"));
assert_eq!(
    vec![&b"wiiiiiiiiiild"[..], &b"wild"[..], &b"mild"[..]],
    re.find_all(hay),
);
assert_eq!(vec![4, 18, 38], re.find_all_indices(hay));

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Crate features

* **std** - Enables the `std::error::Error` impl for
  [`CompileError`] and uses a hash map for the DFA state cache. Without it,
  a `BTreeMap` is used instead.
* **logging** - Emits `log` messages while building NFAs and lazy DFA
  states. This is mostly useful when working on this crate itself.
*/

#![deny(missing_docs)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use crate::{
    hybrid::regex::Regex,
    nfa::thompson::CompileError,
    util::matchtypes::Match,
};

#[macro_use]
mod macros;

pub mod hybrid;
pub mod nfa;
pub mod util;

/// Compile the given pattern into a [`Regex`] using the default
/// configuration.
///
/// This is a convenience for [`Regex::new`]. If the pattern is malformed,
/// then the reason is reported as a [`CompileError`] and no regex is
/// produced.
///
/// # Example
///
/// ```
/// use regex_lazy::CompileError;
///
/// let mut re = regex_lazy::compile("h(i|ello)")?;
/// assert!(re.full_match(b"hello"));
/// assert!(!re.full_match(b"ello"));
///
/// assert_eq!(
///     CompileError::EmptyAlternative,
///     regex_lazy::compile("|abc").unwrap_err(),
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn compile(pattern: &str) -> Result<Regex, CompileError> {
    Regex::new(pattern)
}
