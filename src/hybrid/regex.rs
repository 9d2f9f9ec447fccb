/*!
A lazy DFA backed `Regex`.

This module provides [`Regex`], which bundles a lazy DFA together with the
cache it searches with. A `Regex` implements the convenience routines you
might have come to expect: testing whether a haystack matches in full,
testing whether the pattern occurs anywhere in a haystack, and enumerating
every substring that matches.

See the [parent module](crate::hybrid) for examples.
*/

use alloc::vec::Vec;

use crate::{
    hybrid::{
        dfa::{self, Cache, DFA},
        search::FindMatches,
    },
    nfa::thompson::{self, CompileError},
};

/// A regular expression that uses a hybrid NFA/DFA (also called a "lazy
/// DFA") for searching.
///
/// A `Regex` owns both its lazy DFA and the [`Cache`] that the DFA fills in
/// as it is searched. Every search routine therefore takes `&mut self`: the
/// cache grows as new bytes are observed, and a search may only run while no
/// other search is using the same cache. To share one `Regex` between
/// threads, wrap it in a `Mutex`, or give each thread its own clone.
///
/// # Matching semantics
///
/// [`Regex::full_match`] reports whether an entire haystack matches. Every
/// other routine is defined in terms of it: a substring `haystack[i..j]` is a
/// match if and only if it is a full match, and the search routines report
/// every such substring for `0 <= i <= j <= haystack.len()`.
///
/// # Example
///
/// ```
/// use regex_lazy::{hybrid::regex::Regex, Match};
///
/// let mut re = Regex::new("ab+")?;
/// assert!(re.full_match(b"abbb"));
/// assert!(!re.full_match(b"xabbb"));
/// assert!(re.is_match(b"xabbb"));
///
/// let matches: Vec<Match> = re.find_iter(b"xabb").collect();
/// assert_eq!(vec![Match::new(1, 3), Match::new(1, 4)], matches);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Regex {
    dfa: DFA,
    cache: Cache,
}

impl Regex {
    /// Parse the given pattern using the default configuration and return
    /// the corresponding regex.
    ///
    /// If you want a non-default configuration, then use the [`Builder`] to
    /// set your own configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use regex_lazy::{hybrid::regex::Regex, CompileError};
    ///
    /// let mut re = Regex::new("h(i|ello)")?;
    /// assert!(re.full_match(b"hello"));
    ///
    /// assert_eq!(CompileError::EmptyGroup, Regex::new("()").unwrap_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(pattern: &str) -> Result<Regex, CompileError> {
        Regex::builder().build(pattern)
    }

    /// Return a builder for configuring the construction of a `Regex`.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Returns true if and only if the entire haystack matches this regex.
    ///
    /// The empty haystack matches exactly when the regex matches the empty
    /// string.
    ///
    /// # Example
    ///
    /// ```
    /// use regex_lazy::hybrid::regex::Regex;
    ///
    /// let mut re = Regex::new("a*")?;
    /// assert!(re.full_match(b""));
    /// assert!(re.full_match(b"aaa"));
    /// assert!(!re.full_match(b"aab"));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn full_match(&mut self, haystack: &[u8]) -> bool {
        self.dfa.full_match(&mut self.cache, haystack)
    }

    /// Returns true if and only if some substring of the haystack (including
    /// possibly the empty substring) fully matches this regex.
    ///
    /// This stops at the first match found.
    ///
    /// # Example
    ///
    /// ```
    /// use regex_lazy::hybrid::regex::Regex;
    ///
    /// let mut re = Regex::new("wi+ld")?;
    /// assert!(re.is_match(b"a wiiild cat"));
    /// assert!(!re.is_match(b"a mild cat"));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn is_match(&mut self, haystack: &[u8]) -> bool {
        self.find_iter(haystack).next().is_some()
    }

    /// Returns an iterator over every substring of the haystack that fully
    /// matches this regex.
    ///
    /// Matches are yielded in increasing order of start offset, and then in
    /// increasing order of end offset. Overlapping and nested matches are
    /// all reported. See [`FindMatches`] for details.
    pub fn find_iter<'r, 'h>(
        &'r mut self,
        haystack: &'h [u8],
    ) -> FindMatches<'r, 'r, 'h> {
        FindMatches::new(&self.dfa, &mut self.cache, haystack)
    }

    /// Returns every substring of the haystack that fully matches this
    /// regex, in the order reported by [`Regex::find_iter`].
    ///
    /// # Example
    ///
    /// ```
    /// use regex_lazy::hybrid::regex::Regex;
    ///
    /// let mut re = Regex::new("(w|m)i*ld")?;
    /// let hay = b"The wiiiiiiiiiild wild cat lived in a mild climate.";
    /// let expected = vec![&b"wiiiiiiiiiild"[..], &b"wild"[..], &b"mild"[..]];
    /// assert_eq!(expected, re.find_all(hay));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn find_all<'h>(&mut self, haystack: &'h [u8]) -> Vec<&'h [u8]> {
        self.find_iter(haystack).map(|m| &haystack[m.range()]).collect()
    }

    /// Returns the start offset of every substring of the haystack that
    /// fully matches this regex.
    ///
    /// The offsets correspond one-to-one, and in the same order, with the
    /// substrings returned by [`Regex::find_all`].
    ///
    /// # Example
    ///
    /// ```
    /// use regex_lazy::hybrid::regex::Regex;
    ///
    /// let mut re = Regex::new("(w|m)i*ld")?;
    /// let hay = b"The wiiiiiiiiiild wild cat lived in a mild climate.";
    /// assert_eq!(vec![4, 18, 38], re.find_all_indices(hay));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn find_all_indices(&mut self, haystack: &[u8]) -> Vec<usize> {
        self.find_iter(haystack).map(|m| m.start()).collect()
    }

    /// Returns the lazy DFA used by this regex.
    pub fn dfa(&self) -> &DFA {
        &self.dfa
    }

    /// Returns the cache used by this regex, with every state computed by
    /// its searches so far.
    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Discard every state computed by this regex's searches so far.
    pub fn reset_cache(&mut self) {
        self.cache.reset(&self.dfa);
    }

    /// Returns the heap memory usage, in bytes, of this regex, including its
    /// cache.
    pub fn memory_usage(&self) -> usize {
        self.dfa.memory_usage() + self.cache.memory_usage()
    }
}

/// A builder for a regex based on a hybrid NFA/DFA.
///
/// This builder permits configuring options for the NFA construction (via
/// [`Builder::thompson`]) and the lazy DFA (via [`Builder::dfa`]).
///
/// # Example
///
/// ```
/// use regex_lazy::{hybrid::regex::Regex, nfa::thompson, CompileError};
///
/// let result = Regex::builder()
///     .thompson(thompson::Config::new().max_pattern_len(8))
///     .build("abcdefgh");
/// assert_eq!(CompileError::PatternTooLong, result.unwrap_err());
/// ```
#[derive(Clone, Debug)]
pub struct Builder {
    dfa: dfa::Builder,
}

impl Builder {
    /// Create a new regex builder with the default configuration.
    pub fn new() -> Builder {
        Builder { dfa: DFA::builder() }
    }

    /// Build a regex from the given pattern.
    ///
    /// If there was a problem parsing or compiling the pattern, then an
    /// error is returned.
    pub fn build(&self, pattern: &str) -> Result<Regex, CompileError> {
        let dfa = self.dfa.build(pattern)?;
        Ok(self.build_from_dfa(dfa))
    }

    /// Build a regex from the given lazy DFA, with a fresh cache.
    pub fn build_from_dfa(&self, dfa: DFA) -> Regex {
        let cache = dfa.create_cache();
        Regex { dfa, cache }
    }

    /// Set the Thompson NFA configuration for this builder using
    /// [`nfa::thompson::Config`](thompson::Config).
    pub fn thompson(&mut self, config: thompson::Config) -> &mut Builder {
        self.dfa.thompson(config);
        self
    }

    /// Set the lazy DFA compilation configuration for this builder using
    /// [`dfa::Config`](dfa::Config).
    pub fn dfa(&mut self, config: dfa::Config) -> &mut Builder {
        self.dfa.configure(config);
        self
    }
}

impl Default for Builder {
    fn default() -> Builder {
        Builder::new()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn canonical_example() {
        let mut re = Regex::new("(w|m)i*ld").unwrap();
        let hay = b"The wiiiiiiiiiild wild cat lived in a mild climate.";
        let all = re.find_all(hay);
        let idx = re.find_all_indices(hay);
        let expected = vec![&b"wiiiiiiiiiild"[..], &b"wild"[..], &b"mild"[..]];
        assert_eq!(expected, all);
        assert_eq!(vec![4, 18, 38], idx);
        for (s, &i) in all.iter().zip(idx.iter()) {
            assert_eq!(*s, &hay[i..i + s.len()]);
        }
    }

    #[test]
    fn verdicts_are_stable() {
        let mut re = Regex::new("h(i|ello)").unwrap();
        assert!(re.full_match(b"hello"));
        assert!(!re.full_match(b"ello"));
        re.find_all(b"hi hello hell hi");
        assert!(re.full_match(b"hello"));
        assert!(!re.full_match(b"ello"));
        re.reset_cache();
        assert!(re.full_match(b"hi"));
    }

    #[test]
    fn is_match_short_circuits() {
        let mut re = Regex::new("b").unwrap();
        assert!(re.is_match(b"aaab"));
        assert!(!re.is_match(b"aaaa"));
        assert!(!re.is_match(b""));
        let mut re = Regex::new("b?").unwrap();
        assert!(re.is_match(b""));
    }

    #[test]
    fn dfa_config_flows_through() {
        let mut re = Regex::builder()
            .dfa(dfa::Config::new().cache_capacity(0))
            .build("a+b")
            .unwrap();
        assert_eq!(vec![0, 1, 2], re.find_all_indices(b"aaab"));
        assert!(re.cache().clear_count() > 0);
    }

    #[test]
    fn memory_usage_includes_cache() {
        let mut re = Regex::new("abc").unwrap();
        let before = re.memory_usage();
        re.find_all(b"abcabc");
        assert!(re.memory_usage() > before);
    }
}
