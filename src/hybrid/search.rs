use crate::{
    hybrid::{
        dfa::{Cache, DFA},
        id::LazyStateID,
    },
    util::matchtypes::Match,
};

/// An iterator over every substring of a haystack that the DFA fully
/// matches.
///
/// Matches are yielded in increasing order of their start offset, and for
/// equal start offsets, in increasing order of their end offset. Every
/// `(start, end)` pair with `0 <= start <= end <= haystack.len()` whose
/// substring is a full match is reported, so matches may overlap or nest,
/// and empty matches are reported when the regex matches the empty string.
///
/// Rather than running a separate full match for every pair of offsets, the
/// iterator walks the DFA once per start offset and reports every end offset
/// at which the walk is in a match state. A walk stops as soon as it reaches
/// the dead state, since no longer substring can match after that.
///
/// The lifetime parameters are as follows:
///
/// * `'r` represents the lifetime of the lazy DFA.
/// * `'c` represents the lifetime of the lazy DFA's cache.
/// * `'h` represents the lifetime of the haystack being searched.
///
/// This iterator can be created with the
/// [`Regex::find_iter`](crate::hybrid::regex::Regex::find_iter) method.
#[derive(Debug)]
pub struct FindMatches<'r, 'c, 'h> {
    dfa: &'r DFA,
    cache: &'c mut Cache,
    haystack: &'h [u8],
    /// The start offset of the walk in progress.
    start: usize,
    /// The offset of the next byte to feed to the walk in progress.
    at: usize,
    /// The current state of the walk in progress, or None if a walk from
    /// 'start' hasn't begun yet.
    sid: Option<LazyStateID>,
}

impl<'r, 'c, 'h> FindMatches<'r, 'c, 'h> {
    pub(crate) fn new(
        dfa: &'r DFA,
        cache: &'c mut Cache,
        haystack: &'h [u8],
    ) -> FindMatches<'r, 'c, 'h> {
        FindMatches { dfa, cache, haystack, start: 0, at: 0, sid: None }
    }

    /// Returns the haystack being searched.
    pub fn haystack(&self) -> &'h [u8] {
        self.haystack
    }
}

impl<'r, 'c, 'h> Iterator for FindMatches<'r, 'c, 'h> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        loop {
            let sid = match self.sid {
                Some(sid) => sid,
                None => {
                    if self.start > self.haystack.len() {
                        return None;
                    }
                    let sid = self.dfa.start_state(self.cache);
                    self.at = self.start;
                    self.sid = Some(sid);
                    if sid.is_match() {
                        return Some(Match::new(self.start, self.start));
                    }
                    sid
                }
            };
            if sid.is_dead() || self.at >= self.haystack.len() {
                self.start += 1;
                self.sid = None;
                continue;
            }
            let next =
                self.dfa.next_state(self.cache, sid, self.haystack[self.at]);
            self.at += 1;
            self.sid = Some(next);
            if next.is_match() {
                return Some(Match::new(self.start, self.at));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{vec, vec::Vec};

    use super::*;

    fn spans(pattern: &str, haystack: &[u8]) -> Vec<(usize, usize)> {
        let dfa = DFA::new(pattern).unwrap();
        let mut cache = dfa.create_cache();
        FindMatches::new(&dfa, &mut cache, haystack)
            .map(|m| (m.start(), m.end()))
            .collect()
    }

    #[test]
    fn overlapping_and_nested() {
        assert_eq!(vec![(0, 1), (0, 2), (1, 2)], spans("a+", b"aa"));
        assert_eq!(vec![(1, 3), (3, 5)], spans("(a|b)c", b"xacbc"));
    }

    #[test]
    fn empty_matches() {
        assert_eq!(vec![(0, 0), (0, 1), (1, 1)], spans("a*", b"a"));
        assert_eq!(vec![(0, 0)], spans("a?", b""));
        assert_eq!(vec![(0, 0), (1, 1)], spans("a?", b"b"));
    }

    #[test]
    fn match_at_end() {
        assert_eq!(vec![(2, 4)], spans("cd", b"abcd"));
    }

    #[test]
    fn no_matches() {
        assert_eq!(Vec::<(usize, usize)>::new(), spans("z", b"abcd"));
        assert_eq!(Vec::<(usize, usize)>::new(), spans("a", b""));
    }
}
