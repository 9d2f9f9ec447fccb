/*!
The span type reported by substring searches.

Searches report every span whose substring is a full match, so spans may
overlap, nest or be empty:

```
use regex_lazy::Match;

let mut re = regex_lazy::compile("a*")?;
let spans: Vec<Match> = re.find_iter(b"aa").collect();
assert_eq!(
    vec![
        Match::new(0, 0),
        Match::new(0, 1),
        Match::new(0, 2),
        Match::new(1, 1),
        Match::new(1, 2),
        Match::new(2, 2),
    ],
    spans,
);
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

/// A representation of a match reported by a substring search.
///
/// A match records the start and end offsets of the match in the haystack.
/// Since searches report every substring that matches, matches may overlap
/// or nest, and a match may be empty when the regex accepts the empty
/// string.
///
/// Every match guarantees that `start <= end`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Match {
    /// The start offset of the match, inclusive.
    start: usize,
    /// The end offset of the match, exclusive.
    end: usize,
}

impl Match {
    /// Create a new match from a byte offset span.
    ///
    /// # Panics
    ///
    /// This panics if `end < start`.
    #[inline]
    pub fn new(start: usize, end: usize) -> Match {
        assert!(start <= end);
        Match { start, end }
    }

    /// The starting position of the match.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// The ending position of the match.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns the match location as a range.
    #[inline]
    pub fn range(&self) -> core::ops::Range<usize> {
        self.start..self.end
    }

    /// Returns the length, in bytes, of this match.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if and only if this match is empty. That is, when
    /// `start() == end()`.
    ///
    /// An empty match can only be returned when the regex matches the empty
    /// string.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span() {
        let m = Match::new(4, 8);
        assert_eq!(4, m.len());
        assert_eq!(4..8, m.range());
        assert!(!m.is_empty());
        assert!(Match::new(3, 3).is_empty());
    }

    #[test]
    #[should_panic]
    fn backwards() {
        Match::new(5, 4);
    }
}
