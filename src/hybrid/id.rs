/// The identifier of a state in a lazy DFA's [`Cache`](super::dfa::Cache).
///
/// Its low bits are the offset of the state's row in the cache's transition
/// table. That is, the ID is "premultiplied" by the alphabet size, so the
/// transition on `byte` out of state `id` lives at `trans[id + byte]`.
///
/// Its three high bits are tags:
///
/// * **unknown** marks a transition that hasn't been computed yet. It is
/// never returned by the public API.
/// * **dead** marks the state with no NFA states in it. Every transition out
/// of it leads back to it, so a walk that reaches it can never match.
/// * **match** marks a state that contains the NFA's match state. A walk
/// over a haystack that ends on such a state is a full match.
///
/// Keeping the tags in the ID lets a search loop check for matches and dead
/// states without loading the state itself.
///
/// An ID is only meaningful to the cache that produced it, and only until
/// that cache is cleared or reset.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord,
)]
pub struct LazyStateID(u32);

impl LazyStateID {
    const TAG_UNKNOWN: u32 = 1 << 31;
    const TAG_DEAD: u32 = 1 << 30;
    const TAG_MATCH: u32 = 1 << 29;

    /// The largest untagged value.
    pub(crate) const MAX: usize = (LazyStateID::TAG_MATCH - 1) as usize;

    /// Returns an untagged ID for the row at offset `id`, or `None` if the
    /// offset would collide with the tag bits.
    #[inline]
    pub(crate) fn new(id: usize) -> Option<LazyStateID> {
        if id > LazyStateID::MAX {
            return None;
        }
        Some(LazyStateID(id as u32))
    }

    /// The placeholder stored for every transition not yet computed.
    #[inline]
    pub(crate) const fn unknown() -> LazyStateID {
        LazyStateID(LazyStateID::TAG_UNKNOWN)
    }

    /// Returns the offset of this state's row, without any tags.
    #[inline]
    pub(crate) fn as_usize_untagged(&self) -> usize {
        (self.0 as usize) & LazyStateID::MAX
    }

    #[inline]
    pub(crate) const fn to_dead(&self) -> LazyStateID {
        LazyStateID(self.0 | LazyStateID::TAG_DEAD)
    }

    #[inline]
    pub(crate) const fn to_match(&self) -> LazyStateID {
        LazyStateID(self.0 | LazyStateID::TAG_MATCH)
    }

    /// Returns true if this ID is the placeholder for a transition that
    /// hasn't been computed yet.
    #[inline]
    pub const fn is_unknown(&self) -> bool {
        self.0 & LazyStateID::TAG_UNKNOWN != 0
    }

    /// Returns true if this is the dead state. No haystack can match once a
    /// walk reaches it.
    #[inline]
    pub const fn is_dead(&self) -> bool {
        self.0 & LazyStateID::TAG_DEAD != 0
    }

    /// Returns true if this state contains the NFA's match state.
    #[inline]
    pub const fn is_match(&self) -> bool {
        self.0 & LazyStateID::TAG_MATCH != 0
    }
}
