/*!
The identifier of a Thompson NFA state.

An NFA keeps its states in one `Vec`, and a [`StateID`] is an index into it.
Lazy DFA states use [`LazyStateID`](crate::hybrid::LazyStateID) instead,
which reserves some of its bits for tags.
*/

use core::{convert::TryFrom, ops};

use alloc::vec::Vec;

/// An index into the states of a Thompson NFA.
///
/// Its value never exceeds [`StateID::MAX`], so it always fits in a `u32`
/// and a `usize`. Slices and vectors may be indexed by a `StateID`
/// directly.
#[repr(transparent)]
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord,
)]
pub struct StateID(u32);

impl StateID {
    /// The maximum state ID value.
    pub const MAX: StateID =
        StateID::new_unchecked(core::i32::MAX as usize - 1);

    /// The total number of states that are allowed in any single NFA.
    pub const LIMIT: usize = StateID::MAX.as_usize() + 1;

    /// The zero state ID value.
    pub const ZERO: StateID = StateID::new_unchecked(0);

    /// The number of bytes that a single `StateID` uses in memory.
    pub const SIZE: usize = core::mem::size_of::<StateID>();

    /// Returns the ID for index `id`, or an error if it exceeds
    /// [`StateID::MAX`].
    #[inline]
    pub fn new(id: usize) -> Result<StateID, StateIDError> {
        StateID::try_from(id)
    }

    /// Like [`StateID::new`], but truncates instead of checking. An
    /// out-of-range value yields a wrong ID, never undefined behavior.
    #[inline]
    pub const fn new_unchecked(id: usize) -> StateID {
        StateID(id as u32)
    }

    /// Like [`StateID::new`], but panics if the given ID is not valid.
    #[inline]
    pub fn must(id: usize) -> StateID {
        StateID::new(id).unwrap()
    }

    /// Return this state ID as a `usize`.
    #[inline]
    pub const fn as_usize(&self) -> usize {
        self.0 as usize
    }

    /// Returns an iterator over all state IDs from 0 up to and not including
    /// the given length.
    ///
    /// If the given length exceeds [`StateID::LIMIT`], then this panics.
    pub(crate) fn iter(len: usize) -> StateIDIter {
        assert!(
            len <= StateID::LIMIT,
            "cannot create iterator with IDs when number of \
             elements exceed {:?}",
            StateID::LIMIT,
        );
        StateIDIter { rng: 0..len }
    }
}

impl TryFrom<usize> for StateID {
    type Error = StateIDError;

    #[inline]
    fn try_from(id: usize) -> Result<StateID, StateIDError> {
        if id > StateID::MAX.as_usize() {
            return Err(StateIDError { attempted: id as u64 });
        }
        Ok(StateID::new_unchecked(id))
    }
}

/// The error returned for an index too big to be a [`StateID`].
///
/// The NFA compiler reports it as
/// [`CompileError::PatternTooLong`](crate::CompileError::PatternTooLong).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StateIDError {
    attempted: u64,
}

impl StateIDError {
    /// The index that didn't fit.
    pub fn attempted(&self) -> u64 {
        self.attempted
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StateIDError {}

impl core::fmt::Display for StateIDError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "failed to create StateID from {:?}, which exceeds {:?}",
            self.attempted(),
            StateID::MAX,
        )
    }
}

/// An iterator over a contiguous range of state IDs.
#[derive(Clone, Debug)]
pub(crate) struct StateIDIter {
    rng: ops::Range<usize>,
}

impl Iterator for StateIDIter {
    type Item = StateID;

    fn next(&mut self) -> Option<StateID> {
        // 'StateID::iter' checked the range fits.
        self.rng.next().map(StateID::new_unchecked)
    }
}

impl<T> ops::Index<StateID> for [T] {
    type Output = T;

    #[inline]
    fn index(&self, index: StateID) -> &T {
        &self[index.as_usize()]
    }
}

impl<T> ops::IndexMut<StateID> for [T] {
    #[inline]
    fn index_mut(&mut self, index: StateID) -> &mut T {
        &mut self[index.as_usize()]
    }
}

impl<T> ops::Index<StateID> for Vec<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: StateID) -> &T {
        &self[index.as_usize()]
    }
}

impl<T> ops::IndexMut<StateID> for Vec<T> {
    #[inline]
    fn index_mut(&mut self, index: StateID) -> &mut T {
        &mut self[index.as_usize()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_id_limits() {
        assert!(StateID::new(StateID::MAX.as_usize()).is_ok());
        let err = StateID::new(StateID::LIMIT).unwrap_err();
        assert_eq!(StateID::LIMIT as u64, err.attempted());
    }

    #[test]
    fn state_id_iter() {
        let ids: Vec<usize> =
            StateID::iter(3).map(|id| id.as_usize()).collect();
        assert_eq!(vec![0, 1, 2], ids);
    }

    #[test]
    fn state_id_index() {
        let v = vec!['a', 'b', 'c'];
        assert_eq!('b', v[StateID::must(1)]);
    }
}
