use alloc::{vec, vec::Vec};

use crate::util::id::StateID;

/// An insertion ordered set of NFA states, used for computing epsilon
/// closures.
///
/// Membership is tracked with an epoch stamp per NFA state instead of a
/// boolean. A state is a member if and only if its stamp equals the set's
/// current epoch, so clearing the set only requires bumping the epoch. This
/// supports constant time insertion, membership testing and clearing, and
/// iteration yields elements in the order in which they were inserted.
///
/// Like the sparse sets used elsewhere for the same purpose, the capacity is
/// fixed to the number of states in the NFA. Inserting a state ID that is
/// outside the capacity results in a panic.
#[derive(Clone)]
pub(crate) struct StateSet {
    /// The current epoch. Zero is never a valid epoch, so a freshly zeroed
    /// stamp table means every state is absent.
    epoch: u32,
    /// Members in the order in which they were inserted.
    dense: Vec<StateID>,
    /// The epoch at which each state was last inserted.
    stamps: Vec<u32>,
}

impl StateSet {
    /// Create a new state set with the given capacity.
    ///
    /// This panics if the capacity given is bigger than `StateID::LIMIT`.
    pub(crate) fn new(capacity: usize) -> StateSet {
        let mut set = StateSet { epoch: 1, dense: vec![], stamps: vec![] };
        set.resize(capacity);
        set
    }

    /// Resizes this set to have the new capacity given.
    ///
    /// This set is automatically cleared.
    ///
    /// This panics if the capacity given is bigger than `StateID::LIMIT`.
    pub(crate) fn resize(&mut self, new_capacity: usize) {
        assert!(
            new_capacity <= StateID::LIMIT,
            "state set capacity cannot exceed {:?}",
            StateID::LIMIT
        );
        self.dense.clear();
        self.stamps.clear();
        self.stamps.resize(new_capacity, 0);
        self.epoch = 1;
    }

    /// Insert the state ID value into this set and return true if the given
    /// state ID was not previously in this set.
    ///
    /// This panics if the given ID is not less than the capacity of this
    /// set.
    pub(crate) fn insert(&mut self, id: StateID) -> bool {
        if self.contains(id) {
            return false;
        }
        self.stamps[id] = self.epoch;
        self.dense.push(id);
        true
    }

    /// Returns true if and only if this set contains the given value.
    pub(crate) fn contains(&self, id: StateID) -> bool {
        self.stamps.get(id.as_usize()).map_or(false, |&s| s == self.epoch)
    }

    /// Clear this set such that it has no members.
    ///
    /// On the rare occasion that the epoch wraps around, every stamp is
    /// zeroed so that stale stamps from a previous cycle can't alias.
    pub(crate) fn clear(&mut self) {
        self.dense.clear();
        self.epoch = self.epoch.wrapping_add(1);
        if self.epoch == 0 {
            for stamp in self.stamps.iter_mut() {
                *stamp = 0;
            }
            self.epoch = 1;
        }
    }

    /// Returns the members of this set in insertion order.
    pub(crate) fn as_slice(&self) -> &[StateID] {
        &self.dense
    }

    /// Returns an iterator over all members in insertion order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = StateID> + '_ {
        self.dense.iter().copied()
    }

    /// Returns the heap memory usage, in bytes, used by this set.
    pub(crate) fn memory_usage(&self) -> usize {
        (self.dense.capacity() * StateID::SIZE)
            + (self.stamps.len() * core::mem::size_of::<u32>())
    }
}

impl core::fmt::Debug for StateSet {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_tuple("StateSet").field(&self.as_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sid(id: usize) -> StateID {
        StateID::must(id)
    }

    #[test]
    fn insertion_order() {
        let mut set = StateSet::new(10);
        assert!(set.insert(sid(5)));
        assert!(set.insert(sid(1)));
        assert!(!set.insert(sid(5)));
        assert!(set.insert(sid(9)));
        assert_eq!(&[sid(5), sid(1), sid(9)], set.as_slice());
        assert_eq!(3, set.as_slice().len());
        assert!(set.contains(sid(1)));
        assert!(!set.contains(sid(2)));
    }

    #[test]
    fn clear_bumps_epoch() {
        let mut set = StateSet::new(4);
        set.insert(sid(0));
        set.insert(sid(3));
        set.clear();
        assert!(set.as_slice().is_empty());
        assert!(!set.contains(sid(0)));
        assert!(set.insert(sid(3)));
        assert_eq!(&[sid(3)], set.as_slice());
    }

    #[test]
    fn epoch_wraps() {
        let mut set = StateSet::new(2);
        set.insert(sid(1));
        set.epoch = core::u32::MAX;
        set.stamps[1] = core::u32::MAX;
        assert!(set.contains(sid(1)));
        set.clear();
        assert_eq!(1, set.epoch);
        assert!(!set.contains(sid(1)));
        assert!(set.insert(sid(1)));
    }

    #[test]
    #[should_panic]
    fn insert_out_of_bounds() {
        let mut set = StateSet::new(2);
        set.insert(sid(2));
    }

    #[test]
    fn capacity() {
        let mut set = StateSet::new(3);
        assert_eq!(3, set.stamps.len());
        set.insert(sid(2));
        set.resize(7);
        assert_eq!(7, set.stamps.len());
        assert!(set.as_slice().is_empty());
        assert!(set.insert(sid(6)));
    }
}
