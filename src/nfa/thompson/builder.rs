use core::mem;

use alloc::{sync::Arc, vec::Vec};

use crate::{
    nfa::thompson::{
        error::CompileError,
        nfa::{self, NFA},
    },
    util::id::StateID,
};

/// An intermediate NFA state used during construction.
///
/// Thompson's construction creates states before it knows where they lead.
/// Each transition therefore starts out empty and is filled in later by
/// [`Builder::patch`]. Once construction is finished, the builder converts
/// these states to [`nfa::thompson::State`](crate::nfa::thompson::State),
/// at which point every transition must have been filled in.
#[derive(Clone, Debug, Eq, PartialEq)]
enum State {
    /// A state that transitions to `next` on `byte`.
    Byte { byte: u8, next: Option<StateID> },
    /// An epsilon branch to both `alt1` and `alt2`. The preferred branch
    /// always exists when the split is created.
    Split { alt1: StateID, alt2: Option<StateID> },
    /// The match state.
    Match,
}

/// A transition slot on an intermediate state that can be patched.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Slot {
    /// The `next` transition of a `Byte` state.
    Next,
    /// The second branch of a `Split` state.
    Alt2,
}

/// An arena of intermediate NFA states.
///
/// Once a state is added, it is assigned a state ID equivalent to its index.
/// States are expected to be mutated after being added, in order to point
/// them at states that didn't exist when they were added.
#[derive(Clone, Debug, Default)]
pub(crate) struct Builder {
    states: Vec<State>,
}

impl Builder {
    pub(crate) fn new() -> Builder {
        Builder::default()
    }

    pub(crate) fn clear(&mut self) {
        self.states.clear();
    }

    /// Convert the intermediate states into a final NFA with the given start
    /// and match states.
    ///
    /// If any transition slot was never patched, then this returns
    /// [`CompileError::MalformedPostfix`].
    pub(crate) fn build(
        &self,
        start: StateID,
        match_id: StateID,
    ) -> Result<NFA, CompileError> {
        trace!(
            "intermediate NFA compilation via builder is complete, \
             intermediate NFA size: {} states, {} bytes on heap",
            self.states.len(),
            self.memory_usage(),
        );
        let mut states = Vec::with_capacity(self.states.len());
        for state in self.states.iter() {
            let state = match *state {
                State::Byte { byte, next } => {
                    nfa::State::Byte { byte, next: filled(next)? }
                }
                State::Split { alt1, alt2 } => {
                    nfa::State::Split { alt1, alt2: filled(alt2)? }
                }
                State::Match => nfa::State::Match,
            };
            states.push(state);
        }
        let final_nfa = NFA(Arc::new(nfa::Inner { states, start, match_id }));
        trace!(
            "NFA compilation via builder complete, \
             final NFA size: {} states, {} bytes on heap",
            final_nfa.states().len(),
            final_nfa.memory_usage(),
        );
        Ok(final_nfa)
    }

    /// Add a state that consumes `byte`. Its transition is patched later via
    /// `Slot::Next`.
    pub(crate) fn add_byte(
        &mut self,
        byte: u8,
    ) -> Result<StateID, CompileError> {
        self.add(State::Byte { byte, next: None })
    }

    /// Add an epsilon branch. The second branch may be left empty and
    /// patched later via `Slot::Alt2`.
    pub(crate) fn add_split(
        &mut self,
        alt1: StateID,
        alt2: Option<StateID>,
    ) -> Result<StateID, CompileError> {
        self.add(State::Split { alt1, alt2 })
    }

    pub(crate) fn add_match(&mut self) -> Result<StateID, CompileError> {
        self.add(State::Match)
    }

    fn add(&mut self, state: State) -> Result<StateID, CompileError> {
        // A pattern can't produce more states than it has bytes (plus the
        // match state), so running out of IDs means the pattern was too long.
        let id = StateID::new(self.states.len())
            .map_err(|_| CompileError::PatternTooLong)?;
        self.states.push(state);
        Ok(id)
    }

    /// Point the given slot of the state `from` at the state `to`.
    ///
    /// # Panics
    ///
    /// This panics if the slot does not exist on the state, for example,
    /// when patching `Slot::Next` on a `Split` state.
    pub(crate) fn patch(&mut self, from: StateID, slot: Slot, to: StateID) {
        match (&mut self.states[from], slot) {
            (State::Byte { next, .. }, Slot::Next) => {
                *next = Some(to);
            }
            (State::Split { alt2, .. }, Slot::Alt2) => {
                *alt2 = Some(to);
            }
            (state, slot) => {
                panic!("cannot patch {:?} of NFA state {:?}", slot, state)
            }
        }
    }

    /// Returns the heap memory usage, in bytes, used by the NFA states added
    /// so far.
    pub(crate) fn memory_usage(&self) -> usize {
        self.states.len() * mem::size_of::<State>()
    }
}

fn filled(slot: Option<StateID>) -> Result<StateID, CompileError> {
    slot.ok_or(CompileError::MalformedPostfix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_then_build() {
        let mut b = Builder::new();
        let a = b.add_byte(b'a').unwrap();
        let split = b.add_split(a, None).unwrap();
        let m = b.add_match().unwrap();
        b.patch(a, Slot::Next, split);
        b.patch(split, Slot::Alt2, m);
        let nfa = b.build(split, m).unwrap();
        assert_eq!(split, nfa.start());
        assert_eq!(m, nfa.match_id());
        assert_eq!(
            &nfa::State::Split { alt1: a, alt2: m },
            nfa.state(split),
        );
    }

    #[test]
    fn unpatched_slot_is_an_error() {
        let mut b = Builder::new();
        let a = b.add_byte(b'a').unwrap();
        let m = b.add_match().unwrap();
        assert_eq!(CompileError::MalformedPostfix, b.build(a, m).unwrap_err());
    }

    #[test]
    fn unpatched_split_is_an_error() {
        let mut b = Builder::new();
        let a = b.add_byte(b'a').unwrap();
        let split = b.add_split(a, None).unwrap();
        let m = b.add_match().unwrap();
        b.patch(a, Slot::Next, m);
        assert_eq!(
            CompileError::MalformedPostfix,
            b.build(split, m).unwrap_err()
        );
    }

    #[test]
    #[should_panic]
    fn patch_wrong_slot() {
        let mut b = Builder::new();
        let a = b.add_byte(b'a').unwrap();
        b.patch(a, Slot::Alt2, a);
    }

    #[test]
    fn clear() {
        let mut b = Builder::new();
        b.add_match().unwrap();
        assert!(b.memory_usage() > 0);
        b.clear();
        assert_eq!(0, b.memory_usage());
    }
}
