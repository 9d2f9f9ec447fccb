use core::{fmt, mem};

use alloc::{sync::Arc, vec::Vec};

use crate::{
    nfa::thompson::{compiler::Compiler, error::CompileError},
    util::{escape::DebugByte, id::StateID},
};

/// A Thompson NFA for a single pattern.
///
/// An NFA is a sequence of [`State`]s stored in one arena and addressed by
/// [`StateID`]. It has exactly one start state and exactly one `Match`
/// state. Every other state either consumes one specific byte (`Byte`) or
/// branches without consuming input (`Split`).
///
/// An NFA is immutable once built. Cloning is cheap since the states are
/// shared via reference counting, and all of them are freed together when
/// the last clone is dropped.
///
/// An NFA is usually not searched directly. Instead, it is given to a
/// [`hybrid::dfa::DFA`](crate::hybrid::dfa::DFA), which derives DFA states
/// from sets of NFA states as they are needed.
///
/// # Example
///
/// The `Debug` impl prints every state with its ID. The start state is
/// marked with `>`.
///
/// ```
/// use regex_lazy::nfa::thompson::{State, NFA};
///
/// let nfa = NFA::new("a|b")?;
/// assert_eq!(4, nfa.states().len());
/// assert!(matches!(nfa.state(nfa.start()), State::Split { .. }));
/// assert_eq!(&State::Match, nfa.state(nfa.match_id()));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct NFA(
    // Shared so that the DFA and every regex built on top of it can hang on
    // to the NFA without a deep copy.
    pub(super) Arc<Inner>,
);

impl NFA {
    /// Parse the given pattern using a default configuration and build an
    /// NFA from it.
    ///
    /// If you want a non-default configuration, then use the NFA
    /// [`Compiler`] with a [`Config`](crate::nfa::thompson::Config).
    pub fn new(pattern: &str) -> Result<NFA, CompileError> {
        NFA::compiler().build(pattern)
    }

    /// Return a default configuration for an NFA compiler.
    pub fn compiler() -> Compiler {
        Compiler::new()
    }

    /// Returns the identifier of the start state.
    #[inline]
    pub fn start(&self) -> StateID {
        self.0.start
    }

    /// Returns the identifier of the single `Match` state.
    #[inline]
    pub fn match_id(&self) -> StateID {
        self.0.match_id
    }

    /// Returns the state corresponding to the given ID.
    ///
    /// # Panics
    ///
    /// If the ID does not refer to a valid state, then this panics.
    #[inline]
    pub fn state(&self, id: StateID) -> &State {
        &self.0.states[id]
    }

    /// Returns a slice of all states in this NFA.
    ///
    /// The slice returned may be indexed by any `StateID` reachable from
    /// this NFA's start state.
    #[inline]
    pub fn states(&self) -> &[State] {
        &self.0.states
    }

    /// Returns the total number of states in this NFA.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.states.len()
    }

    /// Returns true if and only if both NFAs are clones of the same NFA.
    pub(crate) fn ptr_eq(&self, other: &NFA) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the heap memory usage, in bytes, of this NFA.
    ///
    /// This does not include the stack size used up by this NFA. To
    /// compute that, use `std::mem::size_of::<NFA>()`.
    #[inline]
    pub fn memory_usage(&self) -> usize {
        mem::size_of::<Inner>() + self.0.states.len() * mem::size_of::<State>()
    }
}

impl fmt::Debug for NFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The "inner" part of the NFA. We split this part out so that we can easily
/// wrap it in an `Arc` above in the definition of `NFA`.
///
/// See builder.rs for the code that actually builds this type.
pub(super) struct Inner {
    /// The state sequence. This sequence is guaranteed to be indexable by the
    /// start and match state IDs, and every transition in it refers to a
    /// state in this sequence.
    pub(super) states: Vec<State>,
    /// The starting state of this NFA.
    pub(super) start: StateID,
    /// The one and only match state of this NFA.
    pub(super) match_id: StateID,
}

impl fmt::Debug for Inner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "thompson::NFA(")?;
        for (sid, state) in StateID::iter(self.states.len()).zip(&self.states)
        {
            let status = if sid == self.start { '>' } else { ' ' };
            writeln!(f, "{}{:06?}: {:?}", status, sid.as_usize(), state)?;
        }
        writeln!(f, ")")?;
        Ok(())
    }
}

/// A state in a Thompson NFA.
#[derive(Clone, Copy, Eq, PartialEq)]
pub enum State {
    /// A state that transitions to `next` if and only if the current input
    /// byte is equal to `byte`.
    Byte {
        /// The byte this state consumes.
        byte: u8,
        /// The state to transition to after consuming `byte`.
        next: StateID,
    },
    /// An alternation with an epsilon transition to each of `alt1` and
    /// `alt2`. Following a split does not consume any input.
    Split {
        /// The first branch, explored first when computing closures.
        alt1: StateID,
        /// The second branch.
        alt2: StateID,
    },
    /// The match state. An NFA has exactly one, and it has no transitions.
    Match,
}

impl State {
    /// Returns true if and only if this state contains one or more epsilon
    /// transitions.
    #[inline]
    pub fn is_epsilon(&self) -> bool {
        match *self {
            State::Split { .. } => true,
            State::Byte { .. } | State::Match => false,
        }
    }

    /// Returns the next state if this is a `Byte` state whose byte equals
    /// the one given.
    #[inline]
    pub fn next_on(&self, input: u8) -> Option<StateID> {
        match *self {
            State::Byte { byte, next } if byte == input => Some(next),
            _ => None,
        }
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            State::Byte { byte, next } => {
                write!(f, "{:?} => {:?}", DebugByte(byte), next.as_usize())
            }
            State::Split { alt1, alt2 } => {
                write!(
                    f,
                    "binary-union({}, {})",
                    alt1.as_usize(),
                    alt2.as_usize()
                )
            }
            State::Match => write!(f, "MATCH"),
        }
    }
}
