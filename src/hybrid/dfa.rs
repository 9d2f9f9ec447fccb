/*!
Types and routines specific to lazy DFAs.

This module is the home of [`hybrid::dfa::DFA`](DFA). A lazy DFA is built
from a Thompson NFA, but none of its states are computed up front. Instead,
each DFA state is a set of NFA states (the epsilon closure reached after
some prefix of input), and the transition from a DFA state on a particular
byte is computed the first time a search needs it. Every computed state and
transition is stored in a [`Cache`], so the work is done at most once per
cache.

The DFA itself is immutable. All mutable state lives in the cache, which is
passed to every search routine as `&mut Cache`.
*/

use core::{cmp::Ordering, fmt, iter, mem};

use alloc::{sync::Arc, vec, vec::Vec};

use crate::{
    hybrid::id::LazyStateID,
    nfa::thompson::{self, CompileError, NFA},
    util::{escape::DebugByte, id::StateID, state_set::StateSet},
};

/// The number of transitions out of every DFA state: one per byte.
const STRIDE: usize = 1 << STRIDE2;

/// The base 2 logarithm of `STRIDE`. Shifting an untagged lazy state ID right
/// by this amount gives the index of its state.
const STRIDE2: usize = 8;

/// A hybrid NFA/DFA (also called a "lazy DFA") for full matching.
///
/// A lazy DFA is a DFA that builds itself at search time. It shares the
/// worst case linear time guarantee of a DFA without paying for the
/// potentially exponential blowup of subset construction up front: only the
/// states that a search actually visits are ever built.
///
/// A `DFA` can be cheaply cloned and shared between threads. Each thread
/// needs its own [`Cache`], created via [`DFA::create_cache`]. A cache must
/// only be used with the DFA (or a clone of the DFA) that created it.
///
/// # Example
///
/// This walks the DFA by hand, one byte at a time.
///
/// ```
/// use regex_lazy::hybrid::dfa::DFA;
///
/// let dfa = DFA::new("(w|m)i*ld")?;
/// let mut cache = dfa.create_cache();
///
/// let mut sid = dfa.start_state(&mut cache);
/// for &b in b"wiild".iter() {
///     sid = dfa.next_state(&mut cache, sid, b);
/// }
/// assert!(sid.is_match());
///
/// // The same thing, done for us.
/// assert!(dfa.full_match(&mut cache, b"mild"));
/// assert!(!dfa.full_match(&mut cache, b"mildly"));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct DFA {
    nfa: NFA,
    cache_capacity: usize,
}

impl DFA {
    /// Parse the given pattern using a default configuration and return the
    /// corresponding lazy DFA.
    ///
    /// If you want a non-default configuration, then use the [`Builder`] to
    /// set your own configuration.
    pub fn new(pattern: &str) -> Result<DFA, CompileError> {
        DFA::builder().build(pattern)
    }

    /// Return a default configuration for a `DFA`.
    pub fn config() -> Config {
        Config::new()
    }

    /// Return a builder for configuring the construction of a `DFA`.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Create a new cache for this lazy DFA.
    ///
    /// The cache returned should only be used for searches for this lazy
    /// DFA. If you want to reuse the cache for another DFA, then you must
    /// call [`Cache::reset`] with that DFA (or, equivalently,
    /// [`DFA::reset_cache`]).
    pub fn create_cache(&self) -> Cache {
        Cache::new(self)
    }

    /// Reset the given cache such that it can be used for searching with
    /// this lazy DFA (and only this DFA).
    ///
    /// Resetting a cache discards every DFA state it holds. Any lazy state
    /// ID produced by the cache before the reset is invalid afterwards.
    pub fn reset_cache(&self, cache: &mut Cache) {
        Lazy::reset(self, cache)
    }

    /// Returns a reference to the underlying NFA.
    pub fn nfa(&self) -> &NFA {
        &self.nfa
    }

    /// Returns the memory usage, in bytes, of this lazy DFA.
    ///
    /// This does **not** include the stack size used up by this lazy DFA,
    /// nor does it include the memory used by its cache. To compute the
    /// latter, use [`Cache::memory_usage`].
    pub fn memory_usage(&self) -> usize {
        self.nfa.memory_usage()
    }

    /// Return the ID of the start state of this lazy DFA.
    ///
    /// The start state is the epsilon closure of the NFA's start state. It
    /// is computed on the first call and cached thereafter.
    ///
    /// # Panics
    ///
    /// This may panic if the given cache was not created by this DFA (or a
    /// clone of it).
    pub fn start_state(&self, cache: &mut Cache) -> LazyStateID {
        if !cache.start.is_unknown() {
            return cache.start;
        }
        Lazy::new(self, cache).cache_start_state()
    }

    /// Transitions from the current state to the next state, given the next
    /// byte of input.
    ///
    /// The given cache is used to either reuse pre-computed state
    /// transitions, or to store this newly computed transition for future
    /// reuse. Thus, this routine guarantees that it will never return a
    /// state ID that has an "unknown" tag.
    ///
    /// If the returned state is tagged as dead, then no continuation of the
    /// input can lead to a match. If it is tagged as a match state, then the
    /// input seen so far is matched.
    ///
    /// # Panics
    ///
    /// This routine may panic if `current` was not produced by the given
    /// cache, or if the cache was cleared or reset after `current` was
    /// produced.
    #[inline]
    pub fn next_state(
        &self,
        cache: &mut Cache,
        current: LazyStateID,
        input: u8,
    ) -> LazyStateID {
        let offset = current.as_usize_untagged() + usize::from(input);
        let sid = cache.trans[offset];
        if !sid.is_unknown() {
            return sid;
        }
        Lazy::new(self, cache).cache_next_state(current, input)
    }

    /// Returns true if and only if this DFA matches the entire haystack.
    ///
    /// The walk starts at the start state and follows one transition per
    /// byte. It stops early as soon as a dead state is reached, since no
    /// match is possible after that point.
    ///
    /// # Example
    ///
    /// ```
    /// use regex_lazy::hybrid::dfa::DFA;
    ///
    /// let dfa = DFA::new("a*")?;
    /// let mut cache = dfa.create_cache();
    /// assert!(dfa.full_match(&mut cache, b""));
    /// assert!(dfa.full_match(&mut cache, b"aaaa"));
    /// assert!(!dfa.full_match(&mut cache, b"aaab"));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn full_match(&self, cache: &mut Cache, haystack: &[u8]) -> bool {
        let mut sid = self.start_state(cache);
        for &b in haystack.iter() {
            sid = self.next_state(cache, sid, b);
            if sid.is_dead() {
                return false;
            }
        }
        sid.is_match()
    }
}

/// A cache represents a partially computed DFA.
///
/// A cache is the key component that differentiates a classical DFA and a
/// hybrid NFA/DFA (also called a "lazy DFA"). Where a classical DFA builds a
/// complete transition table that can handle all possible inputs, a hybrid
/// NFA/DFA starts with an empty transition table and builds only the parts
/// required during search. The parts that are built are stored in a cache.
///
/// States are only ever added to a cache. The cache is only shrunk by
/// [`Cache::reset`], or automatically when it would otherwise exceed the
/// configured [capacity](Config::cache_capacity). In either case, every
/// state is discarded at once.
///
/// A cache can only be used with the DFA that created it. If you want to
/// use it with another DFA, then reset it with that DFA first.
#[derive(Clone)]
pub struct Cache {
    /// The transition table.
    ///
    /// Given a `current` LazyStateID and an `input` byte, the next state can
    /// be computed via `trans[untagged(current) + input]`. Notice that no
    /// multiplication is used. That's because state identifiers are
    /// "premultiplied."
    ///
    /// Note that the next state may be the "unknown" state. In this case, the
    /// next state is not known and determinization for `current` on `input`
    /// must be performed.
    trans: Vec<LazyStateID>,
    /// The start state, or "unknown" if it hasn't been computed since the
    /// cache was last cleared.
    start: LazyStateID,
    /// A sequence of NFA/DFA powerset states that have been computed for this
    /// lazy DFA. This sequence is indexable by untagged LazyStateIDs shifted
    /// right by `STRIDE2`.
    states: Vec<State>,
    /// A map from states to their corresponding IDs. This is what guarantees
    /// that any two equivalent sets of NFA states share one DFA state.
    states_to_id: StateMap,
    /// Tracks which NFA states have been visited while computing an epsilon
    /// closure.
    set: StateSet,
    /// Scratch space for traversing the NFA graph. (We use space on the heap
    /// instead of the call stack.)
    stack: Vec<StateID>,
    /// Persists at most one state across a cache clearing, so that a search
    /// can continue from the state it was in when the cache filled up.
    state_saver: StateSaver,
    /// The heap memory used by the NFA state sets in 'states'. Tracked as
    /// states are added since each state uses a variable amount of heap.
    memory_usage_state: usize,
    /// The number of times the cache has been cleared since it was created
    /// or last reset.
    clear_count: usize,
    /// The NFA of the DFA this cache belongs to.
    nfa: NFA,
}

impl Cache {
    /// Create a new cache for the given lazy DFA.
    ///
    /// The cache returned should only be used for searches for the given DFA.
    /// If you want to reuse the cache for another DFA, then you must call
    /// [`Cache::reset`] with that DFA.
    pub fn new(dfa: &DFA) -> Cache {
        let mut cache = Cache {
            trans: vec![],
            start: LazyStateID::unknown(),
            states: vec![],
            states_to_id: StateMap::new(),
            set: StateSet::new(dfa.nfa.len()),
            stack: vec![],
            state_saver: StateSaver::None,
            memory_usage_state: 0,
            clear_count: 0,
            nfa: dfa.nfa.clone(),
        };
        Lazy::new(dfa, &mut cache).init_cache();
        cache
    }

    /// Reset this cache such that it can be used for searching with the
    /// given lazy DFA (and only that DFA).
    ///
    /// A cache reset permits reusing memory already allocated in this cache
    /// with a different lazy DFA. Every state in the cache is discarded, and
    /// the clear count is set back to zero.
    pub fn reset(&mut self, dfa: &DFA) {
        Lazy::reset(dfa, self)
    }

    /// Returns the total number of times this cache has been cleared since
    /// it was either created or last reset.
    pub fn clear_count(&self) -> usize {
        self.clear_count
    }

    /// Returns the number of DFA states currently held by this cache.
    ///
    /// This always includes the dead state, so a freshly created or reset
    /// cache has one state.
    pub fn state_len(&self) -> usize {
        self.states.len()
    }

    /// Returns the heap memory usage, in bytes, of this cache.
    ///
    /// This does **not** include the stack size used up by this cache. To
    /// compute that, use `std::mem::size_of::<Cache>()`.
    pub fn memory_usage(&self) -> usize {
        const ID_SIZE: usize = mem::size_of::<LazyStateID>();
        const STATE_SIZE: usize = mem::size_of::<State>();

        self.trans.len() * ID_SIZE
            + self.states.len() * STATE_SIZE
            + self.states_to_id.len() * (STATE_SIZE + ID_SIZE)
            + self.set.memory_usage()
            + self.stack.capacity() * StateID::SIZE
            + self.state_saver.memory_usage()
            + self.memory_usage_state
    }
}

impl fmt::Debug for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "hybrid::Cache(")?;
        for (i, state) in self.states.iter().enumerate() {
            let offset = i << STRIDE2;
            let sid = self.states_to_id.get(state).copied();
            let status = match sid {
                Some(sid) if sid.is_dead() => 'D',
                Some(sid) if sid.is_match() => '*',
                _ => ' ',
            };
            let is_start = !self.start.is_unknown()
                && self.start.as_usize_untagged() == offset;
            let start = if is_start { '>' } else { ' ' };
            write!(f, "{}{}{:06?}: {:?}", status, start, i, state)?;
            if sid.map_or(false, |sid| sid.is_dead()) {
                writeln!(f)?;
                continue;
            }
            let row = &self.trans[offset..offset + STRIDE];
            for (b, next) in (0..=255u8).zip(row.iter()) {
                if next.is_unknown() {
                    continue;
                }
                let index = next.as_usize_untagged() >> STRIDE2;
                write!(f, ", {:?} => {:?}", DebugByte(b), index)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "clear count: {:?}", self.clear_count)?;
        writeln!(f, ")")?;
        Ok(())
    }
}

/// A map from sets of NFA states to the lazy state IDs of their DFA states.
#[cfg(feature = "std")]
type StateMap = std::collections::HashMap<State, LazyStateID>;
#[cfg(not(feature = "std"))]
type StateMap = alloc::collections::BTreeMap<State, LazyStateID>;

/// A single DFA state: the canonical set of NFA states it represents.
///
/// Only NFA states that consume input or match are recorded. `Split` states
/// are followed while computing a closure but never stored, since they have
/// no effect on which transitions leave the set. The IDs are sorted and
/// deduplicated, so two sets with the same members always produce equal
/// states, regardless of the order in which the members were discovered.
///
/// States are ordered by their number of members first, and then
/// lexicographically by member IDs.
#[derive(Clone, Eq, Hash, PartialEq)]
pub(crate) struct State(Arc<[StateID]>);

impl State {
    /// Create a state from a set of NFA state IDs in any order.
    fn new(mut ids: Vec<StateID>) -> State {
        ids.sort_unstable();
        ids.dedup();
        State(Arc::from(ids))
    }

    /// The state with no NFA states at all.
    fn dead() -> State {
        State::new(vec![])
    }

    /// Returns the NFA state IDs in this state, in ascending order.
    fn nfa_ids(&self) -> &[StateID] {
        &self.0
    }

    fn is_dead(&self) -> bool {
        self.0.is_empty()
    }

    fn contains(&self, id: StateID) -> bool {
        self.0.binary_search(&id).is_ok()
    }

    fn memory_usage(&self) -> usize {
        self.0.len() * StateID::SIZE
    }
}

impl Ord for State {
    fn cmp(&self, other: &State) -> Ordering {
        self.0.len().cmp(&other.0.len()).then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &State) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<usize> = self.0.iter().map(|id| id.as_usize()).collect();
        write!(f, "{:?}", ids)
    }
}

/// A type that groups methods that require the base NFA/DFA and writable
/// access to the cache.
#[derive(Debug)]
struct Lazy<'i, 'c> {
    dfa: &'i DFA,
    cache: &'c mut Cache,
}

impl<'i, 'c> Lazy<'i, 'c> {
    /// Creates a new 'Lazy' wrapper for a DFA and its corresponding cache.
    ///
    /// This panics if the cache was created for a different DFA.
    fn new(dfa: &'i DFA, cache: &'c mut Cache) -> Lazy<'i, 'c> {
        assert!(
            cache.nfa.ptr_eq(&dfa.nfa),
            "lazy DFA cache used with a DFA that did not create it \
             (call Cache::reset to reuse a cache with another DFA)",
        );
        Lazy { dfa, cache }
    }

    /// Points the cache at the given DFA and resets it.
    fn reset(dfa: &'i DFA, cache: &'c mut Cache) {
        cache.nfa = dfa.nfa.clone();
        Lazy::new(dfa, cache).reset_cache()
    }

    /// Compute, cache and return the transition out of `current` on
    /// `input`.
    ///
    /// This is marked as 'inline(never)' to keep it out of 'next_state',
    /// which is called once per byte of every search.
    #[inline(never)]
    fn cache_next_state(
        &mut self,
        mut current: LazyStateID,
        input: u8,
    ) -> LazyStateID {
        let state = self.next_state_set(current, input);
        if let Some(&cached) = self.cache.states_to_id.get(&state) {
            self.set_transition(current, input, cached);
            return cached;
        }
        let save_state = !self.state_fits_in_cache(&state);
        if save_state {
            self.save_state(current);
        }
        let next = self.add_state(state);
        if save_state {
            current = self.saved_state_id();
        }
        // This is the payoff. The next time 'next_state' is called with this
        // state and input byte, it will find this transition and avoid
        // having to re-determinize it.
        self.set_transition(current, input, next);
        next
    }

    /// Compute and cache the start state.
    ///
    /// This will never return an unknown lazy state ID.
    fn cache_start_state(&mut self) -> LazyStateID {
        self.cache.set.clear();
        epsilon_closure(
            &self.dfa.nfa,
            self.dfa.nfa.start(),
            &mut self.cache.stack,
            &mut self.cache.set,
        );
        let state = self.collect_state();
        let id = self.intern(state);
        self.cache.start = id;
        id
    }

    /// Follow every transition on `input` out of the NFA states in
    /// `current`, and return the epsilon closure of where they lead.
    fn next_state_set(&mut self, current: LazyStateID, input: u8) -> State {
        let nfa = &self.dfa.nfa;
        let index = current.as_usize_untagged() >> STRIDE2;
        self.cache.set.clear();
        for &id in self.cache.states[index].nfa_ids() {
            if let Some(next) = nfa.state(id).next_on(input) {
                epsilon_closure(
                    nfa,
                    next,
                    &mut self.cache.stack,
                    &mut self.cache.set,
                );
            }
        }
        self.collect_state()
    }

    /// Build a DFA state from the NFA states in the closure set.
    fn collect_state(&self) -> State {
        let nfa = &self.dfa.nfa;
        let ids = self
            .cache
            .set
            .iter()
            .filter(|&id| !nfa.state(id).is_epsilon())
            .collect();
        State::new(ids)
    }

    /// Either add the given state to this cache, or return the ID of an
    /// equivalent state already in this cache.
    fn intern(&mut self, state: State) -> LazyStateID {
        if let Some(&cached_id) = self.cache.states_to_id.get(&state) {
            return cached_id;
        }
        self.add_state(state)
    }

    /// Allocate a new state ID and add the given state to this cache,
    /// clearing the cache first if the state doesn't fit.
    ///
    /// This will never return an unknown lazy state ID.
    fn add_state(&mut self, state: State) -> LazyStateID {
        if !self.state_fits_in_cache(&state) {
            self.clear_cache();
        }
        self.push_state(state, |id| id)
    }

    /// Add the given state to this cache without checking whether it fits.
    ///
    /// The idmap function given may be used to transform the identifier
    /// allocated. This is useful if the caller needs to tag the ID with
    /// additional information.
    fn push_state(
        &mut self,
        state: State,
        idmap: impl Fn(LazyStateID) -> LazyStateID,
    ) -> LazyStateID {
        // Either 'state_fits_in_cache' checked that there is room for one
        // more ID, or the cache was just cleared and holds at most two
        // states.
        let mut id = idmap(
            LazyStateID::new(self.cache.trans.len())
                .expect("lazy DFA cache must have room for one more state"),
        );
        if state.contains(self.dfa.nfa.match_id()) {
            id = id.to_match();
        }
        trace!("adding lazy DFA state {:?} for NFA states {:?}", id, state);
        // Add room in the transition table. Since this is a fresh state, all
        // of its transitions are unknown.
        self.cache
            .trans
            .extend(iter::repeat(LazyStateID::unknown()).take(STRIDE));
        self.cache.memory_usage_state += state.memory_usage();
        self.cache.states.push(state.clone());
        self.cache.states_to_id.insert(state, id);
        id
    }

    /// Returns true if and only if adding the given state wouldn't make the
    /// cache exceed its capacity or run out of lazy state IDs.
    fn state_fits_in_cache(&self, state: &State) -> bool {
        const ID_SIZE: usize = mem::size_of::<LazyStateID>();
        const STATE_SIZE: usize = mem::size_of::<State>();

        if LazyStateID::new(self.cache.trans.len()).is_none() {
            return false;
        }
        let needed = STRIDE * ID_SIZE
            + STATE_SIZE
            + (STATE_SIZE + ID_SIZE)
            + state.memory_usage();
        self.cache.memory_usage().saturating_add(needed)
            <= self.dfa.cache_capacity
    }

    /// Clears _and_ resets the cache. Resetting the cache means that no
    /// states are persisted and the clear count is reset to 0. No heap memory
    /// is released.
    fn reset_cache(&mut self) {
        self.cache.state_saver = StateSaver::None;
        self.clear_cache();
        // A new DFA might have a different number of NFA states, so the
        // closure set must be resized to match.
        self.cache.set.resize(self.dfa.nfa.len());
        self.cache.clear_count = 0;
        debug!("lazy DFA cache has been reset");
    }

    /// Clear the cache used by this lazy DFA.
    ///
    /// If 'self.cache.state_saver' is set to save a state, then this state is
    /// persisted through cache clearing. Otherwise, the cache is returned to
    /// its state after initialization with one exception: its clear count is
    /// incremented. Clearing a cache does _not_ release memory.
    ///
    /// Any lazy state ID generated by the cache prior to clearing it is
    /// invalid after the clear.
    fn clear_cache(&mut self) {
        self.cache.trans.clear();
        self.cache.start = LazyStateID::unknown();
        self.cache.states.clear();
        self.cache.states_to_id.clear();
        self.cache.memory_usage_state = 0;
        self.cache.clear_count += 1;
        debug!(
            "lazy DFA cache has been cleared (count: {})",
            self.cache.clear_count
        );
        self.init_cache();
        if let Some((old_id, state)) = self.cache.state_saver.take_to_save() {
            // Every transition out of the dead state is known, so it is never
            // the state a search is in when the cache fills up.
            assert!(!old_id.is_dead(), "cannot save dead state");
            let new_id = self.push_state(state, |id| id);
            self.cache.state_saver = StateSaver::Saved(new_id);
        }
    }

    /// Initialize this cache from emptiness to a place where it can be used
    /// for search.
    ///
    /// This is called both at cache creation time and after the cache has
    /// been cleared. It adds the dead state, which is the state for the
    /// empty set of NFA states. Every transition out of it leads back to
    /// itself, and since it is interned like any other state, every empty
    /// set computed later maps to this one state.
    fn init_cache(&mut self) {
        let dead_id = self.push_state(State::dead(), |id| id.to_dead());
        for b in 0..=255u8 {
            self.set_transition(dead_id, b, dead_id);
        }
    }

    /// Save the state corresponding to the ID given such that the state
    /// persists through a cache clearing.
    ///
    /// While the state may persist, the ID may not. In order to discover the
    /// new state ID, one must call 'saved_state_id' after a cache clearing.
    fn save_state(&mut self, id: LazyStateID) {
        let index = id.as_usize_untagged() >> STRIDE2;
        let state = self.cache.states[index].clone();
        self.cache.state_saver = StateSaver::ToSave { id, state };
    }

    /// Returns the updated lazy state ID for a state that was persisted
    /// through a cache clearing.
    ///
    /// It is only correct to call this routine when both a state has been
    /// saved and the cache has just been cleared. Otherwise, this panics.
    fn saved_state_id(&mut self) -> LazyStateID {
        self.cache
            .state_saver
            .take_saved()
            .expect("state saver does not have saved state ID")
    }

    /// Set the transition on 'from' for 'input' to 'to'.
    ///
    /// This panics if 'from' is not a state in this cache.
    fn set_transition(
        &mut self,
        from: LazyStateID,
        input: u8,
        to: LazyStateID,
    ) {
        let offset = from.as_usize_untagged() + usize::from(input);
        self.cache.trans[offset] = to;
    }
}

/// Add every NFA state reachable from `start` without consuming input to
/// the given set, including `start` itself.
///
/// The traversal is depth first with an explicit stack, and always explores
/// `alt1` of a split before `alt2`. The set records every state visited, so
/// that no state is explored twice within a single closure even when the NFA
/// has cycles of epsilon transitions. Callers clear the set before starting
/// a new closure, and may call this several times to compute the closure of
/// a set of seeds.
fn epsilon_closure(
    nfa: &NFA,
    start: StateID,
    stack: &mut Vec<StateID>,
    set: &mut StateSet,
) {
    assert!(stack.is_empty());
    stack.push(start);
    while let Some(id) = stack.pop() {
        if !set.insert(id) {
            continue;
        }
        if let thompson::State::Split { alt1, alt2 } = *nfa.state(id) {
            stack.push(alt2);
            stack.push(alt1);
        }
    }
}

/// A simple type that encapsulates the saving of a state ID through a cache
/// clearing.
///
/// A state ID can be marked for saving with ToSave, while a state ID can be
/// saved itself with Saved.
#[derive(Clone, Debug)]
enum StateSaver {
    /// An empty state saver. In this case, no states (other than the dead
    /// state) are preserved after clearing the cache.
    None,
    /// An ID of a state (and the state itself) that should be preserved after
    /// the lazy DFA's cache has been cleared. After clearing, the updated ID
    /// is stored in 'Saved' since it may have changed.
    ToSave { id: LazyStateID, state: State },
    /// An ID that of a state that has been persisted through a lazy DFA
    /// cache clearing. The ID recorded here corresponds to an ID that was
    /// once marked as ToSave. The IDs are likely not equivalent even though
    /// the states they point to are.
    Saved(LazyStateID),
}

impl StateSaver {
    /// Replace this state saver with an empty saver, and if this saver is a
    /// request to save a state, return that request.
    fn take_to_save(&mut self) -> Option<(LazyStateID, State)> {
        match core::mem::replace(self, StateSaver::None) {
            StateSaver::None | StateSaver::Saved(_) => None,
            StateSaver::ToSave { id, state } => Some((id, state)),
        }
    }

    /// Replace this state saver with an empty saver, and if this saver is a
    /// saved state (or a request to save a state), return that state's ID.
    ///
    /// The idea here is that a request to save a state isn't necessarily
    /// honored because it might not be needed. e.g., Some higher level code
    /// might request a state to be saved on the off chance that the cache
    /// gets cleared when a new state is added at a lower level. But if that
    /// new state is never added, then the cache is never cleared and the
    /// state and its ID remain unchanged.
    fn take_saved(&mut self) -> Option<LazyStateID> {
        match core::mem::replace(self, StateSaver::None) {
            StateSaver::None => None,
            StateSaver::Saved(id) | StateSaver::ToSave { id, .. } => Some(id),
        }
    }

    /// Returns the heap memory usage, in bytes, of the state being saved.
    fn memory_usage(&self) -> usize {
        match *self {
            StateSaver::None | StateSaver::Saved(_) => 0,
            StateSaver::ToSave { ref state, .. } => state.memory_usage(),
        }
    }
}

/// The configuration used for building a lazy DFA.
///
/// As a convenience, [`DFA::config`] is an alias for [`Config::new`]. The
/// advantage of the former is that it often lets you avoid importing the
/// `Config` type directly.
///
/// A lazy DFA configuration is a simple data object that is typically used
/// with [`Builder::configure`].
#[derive(Clone, Debug, Default)]
pub struct Config {
    cache_capacity: Option<usize>,
}

impl Config {
    /// Return a new default lazy DFA builder configuration.
    pub fn new() -> Config {
        Config::default()
    }

    /// Sets the maximum amount of heap memory, in bytes, to allocate to the
    /// cache for use during search.
    ///
    /// When a new state would make the cache exceed this capacity, the cache
    /// is cleared (keeping only the state the search is currently in) and
    /// determinization continues from there. Searches always produce correct
    /// results, but a capacity that is too small causes states to be
    /// computed over and over again.
    ///
    /// By default, the capacity is unbounded, so states are only discarded
    /// when the cache runs out of lazy state IDs or when it is explicitly
    /// reset.
    ///
    /// # Example
    ///
    /// ```
    /// use regex_lazy::hybrid::dfa::DFA;
    ///
    /// let dfa = DFA::builder()
    ///     .configure(DFA::config().cache_capacity(0))
    ///     .build("(w|m)i*ld")?;
    /// let mut cache = dfa.create_cache();
    /// assert!(dfa.full_match(&mut cache, b"wiiiild"));
    /// assert!(cache.clear_count() > 0);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn cache_capacity(mut self, bytes: usize) -> Config {
        self.cache_capacity = Some(bytes);
        self
    }

    /// Returns the cache capacity set on this configuration.
    pub fn get_cache_capacity(&self) -> usize {
        self.cache_capacity.unwrap_or(core::usize::MAX)
    }

    /// Overwrite the default configuration such that the options in `o` are
    /// always used. If an option in `o` is not set, then the corresponding
    /// option in `self` is used. If it's not set in `self` either, then it
    /// remains not set.
    fn overwrite(self, o: Config) -> Config {
        Config { cache_capacity: o.cache_capacity.or(self.cache_capacity) }
    }
}

/// A builder for constructing a lazy deterministic finite automaton from a
/// pattern.
///
/// This builder permits configuring options for the NFA construction
/// (via [`Builder::thompson`]) and the lazy DFA itself (via
/// [`Builder::configure`]).
#[derive(Clone, Debug)]
pub struct Builder {
    config: Config,
    thompson: thompson::Compiler,
}

impl Builder {
    /// Create a new lazy DFA builder with the default configuration.
    pub fn new() -> Builder {
        Builder {
            config: Config::default(),
            thompson: thompson::Compiler::new(),
        }
    }

    /// Build a lazy DFA from the given pattern.
    ///
    /// If there was a problem parsing or compiling the pattern, then an
    /// error is returned.
    pub fn build(&self, pattern: &str) -> Result<DFA, CompileError> {
        let nfa = self.thompson.build(pattern)?;
        Ok(self.build_from_nfa(nfa))
    }

    /// Build a lazy DFA from the given NFA.
    ///
    /// Since no DFA states are computed until search time, this never fails.
    pub fn build_from_nfa(&self, nfa: NFA) -> DFA {
        DFA { nfa, cache_capacity: self.config.get_cache_capacity() }
    }

    /// Apply the given lazy DFA configuration options to this builder.
    pub fn configure(&mut self, config: Config) -> &mut Builder {
        self.config = self.config.clone().overwrite(config);
        self
    }

    /// Set the Thompson NFA configuration for this builder using
    /// [`nfa::thompson::Config`](crate::nfa::thompson::Config).
    ///
    /// This permits setting things like the nesting limit for groups and
    /// the maximum pattern length.
    pub fn thompson(&mut self, config: thompson::Config) -> &mut Builder {
        self.thompson.configure(config);
        self
    }
}

impl Default for Builder {
    fn default() -> Builder {
        Builder::new()
    }
}
