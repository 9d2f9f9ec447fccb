/*!
Provides non-deterministic finite automata (NFA).

The only NFA in this crate is the [Thompson NFA](thompson::NFA), which is
the starting point for building a [lazy DFA](crate::hybrid::dfa::DFA).
*/

pub mod thompson;
