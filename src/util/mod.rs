/*!
Types and routines shared by the NFA and the lazy DFA.

Most of what lives here is internal. The public pieces are the
[`StateID`](id::StateID) handle used to address NFA states and the
[`Match`](matchtypes::Match) span reported by substring searches.
*/

pub mod id;
pub mod matchtypes;

pub(crate) mod escape;
pub(crate) mod state_set;
