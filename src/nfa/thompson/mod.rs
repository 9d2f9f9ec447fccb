/*!
Defines a Thompson NFA and provides a compiler for building one from a
pattern.

Compilation is split into a parser, which rewrites an infix pattern into
[`Postfix`] notation with explicit concatenation, and a [`Compiler`], which
assembles NFA fragments for each postfix token using Thompson's
construction. The resulting [`NFA`] has one start state and one match state,
and is consumed by the [lazy DFA](crate::hybrid).
*/

mod builder;
mod compiler;
mod error;
mod nfa;
mod postfix;

pub use self::{
    compiler::{Compiler, Config},
    error::CompileError,
    nfa::{State, NFA},
    postfix::{Postfix, Token},
};
