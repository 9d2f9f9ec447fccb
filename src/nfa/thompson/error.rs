/// An error that can occur while compiling a pattern into a Thompson NFA.
///
/// Every variant identifies the reason a pattern was rejected. None of them
/// carry an offset into the pattern: the patterns accepted by this crate are
/// short, and the variants are meant to be compared against directly (for
/// example, in tests).
///
/// A human readable message is available via the `std::fmt::Display` impl.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CompileError {
    /// An alternation branch is empty, as in `|abc`, `a||b` or `a|`.
    EmptyAlternative,
    /// A `)` appeared without a matching `(`, or a `(` was never closed.
    UnmatchedParen,
    /// A group contained nothing, as in `()` or `(a|)`.
    EmptyGroup,
    /// A repetition operator (`*`, `+` or `?`) had no operand, as in `*a`
    /// or `(+)`.
    DanglingOperator,
    /// Groups were nested more deeply than the configured
    /// [`nest_limit`](crate::nfa::thompson::Config::nest_limit).
    TooDeep,
    /// The pattern was at least as long as the configured
    /// [`max_pattern_len`](crate::nfa::thompson::Config::max_pattern_len).
    PatternTooLong,
    /// A postfix token stream did not reduce to exactly one NFA fragment.
    ///
    /// Patterns that pass the parser never produce this error except for the
    /// empty pattern, which has no fragment at all. It is mostly reported
    /// when a hand-built [`Postfix`](crate::nfa::thompson::Postfix) is
    /// malformed.
    MalformedPostfix,
}

#[cfg(feature = "std")]
impl std::error::Error for CompileError {}

impl core::fmt::Display for CompileError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {
            CompileError::EmptyAlternative => {
                write!(f, "alternation contains an empty branch")
            }
            CompileError::UnmatchedParen => {
                write!(f, "unbalanced parenthesis")
            }
            CompileError::EmptyGroup => write!(f, "group is empty"),
            CompileError::DanglingOperator => {
                write!(f, "repetition operator is missing an operand")
            }
            CompileError::TooDeep => {
                write!(f, "groups are nested too deeply")
            }
            CompileError::PatternTooLong => {
                write!(f, "pattern exceeds the maximum pattern length")
            }
            CompileError::MalformedPostfix => {
                write!(f, "postfix expression does not form a single NFA")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display() {
        assert_eq!("group is empty", CompileError::EmptyGroup.to_string());
        assert_eq!(
            "unbalanced parenthesis",
            CompileError::UnmatchedParen.to_string(),
        );
    }
}
