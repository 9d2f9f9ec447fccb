/*!
Conversion of infix patterns into postfix notation.

The parser makes a single left-to-right pass over the bytes of a pattern and
emits a [`Postfix`] token sequence in which concatenation is explicit. For
example, `a(b|c)*d` becomes `abc|*.d.`. The NFA compiler consumes this
sequence with a simple operand stack.

The scan tracks two counters for the grouping level it is currently in:
`natom`, the number of operands produced since the last `|` (or the start
of the group), and `nalt`, the number of `|` seen so far. Opening a group
saves both counters on a stack and closing it restores them, with the
finished group counting as a single operand of the enclosing level.
*/

use core::fmt;

use alloc::vec::Vec;

use crate::{
    nfa::thompson::{error::CompileError, Config},
    util::escape::DebugByte,
};

/// A single token in a postfix pattern.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Token {
    /// Matches exactly this byte.
    Literal(u8),
    /// Concatenates the two preceding operands.
    Concat,
    /// Matches either of the two preceding operands.
    Alternate,
    /// Matches the preceding operand zero or more times.
    ZeroOrMore,
    /// Matches the preceding operand one or more times.
    OneOrMore,
    /// Matches the preceding operand zero or one times.
    ZeroOrOne,
}

/// A pattern in postfix notation with explicit concatenation.
///
/// A `Postfix` is usually produced by
/// [`Compiler::parse`](crate::nfa::thompson::Compiler::parse), but may also
/// be built by hand from a sequence of tokens. Hand-built sequences are not
/// validated until they are compiled, at which point a sequence that does
/// not reduce to exactly one operand is rejected with
/// [`CompileError::MalformedPostfix`].
///
/// The `Display` impl renders the sequence in the traditional textual form,
/// where concatenation is written as `.`. Since a literal `.` would be
/// ambiguous in that form, it is rendered as `\.`.
///
/// # Example
///
/// ```
/// use regex_lazy::nfa::thompson::Compiler;
///
/// let postfix = Compiler::new().parse("a(b|c)*d")?;
/// assert_eq!("abc|*.d.", postfix.to_string());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Postfix {
    tokens: Vec<Token>,
}

impl Postfix {
    /// Create a postfix pattern from the given tokens, without validation.
    pub fn new(tokens: Vec<Token>) -> Postfix {
        Postfix { tokens }
    }

    /// Returns the tokens in this pattern, in order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the number of tokens in this pattern.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if and only if this pattern has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in self.tokens.iter() {
            match *token {
                Token::Literal(b'.') => write!(f, r"\.")?,
                Token::Literal(b) => write!(f, "{:?}", DebugByte(b))?,
                Token::Concat => write!(f, ".")?,
                Token::Alternate => write!(f, "|")?,
                Token::ZeroOrMore => write!(f, "*")?,
                Token::OneOrMore => write!(f, "+")?,
                Token::ZeroOrOne => write!(f, "?")?,
            }
        }
        Ok(())
    }
}

/// The counters saved when a group is opened.
#[derive(Clone, Copy, Debug)]
struct Frame {
    nalt: usize,
    natom: usize,
}

/// Parse the given infix pattern into postfix form, subject to the limits
/// in the given configuration.
pub(crate) fn parse(
    config: &Config,
    pattern: &[u8],
) -> Result<Postfix, CompileError> {
    if pattern.len() >= config.get_max_pattern_len() {
        return Err(CompileError::PatternTooLong);
    }
    let nest_limit = config.get_nest_limit() as usize;
    let mut out = Vec::with_capacity(2 * pattern.len());
    let mut stack: Vec<Frame> = Vec::new();
    let (mut nalt, mut natom) = (0, 0);
    for &b in pattern.iter() {
        match b {
            b'(' => {
                if natom > 1 {
                    natom -= 1;
                    out.push(Token::Concat);
                }
                if stack.len() >= nest_limit {
                    return Err(CompileError::TooDeep);
                }
                stack.push(Frame { nalt, natom });
                nalt = 0;
                natom = 0;
            }
            b'|' => {
                if natom == 0 {
                    return Err(CompileError::EmptyAlternative);
                }
                fold_concat(&mut out, natom);
                nalt += 1;
                natom = 0;
            }
            b')' => {
                let frame = match stack.pop() {
                    None => return Err(CompileError::UnmatchedParen),
                    Some(frame) => frame,
                };
                if natom == 0 {
                    return Err(CompileError::EmptyGroup);
                }
                fold_concat(&mut out, natom);
                fold_alternate(&mut out, nalt);
                nalt = frame.nalt;
                natom = frame.natom + 1;
            }
            b'*' | b'+' | b'?' => {
                if natom == 0 {
                    return Err(CompileError::DanglingOperator);
                }
                out.push(match b {
                    b'*' => Token::ZeroOrMore,
                    b'+' => Token::OneOrMore,
                    _ => Token::ZeroOrOne,
                });
            }
            _ => {
                if natom > 1 {
                    natom -= 1;
                    out.push(Token::Concat);
                }
                out.push(Token::Literal(b));
                natom += 1;
            }
        }
    }
    if !stack.is_empty() {
        return Err(CompileError::UnmatchedParen);
    }
    if natom == 0 && nalt > 0 {
        return Err(CompileError::EmptyAlternative);
    }
    fold_concat(&mut out, natom);
    fold_alternate(&mut out, nalt);
    Ok(Postfix::new(out))
}

/// Join `natom` pending operands with `natom - 1` concatenations.
fn fold_concat(out: &mut Vec<Token>, natom: usize) {
    for _ in 1..natom {
        out.push(Token::Concat);
    }
}

/// Join the pending alternation branches with `nalt` alternations.
fn fold_alternate(out: &mut Vec<Token>, nalt: usize) {
    for _ in 0..nalt {
        out.push(Token::Alternate);
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};

    use super::*;

    fn postfix(pattern: &str) -> String {
        parse(&Config::new(), pattern.as_bytes()).unwrap().to_string()
    }

    fn error(pattern: &str) -> CompileError {
        parse(&Config::new(), pattern.as_bytes()).unwrap_err()
    }

    #[test]
    fn concat_and_alternate() {
        assert_eq!("a", postfix("a"));
        assert_eq!("ab.c.", postfix("abc"));
        assert_eq!("ab|", postfix("a|b"));
        assert_eq!("ab.cd.|", postfix("ab|cd"));
        assert_eq!("abc||", postfix("a|b|c"));
    }

    #[test]
    fn groups() {
        assert_eq!("hiel.l.o.|.", postfix("h(i|ello)"));
        assert_eq!("wm|i*.l.d.", postfix("(w|m)i*ld"));
        assert_eq!("abc|*.d.", postfix("a(b|c)*d"));
        assert_eq!("ab.c.", postfix("((a)(b))c"));
    }

    #[test]
    fn repetition() {
        assert_eq!("a*", postfix("a*"));
        assert_eq!("ab+.", postfix("ab+"));
        assert_eq!("a?*", postfix("a?*"));
        assert_eq!("ab.?", postfix("(ab)?"));
    }

    #[test]
    fn literal_dot() {
        let p = parse(&Config::new(), b"a.b").unwrap();
        assert_eq!(
            &[
                Token::Literal(b'a'),
                Token::Literal(b'.'),
                Token::Concat,
                Token::Literal(b'b'),
                Token::Concat,
            ],
            p.tokens(),
        );
        assert_eq!(r"a\..b.", p.to_string());
    }

    #[test]
    fn empty_pattern_is_empty_postfix() {
        assert!(parse(&Config::new(), b"").unwrap().is_empty());
    }

    #[test]
    fn errors() {
        assert_eq!(CompileError::UnmatchedParen, error("("));
        assert_eq!(CompileError::UnmatchedParen, error(")"));
        assert_eq!(CompileError::UnmatchedParen, error("(a"));
        assert_eq!(CompileError::UnmatchedParen, error("a)"));
        assert_eq!(CompileError::EmptyAlternative, error("|abc"));
        assert_eq!(CompileError::EmptyAlternative, error("a||b"));
        assert_eq!(CompileError::EmptyAlternative, error("a|"));
        assert_eq!(CompileError::EmptyAlternative, error("(|a)"));
        assert_eq!(CompileError::EmptyGroup, error("()"));
        assert_eq!(CompileError::EmptyGroup, error("(a|)"));
        assert_eq!(CompileError::DanglingOperator, error("*"));
        assert_eq!(CompileError::DanglingOperator, error("a|+"));
        assert_eq!(CompileError::DanglingOperator, error("(?a)"));
    }

    #[test]
    fn nest_limit() {
        let config = Config::new().nest_limit(2);
        assert!(parse(&config, b"((a))").is_ok());
        assert_eq!(
            CompileError::TooDeep,
            parse(&config, b"(((a)))").unwrap_err()
        );

        let deep = "(".repeat(100) + "a" + &")".repeat(100);
        assert!(parse(&Config::new(), deep.as_bytes()).is_ok());
        let deeper = "(".repeat(101) + "a" + &")".repeat(101);
        assert_eq!(
            CompileError::TooDeep,
            parse(&Config::new(), deeper.as_bytes()).unwrap_err()
        );
    }

    #[test]
    fn max_pattern_len() {
        let ok = "a".repeat(3999);
        assert!(parse(&Config::new(), ok.as_bytes()).is_ok());
        let long = "a".repeat(4000);
        assert_eq!(
            CompileError::PatternTooLong,
            parse(&Config::new(), long.as_bytes()).unwrap_err()
        );
        let config = Config::new().max_pattern_len(3);
        assert_eq!(
            CompileError::PatternTooLong,
            parse(&config, b"abc").unwrap_err()
        );
    }
}
