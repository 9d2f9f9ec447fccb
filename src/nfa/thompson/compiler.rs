use core::cell::RefCell;

use alloc::{vec, vec::Vec};

use crate::{
    nfa::thompson::{
        builder::{Builder, Slot},
        error::CompileError,
        nfa::NFA,
        postfix::{self, Postfix, Token},
    },
    util::id::StateID,
};

/// The configuration used for compiling a Thompson NFA from a pattern.
///
/// Every option is unset by default, in which case its documented default is
/// used.
#[derive(Clone, Debug, Default)]
pub struct Config {
    nest_limit: Option<u32>,
    max_pattern_len: Option<usize>,
}

impl Config {
    /// Return a new default Thompson NFA compiler configuration.
    pub fn new() -> Config {
        Config::default()
    }

    /// Set the nesting limit for groups.
    ///
    /// The limit is the number of groups that may be open at the same time.
    /// A pattern that opens a group while the limit is already reached is
    /// rejected with [`CompileError::TooDeep`]. The default is `100`.
    ///
    /// # Example
    ///
    /// ```
    /// use regex_lazy::{nfa::thompson::{Compiler, Config}, CompileError};
    ///
    /// let result = Compiler::new()
    ///     .configure(Config::new().nest_limit(1))
    ///     .build("((a))");
    /// assert_eq!(CompileError::TooDeep, result.unwrap_err());
    /// ```
    pub fn nest_limit(mut self, limit: u32) -> Config {
        self.nest_limit = Some(limit);
        self
    }

    /// Set the length, in bytes, at which a pattern is considered too long.
    ///
    /// A pattern whose length is at least this bound is rejected with
    /// [`CompileError::PatternTooLong`] before it is parsed. The default is
    /// `4000`.
    pub fn max_pattern_len(mut self, bytes: usize) -> Config {
        self.max_pattern_len = Some(bytes);
        self
    }

    /// Returns the nesting limit for groups.
    pub fn get_nest_limit(&self) -> u32 {
        self.nest_limit.unwrap_or(100)
    }

    /// Returns the length at which a pattern is considered too long.
    pub fn get_max_pattern_len(&self) -> usize {
        self.max_pattern_len.unwrap_or(4000)
    }

    /// Overwrite the default configuration such that the options in `o` are
    /// always used. If an option in `o` is not set, then the corresponding
    /// option in `self` is used. If it's not set in `self` either, then it
    /// remains not set.
    pub(crate) fn overwrite(self, o: Config) -> Config {
        Config {
            nest_limit: o.nest_limit.or(self.nest_limit),
            max_pattern_len: o.max_pattern_len.or(self.max_pattern_len),
        }
    }
}

/// A builder for compiling a pattern into a Thompson NFA.
///
/// Compilation happens in two phases. First, the pattern is parsed into a
/// [`Postfix`] token sequence. Second, the sequence is compiled into an NFA
/// with Thompson's construction. Either phase may be invoked on its own via
/// [`Compiler::parse`] and [`Compiler::build_from_postfix`].
///
/// # Example
///
/// ```
/// use regex_lazy::nfa::thompson::Compiler;
///
/// let compiler = Compiler::new();
/// let postfix = compiler.parse("h(i|ello)")?;
/// let nfa = compiler.build_from_postfix(&postfix)?;
/// assert_eq!(8, nfa.len());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Compiler {
    config: Config,
    /// The builder for actually constructing an NFA. This provides a
    /// convenient abstraction for writing a compiler.
    builder: RefCell<Builder>,
}

/// A piece of an NFA under construction.
///
/// A fragment has a single entry state and a list of holes: transition slots
/// that don't point anywhere yet. Every hole is eventually patched to the
/// entry of whatever follows the fragment.
#[derive(Clone, Debug)]
struct Fragment {
    start: StateID,
    holes: Vec<Hole>,
}

/// A transition slot in a fragment waiting for its successor.
#[derive(Clone, Copy, Debug)]
struct Hole {
    sid: StateID,
    slot: Slot,
}

impl Compiler {
    /// Create a new NFA compiler with the default configuration.
    pub fn new() -> Compiler {
        Compiler {
            config: Config::default(),
            builder: RefCell::new(Builder::new()),
        }
    }

    /// Apply the given NFA configuration options to this compiler.
    pub fn configure(&mut self, config: Config) -> &mut Compiler {
        self.config = self.config.clone().overwrite(config);
        self
    }

    /// Parse the given pattern and compile it into an NFA.
    pub fn build(&self, pattern: &str) -> Result<NFA, CompileError> {
        let postfix = self.parse(pattern)?;
        self.build_from_postfix(&postfix)
    }

    /// Parse the given pattern into postfix notation without compiling it.
    pub fn parse(&self, pattern: &str) -> Result<Postfix, CompileError> {
        let postfix = postfix::parse(&self.config, pattern.as_bytes())?;
        trace!("parsed {:?} into postfix {}", pattern, postfix);
        Ok(postfix)
    }

    /// Compile a postfix token sequence into an NFA.
    ///
    /// If the sequence does not reduce to exactly one fragment, then this
    /// returns [`CompileError::MalformedPostfix`]. This includes the empty
    /// sequence and operators with too few operands.
    pub fn build_from_postfix(
        &self,
        postfix: &Postfix,
    ) -> Result<NFA, CompileError> {
        let mut builder = self.builder.borrow_mut();
        builder.clear();
        let mut stack: Vec<Fragment> = vec![];
        for &token in postfix.tokens() {
            let frag = match token {
                Token::Literal(byte) => {
                    let sid = builder.add_byte(byte)?;
                    let holes = vec![Hole { sid, slot: Slot::Next }];
                    Fragment { start: sid, holes }
                }
                Token::Concat => {
                    let second = pop(&mut stack)?;
                    let first = pop(&mut stack)?;
                    patch(&mut builder, &first.holes, second.start);
                    Fragment { start: first.start, holes: second.holes }
                }
                Token::Alternate => {
                    let second = pop(&mut stack)?;
                    let mut first = pop(&mut stack)?;
                    let sid = builder
                        .add_split(first.start, Some(second.start))?;
                    first.holes.extend(second.holes);
                    Fragment { start: sid, holes: first.holes }
                }
                Token::ZeroOrOne => {
                    let mut frag = pop(&mut stack)?;
                    let sid = builder.add_split(frag.start, None)?;
                    frag.holes.push(Hole { sid, slot: Slot::Alt2 });
                    Fragment { start: sid, holes: frag.holes }
                }
                Token::ZeroOrMore => {
                    let frag = pop(&mut stack)?;
                    let sid = builder.add_split(frag.start, None)?;
                    patch(&mut builder, &frag.holes, sid);
                    let holes = vec![Hole { sid, slot: Slot::Alt2 }];
                    Fragment { start: sid, holes }
                }
                Token::OneOrMore => {
                    let frag = pop(&mut stack)?;
                    let sid = builder.add_split(frag.start, None)?;
                    patch(&mut builder, &frag.holes, sid);
                    let holes = vec![Hole { sid, slot: Slot::Alt2 }];
                    Fragment { start: frag.start, holes }
                }
            };
            stack.push(frag);
        }
        let frag = pop(&mut stack)?;
        if !stack.is_empty() {
            return Err(CompileError::MalformedPostfix);
        }
        let match_id = builder.add_match()?;
        patch(&mut builder, &frag.holes, match_id);
        builder.build(frag.start, match_id)
    }
}

impl Default for Compiler {
    fn default() -> Compiler {
        Compiler::new()
    }
}

fn pop(stack: &mut Vec<Fragment>) -> Result<Fragment, CompileError> {
    stack.pop().ok_or(CompileError::MalformedPostfix)
}

fn patch(builder: &mut Builder, holes: &[Hole], to: StateID) {
    for hole in holes.iter() {
        builder.patch(hole.sid, hole.slot, to);
    }
}
