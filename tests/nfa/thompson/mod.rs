use regex_lazy::{
    nfa::thompson::{Compiler, Config, Postfix, State, Token, NFA},
    CompileError,
};

use crate::Result;

fn err(pattern: &str) -> CompileError {
    NFA::new(pattern).unwrap_err()
}

#[test]
fn malformed_patterns() {
    assert_eq!(CompileError::UnmatchedParen, err("("));
    assert_eq!(CompileError::UnmatchedParen, err(")"));
    assert_eq!(CompileError::UnmatchedParen, err("a)(b"));
    assert_eq!(CompileError::UnmatchedParen, err("((a)"));
    assert_eq!(CompileError::EmptyAlternative, err("|abc"));
    assert_eq!(CompileError::EmptyAlternative, err("a|"));
    assert_eq!(CompileError::EmptyAlternative, err("a||b"));
    assert_eq!(CompileError::EmptyGroup, err("()"));
    assert_eq!(CompileError::EmptyGroup, err("(a|)"));
    assert_eq!(CompileError::DanglingOperator, err("*a"));
    assert_eq!(CompileError::DanglingOperator, err("(+)"));
    assert_eq!(CompileError::DanglingOperator, err("a|?"));
    assert_eq!(CompileError::MalformedPostfix, err(""));
}

#[test]
fn limits() {
    let deep = format!("{}a{}", "(".repeat(3), ")".repeat(3));
    let mut compiler = Compiler::new();
    compiler.configure(Config::new().nest_limit(2));
    assert_eq!(CompileError::TooDeep, compiler.build(&deep).unwrap_err());
    compiler.configure(Config::new().nest_limit(3));
    assert!(compiler.build(&deep).is_ok());

    let long = "a".repeat(4000);
    assert_eq!(CompileError::PatternTooLong, err(&long));
    assert!(NFA::new(&long[1..]).is_ok());
}

#[test]
fn errors_display() {
    let msg = err("(").to_string();
    assert_eq!("unbalanced parenthesis", msg);
    let boxed: Box<dyn std::error::Error> = Box::new(err("()"));
    assert_eq!("group is empty", boxed.to_string());
}

#[test]
fn postfix_rendering() -> Result<()> {
    let compiler = Compiler::new();
    assert_eq!("ab.", compiler.parse("ab")?.to_string());
    assert_eq!("hiel.l.o.|.", compiler.parse("h(i|ello)")?.to_string());
    assert_eq!("wm|i*.l.d.", compiler.parse("(w|m)i*ld")?.to_string());
    assert_eq!(r"a\..c.", compiler.parse("a.c")?.to_string());
    Ok(())
}

#[test]
fn one_match_state() -> Result<()> {
    for &pattern in &["a", "a|b|c", "(ab)*c+d?", "((a|b)*|c)+"] {
        let nfa = NFA::new(pattern)?;
        let count =
            nfa.states().iter().filter(|s| **s == State::Match).count();
        assert_eq!(1, count, "pattern: {:?}", pattern);
        assert_eq!(State::Match, *nfa.state(nfa.match_id()));
    }
    Ok(())
}

#[test]
fn hand_built_postfix() -> Result<()> {
    let compiler = Compiler::new();
    let postfix = Postfix::new(vec![
        Token::Literal(b'a'),
        Token::Literal(b'b'),
        Token::Alternate,
        Token::OneOrMore,
    ]);
    let nfa = compiler.build_from_postfix(&postfix)?;
    assert!(nfa.len() >= 4);

    let dangling = Postfix::new(vec![Token::Literal(b'a'), Token::Concat]);
    assert_eq!(
        CompileError::MalformedPostfix,
        compiler.build_from_postfix(&dangling).unwrap_err(),
    );
    let leftover =
        Postfix::new(vec![Token::Literal(b'a'), Token::Literal(b'b')]);
    assert_eq!(
        CompileError::MalformedPostfix,
        compiler.build_from_postfix(&leftover).unwrap_err(),
    );
    Ok(())
}

#[test]
fn clones_share_states() -> Result<()> {
    let nfa = NFA::new("(a|b)*abb")?;
    let clone = nfa.clone();
    assert_eq!(nfa.states().as_ptr(), clone.states().as_ptr());
    assert!(nfa.memory_usage() > 0);
    Ok(())
}
