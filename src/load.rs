//! Reading automata from their textual description.
//!
//! The description is a sequence of whitespace separated tokens: the number of states, followed
//! by any number of directives
//!
//! ```text
//! final <state>
//! trans <from> <symbol> <to>
//! ```
//!
//! where `<symbol>` is a single ASCII character. The character chosen as the epsilon marker (`e` by
//! default) denotes an epsilon transition and is therefore not available as a literal symbol.

use std::str::FromStr;

use crate::automaton::{Automaton, Symbol};
use crate::error::{Error, ParseErrorKind, Result};

#[derive(Clone, Debug)]
pub struct LoadOptions {
    /// The symbol character that stands for an epsilon transition.
    pub epsilon: char,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions { epsilon: 'e' }
    }
}

struct Tokens<'t> {
    iter: Box<dyn Iterator<Item = (usize, &'t str)> + 't>,
    line: usize,
}

impl<'t> Tokens<'t> {
    fn new(text: &'t str) -> Self {
        Tokens {
            iter: Box::new(
                text.lines()
                    .enumerate()
                    .flat_map(|(n, line)| line.split_whitespace().map(move |tok| (n + 1, tok))),
            ),
            line: 1,
        }
    }

    fn next(&mut self) -> Option<&'t str> {
        self.iter.next().map(|(line, tok)| {
            self.line = line;
            tok
        })
    }

    fn error(&self, kind: ParseErrorKind) -> Error {
        Error::Parse {
            line: self.line,
            kind,
        }
    }

    fn number(&mut self, directive: &'static str) -> Result<usize> {
        let tok = self
            .next()
            .ok_or_else(|| self.error(ParseErrorKind::Truncated(directive)))?;
        tok.parse()
            .map_err(|_| self.error(ParseErrorKind::InvalidNumber(tok.to_string())))
    }

    fn symbol(&mut self, directive: &'static str, options: &LoadOptions) -> Result<Symbol> {
        let tok = self
            .next()
            .ok_or_else(|| self.error(ParseErrorKind::Truncated(directive)))?;
        let mut chars = tok.chars();
        let c = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(self.error(ParseErrorKind::InvalidSymbol(tok.to_string()))),
        };
        if c == options.epsilon {
            Ok(Symbol::Epsilon)
        } else if c.is_ascii() {
            Ok(Symbol::Byte(c as u8))
        } else {
            Err(Error::AtLine {
                line: self.line,
                source: Box::new(Error::SymbolOutOfRange(c)),
            })
        }
    }

    fn at_line(&self) -> impl Fn(Error) -> Error {
        let line = self.line;
        move |source| Error::AtLine {
            line,
            source: Box::new(source),
        }
    }
}

/// Parses a textual automaton description.
pub fn parse(text: &str, options: &LoadOptions) -> Result<Automaton> {
    let mut tokens = Tokens::new(text);

    let state_count = match tokens.next() {
        Some(tok) => tok
            .parse()
            .map_err(|_| tokens.error(ParseErrorKind::InvalidNumber(tok.to_string())))?,
        None => return Err(tokens.error(ParseErrorKind::MissingStateCount)),
    };
    let mut aut = Automaton::new(state_count).map_err(tokens.at_line())?;

    while let Some(directive) = tokens.next() {
        match directive {
            "final" => {
                let state = tokens.number("final")?;
                aut.mark_accepting(state).map_err(tokens.at_line())?;
            }
            "trans" => {
                let from = tokens.number("trans")?;
                let symbol = tokens.symbol("trans", options)?;
                let to = tokens.number("trans")?;
                aut.add_transition(from, symbol, to)
                    .map_err(tokens.at_line())?;
            }
            other => {
                return Err(tokens.error(ParseErrorKind::UnknownDirective(other.to_string())))
            }
        }
    }

    Ok(aut)
}

impl FromStr for Automaton {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s, &LoadOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stateset::MAX_STATES;

    #[test]
    fn parses_directives() {
        let aut: Automaton = "3\nfinal 2\ntrans 0 a 1\ntrans 1 b 2\ntrans 0 e 1\n"
            .parse()
            .unwrap();
        assert_eq!(aut.state_count(), 3);
        assert!(aut.is_accepting(2));
        assert_eq!(
            aut.edges().collect::<Vec<_>>(),
            vec![
                (0, Symbol::Epsilon, 1),
                (0, Symbol::Byte(b'a'), 1),
                (1, Symbol::Byte(b'b'), 2),
            ]
        );
    }

    #[test]
    fn tokens_may_span_lines() {
        let aut: Automaton = "2 final\n1 trans 0\n a 1 trans 0 a 0".parse().unwrap();
        assert!(aut.is_accepting(1));
        assert_eq!(aut.targets(0, Symbol::Byte(b'a')).unwrap().len(), 2);
    }

    #[test]
    fn custom_epsilon_marker() {
        let options = LoadOptions { epsilon: '&' };
        let aut = parse("2 trans 0 e 1 trans 1 & 0", &options).unwrap();
        assert!(aut.targets(0, Symbol::Byte(b'e')).is_some());
        assert!(aut.targets(1, Symbol::Epsilon).is_some());
    }

    #[test]
    fn rejects_malformed_input() {
        let parse_err = |text: &str| text.parse::<Automaton>().unwrap_err();

        assert_eq!(
            parse_err(""),
            Error::Parse { line: 1, kind: ParseErrorKind::MissingStateCount }
        );
        assert_eq!(
            parse_err("two"),
            Error::Parse { line: 1, kind: ParseErrorKind::InvalidNumber("two".into()) }
        );
        assert_eq!(
            parse_err("2\naccept 1"),
            Error::Parse { line: 2, kind: ParseErrorKind::UnknownDirective("accept".into()) }
        );
        assert_eq!(
            parse_err("2\ntrans 0 a"),
            Error::Parse { line: 2, kind: ParseErrorKind::Truncated("trans") }
        );
        assert_eq!(
            parse_err("2\ntrans 0 ab 1"),
            Error::Parse { line: 2, kind: ParseErrorKind::InvalidSymbol("ab".into()) }
        );
        assert_eq!(
            parse_err("2\n\ntrans 0 a 2"),
            Error::AtLine {
                line: 3,
                source: Box::new(Error::StateOutOfRange { state: 2, state_count: 2 }),
            }
        );
        assert_eq!(
            parse_err("2 trans 0 λ 1"),
            Error::AtLine { line: 1, source: Box::new(Error::SymbolOutOfRange('λ')) }
        );
    }

    #[test]
    fn rejects_degenerate_sizes() {
        assert_eq!(
            "0".parse::<Automaton>().unwrap_err(),
            Error::AtLine { line: 1, source: Box::new(Error::NoStates) }
        );
        let too_many = format!("{}", MAX_STATES + 1);
        match too_many.parse::<Automaton>().unwrap_err() {
            Error::AtLine { source, .. } => assert!(matches!(*source, Error::TooManyStates { .. })),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn non_ascii_symbols_are_rejected() {
        // words are simulated on their UTF-8 bytes, so a Latin-1 symbol could never match
        assert_eq!(
            "2 final 1 trans 0 é 1".parse::<Automaton>().unwrap_err(),
            Error::AtLine { line: 1, source: Box::new(Error::SymbolOutOfRange('é')) }
        );
        let aut: Automaton = "2 final 1 trans 0 ~ 1".parse().unwrap();
        assert!(aut.accepts("~"));
    }

    #[test]
    fn line_errors_report_their_cause_once() {
        use std::error::Error as _;

        let err = "2\n\ntrans 0 a 2".parse::<Automaton>().unwrap_err();
        assert_eq!(err.to_string(), "line 3");
        let cause = err.source().unwrap().to_string();
        assert_eq!(cause, "state 2 is out of range for an automaton with 2 states");
        assert!(!err.to_string().contains(&cause));
    }
}
