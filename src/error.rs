//! Error types for loading and transforming automata.

use thiserror::Error;

use crate::automaton::Symbol;

/// Errors produced while building, loading or transforming an automaton.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// An automaton must have at least its start state.
    #[error("automaton has no states")]
    NoStates,

    /// A state count, discovered or declared, does not fit.
    #[error("{requested} states exceed the maximum of {limit}")]
    TooManyStates { requested: usize, limit: usize },

    /// A symbol outside of the ASCII alphabet.
    #[error("symbol {0:?} is outside of the ASCII alphabet")]
    SymbolOutOfRange(char),

    #[error("state {state} is out of range for an automaton with {state_count} states")]
    StateOutOfRange { state: usize, state_count: usize },

    /// Minimization was asked of an automaton that is not deterministic.
    #[error("state {state} is not deterministic on {symbol}")]
    Nondeterministic { state: usize, symbol: Symbol },

    #[error("line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },

    /// A model error raised by the directive on `line`.
    #[error("line {line}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<Error>,
    },
}

/// What is wrong with a textual automaton description.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("missing state count")]
    MissingStateCount,

    #[error("expected a number, found {0:?}")]
    InvalidNumber(String),

    #[error("unknown directive {0:?}")]
    UnknownDirective(String),

    #[error("`{0}` directive is truncated")]
    Truncated(&'static str),

    #[error("expected a single symbol character, found {0:?}")]
    InvalidSymbol(String),
}

pub type Result<T> = std::result::Result<T, Error>;
