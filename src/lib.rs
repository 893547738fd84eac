//! Epsilon closure, determinization and minimization of small finite automata over bytes,
//! with graphviz output for every stage.

pub mod automaton;
mod closure;
pub mod dfa;
pub mod dot;
pub mod error;
pub mod load;
pub mod nfa;
pub mod stateset;

pub use automaton::{Automaton, Symbol, START};
pub use dfa::{MinimizeOptions, Seeding};
pub use dot::DotOptions;
pub use error::{Error, ParseErrorKind, Result};
pub use load::LoadOptions;
pub use nfa::Determinized;
pub use stateset::{StateSet, MAX_STATES};
