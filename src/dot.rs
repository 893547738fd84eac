use std::fmt;
use std::io::{self, Write};

use crate::automaton::{Automaton, Symbol};

#[derive(Clone, Debug)]
pub struct DotOptions {
    /// Label used for epsilon edges.
    pub epsilon_label: char,
}

impl Default for DotOptions {
    fn default() -> Self {
        DotOptions { epsilon_label: 'e' }
    }
}

/// Writes the automaton in the [graphviz](https://graphviz.org/docs/layouts/dot/) dot language:
/// accepting states as double circles, one edge per `(source, symbol, destination)` triple.
pub fn write_dot<W: Write>(aut: &Automaton, out: &mut W, options: &DotOptions) -> io::Result<()> {
    write!(out, "{}", Dot { aut, options })
}

struct Dot<'a> {
    aut: &'a Automaton,
    options: &'a DotOptions,
}

impl<'a> fmt::Display for Dot<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph {{")?;
        writeln!(f, "rankdir=LR;")?;
        write!(f, "node [shape=doublecircle];")?;
        for state in self.aut.accepting().iter() {
            write!(f, " {}", state)?;
        }
        if !self.aut.accepting().is_empty() {
            write!(f, ";")?;
        }
        writeln!(f)?;
        writeln!(f, "node [shape=circle];")?;
        for (from, symbol, to) in self.aut.edges() {
            writeln!(
                f,
                "{} -> {} [label=\"{}\"];",
                from,
                to,
                label(symbol, self.options)
            )?;
        }
        writeln!(f, "}}")
    }
}

fn label(symbol: Symbol, options: &DotOptions) -> String {
    let c = match symbol {
        Symbol::Epsilon => options.epsilon_label,
        Symbol::Byte(b) => b as char,
    };
    match c {
        '"' => "\\\"".to_string(),
        '\\' => "\\\\".to_string(),
        c if c.is_ascii_graphic() || c == ' ' || !c.is_ascii() && !c.is_control() => c.to_string(),
        c => format!("\\\\x{:02x}", c as u32),
    }
}

impl Automaton {
    pub fn to_dot(&self, options: &DotOptions) -> String {
        Dot { aut: self, options }.to_string()
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = DotOptions::default();
        fmt::Display::fmt(&Dot { aut: self, options: &options }, f)
    }
}
