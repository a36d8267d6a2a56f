//! # formalsim
//!
//! A formal-language engine: regular expressions compiled into
//! nondeterministic finite automata (Thompson construction), determinized
//! into DFAs (subset construction), and simulated against input strings;
//! bounded-error approximate substring matching; and pushdown-automaton
//! simulation with step traces over two stack languages (aⁿbⁿ and balanced
//! brackets lexed from tag-like markup).
//!
//! Every operation is synchronous, stateless across calls, and total:
//! failures surface as error values or `false`/rejected outcomes, never as
//! panics, and the core performs no I/O; traces are data returned to the
//! caller.
//!
//! ## Example
//!
//! ```rust
//! use formalsim::prelude::*;
//!
//! let nfa = compile("(a|b)*abb").unwrap();
//! let dfa = determinize(&nfa);
//!
//! assert!(nfa.simulate("babb"));
//! assert_eq!(nfa.simulate("babb"), dfa.simulate("babb"));
//!
//! assert!(approximate_match("gattaca", "atc", 1));
//!
//! let run = simulate("aaabbb", PdaMode::Counting);
//! assert!(run.accepted);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod automaton;
pub mod determinize;
pub mod export;
pub mod matcher;
pub mod pda;
pub mod regex;

/// CLI interface and utilities
#[cfg(feature = "cli")]
pub mod cli;

/// Interactive REPL for exploring the engine
#[cfg(feature = "cli")]
pub mod repl;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::automaton::{Automaton, AutomatonKind, StateId, Symbol};
    pub use crate::determinize::determinize;
    pub use crate::export::{grammar_productions, to_dot};
    pub use crate::matcher::approximate_match;
    pub use crate::pda::{simulate, PdaMode, PdaResult};
    pub use crate::regex::{compile, ParseError};
}
