//! Regex compilation: pattern string to NFA.
//!
//! Supports literals, implicit concatenation, alternation (`|`), grouping,
//! and the `*`/`+`/`?` quantifiers: the classic Thompson construction,
//! where every grammar production contributes a fragment with one entry and
//! one exit state.
//!
//! After construction the states are renumbered in BFS discovery order from
//! the start state, so the start state is always id 0, diagrams read
//! left-to-right, and compiling the same pattern twice yields identical
//! automata.
//!
//! # Example
//!
//! ```rust
//! use formalsim::regex::compile;
//!
//! let nfa = compile("(a|b)*abb").unwrap();
//! assert!(nfa.simulate("abb"));
//! assert!(nfa.simulate("babb"));
//! assert!(!nfa.simulate("ab"));
//! ```

mod parser;

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::automaton::{Automaton, StateId, Symbol};
use parser::Parser;

/// Error raised for a malformed pattern.
///
/// Always recoverable: the pattern is rejected, nothing is built. Positions
/// are character offsets into the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A `(` without its `)`, or a stray `)`.
    #[error("unbalanced parentheses at position {position}")]
    UnbalancedParens {
        /// Offset of the offending parenthesis.
        position: usize,
    },
    /// An operator with a missing operand, such as a leading `*` or a `|`
    /// with an empty alternative.
    #[error("dangling operator '{operator}' at position {position}")]
    DanglingOperator {
        /// The operator lacking an operand.
        operator: char,
        /// Offset where the operand was expected.
        position: usize,
    },
    /// A `()` group with nothing inside.
    #[error("empty group at position {position}")]
    EmptyGroup {
        /// Offset of the opening parenthesis.
        position: usize,
    },
}

impl ParseError {
    /// Character offset the error refers to.
    pub fn position(&self) -> usize {
        match *self {
            ParseError::UnbalancedParens { position }
            | ParseError::DanglingOperator { position, .. }
            | ParseError::EmptyGroup { position } => position,
        }
    }
}

/// Compile a pattern into an NFA.
///
/// The result has exactly one final state, and state ids follow BFS
/// discovery order from the start state (id 0).
///
/// # Errors
///
/// [`ParseError`] on malformed input: unbalanced parentheses, a dangling
/// operator, or an empty group.
pub fn compile(pattern: &str) -> Result<Automaton, ParseError> {
    let nfa = Parser::new(pattern).parse()?;
    Ok(renumber_bfs(&nfa))
}

/// Renumber states in BFS discovery order from the start state.
///
/// Epsilon edges are explored before symbol edges, symbol edges in symbol
/// order, so the resulting ids grow roughly left-to-right through the
/// pattern. Unreachable states (none arise from the Thompson wiring) keep
/// their relative order after all reachable ones.
fn renumber_bfs(nfa: &Automaton) -> Automaton {
    let Some(start) = nfa.start() else {
        return nfa.clone();
    };

    let mut mapping: FxHashMap<StateId, StateId> = FxHashMap::default();
    let mut queue = VecDeque::from([start]);
    mapping.insert(start, 0);

    while let Some(state) = queue.pop_front() {
        let epsilon_targets = nfa
            .targets(state, Symbol::Epsilon)
            .into_iter()
            .flatten()
            .copied();
        let symbol_targets = nfa.alphabet().iter().flat_map(|&c| {
            nfa.targets(state, Symbol::Char(c))
                .into_iter()
                .flatten()
                .copied()
        });

        for next in epsilon_targets.chain(symbol_targets) {
            if !mapping.contains_key(&next) {
                mapping.insert(next, mapping.len());
                queue.push_back(next);
            }
        }
    }

    for &state in nfa.states() {
        let next_id = mapping.len();
        mapping.entry(state).or_insert(next_id);
    }

    let mut renumbered = Automaton::new(nfa.kind());
    for &state in nfa.states() {
        renumbered.add_state(mapping[&state]);
    }
    for (from, symbol, to) in nfa.edges() {
        renumbered.add_transition(mapping[&from], symbol, mapping[&to]);
    }
    renumbered.set_start(mapping[&start]);
    for &state in nfa.finals() {
        renumbered.add_final(mapping[&state]);
    }
    renumbered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_start_state_is_zero() {
        let nfa = compile("(a|b)*abb").unwrap();
        assert_eq!(nfa.start(), Some(0));
    }

    #[test]
    fn compilation_is_deterministic() {
        let first = compile("(a|b)*abb").unwrap();
        let second = compile("(a|b)*abb").unwrap();

        assert_eq!(first.start(), second.start());
        assert_eq!(first.finals(), second.finals());
        assert_eq!(
            first.edges().collect::<Vec<_>>(),
            second.edges().collect::<Vec<_>>()
        );
    }

    #[test]
    fn classic_pattern_end_to_end() {
        let nfa = compile("(a|b)*abb").unwrap();
        for accepted in ["abb", "aabb", "babb", "abababb"] {
            assert!(nfa.simulate(accepted), "should accept {accepted:?}");
        }
        for rejected in ["", "ab", "ba", "abba"] {
            assert!(!nfa.simulate(rejected), "should reject {rejected:?}");
        }
    }

    #[test]
    fn error_position_accessor() {
        let err = compile("(ab").unwrap_err();
        assert_eq!(err, ParseError::UnbalancedParens { position: 0 });
        assert_eq!(err.position(), 0);
    }

    #[test]
    fn parse_error_display_names_the_position() {
        let err = compile("a|").unwrap_err();
        assert_eq!(err.to_string(), "dangling operator '|' at position 2");
    }
}
