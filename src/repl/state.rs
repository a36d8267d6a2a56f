//! REPL state management
//!
//! Holds the current pattern with its compiled NFA/DFA pair and the
//! selected PDA mode. The engine itself stays stateless; this is the
//! presentation layer's session object.

use crate::automaton::Automaton;
use crate::determinize::determinize;
use crate::pda::PdaMode;
use crate::regex::{compile, ParseError};

/// Session state for the interactive loop.
#[derive(Debug, Default)]
pub struct ReplState {
    pattern: Option<String>,
    nfa: Option<Automaton>,
    dfa: Option<Automaton>,
    /// PDA mode used by the `pda` command.
    pub pda_mode: PdaMode,
}

impl ReplState {
    /// Fresh state with no automata built.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `pattern` and replace the current NFA/DFA pair.
    ///
    /// On error the previous automata are left untouched.
    pub fn build(&mut self, pattern: &str) -> Result<(), ParseError> {
        let nfa = compile(pattern)?;
        let dfa = determinize(&nfa);
        self.pattern = Some(pattern.to_string());
        self.nfa = Some(nfa);
        self.dfa = Some(dfa);
        Ok(())
    }

    /// The pattern the current automata were built from.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// The current NFA, if a pattern has been built.
    pub fn nfa(&self) -> Option<&Automaton> {
        self.nfa.as_ref()
    }

    /// The current DFA, if a pattern has been built.
    pub fn dfa(&self) -> Option<&Automaton> {
        self.dfa.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_replaces_both_automata() {
        let mut state = ReplState::new();
        assert!(state.nfa().is_none());

        state.build("ab").unwrap();
        assert_eq!(state.pattern(), Some("ab"));
        assert!(state.nfa().is_some_and(|nfa| nfa.simulate("ab")));
        assert!(state.dfa().is_some_and(|dfa| dfa.simulate("ab")));
    }

    #[test]
    fn failed_build_keeps_previous_automata() {
        let mut state = ReplState::new();
        state.build("ab").unwrap();
        assert!(state.build("(ab").is_err());
        assert_eq!(state.pattern(), Some("ab"));
        assert!(state.dfa().is_some());
    }
}
