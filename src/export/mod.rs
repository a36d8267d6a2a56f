//! Graph export for external renderers.
//!
//! Translates an automaton into a DOT digraph (nodes = states, double
//! circles = finals, a distinguished unlabeled edge marks the start state)
//! and into right-linear grammar productions. Both are plain text handed to
//! the presentation layer; emission order is deterministic so identical
//! automata always export identically.

use std::fmt::Write;

use crate::automaton::{Automaton, AutomatonKind, Symbol};

/// Render an automaton as a DOT digraph.
///
/// Lossless with respect to states, transitions, start, and finals: one
/// `doublecircle` line per final state, one start-marker edge, and one
/// labeled edge per `(state, symbol, target)` entry, epsilon labeled `ε`.
pub fn to_dot(automaton: &Automaton) -> String {
    let name = match automaton.kind() {
        AutomatonKind::Nfa => "NFA",
        AutomatonKind::Dfa => "DFA",
    };

    let mut out = String::new();
    let _ = writeln!(out, "digraph {name} {{");
    out.push_str("  rankdir=LR;\n");
    out.push_str("  node [shape=circle];\n");

    for &state in automaton.finals() {
        let _ = writeln!(out, "  {state} [shape=doublecircle];");
    }

    out.push_str("  start [shape=none, label=\"\"];\n");
    if let Some(start) = automaton.start() {
        let _ = writeln!(out, "  start -> {start};");
    }

    for (from, symbol, to) in automaton.edges() {
        let _ = writeln!(out, "  {from} -> {to} [label=\"{symbol}\"];");
    }

    out.push_str("}\n");
    out
}

/// Derive right-linear grammar productions from an automaton.
///
/// Each transition `qF --c--> qT` contributes a production `qF -> cqT`
/// (epsilon transitions contribute a bare `qT`); every final state also
/// produces `ε`. One line per state with productions, ordered by state id,
/// alternatives joined with `|`.
pub fn grammar_productions(automaton: &Automaton) -> Vec<String> {
    let mut lines = Vec::new();

    for &state in automaton.states() {
        let mut alternatives: Vec<String> = Vec::new();

        for &c in automaton.alphabet() {
            for &to in automaton.targets(state, Symbol::Char(c)).into_iter().flatten() {
                alternatives.push(format!("{c}q{to}"));
            }
        }
        for &to in automaton
            .targets(state, Symbol::Epsilon)
            .into_iter()
            .flatten()
        {
            alternatives.push(format!("q{to}"));
        }
        if automaton.finals().contains(&state) {
            alternatives.push("ε".to_string());
        }

        if !alternatives.is_empty() {
            lines.push(format!("q{state} -> {}", alternatives.join(" | ")));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::determinize::determinize;
    use crate::regex::compile;

    fn sample_dfa() -> Automaton {
        determinize(&compile("ab").unwrap())
    }

    #[test]
    fn dot_names_the_kind() {
        let nfa = compile("ab").unwrap();
        assert!(to_dot(&nfa).starts_with("digraph NFA {"));
        assert!(to_dot(&sample_dfa()).starts_with("digraph DFA {"));
    }

    #[test]
    fn dot_is_lossless_over_the_structure() {
        let nfa = compile("(a|b)*abb").unwrap();
        let dot = to_dot(&nfa);

        let labeled_edges = dot.lines().filter(|l| l.contains("[label=")).count();
        assert_eq!(labeled_edges, nfa.edges().count());

        let final_markers = dot.lines().filter(|l| l.contains("doublecircle")).count();
        assert_eq!(final_markers, nfa.finals().len());

        let start_markers = dot.lines().filter(|l| l.contains("start ->")).count();
        assert_eq!(start_markers, 1);
    }

    #[test]
    fn dot_labels_epsilon_edges() {
        let nfa = compile("a*").unwrap();
        assert!(to_dot(&nfa).contains("[label=\"ε\"]"));
    }

    #[test]
    fn export_is_reproducible() {
        let nfa = compile("(a|b)*abb").unwrap();
        assert_eq!(to_dot(&nfa), to_dot(&compile("(a|b)*abb").unwrap()));
    }

    #[test]
    fn grammar_of_a_two_step_chain() {
        assert_eq!(
            grammar_productions(&sample_dfa()),
            vec!["q0 -> aq1", "q1 -> bq2", "q2 -> ε"]
        );
    }

    #[test]
    fn grammar_skips_states_without_productions() {
        let mut nfa = Automaton::new(AutomatonKind::Nfa);
        nfa.add_state(7);
        nfa.set_start(7);
        assert!(grammar_productions(&nfa).is_empty());
    }
}
