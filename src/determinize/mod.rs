//! Subset construction: NFA to DFA.
//!
//! Reachable sets of NFA states become single DFA states. Ids are assigned
//! strictly in BFS discovery order starting at 0 for the start subset, so
//! two runs over an identical NFA always produce an identical DFA; stable
//! test fixtures and diagrams depend on this. No minimization is performed:
//! the DFA has one state per distinct reachable subset.

use std::collections::{BTreeSet, VecDeque};

use rustc_hash::FxHashMap;

use crate::automaton::{Automaton, AutomatonKind, StateId, Symbol};

/// Convert an NFA into an equivalent DFA.
///
/// Worst case the number of subsets is exponential in the NFA state count;
/// in practice it is bounded by the subsets actually reachable. An automaton
/// without a start state determinizes to an empty DFA.
///
/// # Example
///
/// ```rust
/// use formalsim::determinize::determinize;
/// use formalsim::regex::compile;
///
/// let nfa = compile("(a|b)*abb").unwrap();
/// let dfa = determinize(&nfa);
/// assert_eq!(dfa.simulate("babb"), nfa.simulate("babb"));
/// ```
pub fn determinize(nfa: &Automaton) -> Automaton {
    let mut dfa = Automaton::new(AutomatonKind::Dfa);
    let Some(start) = nfa.start() else {
        return dfa;
    };

    // Canonical key for a subset: its members in ascending order.
    let mut subset_ids: FxHashMap<Vec<StateId>, StateId> = FxHashMap::default();
    let mut worklist: VecDeque<BTreeSet<StateId>> = VecDeque::new();

    let start_subset = nfa.epsilon_closure(&BTreeSet::from([start]));
    subset_ids.insert(canonical_key(&start_subset), 0);
    dfa.set_start(0);
    if intersects_finals(nfa, &start_subset) {
        dfa.add_final(0);
    }
    worklist.push_back(start_subset);

    while let Some(subset) = worklist.pop_front() {
        let from_id = subset_ids[&canonical_key(&subset)];

        for &symbol in nfa.alphabet() {
            let reached = nfa.move_on_symbol(&subset, symbol);
            if reached.is_empty() {
                // No transition emitted: simulation rejects here.
                continue;
            }

            let key = canonical_key(&reached);
            let to_id = match subset_ids.get(&key) {
                Some(&existing) => existing,
                None => {
                    let fresh = subset_ids.len();
                    subset_ids.insert(key, fresh);
                    if intersects_finals(nfa, &reached) {
                        dfa.add_final(fresh);
                    }
                    worklist.push_back(reached);
                    fresh
                }
            };

            dfa.add_transition(from_id, Symbol::Char(symbol), to_id);
        }
    }

    dfa
}

fn canonical_key(subset: &BTreeSet<StateId>) -> Vec<StateId> {
    subset.iter().copied().collect()
}

fn intersects_finals(nfa: &Automaton, subset: &BTreeSet<StateId>) -> bool {
    subset.iter().any(|state| nfa.finals().contains(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::compile;

    #[test]
    fn dfa_start_state_is_zero() {
        let dfa = determinize(&compile("ab").unwrap());
        assert_eq!(dfa.start(), Some(0));
    }

    #[test]
    fn determinize_merges_parallel_branches() {
        // 0 --a--> 1, 0 --a--> 2, 1 --b--> 3, 2 --b--> 3(final)
        let mut nfa = Automaton::new(AutomatonKind::Nfa);
        nfa.add_transition(0, Symbol::Char('a'), 1);
        nfa.add_transition(0, Symbol::Char('a'), 2);
        nfa.add_transition(1, Symbol::Char('b'), 3);
        nfa.add_transition(2, Symbol::Char('b'), 3);
        nfa.set_start(0);
        nfa.add_final(3);

        let dfa = determinize(&nfa);
        // {0}, {1,2}, {3}
        assert_eq!(dfa.states().len(), 3);
        assert!(dfa.simulate("ab"));
        assert!(!dfa.simulate("a"));
    }

    #[test]
    fn epsilon_reachable_finals_mark_the_subset_final() {
        // 0 --a--> 1 --ε--> 2(final): the subset {1, 2} must be accepting.
        let mut nfa = Automaton::new(AutomatonKind::Nfa);
        nfa.add_transition(0, Symbol::Char('a'), 1);
        nfa.add_transition(1, Symbol::Epsilon, 2);
        nfa.set_start(0);
        nfa.add_final(2);

        let dfa = determinize(&nfa);
        assert!(dfa.simulate("a"));
        assert!(!dfa.simulate(""));
    }

    #[test]
    fn empty_automaton_determinizes_to_empty_dfa() {
        let nfa = Automaton::new(AutomatonKind::Nfa);
        let dfa = determinize(&nfa);
        assert_eq!(dfa.start(), None);
        assert!(!dfa.simulate(""));
    }

    #[test]
    fn id_assignment_is_reproducible() {
        let nfa = compile("(a|b)*abb").unwrap();
        let first = determinize(&nfa);
        let second = determinize(&nfa);

        assert_eq!(first.start(), second.start());
        assert_eq!(first.finals(), second.finals());
        assert_eq!(
            first.edges().collect::<Vec<_>>(),
            second.edges().collect::<Vec<_>>()
        );
    }

    #[test]
    fn agrees_with_the_nfa_on_fixtures() {
        let nfa = compile("(a|b)*abb").unwrap();
        let dfa = determinize(&nfa);
        for input in ["", "abb", "aabb", "babb", "abababb", "ab", "ba", "abba"] {
            assert_eq!(
                nfa.simulate(input),
                dfa.simulate(input),
                "divergence on {input:?}"
            );
        }
    }
}
