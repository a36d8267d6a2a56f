//! Finite automaton model shared by NFA and DFA.
//!
//! A DFA is representationally a restricted NFA (at most one target per
//! `(state, symbol)` pair, no epsilon transitions), so both variants share
//! one transition-table type, distinguished by an [`AutomatonKind`] tag.
//! Simulation, export, and the subset construction all operate on this one
//! structure.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

/// State identifier, unique within one automaton.
pub type StateId = usize;

/// An input symbol: a single character, or the epsilon marker.
///
/// Epsilon transitions consume no input and are only meaningful on
/// nondeterministic automata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// The epsilon marker ("consume no input").
    Epsilon,
    /// A literal input character.
    Char(char),
}

impl Symbol {
    /// Whether this symbol is the epsilon marker.
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::Char(c) => write!(f, "{c}"),
        }
    }
}

/// Determinism tag for [`Automaton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutomatonKind {
    /// Nondeterministic: multiple targets per `(state, symbol)` and epsilon
    /// transitions are permitted.
    Nfa,
    /// Deterministic: at most one target per `(state, symbol)`, no epsilon.
    Dfa,
}

/// A finite automaton over single-character symbols.
///
/// Immutable once built (construction happens incrementally through
/// [`add_transition`](Automaton::add_transition) and friends, then the
/// automaton is only read). Simulation never mutates, so sharing a built
/// automaton across threads behind `&` is safe.
///
/// # Example
///
/// ```rust
/// use formalsim::automaton::{Automaton, AutomatonKind, Symbol};
///
/// // 0 --a--> 1, accepting "a"
/// let mut nfa = Automaton::new(AutomatonKind::Nfa);
/// nfa.add_transition(0, Symbol::Char('a'), 1);
/// nfa.set_start(0);
/// nfa.add_final(1);
///
/// assert!(nfa.simulate("a"));
/// assert!(!nfa.simulate("b"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Automaton {
    kind: AutomatonKind,
    states: BTreeSet<StateId>,
    /// All symbols used, excluding epsilon. Ordered: the subset construction
    /// and the exporters rely on sorted iteration for reproducible output.
    alphabet: BTreeSet<char>,
    transitions: FxHashMap<(StateId, Symbol), BTreeSet<StateId>>,
    start: Option<StateId>,
    finals: BTreeSet<StateId>,
}

impl Automaton {
    /// Create an empty automaton of the given kind.
    pub fn new(kind: AutomatonKind) -> Self {
        Self {
            kind,
            states: BTreeSet::new(),
            alphabet: BTreeSet::new(),
            transitions: FxHashMap::default(),
            start: None,
            finals: BTreeSet::new(),
        }
    }

    /// The determinism tag.
    pub fn kind(&self) -> AutomatonKind {
        self.kind
    }

    /// Whether this automaton is deterministic.
    pub fn is_deterministic(&self) -> bool {
        self.kind == AutomatonKind::Dfa
    }

    /// Register a state without any transitions.
    pub fn add_state(&mut self, state: StateId) {
        self.states.insert(state);
    }

    /// Add a transition. Idempotent: re-adding an existing edge is a no-op.
    ///
    /// Both endpoints are added to the state set and non-epsilon symbols to
    /// the alphabet.
    pub fn add_transition(&mut self, from: StateId, symbol: Symbol, to: StateId) {
        debug_assert!(
            !(self.kind == AutomatonKind::Dfa && symbol.is_epsilon()),
            "epsilon transition on a deterministic automaton"
        );

        self.states.insert(from);
        self.states.insert(to);
        if let Symbol::Char(c) = symbol {
            self.alphabet.insert(c);
        }

        let targets = self.transitions.entry((from, symbol)).or_default();
        targets.insert(to);
        debug_assert!(
            !(self.kind == AutomatonKind::Dfa && targets.len() > 1),
            "conflicting targets for ({from}, {symbol}) on a deterministic automaton"
        );
    }

    /// Set the start state, registering it as a state.
    pub fn set_start(&mut self, state: StateId) {
        self.states.insert(state);
        self.start = Some(state);
    }

    /// Mark a state as accepting, registering it as a state.
    pub fn add_final(&mut self, state: StateId) {
        self.states.insert(state);
        self.finals.insert(state);
    }

    /// The start state, if one has been set.
    pub fn start(&self) -> Option<StateId> {
        self.start
    }

    /// All states, ordered by id.
    pub fn states(&self) -> &BTreeSet<StateId> {
        &self.states
    }

    /// The accepting states.
    pub fn finals(&self) -> &BTreeSet<StateId> {
        &self.finals
    }

    /// The alphabet (all symbols used, excluding epsilon), ordered.
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// Targets of `(from, symbol)`, or `None` when no such edge exists.
    pub fn targets(&self, from: StateId, symbol: Symbol) -> Option<&BTreeSet<StateId>> {
        self.transitions.get(&(from, symbol))
    }

    /// All edges in deterministic order: states ascending, each state's
    /// symbol edges in symbol order, then its epsilon edges.
    pub fn edges(&self) -> impl Iterator<Item = (StateId, Symbol, StateId)> + '_ {
        self.states.iter().flat_map(move |&from| {
            let by_char = self.alphabet.iter().flat_map(move |&c| {
                self.targets(from, Symbol::Char(c))
                    .into_iter()
                    .flatten()
                    .map(move |&to| (from, Symbol::Char(c), to))
            });
            let by_epsilon = self
                .targets(from, Symbol::Epsilon)
                .into_iter()
                .flatten()
                .map(move |&to| (from, Symbol::Epsilon, to));
            by_char.chain(by_epsilon)
        })
    }

    /// Epsilon closure: the fixed point reached by following epsilon
    /// transitions from every state already in `states`.
    pub fn epsilon_closure(&self, states: &BTreeSet<StateId>) -> BTreeSet<StateId> {
        let mut closure = states.clone();
        let mut worklist: Vec<StateId> = states.iter().copied().collect();

        while let Some(state) = worklist.pop() {
            if let Some(targets) = self.targets(state, Symbol::Epsilon) {
                for &next in targets {
                    if closure.insert(next) {
                        worklist.push(next);
                    }
                }
            }
        }

        closure
    }

    /// States reachable from `states` on `symbol`, closed under epsilon.
    pub fn move_on_symbol(&self, states: &BTreeSet<StateId>, symbol: char) -> BTreeSet<StateId> {
        let mut reached = BTreeSet::new();
        for &state in states {
            if let Some(targets) = self.targets(state, Symbol::Char(symbol)) {
                reached.extend(targets.iter().copied());
            }
        }
        self.epsilon_closure(&reached)
    }

    /// Run the automaton over `input` and report acceptance.
    ///
    /// Total over any input: symbols outside the alphabet simply lead to
    /// rejection, never an error. An automaton with no start state rejects
    /// everything.
    pub fn simulate(&self, input: &str) -> bool {
        match self.kind {
            AutomatonKind::Nfa => self.simulate_nfa(input),
            AutomatonKind::Dfa => self.simulate_dfa(input),
        }
    }

    fn simulate_nfa(&self, input: &str) -> bool {
        let Some(start) = self.start else {
            return false;
        };

        let mut current = self.epsilon_closure(&BTreeSet::from([start]));
        for c in input.chars() {
            let next = self.move_on_symbol(&current, c);
            if next.is_empty() {
                return false;
            }
            current = next;
        }

        current.iter().any(|state| self.finals.contains(state))
    }

    fn simulate_dfa(&self, input: &str) -> bool {
        let Some(mut current) = self.start else {
            return false;
        };

        for c in input.chars() {
            match self.single_target(current, c) {
                Some(next) => current = next,
                // No implicit failure state: a missing transition rejects.
                None => return false,
            }
        }

        self.finals.contains(&current)
    }

    /// The ordered sequence of states visited by the deterministic run over
    /// `input`, starting with the start state and stopping early at the
    /// first missing transition.
    ///
    /// Only meaningful for deterministic automata; a nondeterministic
    /// fan-out ends the trace at the branching state.
    pub fn state_trace(&self, input: &str) -> Vec<StateId> {
        let Some(mut current) = self.start else {
            return Vec::new();
        };

        let mut trace = vec![current];
        for c in input.chars() {
            match self.single_target(current, c) {
                Some(next) => {
                    current = next;
                    trace.push(current);
                }
                None => break,
            }
        }
        trace
    }

    /// The unique target of `(state, c)`, when exactly one exists.
    fn single_target(&self, state: StateId, c: char) -> Option<StateId> {
        let targets = self.targets(state, Symbol::Char(c))?;
        if targets.len() == 1 {
            targets.iter().next().copied()
        } else {
            None
        }
    }
}
