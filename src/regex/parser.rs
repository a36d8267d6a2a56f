//! Recursive-descent regex parser with inline Thompson construction.
//!
//! Grammar:
//!
//! ```text
//! regex      := term ('|' term)*
//! term       := factor+
//! factor     := atom quantifier?
//! quantifier := '*' | '+' | '?'
//! atom       := literal-char | '(' regex ')'
//! ```
//!
//! Adjacent factors concatenate implicitly. Every production yields a
//! fragment with exactly one entry and one exit state, wired into the NFA
//! under construction as it is parsed.

use crate::automaton::{Automaton, AutomatonKind, StateId, Symbol};
use crate::regex::ParseError;

/// A partially built automaton piece with one entry and one exit state.
#[derive(Debug, Clone, Copy)]
struct Fragment {
    entry: StateId,
    exit: StateId,
}

/// Single-pass parser building an NFA fragment-by-fragment.
///
/// Positions reported in errors are character offsets into the pattern.
pub(crate) struct Parser {
    chars: Vec<char>,
    pos: usize,
    nfa: Automaton,
    next_state: StateId,
}

impl Parser {
    pub(crate) fn new(pattern: &str) -> Self {
        Self {
            chars: pattern.chars().collect(),
            pos: 0,
            nfa: Automaton::new(AutomatonKind::Nfa),
            next_state: 0,
        }
    }

    /// Parse the whole pattern and return the finished NFA.
    ///
    /// The final fragment's entry state becomes the start state and its exit
    /// state the sole final state. The empty pattern compiles to a single
    /// state that is both, accepting only the empty string.
    pub(crate) fn parse(mut self) -> Result<Automaton, ParseError> {
        if self.chars.is_empty() {
            let only = self.fresh();
            self.nfa.set_start(only);
            self.nfa.add_final(only);
            return Ok(self.nfa);
        }

        let fragment = self.alternation()?;
        if self.peek().is_some() {
            // The descent only stops early on a ')' it never opened.
            return Err(ParseError::UnbalancedParens { position: self.pos });
        }

        self.nfa.set_start(fragment.entry);
        self.nfa.add_final(fragment.exit);
        Ok(self.nfa)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn fresh(&mut self) -> StateId {
        let id = self.next_state;
        self.next_state += 1;
        id
    }

    // regex := term ('|' term)*
    fn alternation(&mut self) -> Result<Fragment, ParseError> {
        let mut fragment = self.term()?;
        while self.peek() == Some('|') {
            self.pos += 1;
            let rhs = self.term()?;
            fragment = self.alternate(fragment, rhs);
        }
        Ok(fragment)
    }

    // term := factor+
    fn term(&mut self) -> Result<Fragment, ParseError> {
        if self.at_term_end() {
            // An alternative with no factors: the '|' demanding it dangles.
            return Err(ParseError::DanglingOperator {
                operator: '|',
                position: self.pos,
            });
        }

        let mut fragment = self.factor()?;
        while !self.at_term_end() {
            let next = self.factor()?;
            fragment = self.concatenate(fragment, next);
        }
        Ok(fragment)
    }

    fn at_term_end(&self) -> bool {
        matches!(self.peek(), None | Some('|') | Some(')'))
    }

    // factor := atom quantifier?
    fn factor(&mut self) -> Result<Fragment, ParseError> {
        let atom = self.atom()?;
        let fragment = match self.peek() {
            Some('*') => {
                self.pos += 1;
                self.star(atom)
            }
            Some('+') => {
                self.pos += 1;
                self.plus(atom)
            }
            Some('?') => {
                self.pos += 1;
                self.question(atom)
            }
            _ => atom,
        };
        Ok(fragment)
    }

    // atom := literal-char | '(' regex ')'
    fn atom(&mut self) -> Result<Fragment, ParseError> {
        match self.peek() {
            Some('(') => {
                let open = self.pos;
                self.pos += 1;
                if self.peek() == Some(')') {
                    return Err(ParseError::EmptyGroup { position: open });
                }
                let inner = self.alternation()?;
                if self.peek() != Some(')') {
                    return Err(ParseError::UnbalancedParens { position: open });
                }
                self.pos += 1;
                Ok(inner)
            }
            Some(operator @ ('*' | '+' | '?')) => Err(ParseError::DanglingOperator {
                operator,
                position: self.pos,
            }),
            Some(c) if c != '|' && c != ')' => {
                self.pos += 1;
                Ok(self.literal(c))
            }
            // Term boundaries are filtered out by term(); kept total anyway.
            _ => Err(ParseError::DanglingOperator {
                operator: '|',
                position: self.pos,
            }),
        }
    }

    /// `entry --c--> exit`
    fn literal(&mut self, c: char) -> Fragment {
        let entry = self.fresh();
        let exit = self.fresh();
        self.nfa.add_transition(entry, Symbol::Char(c), exit);
        Fragment { entry, exit }
    }

    /// Epsilon-link `left`'s exit to `right`'s entry.
    fn concatenate(&mut self, left: Fragment, right: Fragment) -> Fragment {
        self.nfa
            .add_transition(left.exit, Symbol::Epsilon, right.entry);
        Fragment {
            entry: left.entry,
            exit: right.exit,
        }
    }

    /// New entry/exit states with epsilon edges into both branches.
    fn alternate(&mut self, upper: Fragment, lower: Fragment) -> Fragment {
        let entry = self.fresh();
        let exit = self.fresh();
        self.nfa.add_transition(entry, Symbol::Epsilon, upper.entry);
        self.nfa.add_transition(entry, Symbol::Epsilon, lower.entry);
        self.nfa.add_transition(upper.exit, Symbol::Epsilon, exit);
        self.nfa.add_transition(lower.exit, Symbol::Epsilon, exit);
        Fragment { entry, exit }
    }

    /// Zero or more repetitions: skip edge plus loop-back edge.
    fn star(&mut self, inner: Fragment) -> Fragment {
        let entry = self.fresh();
        let exit = self.fresh();
        self.nfa.add_transition(entry, Symbol::Epsilon, inner.entry);
        self.nfa.add_transition(inner.exit, Symbol::Epsilon, exit);
        self.nfa.add_transition(entry, Symbol::Epsilon, exit);
        self.nfa.add_transition(inner.exit, Symbol::Epsilon, inner.entry);
        Fragment { entry, exit }
    }

    /// One or more repetitions: the star wiring without the skip edge, so
    /// one pass through the fragment is mandatory.
    fn plus(&mut self, inner: Fragment) -> Fragment {
        let entry = self.fresh();
        let exit = self.fresh();
        self.nfa.add_transition(entry, Symbol::Epsilon, inner.entry);
        self.nfa.add_transition(inner.exit, Symbol::Epsilon, exit);
        self.nfa.add_transition(inner.exit, Symbol::Epsilon, inner.entry);
        Fragment { entry, exit }
    }

    /// Zero or one repetition: alternation with the empty fragment.
    fn question(&mut self, inner: Fragment) -> Fragment {
        let entry = self.fresh();
        let exit = self.fresh();
        self.nfa.add_transition(entry, Symbol::Epsilon, inner.entry);
        self.nfa.add_transition(inner.exit, Symbol::Epsilon, exit);
        self.nfa.add_transition(entry, Symbol::Epsilon, exit);
        Fragment { entry, exit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(pattern: &str) -> Result<Automaton, ParseError> {
        Parser::new(pattern).parse()
    }

    #[test]
    fn literal_fragment_wiring() {
        let nfa = parse("a").unwrap();
        assert!(nfa.simulate("a"));
        assert!(!nfa.simulate(""));
        assert!(!nfa.simulate("aa"));
    }

    #[test]
    fn empty_pattern_accepts_only_the_empty_string() {
        let nfa = parse("").unwrap();
        assert_eq!(nfa.states().len(), 1);
        assert_eq!(nfa.start(), Some(0));
        assert!(nfa.finals().contains(&0));
        assert!(nfa.simulate(""));
        assert!(!nfa.simulate("a"));
    }

    #[test]
    fn stray_close_paren_is_unbalanced() {
        assert_eq!(
            parse("a)b"),
            Err(ParseError::UnbalancedParens { position: 1 })
        );
    }

    #[test]
    fn missing_close_paren_reports_the_open_position() {
        assert_eq!(
            parse("a(bc"),
            Err(ParseError::UnbalancedParens { position: 1 })
        );
    }

    #[test]
    fn leading_star_dangles() {
        assert_eq!(
            parse("*a"),
            Err(ParseError::DanglingOperator {
                operator: '*',
                position: 0
            })
        );
    }

    #[test]
    fn quantifier_after_alternation_bar_dangles() {
        assert_eq!(
            parse("a|+b"),
            Err(ParseError::DanglingOperator {
                operator: '+',
                position: 2
            })
        );
    }

    #[test]
    fn leading_bar_dangles() {
        assert_eq!(
            parse("|a"),
            Err(ParseError::DanglingOperator {
                operator: '|',
                position: 0
            })
        );
    }

    #[test]
    fn trailing_bar_dangles() {
        assert_eq!(
            parse("ab|"),
            Err(ParseError::DanglingOperator {
                operator: '|',
                position: 3
            })
        );
    }

    #[test]
    fn empty_group_is_rejected() {
        assert_eq!(parse("a()b"), Err(ParseError::EmptyGroup { position: 1 }));
    }

    #[test]
    fn double_quantifier_is_rejected() {
        // factor takes a single quantifier; the second has no atom.
        assert_eq!(
            parse("a**"),
            Err(ParseError::DanglingOperator {
                operator: '*',
                position: 2
            })
        );
    }

    #[test]
    fn plus_requires_one_pass() {
        let nfa = parse("a+").unwrap();
        assert!(!nfa.simulate(""));
        assert!(nfa.simulate("a"));
        assert!(nfa.simulate("aaaa"));
    }

    #[test]
    fn question_is_zero_or_one() {
        let nfa = parse("ab?").unwrap();
        assert!(nfa.simulate("a"));
        assert!(nfa.simulate("ab"));
        assert!(!nfa.simulate("abb"));
    }

    #[test]
    fn grouped_alternation_under_star() {
        let nfa = parse("(a|b)*c").unwrap();
        assert!(nfa.simulate("c"));
        assert!(nfa.simulate("ac"));
        assert!(nfa.simulate("babc"));
        assert!(!nfa.simulate("ab"));
    }
}
