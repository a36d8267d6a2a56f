//! Pushdown automaton simulation with step tracing.
//!
//! Two independently selectable stack machines:
//!
//! - [`PdaMode::Counting`] recognizes aⁿbⁿ with a two-phase machine that
//!   pushes a marker per `a` and pops one per `b`.
//! - [`PdaMode::Brackets`] recognizes balanced brackets, optionally lexing
//!   tag-like markup down to `(` and `)` first.
//!
//! Every push, pop, skip, and rejection reason is appended to the trace;
//! the trace is the primary debugging artifact returned to callers; the
//! core itself never logs.

mod tokenizer;

use smallvec::SmallVec;

use tokenizer::tokenize_markup;

/// Which stack machine to simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum PdaMode {
    /// The context-free language aⁿbⁿ.
    #[default]
    Counting,
    /// Balanced brackets, with tag-like markup lexed to brackets.
    Brackets,
}

/// Outcome of one simulation: the verdict plus the step-by-step trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdaResult {
    /// Whether the input was accepted.
    pub accepted: bool,
    /// Human-readable log of every stack operation and decision, in the
    /// order processed.
    pub trace: Vec<String>,
}

/// Phase of the counting machine. Once a `b` has been read there is no
/// returning to the push phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    ReadingA,
    ReadingB,
}

/// Simulate the selected pushdown machine over `input`.
///
/// Total over any input; malformed input is a rejection with the reason in
/// the trace, never an error.
pub fn simulate(input: &str, mode: PdaMode) -> PdaResult {
    match mode {
        PdaMode::Counting => simulate_counting(input),
        PdaMode::Brackets => simulate_brackets(input),
    }
}

fn simulate_counting(input: &str) -> PdaResult {
    let mut trace = vec!["Start: Stack empty".to_string()];
    let mut stack: SmallVec<[char; 16]> = SmallVec::new();
    let mut phase = Phase::ReadingA;

    for c in input.chars() {
        match (phase, c) {
            (Phase::ReadingA, 'a') => {
                stack.push('A');
                trace.push(format!("Read 'a': Push 'A' -> Stack size: {}", stack.len()));
            }
            (Phase::ReadingB, 'a') => {
                trace.push("Read 'a': 'a' after 'b'. REJECT".to_string());
                return PdaResult {
                    accepted: false,
                    trace,
                };
            }
            (_, 'b') => {
                if stack.pop().is_none() {
                    trace.push("Read 'b': Stack empty! REJECT".to_string());
                    return PdaResult {
                        accepted: false,
                        trace,
                    };
                }
                trace.push(format!("Read 'b': Pop 'A' -> Stack size: {}", stack.len()));
                phase = Phase::ReadingB;
            }
            (_, other) => {
                trace.push(format!("Read '{other}': Unexpected symbol. REJECT"));
                return PdaResult {
                    accepted: false,
                    trace,
                };
            }
        }
    }

    if stack.is_empty() {
        trace.push("End: Stack empty. ACCEPT".to_string());
        PdaResult {
            accepted: true,
            trace,
        }
    } else {
        trace.push("End: Stack not empty. REJECT".to_string());
        PdaResult {
            accepted: false,
            trace,
        }
    }
}

fn simulate_brackets(input: &str) -> PdaResult {
    let mut trace = vec!["Start: Stack []".to_string()];

    // The lexer only runs when the input looks like markup at all.
    let tokenized;
    let effective: &str = if input.contains('<') && input.contains('>') {
        trace.push("Lexer: Detected markup tags.".to_string());
        tokenized = tokenize_markup(input);
        if tokenized != input {
            trace.push(format!("Lexer: Tokenized \"{input}\" -> \"{tokenized}\""));
        }
        &tokenized
    } else {
        input
    };

    let mut stack: SmallVec<[char; 16]> = SmallVec::new();
    for c in effective.chars() {
        match c {
            '(' => {
                stack.push('(');
                trace.push(format!(
                    "Read '(': Push '('. Stack: [{}]",
                    stack.iter().collect::<String>()
                ));
            }
            ')' => {
                if stack.pop().is_none() {
                    trace.push("Read ')': Error (Empty Stack). REJECT.".to_string());
                    return PdaResult {
                        accepted: false,
                        trace,
                    };
                }
                trace.push(format!(
                    "Read ')': Pop '('. Stack: [{}]",
                    stack.iter().collect::<String>()
                ));
            }
            other => {
                // Transparent: neither pushed nor popped.
                trace.push(format!("Read '{other}': Ignore/Skip."));
            }
        }
    }

    if stack.is_empty() {
        trace.push("End: Stack Empty. ACCEPT.".to_string());
        PdaResult {
            accepted: true,
            trace,
        }
    } else {
        trace.push(format!(
            "End: Stack [{}] (Not Empty). REJECT.",
            stack.iter().collect::<String>()
        ));
        PdaResult {
            accepted: false,
            trace,
        }
    }
}
