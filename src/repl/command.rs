//! Command parsing and execution
//!
//! Defines all REPL commands and their execution logic.

use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use std::fs;

use crate::cli::args::AutomatonForm;
use crate::export::{grammar_productions, to_dot};
use crate::matcher::approximate_match;
use crate::pda;
use crate::pda::PdaMode;

use super::state::ReplState;

/// REPL command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Build NFA and DFA from a regex: `regex <pattern>`
    Regex {
        /// Pattern to compile
        pattern: String,
    },
    /// Test a string against the current automata: `match <string>`
    Match {
        /// Input string (empty tests the empty string)
        input: String,
    },
    /// Approximate match: `approx <pattern> <text> [max-errors]`
    Approx {
        /// Pattern to search for
        pattern: String,
        /// Text to search in
        text: String,
        /// Error budget
        max_errors: isize,
    },
    /// Run the PDA in the current mode: `pda <string>`
    Pda {
        /// Input string (empty runs the empty string)
        input: String,
    },
    /// Select the PDA mode: `mode <counting|brackets>`
    Mode {
        /// Mode to select
        mode: PdaMode,
    },
    /// Export the current automata to DOT files: `export`
    Export,
    /// Print the grammar of a current automaton: `grammar [nfa|dfa]`
    Grammar {
        /// Automaton to derive the grammar from
        form: AutomatonForm,
    },
    /// Show help: `help`
    Help,
    /// Leave the REPL: `exit`
    Exit,
}

/// Outcome of executing one REPL command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    /// Keep reading input.
    Continue,
    /// Terminate the loop.
    Exit,
}

impl Command {
    /// Parse one input line. Errors are user-facing usage messages.
    pub fn parse(line: &str) -> Result<Command, String> {
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            return Err("Type 'help' for commands.".to_string());
        };
        let rest: Vec<&str> = words.collect();

        match keyword {
            "regex" => match rest.as_slice() {
                [pattern] => Ok(Command::Regex {
                    pattern: (*pattern).to_string(),
                }),
                _ => Err("Usage: regex <pattern>".to_string()),
            },
            "match" => match rest.as_slice() {
                [] => Ok(Command::Match {
                    input: String::new(),
                }),
                [input] => Ok(Command::Match {
                    input: (*input).to_string(),
                }),
                _ => Err("Usage: match <string>".to_string()),
            },
            "approx" => match rest.as_slice() {
                [pattern, text] => Ok(Command::Approx {
                    pattern: (*pattern).to_string(),
                    text: (*text).to_string(),
                    max_errors: 1,
                }),
                [pattern, text, k] => {
                    let max_errors = k
                        .parse::<isize>()
                        .map_err(|_| format!("'{k}' is not a number"))?;
                    Ok(Command::Approx {
                        pattern: (*pattern).to_string(),
                        text: (*text).to_string(),
                        max_errors,
                    })
                }
                _ => Err("Usage: approx <pattern> <text> [max-errors]".to_string()),
            },
            "pda" => match rest.as_slice() {
                [] => Ok(Command::Pda {
                    input: String::new(),
                }),
                [input] => Ok(Command::Pda {
                    input: (*input).to_string(),
                }),
                _ => Err("Usage: pda <string>".to_string()),
            },
            "mode" => match rest.as_slice() {
                ["counting"] => Ok(Command::Mode {
                    mode: PdaMode::Counting,
                }),
                ["brackets"] => Ok(Command::Mode {
                    mode: PdaMode::Brackets,
                }),
                _ => Err("Usage: mode <counting|brackets>".to_string()),
            },
            "export" => match rest.as_slice() {
                [] => Ok(Command::Export),
                _ => Err("Usage: export".to_string()),
            },
            "grammar" => match rest.as_slice() {
                [] => Ok(Command::Grammar {
                    form: AutomatonForm::Dfa,
                }),
                ["nfa"] => Ok(Command::Grammar {
                    form: AutomatonForm::Nfa,
                }),
                ["dfa"] => Ok(Command::Grammar {
                    form: AutomatonForm::Dfa,
                }),
                _ => Err("Usage: grammar [nfa|dfa]".to_string()),
            },
            "help" => Ok(Command::Help),
            "exit" | "quit" => Ok(Command::Exit),
            unknown => Err(format!("Unknown command '{unknown}'. Type 'help'.")),
        }
    }
}

fn verdict(accepted: bool, yes: &str, no: &str) -> ColoredString {
    if accepted {
        yes.green().bold()
    } else {
        no.red().bold()
    }
}

/// Execute one command against the session state.
pub fn execute(state: &mut ReplState, command: Command) -> Result<CommandResult> {
    match command {
        Command::Regex { pattern } => {
            state
                .build(&pattern)
                .with_context(|| format!("invalid pattern '{pattern}'"))?;
            println!("Built automata for: {pattern}");
            println!("Use 'export' to visualize or 'match' to test.");
        }
        Command::Match { input } => match (state.nfa(), state.dfa()) {
            (Some(nfa), Some(dfa)) => {
                println!("Testing {input:?}:");
                println!("  NFA: {}", verdict(nfa.simulate(&input), "ACCEPT", "REJECT"));
                println!("  DFA: {}", verdict(dfa.simulate(&input), "ACCEPT", "REJECT"));
            }
            _ => println!("No automata built. Use 'regex' first."),
        },
        Command::Approx {
            pattern,
            text,
            max_errors,
        } => {
            let found = approximate_match(&text, &pattern, max_errors);
            println!(
                "Approximate match ({max_errors} errors): {}",
                verdict(found, "FOUND", "NOT FOUND")
            );
        }
        Command::Pda { input } => {
            let result = pda::simulate(&input, state.pda_mode);
            println!(
                "PDA Result: {}",
                verdict(result.accepted, "ACCEPT", "REJECT")
            );
            println!("Trace:");
            for line in &result.trace {
                println!("  {line}");
            }
        }
        Command::Mode { mode } => {
            state.pda_mode = mode;
            match mode {
                PdaMode::Counting => println!("PDA mode: counting (a^n b^n)"),
                PdaMode::Brackets => println!("PDA mode: brackets (balanced markup)"),
            }
        }
        Command::Export => match (state.nfa(), state.dfa()) {
            (Some(nfa), Some(dfa)) => {
                fs::write("nfa.dot", to_dot(nfa)).context("writing nfa.dot")?;
                fs::write("dfa.dot", to_dot(dfa)).context("writing dfa.dot")?;
                println!("Exported to nfa.dot and dfa.dot");
            }
            _ => println!("No automata built. Use 'regex' first."),
        },
        Command::Grammar { form } => {
            let automaton = match form {
                AutomatonForm::Nfa => state.nfa(),
                AutomatonForm::Dfa => state.dfa(),
            };
            match automaton {
                Some(automaton) => {
                    for production in grammar_productions(automaton) {
                        println!("{production}");
                    }
                }
                None => println!("No automata built. Use 'regex' first."),
            }
        }
        Command::Help => print_help(),
        Command::Exit => return Ok(CommandResult::Exit),
    }

    Ok(CommandResult::Continue)
}

fn print_help() {
    println!("Commands:");
    println!("  regex <pattern>                Build NFA and DFA from a regex");
    println!("  match <string>                 Test a string against the current automata");
    println!("  approx <pat> <txt> [k]         Approximate match with up to k errors");
    println!("  pda <string>                   Run the PDA in the current mode");
    println!("  mode <counting|brackets>       Select the PDA mode");
    println!("  export                         Export current automata to DOT files");
    println!("  grammar [nfa|dfa]              Print the induced grammar");
    println!("  help                           Show this help");
    println!("  exit                           Exit");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_regex_command() {
        assert_eq!(
            Command::parse("regex (a|b)*abb"),
            Ok(Command::Regex {
                pattern: "(a|b)*abb".to_string()
            })
        );
    }

    #[test]
    fn parses_approx_with_default_budget() {
        assert_eq!(
            Command::parse("approx tall ball"),
            Ok(Command::Approx {
                pattern: "tall".to_string(),
                text: "ball".to_string(),
                max_errors: 1,
            })
        );
    }

    #[test]
    fn rejects_bad_error_budget() {
        assert!(Command::parse("approx a b x").is_err());
    }

    #[test]
    fn parses_mode_change() {
        assert_eq!(
            Command::parse("mode brackets"),
            Ok(Command::Mode {
                mode: PdaMode::Brackets
            })
        );
    }

    #[test]
    fn unknown_command_suggests_help() {
        let message = Command::parse("frobnicate").unwrap_err();
        assert!(message.contains("help"));
    }
}
