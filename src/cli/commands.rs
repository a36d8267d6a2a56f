//! CLI command implementations

use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use std::fs;

use crate::automaton::Automaton;
use crate::determinize::determinize;
use crate::export::{grammar_productions, to_dot};
use crate::matcher::approximate_match;
use crate::pda;
use crate::pda::PdaMode;
use crate::regex::compile;

use super::args::{AutomatonForm, Commands};

/// Execute a CLI command
pub fn execute(command: Commands) -> Result<()> {
    match command {
        Commands::Repl => {
            // Handled in main.rs
            unreachable!("REPL command should be handled in main");
        }
        Commands::Compile { pattern } => cmd_compile(&pattern),
        Commands::Match {
            pattern,
            input,
            trace,
        } => cmd_match(&pattern, &input, trace),
        Commands::Approx {
            pattern,
            text,
            max_errors,
        } => cmd_approx(&pattern, &text, max_errors),
        Commands::Pda { input, mode } => cmd_pda(&input, mode),
        Commands::Export {
            pattern,
            form,
            output,
        } => cmd_export(&pattern, form, output),
        Commands::Grammar { pattern, form } => cmd_grammar(&pattern, form),
    }
}

/// Compile a pattern into its NFA/DFA pair.
fn build(pattern: &str) -> Result<(Automaton, Automaton)> {
    let nfa = compile(pattern).with_context(|| format!("invalid pattern '{pattern}'"))?;
    let dfa = determinize(&nfa);
    Ok((nfa, dfa))
}

fn pick(form: AutomatonForm, nfa: Automaton, dfa: Automaton) -> Automaton {
    match form {
        AutomatonForm::Nfa => nfa,
        AutomatonForm::Dfa => dfa,
    }
}

fn verdict(accepted: bool, yes: &str, no: &str) -> ColoredString {
    if accepted {
        yes.green().bold()
    } else {
        no.red().bold()
    }
}

fn cmd_compile(pattern: &str) -> Result<()> {
    let (nfa, dfa) = build(pattern)?;
    println!("Pattern: {pattern}");
    for (name, automaton) in [("NFA", &nfa), ("DFA", &dfa)] {
        println!(
            "  {name}: {} states, {} transitions, {} final",
            automaton.states().len(),
            automaton.edges().count(),
            automaton.finals().len()
        );
    }
    Ok(())
}

fn cmd_match(pattern: &str, input: &str, trace: bool) -> Result<()> {
    let (nfa, dfa) = build(pattern)?;
    println!("Testing {input:?} against {pattern}:");
    println!("  NFA: {}", verdict(nfa.simulate(input), "ACCEPT", "REJECT"));
    println!("  DFA: {}", verdict(dfa.simulate(input), "ACCEPT", "REJECT"));
    if trace {
        let visited: Vec<String> = dfa
            .state_trace(input)
            .into_iter()
            .map(|state| format!("q{state}"))
            .collect();
        println!("  DFA trace: {}", visited.join(" -> "));
    }
    Ok(())
}

fn cmd_approx(pattern: &str, text: &str, max_errors: isize) -> Result<()> {
    let found = approximate_match(text, pattern, max_errors);
    println!(
        "Approximate match ({max_errors} errors): {}",
        verdict(found, "FOUND", "NOT FOUND")
    );
    Ok(())
}

fn cmd_pda(input: &str, mode: PdaMode) -> Result<()> {
    let result = pda::simulate(input, mode);
    println!(
        "PDA Result: {}",
        verdict(result.accepted, "ACCEPT", "REJECT")
    );
    println!("Trace:");
    for line in &result.trace {
        println!("  {line}");
    }
    Ok(())
}

fn cmd_export(pattern: &str, form: AutomatonForm, output: Option<std::path::PathBuf>) -> Result<()> {
    let (nfa, dfa) = build(pattern)?;
    let dot = to_dot(&pick(form, nfa, dfa));
    match output {
        Some(path) => {
            fs::write(&path, &dot).with_context(|| format!("writing {}", path.display()))?;
            println!("Exported to {}", path.display());
        }
        None => print!("{dot}"),
    }
    Ok(())
}

fn cmd_grammar(pattern: &str, form: AutomatonForm) -> Result<()> {
    let (nfa, dfa) = build(pattern)?;
    for production in grammar_productions(&pick(form, nfa, dfa)) {
        println!("{production}");
    }
    Ok(())
}
