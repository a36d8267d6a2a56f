//! CLI argument definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::pda::PdaMode;

/// Which of a pattern's automata to operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AutomatonForm {
    /// The compiled NFA.
    #[default]
    Nfa,
    /// The determinized DFA.
    Dfa,
}

/// Top-level CLI.
#[derive(Parser)]
#[command(name = "formalsim")]
#[command(about = "Formal-language simulator: regex to NFA/DFA, approximate matching, pushdown automata")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive REPL
    Repl,

    /// Compile a regex and report the resulting automata
    Compile {
        /// Regular expression (literals, `|`, `*`, `+`, `?`, groups)
        pattern: String,
    },

    /// Test a string against a pattern's NFA and DFA
    Match {
        /// Regular expression
        pattern: String,

        /// Input string to simulate
        input: String,

        /// Print the DFA state trace
        #[arg(short, long)]
        trace: bool,
    },

    /// Search for a pattern in a text with bounded errors
    Approx {
        /// Pattern to search for (literal string)
        pattern: String,

        /// Text to search in
        text: String,

        /// Maximum number of single-character edits
        #[arg(short = 'k', long, default_value_t = 1)]
        max_errors: isize,
    },

    /// Simulate a pushdown automaton and print its trace
    Pda {
        /// Input string
        input: String,

        /// Stack machine to simulate
        #[arg(short, long, default_value = "counting")]
        mode: PdaMode,
    },

    /// Export an automaton as a DOT digraph
    Export {
        /// Regular expression
        pattern: String,

        /// Automaton to export
        #[arg(short, long, default_value = "nfa")]
        form: AutomatonForm,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the right-linear grammar induced by an automaton
    Grammar {
        /// Regular expression
        pattern: String,

        /// Automaton to derive the grammar from
        #[arg(short, long, default_value = "dfa")]
        form: AutomatonForm,
    },
}
