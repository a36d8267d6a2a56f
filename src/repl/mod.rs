//! Interactive REPL for formalsim
//!
//! A Read-Eval-Print Loop over the engine, holding the current pattern's
//! NFA/DFA pair and the selected PDA mode as session state.

pub mod command;
pub mod state;

pub use command::{Command, CommandResult};
pub use state::ReplState;

/// REPL configuration
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Prompt string
    pub prompt: String,
    /// History file path
    pub history_file: Option<std::path::PathBuf>,
    /// Maximum history entries
    pub max_history: usize,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "formalsim> ".to_string(),
            history_file: Some(
                dirs::home_dir()
                    .unwrap_or_else(|| std::path::PathBuf::from("."))
                    .join(".formalsim_history"),
            ),
            max_history: 1000,
        }
    }
}
