//! formalsim - formal-language simulator
//!
//! Provides one-shot CLI subcommands over the engine and an interactive
//! REPL holding the current automata as session state.

use clap::Parser;
use colored::Colorize;
use std::process;

use formalsim::cli::{commands, Cli, Commands};
use formalsim::repl::{command, Command, CommandResult, ReplConfig, ReplState};
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::{Config, Editor};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Repl => run_repl(ReplConfig::default()),
        other => commands::execute(other),
    };

    if let Err(e) = result {
        eprintln!("{}: {e:#}", "Error".red().bold());
        process::exit(1);
    }
}

fn run_repl(config: ReplConfig) -> anyhow::Result<()> {
    let rustyline_config = Config::builder()
        .max_history_size(config.max_history)?
        .build();
    let mut editor: Editor<(), FileHistory> = Editor::with_config(rustyline_config)?;
    if let Some(path) = &config.history_file {
        // Missing history is fine on first launch.
        let _ = editor.load_history(path);
    }

    println!("=== Formal Language Simulator ===");
    println!("Type 'help' for commands.");

    let mut state = ReplState::new();
    loop {
        match editor.readline(&config.prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);

                match Command::parse(line) {
                    Ok(parsed) => match command::execute(&mut state, parsed) {
                        Ok(CommandResult::Continue) => {}
                        Ok(CommandResult::Exit) => break,
                        Err(e) => eprintln!("{}: {e:#}", "Error".red().bold()),
                    },
                    Err(message) => println!("{message}"),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(path) = &config.history_file {
        let _ = editor.save_history(path);
    }
    Ok(())
}
