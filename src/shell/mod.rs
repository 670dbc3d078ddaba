// imgtool/src/shell/mod.rs
mod history;
pub mod render;

pub use history::{CommandCompleter, ShellHistory};

use crate::commands::{Dispatcher, Outcome};
use crate::core::{ImgToolError, Result};
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use std::io::{BufRead, IsTerminal};

/// The interactive front end: prompt, history, completion, and per-line error reporting.
pub struct Shell {
    dispatcher: Dispatcher,
    history: ShellHistory,
}

impl Shell {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            history: ShellHistory::new(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        render::print_banner();
        // Ctrl-C outside a batch now hints instead of ending the session.
        self.dispatcher.interrupt().set_at_prompt(true);

        if std::io::stdin().is_terminal() && console::user_attended_stderr() {
            self.run_interactive()
        } else {
            println!(
                "{}\n",
                style("Note: Running in basic mode (autocomplete disabled)").yellow()
            );
            self.run_basic()
        }
    }

    fn run_interactive(&mut self) -> Result<()> {
        let theme = ColorfulTheme::default();

        loop {
            let completer = CommandCompleter::new(self.history.clone());
            let input = Input::<String>::with_theme(&theme)
                .with_prompt("imgtool")
                .allow_empty(true)
                .history_with(&mut self.history)
                .completion_with(&completer)
                .interact_text();

            match input {
                Ok(line) => {
                    if !self.handle_line(&line) {
                        return Ok(());
                    }
                }
                Err(dialoguer::Error::IO(e)) => match e.kind() {
                    std::io::ErrorKind::Interrupted => {
                        println!(
                            "\n{}",
                            style("! Interrupted. Type 'exit' to quit").yellow()
                        );
                    }
                    std::io::ErrorKind::UnexpectedEof => {
                        println!("\n{}", style("Goodbye!").cyan());
                        return Ok(());
                    }
                    _ => return Err(ImgToolError::Io(e)),
                },
            }
        }
    }

    fn run_basic(&mut self) -> Result<()> {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            self.history.record(&line);
            if !self.handle_line(&line) {
                return Ok(());
            }
        }

        println!("\n{}", style("Goodbye!").cyan());
        Ok(())
    }

    /// Runs one line; returns false when the session should end.
    fn handle_line(&mut self, line: &str) -> bool {
        match self.dispatcher.dispatch(line) {
            Ok(Outcome::Exit) => {
                println!("\n{}\n", style("Thanks for using ImgTool!").cyan().bold());
                false
            }
            Ok(_) => true,
            Err(ImgToolError::UnknownCommand(command)) => {
                render::print_unknown_command(&command);
                true
            }
            Err(e) => {
                render::print_error(&e);
                true
            }
        }
    }
}
