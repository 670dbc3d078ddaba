// imgtool/src/utils/interrupt.rs
use console::style;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Exit status of a process ended by SIGINT.
const SIGINT_EXIT_CODE: i32 = 130;

/// Shared Ctrl-C state.
///
/// While a batch is armed the signal only raises a flag that the batch runner polls between
/// files. At a shell prompt it prints a hint; anywhere else it ends the process.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    triggered: Arc<AtomicBool>,
    armed: Arc<AtomicBool>,
    at_prompt: Arc<AtomicBool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalAction {
    StopBatch,
    PromptHint,
    Terminate,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&self) -> Result<(), ctrlc::Error> {
        let interrupt = self.clone();
        ctrlc::set_handler(move || match interrupt.handle_signal() {
            SignalAction::StopBatch => {}
            SignalAction::PromptHint => {
                println!("\n{}", style("! Interrupted. Type 'exit' to quit").yellow());
            }
            SignalAction::Terminate => std::process::exit(SIGINT_EXIT_CODE),
        })
    }

    pub fn handle_signal(&self) -> SignalAction {
        if self.armed.load(Ordering::SeqCst) {
            self.trigger();
            SignalAction::StopBatch
        } else if self.at_prompt.load(Ordering::SeqCst) {
            SignalAction::PromptHint
        } else {
            SignalAction::Terminate
        }
    }

    /// Clears any stale flag and routes Ctrl-C into it until the guard drops.
    pub fn arm(&self) -> ArmedGuard {
        self.triggered.store(false, Ordering::SeqCst);
        self.armed.store(true, Ordering::SeqCst);
        ArmedGuard(self.clone())
    }

    pub fn set_at_prompt(&self, at_prompt: bool) {
        self.at_prompt.store(at_prompt, Ordering::SeqCst);
    }

    pub fn trigger(&self) {
        self.triggered.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }
}

pub struct ArmedGuard(Interrupt);

impl Drop for ArmedGuard {
    fn drop(&mut self) {
        self.0.armed.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_outside_a_batch_terminates() {
        let interrupt = Interrupt::new();
        assert_eq!(interrupt.handle_signal(), SignalAction::Terminate);
        assert!(!interrupt.is_triggered());
    }

    #[test]
    fn signal_at_the_prompt_only_hints() {
        let interrupt = Interrupt::new();
        interrupt.set_at_prompt(true);
        assert_eq!(interrupt.handle_signal(), SignalAction::PromptHint);
        assert!(!interrupt.is_triggered());
    }

    #[test]
    fn armed_signal_raises_the_flag_until_disarmed() {
        let interrupt = Interrupt::new();
        interrupt.set_at_prompt(true);
        interrupt.trigger();

        let guard = interrupt.arm();
        assert!(!interrupt.is_triggered());
        assert_eq!(interrupt.handle_signal(), SignalAction::StopBatch);
        assert!(interrupt.is_triggered());

        drop(guard);
        assert_eq!(interrupt.handle_signal(), SignalAction::PromptHint);
    }
}
