use anyhow::Context;
use clap::Parser;
use console::style;
use imgtool::cli::is_informational;
use imgtool::shell::render;
use imgtool::{Cli, Command, Dispatcher, ImgToolError, Interrupt, Mode, Outcome, Shell};
use log::LevelFilter;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if is_informational(&e) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
        }
    };

    // Initialize logger; RUST_LOG still wins when set
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<ImgToolError>() {
                Some(ImgToolError::UnknownCommand(command)) => render::print_unknown_command(command),
                _ => render::print_error(&format!("{:#}", e)),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let interrupt = Interrupt::new();
    if let Err(e) = interrupt.install() {
        log::warn!("Could not install Ctrl-C handler: {}", e);
    }

    let dispatcher = Dispatcher::new(interrupt);

    match cli.mode()? {
        Mode::Interactive => {
            Shell::new(dispatcher).run()?;
            Ok(ExitCode::SUCCESS)
        }
        Mode::SingleShot(words) => {
            let command = Command::parse_tokens(&words)?;
            Ok(exit_code(&dispatcher.execute(command)?))
        }
        Mode::Direct(request) => {
            println!(
                "\n{}\n",
                style(format!("Processing {}...", request.patterns.join(" "))).cyan().bold()
            );
            Ok(exit_code(&dispatcher.execute(Command::Transform(request))?))
        }
        Mode::Script(path) => run_script(&dispatcher, &path),
    }
}

fn run_script(dispatcher: &Dispatcher, path: &Path) -> anyhow::Result<ExitCode> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;

    let mut code = ExitCode::SUCCESS;
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        println!("{} {}", style(">").cyan().bold(), line);
        let outcome = dispatcher
            .dispatch(line)
            .with_context(|| format!("{}:{}", path.display(), index + 1))?;

        if let Outcome::Exit = outcome {
            break;
        }
        if has_failed(&outcome) {
            code = ExitCode::FAILURE;
        }
    }

    Ok(code)
}

fn has_failed(outcome: &Outcome) -> bool {
    matches!(outcome, Outcome::Batch(summary) if summary.has_failures() || summary.interrupted)
}

fn exit_code(outcome: &Outcome) -> ExitCode {
    if has_failed(outcome) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
