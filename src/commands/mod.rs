// imgtool/src/commands/mod.rs
mod flags;

pub use flags::{tokenize, Arity, FlagMap};

use crate::core::{parse_colors, HexColor, ImgToolError, Result, RunSummary, TransformConfig};
use crate::processors::{BatchRunner, Loader};
use crate::shell::render;
use crate::utils::{expand_all, Interrupt};
use flags::{parse_size, parse_tolerance};
use std::path::{Path, PathBuf};

pub const DEFAULT_PROCESS_SIZE: u32 = 48;
pub const DEFAULT_MAGIC_TOLERANCE: u8 = 10;

/// Every command word the shell understands, with its help text.
pub const COMMANDS: [(&str, &str); 10] = [
    ("magic", "All-in-one: resize + remove colors + optimize (shortcut)"),
    ("process", "Process images with all options (advanced)"),
    ("resize", "Quick resize only"),
    ("remove-color", "Quick remove color only"),
    ("preview", "Preview files matching pattern"),
    ("help", "Show available commands"),
    ("examples", "Show usage examples"),
    ("clear", "Clear screen"),
    ("exit", "Exit CLI"),
    ("quit", "Exit CLI"),
];

const PROCESS_FLAGS: [(&str, Arity); 8] = [
    ("input", Arity::Value),
    ("output", Arity::Value),
    ("size", Arity::Value),
    ("remove-color", Arity::Value),
    ("tolerance", Arity::Value),
    ("keep-aspect", Arity::Switch),
    ("suffix", Arity::Value),
    ("overwrite", Arity::Switch),
];

pub const FLAG_HELP: [(&str, &str); 8] = [
    ("--input", "Input pattern (e.g., ./icons/*.png)"),
    ("--output", "Output directory"),
    ("--size", "Target size (default: 48)"),
    ("--remove-color", "HEX colors to remove (repeatable or comma list)"),
    ("--tolerance", "Color tolerance 0-255 (default: 0)"),
    ("--keep-aspect", "Keep aspect ratio"),
    ("--suffix", "Filename suffix (e.g., _48)"),
    ("--overwrite", "Overwrite existing files"),
];

/// A batch transform: which files, where to, and how.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRequest {
    pub name: &'static str,
    pub patterns: Vec<String>,
    pub output_dir: PathBuf,
    pub config: TransformConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Transform(BatchRequest),
    Preview(Vec<String>),
    Help,
    Examples,
    Clear,
    Exit,
}

impl Command {
    /// Parses one input line; a blank line is `None`.
    pub fn parse_line(line: &str) -> Result<Option<Command>> {
        let tokens = tokenize(line)?;
        if tokens.is_empty() {
            return Ok(None);
        }
        Self::parse_tokens(&tokens).map(Some)
    }

    pub fn parse_tokens(tokens: &[String]) -> Result<Command> {
        let (name, args) = tokens
            .split_first()
            .ok_or_else(|| ImgToolError::UnknownCommand(String::new()))?;

        match name.to_lowercase().as_str() {
            "magic" => parse_magic(args),
            "process" => parse_process(args),
            "resize" => parse_resize(args),
            "remove-color" => parse_remove_color(args),
            "preview" => {
                if args.is_empty() {
                    return Err(usage("preview <pattern>"));
                }
                Ok(Command::Preview(args.to_vec()))
            }
            "help" => Ok(Command::Help),
            "examples" => Ok(Command::Examples),
            "clear" => Ok(Command::Clear),
            "exit" | "quit" => Ok(Command::Exit),
            _ => Err(ImgToolError::UnknownCommand(name.clone())),
        }
    }
}

fn usage(text: &str) -> ImgToolError {
    ImgToolError::InvalidFlagValue(format!("usage: {}", text))
}

fn parse_magic(args: &[String]) -> Result<Command> {
    const USAGE: &str = "magic <input> <output> <size> <hex_colors> [tolerance]";
    if !(4..=5).contains(&args.len()) {
        return Err(usage(USAGE));
    }

    let tolerance = match args.get(4) {
        Some(value) => parse_tolerance(value)?,
        None => DEFAULT_MAGIC_TOLERANCE,
    };

    Ok(Command::Transform(BatchRequest {
        name: "magic",
        patterns: vec![args[0].clone()],
        output_dir: PathBuf::from(&args[1]),
        config: TransformConfig {
            target_size: Some(parse_size(&args[2])?),
            keep_aspect: true,
            colors_to_remove: parse_colors(&args[3])?,
            tolerance,
            overwrite: true,
            ..Default::default()
        },
    }))
}

fn parse_process(args: &[String]) -> Result<Command> {
    let flags = FlagMap::parse(args, &PROCESS_FLAGS)?;
    if let Some(extra) = flags.positionals.first() {
        return Err(ImgToolError::InvalidFlagValue(format!(
            "unexpected argument '{}'",
            extra
        )));
    }

    let input = flags.required("input")?;
    let output = flags.required("output")?;

    let target_size = match flags.single("size")? {
        Some(value) => parse_size(value)?,
        None => DEFAULT_PROCESS_SIZE,
    };
    let tolerance = match flags.single("tolerance")? {
        Some(value) => parse_tolerance(value)?,
        None => 0,
    };

    let mut colors: Vec<HexColor> = Vec::new();
    for value in flags.all("remove-color") {
        colors.extend(parse_colors(value)?);
    }

    Ok(Command::Transform(BatchRequest {
        name: "process",
        patterns: vec![input.to_string()],
        output_dir: PathBuf::from(output),
        config: TransformConfig {
            target_size: Some(target_size),
            keep_aspect: flags.switch("keep-aspect"),
            colors_to_remove: colors,
            tolerance,
            filename_suffix: flags.single("suffix")?.unwrap_or_default().to_string(),
            overwrite: flags.switch("overwrite"),
        },
    }))
}

fn parse_resize(args: &[String]) -> Result<Command> {
    let [input, output, size] = args else {
        return Err(usage("resize <input> <output> <size>"));
    };

    Ok(Command::Transform(BatchRequest {
        name: "resize",
        patterns: vec![input.clone()],
        output_dir: PathBuf::from(output),
        config: TransformConfig {
            target_size: Some(parse_size(size)?),
            keep_aspect: false,
            overwrite: true,
            ..Default::default()
        },
    }))
}

fn parse_remove_color(args: &[String]) -> Result<Command> {
    let [input, output, hex] = args else {
        return Err(usage("remove-color <input> <output> <hex>"));
    };

    Ok(Command::Transform(BatchRequest {
        name: "remove-color",
        patterns: vec![input.clone()],
        output_dir: PathBuf::from(output),
        config: TransformConfig {
            target_size: None,
            colors_to_remove: parse_colors(hex)?,
            tolerance: 0,
            overwrite: true,
            ..Default::default()
        },
    }))
}

/// One line of the `preview` table.
#[derive(Debug, Clone)]
pub struct PreviewRow {
    pub path: PathBuf,
    pub bytes: Option<u64>,
    pub dimensions: Option<(u32, u32)>,
}

/// Size and header dimensions of every matched file; unreadable fields are `None`.
pub fn preview<S: AsRef<str>>(patterns: &[S]) -> Vec<PreviewRow> {
    let loader = Loader::new();
    expand_all(patterns)
        .into_iter()
        .map(|path| {
            let bytes = std::fs::metadata(&path).ok().map(|m| m.len());
            let dimensions = loader.probe(&path).ok().map(|p| (p.width, p.height));
            PreviewRow {
                path,
                bytes,
                dimensions,
            }
        })
        .collect()
}

#[derive(Debug)]
pub enum Outcome {
    Done,
    Batch(RunSummary),
    Exit,
}

/// Executes parsed commands against the filesystem and prints their results.
pub struct Dispatcher {
    interrupt: Interrupt,
    show_progress: bool,
}

impl Dispatcher {
    pub fn new(interrupt: Interrupt) -> Self {
        Self {
            interrupt,
            show_progress: console::Term::stderr().is_term(),
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn interrupt(&self) -> &Interrupt {
        &self.interrupt
    }

    /// Parses and executes one line. Blank lines do nothing.
    pub fn dispatch(&self, line: &str) -> Result<Outcome> {
        match Command::parse_line(line)? {
            Some(command) => self.execute(command),
            None => Ok(Outcome::Done),
        }
    }

    pub fn execute(&self, command: Command) -> Result<Outcome> {
        match command {
            Command::Transform(request) => self.run_batch(&request).map(Outcome::Batch),
            Command::Preview(patterns) => {
                let rows = preview(&patterns);
                if rows.is_empty() {
                    render::print_no_matches(&patterns.join(" "));
                } else {
                    render::print_preview(&rows);
                }
                Ok(Outcome::Done)
            }
            Command::Help => {
                render::print_help();
                Ok(Outcome::Done)
            }
            Command::Examples => {
                render::print_examples();
                Ok(Outcome::Done)
            }
            Command::Clear => {
                render::clear_screen();
                render::print_banner();
                Ok(Outcome::Done)
            }
            Command::Exit => Ok(Outcome::Exit),
        }
    }

    pub fn run_batch(&self, request: &BatchRequest) -> Result<RunSummary> {
        let _armed = self.interrupt.arm();
        let files = expand_all(&request.patterns);
        if files.is_empty() {
            return Err(ImgToolError::NoFilesMatched(request.patterns.join(" ")));
        }

        if request.name == "magic" {
            render::print_magic_banner();
        }
        render::print_config(request, files.len());

        let runner = BatchRunner::new(request.config.clone())
            .with_interrupt(self.interrupt.clone())
            .with_progress(self.show_progress);
        let summary = runner.run_files(files, &request.output_dir)?;

        render::print_summary(&summary, &absolute(&request.output_dir));
        Ok(summary)
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
