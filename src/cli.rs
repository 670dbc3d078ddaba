// imgtool/src/cli.rs
use crate::commands::BatchRequest;
use crate::core::{parse_colors, ImgToolError, Result, TransformConfig};
use clap::{Args, Parser};
use std::path::PathBuf;

pub const DEFAULT_DIRECT_TOLERANCE: u8 = 10;
pub const DEFAULT_DIRECT_OUTPUT: &str = "./output";

#[derive(Parser, Debug)]
#[command(name = "imgtool")]
#[command(version)]
#[command(about = "ImgTool - Batch image processor (resize & remove colors)")]
#[command(after_help = "Run without arguments to enter interactive mode.\n\n\
    Examples:\n  \
    imgtool magic './icons/*.png' ./output 64 '#FFFFFF,#000000' 10\n  \
    imgtool -i '*.png' -s 48 -c '#FFFFFF' -k\n  \
    imgtool --script jobs.txt")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Run commands from a file, one per line ('#' starts a comment line)
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    #[command(flatten)]
    pub direct: DirectArgs,

    /// A single shell command to run instead of the interactive prompt
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

/// Flag-only front end: one pattern, always overwriting.
#[derive(Args, Debug, Default)]
pub struct DirectArgs {
    /// Input file pattern (e.g. "*.png" or "image.jpg")
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output directory (default: ./output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Target size in pixels (max width/height)
    #[arg(short, long)]
    pub size: Option<u32>,

    /// HEX colors to remove (e.g. #FFFFFF #000000)
    #[arg(short, long, num_args = 1..)]
    pub colors: Vec<String>,

    /// Color matching tolerance 0-255
    #[arg(short, long, default_value_t = DEFAULT_DIRECT_TOLERANCE)]
    pub tolerance: u8,

    /// Keep aspect ratio with transparent padding
    #[arg(short, long)]
    pub keep_aspect: bool,

    /// Suffix for output filenames
    #[arg(long, default_value = "")]
    pub suffix: String,

    /// Overwrite existing files (direct mode always overwrites)
    #[arg(long)]
    pub overwrite: bool,
}

impl DirectArgs {
    pub fn is_requested(&self) -> bool {
        self.input.is_some() || self.output.is_some() || self.size.is_some() || !self.colors.is_empty()
    }

    pub fn to_request(&self) -> Result<BatchRequest> {
        let input = self.input.clone().ok_or_else(|| {
            ImgToolError::InvalidFlagValue("--input is required in direct mode".to_string())
        })?;

        if self.size == Some(0) {
            return Err(ImgToolError::InvalidFlagValue(
                "size must be a positive integer, got '0'".to_string(),
            ));
        }

        let mut colors = Vec::new();
        for value in &self.colors {
            colors.extend(parse_colors(value)?);
        }

        Ok(BatchRequest {
            name: "direct",
            patterns: vec![input],
            output_dir: self
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DIRECT_OUTPUT)),
            config: TransformConfig {
                target_size: self.size,
                keep_aspect: self.keep_aspect,
                colors_to_remove: colors,
                tolerance: self.tolerance,
                filename_suffix: self.suffix.clone(),
                overwrite: true,
            },
        })
    }
}

/// `--help` and `--version` surface as clap errors but are not failures.
pub fn is_informational(error: &clap::Error) -> bool {
    matches!(
        error.kind(),
        clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
    )
}

#[derive(Debug)]
pub enum Mode {
    Interactive,
    SingleShot(Vec<String>),
    Script(PathBuf),
    Direct(BatchRequest),
}

impl Cli {
    pub fn mode(&self) -> Result<Mode> {
        if let Some(script) = &self.script {
            return Ok(Mode::Script(script.clone()));
        }
        if self.direct.is_requested() {
            return self.direct.to_request().map(Mode::Direct);
        }
        if !self.command.is_empty() {
            return Ok(Mode::SingleShot(self.command.clone()));
        }
        Ok(Mode::Interactive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("imgtool").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_arguments_is_interactive() {
        assert!(matches!(parse(&[]).mode().unwrap(), Mode::Interactive));
    }

    #[test]
    fn trailing_words_form_one_command() {
        let cli = parse(&["-v", "process", "--input", "a/*.png", "--output", "out", "--overwrite"]);
        assert!(cli.verbose);
        match cli.mode().unwrap() {
            Mode::SingleShot(words) => {
                assert_eq!(words, ["process", "--input", "a/*.png", "--output", "out", "--overwrite"])
            }
            other => panic!("unexpected mode {:?}", other),
        }
    }

    #[test]
    fn direct_flags_build_a_request() {
        let cli = parse(&["-i", "*.png", "-s", "48", "-c", "#FFFFFF", "#000", "-k"]);
        let Mode::Direct(request) = cli.mode().unwrap() else {
            panic!("expected direct mode");
        };
        assert_eq!(request.output_dir, PathBuf::from(DEFAULT_DIRECT_OUTPUT));
        assert_eq!(request.config.target_size, Some(48));
        assert_eq!(request.config.tolerance, DEFAULT_DIRECT_TOLERANCE);
        assert_eq!(request.config.colors_to_remove.len(), 2);
        assert!(request.config.keep_aspect && request.config.overwrite);
    }

    #[test]
    fn bad_flag_values_are_failures() {
        for args in [&["-i", "x.png", "-s", "abc"][..], &["-t", "300", "-i", "x.png"][..]] {
            let error = Cli::try_parse_from(std::iter::once("imgtool").chain(args.iter().copied()))
                .unwrap_err();
            assert!(!is_informational(&error));
        }

        let help = Cli::try_parse_from(["imgtool", "--help"]).unwrap_err();
        assert!(is_informational(&help));
        let version = Cli::try_parse_from(["imgtool", "--version"]).unwrap_err();
        assert!(is_informational(&version));
    }

    #[test]
    fn direct_mode_needs_input() {
        let cli = parse(&["-o", "out"]);
        assert!(matches!(cli.mode(), Err(ImgToolError::InvalidFlagValue(_))));
    }
}
