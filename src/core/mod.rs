// imgtool/src/core/mod.rs
pub mod color;
pub mod processor;

use std::path::PathBuf;
use thiserror::Error;

pub use color::{parse_colors, HexColor};

/// Largest square output side; a `MAX_TARGET_SIZE`² RGBA canvas is 1 GiB.
pub const MAX_TARGET_SIZE: u32 = 16_384;

/// How a single invocation transforms each matched image.
///
/// Built once per command and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformConfig {
    pub target_size: Option<u32>,
    pub keep_aspect: bool,
    pub colors_to_remove: Vec<HexColor>,
    pub tolerance: u8,
    pub filename_suffix: String,
    pub overwrite: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            target_size: None,
            keep_aspect: false,
            colors_to_remove: Vec::new(),
            tolerance: 0,
            filename_suffix: String::new(),
            overwrite: false,
        }
    }
}

impl TransformConfig {
    pub fn validate(&self) -> Result<()> {
        match self.target_size {
            Some(0) => Err(ImgToolError::TransformError(
                "Target size must be a positive number of pixels".to_string(),
            )),
            Some(size) if size > MAX_TARGET_SIZE => Err(ImgToolError::TransformError(format!(
                "Target size too large (max {} pixels)",
                MAX_TARGET_SIZE
            ))),
            _ => Ok(()),
        }
    }

    /// True when the transform leaves the source untouched.
    pub fn is_noop(&self) -> bool {
        self.target_size.is_none() && self.colors_to_remove.is_empty()
    }

    /// True when the output carries transparency and must go to an alpha-capable format.
    pub fn produces_alpha(&self) -> bool {
        !self.colors_to_remove.is_empty() || (self.target_size.is_some() && self.keep_aspect)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Success,
    Skipped,
    Failed,
}

#[derive(Debug, Clone)]
pub struct FileJob {
    pub source_path: PathBuf,
    pub destination_path: PathBuf,
    pub status: JobStatus,
    pub error_message: Option<String>,
}

impl FileJob {
    pub fn new(source_path: PathBuf, destination_path: PathBuf) -> Self {
        Self {
            source_path,
            destination_path,
            status: JobStatus::Pending,
            error_message: None,
        }
    }

    pub fn fail(&mut self, error: &ImgToolError) {
        self.status = JobStatus::Failed;
        self.error_message = Some(error.to_string());
    }
}

#[derive(Debug, Clone)]
pub struct FileFailure {
    pub path: PathBuf,
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Debug, Default, Clone)]
pub struct RunSummary {
    pub total_matched: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failures: Vec<FileFailure>,
    pub interrupted: bool,
}

impl RunSummary {
    pub fn new(total_matched: usize) -> Self {
        Self {
            total_matched,
            ..Default::default()
        }
    }

    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    pub fn record_failure(&mut self, path: PathBuf, error: &ImgToolError) {
        self.failed += 1;
        self.failures.push(FileFailure {
            path,
            kind: error.kind(),
            message: error.to_string(),
        });
    }

    /// Jobs never attempted because the run was interrupted.
    pub fn pending(&self) -> usize {
        self.total_matched
            .saturating_sub(self.succeeded + self.skipped + self.failed)
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidColorFormat,
    NoFilesMatched,
    DecodeError,
    TransformError,
    WriteError,
    DestinationConflict,
    UnknownCommand,
    InvalidFlagValue,
    Io,
}

#[derive(Error, Debug)]
pub enum ImgToolError {
    #[error("Invalid HEX color: {0}")]
    InvalidColorFormat(String),

    #[error("No files found matching pattern: {0}")]
    NoFilesMatched(String),

    #[error("Failed to decode {path}: {reason}")]
    DecodeError { path: PathBuf, reason: String },

    #[error("Transform error: {0}")]
    TransformError(String),

    #[error("Failed to write {path}: {reason}")]
    WriteError { path: PathBuf, reason: String },

    #[error("Destination {path} is already produced by {other} in this run")]
    DestinationConflict { path: PathBuf, other: PathBuf },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid flag value: {0}")]
    InvalidFlagValue(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ImgToolError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImgToolError::InvalidColorFormat(_) => ErrorKind::InvalidColorFormat,
            ImgToolError::NoFilesMatched(_) => ErrorKind::NoFilesMatched,
            ImgToolError::DecodeError { .. } => ErrorKind::DecodeError,
            ImgToolError::TransformError(_) => ErrorKind::TransformError,
            ImgToolError::WriteError { .. } => ErrorKind::WriteError,
            ImgToolError::DestinationConflict { .. } => ErrorKind::DestinationConflict,
            ImgToolError::UnknownCommand(_) => ErrorKind::UnknownCommand,
            ImgToolError::InvalidFlagValue(_) => ErrorKind::InvalidFlagValue,
            ImgToolError::Io(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn write(path: &std::path::Path, reason: impl ToString) -> Self {
        ImgToolError::WriteError {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn decode(path: &std::path::Path, reason: impl ToString) -> Self {
        ImgToolError::DecodeError {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ImgToolError>;
