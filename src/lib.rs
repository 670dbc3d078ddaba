pub mod cli;
pub mod commands;
pub mod core;
pub mod processors;
pub mod shell;
pub mod utils;

pub use cli::{Cli, DirectArgs, Mode};
pub use commands::{BatchRequest, Command, Dispatcher, Outcome};
pub use crate::core::processor::{transform, ImageTransformer};
pub use crate::core::{
    parse_colors, ErrorKind, FileFailure, FileJob, HexColor, ImgToolError,
    JobStatus, Result, RunSummary, TransformConfig,
};
pub use processors::{BatchRunner, ColorKeyer, Compressor, ImageProbe, Loader, Resizer};
pub use shell::{Shell, ShellHistory};
pub use utils::{destination_path, expand, expand_all, format_file_size, Interrupt};

pub mod prelude {
    pub use crate::{
        BatchRunner, Command, Dispatcher, HexColor, ImageTransformer, RunSummary,
        TransformConfig,
    };
}

// Re-export commonly used types
pub use image::DynamicImage;
