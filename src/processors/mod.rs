// imgtool/src/processors/mod.rs
mod batch;
mod compressor;
mod keyer;
mod loader;
mod resizer;

pub use batch::BatchRunner;
pub use compressor::Compressor;
pub use keyer::ColorKeyer;
pub use loader::{ImageProbe, Loader};
pub use resizer::Resizer;
