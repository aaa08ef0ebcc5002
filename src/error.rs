use std::path::PathBuf;

use derive_more::{Display, From};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Display, From)]
pub enum Error {
    // -- Configuration
    #[display("threshold must be a finite number greater than 0, got {_0}")]
    InvalidThreshold(f64),
    #[display("hue and saturation steps must be at least 1, got {h_steps}x{s_steps}")]
    InvalidSteps { h_steps: usize, s_steps: usize },
    #[display("swatch needs at least 1 column and a cell size of at least 1, got {cols} columns of {cell}px")]
    InvalidSwatchShape { cols: usize, cell: usize },
    #[display("{}: unsupported image format", _0.display())]
    UnsupportedExportFormat(PathBuf),

    // -- Externals
    #[from]
    #[display("{_0}")]
    Io(std::io::Error),
    #[from]
    #[display("{_0}")]
    Image(image::error::ImageError),
    #[from]
    #[display("{_0}")]
    Png(png::EncodingError),
}

impl std::error::Error for Error {}
