use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::MAX_CUT_OUTS;

/// Errors raised while configuring or rendering a Sierpinski PDF.
#[derive(Error, Debug)]
pub enum SierpinskiError {
    /// Writing the PDF failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The config file could not be read
    #[error("cannot read config file {}: {}", .path.display(), .source)]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The config file is not valid TOML for `Config`
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("cannot serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("unknown color name: {0:?}")]
    UnknownColor(String),

    /// RGB components must lie within 0.0–1.0
    #[error("color components out of range: [{0}, {1}, {2}]")]
    InvalidColor(f64, f64, f64),

    /// The resolution limit must be finite and positive
    #[error("resolution must be a positive number, got {0}")]
    InvalidResolution(f64),

    #[error("page width {width} leaves no room for a triangle with margin {margin}")]
    InvalidPage { width: f64, margin: f64 },

    /// Subdividing a base of `size` down to `resolution` would emit
    /// more than [`MAX_CUT_OUTS`] cut-outs
    #[error("a base of {size} at resolution {resolution} needs more than {max} cut-outs", max = MAX_CUT_OUTS)]
    TooManyCutOuts { size: f64, resolution: f64 },
}

pub type Result<T> = std::result::Result<T, SierpinskiError>;
