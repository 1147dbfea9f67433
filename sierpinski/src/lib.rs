//! Draws a Sierpinski triangle into a single-page PDF.
//!
//! [`fractal`] holds the subdivision itself; [`render`] places it on a
//! page with `pdf-core` and fills in the document info.

pub mod config;
pub mod error;
pub mod fractal;
pub mod render;

pub use config::{ColorSpec, Config, MAX_CUT_OUTS};
pub use error::{Result, SierpinskiError};
pub use fractal::{subdivide, CutOut, CutOutSink, Sierpinski, RESOLUTION_LIMIT};
pub use render::{render, render_to_file, DocumentStamp, Report};
