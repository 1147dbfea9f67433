pub mod colors;
pub mod date;
pub mod document;
pub mod graphics;
pub mod objects;
pub mod shape;
pub mod writer;

pub use document::PdfDocument;
pub use graphics::{Color, Point};
pub use shape::Shape;

/// Version of this crate, for `Producer` entries.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
