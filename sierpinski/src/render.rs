use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, FixedOffset, Local};
use log::{debug, info};
use pdf_core::date::pdf_date;
use pdf_core::{PdfDocument, Point, Shape};

use crate::config::Config;
use crate::error::Result;
use crate::fractal::{expected_count, Sierpinski};

/// Values stamped into the document info that come from outside the
/// run: the clock and the producing software.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentStamp {
    pub created: DateTime<FixedOffset>,
    pub creator: String,
    pub producer: String,
}

impl DocumentStamp {
    /// Stamp for the current local time.
    pub fn now(creator: &str) -> Self {
        DocumentStamp {
            created: Local::now().fixed_offset(),
            creator: creator.to_string(),
            producer: format!("pdf-core v{}", pdf_core::VERSION),
        }
    }
}

/// Outcome of a render.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub triangle_count: u64,
    /// Subdivision time in seconds, rounded to milliseconds.
    pub compute_seconds: f64,
    /// Length of the start triangle's base.
    pub side_length: f64,
    pub page_width: f64,
    pub page_height: f64,
}

/// Corners of the start triangle: base corners inset by the margin
/// from the bottom of the page, apex above the base midpoint.
///
/// The apex sits at `margin + base / 2` (75 on the default page), so the
/// triangle is equilateral and centered rather than shifted left by the
/// margin; the cut-out count does not depend on it.
pub fn start_triangle(config: &Config) -> [Point; 3] {
    let m = config.margin;
    let a = Point::new(m, m);
    let b = Point::new(config.page_width - m, m);
    let half = (b.x - a.x) * 0.5;
    let c = Point::new(a.x + half, a.y + half * 3f64.sqrt());
    [a, b, c]
}

pub fn title(triangle_count: u64, compute_seconds: f64) -> String {
    format!(
        "Sierpinski Triangle with {} sub-triangles, {} seconds",
        triangle_count, compute_seconds
    )
}

/// `<program>.pdf` in the working directory.
pub fn default_output_path(program: &str) -> PathBuf {
    PathBuf::from(format!("{}.pdf", program))
}

/// Draw the fractal on a single page and write the finished PDF to
/// `writer`. Returns the writer together with the run report.
pub fn render<W: Write>(config: &Config, stamp: &DocumentStamp, writer: W) -> Result<(W, Report)> {
    config.validate()?;
    let outer = config.outer_color.resolve()?;
    let fill = config.cut_out_color.resolve()?;
    let (width, height) = (config.page_width, config.page_height());

    let mut doc = PdfDocument::new(writer)?;
    doc.set_compression(config.compress);
    doc.begin_page(width, height)?;

    let [a, b, c] = start_triangle(config);
    let mut shape = Shape::new();
    shape.draw_polyline(&[a, b, c]).finish(outer, true);

    let fractal = Sierpinski::new(config.resolution, fill);
    if let Some(n) = expected_count(a.manhattan(b), config.resolution) {
        debug!("expecting {} cut-outs", n);
    }
    let started = Instant::now();
    let triangle_count = fractal.subdivide(&mut shape, a, b, c, 0);
    let elapsed = started.elapsed().as_secs_f64();
    let compute_seconds = (elapsed * 1000.0).round() / 1000.0;
    info!(
        "subdivided into {} cut-outs in {:.3}s",
        triangle_count, elapsed
    );

    doc.commit_shape(shape);
    doc.end_page()?;

    let created = pdf_date(&stamp.created);
    doc.set_info("Title", &title(triangle_count, compute_seconds));
    if let Some(author) = &config.author {
        doc.set_info("Author", author);
    }
    doc.set_metadata([
        ("Subject", config.subject.as_str()),
        ("Keywords", config.keywords.as_str()),
        ("Creator", stamp.creator.as_str()),
        ("Producer", stamp.producer.as_str()),
        ("CreationDate", created.as_str()),
        ("ModDate", created.as_str()),
    ]);
    let writer = doc.end_document()?;

    Ok((
        writer,
        Report {
            triangle_count,
            compute_seconds,
            side_length: (b - a).abs(),
            page_width: width,
            page_height: height,
        },
    ))
}

/// [`render`] into a new file at `path`.
pub fn render_to_file<P: AsRef<Path>>(
    config: &Config,
    stamp: &DocumentStamp,
    path: P,
) -> Result<Report> {
    config.validate()?;
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    let (_, report) = render(config, stamp, std::io::BufWriter::new(file))?;
    info!("wrote {}", path.display());
    Ok(report)
}
