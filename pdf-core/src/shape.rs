use crate::document::format_coord;
use crate::graphics::{Color, Point};

/// Accumulates vector paths for later placement on a page.
///
/// Paths are drawn with [`Shape::draw_polyline`] and painted with
/// [`Shape::finish`]. Nothing reaches the page until the shape is
/// handed to [`PdfDocument::commit_shape`](crate::PdfDocument::commit_shape).
///
/// PDF forbids color operators inside a path object, so the
/// current path is buffered separately and emitted after its
/// fill color when `finish` is called.
#[derive(Debug, Default)]
pub struct Shape {
    ops: Vec<u8>,
    path: Vec<u8>,
    fill: Option<Color>,
    paths: usize,
}

impl Shape {
    pub fn new() -> Self {
        Shape::default()
    }

    /// Append an open polyline through `points` to the current path.
    /// Fewer than two points draw nothing.
    pub fn draw_polyline(&mut self, points: &[Point]) -> &mut Self {
        if points.len() < 2 {
            return self;
        }
        let (first, rest) = points.split_at(1);
        push_op(&mut self.path, first[0], "m");
        for p in rest {
            push_op(&mut self.path, *p, "l");
        }
        self
    }

    /// Fill the current path with `fill`, optionally closing it
    /// first. Does nothing when no path has been drawn.
    pub fn finish(&mut self, fill: Color, close_path: bool) -> &mut Self {
        if self.path.is_empty() {
            return self;
        }
        if self.fill != Some(fill) {
            let op = format!(
                "{} {} {} rg\n",
                format_coord(fill.r),
                format_coord(fill.g),
                format_coord(fill.b),
            );
            self.ops.extend_from_slice(op.as_bytes());
            self.fill = Some(fill);
        }
        self.ops.append(&mut self.path);
        if close_path {
            self.ops.extend_from_slice(b"h\n");
        }
        self.ops.extend_from_slice(b"f\n");
        self.paths += 1;
        self
    }

    /// Number of painted paths.
    pub fn path_count(&self) -> usize {
        self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths == 0
    }

    /// True if a path was drawn but not yet finished.
    pub fn has_pending_path(&self) -> bool {
        !self.path.is_empty()
    }

    /// Content stream operators for all finished paths.
    pub fn content(&self) -> &[u8] {
        &self.ops
    }

    pub(crate) fn into_content(self) -> Vec<u8> {
        self.ops
    }
}

fn push_op(buf: &mut Vec<u8>, p: Point, op: &str) {
    let s = format!("{} {} {}\n", format_coord(p.x), format_coord(p.y), op);
    buf.extend_from_slice(s.as_bytes());
}
