//! Recursive Sierpinski subdivision.
//!
//! Each call cuts the center triangle (through the three edge
//! midpoints) out of the current triangle, hands it to a
//! [`CutOutSink`], and recurses into the three corner triangles that
//! remain. Recursion stops when the triangle's size, measured as the
//! L1 distance between its first two corners, drops below a
//! resolution limit.
//!
//! The L1 measure avoids a square root per call. It is not rotation
//! invariant, so the effective cutoff depends on the direction of
//! the `a`→`b` edge. Every branch halves that edge, which bounds the
//! depth at `floor(log2(size / limit)) + 1` levels.

use log::warn;
use pdf_core::{Color, Point, Shape};

/// Size below which recursion stops, in page units.
pub const RESOLUTION_LIMIT: f64 = 1.0;

/// One cut-out triangle: the midpoints of the parent's sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutOut {
    pub corners: [Point; 3],
    pub fill: Color,
}

/// Receives cut-out triangles in emission order.
pub trait CutOutSink {
    fn cut_out(&mut self, corners: [Point; 3], fill: Color);
}

impl CutOutSink for Vec<CutOut> {
    fn cut_out(&mut self, corners: [Point; 3], fill: Color) {
        self.push(CutOut { corners, fill });
    }
}

impl CutOutSink for Shape {
    fn cut_out(&mut self, corners: [Point; 3], fill: Color) {
        self.draw_polyline(&corners).finish(fill, true);
    }
}

/// Subdivision parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sierpinski {
    limit: f64,
    fill: Color,
}

impl Sierpinski {
    /// `limit` must be finite and positive for recursion to end;
    /// callers validate it (see `Config::validate`).
    pub fn new(limit: f64, fill: Color) -> Self {
        Sierpinski { limit, fill }
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    /// Subdivide triangle `(a, b, c)`, emitting cut-outs into `sink`
    /// depth first. Returns `counter` plus the number of cut-outs
    /// emitted by this call and all of its descendants.
    pub fn subdivide<S>(&self, sink: &mut S, a: Point, b: Point, c: Point, counter: u64) -> u64
    where
        S: CutOutSink + ?Sized,
    {
        let size = a.manhattan(b);
        if !size.is_finite() {
            warn!("non-finite triangle size {} at ({:?}, {:?}), not subdividing", size, a, b);
            return counter;
        }
        if size < self.limit {
            return counter;
        }

        let ab = a.midpoint(b);
        let ac = a.midpoint(c);
        let bc = b.midpoint(c);
        sink.cut_out([ab, ac, bc], self.fill);

        let counter = self.subdivide(sink, a, ab, ac, counter + 1);
        let counter = self.subdivide(sink, ab, b, bc, counter);
        self.subdivide(sink, ac, bc, c, counter)
    }
}

/// Subdivide with the default [`RESOLUTION_LIMIT`].
pub fn subdivide<S>(sink: &mut S, a: Point, b: Point, c: Point, fill: Color, counter: u64) -> u64
where
    S: CutOutSink + ?Sized,
{
    Sierpinski::new(RESOLUTION_LIMIT, fill).subdivide(sink, a, b, c, counter)
}

/// Number of cut-outs a triangle of L1 size `size` yields at `limit`.
///
/// Every branch halves the measured edge, so all triangles at one
/// depth share a size and the tree is complete: `(3^d - 1) / 2`
/// for `d` non-terminal levels. Returns `None` when the limit is not
/// positive or the count does not fit in a `u64`.
pub fn expected_count(size: f64, limit: f64) -> Option<u64> {
    if limit.is_nan() || limit <= 0.0 || !size.is_finite() {
        return None;
    }
    let mut levels = 0u32;
    let mut s = size;
    while s >= limit {
        levels += 1;
        s *= 0.5;
    }
    3u64.checked_pow(levels).map(|n| (n - 1) / 2)
}
