//! Marching-squares extraction of isolines from grid values.
//!
//! Each cell's four corners are classified against a level into a 4-bit case. Cases 0 and 15 lie entirely on one
//! side of the level and emit nothing; the others emit one segment, except the saddle cases 5 and 10 which always
//! emit two. No asymptotic decider is applied to saddles.
//!
//! Crossings on an edge are always measured from the edge's lower-index corner, so the two cells sharing an edge
//! compute bit-identical points and the shared point is stored once.

use crate::{
    error::{Error, Result},
    grid::Dimensions,
};
use fxhash::FxHashMap;
use vek::Vec2;

/// Levels closer than this to zero are skipped.
pub const LEVEL_EPSILON: f32 = 1e-4;

/// The span of field values that levels are distributed over.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LevelRange {
    pub min: f32,
    pub max: f32,
}

impl LevelRange {
    pub const DEFAULT: Self = Self {
        min: -4.0,
        max: 6.0,
    };

    pub fn new(min: f32, max: f32) -> Result<Self> {
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(Error::InvalidLevelRange { min, max });
        }
        Ok(Self { min, max })
    }
}

impl Default for LevelRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// `count` evenly spaced levels starting at the bottom of a range: `min + (max - min) * i / count`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LevelSet {
    range: LevelRange,
    count: usize,
}

impl LevelSet {
    pub const fn new(range: LevelRange, count: usize) -> Self {
        Self { range, count }
    }

    pub fn range(&self) -> LevelRange {
        self.range
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn with_count(self, count: usize) -> Self {
        Self { count, ..self }
    }

    /// The level values, including any near zero (those are skipped at extraction time).
    pub fn iter(&self) -> Levels {
        Levels {
            range: self.range,
            count: self.count,
            next: 0,
        }
    }
}

impl<'a> IntoIterator for &'a LevelSet {
    type Item = f32;
    type IntoIter = Levels;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the values of a [`LevelSet`].
#[derive(Clone, Debug)]
pub struct Levels {
    range: LevelRange,
    count: usize,
    next: usize,
}

impl Iterator for Levels {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.next >= self.count {
            return None;
        }
        let LevelRange { min, max } = self.range;
        let level = min + (max - min) * self.next as f32 / self.count as f32;
        self.next += 1;
        Some(level)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count.saturating_sub(self.next);
        (left, Some(left))
    }
}

/// One side of a grid cell.
///
/// Corners are ordered `TL (r, c)`, `TR (r, c + 1)`, `BR (r + 1, c + 1)`, `BL (r + 1, c)`, where "top" is the lower
/// row index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// `TL` to `TR`
    Top,
    /// `TR` to `BR`
    Right,
    /// `BL` to `BR`
    Bottom,
    /// `TL` to `BL`
    Left,
}

/// The 4-bit marching-squares classification of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellCase(u8);

impl CellCase {
    /// Classify corner values against a level: bit `j` is set when corner `j` is strictly above it.
    ///
    /// NaN corners are never above.
    pub fn classify(values: [f32; 4], level: f32) -> Self {
        Self(
            values
                .iter()
                .enumerate()
                .fold(0, |bits, (j, &v)| bits | (((v > level) as u8) << j)),
        )
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    /// `true` for the ambiguous saddle configurations.
    pub fn is_saddle(&self) -> bool {
        self.0 == 5 || self.0 == 10
    }

    /// The edge pairs joined by segments in this case.
    ///
    /// A case and its complement (`15 - case`) share edges, except the saddles which pair them differently.
    pub fn edges(&self) -> &'static [(Edge, Edge)] {
        use Edge::*;
        match self.0 {
            1 | 14 => &[(Left, Top)],
            2 | 13 => &[(Right, Top)],
            3 | 12 => &[(Right, Left)],
            4 | 11 => &[(Right, Bottom)],
            5 => &[(Bottom, Left), (Right, Top)],
            6 | 9 => &[(Top, Bottom)],
            7 | 8 => &[(Bottom, Left)],
            10 => &[(Left, Top), (Right, Bottom)],
            _ => &[],
        }
    }
}

/// A single grid cell: corner values and positions in `TL, TR, BR, BL` order, and its size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cell {
    pub values: [f32; 4],
    pub corners: [Vec2<f32>; 4],
    pub size: Vec2<f32>,
}

impl Cell {
    /// Gather cell `(r, c)` from a row-major value array.
    ///
    /// The caller must ensure `values` covers `dims`.
    pub fn at(values: &[f32], dims: Dimensions, r: usize, c: usize) -> Self {
        let at = |r, c| values[dims.vertex_index(r, c)];
        Self {
            values: [at(r, c), at(r, c + 1), at(r + 1, c + 1), at(r + 1, c)],
            corners: [
                dims.position(r, c),
                dims.position(r, c + 1),
                dims.position(r + 1, c + 1),
                dims.position(r + 1, c),
            ],
            size: Vec2::new(dims.dx(), dims.dy()),
        }
    }

    /// Where the level crosses the given edge, measured from the edge's first corner.
    ///
    /// The result is only meaningful when the level actually separates the edge's corners, and is non-finite when
    /// the corner values are equal or NaN.
    pub fn crossing(&self, edge: Edge, level: f32) -> Vec2<f32> {
        let [v0, v1, v2, v3] = self.values;
        let [tl, tr, _, bl] = self.corners;
        let frac = |a: f32, b: f32| (level - a).abs() / (a - b).abs();
        match edge {
            Edge::Top => Vec2::new(tl.x + self.size.x * frac(v0, v1), tl.y),
            Edge::Right => Vec2::new(tr.x, tr.y + self.size.y * frac(v1, v2)),
            Edge::Bottom => Vec2::new(bl.x + self.size.x * frac(v3, v2), bl.y),
            Edge::Left => Vec2::new(tl.x, tl.y + self.size.y * frac(v0, v3)),
        }
    }

    /// The raw segments this cell emits at a level. Endpoints may be non-finite for degenerate input.
    pub fn segments(&self, level: f32) -> impl Iterator<Item = [Vec2<f32>; 2]> + '_ {
        CellCase::classify(self.values, level)
            .edges()
            .iter()
            .map(move |&(a, b)| [self.crossing(a, level), self.crossing(b, level)])
    }
}

/// Counts describing one extraction pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Extraction {
    pub points: usize,
    pub segments: usize,
    /// Segments discarded because an endpoint was not finite.
    pub dropped: usize,
}

/// Coordinates compared bit-for-bit, with `-0.0` folded into `0.0`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct PointKey(u32, u32);

impl PointKey {
    fn new(p: Vec2<f32>) -> Self {
        Self((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
    }
}

/// Builds a deduplicated line list of isoline segments, rebuilt from scratch on every pass.
#[derive(Clone, Debug, Default)]
pub struct IsolineExtractor {
    points: Vec<Vec2<f32>>,
    indices: Vec<u32>,
    lookup: FxHashMap<PointKey, u32>,
    dropped: usize,
}

impl IsolineExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with storage reserved for `levels` levels over a `dims` grid.
    pub fn with_capacity(dims: Dimensions, levels: usize) -> Self {
        // Every edge holds at most one crossing per level, every cell at most two segments
        let edges = dims.rows * (dims.cols + 1) + dims.cols * (dims.rows + 1);
        let points = edges * levels;
        Self {
            points: Vec::with_capacity(points),
            indices: Vec::with_capacity(dims.cell_count() * levels * 4),
            lookup: FxHashMap::with_capacity_and_hasher(points, Default::default()),
            dropped: 0,
        }
    }

    /// Extract isolines for every level from a row-major `values` array covering `dims`.
    ///
    /// Levels within [`LEVEL_EPSILON`] of zero are skipped. If `values` is too short for `dims`, the output is
    /// left empty.
    pub fn extract<L>(&mut self, values: &[f32], dims: Dimensions, levels: L) -> Extraction
    where
        L: IntoIterator<Item = f32>,
        L::IntoIter: Clone,
    {
        self.points.clear();
        self.indices.clear();
        self.lookup.clear();
        self.dropped = 0;

        if values.len() < dims.vertex_count() {
            log::warn!(
                "{} values cannot cover a {}x{} grid, skipping extraction",
                values.len(),
                dims.cols,
                dims.rows
            );
            return self.summary();
        }

        let levels = levels.into_iter().filter(|k| k.abs() >= LEVEL_EPSILON);
        for r in 0..dims.rows {
            for c in 0..dims.cols {
                let cell = Cell::at(values, dims, r, c);
                for level in levels.clone() {
                    for [a, b] in cell.segments(level) {
                        self.push_segment(a, b);
                    }
                }
            }
        }

        let summary = self.summary();
        if summary.dropped > 0 {
            log::warn!("dropped {} isoline segments with non-finite endpoints", summary.dropped);
        }
        log::trace!(
            "extracted {} segments over {} points",
            summary.segments,
            summary.points
        );
        summary
    }

    fn push_segment(&mut self, a: Vec2<f32>, b: Vec2<f32>) {
        if !(a.x.is_finite() && a.y.is_finite() && b.x.is_finite() && b.y.is_finite()) {
            self.dropped += 1;
            return;
        }
        let a = self.push_point(a);
        let b = self.push_point(b);
        self.indices.extend_from_slice(&[a, b]);
    }

    fn push_point(&mut self, p: Vec2<f32>) -> u32 {
        let points = &mut self.points;
        *self.lookup.entry(PointKey::new(p)).or_insert_with(|| {
            points.push(p);
            (points.len() - 1) as u32
        })
    }

    fn summary(&self) -> Extraction {
        Extraction {
            points: self.points.len(),
            segments: self.segment_count(),
            dropped: self.dropped,
        }
    }

    /// Deduplicated segment endpoints.
    pub fn points(&self) -> &[Vec2<f32>] {
        &self.points
    }

    /// Line-list indices into [`IsolineExtractor::points`], two per segment.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn segment_count(&self) -> usize {
        self.indices.len() / 2
    }

    /// Segments dropped in the last pass because an endpoint was not finite.
    pub fn dropped_segments(&self) -> usize {
        self.dropped
    }

    /// Resolve the line list into endpoint pairs.
    pub fn segments(&self) -> impl Iterator<Item = [Vec2<f32>; 2]> + '_ {
        self.indices
            .chunks_exact(2)
            .map(move |s| [self.points[s[0] as usize], self.points[s[1] as usize]])
    }
}
