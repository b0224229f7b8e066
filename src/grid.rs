//! The discretized grid the field is sampled over.

use crate::{
    error::{Error, Result},
    field::ScalarField,
};
use vek::Vec2;

/// Upper bounds on grid resolution and isoline count.
///
/// Buffers are reserved for the maximum resolution up front, so changing resolution within these bounds never
/// reallocates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Limits {
    pub max_cols: usize,
    pub max_rows: usize,
    pub max_isolines: usize,
}

impl Limits {
    pub const DEFAULT: Self = Self {
        max_cols: 80,
        max_rows: 80,
        max_isolines: 20,
    };

    /// Create a new set of limits, rejecting a zero maximum on either axis.
    pub fn new(max_cols: usize, max_rows: usize, max_isolines: usize) -> Result<Self> {
        if max_cols == 0 || max_rows == 0 {
            return Err(Error::ZeroCapacity { max_cols, max_rows });
        }
        Ok(Self {
            max_cols,
            max_rows,
            max_isolines,
        })
    }

    /// Saturate the given dimensions into `[1, max_cols] x [1, max_rows]`.
    pub fn clamp(&self, dims: Dimensions) -> Dimensions {
        Dimensions {
            cols: dims.cols.max(1).min(self.max_cols.max(1)),
            rows: dims.rows.max(1).min(self.max_rows.max(1)),
        }
    }

    /// The largest grid these limits allow.
    pub fn max_dimensions(&self) -> Dimensions {
        self.clamp(Dimensions::new(self.max_cols, self.max_rows))
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The number of cells along each axis of the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub cols: usize,
    pub rows: usize,
}

impl Dimensions {
    pub const fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    /// Number of grid vertices, `(cols + 1) * (rows + 1)`.
    pub const fn vertex_count(&self) -> usize {
        (self.cols + 1) * (self.rows + 1)
    }

    /// Number of triangle indices, six per cell.
    pub const fn triangle_index_count(&self) -> usize {
        self.cols * self.rows * 6
    }

    pub const fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Width of a cell in normalised device coordinates.
    pub fn dx(&self) -> f32 {
        2.0 / self.cols as f32
    }

    /// Height of a cell in normalised device coordinates.
    pub fn dy(&self) -> f32 {
        2.0 / self.rows as f32
    }

    /// Row-major index of the vertex at row `r`, column `c`.
    #[inline(always)]
    pub const fn vertex_index(&self, r: usize, c: usize) -> usize {
        r * (self.cols + 1) + c
    }

    /// Position of the vertex at row `r`, column `c`.
    ///
    /// Every caller goes through this so that positions computed in different places are bit-identical.
    #[inline(always)]
    pub fn position(&self, r: usize, c: usize) -> Vec2<f32> {
        Vec2::new(
            2.0 * c as f32 / self.cols as f32 - 1.0,
            2.0 * r as f32 / self.rows as f32 - 1.0,
        )
    }
}

/// Grid geometry and per-vertex field values at the current resolution.
#[derive(Clone, Debug)]
pub struct GridModel {
    limits: Limits,
    dims: Dimensions,
    /// Resolutions the vertex and index buffers were last built for.
    vertex_dims: Dimensions,
    index_dims: Dimensions,
    vertices: Vec<Vec2<f32>>,
    values: Vec<f32>,
    indices: Vec<u32>,
}

impl GridModel {
    /// Create a grid with storage for the largest resolution `limits` allow, built at `dims` (clamped).
    pub fn new(limits: Limits, dims: Dimensions) -> Self {
        let max = limits.max_dimensions();
        let mut grid = Self {
            limits,
            dims: limits.clamp(dims),
            vertex_dims: Dimensions::new(0, 0),
            index_dims: Dimensions::new(0, 0),
            vertices: Vec::with_capacity(max.vertex_count()),
            values: Vec::with_capacity(max.vertex_count()),
            indices: Vec::with_capacity(max.triangle_index_count()),
        };
        grid.resize(dims);
        grid
    }

    /// Set the logical resolution, saturating out-of-range requests at the limits.
    ///
    /// Values keep whatever they held and are zero-filled where the grid grew. Counts follow the new resolution at
    /// once; geometry is rebuilt by [`GridModel::resize`], the `rebuild_*` methods, or the next
    /// [`GridModel::update_values`].
    pub fn configure(&mut self, cols: usize, rows: usize) -> Dimensions {
        let dims = self.limits.clamp(Dimensions::new(cols, rows));
        if dims != self.dims {
            log::debug!(
                "grid reconfigured from {}x{} to {}x{}",
                self.dims.cols,
                self.dims.rows,
                dims.cols,
                dims.rows
            );
        }
        self.dims = dims;
        self.values.resize(dims.vertex_count(), 0.0);
        dims
    }

    /// Reconfigure and rebuild all geometry.
    pub fn resize(&mut self, dims: Dimensions) -> Dimensions {
        let dims = self.configure(dims.cols, dims.rows);
        self.rebuild_vertices();
        self.rebuild_triangle_indices();
        dims
    }

    /// Recompute every vertex position for the current resolution.
    pub fn rebuild_vertices(&mut self) {
        let dims = self.dims;
        self.vertex_dims = dims;
        self.vertices.clear();
        self.vertices.extend(
            (0..=dims.rows).flat_map(|r| (0..=dims.cols).map(move |c| dims.position(r, c))),
        );
    }

    /// Recompute the triangle list, two triangles per cell with the same winding everywhere.
    pub fn rebuild_triangle_indices(&mut self) {
        let dims = self.dims;
        self.index_dims = dims;
        self.indices.clear();
        for r in 0..dims.rows {
            for c in 0..dims.cols {
                let tl = dims.vertex_index(r, c) as u32;
                let tr = dims.vertex_index(r, c + 1) as u32;
                let br = dims.vertex_index(r + 1, c + 1) as u32;
                let bl = dims.vertex_index(r + 1, c) as u32;
                self.indices.extend_from_slice(&[tl, tr, br, tl, br, bl]);
            }
        }
    }

    /// Resample the field at every vertex, first rebuilding any geometry left stale by [`GridModel::configure`].
    pub fn update_values<S: ScalarField + Sync + ?Sized>(&mut self, field: &S, time: f32) {
        if self.vertex_dims != self.dims {
            self.rebuild_vertices();
        }
        if self.index_dims != self.dims {
            self.rebuild_triangle_indices();
        }
        self.values.resize(self.vertices.len(), 0.0);

        #[cfg(not(feature = "par"))]
        sample_seq(field, time, &self.vertices, &mut self.values);
        #[cfg(feature = "par")]
        sample_par(field, time, &self.vertices, &mut self.values, self.dims.cols + 1);
    }

    /// Overwrite the values directly, bypassing the field.
    ///
    /// Extra input is ignored and missing values are left untouched.
    pub fn set_values(&mut self, values: &[f32]) {
        let n = values.len().min(self.values.len());
        self.values[..n].copy_from_slice(&values[..n]);
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn dx(&self) -> f32 {
        self.dims.dx()
    }

    pub fn dy(&self) -> f32 {
        self.dims.dy()
    }

    pub fn vertex_count(&self) -> usize {
        self.dims.vertex_count()
    }

    pub fn triangle_index_count(&self) -> usize {
        self.dims.triangle_index_count()
    }

    /// Vertex positions, row-major.
    pub fn vertices(&self) -> &[Vec2<f32>] {
        &self.vertices
    }

    /// Field values, one per vertex.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn triangle_indices(&self) -> &[u32] {
        &self.indices
    }
}

fn sample_seq<S: ScalarField + ?Sized>(field: &S, time: f32, vertices: &[Vec2<f32>], values: &mut [f32]) {
    values
        .iter_mut()
        .zip(vertices)
        .for_each(|(value, v)| *value = field.sample(v.x, v.y, time));
}

#[cfg(feature = "par")]
fn sample_par<S: ScalarField + Sync + ?Sized>(
    field: &S,
    time: f32,
    vertices: &[Vec2<f32>],
    values: &mut [f32],
    row_len: usize,
) {
    // Below this many values per thread, spawning costs more than it saves
    const VALUES_PER_GROUP: usize = 1_024;

    let threads = num_cpus::get().max(1);
    let rows = vertices.len() / row_len.max(1);
    let needed_threads = (vertices.len() / VALUES_PER_GROUP).min(threads);
    if needed_threads <= 1 {
        return sample_seq(field, time, vertices, values);
    }

    // Whole rows per chunk, so each thread owns a contiguous band of the grid
    let group_len = ((rows + needed_threads - 1) / needed_threads) * row_len;
    let scope = crossbeam_utils::thread::scope(|s| {
        for (values, vertices) in values.chunks_mut(group_len).zip(vertices.chunks(group_len)) {
            s.spawn(move |_| sample_seq(field, time, vertices, values));
        }
    });
    if let Err(panic) = scope {
        std::panic::resume_unwind(panic);
    }
}
