//! Stepping grid resolution and isoline count within their limits.

use crate::grid::{Dimensions, Limits};

/// Steps below this value are 1; at or above it, values move between multiples of it.
const COARSE_STEP: usize = 10;

/// Tracks the requested grid resolution and isoline count.
///
/// The controller only decides numbers. Whoever owns the grid applies a resolution change by reconfiguring and
/// rebuilding it; an isoline change takes effect at the next extraction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ResolutionController {
    limits: Limits,
    dims: Dimensions,
    isolines: usize,
}

impl ResolutionController {
    pub fn new(limits: Limits, dims: Dimensions, isolines: usize) -> Self {
        Self {
            limits,
            dims: limits.clamp(dims),
            isolines: isolines.min(limits.max_isolines),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn isoline_count(&self) -> usize {
        self.isolines
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Refine both axes. Returns `true` if the resolution changed.
    pub fn increase_detail(&mut self) -> bool {
        self.set_dimensions(Dimensions::new(step_up(self.dims.cols), step_up(self.dims.rows)))
    }

    /// Coarsen both axes. Returns `true` if the resolution changed.
    pub fn decrease_detail(&mut self) -> bool {
        self.set_dimensions(Dimensions::new(step_down(self.dims.cols), step_down(self.dims.rows)))
    }

    /// Returns `true` if the isoline count changed.
    pub fn increase_isoline_count(&mut self) -> bool {
        self.set_isoline_count(self.isolines.saturating_add(1))
    }

    /// Returns `true` if the isoline count changed.
    pub fn decrease_isoline_count(&mut self) -> bool {
        self.set_isoline_count(self.isolines.saturating_sub(1))
    }

    fn set_dimensions(&mut self, dims: Dimensions) -> bool {
        let dims = self.limits.clamp(dims);
        let changed = dims != self.dims;
        if changed {
            log::debug!("detail {}x{} -> {}x{}", self.dims.cols, self.dims.rows, dims.cols, dims.rows);
        }
        self.dims = dims;
        changed
    }

    fn set_isoline_count(&mut self, isolines: usize) -> bool {
        let isolines = isolines.min(self.limits.max_isolines);
        let changed = isolines != self.isolines;
        if changed {
            log::debug!("isolines {} -> {}", self.isolines, isolines);
        }
        self.isolines = isolines;
        changed
    }
}

/// Next value up: +1 below 10, otherwise the next multiple of 10.
fn step_up(n: usize) -> usize {
    if n < COARSE_STEP {
        n + 1
    } else {
        (n / COARSE_STEP + 1) * COARSE_STEP
    }
}

/// Next value down, the mirror of [`step_up`]: one less at or below 10, otherwise the previous multiple of 10.
fn step_down(n: usize) -> usize {
    if n <= COARSE_STEP {
        n.saturating_sub(1)
    } else {
        (n - 1) / COARSE_STEP * COARSE_STEP
    }
}
