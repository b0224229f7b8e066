pub mod lines;
pub mod triangles;

pub use self::{lines::Lines, triangles::Triangles};

use crate::math::WeightedSum;

/// A trait for types that define an interface for blitting fragments to surfaces.
pub trait Blitter<V> {
    /// Size of the surface in pixels.
    fn target_size(&self) -> [usize; 2];

    /// Write a fragment at the given pixel. Positions are always within [`Blitter::target_size`].
    fn emit_fragment(&mut self, x: usize, y: usize, v_data: V);
}

/// A trait that represents types that turn primitives into fragments.
pub trait Rasterizer: Default {
    /// Number of vertices that make up one primitive.
    const VERTICES: usize;

    /// Rasterize one primitive given in normalised device coordinates.
    ///
    /// `verts` holds exactly [`Rasterizer::VERTICES`] entries. Primitives with non-finite positions are skipped.
    fn rasterize<V, B>(&self, verts: &[([f32; 2], V)], blitter: &mut B)
    where
        V: Clone + WeightedSum,
        B: Blitter<V>;
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;

    /// Records every fragment it receives.
    pub struct Recorder<V> {
        pub size: [usize; 2],
        pub fragments: Vec<(usize, usize, V)>,
    }

    impl<V> Recorder<V> {
        pub fn new(size: [usize; 2]) -> Self {
            Self {
                size,
                fragments: Vec::new(),
            }
        }
    }

    impl<V> Blitter<V> for Recorder<V> {
        fn target_size(&self) -> [usize; 2] {
            self.size
        }

        fn emit_fragment(&mut self, x: usize, y: usize, v_data: V) {
            assert!(x < self.size[0] && y < self.size[1]);
            self.fragments.push((x, y, v_data));
        }
    }
}
