use crate::{
    math::WeightedSum,
    rasterizer::{Blitter, Rasterizer},
    Target,
};

/// A flat 2D draw: map each vertex to a point in normalised device coordinates plus some blendable data, then turn
/// the blended data of every covered pixel into a texel.
///
/// `(-1, -1)` is the bottom-left corner of the target and `(1, 1)` the top-right. There is no depth, culling or
/// blending with what the target already holds; later primitives overwrite earlier ones.
pub trait Pipeline {
    /// The type of the vertex shader input data.
    ///
    /// When vertex indexing is used, this tends to be the vertex index.
    type Vertex;

    /// The type of the data that gets passed on from the vertex shader to the fragment shader.
    type VertexData: Clone + WeightedSum;

    /// The type of emitted pixels.
    type Pixel: Clone;

    /// The vertex shader.
    ///
    /// Returning a non-finite position discards every primitive the vertex belongs to.
    fn vertex(&self, vertex: &Self::Vertex) -> ([f32; 2], Self::VertexData);

    /// The fragment shader.
    fn fragment(&self, vs_out: Self::VertexData) -> Self::Pixel;

    /// Render the given vertex list into the target.
    ///
    /// Every consecutive run of `R::VERTICES` vertices forms one primitive. A trailing partial primitive is ignored.
    fn render<R, T>(&self, vertices: &[Self::Vertex], target: &mut T)
    where
        Self: Sized,
        R: Rasterizer,
        T: Target<Texel = Self::Pixel>,
    {
        let rasterizer = R::default();
        let mut blitter = TargetBlitter { pipeline: self, target };
        let mut verts = Vec::with_capacity(R::VERTICES);
        for prim in vertices.chunks_exact(R::VERTICES) {
            verts.clear();
            verts.extend(prim.iter().map(|v| self.vertex(v)));
            rasterizer.rasterize(&verts, &mut blitter);
        }
    }
}

/// Runs the fragment shader for each emitted fragment and writes the result to the target.
struct TargetBlitter<'a, P, T> {
    pipeline: &'a P,
    target: &'a mut T,
}

impl<'a, P, T> Blitter<P::VertexData> for TargetBlitter<'a, P, T>
where
    P: Pipeline,
    T: Target<Texel = P::Pixel>,
{
    #[inline(always)]
    fn target_size(&self) -> [usize; 2] {
        self.target.size()
    }

    #[inline(always)]
    fn emit_fragment(&mut self, x: usize, y: usize, v_data: P::VertexData) {
        let pixel = self.pipeline.fragment(v_data);
        self.target.write([x, y], pixel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        buffer::Buffer2d,
        rasterizer::{Lines, Triangles},
    };

    /// Fills whatever it is given with a single value.
    struct Flat(u32);

    impl Pipeline for Flat {
        type Vertex = [f32; 2];
        type VertexData = f32;
        type Pixel = u32;

        fn vertex(&self, pos: &[f32; 2]) -> ([f32; 2], f32) {
            (*pos, 0.0)
        }

        fn fragment(&self, _: f32) -> u32 {
            self.0
        }
    }

    #[test]
    fn triangles_are_drawn_in_groups_of_three() {
        let mut frame = Buffer2d::fill([4, 4], 0u32);
        let verts = [
            [-1.0, -1.0],
            [1.0, -1.0],
            [1.0, 1.0],
            [-1.0, -1.0],
            [1.0, 1.0],
            [-1.0, 1.0],
            // Incomplete trailing primitive
            [5.0, 5.0],
        ];
        Flat(7).render::<Triangles, _>(&verts, &mut frame);
        assert!(frame.raw().iter().all(|&p| p == 7));
    }

    #[test]
    fn later_primitives_overwrite_earlier_ones() {
        let mut frame = Buffer2d::fill([4, 4], 0u32);
        let quad = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
        Flat(3).render::<Triangles, _>(&quad, &mut frame);
        Flat(5).render::<Lines, _>(&[[-1.0, 0.0], [1.0, 0.0]], &mut frame);
        let fives = frame.raw().iter().filter(|&&p| p == 5).count();
        let threes = frame.raw().iter().filter(|&&p| p == 3).count();
        assert_eq!(fives, 4);
        assert_eq!(fives + threes, 16);
    }

    #[test]
    fn lines_are_drawn_in_pairs() {
        let mut frame = Buffer2d::fill([8, 8], 0u32);
        Flat(1).render::<Lines, _>(&[[-1.0, 0.0], [1.0, 0.0], [0.0, 0.0]], &mut frame);
        let lit = frame.raw().iter().filter(|&&p| p == 1).count();
        assert_eq!(lit, 8);
    }
}
