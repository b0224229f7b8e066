use super::*;
use crate::math::ndc_to_screen;
use vek::*;

/// A rasterizer that produces filled triangles from groups of 3 consecutive vertices.
///
/// Both windings are filled; the grid has no back faces to cull.
#[derive(Copy, Clone, Debug, Default)]
pub struct Triangles;

impl Rasterizer for Triangles {
    const VERTICES: usize = 3;

    fn rasterize<V, B>(&self, verts: &[([f32; 2], V)], blitter: &mut B)
    where
        V: Clone + WeightedSum,
        B: Blitter<V>,
    {
        let [(a, a_data), (b, b_data), (c, c_data)] = match verts {
            [a, b, c] => [a, b, c],
            _ => return,
        };
        if ![a, b, c].iter().all(|p| p[0].is_finite() && p[1].is_finite()) {
            return;
        }

        let size = blitter.target_size();

        // Convert vertex coordinates to screen space
        let a = Vec2::from(ndc_to_screen(*a, size));
        let b = Vec2::from(ndc_to_screen(*b, size));
        let c = Vec2::from(ndc_to_screen(*c, size));

        let area = cross(b - a, c - a);
        if area == 0.0 {
            return;
        }
        let inv_area = 1.0 / area;

        // Calculate the triangle bounds as a bounding box
        let screen_max = Vec2::new(size[0] as f32, size[1] as f32);
        let min = Vec2::partial_min(Vec2::partial_min(a, b), c).clamped(Vec2::zero(), screen_max);
        let max = (Vec2::partial_max(Vec2::partial_max(a, b), c) + 1.0).clamped(Vec2::zero(), screen_max);
        let (min, max) = (min.map(|e: f32| e as usize), max.map(|e: f32| e as usize));

        for y in min.y..max.y {
            for x in min.x..max.x {
                // Where is the centre of the fragment?
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);

                // Calculate vertex weights, normalised so they are positive inside either winding
                let wa = cross(c - b, p - b) * inv_area;
                let wb = cross(a - c, p - c) * inv_area;
                let wc = 1.0 - wa - wb;

                // If the point falls outside the triangle, skip this fragment
                if wa < 0.0 || wb < 0.0 || wc < 0.0 {
                    continue;
                }

                let v_data = V::weighted_sum3(a_data.clone(), b_data.clone(), c_data.clone(), wa, wb, wc);
                blitter.emit_fragment(x, y, v_data);
            }
        }
    }
}

/// Signed parallelogram area spanned by two vectors.
#[inline(always)]
fn cross(a: Vec2<f32>, b: Vec2<f32>) -> f32 {
    a.x * b.y - a.y * b.x
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::test_util::Recorder;
    use approx::assert_relative_eq;

    #[test]
    fn full_screen_quad_covers_every_pixel() {
        let mut rec = Recorder::new([8, 6]);
        let quad = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
        for tri in &[[0, 1, 2], [0, 2, 3]] {
            let verts = tri.iter().map(|&i| (quad[i], 1.0f32)).collect::<Vec<_>>();
            Triangles.rasterize(&verts, &mut rec);
        }
        let mut seen = vec![0; 8 * 6];
        for &(x, y, _) in &rec.fragments {
            seen[y * 8 + x] += 1;
        }
        assert!(seen.iter().all(|&n| n >= 1));
    }

    #[test]
    fn winding_does_not_matter() {
        let ccw = [([-1.0, -1.0], 0.0f32), ([1.0, -1.0], 0.0), ([-1.0, 1.0], 0.0)];
        let cw = [ccw[0], ccw[2], ccw[1]];
        let mut a = Recorder::new([10, 10]);
        let mut b = Recorder::new([10, 10]);
        Triangles.rasterize(&ccw, &mut a);
        Triangles.rasterize(&cw, &mut b);
        assert_eq!(a.fragments.len(), b.fragments.len());
        assert!(!a.fragments.is_empty());
    }

    #[test]
    fn vertex_data_is_interpolated() {
        // Value equals screen-space x across the whole target
        let verts = [([-1.0, 1.0], 0.0f32), ([3.0, 1.0], 8.0), ([-1.0, -3.0], 0.0)];
        let mut rec = Recorder::new([4, 4]);
        Triangles.rasterize(&verts, &mut rec);
        assert_eq!(rec.fragments.len(), 16);
        for &(x, _, v) in &rec.fragments {
            assert_relative_eq!(v, x as f32 + 0.5, epsilon = 1e-4);
        }
    }

    #[test]
    fn degenerate_and_non_finite_triangles_are_skipped() {
        let mut rec = Recorder::new([4, 4]);
        let line = [([-1.0, -1.0], 0.0f32), ([0.0, 0.0], 0.0), ([1.0, 1.0], 0.0)];
        Triangles.rasterize(&line, &mut rec);
        let nan = [([f32::NAN, -1.0], 0.0f32), ([1.0, -1.0], 0.0), ([-1.0, 1.0], 0.0)];
        Triangles.rasterize(&nan, &mut rec);
        assert!(rec.fragments.is_empty());
    }
}
