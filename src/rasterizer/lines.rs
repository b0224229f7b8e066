use super::*;
use crate::math::ndc_to_screen;
use vek::*;

/// A rasterizer that produces 1-pixel-wide lines from pairs of vertices.
#[derive(Copy, Clone, Debug, Default)]
pub struct Lines;

impl Rasterizer for Lines {
    const VERTICES: usize = 2;

    fn rasterize<V, B>(&self, verts: &[([f32; 2], V)], blitter: &mut B)
    where
        V: Clone + WeightedSum,
        B: Blitter<V>,
    {
        let [(a, a_data), (b, b_data)] = match verts {
            [a, b] => [a, b],
            _ => return,
        };
        if ![a, b].iter().all(|p| p[0].is_finite() && p[1].is_finite()) {
            return;
        }

        let size = blitter.target_size();
        if size[0] == 0 || size[1] == 0 {
            return;
        }

        // Convert vertex coordinates to screen space
        let a = Vec2::from(ndc_to_screen(*a, size));
        let b = Vec2::from(ndc_to_screen(*b, size));

        let (x1, y1) = a.map(|e: f32| e.floor() as isize).into_tuple();
        let (x2, y2) = b.map(|e: f32| e.floor() as isize).into_tuple();
        let (wx2, wy2) = (size[0] as isize - 1, size[1] as isize - 1);

        // Interpolate along whichever axis the line covers more of, measured at pixel centres
        let use_x = (x1 - x2).abs() > (y1 - y2).abs();
        let span = if use_x { b.x - a.x } else { b.y - a.y };
        let norm = if span == 0.0 { 0.0 } else { 1.0 / span };

        let mut emit = |x: isize, y: isize| {
            let centre = if use_x { x as f32 + 0.5 - a.x } else { y as f32 + 0.5 - a.y };
            let frac = (centre * norm).max(0.0).min(1.0);
            let v_data = V::weighted_sum2(a_data.clone(), b_data.clone(), 1.0 - frac, frac);
            blitter.emit_fragment(x as usize, y as usize, v_data);
        };

        if (x1, y1) == (x2, y2) {
            if (0..=wx2).contains(&x1) && (0..=wy2).contains(&y1) {
                emit(x1, y1);
            }
            return;
        }

        clipline::clipline(((x1, y1), (x2, y2)), ((0, 0), (wx2, wy2)), emit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::test_util::Recorder;
    use approx::assert_relative_eq;

    #[test]
    fn horizontal_line_touches_every_column() {
        let mut rec = Recorder::new([16, 8]);
        Lines.rasterize(&[([-1.0, 0.0], 0.0f32), ([1.0, 0.0], 1.0)], &mut rec);
        let mut cols = rec.fragments.iter().map(|&(x, _, _)| x).collect::<Vec<_>>();
        cols.sort_unstable();
        cols.dedup();
        assert_eq!(cols, (0..16).collect::<Vec<_>>());
        assert!(rec.fragments.iter().all(|&(_, y, _)| y == 4));
    }

    #[test]
    fn endpoints_carry_their_data() {
        let mut rec = Recorder::new([10, 10]);
        Lines.rasterize(&[([-0.9, -0.9], 2.0f32), ([0.9, 0.9], 4.0)], &mut rec);
        let at = |x, y| rec.fragments.iter().find(|f| (f.0, f.1) == (x, y)).map(|f| f.2);
        // +y is up in NDC, down on screen
        assert_relative_eq!(at(0, 9).unwrap(), 2.0);
        assert_relative_eq!(at(9, 0).unwrap(), 4.0);
        assert_eq!(rec.fragments.len(), 10);
    }

    #[test]
    fn offscreen_lines_are_clipped() {
        let mut rec = Recorder::new([8, 8]);
        Lines.rasterize(&[([-5.0, 2.0], 0.0f32), ([5.0, 2.0], 0.0)], &mut rec);
        assert!(rec.fragments.is_empty());

        // A huge line crossing the screen only walks its visible part
        Lines.rasterize(&[([-1e6, 0.0], 0.0f32), ([1e6, 0.0], 0.0)], &mut rec);
        assert_eq!(rec.fragments.len(), 8);
        assert!(rec.fragments.iter().all(|&(_, y, _)| y == 4));
    }

    #[test]
    fn lines_leaving_the_target_are_cut_at_its_edge() {
        let mut rec = Recorder::new([8, 8]);
        Lines.rasterize(&[([0.0, 0.0], 0.0f32), ([3.0, 3.0], 1.0)], &mut rec);
        assert!(!rec.fragments.is_empty());
        assert!(rec.fragments.iter().all(|&(x, y, _)| x >= 4 && y <= 4));
        // Data along the visible part stays between the endpoint values
        assert!(rec.fragments.iter().all(|&(_, _, v)| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn single_point_line_emits_one_fragment() {
        let mut rec = Recorder::new([4, 4]);
        Lines.rasterize(&[([0.1, 0.1], 1.0f32), ([0.1, 0.1], 1.0)], &mut rec);
        assert_eq!(rec.fragments.len(), 1);
    }
}
