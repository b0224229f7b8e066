use core::ops::{Add, Mul};

/// Types that can be blended by weights during rasterization.
pub trait WeightedSum: Sized {
    fn weighted_sum2(a: Self, b: Self, wa: f32, wb: f32) -> Self;
    fn weighted_sum3(a: Self, b: Self, c: Self, wa: f32, wb: f32, wc: f32) -> Self;
}

impl<T> WeightedSum for T
where
    T: Clone + Add<Output = T> + Mul<f32, Output = T>,
{
    #[inline(always)]
    fn weighted_sum2(a: Self, b: Self, wa: f32, wb: f32) -> Self {
        a * wa + b * wb
    }

    #[inline(always)]
    fn weighted_sum3(a: Self, b: Self, c: Self, wa: f32, wb: f32, wc: f32) -> Self {
        a * wa + b * wb + c * wc
    }
}

/// Map a normalised device coordinate to continuous screen space.
///
/// NDC follow OpenGL: `(-1, -1)` is the bottom-left corner of the target and `+y` points up. Screen space puts the
/// origin at the top-left and `+y` down.
#[inline(always)]
pub fn ndc_to_screen([x, y]: [f32; 2], [w, h]: [usize; 2]) -> [f32; 2] {
    [(x + 1.0) * 0.5 * w as f32, (1.0 - y) * 0.5 * h as f32]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use vek::Rgba;

    #[test]
    fn weights_blend_scalars_and_colours() {
        assert_relative_eq!(f32::weighted_sum2(2.0, 4.0, 0.25, 0.75), 3.5);
        let c = Rgba::<f32>::weighted_sum3(Rgba::red(), Rgba::green(), Rgba::blue(), 0.5, 0.25, 0.25);
        assert_relative_eq!(c.r, 0.5);
        assert_relative_eq!(c.g, 0.25);
        assert_relative_eq!(c.a, 1.0);
    }

    #[test]
    fn ndc_corners_land_on_screen_corners() {
        assert_eq!(ndc_to_screen([-1.0, 1.0], [640, 480]), [0.0, 0.0]);
        assert_eq!(ndc_to_screen([1.0, -1.0], [640, 480]), [640.0, 480.0]);
        assert_eq!(ndc_to_screen([0.0, 0.0], [640, 480]), [320.0, 240.0]);
    }
}
