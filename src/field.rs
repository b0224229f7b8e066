//! Analytic scalar fields that can be sampled over the grid.

/// Number of moving bumps in the default field.
pub const BUMP_COUNT: usize = 7;

/// Radius growth per bump index.
const RADIUS_STEP: f32 = 0.05;

/// A time-varying scalar field over the plane.
///
/// Implementations must be pure: the same `(x, y, time)` always produces the same value.
pub trait ScalarField {
    /// Evaluate the field at the given position and time.
    fn sample(&self, x: f32, y: f32, time: f32) -> f32;
}

impl<F: Fn(f32, f32, f32) -> f32> ScalarField for F {
    #[inline(always)]
    fn sample(&self, x: f32, y: f32, time: f32) -> f32 {
        self(x, y, time)
    }
}

/// A superposition of Gaussian-like bumps orbiting the unit circle.
///
/// Bump `i` sits at `(cos(w_i t), sin(w_i t))` with `w_i = (-1)^i (2i/n - 1)`, has radius `0.05 i` and amplitude
/// `i (-1)^i`. Odd bumps pull the field negative, even bumps push it positive, and neighbouring bumps orbit in
/// opposite directions.
///
/// A bump with zero radius is skipped. For the default field this is bump 0, whose amplitude is zero as well, so
/// skipping it only changes the result at its exact centre, where the raw formula evaluates `0 / 0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bumps {
    count: usize,
}

impl Bumps {
    /// Create a field made of `count` bumps.
    pub const fn new(count: usize) -> Self {
        Self { count }
    }

    /// Number of bumps contributing to the field.
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Centre of bump `i` at the given time.
    pub fn centre(&self, i: usize, time: f32) -> [f32; 2] {
        let w = alternating(i) * (2.0 * i as f32 / self.count as f32 - 1.0);
        [(time * w).cos(), (time * w).sin()]
    }

    /// Radius of bump `i`.
    pub fn radius(&self, i: usize) -> f32 {
        RADIUS_STEP * i as f32
    }

    /// Signed amplitude of bump `i`.
    pub fn amplitude(&self, i: usize) -> f32 {
        i as f32 * alternating(i)
    }
}

impl Default for Bumps {
    fn default() -> Self {
        Self::new(BUMP_COUNT)
    }
}

impl ScalarField for Bumps {
    fn sample(&self, x: f32, y: f32, time: f32) -> f32 {
        (0..self.count).fold(0.0, |f, i| {
            let r = self.radius(i);
            if r == 0.0 {
                return f;
            }
            let [cx, cy] = self.centre(i, time);
            let dist2 = (x - cx) * (x - cx) + (y - cy) * (y - cy);
            f + self.amplitude(i) / (dist2 / (r * r)).exp()
        })
    }
}

/// `(-1)^i`
#[inline(always)]
fn alternating(i: usize) -> f32 {
    if i % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sampling_is_bitwise_deterministic() {
        let field = Bumps::default();
        for &(x, y, t) in &[(0.0, 0.0, 0.0), (0.3, -0.7, 1.25), (-1.0, 1.0, 42.0)] {
            assert_eq!(field.sample(x, y, t).to_bits(), field.sample(x, y, t).to_bits());
        }
    }

    #[test]
    fn bump_parameters_alternate() {
        let field = Bumps::default();
        assert_eq!(field.amplitude(0), 0.0);
        assert_eq!(field.amplitude(1), -1.0);
        assert_eq!(field.amplitude(2), 2.0);
        assert_eq!(field.amplitude(3), -3.0);
        assert_relative_eq!(field.radius(4), 0.2);
    }

    #[test]
    fn centres_start_on_the_x_axis() {
        let field = Bumps::default();
        for i in 0..field.count() {
            let [x, y] = field.centre(i, 0.0);
            assert_eq!([x, y], [1.0, 0.0]);
        }
    }

    #[test]
    fn bump_peaks_at_its_centre() {
        // Bump 1 shares bump 6's orbit, so the peak is roughly 6 - 1; every other bump is far away.
        let field = Bumps::default();
        let t = 2.0;
        let [cx, cy] = field.centre(6, t);
        let expected: f32 = (1..field.count())
            .map(|i| {
                let [bx, by] = field.centre(i, t);
                let d2 = (cx - bx).powi(2) + (cy - by).powi(2);
                field.amplitude(i) / (d2 / field.radius(i).powi(2)).exp()
            })
            .sum();
        assert_relative_eq!(field.sample(cx, cy, t), expected, epsilon = 1e-5);
        assert_relative_eq!(field.sample(cx, cy, t), 5.0, epsilon = 1e-3);
    }

    #[test]
    fn zero_radius_bump_does_not_poison_its_centre() {
        let field = Bumps::default();
        let t = 0.75;
        let [cx, cy] = field.centre(0, t);
        assert!(field.sample(cx, cy, t).is_finite());
    }

    #[test]
    fn closures_are_fields() {
        let plane = |x: f32, y: f32, _t: f32| x + 2.0 * y;
        assert_eq!(plane.sample(1.0, 1.0, 0.0), 3.0);
        assert_eq!((&plane).sample(0.5, 0.0, 9.0), 0.5);
    }
}
