//! Progress decomposition helpers.
//!
//! A node owns a single scale value; these functions split it into the
//! staggered sub-fractions that drive each stroke and structural transform.

/// Fraction of `scale` left once the first `i` of `n` equal segments are
/// consumed. Never negative.
pub fn max_scale(scale: f32, i: usize, n: usize) -> f32 {
    (scale - i as f32 * inverse(n)).max(0.0)
}

/// Normalized progress of segment `i` out of `n`, in `[0, 1]`.
pub fn divide_scale(scale: f32, i: usize, n: usize) -> f32 {
    inverse(n).min(max_scale(scale, i, n)) * n as f32
}

/// `1` for even indices, `-1` for odd ones.
pub fn parity_sign(i: usize) -> f32 {
    1.0 - 2.0 * (i % 2) as f32
}

/// Row of a stroke inside its cluster (two strokes per row).
pub fn half_index(i: usize) -> usize {
    i / 2
}

fn inverse(n: usize) -> f32 {
    1.0 / n as f32
}

/// Per-frame step parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepProfile {
    /// Base increment applied per frame
    pub gap: f32,
    /// Threshold where the mirrored rate switches sides
    pub division: f64,
}

impl Default for StepProfile {
    fn default() -> Self {
        Self {
            gap: 0.05,
            division: 0.51,
        }
    }
}

impl StepProfile {
    /// `floor(scale / division)`: 0 below the threshold, 1 above it for
    /// scales inside a single step.
    pub fn scale_factor(&self, scale: f32) -> f32 {
        (scale as f64 / self.division).floor() as f32
    }

    /// Picks `1/a` or `1/b` depending on which side of the threshold `scale`
    /// sits. Discrete on purpose: there is no blend between the two.
    pub fn mirror_value(&self, scale: f32, a: usize, b: usize) -> f32 {
        let factor = self.scale_factor(scale);
        (1.0 - factor) * inverse(a) + factor * inverse(b)
    }

    /// Signed increment for one frame.
    pub fn update_value(&self, scale: f32, direction: f32, a: usize, b: usize) -> f32 {
        self.mirror_value(scale, a, b) * direction * self.gap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_max_scale_never_negative() {
        assert_eq!(max_scale(0.2, 1, 2), 0.0);
        assert!((max_scale(0.7, 1, 2) - 0.2).abs() < EPSILON);
    }

    #[test]
    fn test_divide_scale_halves() {
        assert_eq!(divide_scale(0.0, 0, 2), 0.0);
        assert!((divide_scale(0.25, 0, 2) - 0.5).abs() < EPSILON);
        assert_eq!(divide_scale(0.25, 1, 2), 0.0);
        assert_eq!(divide_scale(0.5, 0, 2), 1.0);
        assert!((divide_scale(0.75, 1, 2) - 0.5).abs() < EPSILON);
        assert_eq!(divide_scale(1.0, 1, 2), 1.0);
    }

    #[test]
    fn test_divide_scale_staggers_four_lines() {
        // At 0.5 the first two strokes are done, the last two have not started
        assert_eq!(divide_scale(0.5, 0, 4), 1.0);
        assert_eq!(divide_scale(0.5, 1, 4), 1.0);
        assert_eq!(divide_scale(0.5, 2, 4), 0.0);
        assert_eq!(divide_scale(0.5, 3, 4), 0.0);
    }

    #[test]
    fn test_parity_helpers() {
        assert_eq!(parity_sign(0), 1.0);
        assert_eq!(parity_sign(1), -1.0);
        assert_eq!(parity_sign(4), 1.0);
        assert_eq!(half_index(0), 0);
        assert_eq!(half_index(1), 0);
        assert_eq!(half_index(3), 1);
    }

    #[test]
    fn test_scale_factor_threshold() {
        let profile = StepProfile::default();
        assert_eq!(profile.scale_factor(0.0), 0.0);
        assert_eq!(profile.scale_factor(0.5), 0.0);
        assert_eq!(profile.scale_factor(0.52), 1.0);
        assert_eq!(profile.scale_factor(1.0), 1.0);
        assert_eq!(profile.scale_factor(1.03), 2.0);
    }

    #[test]
    fn test_mirror_value_is_discrete() {
        let profile = StepProfile::default();
        assert_eq!(profile.mirror_value(0.1, 4, 1), 0.25);
        assert_eq!(profile.mirror_value(0.509, 4, 1), 0.25);
        assert_eq!(profile.mirror_value(0.6, 4, 1), 1.0);
    }

    #[test]
    fn test_update_value_sign_follows_direction() {
        let profile = StepProfile::default();
        assert!((profile.update_value(0.0, 1.0, 4, 1) - 0.0125).abs() < EPSILON);
        assert!((profile.update_value(0.8, -1.0, 4, 1) + 0.05).abs() < EPSILON);
        assert_eq!(profile.update_value(0.3, 0.0, 4, 1), 0.0);
    }

    proptest! {
        #[test]
        fn prop_divide_scale_is_normalized(scale in -2.0f32..3.0, n in 1usize..8, i in 0usize..8) {
            let value = divide_scale(scale, i, n);
            prop_assert!((0.0..=1.0 + EPSILON).contains(&value));
        }

        #[test]
        fn prop_segment_portion_within_one_segment(scale in -2.0f32..3.0, n in 1usize..8, i in 0usize..8) {
            let portion = inverse(n).min(max_scale(scale, i, n));
            prop_assert!(portion >= 0.0 && portion <= inverse(n));
        }

        #[test]
        fn prop_scale_factor_binary_within_a_step(scale in 0.0f32..=1.0) {
            let factor = StepProfile::default().scale_factor(scale);
            prop_assert!(factor == 0.0 || factor == 1.0);
        }
    }
}
