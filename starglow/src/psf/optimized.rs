//! Square-bounded rational approximation of the photopic PSF.
//!
//! The falloff is `(b / (θ - h) - 1)² / k`. The glow radius grows with the
//! square root of brightness and `h`, `k` follow empirical power laws of that
//! radius. With `b = max_theta - h` the falloff is exactly 0 at `max_theta`,
//! and solving `falloff(min_theta) = 1` gives `min_theta = h + b / (√k + 1)`.
//!
//! Valid down to 1 Vega and 0.05 degrees per pixel; there is no upper limit.

use super::GlowProfile;

/// Glow radius per square root of brightness, degrees.
const RADIUS_PER_SQRT_BRIGHTNESS: f64 = 0.33435822702992773;

const H_COEFFICIENT: f64 = 0.0082234880783653;
const H_EXPONENT: f64 = 0.7369983254906639;

const K_COEFFICIENT: f64 = 38581.577272697796;
const K_EXPONENT: f64 = 2.368787717957141;

/// Per-star shape parameters of the optimized PSF.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizedProfile {
    pub min_theta: f64,
    pub max_theta: f64,
    pub h: f64,
    pub k: f64,
    pub b: f64,
}

impl OptimizedProfile {
    /// Derive the shape parameters for a star of linear `brightness`.
    pub fn from_brightness(brightness: f64) -> Self {
        let max_theta = RADIUS_PER_SQRT_BRIGHTNESS * brightness.sqrt();
        let h = H_COEFFICIENT * max_theta.powf(H_EXPONENT);
        let k = K_COEFFICIENT * max_theta.powf(K_EXPONENT);
        let b = max_theta - h;
        debug_assert!(k >= 0.0, "negative k for brightness {brightness}");
        let min_theta = h + b / (k.sqrt() + 1.0);

        Self {
            min_theta,
            max_theta,
            h,
            k,
            b,
        }
    }
}

impl GlowProfile for OptimizedProfile {
    fn min_theta(&self) -> f64 {
        self.min_theta
    }

    fn max_theta(&self) -> f64 {
        self.max_theta
    }

    fn intensity(&self, theta: f64) -> f64 {
        if theta < self.min_theta {
            1.0 // overexposed
        } else if theta < self.max_theta {
            let brackets = self.b / (theta - self.h) - 1.0;
            brackets * brackets / self.k
        } else {
            0.0 // past max_theta the rational form starts to grow again
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::psf::test_support::{assert_non_increasing, assert_region_contract};
    use approx::assert_relative_eq;

    const BRIGHTNESSES: [f64; 6] = [1.0, 2.5, 10.0, 100.0, 1e4, 1e6];

    #[test]
    fn test_region_contract() {
        for brightness in BRIGHTNESSES {
            let profile = OptimizedProfile::from_brightness(brightness);
            assert_region_contract(&profile);
        }
    }

    #[test]
    fn test_monotonic() {
        for brightness in BRIGHTNESSES {
            let profile = OptimizedProfile::from_brightness(brightness);
            assert_non_increasing(&profile, profile.max_theta * 1.2);
        }
    }

    #[test]
    fn test_falloff_hits_one_at_min_theta() {
        let profile = OptimizedProfile::from_brightness(50.0);
        let brackets = profile.b / (profile.min_theta - profile.h) - 1.0;
        assert_relative_eq!(brackets * brackets / profile.k, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_radius_scales_with_sqrt_brightness() {
        let one = OptimizedProfile::from_brightness(1.0);
        let hundred = OptimizedProfile::from_brightness(100.0);
        assert_relative_eq!(one.max_theta, RADIUS_PER_SQRT_BRIGHTNESS);
        assert_relative_eq!(hundred.max_theta / one.max_theta, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_k_positive_over_brightness_range() {
        // The lower threshold takes sqrt(k); check it is defined across
        // everything from barely visible stars to absurdly bright ones
        let mut brightness = 1e-3;
        while brightness < 1e8 {
            let profile = OptimizedProfile::from_brightness(brightness);
            assert!(profile.k > 0.0);
            assert!(profile.b > 0.0);
            assert!(profile.min_theta.is_finite());
            assert!(profile.min_theta < profile.max_theta);
            brightness *= 1.7;
        }
    }
}
