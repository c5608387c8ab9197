//! Single-constant rational approximation of the photopic PSF.
//!
//! The falloff is `k · (max_theta / θ - 1)²`, which vanishes at `max_theta` by
//! construction. Solving `falloff(min_theta) = 1` gives
//! `min_theta = max_theta / (k^-½ + 1)`.

use super::GlowProfile;

/// Glow radius per square root of brightness, degrees.
const RADIUS_PER_SQRT_BRIGHTNESS: f64 = 0.2;

const K_COEFFICIENT: f64 = 3.3e-5;
const K_EXPONENT: f64 = -2.5;

/// Per-star shape parameters of the simplified PSF.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplifiedProfile {
    pub min_theta: f64,
    pub max_theta: f64,
    pub k: f64,
}

impl SimplifiedProfile {
    /// Derive the shape parameters for a star of linear `brightness`.
    pub fn from_brightness(brightness: f64) -> Self {
        let max_theta = RADIUS_PER_SQRT_BRIGHTNESS * brightness.sqrt();
        let k = K_COEFFICIENT * max_theta.powf(K_EXPONENT);
        let min_theta = max_theta / (k.powf(-0.5) + 1.0);

        Self {
            min_theta,
            max_theta,
            k,
        }
    }
}

/// Shared falloff of the simplified and bounded models.
pub(crate) fn inverse_square_falloff(theta: f64, max_theta: f64, k: f64) -> f64 {
    let brackets = max_theta / theta - 1.0;
    k * brackets * brackets
}

impl GlowProfile for SimplifiedProfile {
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
            inverse_square_falloff(theta, self.max_theta, self.k)
        } else {
            0.0
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
            let profile = SimplifiedProfile::from_brightness(brightness);
            assert_region_contract(&profile);
        }
    }

    #[test]
    fn test_monotonic() {
        for brightness in BRIGHTNESSES {
            let profile = SimplifiedProfile::from_brightness(brightness);
            assert_non_increasing(&profile, profile.max_theta * 1.2);
        }
    }

    #[test]
    fn test_falloff_hits_one_at_min_theta() {
        let profile = SimplifiedProfile::from_brightness(300.0);
        assert_relative_eq!(
            inverse_square_falloff(profile.min_theta, profile.max_theta, profile.k),
            1.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_smaller_radius_than_optimized() {
        use crate::psf::OptimizedProfile;

        for brightness in BRIGHTNESSES {
            let simplified = SimplifiedProfile::from_brightness(brightness);
            let optimized = OptimizedProfile::from_brightness(brightness);
            assert!(simplified.max_theta < optimized.max_theta);
        }
    }
}
