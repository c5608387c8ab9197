//! Unmodified photopic point spread function.
//!
//! Weighted sum of a narrow Gaussian core and two inverse-power wings in
//! `(θ + 0.02)`, following the research by Greg Spencer et al. The profile
//! has no finite support, so it is the reference every bounded model is
//! compared against rather than something to render at scale.

use super::GlowProfile;

const CORE_AMPLITUDE: f64 = 2.61e6;
const CORE_WIDTH: f64 = 50.0;
const CUBIC_AMPLITUDE: f64 = 20.91;
const SQUARE_AMPLITUDE: f64 = 72.37;
const WING_OFFSET: f64 = 0.02;

const CORE_WEIGHT: f64 = 0.384;
const CUBIC_WEIGHT: f64 = 0.478;
const SQUARE_WEIGHT: f64 = 0.138;

/// Raw (unnormalized) photopic PSF at angle `theta` in degrees.
pub fn photopic_psf(theta: f64) -> f64 {
    let core = CORE_AMPLITUDE * (-(CORE_WIDTH * theta).powi(2)).exp();
    let offset = theta + WING_OFFSET;
    let cubic = CUBIC_AMPLITUDE / offset.powi(3);
    let square = SQUARE_AMPLITUDE / offset.powi(2);
    CORE_WEIGHT * core + CUBIC_WEIGHT * cubic + SQUARE_WEIGHT * square
}

/// The original PSF normalized to 1 at the star center.
///
/// There are no per-star parameters: brightness only scales the color the
/// profile is multiplied by.
#[derive(Debug, Clone, Copy)]
pub struct OriginalProfile {
    peak: f64,
}

impl Default for OriginalProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginalProfile {
    pub fn new() -> Self {
        Self {
            peak: photopic_psf(0.0),
        }
    }
}

impl GlowProfile for OriginalProfile {
    /// Only the exact center is saturated.
    fn min_theta(&self) -> f64 {
        0.0
    }

    /// The original profile never reaches zero.
    fn max_theta(&self) -> f64 {
        f64::INFINITY
    }

    fn intensity(&self, theta: f64) -> f64 {
        photopic_psf(theta) / self.peak
    }
}
