//! Inverse-square PSF meant for full-screen shaders.
//!
//! Works directly on θ² so a shader never needs a square root. The price of
//! the simplification is a dimmer glow than the original PSF. Not selectable
//! in the compositor; kept for profile comparisons.

/// Amplitude of the `1/θ²` tail, square degrees.
pub const TAIL_AMPLITUDE: f64 = 4.43366571e-6;

/// θ² below which the full-screen profile is saturated.
///
/// Choosing the amplitude itself makes the profile continuous there.
pub const DEFAULT_MIN_THETA2: f64 = TAIL_AMPLITUDE;

/// Full-screen PSF at squared angle `theta2` (square degrees).
///
/// # Examples
/// ```rust
/// use starglow::psf::fullscreen::{fullscreen_psf, DEFAULT_MIN_THETA2};
///
/// assert_eq!(fullscreen_psf(0.0, DEFAULT_MIN_THETA2), 1.0);
/// assert!(fullscreen_psf(1.0, DEFAULT_MIN_THETA2) < 1e-5);
/// ```
pub fn fullscreen_psf(theta2: f64, min_theta2: f64) -> f64 {
    if theta2 < min_theta2 {
        1.0 // overexposed
    } else {
        TAIL_AMPLITUDE / theta2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_continuous_at_default_threshold() {
        let below = fullscreen_psf(DEFAULT_MIN_THETA2 * (1.0 - 1e-9), DEFAULT_MIN_THETA2);
        let above = fullscreen_psf(DEFAULT_MIN_THETA2, DEFAULT_MIN_THETA2);
        assert_eq!(below, 1.0);
        assert_relative_eq!(above, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_square_tail() {
        let near = fullscreen_psf(0.01, DEFAULT_MIN_THETA2);
        let far = fullscreen_psf(0.04, DEFAULT_MIN_THETA2);
        // Doubling θ quarters the intensity
        assert_relative_eq!(near / far, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_monotonic() {
        let mut previous = fullscreen_psf(0.0, DEFAULT_MIN_THETA2);
        for i in 1..1000 {
            let theta = i as f64 * 1e-3;
            let value = fullscreen_psf(theta * theta, DEFAULT_MIN_THETA2);
            assert!(value <= previous);
            previous = value;
        }
    }
}
