//! Conversions between stellar magnitudes, exposure and linear brightness.
//!
//! Brightness throughout this crate is linear and measured in Vegas: a star of
//! magnitude 0 at exposure 1 has brightness 1. Exposure is a plain multiplier
//! describing how much light the virtual eye collects; an exposure of 5 means
//! a star five times dimmer than Vega just fills a single pixel.

/// Largest linear value that still rounds to zero after 8-bit sRGB encoding.
pub const BRIGHTNESS_LIMIT_GAMMA: f64 = 1.0 / (255.0 * 12.92);

/// Largest linear value that still rounds to zero after plain 8-bit encoding.
pub const BRIGHTNESS_LIMIT_LINEAR: f64 = 1.0 / 255.0;

/// Linear brightness limit for the chosen output encoding.
///
/// Stars dimmer than this would be invisible in the final 8-bit image, so
/// callers screen them out before drawing.
pub fn brightness_limit(gamma_corrected: bool) -> f64 {
    if gamma_corrected {
        BRIGHTNESS_LIMIT_GAMMA
    } else {
        BRIGHTNESS_LIMIT_LINEAR
    }
}

/// Linear brightness in Vegas of a star with the given magnitude.
///
/// # Examples
/// ```rust
/// use starglow::photometry::magnitude::magnitude_to_brightness;
///
/// assert_eq!(magnitude_to_brightness(0.0, 1.0), 1.0);
/// assert!((magnitude_to_brightness(-5.0, 1.0) - 100.0).abs() < 1e-9);
/// ```
pub fn magnitude_to_brightness(magnitude: f64, exposure: f64) -> f64 {
    10f64.powf(-0.4 * magnitude) * exposure
}

/// Exposure at which a star of `faintest_magnitude` sits exactly on `limit`.
pub fn faintest_magnitude_to_exposure(faintest_magnitude: f64, limit: f64) -> f64 {
    limit * 10f64.powf(0.4 * faintest_magnitude)
}

/// Faintest magnitude still visible at `exposure` for the given brightness limit.
pub fn exposure_to_faintest_magnitude(exposure: f64, limit: f64) -> f64 {
    2.5 * (exposure / limit).log10()
}

/// True when a star of this brightness survives output encoding.
pub fn is_visible(brightness: f64, limit: f64) -> bool {
    brightness >= limit
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_magnitude_steps() {
        // Five magnitudes is a factor of 100
        let b1 = magnitude_to_brightness(1.0, 1.0);
        let b6 = magnitude_to_brightness(6.0, 1.0);
        assert_relative_eq!(b1 / b6, 100.0, epsilon = 1e-9);

        // Exposure scales linearly
        assert_relative_eq!(
            magnitude_to_brightness(2.0, 3.0),
            3.0 * magnitude_to_brightness(2.0, 1.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_faintest_magnitude_round_trip() {
        for gamma in [true, false] {
            let limit = brightness_limit(gamma);
            for exposure in [0.1, 1.0, 5.0, 250.0] {
                let mag = exposure_to_faintest_magnitude(exposure, limit);
                assert_relative_eq!(
                    faintest_magnitude_to_exposure(mag, limit),
                    exposure,
                    max_relative = 1e-12
                );

                // A star at the faintest magnitude lands exactly on the limit
                assert_relative_eq!(
                    magnitude_to_brightness(mag, exposure),
                    limit,
                    max_relative = 1e-9
                );
            }
        }
    }

    #[test]
    fn test_gamma_limit_is_stricter() {
        assert!(brightness_limit(true) < brightness_limit(false));
        assert!(is_visible(BRIGHTNESS_LIMIT_LINEAR, BRIGHTNESS_LIMIT_LINEAR));
        assert!(!is_visible(BRIGHTNESS_LIMIT_GAMMA, BRIGHTNESS_LIMIT_LINEAR));
    }
}
