//! Simplified PSF with a hard cap on footprint size.
//!
//! Renderers that keep glow in a fixed-size square buffer cannot let the glow
//! radius grow without limit. This model first compresses brightness through
//! an arctangent soft clip against a ceiling `M`:
//!
//! ```text
//! B' = atan(B / M) · M        (B' < π/2 · M for every B)
//! ```
//!
//! and derives the glow radius from the dimmed `B'`. A hard clamp would show
//! up as a visible kink in glow size across magnitudes; the arctangent keeps
//! growth smooth while saturating.
//!
//! The falloff shape is the simplified one with a fixed `k`. The exact center
//! (θ = 0) returns a separately supplied value so the core pixel can carry the
//! star's full brightness while the rest of the glow is scaled only by color.

use std::f64::consts::PI;

use super::simplified::inverse_square_falloff;
use super::GlowProfile;

/// Glow radius per square root of dimmed brightness, degrees.
pub const RADIUS_PER_SQRT_BRIGHTNESS: f64 = 0.123;

/// Falloff constant, fixed for every star.
pub const FALLOFF_K: f64 = 0.0016;

/// Default side of the largest square a bounded glow may occupy, pixels.
pub const DEFAULT_MAX_SQUARE_SIZE: usize = 512;

/// Per-star shape parameters of the bounded PSF.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedProfile {
    pub min_theta: f64,
    pub max_theta: f64,
    /// Brightness after the arctangent soft clip
    pub dimmed_brightness: f64,
    center: f64,
}

impl BoundedProfile {
    /// Derive the shape parameters for a star of linear `brightness` under
    /// the soft-clip ceiling `max_brightness`.
    ///
    /// The center value defaults to 1; see [`BoundedProfile::with_center`].
    pub fn from_brightness(brightness: f64, max_brightness: f64) -> Self {
        let dimmed_brightness = (brightness / max_brightness).atan() * max_brightness;
        let max_theta = RADIUS_PER_SQRT_BRIGHTNESS * dimmed_brightness.sqrt();
        let min_theta = max_theta / (FALLOFF_K.powf(-0.5) + 1.0);

        Self {
            min_theta,
            max_theta,
            dimmed_brightness,
            center: 1.0,
        }
    }

    /// Value returned exactly at θ = 0.
    pub fn with_center(self, center: f64) -> Self {
        Self { center, ..self }
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    /// Ceiling `M` for which no glow outgrows a `max_square_size` square.
    ///
    /// The soft clip saturates at `π/2 · M`, so `M` is the brightness that
    /// would fill the square, scaled by `2/π`.
    ///
    /// # Examples
    /// ```rust
    /// use starglow::psf::BoundedProfile;
    ///
    /// let ceiling = BoundedProfile::ceiling_for_square(512, 0.05);
    /// let blinding = BoundedProfile::from_brightness(1e12, ceiling);
    /// assert!(blinding.max_theta / 0.05 <= 256.0);
    /// ```
    pub fn ceiling_for_square(max_square_size: usize, degrees_per_pixel: f64) -> f64 {
        let edge = degrees_per_pixel * max_square_size as f64 / RADIUS_PER_SQRT_BRIGHTNESS;
        edge * edge / (2.0 * PI)
    }

    /// Brightness the soft clip approaches as the input grows without bound.
    pub fn saturated_brightness(max_brightness: f64) -> f64 {
        PI / 2.0 * max_brightness
    }
}

impl GlowProfile for BoundedProfile {
    fn min_theta(&self) -> f64 {
        self.min_theta
    }

    fn max_theta(&self) -> f64 {
        self.max_theta
    }

    fn intensity(&self, theta: f64) -> f64 {
        if theta == 0.0 {
            self.center
        } else if theta < self.min_theta {
            1.0 // overexposed
        } else if theta < self.max_theta {
            inverse_square_falloff(theta, self.max_theta, FALLOFF_K)
        } else {
            0.0
        }
    }
}
