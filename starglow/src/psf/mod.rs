//! Photopic point spread functions for star glow.
//!
//! Every model here maps an angular distance θ (degrees from the pixel to the
//! star center) to a glow intensity in `[0, 1]`. The bounded models split the
//! θ axis into three regions:
//!
//! ```text
//!   1.0 ┤━━━━━━━┓
//!       │       ┃╲
//!       │       ┃  ╲_
//!       │       ┃     ╲__
//!   0.0 ┤       ┃        ╲___━━━━━━━━━━━
//!       └───────┸────────────┸──────────── θ
//!          overexposed  falloff     zero
//!               min_theta   max_theta
//! ```
//!
//! Each model solves for its own `min_theta` so the falloff reaches exactly 1
//! there, and its falloff reaches exactly 0 at `max_theta`, so neither edge
//! needs clamping.
//!
//! # Models
//!
//! - [`OriginalProfile`]: the unmodified photopic PSF by Greg Spencer et al.
//!   Unbounded support, used as ground truth.
//! - [`OptimizedProfile`]: rational fit to the original that fits a square.
//! - [`SimplifiedProfile`]: single-constant version of the optimized fit.
//! - [`BoundedProfile`]: simplified shape whose radius is soft-clipped so the
//!   footprint never exceeds a fixed square.
//! - [`fullscreen`]: inverse-square form intended for full-screen shaders.

pub mod bounded;
pub mod fullscreen;
pub mod optimized;
pub mod original;
pub mod simplified;

use clap::ValueEnum;
use std::fmt;

pub use bounded::BoundedProfile;
pub use optimized::OptimizedProfile;
pub use original::OriginalProfile;
pub use simplified::SimplifiedProfile;

/// Radial glow profile of one star.
///
/// Implementors hold the per-star shape parameters derived from brightness;
/// [`GlowProfile::intensity`] is a pure function of θ given those parameters.
pub trait GlowProfile {
    /// Angle below which the profile is saturated at 1.
    fn min_theta(&self) -> f64;

    /// Glow radius: the profile is 0 at and beyond this angle.
    fn max_theta(&self) -> f64;

    /// Normalized glow intensity at angular distance `theta` in degrees.
    fn intensity(&self, theta: f64) -> f64;
}

/// The PSF variants available for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum PsfAlgorithm {
    /// Unmodified photopic PSF evaluated over the whole image
    Original,
    /// Rational fit bounded to a square footprint
    Optimized,
    /// Single-constant rational fit bounded to a square footprint
    Simplified,
    /// Simplified fit with a soft-clipped maximum footprint
    Bounded,
}

impl PsfAlgorithm {
    /// All variants in chart column order.
    pub const ALL: [PsfAlgorithm; 4] = [
        PsfAlgorithm::Original,
        PsfAlgorithm::Optimized,
        PsfAlgorithm::Simplified,
        PsfAlgorithm::Bounded,
    ];

    /// Human readable name used in chart titles.
    pub fn title(&self) -> &'static str {
        match self {
            PsfAlgorithm::Original => "Original",
            PsfAlgorithm::Optimized => "Optimized",
            PsfAlgorithm::Simplified => "Simplified",
            PsfAlgorithm::Bounded => "Bounded",
        }
    }

    /// Whether the variant confines its glow to a square footprint.
    pub fn is_bounded(&self) -> bool {
        !matches!(self, PsfAlgorithm::Original)
    }
}

impl fmt::Display for PsfAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PsfAlgorithm::Original => write!(f, "original"),
            PsfAlgorithm::Optimized => write!(f, "optimized"),
            PsfAlgorithm::Simplified => write!(f, "simplified"),
            PsfAlgorithm::Bounded => write!(f, "bounded"),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::GlowProfile;

    /// Maximum jump allowed across a region boundary.
    pub const CONTINUITY_TOLERANCE: f64 = 1e-6;

    /// Assert the three-region contract for a bounded profile.
    pub fn assert_region_contract<P: GlowProfile>(profile: &P) {
        let min_theta = profile.min_theta();
        let max_theta = profile.max_theta();
        assert!(
            0.0 < min_theta && min_theta < max_theta,
            "thresholds out of order: {min_theta} {max_theta}"
        );

        // Overexposed core
        for frac in [0.01, 0.25, 0.5, 0.99] {
            assert_eq!(profile.intensity(min_theta * frac), 1.0);
        }

        // Zero tail
        for mult in [1.0, 1.001, 2.0, 10.0] {
            assert_eq!(profile.intensity(max_theta * mult), 0.0);
        }

        // Continuity at both thresholds
        let eps = min_theta * 1e-9;
        let below_min = profile.intensity(min_theta - eps);
        let at_min = profile.intensity(min_theta + eps);
        assert!(
            (below_min - at_min).abs() < CONTINUITY_TOLERANCE,
            "jump at min_theta: {below_min} -> {at_min}"
        );
        let before_max = profile.intensity(max_theta * (1.0 - 1e-9));
        assert!(
            before_max.abs() < CONTINUITY_TOLERANCE,
            "jump at max_theta: {before_max}"
        );
    }

    /// Assert the profile never increases across `[0, theta_end]`.
    pub fn assert_non_increasing<P: GlowProfile>(profile: &P, theta_end: f64) {
        let steps = 2000;
        let mut previous = profile.intensity(0.0);
        for i in 1..=steps {
            let theta = theta_end * i as f64 / steps as f64;
            let value = profile.intensity(theta);
            assert!(
                value <= previous + 1e-12,
                "profile increased at theta={theta}: {previous} -> {value}"
            );
            assert!((0.0..=1.0).contains(&value), "value out of range: {value}");
            previous = value;
        }
    }
}
