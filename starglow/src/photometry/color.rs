//! Star color handling for glow rendering.
//!
//! Colors are carried as linear-light RGB triples in arbitrary positive scale.
//! Before a star is drawn its color goes through [`green_normalization`], which
//! makes the green channel the brightness anchor: a star of brightness `B` is
//! rendered with `color * B`, so a normalized color keeps `B` meaning "green
//! channel value" regardless of hue.
//!
//! # Saturation floor
//!
//! Extremely saturated colors (one channel near zero) make the glow of bright
//! stars look artificial, so the normalizer pushes every channel towards white
//! until the weakest one reaches [`COLOR_SATURATION_LIMIT`] of the strongest.
//!
//! # Examples
//!
//! ```rust
//! use starglow::photometry::color::{green_normalization, LinearRgb, VEGA_COLOR};
//!
//! let normalized = green_normalization(VEGA_COLOR);
//! assert!((normalized.g() - 1.0).abs() < 1e-12);
//!
//! let red = LinearRgb::new(1.0, 0.0, 0.0)?;
//! let pushed = green_normalization(red);
//! assert!(pushed.r() > pushed.g());
//! # Ok::<(), starglow::photometry::color::ColorError>(())
//! ```

use std::fmt;
use std::ops::Mul;
use std::str::FromStr;
use thiserror::Error;

/// Ratio of the minimum color component to the maximum one below which a
/// color is desaturated.
pub const COLOR_SATURATION_LIMIT: f64 = 0.1;

/// Color of Vega without gamma correction, the reference star.
pub const VEGA_COLOR: LinearRgb = LinearRgb([0.417, 0.612, 1.0]);

/// Errors raised when constructing a color.
#[derive(Error, Debug, PartialEq)]
pub enum ColorError {
    #[error("Color component {0} must be finite and non-negative")]
    InvalidComponent(f64),
    #[error("Color must have at least one positive component")]
    AllZero,
    #[error("Color must be given as 'r,g,b', got '{0}'")]
    Malformed(String),
}

/// Linear-light RGB triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb(pub(crate) [f64; 3]);

impl LinearRgb {
    /// Create a color, rejecting negative, non-finite and all-zero input.
    pub fn new(r: f64, g: f64, b: f64) -> Result<Self, ColorError> {
        for c in [r, g, b] {
            if !c.is_finite() || c < 0.0 {
                return Err(ColorError::InvalidComponent(c));
            }
        }
        if r == 0.0 && g == 0.0 && b == 0.0 {
            return Err(ColorError::AllZero);
        }
        Ok(Self([r, g, b]))
    }

    pub fn r(&self) -> f64 {
        self.0[0]
    }

    pub fn g(&self) -> f64 {
        self.0[1]
    }

    pub fn b(&self) -> f64 {
        self.0[2]
    }

    /// Components as an array in R, G, B order.
    pub fn channels(&self) -> [f64; 3] {
        self.0
    }

    pub fn max(&self) -> f64 {
        self.0.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn min(&self) -> f64 {
        self.0.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// True when every channel is strictly below `limit`.
    pub fn all_below(&self, limit: f64) -> bool {
        self.0.iter().all(|&c| c < limit)
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self(self.0.map(f))
    }
}

impl Mul<f64> for LinearRgb {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        self.map(|c| c * rhs)
    }
}

impl fmt::Display for LinearRgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.r(), self.g(), self.b())
    }
}

impl FromStr for LinearRgb {
    type Err = ColorError;

    /// Parse a color in the format "r,g,b"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 3 {
            return Err(ColorError::Malformed(s.to_string()));
        }

        let mut values = [0.0; 3];
        for (value, part) in values.iter_mut().zip(&parts) {
            *value = part
                .trim()
                .parse::<f64>()
                .map_err(|_| ColorError::Malformed(s.to_string()))?;
        }

        LinearRgb::new(values[0], values[1], values[2])
    }
}

/// Normalize a color by its green value and correct extreme saturation.
///
/// 1. Divide by the maximum component, so the strongest channel becomes 1.
/// 2. If the weakest channel is below [`COLOR_SATURATION_LIMIT`], push every
///    channel towards white by `deficit * (1 - c)^2`, where `deficit` is the
///    distance of the weakest channel from the floor.
/// 3. Divide by the (possibly pushed) green component.
///
/// The result always has `g() == 1`.
pub fn green_normalization(color: LinearRgb) -> LinearRgb {
    let color = color * (1.0 / color.max());
    let deficit = COLOR_SATURATION_LIMIT - color.min();
    let color = if deficit > 0.0 {
        color.map(|c| c + deficit * (1.0 - c) * (1.0 - c))
    } else {
        color
    };
    let green = color.g();
    color * (1.0 / green)
}
