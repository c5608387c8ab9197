//! Photometry models and utilities

pub mod color;
pub mod magnitude;

pub use color::{green_normalization, ColorError, LinearRgb, VEGA_COLOR};
pub use magnitude::{brightness_limit, magnitude_to_brightness};
