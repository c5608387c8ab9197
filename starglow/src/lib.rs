//! Photopic point-spread-function glow rendering for star visualization
//!
//! This crate renders stars the way the human eye perceives them: a bright
//! core surrounded by a glow whose size grows with brightness. It provides the
//! photopic PSF and three square-bounded approximations of it, a compositor
//! that adds star glow into linear RGB buffers, and tooling to compare the
//! approximations in labelled charts.

pub mod chart;
pub mod image_proc;
pub mod photometry;
pub mod psf;
pub mod shared_args;

// Re-exports for easier access
pub use chart::{render_chart, save_chart, ChartConfig, ChartError, ChartLayout};
pub use image_proc::render::{draw_star, GlowSettings, RenderError, Star};
pub use photometry::color::{green_normalization, LinearRgb, VEGA_COLOR};
pub use psf::{GlowProfile, PsfAlgorithm};
