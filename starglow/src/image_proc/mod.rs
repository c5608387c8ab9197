//! Image buffer operations for star glow rendering
//!
//! This module holds everything that touches pixels: the glow compositor that
//! adds stars into a linear RGB buffer, footprint clipping, the diagnostic
//! corner marker, and the output path from linear light to labelled 8-bit
//! images.

pub mod corners;
pub mod footprint;
pub mod image;
pub mod overlay;
pub mod render;

// Re-export key functionality for easier access
pub use corners::draw_corners;
pub use footprint::{half_width_for_radius, ClippedRegion, Footprint};
pub use image::{array3_to_rgb_image, gamma_correction, quantize_rgb, upscale_nearest};
pub use overlay::{overlay_to_image, render_labels, LabelAnchor, OverlayError, TextLabel};
pub use render::{draw_star, glow_shape, GlowSettings, GlowShape, RenderError, Star};
