//! Glow compositor: adds one star's glow into a linear RGB buffer.
//!
//! The buffer is a caller-owned `Array3<f64>` of shape (height, width, 3) in
//! linear light. Every draw only adds to it, so drawing a set of stars gives
//! the same result in any order.
//!
//! # Rendering paths
//!
//! - **Single pixel**: when the scaled color is below 1 in every channel the
//!   star cannot visibly outgrow one pixel, and its color is added to the
//!   center pixel alone.
//! - **Square glow**: otherwise the selected profile is evaluated over the
//!   footprint square, clipped to the buffer, and added per channel.
//! - **Full image**: the original PSF has no finite support and is evaluated
//!   for every pixel of the buffer, with no single-pixel shortcut.

use log::debug;
use ndarray::{s, Array3, ArrayViewMut3};
use thiserror::Error;

use super::corners::draw_corners;
use super::footprint::{half_width_for_radius, Footprint};
use crate::photometry::{green_normalization, LinearRgb};
use crate::psf::{
    BoundedProfile, GlowProfile, OptimizedProfile, OriginalProfile, PsfAlgorithm,
    SimplifiedProfile,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Degrees per pixel must be positive and finite, got {0}")]
    InvalidScale(f64),

    #[error("Brightness ceiling must be positive and finite, got {0}")]
    InvalidCeiling(f64),

    #[error("The bounded PSF requires a maximum brightness")]
    MissingMaxBrightness,

    #[error("Image buffer must have 3 color channels, got {0}")]
    ChannelMismatch(usize),
}

/// A star to draw, alive for one compositor call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    /// Linear brightness in multiples of the reference star (Vega)
    pub brightness: f64,
    pub color: LinearRgb,
    /// Center column
    pub x: i64,
    /// Center row
    pub y: i64,
}

impl Star {
    pub fn new(brightness: f64, color: LinearRgb, x: i64, y: i64) -> Self {
        Self {
            brightness,
            color,
            x,
            y,
        }
    }

    /// Green-normalized color multiplied by brightness.
    pub fn scaled_color(&self) -> LinearRgb {
        green_normalization(self.color) * self.brightness
    }
}

/// Scale and diagnostic flags shared by every draw of a rendering session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowSettings {
    degrees_per_pixel: f64,
    draw_corners: bool,
    max_brightness: Option<f64>,
}

impl GlowSettings {
    /// Validate and bundle the compositor settings.
    ///
    /// # Arguments
    /// * `degrees_per_pixel` - Angular size of one pixel
    /// * `draw_corners` - Mark footprint corners in the red channel
    /// * `max_brightness` - Soft-clip ceiling, required by the bounded PSF
    pub fn new(
        degrees_per_pixel: f64,
        draw_corners: bool,
        max_brightness: Option<f64>,
    ) -> Result<Self, RenderError> {
        if !(degrees_per_pixel.is_finite() && degrees_per_pixel > 0.0) {
            return Err(RenderError::InvalidScale(degrees_per_pixel));
        }
        if let Some(ceiling) = max_brightness {
            if !(ceiling.is_finite() && ceiling > 0.0) {
                return Err(RenderError::InvalidCeiling(ceiling));
            }
        }

        Ok(Self {
            degrees_per_pixel,
            draw_corners,
            max_brightness,
        })
    }

    pub fn degrees_per_pixel(&self) -> f64 {
        self.degrees_per_pixel
    }

    pub fn draw_corners(&self) -> bool {
        self.draw_corners
    }

    pub fn max_brightness(&self) -> Option<f64> {
        self.max_brightness
    }
}

/// How a star's glow will be laid down in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlowShape {
    /// Star fits in its center pixel
    SinglePixel,
    /// Bounded glow over a square footprint
    Square(Footprint),
    /// Unbounded glow over the whole buffer
    FullImage,
}

/// Decide the rendering path and footprint for a star without drawing it.
pub fn glow_shape(
    star: &Star,
    algorithm: PsfAlgorithm,
    settings: &GlowSettings,
) -> Result<GlowShape, RenderError> {
    let max_theta = match algorithm {
        PsfAlgorithm::Original => return Ok(GlowShape::FullImage),
        PsfAlgorithm::Optimized => OptimizedProfile::from_brightness(star.brightness).max_theta,
        PsfAlgorithm::Simplified => SimplifiedProfile::from_brightness(star.brightness).max_theta,
        PsfAlgorithm::Bounded => bounded_profile(star, settings)?.max_theta,
    };

    Ok(match square_footprint(star, max_theta, settings) {
        Some(footprint) => GlowShape::Square(footprint),
        None => GlowShape::SinglePixel,
    })
}

/// Footprint of a star whose glow outgrows one pixel, `None` otherwise.
fn square_footprint(star: &Star, max_theta: f64, settings: &GlowSettings) -> Option<Footprint> {
    if star.scaled_color().all_below(1.0) {
        return None;
    }
    let half_width = half_width_for_radius(max_theta, settings.degrees_per_pixel);
    Some(Footprint::new(star.x, star.y, half_width))
}

fn bounded_profile(star: &Star, settings: &GlowSettings) -> Result<BoundedProfile, RenderError> {
    let ceiling = settings
        .max_brightness
        .ok_or(RenderError::MissingMaxBrightness)?;
    Ok(BoundedProfile::from_brightness(star.brightness, ceiling).with_center(star.brightness))
}

/// Add one star's glow into `image`.
///
/// The buffer is borrowed mutably for the duration of the call and handed
/// back so draws can be chained. Writes outside the buffer are clipped away;
/// a star centered off-buffer only contributes the part of its glow that
/// reaches in.
///
/// # Errors
/// * [`RenderError::MissingMaxBrightness`] for the bounded PSF without a ceiling
/// * [`RenderError::ChannelMismatch`] when the buffer is not RGB
///
/// # Examples
/// ```rust
/// use ndarray::Array3;
/// use starglow::image_proc::render::{draw_star, GlowSettings, Star};
/// use starglow::photometry::VEGA_COLOR;
/// use starglow::psf::PsfAlgorithm;
///
/// let mut image = Array3::zeros((100, 100, 3));
/// let settings = GlowSettings::new(0.05, false, None).unwrap();
/// let star = Star::new(100.0, VEGA_COLOR, 50, 50);
/// draw_star(&mut image, &star, PsfAlgorithm::Optimized, &settings).unwrap();
/// assert!(image[[50, 50, 1]] > 99.0);
/// ```
pub fn draw_star<'a>(
    image: &'a mut Array3<f64>,
    star: &Star,
    algorithm: PsfAlgorithm,
    settings: &GlowSettings,
) -> Result<&'a mut Array3<f64>, RenderError> {
    let channels = image.dim().2;
    if channels != 3 {
        return Err(RenderError::ChannelMismatch(channels));
    }

    let color = green_normalization(star.color);
    let scaled_color = color * star.brightness;

    match algorithm {
        PsfAlgorithm::Original => {
            let profile = OriginalProfile::new();
            let dpp = settings.degrees_per_pixel;
            accumulate_glow(image.view_mut(), (0, 0), star, &profile, scaled_color, dpp);
        }
        PsfAlgorithm::Optimized => {
            let profile = OptimizedProfile::from_brightness(star.brightness);
            add_glow(image, star, &profile, scaled_color, algorithm, settings);
        }
        PsfAlgorithm::Simplified => {
            let profile = SimplifiedProfile::from_brightness(star.brightness);
            add_glow(image, star, &profile, scaled_color, algorithm, settings);
        }
        PsfAlgorithm::Bounded => {
            // Glow is scaled by color only; brightness lives in the center pixel
            let profile = bounded_profile(star, settings)?;
            add_glow(image, star, &profile, color, algorithm, settings);
        }
    }

    Ok(image)
}

/// Single-pixel or square-glow rendering for the bounded profiles.
fn add_glow<P: GlowProfile>(
    image: &mut Array3<f64>,
    star: &Star,
    profile: &P,
    color: LinearRgb,
    algorithm: PsfAlgorithm,
    settings: &GlowSettings,
) {
    let Some(footprint) = square_footprint(star, profile.max_theta(), settings) else {
        add_single_pixel(image, star, star.scaled_color());
        return;
    };

    debug!(
        "{} glow for brightness {:.3} at ({}, {}): half width {} px",
        algorithm, star.brightness, star.x, star.y, footprint.half_width
    );

    let (height, width, _) = image.dim();
    if let Some(region) = footprint.clip(width, height) {
        let view = image.slice_mut(s![
            region.min_row..=region.max_row,
            region.min_col..=region.max_col,
            ..
        ]);
        accumulate_glow(
            view,
            (region.min_row, region.min_col),
            star,
            profile,
            color,
            settings.degrees_per_pixel,
        );
    }

    if settings.draw_corners {
        draw_corners(image, (star.x, star.y), footprint.half_width);
    }
}

fn add_single_pixel(image: &mut Array3<f64>, star: &Star, color: LinearRgb) {
    let (height, width, _) = image.dim();
    if star.x < 0 || star.y < 0 || star.x as usize >= width || star.y as usize >= height {
        return;
    }

    let mut pixel = image.slice_mut(s![star.y as usize, star.x as usize, ..]);
    for (sample, channel) in pixel.iter_mut().zip(color.channels()) {
        *sample += channel;
    }
}

/// Evaluate `profile` for every pixel of `view` and add the colored result.
///
/// `origin` is the (row, column) of the view's first pixel in the full buffer.
fn accumulate_glow<P: GlowProfile>(
    mut view: ArrayViewMut3<f64>,
    origin: (usize, usize),
    star: &Star,
    profile: &P,
    color: LinearRgb,
    degrees_per_pixel: f64,
) {
    for (row_offset, mut row) in view.outer_iter_mut().enumerate() {
        let dy = (origin.0 + row_offset) as f64 - star.y as f64;
        for (col_offset, mut pixel) in row.outer_iter_mut().enumerate() {
            let dx = (origin.1 + col_offset) as f64 - star.x as f64;
            let glow = profile.intensity(dx.hypot(dy) * degrees_per_pixel);
            if glow == 0.0 {
                continue;
            }
            for (sample, channel) in pixel.iter_mut().zip(color.channels()) {
                *sample += glow * channel;
            }
        }
    }
}
