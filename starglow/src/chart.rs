//! PSF comparison charts
//!
//! A chart renders the same star at a range of magnitudes with every PSF
//! variant side by side: one column per algorithm, one row per magnitude.
//! Stars are drawn into a low-resolution linear buffer, encoded to 8 bits and
//! upscaled by an integer factor so single pixels stay visible, then combined
//! with a template carrying the column titles and magnitude labels.
//!
//! ```text
//!              Original   Optimized  Simplified  Bounded
//!   m = 1         .           .          .          .
//!   m = 0         *           *          *          *
//!   m = -1       (*)         (*)        (*)        (*)
//!   ...
//! ```

use std::path::Path;

use image::{Rgb, RgbImage};
use log::info;
use ndarray::Array3;
use thiserror::Error;

use crate::image_proc::image::{array3_to_rgb_image, gamma_correction, quantize_rgb, upscale_nearest};
use crate::image_proc::overlay::{overlay_to_image, render_labels, LabelAnchor, OverlayError, TextLabel};
use crate::image_proc::render::{draw_star, GlowSettings, RenderError, Star};
use crate::photometry::color::{LinearRgb, VEGA_COLOR};
use crate::photometry::magnitude::{brightness_limit, is_visible, magnitude_to_brightness};
use crate::psf::bounded::DEFAULT_MAX_SQUARE_SIZE;
use crate::psf::{BoundedProfile, PsfAlgorithm};

/// Label text color.
pub const LABEL_COLOR: Rgb<u8> = Rgb([128, 128, 128]);

/// Label font size in output pixels.
pub const LABEL_FONT_SIZE: f32 = 40.0;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Label overlay failed: {0}")]
    Overlay(#[from] OverlayError),

    #[error("Image output failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("Chart needs at least one algorithm and one magnitude")]
    Empty,

    #[error("Upscale factor must be at least 1")]
    InvalidScale,
}

/// Grid geometry of a chart, in output (upscaled) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartLayout {
    /// Half the distance between column centers
    pub col_size: usize,
    /// Width of the magnitude label margin
    pub col_zero: usize,
    /// Distance between row centers
    pub row_size: usize,
    /// Height of the title margin
    pub row_zero: usize,
    /// Upscaling factor from the render buffer to the output image
    pub scale: usize,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            col_size: 100,
            col_zero: 175,
            row_size: 100,
            row_zero: 50,
            scale: 3,
        }
    }
}

impl ChartLayout {
    /// Output image size as (width, height) for a grid of columns and rows.
    ///
    /// Both sides are padded past the next multiple of `scale` so the render
    /// buffer upscales to exactly the output size.
    pub fn image_size(&self, columns: usize, rows: usize) -> (usize, usize) {
        let width = self.col_zero + 2 * self.col_size * columns;
        let height = self.row_zero + self.row_size * (rows + 1);
        (
            pad_past_multiple(width, self.scale),
            pad_past_multiple(height, self.scale),
        )
    }

    /// Shape of the linear render buffer, (height, width, 3).
    pub fn buffer_shape(&self, columns: usize, rows: usize) -> (usize, usize, usize) {
        let (width, height) = self.image_size(columns, rows);
        (height / self.scale, width / self.scale, 3)
    }

    /// Star pixel `(x, y)` in the render buffer for a grid cell.
    pub fn cell_center(&self, column: usize, row: usize) -> (i64, i64) {
        let x = (self.col_zero + (2 * column + 1) * self.col_size) / self.scale;
        let y = (self.row_zero + self.row_size * (row + 1)) / self.scale;
        (x as i64, y as i64)
    }

    /// Column titles and magnitude labels in output coordinates.
    pub fn labels(&self, algorithms: &[PsfAlgorithm], magnitudes: &[f64]) -> Vec<TextLabel> {
        let titles = algorithms.iter().enumerate().map(|(i, algorithm)| {
            TextLabel::new(
                (self.col_zero + (2 * i + 1) * self.col_size) as f64,
                self.row_zero as f64,
                algorithm.title(),
                LabelAnchor::MiddleTop,
            )
        });
        let rows = magnitudes.iter().enumerate().map(|(i, magnitude)| {
            TextLabel::new(
                self.col_zero as f64 / 2.0,
                (self.row_zero + self.row_size * (i + 1)) as f64,
                format!("m = {}", magnitude),
                LabelAnchor::MiddleMiddle,
            )
        });
        titles.chain(rows).collect()
    }
}

fn pad_past_multiple(value: usize, scale: usize) -> usize {
    value + scale - value % scale
}

/// Everything needed to render a comparison chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Angular size of one render buffer pixel
    pub degrees_per_pixel: f64,
    /// Brightness multiplier applied to every star
    pub exposure: f64,
    /// One row per magnitude, top to bottom
    pub magnitudes: Vec<f64>,
    pub star_color: LinearRgb,
    /// Encode with the sRGB curve (also lowers the visibility limit)
    pub gamma_correction: bool,
    /// White template where any lit star pixel replaces the background
    pub white_background: bool,
    /// Mark footprint corners in red
    pub corners: bool,
    /// Largest square the bounded PSF may occupy, render pixels
    pub max_square_size: usize,
    /// One column per algorithm, left to right
    pub algorithms: Vec<PsfAlgorithm>,
    pub layout: ChartLayout,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            degrees_per_pixel: 0.05,
            exposure: 1.0,
            magnitudes: (-6..=1).rev().map(f64::from).collect(),
            star_color: VEGA_COLOR,
            gamma_correction: true,
            white_background: false,
            corners: false,
            max_square_size: DEFAULT_MAX_SQUARE_SIZE,
            algorithms: PsfAlgorithm::ALL.to_vec(),
            layout: ChartLayout::default(),
        }
    }
}

impl ChartConfig {
    fn validate(&self) -> Result<(), ChartError> {
        if self.algorithms.is_empty() || self.magnitudes.is_empty() {
            return Err(ChartError::Empty);
        }
        if self.layout.scale == 0 {
            return Err(ChartError::InvalidScale);
        }
        Ok(())
    }

    /// Soft-clip ceiling for the bounded PSF derived from `max_square_size`.
    pub fn max_brightness(&self) -> f64 {
        BoundedProfile::ceiling_for_square(self.max_square_size, self.degrees_per_pixel)
    }

    /// Output image size as (width, height).
    pub fn image_size(&self) -> (usize, usize) {
        self.layout
            .image_size(self.algorithms.len(), self.magnitudes.len())
    }
}

/// Draw every (algorithm, magnitude) star into a fresh linear buffer.
///
/// Stars too dim to survive 8-bit encoding are skipped.
pub fn render_chart_buffer(config: &ChartConfig) -> Result<Array3<f64>, ChartError> {
    config.validate()?;

    let layout = &config.layout;
    let shape = layout.buffer_shape(config.algorithms.len(), config.magnitudes.len());
    let mut buffer = Array3::zeros(shape);

    let limit = brightness_limit(config.gamma_correction);
    let settings = GlowSettings::new(
        config.degrees_per_pixel,
        config.corners,
        Some(config.max_brightness()),
    )?;

    for (column, &algorithm) in config.algorithms.iter().enumerate() {
        for (row, &magnitude) in config.magnitudes.iter().enumerate() {
            let brightness = magnitude_to_brightness(magnitude, config.exposure);
            if !is_visible(brightness, limit) {
                info!(
                    "Star {} with mag={} is too dim to be displayed",
                    row, magnitude
                );
                continue;
            }

            let (x, y) = layout.cell_center(column, row);
            let star = Star::new(brightness, config.star_color, x, y);
            draw_star(&mut buffer, &star, algorithm, &settings)?;
        }
    }

    Ok(buffer)
}

/// Render a complete labelled chart.
pub fn render_chart(config: &ChartConfig) -> Result<RgbImage, ChartError> {
    let buffer = render_chart_buffer(config)?;
    let encoded = if config.gamma_correction {
        gamma_correction(&buffer)
    } else {
        buffer
    };
    let stars = upscale_nearest(&quantize_rgb(&encoded), config.layout.scale);

    let (width, height) = config.image_size();
    info!("Compositing {}x{} chart", width, height);
    let template = chart_template(config, width as u32, height as u32)?;

    Ok(composite_stars(
        &array3_to_rgb_image(&stars),
        &template,
        config.white_background,
    ))
}

/// Render a chart and write it to `path`; the format follows the extension.
pub fn save_chart(config: &ChartConfig, path: &Path) -> Result<RgbImage, ChartError> {
    let chart = render_chart(config)?;
    chart.save(path)?;
    info!("Saved chart to {}", path.display());
    Ok(chart)
}

fn chart_template(config: &ChartConfig, width: u32, height: u32) -> Result<RgbImage, ChartError> {
    let background = if config.white_background {
        Rgb([255, 255, 255])
    } else {
        Rgb([0, 0, 0])
    };
    let base = RgbImage::from_pixel(width, height, background);

    let labels = config
        .layout
        .labels(&config.algorithms, &config.magnitudes);
    let overlay = render_labels(width, height, &labels, LABEL_COLOR, LABEL_FONT_SIZE)?;

    Ok(overlay_to_image(&base, &overlay))
}

/// Combine rendered stars with the label template.
///
/// On black the two add with saturation; on white any lit star pixel
/// replaces the template so the effective render area shows up.
fn composite_stars(stars: &RgbImage, template: &RgbImage, white_background: bool) -> RgbImage {
    let mut output = template.clone();

    for (x, y, pixel) in output.enumerate_pixels_mut() {
        if x >= stars.width() || y >= stars.height() {
            continue;
        }
        let Rgb(star) = *stars.get_pixel(x, y);
        if white_background {
            if star != [0, 0, 0] {
                *pixel = Rgb(star);
            }
        } else {
            for (channel, value) in pixel.0.iter_mut().zip(star) {
                *channel = channel.saturating_add(value);
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> ChartConfig {
        ChartConfig {
            magnitudes: vec![0.0, -3.0],
            algorithms: vec![PsfAlgorithm::Optimized, PsfAlgorithm::Bounded],
            ..ChartConfig::default()
        }
    }

    #[test]
    fn test_default_layout_geometry() {
        let layout = ChartLayout::default();
        // 175 + 800 = 975 is already a multiple of 3 and still gets padded
        assert_eq!(layout.image_size(4, 8), (978, 951));
        assert_eq!(layout.buffer_shape(4, 8), (317, 326, 3));
        assert_eq!(layout.cell_center(0, 0), (91, 50));
        assert_eq!(layout.cell_center(3, 7), (291, 283));
    }

    #[test]
    fn test_default_config() {
        let config = ChartConfig::default();
        assert_eq!(
            config.magnitudes,
            vec![1.0, 0.0, -1.0, -2.0, -3.0, -4.0, -5.0, -6.0]
        );
        assert_eq!(config.algorithms, PsfAlgorithm::ALL.to_vec());
        assert_eq!(config.image_size(), (978, 951));
    }

    #[test]
    fn test_labels() {
        let layout = ChartLayout::default();
        let labels = layout.labels(&PsfAlgorithm::ALL, &[1.0, -6.0]);
        assert_eq!(labels.len(), 6);

        assert_eq!(labels[0].text, "Original");
        assert_eq!((labels[0].x, labels[0].y), (275.0, 50.0));
        assert_eq!(labels[3].text, "Bounded");
        assert_eq!(labels[3].x, 875.0);

        assert_eq!(labels[4].text, "m = 1");
        assert_eq!((labels[4].x, labels[4].y), (87.5, 150.0));
        assert_eq!(labels[5].text, "m = -6");
        assert_eq!(labels[5].anchor, LabelAnchor::MiddleMiddle);
    }

    #[test]
    fn test_buffer_lit_at_every_cell() {
        let config = small_config();
        let buffer = render_chart_buffer(&config).unwrap();
        assert_eq!(buffer.dim(), config.layout.buffer_shape(2, 2));

        for column in 0..2 {
            for row in 0..2 {
                let (x, y) = config.layout.cell_center(column, row);
                assert!(buffer[[y as usize, x as usize, 1]] > 0.0);
            }
        }
    }

    #[test]
    fn test_dim_stars_skipped() {
        let config = ChartConfig {
            exposure: 1e-6,
            ..small_config()
        };
        let buffer = render_chart_buffer(&config).unwrap();
        assert_eq!(buffer.sum(), 0.0);
    }

    #[test]
    fn test_invalid_configs() {
        let empty = ChartConfig {
            algorithms: vec![],
            ..ChartConfig::default()
        };
        assert!(matches!(render_chart_buffer(&empty), Err(ChartError::Empty)));

        let zero_scale = ChartConfig {
            layout: ChartLayout {
                scale: 0,
                ..ChartLayout::default()
            },
            ..ChartConfig::default()
        };
        assert!(matches!(
            render_chart_buffer(&zero_scale),
            Err(ChartError::InvalidScale)
        ));

        let bad_scale = ChartConfig {
            degrees_per_pixel: -1.0,
            ..small_config()
        };
        assert!(matches!(
            render_chart_buffer(&bad_scale),
            Err(ChartError::Render(RenderError::InvalidScale(_)))
        ));
    }

    #[test]
    fn test_composite_black_background_saturates() {
        let stars = RgbImage::from_pixel(2, 1, Rgb([200, 0, 10]));
        let template = RgbImage::from_pixel(2, 1, Rgb([100, 128, 0]));
        let out = composite_stars(&stars, &template, false);
        assert_eq!(out.get_pixel(0, 0), &Rgb([255, 128, 10]));
    }

    #[test]
    fn test_composite_white_background_replaces() {
        let mut stars = RgbImage::new(2, 1);
        stars.put_pixel(0, 0, Rgb([0, 0, 5]));
        let template = RgbImage::from_pixel(2, 1, Rgb([255, 255, 255]));
        let out = composite_stars(&stars, &template, true);
        assert_eq!(out.get_pixel(0, 0), &Rgb([0, 0, 5]));
        assert_eq!(out.get_pixel(1, 0), &Rgb([255, 255, 255]));
    }
}
