//! Text label overlays for rendered charts
//!
//! Labels are laid out as an SVG document, rasterised with resvg into a
//! transparent `tiny_skia::Pixmap`, and alpha-blended onto an `RgbImage`.
//! System fonts are loaded through usvg's font database.

use std::sync::Arc;

use image::{Rgb, RgbImage};
use log::warn;
use thiserror::Error;
use tiny_skia::{Pixmap, Transform};
use usvg::{fontdb, Options, Tree};

/// Font family requested for labels; widely available on Linux.
pub const LABEL_FONT_FAMILY: &str = "DejaVu Sans";

#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("Failed to parse overlay SVG: {0}")]
    Svg(#[from] usvg::Error),

    #[error("Cannot allocate a {width}x{height} overlay")]
    Allocation { width: u32, height: u32 },
}

/// Which point of the label sits on its coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAnchor {
    /// Horizontally centered, top edge at `y`
    MiddleTop,
    /// Centered on both axes
    MiddleMiddle,
}

impl LabelAnchor {
    fn svg_attributes(&self) -> &'static str {
        match self {
            LabelAnchor::MiddleTop => r#"text-anchor="middle" dominant-baseline="hanging""#,
            LabelAnchor::MiddleMiddle => r#"text-anchor="middle" dominant-baseline="central""#,
        }
    }
}

/// One line of text placed in image coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub anchor: LabelAnchor,
}

impl TextLabel {
    pub fn new(x: f64, y: f64, text: impl Into<String>, anchor: LabelAnchor) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            anchor,
        }
    }
}

/// Build the SVG document for a set of labels.
pub fn labels_to_svg(
    width: u32,
    height: u32,
    labels: &[TextLabel],
    color: Rgb<u8>,
    font_size: f32,
) -> String {
    let Rgb([r, g, b]) = color;
    let color_str = format!("#{:02x}{:02x}{:02x}", r, g, b);

    let mut svg_data = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
        width, height
    );
    for label in labels {
        svg_data.push_str(&format!(
            r#"<text x="{}" y="{}" {} font-size="{}" fill="{}">{}</text>"#,
            label.x,
            label.y,
            label.anchor.svg_attributes(),
            font_size,
            color_str,
            escape_xml(&label.text)
        ));
    }
    svg_data.push_str("</svg>");

    svg_data
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Rasterise labels onto a transparent pixmap of the given size.
pub fn render_labels(
    width: u32,
    height: u32,
    labels: &[TextLabel],
    color: Rgb<u8>,
    font_size: f32,
) -> Result<Pixmap, OverlayError> {
    let svg_data = labels_to_svg(width, height, labels, color, font_size);

    // Create font database with system fonts
    let mut fontdb = fontdb::Database::new();
    fontdb.load_system_fonts();
    if fontdb.is_empty() {
        warn!("No system fonts found, labels will be blank");
    }

    let mut options = Options::default();
    options.fontdb = Arc::new(fontdb);
    options.font_family = LABEL_FONT_FAMILY.to_string();

    let svg_tree = Tree::from_str(&svg_data, &options)?;

    let mut pixmap = Pixmap::new(width, height).ok_or(OverlayError::Allocation { width, height })?;
    resvg::render(&svg_tree, Transform::identity(), &mut pixmap.as_mut());

    Ok(pixmap)
}

/// Alpha-blend an overlay pixmap onto an image of the same size.
///
/// Pixels outside the overlay are left untouched.
pub fn overlay_to_image(image: &RgbImage, overlay: &Pixmap) -> RgbImage {
    let mut output = image.clone();

    for (x, y, pixel) in output.enumerate_pixels_mut() {
        let Some(overlay_pixel) = overlay.pixel(x, y) else {
            continue;
        };
        let alpha = overlay_pixel.alpha();
        if alpha == 0 {
            continue;
        }
        let color = overlay_pixel.demultiply();
        let Rgb([r, g, b]) = *pixel;
        *pixel = Rgb([
            blend_channel(r, color.red(), alpha),
            blend_channel(g, color.green(), alpha),
            blend_channel(b, color.blue(), alpha),
        ]);
    }

    output
}

// Blend color channels based on alpha
fn blend_channel(base: u8, overlay: u8, alpha: u8) -> u8 {
    let base_f = base as f32;
    let overlay_f = overlay as f32;
    let alpha_f = alpha as f32 / 255.0;

    (base_f * (1.0 - alpha_f) + overlay_f * alpha_f).round() as u8
}
