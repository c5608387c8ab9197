//! Diagnostic corner markers for glow footprints.

use ndarray::Array3;

use super::footprint::Footprint;

/// Mark the four corners of a glow footprint in the red channel.
///
/// Each corner pixel, together with its two axis-adjacent neighbours pointing
/// into the footprint, gets its red sample set to 1. A corner is only marked
/// when it lies strictly inside the buffer (`0 < x < width`, `0 < y < height`);
/// the neighbours are bounds-checked on their own. Green and blue are never
/// touched.
///
/// # Arguments
/// * `image` - Linear RGB buffer of shape (height, width, 3)
/// * `center` - Star pixel as `(x, y)`
/// * `half_width` - Footprint half-width in pixels
pub fn draw_corners(image: &mut Array3<f64>, center: (i64, i64), half_width: usize) {
    let (height, width, _) = image.dim();
    let footprint = Footprint::new(center.0, center.1, half_width);

    // Direction from the center towards each corner, in Footprint::corners order
    let directions = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

    for ((x, y), (dir_x, dir_y)) in footprint.corners().into_iter().zip(directions) {
        if !(0 < x && x < width as i64 && 0 < y && y < height as i64) {
            continue;
        }
        for (px, py) in [(x, y), (x - dir_x, y), (x, y - dir_y)] {
            mark_red(image, px, py);
        }
    }
}

fn mark_red(image: &mut Array3<f64>, x: i64, y: i64) {
    let (height, width, _) = image.dim();
    if x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height {
        image[[y as usize, x as usize, 0]] = 1.0;
    }
}
