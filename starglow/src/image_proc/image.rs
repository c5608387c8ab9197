//! Output encoding for linear RGB buffers: sRGB gamma, 8-bit quantization,
//! nearest-neighbour upscaling and conversion to `image::RgbImage`.

use image::{Rgb, RgbImage};
use ndarray::Array3;

/// Linear value below which the sRGB curve is a straight line.
const SRGB_KNEE: f64 = 0.0031308;

/// Encode one linear sample with the CIE sRGB transfer curve.
pub fn srgb_encode(linear: f64) -> f64 {
    if linear < SRGB_KNEE {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Apply sRGB gamma correction to every sample of a linear buffer.
///
/// Values above 1 are encoded past 1 as well; clipping happens at
/// quantization.
pub fn gamma_correction(linear: &Array3<f64>) -> Array3<f64> {
    linear.mapv(srgb_encode)
}

/// Quantize samples in `[0, 1]` to 8 bits, clipping everything outside.
pub fn quantize_rgb(arr: &Array3<f64>) -> Array3<u8> {
    arr.mapv(|v| (v * 255.0).round().clamp(0.0, 255.0) as u8)
}

/// Nearest-neighbour upscaling: every pixel becomes a `times` x `times` block.
pub fn upscale_nearest<T: Copy>(arr: &Array3<T>, times: usize) -> Array3<T> {
    let (height, width, channels) = arr.dim();
    Array3::from_shape_fn(
        (height * times, width * times, channels),
        |(y, x, channel)| arr[[y / times, x / times, channel]],
    )
}

/// Converts an (height, width, 3) `Array3<u8>` to an `image::RgbImage`
///
/// Array indices `[y, x, c]` map to channel `c` of pixel `(x, y)`. Note that
/// array dimensions are (height, width) while image dimensions are (width, height).
pub fn array3_to_rgb_image(arr: &Array3<u8>) -> RgbImage {
    let (height, width, channels) = arr.dim();
    debug_assert_eq!(channels, 3, "expected an RGB buffer");

    let mut img = RgbImage::new(width as u32, height as u32);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let (row, col) = (y as usize, x as usize);
        *pixel = Rgb([arr[[row, col, 0]], arr[[row, col, 1]], arr[[row, col, 2]]]);
    }

    img
}
