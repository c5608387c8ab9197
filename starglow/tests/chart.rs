//! Chart rendering through to an image file on disk.

use approx::assert_relative_eq;
use starglow::chart::{render_chart, save_chart, ChartConfig, ChartLayout};
use starglow::photometry::magnitude::{
    brightness_limit, exposure_to_faintest_magnitude, faintest_magnitude_to_exposure,
    magnitude_to_brightness,
};
use starglow::psf::PsfAlgorithm;
use tempfile::tempdir;

#[test]
fn test_save_chart_writes_readable_png() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("psf_comparison.png");
    let config = ChartConfig::default();

    let chart = save_chart(&config, &path).unwrap();
    assert_eq!((chart.width(), chart.height()), (978, 951));

    let loaded = image::open(&path).unwrap().to_rgb8();
    assert_eq!(loaded.dimensions(), chart.dimensions());
    assert_eq!(loaded.as_raw(), chart.as_raw());

    // The center of every cell carries its star
    let scale = config.layout.scale as u32;
    for column in 0..config.algorithms.len() {
        for row in 0..config.magnitudes.len() {
            let (x, y) = config.layout.cell_center(column, row);
            let pixel = loaded.get_pixel(x as u32 * scale + 1, y as u32 * scale + 1);
            assert!(
                pixel.0.iter().any(|&v| v > 0),
                "Empty cell at column {} row {}",
                column,
                row
            );
        }
    }
}

#[test]
fn test_white_background_chart_keeps_dark_corners_white() {
    let config = ChartConfig {
        white_background: true,
        magnitudes: vec![0.0],
        algorithms: vec![PsfAlgorithm::Simplified],
        ..ChartConfig::default()
    };

    let chart = render_chart(&config).unwrap();
    let (width, height) = config.image_size();
    assert_eq!((chart.width(), chart.height()), (width as u32, height as u32));
    assert_eq!(chart.get_pixel(width as u32 - 1, height as u32 - 1).0, [255, 255, 255]);
}

#[test]
fn test_custom_scale_resizes_output() {
    let config = ChartConfig {
        magnitudes: vec![-2.0, 0.0],
        algorithms: vec![PsfAlgorithm::Optimized, PsfAlgorithm::Bounded],
        layout: ChartLayout {
            scale: 1,
            ..ChartLayout::default()
        },
        ..ChartConfig::default()
    };

    let chart = render_chart(&config).unwrap();
    let (width, height) = config.image_size();
    assert_eq!((chart.width(), chart.height()), (width as u32, height as u32));
}

#[test]
fn test_faintest_magnitude_round_trip() {
    for gamma in [true, false] {
        let limit = brightness_limit(gamma);
        for faintest in [-2.0, 0.0, 3.5, 7.0] {
            let exposure = faintest_magnitude_to_exposure(faintest, limit);
            assert_relative_eq!(
                exposure_to_faintest_magnitude(exposure, limit),
                faintest,
                epsilon = 1e-9
            );
            assert_relative_eq!(
                magnitude_to_brightness(faintest, exposure),
                limit,
                max_relative = 1e-12
            );
        }
    }
}
