//! Exposure and visibility calculator for star glow rendering
//!
//! Prints, for a range of magnitudes, the linear brightness of a star at the
//! chosen exposure, whether it survives 8-bit encoding, and how large a glow
//! footprint each bounded PSF variant gives it. Also converts between
//! exposure and the faintest visible magnitude.

use clap::Parser;
use starglow::image_proc::render::{glow_shape, GlowSettings, GlowShape, Star};
use starglow::photometry::magnitude::{
    brightness_limit, exposure_to_faintest_magnitude, faintest_magnitude_to_exposure, is_visible,
    magnitude_to_brightness,
};
use starglow::psf::PsfAlgorithm;
use starglow::shared_args::SharedRenderArgs;

#[derive(Parser, Debug)]
#[command(
    name = "Exposure Calculator",
    about = "Shows star brightness, visibility and glow size per magnitude",
    long_about = None
)]
struct Args {
    #[command(flatten)]
    shared: SharedRenderArgs,

    /// Brightest magnitude in the table
    #[arg(long, default_value_t = -6.0, allow_negative_numbers = true)]
    brightest: f64,

    /// Faintest magnitude in the table
    #[arg(long, default_value_t = 8.0, allow_negative_numbers = true)]
    faintest: f64,

    /// Magnitude step between table rows
    #[arg(long, default_value_t = 1.0)]
    step: f64,

    /// Use the visibility limit of plain 8-bit output instead of sRGB
    #[arg(long)]
    no_gamma: bool,

    /// Print the exposure at which this magnitude is the faintest visible
    #[arg(long, allow_negative_numbers = true)]
    target_faintest: Option<f64>,
}

/// Footprint description of one star for one variant
fn describe_glow(star: &Star, algorithm: PsfAlgorithm, settings: &GlowSettings) -> String {
    match glow_shape(star, algorithm, settings) {
        Ok(GlowShape::SinglePixel) => "pixel".to_string(),
        Ok(GlowShape::Square(footprint)) => format!("{} px", footprint.side()),
        Ok(GlowShape::FullImage) => "full".to_string(),
        Err(e) => format!("error: {}", e),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    if args.step <= 0.0 {
        return Err("Magnitude step must be positive".into());
    }

    let gamma = !args.no_gamma;
    let limit = brightness_limit(gamma);
    let exposure = args.shared.exposure;
    let settings = GlowSettings::new(
        args.shared.degrees_per_pixel,
        false,
        Some(args.shared.max_brightness()),
    )?;

    println!("Exposure Calculator");
    println!("===================");
    println!();
    println!("Exposure: {:.3}", exposure);
    println!(
        "Brightness limit: {:.3e} ({})",
        limit,
        if gamma { "sRGB" } else { "linear" }
    );
    println!(
        "Faintest visible magnitude: {:.2}",
        exposure_to_faintest_magnitude(exposure, limit)
    );
    println!();

    let bounded: Vec<PsfAlgorithm> = PsfAlgorithm::ALL
        .into_iter()
        .filter(PsfAlgorithm::is_bounded)
        .collect();

    println!(
        "{:<8} {:<14} {:<8} {:<12} {:<12} {:<12}",
        "Mag", "Brightness", "Visible", "Optimized", "Simplified", "Bounded"
    );
    println!("{:-<70}", "");

    let mut magnitude = args.brightest;
    while magnitude <= args.faintest + 1e-9 {
        let brightness = magnitude_to_brightness(magnitude, exposure);
        let visible = is_visible(brightness, limit);
        let star = Star::new(brightness, args.shared.star_color, 0, 0);

        let glows: Vec<String> = bounded
            .iter()
            .map(|&algorithm| {
                if visible {
                    describe_glow(&star, algorithm, &settings)
                } else {
                    "-".to_string()
                }
            })
            .collect();

        println!(
            "{:<8.2} {:<14.4e} {:<8} {:<12} {:<12} {:<12}",
            magnitude,
            brightness,
            if visible { "yes" } else { "no" },
            glows[0],
            glows[1],
            glows[2]
        );

        magnitude += args.step;
    }

    if let Some(target) = args.target_faintest {
        println!();
        println!(
            "Exposure for faintest visible magnitude {:.2}: {:.4}",
            target,
            faintest_magnitude_to_exposure(target, limit)
        );
    }

    Ok(())
}
