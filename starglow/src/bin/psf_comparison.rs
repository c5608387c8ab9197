//! PSF comparison chart renderer
//!
//! Renders one star at a range of magnitudes with each PSF variant side by
//! side and writes the labelled chart as an image. Use the white background
//! to see the effective render area of each variant, and corner markers to
//! check the computed footprint boundaries.

use clap::Parser;
use starglow::chart::{save_chart, ChartConfig, ChartLayout};
use starglow::psf::PsfAlgorithm;
use starglow::shared_args::SharedRenderArgs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "PSF Comparison",
    about = "Renders a chart comparing photopic PSF approximations across magnitudes",
    long_about = None
)]
struct Args {
    #[command(flatten)]
    shared: SharedRenderArgs,

    /// Star magnitudes to render, one row each (comma separated)
    #[arg(
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        default_value = "1,0,-1,-2,-3,-4,-5,-6"
    )]
    magnitudes: Vec<f64>,

    /// PSF variants to render, one column each (comma separated)
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_value = "original,optimized,simplified,bounded"
    )]
    algorithms: Vec<PsfAlgorithm>,

    /// Skip sRGB gamma correction (smaller but unrealistic render area)
    #[arg(long)]
    no_gamma: bool,

    /// Draw on white so every lit pixel of the render area shows
    #[arg(long)]
    white_background: bool,

    /// Mark footprint corners in red
    #[arg(long)]
    corners: bool,

    /// Upscale factor from the render buffer to the output image
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u16).range(1..))]
    scale: u16,

    /// Output image path
    #[arg(short, long, default_value = "psf_comparison.png")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = ChartConfig {
        degrees_per_pixel: args.shared.degrees_per_pixel,
        exposure: args.shared.exposure,
        magnitudes: args.magnitudes.clone(),
        star_color: args.shared.star_color,
        gamma_correction: !args.no_gamma,
        white_background: args.white_background,
        corners: args.corners,
        max_square_size: args.shared.max_square_size,
        algorithms: args.algorithms.clone(),
        layout: ChartLayout {
            scale: args.scale as usize,
            ..ChartLayout::default()
        },
    };

    println!("PSF Comparison Chart");
    println!("====================");
    println!();
    println!("Degrees per pixel: {:.3}", config.degrees_per_pixel);
    println!("Exposure: {:.2}", config.exposure);
    println!("Star color: {}", config.star_color);
    println!("Gamma correction: {}", config.gamma_correction);
    println!(
        "Bounded ceiling: {:.1} (max square {} px)",
        config.max_brightness(),
        config.max_square_size
    );
    println!(
        "Algorithms: {}",
        config
            .algorithms
            .iter()
            .map(|a| a.title())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!();

    let chart = save_chart(&config, &args.output)?;

    println!(
        "Saved {}x{} chart to {}",
        chart.width(),
        chart.height(),
        args.output.display()
    );

    Ok(())
}
